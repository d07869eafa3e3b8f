//! The body create/destroy contract the terrain engine consumes.
//!
//! Terrain code never talks to rapier directly: it asks a [`BodyBroker`]
//! for a static box and gets back an [`OwnedBody`], which can only be given
//! back by consuming it. That makes "destroyed exactly once" a property of
//! the type instead of call-site discipline.

use glam::Vec2;

use crate::api::types::CollisionCategory;

/// Creates and destroys static bodies in some physics world.
pub trait BodyBroker {
    type Handle: Copy + std::fmt::Debug;

    fn create_static_box(
        &mut self,
        center: Vec2,
        half_extents: Vec2,
        category: CollisionCategory,
    ) -> Self::Handle;

    fn destroy_body(&mut self, handle: Self::Handle);
}

/// Exclusive ownership of one broker-issued body.
///
/// Deliberately not `Clone`: the only way to get rid of it is
/// [`OwnedBody::release`], which hands the handle back to the broker.
#[derive(Debug)]
#[must_use = "an OwnedBody must be released through its broker"]
pub struct OwnedBody<H> {
    handle: H,
}

impl<H: Copy> OwnedBody<H> {
    /// Ask the broker for a static box and take ownership of it.
    pub fn create<B>(broker: &mut B, center: Vec2, half_extents: Vec2, category: CollisionCategory) -> Self
    where
        B: BodyBroker<Handle = H> + ?Sized,
    {
        Self {
            handle: broker.create_static_box(center, half_extents, category),
        }
    }

    pub fn handle(&self) -> H {
        self.handle
    }

    /// Destroy the body. Consumes the owner so it cannot be released twice.
    pub fn release<B>(self, broker: &mut B)
    where
        B: BodyBroker<Handle = H> + ?Sized,
    {
        broker.destroy_body(self.handle);
    }
}

/// Recording broker used by the terrain tests.
#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashSet;

    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct CreatedBox {
        pub handle: u32,
        pub center: Vec2,
        pub half_extents: Vec2,
        pub category: CollisionCategory,
    }

    #[derive(Debug, Default)]
    pub struct RecordingBroker {
        next: u32,
        pub live: HashSet<u32>,
        pub created: Vec<CreatedBox>,
        pub destroyed: Vec<u32>,
    }

    impl RecordingBroker {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn live_count(&self) -> usize {
            self.live.len()
        }
    }

    impl BodyBroker for RecordingBroker {
        type Handle = u32;

        fn create_static_box(
            &mut self,
            center: Vec2,
            half_extents: Vec2,
            category: CollisionCategory,
        ) -> u32 {
            let handle = self.next;
            self.next += 1;
            self.live.insert(handle);
            self.created.push(CreatedBox { handle, center, half_extents, category });
            handle
        }

        fn destroy_body(&mut self, handle: u32) {
            assert!(self.live.remove(&handle), "body {handle} destroyed twice or never created");
            self.destroyed.push(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingBroker;
    use super::*;

    #[test]
    fn create_then_release() {
        let mut broker = RecordingBroker::new();
        let body = OwnedBody::create(
            &mut broker,
            Vec2::new(1.0, 2.0),
            Vec2::new(3.0, 0.5),
            CollisionCategory::Platform,
        );
        assert_eq!(broker.live_count(), 1);
        assert_eq!(broker.created[0].center, Vec2::new(1.0, 2.0));

        let handle = body.handle();
        body.release(&mut broker);
        assert_eq!(broker.live_count(), 0);
        assert_eq!(broker.destroyed, vec![handle]);
    }
}
