//! Slot-indexed platform storage.
//!
//! Live platforms never move: destroying one leaves a tombstone in its slot,
//! and tombstones are only recycled by [`PlatformStore::compact`], which runs
//! between simulation steps. Recycling bumps the slot generation so stale
//! [`PlatformId`]s stop resolving.

use crate::api::types::PlatformId;
use crate::terrain::platform::Platform;

#[derive(Debug)]
struct Slot<H> {
    generation: u32,
    platform: Option<Platform<H>>,
}

#[derive(Debug)]
pub struct PlatformStore<H> {
    slots: Vec<Slot<H>>,
    free: Vec<u32>,
}

impl<H: Copy> PlatformStore<H> {
    pub fn new() -> Self {
        Self {
            slots: Vec::with_capacity(64),
            free: Vec::new(),
        }
    }

    pub fn insert(&mut self, platform: Platform<H>) -> PlatformId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.platform = Some(platform);
            return PlatformId { index, generation: slot.generation };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot { generation: 0, platform: Some(platform) });
        PlatformId { index, generation: 0 }
    }

    /// Look up a platform, dead or alive, as long as its slot was not recycled.
    pub fn get(&self, id: PlatformId) -> Option<&Platform<H>> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.platform.as_ref()
    }

    pub(crate) fn get_mut(&mut self, id: PlatformId) -> Option<&mut Platform<H>> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.platform.as_mut()
    }

    /// Alive platforms in slot order.
    pub fn iter_alive(&self) -> impl Iterator<Item = (PlatformId, &Platform<H>)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            let platform = slot.platform.as_ref().filter(|p| p.is_alive())?;
            Some((PlatformId { index: index as u32, generation: slot.generation }, platform))
        })
    }

    pub(crate) fn iter_alive_mut(&mut self) -> impl Iterator<Item = (PlatformId, &mut Platform<H>)> {
        self.slots.iter_mut().enumerate().filter_map(|(index, slot)| {
            let generation = slot.generation;
            let platform = slot.platform.as_mut().filter(|p| p.is_alive())?;
            Some((PlatformId { index: index as u32, generation }, platform))
        })
    }

    pub fn alive_count(&self) -> usize {
        self.iter_alive().count()
    }

    /// Number of dead platforms still occupying slots.
    pub fn tombstone_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(&slot.platform, Some(p) if !p.is_alive()))
            .count()
    }

    /// Recycle tombstoned slots. Returns how many were freed.
    pub fn compact(&mut self) -> usize {
        let mut freed = 0;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if matches!(&slot.platform, Some(p) if !p.is_alive()) {
                slot.platform = None;
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
                freed += 1;
            }
        }
        freed
    }

    /// Remove every platform, dead or alive, invalidating all ids.
    /// Refilled slots are handed out from index 0 upwards, so a rebuilt
    /// level iterates in the same order as the first build.
    pub(crate) fn take_all(&mut self) -> Vec<Platform<H>> {
        let mut taken = Vec::with_capacity(self.slots.len());
        for slot in &mut self.slots {
            if let Some(platform) = slot.platform.take() {
                slot.generation = slot.generation.wrapping_add(1);
                taken.push(platform);
            }
        }
        self.free.clear();
        self.free.extend((0..self.slots.len() as u32).rev());
        taken
    }
}

impl<H: Copy> Default for PlatformStore<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::broker::testing::RecordingBroker;
    use crate::terrain::carver::Rect;
    use crate::terrain::platform::PlatformKind;
    use glam::Vec2;

    fn slab(broker: &mut RecordingBroker, x: f32) -> Platform<u32> {
        Platform::spawn(
            broker,
            Rect::new(Vec2::new(x, 0.0), Vec2::new(1.0, 0.25)),
            PlatformKind::Stone,
            200.0,
        )
    }

    #[test]
    fn insert_and_get() {
        let mut broker = RecordingBroker::new();
        let mut store = PlatformStore::new();
        let a = store.insert(slab(&mut broker, 0.0));
        let b = store.insert(slab(&mut broker, 5.0));

        assert_ne!(a, b);
        assert_eq!(store.get(b).unwrap().center.x, 5.0);
        assert_eq!(store.alive_count(), 2);
    }

    #[test]
    fn dead_platform_keeps_its_slot_until_compaction() {
        let mut broker = RecordingBroker::new();
        let mut store = PlatformStore::new();
        let a = store.insert(slab(&mut broker, 0.0));
        let b = store.insert(slab(&mut broker, 5.0));

        store.get_mut(a).unwrap().destroy(&mut broker);
        assert_eq!(store.alive_count(), 1);
        assert_eq!(store.tombstone_count(), 1);
        assert!(!store.get(a).unwrap().is_alive());

        assert_eq!(store.compact(), 1);
        assert!(store.get(a).is_none(), "stale id must not resolve");
        assert!(store.get(b).unwrap().is_alive(), "live ids survive compaction");
    }

    #[test]
    fn recycled_slot_gets_new_generation() {
        let mut broker = RecordingBroker::new();
        let mut store = PlatformStore::new();
        let a = store.insert(slab(&mut broker, 0.0));
        store.get_mut(a).unwrap().destroy(&mut broker);
        store.compact();

        let c = store.insert(slab(&mut broker, 9.0));
        assert_eq!(c.index, a.index);
        assert_ne!(c.generation, a.generation);
        assert!(store.get(a).is_none());
        assert_eq!(store.get(c).unwrap().center.x, 9.0);
    }

    #[test]
    fn iter_alive_skips_tombstones_in_slot_order() {
        let mut broker = RecordingBroker::new();
        let mut store = PlatformStore::new();
        let ids: Vec<_> = (0..4).map(|i| store.insert(slab(&mut broker, i as f32))).collect();
        store.get_mut(ids[1]).unwrap().destroy(&mut broker);

        let xs: Vec<f32> = store.iter_alive().map(|(_, p)| p.center.x).collect();
        assert_eq!(xs, vec![0.0, 2.0, 3.0]);
    }

    #[test]
    fn take_all_empties_the_store() {
        let mut broker = RecordingBroker::new();
        let mut store = PlatformStore::new();
        let a = store.insert(slab(&mut broker, 0.0));
        store.insert(slab(&mut broker, 1.0));

        let taken = store.take_all();
        assert_eq!(taken.len(), 2);
        assert_eq!(store.alive_count(), 0);
        assert!(store.get(a).is_none());

        for mut p in taken {
            p.destroy(&mut broker);
        }
        assert_eq!(broker.live_count(), 0);
    }

    #[test]
    fn refill_after_take_all_keeps_slot_order() {
        let mut broker = RecordingBroker::new();
        let mut store = PlatformStore::new();
        for i in 0..3 {
            store.insert(slab(&mut broker, i as f32));
        }
        for mut p in store.take_all() {
            p.destroy(&mut broker);
        }

        let ids: Vec<_> = (0..3).map(|i| store.insert(slab(&mut broker, i as f32))).collect();
        assert_eq!(ids.iter().map(|id| id.index).collect::<Vec<_>>(), vec![0, 1, 2]);
        let xs: Vec<f32> = store.iter_alive().map(|(_, p)| p.center.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0]);
    }
}
