use glam::Vec2;
use rapier2d::prelude::*;
use std::sync::Mutex;

use crate::api::types::CollisionCategory;
use crate::core::broker::BodyBroker;

// ---------------------------------------------------------------------------
// Conversion helpers (private): glam to nalgebra
// ---------------------------------------------------------------------------

fn vec2_to_na(v: Vec2) -> nalgebra::Vector2<f32> {
    nalgebra::Vector2::new(v.x, v.y)
}

fn na_iso_to_pos_rot(iso: &nalgebra::Isometry2<f32>) -> (Vec2, f32) {
    let pos = Vec2::new(iso.translation.x, iso.translation.y);
    let rot = iso.rotation.angle();
    (pos, rot)
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// The kind of rigid body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    Dynamic,
    Fixed,
}

impl BodyType {
    fn to_rapier(self) -> RigidBodyType {
        match self {
            BodyType::Dynamic => RigidBodyType::Dynamic,
            BodyType::Fixed => RigidBodyType::Fixed,
        }
    }
}

/// Shape description for a collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderDesc {
    Ball { radius: f32 },
    Cuboid { half_width: f32, half_height: f32 },
}

impl ColliderDesc {
    fn build_collider(&self) -> ColliderBuilder {
        match *self {
            ColliderDesc::Ball { radius } => ColliderBuilder::ball(radius),
            ColliderDesc::Cuboid { half_width, half_height } => {
                ColliderBuilder::cuboid(half_width, half_height)
            }
        }
    }
}

/// Physical material properties for a collider.
#[derive(Debug, Clone, Copy)]
pub struct ColliderMaterial {
    pub restitution: f32,
    pub friction: f32,
    pub density: f32,
}

impl ColliderMaterial {
    /// Arena geometry: grippy, no bounce.
    pub fn platform() -> Self {
        Self {
            restitution: 0.0,
            friction: 0.6,
            density: 1.0,
        }
    }
}

impl Default for ColliderMaterial {
    fn default() -> Self {
        Self {
            restitution: 0.1,
            friction: 0.3,
            density: 1.0,
        }
    }
}

/// Builder for describing a rigid body before creation.
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub body_type: BodyType,
    pub position: Vec2,
    pub collider: ColliderDesc,
    pub category: CollisionCategory,
    /// Bitmask of categories this body collides with.
    pub mask: u32,
}

impl BodyDesc {
    /// Create a dynamic body description with the given collider shape.
    pub fn dynamic(collider: ColliderDesc) -> Self {
        Self {
            body_type: BodyType::Dynamic,
            position: Vec2::ZERO,
            collider,
            category: CollisionCategory::Player,
            mask: u32::MAX,
        }
    }

    /// Create a fixed (static) body description with the given collider shape.
    pub fn fixed(collider: ColliderDesc) -> Self {
        Self {
            body_type: BodyType::Fixed,
            position: Vec2::ZERO,
            collider,
            category: CollisionCategory::Platform,
            mask: u32::MAX,
        }
    }

    pub fn with_position(mut self, pos: Vec2) -> Self {
        self.position = pos;
        self
    }

    /// Tag the body with a collision category and the categories it hits.
    pub fn with_category(mut self, category: CollisionCategory, mask: u32) -> Self {
        self.category = category;
        self.mask = mask;
        self
    }
}

/// Handle pair referencing Rapier internals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicsBody {
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
}

/// A collision event between two categorised bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionPair {
    pub category_a: CollisionCategory,
    pub category_b: CollisionCategory,
    /// `true` when the collision just started, `false` when it ended.
    pub started: bool,
}

// ---------------------------------------------------------------------------
// WASM-safe event collector (no crossbeam)
// ---------------------------------------------------------------------------

struct DirectEventCollector {
    collisions: Mutex<Vec<CollisionEvent>>,
}

impl DirectEventCollector {
    fn new() -> Self {
        Self {
            collisions: Mutex::new(Vec::new()),
        }
    }

    fn drain_collisions(&self) -> Vec<CollisionEvent> {
        match self.collisions.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl EventHandler for DirectEventCollector {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        if let Ok(mut events) = self.collisions.lock() {
            events.push(event);
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: f32,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: f32,
    ) {
    }
}

// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// Wraps all Rapier2D boilerplate into a single struct.
///
/// The arena references this world but never owns it; platform bodies are
/// created and destroyed through the [`BodyBroker`] impl below.
pub struct PhysicsWorld {
    gravity: nalgebra::Vector2<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    event_collector: DirectEventCollector,
}

impl PhysicsWorld {
    /// Create a new physics world with the given gravity vector.
    /// Arena coordinates are Y-up, so downward gravity has negative Y.
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity: vec2_to_na(gravity),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            event_collector: DirectEventCollector::new(),
        }
    }

    /// Set the integration timestep.
    pub fn set_dt(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
    }

    /// Create a rigid body + collider and return handles.
    /// The collision category bits are stored in the body's `user_data`.
    pub fn create_body(&mut self, desc: &BodyDesc, material: ColliderMaterial) -> PhysicsBody {
        let rb = RigidBodyBuilder::new(desc.body_type.to_rapier())
            .translation(vec2_to_na(desc.position))
            .user_data(desc.category.bits() as u128)
            .build();

        let body_handle = self.bodies.insert(rb);

        let groups = InteractionGroups::new(
            Group::from_bits_truncate(desc.category.bits()),
            Group::from_bits_truncate(desc.mask),
        );

        let collider = desc
            .collider
            .build_collider()
            .restitution(material.restitution)
            .friction(material.friction)
            .density(material.density)
            .collision_groups(groups)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();

        let collider_handle =
            self.colliders
                .insert_with_parent(collider, body_handle, &mut self.bodies);

        PhysicsBody {
            body_handle,
            collider_handle,
        }
    }

    /// Remove a body and all its colliders from the simulation.
    pub fn remove_body(&mut self, body: &PhysicsBody) {
        self.bodies.remove(
            body.body_handle,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Whether the body is still part of the simulation.
    pub fn contains(&self, body: &PhysicsBody) -> bool {
        self.bodies.contains(body.body_handle)
    }

    /// Step the simulation and collect collision events into the provided Vec.
    pub fn step_into(&mut self, collision_events: &mut Vec<CollisionPair>) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &self.event_collector,
        );

        for event in self.event_collector.drain_collisions() {
            let (h1, h2, started) = match event {
                CollisionEvent::Started(h1, h2, _) => (h1, h2, true),
                CollisionEvent::Stopped(h1, h2, _) => (h1, h2, false),
            };

            // Bodies removed mid-frame resolve to None and are dropped here.
            let category_a = self.collider_category(h1);
            let category_b = self.collider_category(h2);

            if let (Some(a), Some(b)) = (category_a, category_b) {
                collision_events.push(CollisionPair {
                    category_a: a,
                    category_b: b,
                    started,
                });
            }
        }
    }

    /// Get the current position and rotation of a body.
    pub fn body_position(&self, body: &PhysicsBody) -> (Vec2, f32) {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_iso_to_pos_rot(rb.position()))
            .unwrap_or((Vec2::ZERO, 0.0))
    }

    /// Number of rigid bodies in the simulation.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Query the collider shape of a physics body.
    /// Returns `None` if the collider no longer exists or has an unsupported shape.
    pub fn collider_shape(&self, body: &PhysicsBody) -> Option<ColliderDesc> {
        let collider = self.colliders.get(body.collider_handle)?;
        let shape = collider.shape();
        if let Some(ball) = shape.as_ball() {
            Some(ColliderDesc::Ball { radius: ball.radius })
        } else {
            shape.as_cuboid().map(|cuboid| ColliderDesc::Cuboid {
                half_width: cuboid.half_extents.x,
                half_height: cuboid.half_extents.y,
            })
        }
    }

    // -- private helpers --

    fn collider_category(&self, collider_handle: ColliderHandle) -> Option<CollisionCategory> {
        let collider = self.colliders.get(collider_handle)?;
        let body_handle = collider.parent()?;
        let body = self.bodies.get(body_handle)?;
        CollisionCategory::from_bits(body.user_data as u32)
    }
}

impl BodyBroker for PhysicsWorld {
    type Handle = PhysicsBody;

    fn create_static_box(
        &mut self,
        center: Vec2,
        half_extents: Vec2,
        category: CollisionCategory,
    ) -> PhysicsBody {
        let desc = BodyDesc::fixed(ColliderDesc::Cuboid {
            half_width: half_extents.x,
            half_height: half_extents.y,
        })
        .with_position(center)
        .with_category(category, u32::MAX);
        self.create_body(&desc, ColliderMaterial::platform())
    }

    fn destroy_body(&mut self, handle: PhysicsBody) {
        self.remove_body(&handle);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_remove_body() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let body = world.create_body(
            &BodyDesc::dynamic(ColliderDesc::Ball { radius: 0.4 }),
            ColliderMaterial::default(),
        );
        assert_eq!(world.body_count(), 1);
        assert!(world.contains(&body));
        world.remove_body(&body);
        assert_eq!(world.body_count(), 0);
        assert!(!world.contains(&body));
    }

    #[test]
    fn gravity_pulls_dynamic_body_down() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, -20.0));
        world.set_dt(1.0 / 60.0);

        let body = world.create_body(
            &BodyDesc::dynamic(ColliderDesc::Ball { radius: 0.4 }),
            ColliderMaterial::default(),
        );

        let (initial_pos, _) = world.body_position(&body);
        let mut events = Vec::new();
        for _ in 0..10 {
            world.step_into(&mut events);
        }
        let (new_pos, _) = world.body_position(&body);

        assert!(
            new_pos.y < initial_pos.y,
            "Body should fall: start={}, end={}",
            initial_pos.y,
            new_pos.y
        );
    }

    #[test]
    fn static_box_matches_requested_geometry() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let body = world.create_static_box(
            Vec2::new(-8.0, -1.0),
            Vec2::new(3.0, 0.3),
            CollisionCategory::Platform,
        );

        let (pos, rot) = world.body_position(&body);
        assert!((pos - Vec2::new(-8.0, -1.0)).length() < 0.001);
        assert!(rot.abs() < 0.001);

        match world.collider_shape(&body) {
            Some(ColliderDesc::Cuboid { half_width, half_height }) => {
                assert!((half_width - 3.0).abs() < 0.001);
                assert!((half_height - 0.3).abs() < 0.001);
            }
            other => panic!("expected Cuboid, got {:?}", other),
        }

        world.destroy_body(body);
        assert_eq!(world.body_count(), 0);
    }

    #[test]
    fn static_box_does_not_move() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, -20.0));
        world.set_dt(1.0 / 60.0);
        let body = world.create_static_box(
            Vec2::new(0.0, -5.0),
            Vec2::new(15.0, 0.5),
            CollisionCategory::Platform,
        );

        let mut events = Vec::new();
        for _ in 0..10 {
            world.step_into(&mut events);
        }

        let (pos, _) = world.body_position(&body);
        assert!((pos.y + 5.0).abs() < 0.001, "Fixed body should not move: y={}", pos.y);
    }

    #[test]
    fn falling_player_reports_platform_contact() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, -20.0));
        world.set_dt(1.0 / 60.0);

        world.create_static_box(
            Vec2::new(0.0, -5.0),
            Vec2::new(15.0, 0.5),
            CollisionCategory::Platform,
        );
        world.create_body(
            &BodyDesc::dynamic(ColliderDesc::Ball { radius: 0.4 })
                .with_position(Vec2::new(0.0, -3.5))
                .with_category(CollisionCategory::Player, u32::MAX),
            ColliderMaterial::default(),
        );

        let mut all_events = Vec::new();
        for _ in 0..60 {
            world.step_into(&mut all_events);
        }

        let started: Vec<_> = all_events.iter().filter(|e| e.started).collect();
        assert!(!started.is_empty(), "player should land on the platform");
        let cats = [started[0].category_a, started[0].category_b];
        assert!(cats.contains(&CollisionCategory::Platform));
        assert!(cats.contains(&CollisionCategory::Player));
    }

    #[test]
    fn masked_categories_pass_through() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, -20.0));
        world.set_dt(1.0 / 60.0);

        world.create_static_box(
            Vec2::new(0.0, -5.0),
            Vec2::new(15.0, 0.5),
            CollisionCategory::Platform,
        );
        // Pickups only collide with players, so it falls through the ground.
        let pickup = world.create_body(
            &BodyDesc::dynamic(ColliderDesc::Ball { radius: 0.2 })
                .with_position(Vec2::new(0.0, -3.5))
                .with_category(CollisionCategory::Pickup, CollisionCategory::Player.bits()),
            ColliderMaterial::default(),
        );

        let mut events = Vec::new();
        for _ in 0..90 {
            world.step_into(&mut events);
        }

        let (pos, _) = world.body_position(&pickup);
        assert!(pos.y < -5.5, "pickup should fall through: y={}", pos.y);
        assert!(events.iter().all(|e| !e.started));
    }

    #[test]
    fn body_desc_carries_position_and_category() {
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: 0.5 })
            .with_position(Vec2::new(1.0, 2.0))
            .with_category(CollisionCategory::Projectile, 0x1);

        assert_eq!(desc.body_type, BodyType::Dynamic);
        assert_eq!(desc.position, Vec2::new(1.0, 2.0));
        assert_eq!(desc.category, CollisionCategory::Projectile);
        assert_eq!(desc.mask, 0x1);
    }

    #[test]
    fn platform_material_is_grippy() {
        let mat = ColliderMaterial::platform();
        assert!((mat.friction - 0.6).abs() < 0.001);
        assert_eq!(mat.restitution, 0.0);
    }
}
