use glam::Vec2;
use rubble_engine::{
    Arena, ArenaConfig, BodyDesc, ColliderDesc, ColliderMaterial, CollisionCategory, CollisionPair,
    FixedTimestep, Impact, ImpactQueue, ImpactReport, LevelLibrary, PhysicsBody, PhysicsWorld,
    PlatformBuffer,
};

/// Drives an arena and its physics world at a fixed rate.
///
/// Each fixed step runs in a strict order: apply queued impacts, compact
/// tombstones, then step the solver. Platform bodies are therefore created
/// and destroyed only while the solver is idle.
pub struct ArenaRunner {
    arena: Arena<PhysicsBody>,
    physics: PhysicsWorld,
    levels: LevelLibrary,
    impacts: ImpactQueue,
    timestep: FixedTimestep,
    config: ArenaConfig,
    collisions: Vec<CollisionPair>,
    frame_report: ImpactReport,
    platform_buffer: PlatformBuffer,
    steps: u64,
}

impl ArenaRunner {
    pub fn new(config: ArenaConfig, levels: LevelLibrary) -> Self {
        let mut physics = PhysicsWorld::new(config.gravity);
        physics.set_dt(config.fixed_dt);
        let timestep = FixedTimestep::new(config.fixed_dt).with_max_steps(config.max_steps_per_frame);

        Self {
            arena: Arena::new(config.tuning.clone()),
            physics,
            levels,
            impacts: ImpactQueue::new(),
            timestep,
            config,
            collisions: Vec::new(),
            frame_report: ImpactReport::default(),
            platform_buffer: PlatformBuffer::new(),
            steps: 0,
        }
    }

    /// Rebuild the arena from level `index`. Pending impacts are dropped.
    pub fn load_level(&mut self, index: usize) -> Option<usize> {
        self.impacts.drain();
        self.timestep.reset();
        let built = self.arena.create_level(&mut self.physics, &self.levels, index);
        self.platform_buffer.rebuild(self.arena.platforms().map(|(_, p)| p));
        built
    }

    /// Queue an impact for the next fixed step.
    pub fn push_impact(&mut self, impact: Impact) {
        self.impacts.push(impact);
    }

    /// Advance by one rendered frame. Returns the number of fixed steps run.
    pub fn tick(&mut self, dt: f32) -> u32 {
        self.collisions.clear();
        self.frame_report = ImpactReport::default();

        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.step();
        }

        if steps > 0 {
            self.platform_buffer.rebuild(self.arena.platforms().map(|(_, p)| p));
        }
        steps
    }

    /// Run exactly one fixed step.
    pub fn step(&mut self) {
        for impact in self.impacts.drain() {
            let report = self.arena.apply_impact(&mut self.physics, &impact);
            self.frame_report.merge(report);
        }
        self.arena.compact();
        self.physics.step_into(&mut self.collisions);
        self.steps += 1;
    }

    /// Drop a dynamic player-category ball, e.g. to test footing.
    pub fn spawn_probe(&mut self, position: Vec2, radius: f32) -> PhysicsBody {
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius })
            .with_position(position)
            .with_category(CollisionCategory::Player, u32::MAX);
        self.physics.create_body(&desc, ColliderMaterial::default())
    }

    pub fn random_platform_top(&mut self) -> Vec2 {
        self.arena.random_platform_top()
    }

    pub fn arena(&self) -> &Arena<PhysicsBody> {
        &self.arena
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Collision events from the steps of the last `tick`.
    pub fn collisions(&self) -> &[CollisionPair] {
        &self.collisions
    }

    /// Accumulated impact outcome of the last `tick`.
    pub fn frame_report(&self) -> ImpactReport {
        self.frame_report
    }

    pub fn platform_buffer(&self) -> &PlatformBuffer {
        &self.platform_buffer
    }

    pub fn pending_impacts(&self) -> usize {
        self.impacts.len()
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }
}
