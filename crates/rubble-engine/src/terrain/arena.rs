use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::api::types::{Impact, ImpactReport, PlatformId};
use crate::config::TerrainTuning;
use crate::core::broker::BodyBroker;
use crate::levels::{LevelLayout, LevelLibrary};
use crate::terrain::carver::Rect;
use crate::terrain::destruction;
use crate::terrain::platform::{Platform, PlatformKind};
use crate::terrain::spawn;
use crate::terrain::store::PlatformStore;

/// The destructible battlefield.
///
/// Owns every platform and its body handle. The physics world is passed in
/// per call and never stored, so the arena can sit next to it in the same
/// struct without borrow gymnastics. All body destruction goes through the
/// methods here.
pub struct Arena<H> {
    store: PlatformStore<H>,
    spawn_points: Vec<Vec2>,
    tuning: TerrainTuning,
    rng: Pcg32,
    level: Option<usize>,
}

impl<H: Copy> Arena<H> {
    pub fn new(tuning: TerrainTuning) -> Self {
        let rng = Pcg32::seed_from_u64(tuning.rng_seed);
        Self {
            store: PlatformStore::new(),
            spawn_points: Vec::new(),
            tuning,
            rng,
            level: None,
        }
    }

    pub fn tuning(&self) -> &TerrainTuning {
        &self.tuning
    }

    /// Index of the level currently built, if any.
    pub fn level(&self) -> Option<usize> {
        self.level
    }

    /// Tear down the current platforms and build level `index` from `library`.
    /// Out-of-range indices wrap; an empty library just leaves the arena empty.
    /// Returns the level index actually built.
    pub fn create_level<B>(&mut self, broker: &mut B, library: &LevelLibrary, index: usize) -> Option<usize>
    where
        B: BodyBroker<Handle = H> + ?Sized,
    {
        self.clear(broker);
        let Some((resolved, layout)) = library.resolve(index) else {
            log::warn!("level library is empty, arena left without platforms");
            return None;
        };
        self.build_layout(broker, layout);
        self.level = Some(resolved);
        Some(resolved)
    }

    fn build_layout<B>(&mut self, broker: &mut B, layout: &LevelLayout)
    where
        B: BodyBroker<Handle = H> + ?Sized,
    {
        for spec in &layout.platforms {
            if self.add_platform(broker, spec.rect(), spec.kind).is_none() {
                log::warn!("{}: skipping degenerate platform {:?}", layout.name, spec);
            }
        }
        self.spawn_points = layout.spawn_points.clone();
        log::info!(
            "built level '{}': {} platforms, {} spawn points",
            layout.name,
            self.store.alive_count(),
            self.spawn_points.len()
        );
    }

    /// Insert a full-health platform with a fresh static body.
    /// Returns `None` without touching the broker if `rect` is empty or not finite.
    pub fn add_platform<B>(&mut self, broker: &mut B, rect: Rect, kind: PlatformKind) -> Option<PlatformId>
    where
        B: BodyBroker<Handle = H> + ?Sized,
    {
        if !rect.is_valid() {
            return None;
        }
        Some(self.store.insert(Platform::spawn(broker, rect, kind, kind.base_health())))
    }

    /// Apply a queued impact of either mode.
    pub fn apply_impact<B>(&mut self, broker: &mut B, impact: &Impact) -> ImpactReport
    where
        B: BodyBroker<Handle = H> + ?Sized,
    {
        destruction::apply_impact(&mut self.store, broker, &self.tuning, impact)
    }

    /// Carve a hole regardless of health. Returns the number of platforms destroyed.
    pub fn carve<B>(&mut self, broker: &mut B, center: Vec2, radius: f32) -> usize
    where
        B: BodyBroker<Handle = H> + ?Sized,
    {
        self.apply_impact(broker, &Impact::carve(center, radius)).destroyed
    }

    /// Deal distance-scaled damage to every platform inside the radius.
    pub fn damage_in_radius<B>(&mut self, broker: &mut B, center: Vec2, radius: f32, damage: f32)
    where
        B: BodyBroker<Handle = H> + ?Sized,
    {
        self.apply_impact(broker, &Impact::damage(center, radius, damage));
    }

    /// High-yield blast: damage with `nuke_damage`. Falloff still applies.
    /// Returns the number of platforms destroyed.
    pub fn destroy_platforms_in_radius<B>(&mut self, broker: &mut B, center: Vec2, radius: f32) -> usize
    where
        B: BodyBroker<Handle = H> + ?Sized,
    {
        let damage = self.tuning.nuke_damage;
        self.apply_impact(broker, &Impact::damage(center, radius, damage)).destroyed
    }

    /// Destroy a single platform outright, leaving no remnants.
    /// Returns `false` for stale ids and already-dead platforms.
    pub fn nuke<B>(&mut self, broker: &mut B, id: PlatformId) -> bool
    where
        B: BodyBroker<Handle = H> + ?Sized,
    {
        self.store
            .get_mut(id)
            .map(|platform| platform.destroy(broker))
            .unwrap_or(false)
    }

    /// Release every body and forget every platform and spawn point.
    pub fn clear<B>(&mut self, broker: &mut B)
    where
        B: BodyBroker<Handle = H> + ?Sized,
    {
        let mut released = 0;
        for mut platform in self.store.take_all() {
            if platform.destroy(broker) {
                released += 1;
            }
        }
        if released > 0 {
            log::debug!("released {} platform bodies", released);
        }
        self.spawn_points.clear();
        self.level = None;
    }

    /// Recycle tombstoned slots. Call between steps, never while holding ids
    /// to dead platforms you still care about.
    pub fn compact(&mut self) -> usize {
        self.store.compact()
    }

    /// Alive platforms, in slot order.
    pub fn platforms(&self) -> impl Iterator<Item = (PlatformId, &Platform<H>)> {
        self.store.iter_alive()
    }

    pub fn get(&self, id: PlatformId) -> Option<&Platform<H>> {
        self.store.get(id)
    }

    pub fn alive_count(&self) -> usize {
        self.store.alive_count()
    }

    pub fn spawn_points(&self) -> &[Vec2] {
        &self.spawn_points
    }

    /// Random safe landing spot on a platform top, or the origin if none qualifies.
    pub fn random_platform_top(&mut self) -> Vec2 {
        spawn::random_platform_top(
            self.store.iter_alive().map(|(_, p)| p),
            &self.tuning,
            &mut self.rng,
        )
    }
}

impl<H: Copy> Default for Arena<H> {
    fn default() -> Self {
        Self::new(TerrainTuning::default())
    }
}
