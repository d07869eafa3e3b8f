//! Carve and falloff-damage policies.
//!
//! Both go through [`apply_impact`]: find every live platform whose closest
//! point is strictly inside the radius, mutate or destroy it, and only once
//! the scan is over insert the remnants. Remnants therefore never see the
//! impact that created them.

use crate::api::types::{Impact, ImpactMode, ImpactReport};
use crate::config::TerrainTuning;
use crate::core::broker::BodyBroker;
use crate::terrain::carver::{self, Circle, Rect};
use crate::terrain::platform::{Platform, PlatformKind};
use crate::terrain::store::PlatformStore;

struct PendingRemnant {
    rect: Rect,
    kind: PlatformKind,
    max_health: f32,
}

/// Apply one impact to the store. Never fails: radii below the floor (or
/// NaN) are a no-op, health is clamped at zero, and remnants that are too
/// small are simply not created.
pub fn apply_impact<H, B>(
    store: &mut PlatformStore<H>,
    broker: &mut B,
    tuning: &TerrainTuning,
    impact: &Impact,
) -> ImpactReport
where
    H: Copy,
    B: BodyBroker<Handle = H> + ?Sized,
{
    let mut report = ImpactReport::default();
    if !(impact.radius >= tuning.min_carve_radius) || !impact.center.is_finite() {
        return report;
    }

    let circle = Circle::new(impact.center, impact.radius);
    let mut pending: Vec<PendingRemnant> = Vec::new();

    for (id, platform) in store.iter_alive_mut() {
        let rect = platform.rect();
        if !circle.intersects(&rect) {
            continue;
        }
        report.hit += 1;

        match impact.mode {
            ImpactMode::Carve => {
                platform.destroy(broker);
                report.destroyed += 1;
                let kind = platform.kind;
                pending.extend(
                    carver::carve_remnants(&rect, &circle, tuning.carve_limits())
                        .into_iter()
                        .map(|rect| PendingRemnant { rect, kind, max_health: kind.base_health() }),
                );
                log::debug!("carved platform {:?} ({:?})", id, kind);
            }
            ImpactMode::Damage { amount } => {
                let distance = rect.distance_squared_to(impact.center).sqrt();
                let dealt = amount.max(0.0) * carver::falloff(distance, impact.radius, tuning.falloff_floor);
                platform.health = (platform.health - dealt).max(0.0);
                if platform.health > 0.0 {
                    continue;
                }

                platform.destroy(broker);
                report.destroyed += 1;
                if rect.half_extents.x > tuning.fragment_min_platform_half_width {
                    let kind = platform.kind;
                    let max_health = platform.max_health * tuning.fragment_health_scale;
                    pending.extend(
                        carver::blast_fragments(
                            &rect,
                            impact.center.x,
                            impact.radius * tuning.blast_window_scale,
                            tuning.fragment_min_half_width,
                        )
                        .into_iter()
                        .map(|rect| PendingRemnant { rect, kind, max_health }),
                    );
                }
                log::debug!("platform {:?} destroyed by {:.1} damage", id, dealt);
            }
        }
    }

    for remnant in pending {
        store.insert(Platform::spawn(broker, remnant.rect, remnant.kind, remnant.max_health));
        report.remnants += 1;
    }

    if report.destroyed > 0 {
        log::debug!(
            "impact at {:?} r={:.2}: {} hit, {} destroyed, {} remnants",
            impact.center,
            impact.radius,
            report.hit,
            report.destroyed,
            report.remnants
        );
    }
    report
}
