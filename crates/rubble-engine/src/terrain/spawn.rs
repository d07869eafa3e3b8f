use glam::Vec2;
use rand::Rng;

use crate::config::TerrainTuning;
use crate::terrain::platform::Platform;

/// Pick a random landing position on top of a wide-enough platform.
///
/// Slivers (`half_width <= spawn_min_half_width`) are skipped. With nothing
/// to stand on this returns the origin instead of failing.
pub fn random_platform_top<'a, H, R>(
    platforms: impl IntoIterator<Item = &'a Platform<H>>,
    tuning: &TerrainTuning,
    rng: &mut R,
) -> Vec2
where
    H: Copy + 'a,
    R: Rng,
{
    let candidates: Vec<&Platform<H>> = platforms
        .into_iter()
        .filter(|p| p.is_alive() && p.half_extents.x > tuning.spawn_min_half_width)
        .collect();

    if candidates.is_empty() {
        log::debug!("no platform wide enough to spawn on, using origin");
        return Vec2::ZERO;
    }

    let platform = candidates[rng.random_range(0..candidates.len())];
    landing_point(platform, tuning, rng)
}

/// A point `spawn_clearance` above the platform top, jittered horizontally
/// within `spawn_spread` of its half-width.
pub fn landing_point<H, R>(platform: &Platform<H>, tuning: &TerrainTuning, rng: &mut R) -> Vec2
where
    H: Copy,
    R: Rng,
{
    let spread = platform.half_extents.x * tuning.spawn_spread;
    let offset = if spread > 0.0 {
        rng.random_range(-spread..=spread)
    } else {
        0.0
    };
    Vec2::new(platform.center.x + offset, platform.top() + tuning.spawn_clearance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::broker::testing::RecordingBroker;
    use crate::terrain::carver::Rect;
    use crate::terrain::platform::PlatformKind;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn platform(broker: &mut RecordingBroker, center: Vec2, half: Vec2) -> Platform<u32> {
        Platform::spawn(broker, Rect::new(center, half), PlatformKind::Stone, 200.0)
    }

    #[test]
    fn empty_arena_falls_back_to_origin() {
        let mut rng = Pcg32::seed_from_u64(1);
        let none: Vec<Platform<u32>> = Vec::new();
        assert_eq!(random_platform_top(&none, &TerrainTuning::default(), &mut rng), Vec2::ZERO);
    }

    #[test]
    fn slivers_are_never_chosen() {
        let mut broker = RecordingBroker::new();
        let mut rng = Pcg32::seed_from_u64(2);
        let platforms = vec![
            platform(&mut broker, Vec2::new(0.0, 0.0), Vec2::new(0.5, 0.2)),
            platform(&mut broker, Vec2::new(5.0, 0.0), Vec2::new(0.3, 0.2)),
        ];
        assert_eq!(random_platform_top(&platforms, &TerrainTuning::default(), &mut rng), Vec2::ZERO);
    }

    #[test]
    fn dead_platforms_are_never_chosen() {
        let mut broker = RecordingBroker::new();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut p = platform(&mut broker, Vec2::new(0.0, 0.0), Vec2::new(3.0, 0.2));
        p.destroy(&mut broker);
        assert_eq!(random_platform_top([&p], &TerrainTuning::default(), &mut rng), Vec2::ZERO);
    }

    #[test]
    fn draws_land_on_the_chosen_platform() {
        let mut broker = RecordingBroker::new();
        let mut rng = Pcg32::seed_from_u64(4);
        let tuning = TerrainTuning::default();
        // Distinct tops so each draw identifies its platform.
        let platforms = vec![
            platform(&mut broker, Vec2::new(0.0, -5.0), Vec2::new(15.0, 0.5)),
            platform(&mut broker, Vec2::new(-8.0, -1.0), Vec2::new(3.0, 0.3)),
            platform(&mut broker, Vec2::new(0.0, 2.0), Vec2::new(2.5, 0.3)),
        ];

        let mut seen = [false; 3];
        for _ in 0..500 {
            let pos = random_platform_top(&platforms, &tuning, &mut rng);
            let (index, chosen) = platforms
                .iter()
                .enumerate()
                .find(|(_, p)| (pos.y - (p.top() + 0.5)).abs() < 1e-5)
                .expect("y must be top + 0.5 of some platform");
            let spread = chosen.half_extents.x * 0.8;
            assert!(pos.x >= chosen.center.x - spread - 1e-5);
            assert!(pos.x <= chosen.center.x + spread + 1e-5);
            seen[index] = true;
        }
        assert!(seen.iter().all(|&s| s), "every platform should be drawn eventually");
    }

    #[test]
    fn same_seed_same_draws() {
        let mut broker = RecordingBroker::new();
        let tuning = TerrainTuning::default();
        let platforms = vec![
            platform(&mut broker, Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.5)),
            platform(&mut broker, Vec2::new(9.0, 3.0), Vec2::new(2.0, 0.5)),
        ];
        let mut a = Pcg32::seed_from_u64(99);
        let mut b = Pcg32::seed_from_u64(99);
        for _ in 0..20 {
            assert_eq!(
                random_platform_top(&platforms, &tuning, &mut a),
                random_platform_top(&platforms, &tuning, &mut b)
            );
        }
    }
}
