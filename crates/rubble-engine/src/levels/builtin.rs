//! Built-in level tables. Y-up world units; ground sits near y = -5.

use glam::Vec2;

use super::layout::{LevelLayout, PlatformSpec};
use crate::terrain::platform::PlatformKind::{self, *};

type Row = (f32, f32, f32, f32, PlatformKind);

const PROVING_GROUNDS: &[Row] = &[
    (0.0, -5.0, 15.0, 0.5, Ground),
    (-8.0, -1.0, 3.0, 0.3, Wood),
    (8.0, -1.0, 3.0, 0.3, Wood),
    (0.0, 2.0, 2.5, 0.3, Stone),
    (-4.0, 4.5, 1.5, 0.2, Metal),
    (4.0, 4.5, 1.5, 0.2, Metal),
];

const PROVING_GROUNDS_SPAWNS: &[(f32, f32)] = &[(-10.0, -3.5), (10.0, -3.5), (-5.0, -3.5), (5.0, -3.5)];

const ROOFTOPS: &[Row] = &[
    (-9.0, -4.0, 4.0, 1.5, Brick),
    (-9.0, -2.3, 4.2, 0.2, Roof),
    (0.0, -5.0, 3.5, 0.5, Ground),
    (0.0, -0.5, 2.0, 0.25, Wood),
    (9.0, -3.5, 4.0, 2.0, Brick),
    (9.0, -1.3, 4.2, 0.2, Roof),
    (-3.5, 3.0, 1.2, 0.2, Wood),
    (4.0, 3.5, 1.2, 0.2, Metal),
];

const ROOFTOPS_SPAWNS: &[(f32, f32)] = &[(-11.0, -1.6), (11.0, -0.6), (-7.0, -1.6), (7.0, -0.6)];

const FOUNDRY: &[Row] = &[
    (0.0, -5.0, 14.0, 0.5, Metal),
    (-10.0, -1.5, 2.0, 3.0, Stone),
    (10.0, -1.5, 2.0, 3.0, Stone),
    (0.0, -2.0, 4.0, 0.3, Metal),
    (-5.0, 1.5, 2.0, 0.3, Brick),
    (5.0, 1.5, 2.0, 0.3, Brick),
    (0.0, 4.0, 1.0, 0.25, Wood),
];

const FOUNDRY_SPAWNS: &[(f32, f32)] = &[(-6.0, -3.5), (6.0, -3.5), (-10.0, 2.0), (10.0, 2.0)];

fn layout(name: &str, rows: &[Row], spawns: &[(f32, f32)]) -> LevelLayout {
    LevelLayout {
        name: name.to_string(),
        platforms: rows
            .iter()
            .map(|&(cx, cy, hw, hh, kind)| PlatformSpec::new(cx, cy, hw, hh, kind))
            .collect(),
        spawn_points: spawns.iter().map(|&(x, y)| Vec2::new(x, y)).collect(),
    }
}

pub fn levels() -> Vec<LevelLayout> {
    vec![
        layout("proving_grounds", PROVING_GROUNDS, PROVING_GROUNDS_SPAWNS),
        layout("rooftops", ROOFTOPS, ROOFTOPS_SPAWNS),
        layout("foundry", FOUNDRY, FOUNDRY_SPAWNS),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_platform_is_valid() {
        for level in levels() {
            assert!(!level.platforms.is_empty(), "{}", level.name);
            assert_eq!(level.spawn_points.len(), 4, "{}", level.name);
            for spec in &level.platforms {
                assert!(spec.rect().is_valid(), "{}: {:?}", level.name, spec);
            }
        }
    }

    #[test]
    fn proving_grounds_matches_classic_arena() {
        let level = &levels()[0];
        assert_eq!(level.platforms.len(), 6);
        assert_eq!(level.platforms[0], PlatformSpec::new(0.0, -5.0, 15.0, 0.5, Ground));
        assert_eq!(level.spawn_points[0], Vec2::new(-10.0, -3.5));
    }
}
