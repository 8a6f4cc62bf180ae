use bevy::prelude::*;

use crate::domain::simulation::{HeightTier, HoleId, HoleState, RoundChanged, RoundSession};

pub const HOLE_SPACING: f32 = 150.0;
const PIT_SIZE: Vec2 = Vec2::new(110.0, 36.0);
const MOLE_SIZE: Vec2 = Vec2::new(64.0, 72.0);

const PIT_COLOR: Color = Color::srgb(0.18, 0.11, 0.06);
const MOLE_COLOR: Color = Color::srgb(0.55, 0.36, 0.2);
const HIT_COLOR: Color = Color::srgb(0.95, 0.3, 0.25);

#[derive(Component)]
pub struct Pit;

#[derive(Component)]
pub struct Mole {
    pub hole: HoleId,
}

/// Holes are laid out in the smallest square-ish grid that fits them.
pub fn grid_columns(count: usize) -> usize {
    ((count as f32).sqrt().ceil() as usize).max(1)
}

/// World-space center of a hole, with the grid centered on the origin.
pub fn hole_position(hole: HoleId, count: usize) -> Vec2 {
    let cols = grid_columns(count);
    let rows = count.div_ceil(cols).max(1);
    let col = (hole % cols) as f32;
    let row = (hole / cols) as f32;
    Vec2::new(
        (col - (cols - 1) as f32 * 0.5) * HOLE_SPACING,
        ((rows - 1) as f32 * 0.5 - row) * HOLE_SPACING,
    )
}

/// Which hole's cell contains `point`, if any. A cell reaches up far enough
/// to cover the top of a fully lifted mole.
pub fn hole_at(point: Vec2, count: usize) -> Option<HoleId> {
    let half = HOLE_SPACING * 0.45;
    let reach = half.max(tier_lift(Some(HeightTier::High)) + MOLE_SIZE.y * 0.5);
    (0..count).find(|&hole| {
        let d = point - hole_position(hole, count);
        d.x.abs() <= half && d.y >= -half && d.y <= reach
    })
}

fn tier_lift(tier: Option<HeightTier>) -> f32 {
    match tier {
        Some(HeightTier::Low) => 12.0,
        Some(HeightTier::Mid) => 26.0,
        Some(HeightTier::High) => 40.0,
        None => 0.0,
    }
}

pub fn spawn_board(mut commands: Commands, session: Res<RoundSession>) {
    let count = session.round.holes().len();
    for hole in 0..count {
        let pos = hole_position(hole, count);
        commands.spawn((
            Pit,
            SpriteBundle {
                sprite: Sprite {
                    color: PIT_COLOR,
                    custom_size: Some(PIT_SIZE),
                    ..default()
                },
                transform: Transform::from_translation(pos.extend(0.0)),
                ..default()
            },
        ));
        commands.spawn((
            Mole { hole },
            SpriteBundle {
                sprite: Sprite {
                    color: MOLE_COLOR,
                    custom_size: Some(MOLE_SIZE),
                    ..default()
                },
                transform: Transform::from_translation(pos.extend(1.0)),
                visibility: Visibility::Hidden,
                ..default()
            },
        ));
    }
}

pub fn sync_board(
    mut ev_changed: EventReader<RoundChanged>,
    mut moles: Query<(&Mole, &mut Transform, &mut Sprite, &mut Visibility)>,
) {
    let Some(RoundChanged(snapshot)) = ev_changed.read().last() else {
        return;
    };
    let count = snapshot.holes.len();

    for (mole, mut t, mut sprite, mut vis) in &mut moles {
        let Some(hole) = snapshot.holes.get(mole.hole) else {
            continue;
        };
        let base = hole_position(mole.hole, count);
        match hole.state {
            HoleState::Empty => {
                *vis = Visibility::Hidden;
            }
            HoleState::Active | HoleState::Hit => {
                *vis = Visibility::Visible;
                t.translation.y = base.y + tier_lift(hole.tier);
                sprite.color = if hole.state == HoleState::Hit {
                    HIT_COLOR
                } else {
                    MOLE_COLOR
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixteen_holes_make_a_four_by_four_grid() {
        assert_eq!(grid_columns(16), 4);
        assert_eq!(hole_position(0, 16), Vec2::new(-225.0, 225.0));
        assert_eq!(hole_position(15, 16), Vec2::new(225.0, -225.0));
    }

    #[test]
    fn every_hole_center_maps_back_to_itself() {
        for count in [1, 5, 9, 16] {
            for hole in 0..count {
                assert_eq!(hole_at(hole_position(hole, count), count), Some(hole));
            }
        }
    }

    #[test]
    fn gaps_between_holes_hit_nothing() {
        let between = (hole_position(0, 16) + hole_position(1, 16)) * 0.5;
        assert_eq!(hole_at(between, 16), None);
        assert_eq!(hole_at(Vec2::new(5000.0, 0.0), 16), None);

        let above = hole_position(5, 16) + Vec2::new(0.0, 79.0);
        assert_eq!(hole_at(above, 16), None);
    }

    #[test]
    fn top_of_a_high_mole_is_clickable() {
        let top = tier_lift(Some(HeightTier::High)) + MOLE_SIZE.y * 0.5;
        for hole in [0, 5, 15] {
            let center = hole_position(hole, 16);
            assert_eq!(hole_at(center + Vec2::new(0.0, top), 16), Some(hole));
            assert_eq!(hole_at(center + Vec2::new(0.0, 72.0), 16), Some(hole));
            assert_eq!(
                hole_at(center + Vec2::new(MOLE_SIZE.x * 0.5, top - 1.0), 16),
                Some(hole)
            );
        }
    }
}
