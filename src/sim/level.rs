//! Level layout and ball launch

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use glam::Vec2;
use rand::Rng;

use super::entities::Brick;
use super::geometry::Rect;
use crate::consts::*;

/// Brick rows for a level: one extra row every second level, capped
pub fn rows_for_level(level: u32) -> u32 {
    (BRICK_ROWS + level / 2).min(BRICK_MAX_ROWS)
}

/// Build the brick grid for a level, row-major, ids from 0
pub fn generate_bricks(level: u32) -> Vec<Brick> {
    let rows = rows_for_level(level);
    let mut bricks = Vec::with_capacity((rows * BRICK_COLS) as usize);
    let mut id = 0;

    for row in 0..rows {
        let style = row as usize % BRICK_COLORS.len();
        let y = row as f32 * (BRICK_HEIGHT + BRICK_GAP) + BRICK_GAP + BRICK_TOP_OFFSET;
        for col in 0..BRICK_COLS {
            let x = col as f32 * (BRICK_WIDTH + BRICK_GAP) + BRICK_GAP;
            bricks.push(Brick {
                id,
                rect: Rect::new(x, y, BRICK_WIDTH, BRICK_HEIGHT),
                color: BRICK_COLORS[style],
                points: BRICK_POINTS[style % BRICK_POINTS.len()],
                broken: false,
            });
            id += 1;
        }
    }

    bricks
}

/// Launch speed for a level (pixels per reference frame)
pub fn launch_speed(level: u32) -> f32 {
    BALL_SPEED_INITIAL + level.saturating_sub(1) as f32 * BALL_SPEED_INCREMENT
}

/// Launch velocity from explicit random samples
///
/// `angle_t` in [0, 1) picks an angle in [45°, 135°); the horizontal part is
/// `speed * cos(angle)` with its sign chosen by `go_right`. The vertical part
/// is always `-speed`, so every launch heads up.
pub fn launch_velocity_with(speed: f32, angle_t: f32, go_right: bool) -> Vec2 {
    let angle = FRAC_PI_4 + angle_t * FRAC_PI_2;
    let sign = if go_right { 1.0 } else { -1.0 };
    Vec2::new(speed * angle.cos() * sign, -speed)
}

/// Randomized launch velocity for the given level
pub fn launch_velocity<R: Rng>(level: u32, rng: &mut R) -> Vec2 {
    let angle_t: f32 = rng.random();
    let go_right = rng.random_bool(0.5);
    launch_velocity_with(launch_speed(level), angle_t, go_right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_rows_per_level() {
        assert_eq!(rows_for_level(1), 5);
        assert_eq!(rows_for_level(2), 6);
        assert_eq!(rows_for_level(3), 6);
        assert_eq!(rows_for_level(4), 7);
        assert_eq!(rows_for_level(5), 7);
        assert_eq!(rows_for_level(20), 8);
    }

    #[test]
    fn test_level_one_layout() {
        let bricks = generate_bricks(1);
        assert_eq!(bricks.len(), 50);

        let first = &bricks[0];
        assert_eq!(first.id, 0);
        assert_eq!(first.rect.x, 5.0);
        assert_eq!(first.rect.y, 55.0);
        assert_eq!(first.points, 50);
        assert_eq!(first.color, 0xFF5252);

        // Last brick of the bottom row
        let last = &bricks[49];
        assert_eq!(last.id, 49);
        assert_eq!(last.points, 10);
        assert!((last.rect.right() - (PLAYFIELD_WIDTH - BRICK_GAP)).abs() < 0.001);
        assert_eq!(last.rect.y, 4.0 * 30.0 + 55.0);

        assert!(bricks.iter().all(|b| !b.broken));
    }

    #[test]
    fn test_ids_unique_and_ordered() {
        let bricks = generate_bricks(4);
        assert_eq!(bricks.len(), 70);
        for (i, brick) in bricks.iter().enumerate() {
            assert_eq!(brick.id as usize, i);
        }
        // Sixth row wraps back to the first style
        assert_eq!(bricks[50].points, 50);
        assert_eq!(bricks[60].points, 40);
    }

    #[test]
    fn test_launch_speed_scales_with_level() {
        assert_eq!(launch_speed(1), 5.0);
        assert_eq!(launch_speed(2), 5.5);
        assert_eq!(launch_speed(5), 7.0);
    }

    #[test]
    fn test_launch_velocity_bounds() {
        // Straight up at the middle of the range
        let v = launch_velocity_with(5.0, 0.5, true);
        assert!(v.x.abs() < 1e-5);
        assert_eq!(v.y, -5.0);

        // 45 degrees, leftward
        let v = launch_velocity_with(5.0, 0.0, false);
        assert!((v.x + 5.0 * FRAC_PI_4.cos()).abs() < 1e-5);
        assert!(v.y < 0.0);
    }

    #[test]
    fn test_random_launch_always_upward() {
        let mut rng = Pcg32::seed_from_u64(7);
        let max_dx = 5.0 * FRAC_PI_4.cos() + 1e-4;
        for _ in 0..200 {
            let v = launch_velocity(1, &mut rng);
            assert_eq!(v.y, -5.0);
            assert!(v.x.abs() <= max_dx);
        }
    }
}
