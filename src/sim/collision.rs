//! Collision detection and response
//!
//! Rules run in a fixed order each step: side walls, ceiling, paddle, floor,
//! bricks. A lost ball ends the step before bricks are looked at, and at most
//! one brick breaks per step (first unbroken brick in list order).

use glam::Vec2;

use super::entities::{Ball, Brick, Paddle, Playfield, all_broken};
use super::events::GameEvent;
use super::geometry::BounceAxis;
use super::state::{GamePhase, GameState};
use crate::consts::MAX_BOUNCE_ANGLE;

/// What the step did besides bouncing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing beyond (possibly) a bounce
    None,
    /// Ball went past the floor; a life was taken
    BallLost,
    /// A brick broke; `level_cleared` if it was the last one
    BrickBroken { index: usize, level_cleared: bool },
}

/// Result of resolving one tentative ball position
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Ball position after wall/ceiling push-out
    pub pos: Vec2,
    /// Velocity after all bounces
    pub vel: Vec2,
    /// Whether anything changed the ball's course
    pub collided: bool,
    pub outcome: Outcome,
}

/// Reverse one velocity component
#[inline]
pub fn reflect(vel: Vec2, axis: BounceAxis) -> Vec2 {
    match axis {
        BounceAxis::Horizontal => Vec2::new(-vel.x, vel.y),
        BounceAxis::Vertical => Vec2::new(vel.x, -vel.y),
    }
}

/// Ball edge at or beyond the left or right wall
#[inline]
pub fn touches_side_wall(pos: Vec2, radius: f32, field: &Playfield) -> bool {
    pos.x - radius <= 0.0 || pos.x + radius >= field.width
}

/// Ball edge at or above the ceiling
#[inline]
pub fn touches_ceiling(pos: Vec2, radius: f32) -> bool {
    pos.y - radius <= 0.0
}

/// Ball edge at or below the floor
#[inline]
pub fn below_floor(pos: Vec2, radius: f32, field: &Playfield) -> bool {
    pos.y + radius >= field.height
}

/// Side walls and ceiling
///
/// Returns the pushed-back position, the new velocity, and whether either
/// surface was touched.
pub fn bounce_off_walls(pos: Vec2, vel: Vec2, radius: f32, field: &Playfield) -> (Vec2, Vec2, bool) {
    let mut pos = pos;
    let mut vel = vel;
    let mut hit = false;

    if touches_side_wall(pos, radius, field) {
        vel = reflect(vel, BounceAxis::Horizontal);
        pos.x = pos.x.clamp(radius, field.width - radius);
        hit = true;
    }

    if touches_ceiling(pos, radius) {
        vel = reflect(vel, BounceAxis::Vertical);
        pos.y = pos.y.max(radius);
        hit = true;
    }

    (pos, vel, hit)
}

/// Ball overlaps the paddle: vertical spans intersect and the ball center is
/// within the paddle's width
pub fn touches_paddle(pos: Vec2, radius: f32, paddle: &Paddle) -> bool {
    let rect = paddle.rect();
    pos.y + radius >= rect.top()
        && pos.y - radius <= rect.bottom()
        && pos.x >= rect.left()
        && pos.x <= rect.right()
}

/// Redirect the ball off the paddle
///
/// The contact offset from paddle center, normalized to [-1, 1], maps to a
/// deflection of up to 60 degrees from vertical. Speed is preserved and the
/// ball always leaves upward. Returns the new velocity and the offset.
pub fn paddle_bounce(pos: Vec2, vel: Vec2, paddle: &Paddle) -> (Vec2, f32) {
    let offset = ((pos.x - paddle.x) / paddle.half_width()).clamp(-1.0, 1.0);
    let angle = offset * MAX_BOUNCE_ANGLE;
    let speed = vel.length();
    (Vec2::new(speed * angle.sin(), -speed * angle.cos()), offset)
}

/// Index of the first unbroken brick the ball overlaps
pub fn first_brick_hit(pos: Vec2, radius: f32, bricks: &[Brick]) -> Option<usize> {
    bricks
        .iter()
        .position(|b| b.is_live() && b.rect.overlaps_circle_bounds(pos, radius))
}

/// Resolve all collisions for the ball at its tentative position
///
/// Score, lives and level changes are applied to `state` directly. Entity
/// resets that follow a lost ball or a cleared level are left to the loop.
pub fn resolve_collisions(
    ball: &Ball,
    vel: Vec2,
    paddle: &Paddle,
    bricks: &mut [Brick],
    field: &Playfield,
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
) -> CollisionResult {
    let radius = ball.radius;
    let (pos, mut vel, mut collided) = bounce_off_walls(ball.pos, vel, radius, field);

    if touches_paddle(pos, radius, paddle) {
        let (new_vel, offset) = paddle_bounce(pos, vel, paddle);
        vel = new_vel;
        collided = true;
        events.push(GameEvent::PaddleHit { offset });
    }

    if below_floor(pos, radius, field) {
        state.decrement_lives();
        events.push(GameEvent::Collision);
        events.push(GameEvent::LifeLost {
            lives_left: state.lives,
        });
        if state.phase == GamePhase::GameOver {
            log::info!("Game over with score {}", state.score);
            events.push(GameEvent::GameOver { score: state.score });
        } else {
            log::debug!("Ball lost, {} lives left", state.lives);
        }
        return CollisionResult {
            pos,
            vel,
            collided: true,
            outcome: Outcome::BallLost,
        };
    }

    let mut outcome = Outcome::None;

    if let Some(index) = first_brick_hit(pos, radius, bricks) {
        let brick = &mut bricks[index];
        vel = reflect(vel, brick.rect.bounce_axis(pos));
        brick.broken = true;
        state.update_score(brick.points);
        events.push(GameEvent::BrickBroken {
            id: brick.id,
            points: brick.points,
        });
        collided = true;

        let level_cleared = all_broken(bricks);
        if level_cleared {
            let cleared = state.level;
            events.push(GameEvent::LevelCleared { level: cleared });
            state.advance_level();
            if state.phase == GamePhase::Win {
                log::info!("All levels cleared with score {}", state.score);
                events.push(GameEvent::Won { score: state.score });
            } else {
                log::info!("Level {} cleared, advancing to {}", cleared, state.level);
            }
        }
        outcome = Outcome::BrickBroken {
            index,
            level_cleared,
        };
    }

    if collided {
        events.push(GameEvent::Collision);
    }

    CollisionResult {
        pos,
        vel,
        collided,
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::level::generate_bricks;
    use proptest::prelude::*;

    fn playing_state() -> GameState {
        let mut state = GameState::new();
        state.start();
        state
    }

    fn ball_at(x: f32, y: f32) -> Ball {
        Ball {
            pos: Vec2::new(x, y),
            ..Default::default()
        }
    }

    #[test]
    fn test_side_wall_reverses_dx() {
        let field = Playfield::default();
        let (pos, vel, hit) = bounce_off_walls(Vec2::new(5.0, 300.0), Vec2::new(-4.0, 3.0), 8.0, &field);
        assert!(hit);
        assert_eq!(vel, Vec2::new(4.0, 3.0));
        // Pushed back inside
        assert_eq!(pos.x, 8.0);

        let (_, vel, hit) = bounce_off_walls(Vec2::new(795.0, 300.0), Vec2::new(4.0, 3.0), 8.0, &field);
        assert!(hit);
        assert_eq!(vel, Vec2::new(-4.0, 3.0));
    }

    #[test]
    fn test_ceiling_reverses_dy() {
        let field = Playfield::default();
        let (pos, vel, hit) = bounce_off_walls(Vec2::new(400.0, 3.0), Vec2::new(1.0, -5.0), 8.0, &field);
        assert!(hit);
        assert_eq!(vel, Vec2::new(1.0, 5.0));
        assert_eq!(pos.y, 8.0);
    }

    #[test]
    fn test_paddle_center_bounces_straight_up() {
        let paddle = Paddle::default();
        let (vel, offset) = paddle_bounce(Vec2::new(paddle.x, 565.0), Vec2::new(3.0, 4.0), &paddle);
        assert_eq!(offset, 0.0);
        assert!(vel.x.abs() < 1e-5);
        assert!((vel.y + 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_paddle_left_edge_sends_ball_left() {
        let paddle = Paddle::default();
        let left = paddle.x - paddle.half_width();
        let (vel, offset) = paddle_bounce(Vec2::new(left, 565.0), Vec2::new(3.0, 4.0), &paddle);
        assert_eq!(offset, -1.0);
        assert!(vel.x < 0.0);
        assert!(vel.y < 0.0);
        // 60 degrees off vertical
        assert!((vel.x + 5.0 * MAX_BOUNCE_ANGLE.sin()).abs() < 1e-4);
    }

    #[test]
    fn test_touches_paddle() {
        let paddle = Paddle::default();
        // Resting on top
        assert!(touches_paddle(Vec2::new(400.0, 563.0), 8.0, &paddle));
        // Above
        assert!(!touches_paddle(Vec2::new(400.0, 560.0), 8.0, &paddle));
        // Center just past the paddle's end
        assert!(!touches_paddle(Vec2::new(451.0, 570.0), 8.0, &paddle));
    }

    #[test]
    fn test_brick_hit_scores_and_breaks() {
        let mut state = playing_state();
        let mut bricks = generate_bricks(1);
        let mut events = Vec::new();

        let result = resolve_collisions(
            &ball_at(40.0, 87.0),
            Vec2::new(0.0, -5.0),
            &Paddle::default(),
            &mut bricks,
            &Playfield::default(),
            &mut state,
            &mut events,
        );

        assert!(result.collided);
        assert_eq!(
            result.outcome,
            Outcome::BrickBroken {
                index: 0,
                level_cleared: false
            }
        );
        assert_eq!(result.vel, Vec2::new(0.0, 5.0));
        assert!(bricks[0].broken);
        assert_eq!(bricks.len(), 50);
        assert_eq!(state.score, 50);
        assert!(events.contains(&GameEvent::BrickBroken { id: 0, points: 50 }));
        assert_eq!(
            events.iter().filter(|e| **e == GameEvent::Collision).count(),
            1
        );
    }

    #[test]
    fn test_side_hit_on_brick_reverses_dx() {
        let mut state = playing_state();
        let mut bricks = generate_bricks(1);
        let mut events = Vec::new();

        // Level with brick 0's center at its right side, also touching brick 1
        let result = resolve_collisions(
            &ball_at(78.0, 67.5),
            Vec2::new(4.0, -1.0),
            &Paddle::default(),
            &mut bricks,
            &Playfield::default(),
            &mut state,
            &mut events,
        );

        // List order picks brick 0
        assert_eq!(
            result.outcome,
            Outcome::BrickBroken {
                index: 0,
                level_cleared: false
            }
        );
        assert_eq!(result.vel, Vec2::new(-4.0, -1.0));
        assert!(!bricks[1].broken);
    }

    #[test]
    fn test_only_one_brick_per_step() {
        let mut state = playing_state();
        let mut bricks = generate_bricks(1);
        let mut events = Vec::new();

        // Straddling the gap between brick 0 and brick 1
        let result = resolve_collisions(
            &ball_at(82.0, 67.5),
            Vec2::new(0.0, -5.0),
            &Paddle::default(),
            &mut bricks,
            &Playfield::default(),
            &mut state,
            &mut events,
        );

        assert!(matches!(result.outcome, Outcome::BrickBroken { index: 0, .. }));
        assert_eq!(bricks.iter().filter(|b| b.broken).count(), 1);
        assert_eq!(state.score, 50);
    }

    #[test]
    fn test_broken_brick_not_matched_again() {
        let mut state = playing_state();
        let mut bricks = generate_bricks(1);
        let mut events = Vec::new();
        let ball = ball_at(40.0, 67.5);

        let first = resolve_collisions(
            &ball,
            Vec2::new(0.0, -5.0),
            &Paddle::default(),
            &mut bricks,
            &Playfield::default(),
            &mut state,
            &mut events,
        );
        assert!(matches!(first.outcome, Outcome::BrickBroken { index: 0, .. }));

        let second = resolve_collisions(
            &ball,
            first.vel,
            &Paddle::default(),
            &mut bricks,
            &Playfield::default(),
            &mut state,
            &mut events,
        );
        assert_eq!(second.outcome, Outcome::None);
        assert!(!second.collided);
        assert_eq!(state.score, 50);
    }

    #[test]
    fn test_floor_short_circuits_bricks() {
        let mut state = playing_state();
        // A brick sitting on the floor would otherwise be hit
        let mut bricks = vec![Brick {
            id: 0,
            rect: crate::sim::geometry::Rect::new(0.0, 590.0, 800.0, 10.0),
            color: 0,
            points: 10,
            broken: false,
        }];
        let mut events = Vec::new();

        let result = resolve_collisions(
            &ball_at(200.0, 595.0),
            Vec2::new(0.0, 5.0),
            &Paddle::default(),
            &mut bricks,
            &Playfield::default(),
            &mut state,
            &mut events,
        );

        assert_eq!(result.outcome, Outcome::BallLost);
        assert_eq!(state.lives, STARTING_LIVES - 1);
        assert!(!bricks[0].broken);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_last_life_ends_game() {
        let mut state = playing_state();
        state.lives = 1;
        let mut bricks = generate_bricks(1);
        let mut events = Vec::new();

        resolve_collisions(
            &ball_at(200.0, 595.0),
            Vec2::new(0.0, 5.0),
            &Paddle::default(),
            &mut bricks,
            &Playfield::default(),
            &mut state,
            &mut events,
        );

        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(events.contains(&GameEvent::GameOver { score: 0 }));
    }

    #[test]
    fn test_last_brick_advances_level() {
        let mut state = playing_state();
        let mut bricks = generate_bricks(1);
        for brick in bricks.iter_mut().skip(1) {
            brick.broken = true;
        }
        let mut events = Vec::new();

        let result = resolve_collisions(
            &ball_at(40.0, 87.0),
            Vec2::new(0.0, -5.0),
            &Paddle::default(),
            &mut bricks,
            &Playfield::default(),
            &mut state,
            &mut events,
        );

        assert_eq!(
            result.outcome,
            Outcome::BrickBroken {
                index: 0,
                level_cleared: true
            }
        );
        assert_eq!(state.level, 2);
        assert!(state.is_playing());
        assert!(events.contains(&GameEvent::LevelCleared { level: 1 }));
    }

    #[test]
    fn test_last_brick_on_final_level_wins() {
        let mut state = playing_state();
        state.level = MAX_LEVEL;
        let mut bricks = generate_bricks(MAX_LEVEL);
        for brick in bricks.iter_mut().skip(1) {
            brick.broken = true;
        }
        let mut events = Vec::new();

        resolve_collisions(
            &ball_at(40.0, 87.0),
            Vec2::new(0.0, -5.0),
            &Paddle::default(),
            &mut bricks,
            &Playfield::default(),
            &mut state,
            &mut events,
        );

        assert_eq!(state.level, MAX_LEVEL);
        assert_eq!(state.phase, GamePhase::Win);
        assert!(events.contains(&GameEvent::Won { score: 50 }));
    }

    proptest! {
        #[test]
        fn prop_side_wall_flips_dx_iff_outside(
            x in -20.0f32..820.0,
            y in 100.0f32..500.0,
            dx in -8.0f32..8.0,
            dy in -8.0f32..8.0,
        ) {
            let field = Playfield::default();
            let r = BALL_RADIUS;
            let (_, vel, _) = bounce_off_walls(Vec2::new(x, y), Vec2::new(dx, dy), r, &field);
            let outside = x - r <= 0.0 || x + r >= field.width;
            if outside {
                prop_assert_eq!(vel.x, -dx);
            } else {
                prop_assert_eq!(vel.x, dx);
            }
        }

        #[test]
        fn prop_paddle_bounce_preserves_speed(
            x in 350.0f32..=450.0,
            dx in -7.0f32..7.0,
            dy in 0.5f32..7.0,
        ) {
            let paddle = Paddle::default();
            let vel = Vec2::new(dx, dy);
            let (out, offset) = paddle_bounce(Vec2::new(x, 565.0), vel, &paddle);
            prop_assert!((out.length() - vel.length()).abs() < 1e-3);
            prop_assert!(out.y < 0.0);
            prop_assert!((-1.0..=1.0).contains(&offset));
        }

        #[test]
        fn prop_wall_bounce_preserves_speed(
            x in -20.0f32..820.0,
            y in -20.0f32..500.0,
            dx in -8.0f32..8.0,
            dy in -8.0f32..8.0,
        ) {
            let field = Playfield::default();
            let vel = Vec2::new(dx, dy);
            let (_, out, _) = bounce_off_walls(Vec2::new(x, y), vel, BALL_RADIUS, &field);
            prop_assert!((out.length() - vel.length()).abs() < 1e-5);
        }
    }
}
