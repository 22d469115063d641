//! Directional input to player motion

use glam::Vec2;

use super::state::PlayerState;
use crate::CanvasSize;
use crate::consts::PLAYER_SPEED;

/// Held directional keys for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionalInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl DirectionalInput {
    /// Signed axis values in {-1, 0, 1}; left and up win when both keys of an axis are held
    pub fn axes(&self) -> Vec2 {
        let x = if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        };
        let y = if self.up {
            -1.0
        } else if self.down {
            1.0
        } else {
            0.0
        };
        Vec2::new(x, y)
    }

    pub fn is_idle(&self) -> bool {
        self.axes() == Vec2::ZERO
    }
}

/// Turns held keys into velocity and clamped position
#[derive(Debug, Clone)]
pub struct InputController {
    speed: f32,
}

impl Default for InputController {
    fn default() -> Self {
        Self::new(PLAYER_SPEED)
    }
}

impl InputController {
    pub fn new(speed: f32) -> Self {
        let speed = if speed.is_finite() { speed.max(0.0) } else { PLAYER_SPEED };
        Self { speed }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Set velocity from input, integrate over `dt` and clamp to the canvas.
    ///
    /// Axes are independent, so diagonals move at `speed` on each axis.
    pub fn apply(&self, player: &mut PlayerState, input: &DirectionalInput, dt: f32, canvas: CanvasSize) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        player.velocity = input.axes() * self.speed;
        player.position += player.velocity * dt;
        player.clamp_to(canvas);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::MarkerTint;
    use proptest::prelude::*;

    fn centered_player(canvas: CanvasSize) -> PlayerState {
        let mut player = PlayerState::default();
        player.recenter(canvas);
        player
    }

    #[test]
    fn test_moves_at_fixed_speed() {
        let canvas = CanvasSize::new(800.0, 600.0);
        let mut player = centered_player(canvas);
        let controller = InputController::default();

        let input = DirectionalInput {
            right: true,
            ..Default::default()
        };
        controller.apply(&mut player, &input, 0.5, canvas);
        assert_eq!(player.position, Vec2::new(500.0, 300.0));
        assert_eq!(player.tint(), MarkerTint::Moving);

        controller.apply(&mut player, &DirectionalInput::default(), 0.5, canvas);
        assert_eq!(player.position, Vec2::new(500.0, 300.0));
        assert_eq!(player.tint(), MarkerTint::Idle);
    }

    #[test]
    fn test_diagonal_is_not_normalized() {
        let canvas = CanvasSize::new(800.0, 600.0);
        let mut player = centered_player(canvas);
        let input = DirectionalInput {
            left: true,
            down: true,
            ..Default::default()
        };
        InputController::default().apply(&mut player, &input, 0.25, canvas);
        assert_eq!(player.velocity, Vec2::new(-200.0, 200.0));
        assert_eq!(player.position, Vec2::new(350.0, 350.0));
    }

    #[test]
    fn test_opposing_keys_prefer_left_and_up() {
        let input = DirectionalInput {
            left: true,
            right: true,
            up: true,
            down: true,
        };
        assert_eq!(input.axes(), Vec2::new(-1.0, -1.0));
        assert!(DirectionalInput::default().is_idle());
    }

    #[test]
    fn test_clamped_at_edges_still_reports_moving() {
        let canvas = CanvasSize::new(800.0, 600.0);
        let mut player = centered_player(canvas);
        let input = DirectionalInput {
            up: true,
            ..Default::default()
        };
        InputController::default().apply(&mut player, &input, 10.0, canvas);
        assert_eq!(player.position.y, 10.0);
        assert_eq!(player.tint(), MarkerTint::Moving);
    }

    proptest! {
        #[test]
        fn player_box_stays_on_canvas(
            moves in proptest::collection::vec((any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()), 0..100),
            w in 30.0f32..2000.0,
            h in 30.0f32..2000.0,
        ) {
            let canvas = CanvasSize::new(w, h);
            let mut player = centered_player(canvas);
            let controller = InputController::default();
            for (left, right, up, down) in moves {
                let input = DirectionalInput { left, right, up, down };
                controller.apply(&mut player, &input, 0.1, canvas);
                let b = player.bounds();
                prop_assert!(b.x >= 0.0 && b.y >= 0.0);
                prop_assert!(b.right() <= w + 1e-3 && b.bottom() <= h + 1e-3);
            }
        }
    }
}
