use ai_nav::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Horizontal facing of a side-scrolling agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// `-1.0` for left, `+1.0` for right.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub fn forward(self) -> Vec2 {
        Vec2::new(self.sign(), 0.0)
    }

    /// Facing that looks along `dx`; `None` when `dx` is (near) zero.
    pub fn from_dx(dx: f32) -> Option<Facing> {
        if dx > 1e-3 {
            Some(Facing::Right)
        } else if dx < -1e-3 {
            Some(Facing::Left)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VisionConfig {
    /// Full cone angle in radians, centered on the forward vector.
    pub field_of_view: f32,
    /// Maximum sight distance.
    pub range: f32,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            field_of_view: core::f32::consts::FRAC_PI_2 * 1.5,
            range: 320.0,
        }
    }
}

/// Whether `target` lies within range and within half the field of view of `facing`.
///
/// A target at the eye position is always visible.
pub fn can_see(eye: Vec2, facing: Facing, vision: &VisionConfig, target: Vec2) -> bool {
    if !eye.is_finite() || !target.is_finite() {
        return false;
    }
    let to_target = target - eye;
    let distance = to_target.length();
    if distance > vision.range {
        return false;
    }
    if distance <= 1e-4 {
        return true;
    }

    let cos_angle = (to_target.dot(facing.forward()) / distance).clamp(-1.0, 1.0);
    cos_angle.acos() <= vision.field_of_view * 0.5
}
