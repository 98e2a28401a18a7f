//! Classic steering behaviors for side-scroller movement:
//! - Seek: move toward a point
//! - Flee: move away from a point
//! - Wander: smoothly randomized exploration, optionally bounded to a patrol zone
//! - Follow-path: seek the current waypoint, advancing within an arrival radius
//!
//! Every primitive is a pure function of the body state (plus its own small wander/path
//! cursor) and returns a steering force.

use ai_core::DeterministicRng;
use ai_nav::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Kinematic state the primitives steer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub max_speed: f32,
}

impl SteeringBody {
    pub fn new(position: Vec2, velocity: Vec2, max_speed: f32) -> Self {
        Self {
            position,
            velocity,
            max_speed,
        }
    }
}

/// Horizontal band a wandering agent is kept inside.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WanderBounds {
    pub min_x: f32,
    pub max_x: f32,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Wander {
    /// Current heading offset on the wander circle (radians).
    pub angle: f32,
    /// Maximum angle change per second.
    pub jitter: f32,
    pub radius: f32,
    /// Projection distance of the wander circle ahead of the body.
    pub distance: f32,
    pub bounds: Option<WanderBounds>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FollowPath {
    pub waypoints: Vec<Vec2>,
    /// Index of the waypoint currently sought.
    pub index: usize,
    pub arrival_radius: f32,
}

impl FollowPath {
    pub fn new(waypoints: Vec<Vec2>, arrival_radius: f32) -> Self {
        Self {
            waypoints,
            index: 0,
            arrival_radius,
        }
    }

    pub fn current(&self) -> Option<Vec2> {
        self.waypoints.get(self.index).copied()
    }

    pub fn is_finished(&self) -> bool {
        self.index + 1 >= self.waypoints.len()
    }
}

/// One force contributor owned by the steering controller.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SteeringPrimitive {
    Seek { target: Vec2 },
    Flee { from: Vec2 },
    Wander(Wander),
    FollowPath(FollowPath),
}

/// Primitive kind without payload, used for weights and snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PrimitiveKind {
    Seek,
    Flee,
    Wander,
    FollowPath,
}

impl SteeringPrimitive {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            SteeringPrimitive::Seek { .. } => PrimitiveKind::Seek,
            SteeringPrimitive::Flee { .. } => PrimitiveKind::Flee,
            SteeringPrimitive::Wander(_) => PrimitiveKind::Wander,
            SteeringPrimitive::FollowPath(_) => PrimitiveKind::FollowPath,
        }
    }

    /// Steering force for this tick. Wander and follow-path advance their own cursor.
    pub fn force<R>(&mut self, body: &SteeringBody, dt: f32, rng: &mut R) -> Vec2
    where
        R: DeterministicRng + ?Sized,
    {
        match self {
            SteeringPrimitive::Seek { target } => seek(body, *target),
            SteeringPrimitive::Flee { from } => flee(body, *from),
            SteeringPrimitive::Wander(w) => wander(body, w, dt, rng),
            SteeringPrimitive::FollowPath(p) => follow_path(body, p),
        }
    }
}

/// Force that steers toward `target` at full speed.
pub fn seek(body: &SteeringBody, target: Vec2) -> Vec2 {
    let desired = (target - body.position).normalize_or_zero() * body.max_speed;
    desired - body.velocity
}

/// Force that steers directly away from `from` at full speed.
pub fn flee(body: &SteeringBody, from: Vec2) -> Vec2 {
    let desired = (body.position - from).normalize_or_zero() * body.max_speed;
    desired - body.velocity
}

/// Force that approaches `target`, slowing down inside `slow_radius`.
pub fn arrive(body: &SteeringBody, target: Vec2, slow_radius: f32) -> Vec2 {
    let to_target = target - body.position;
    let distance = to_target.length();
    if distance < 1e-3 {
        return -body.velocity;
    }

    let speed = if distance < slow_radius {
        body.max_speed * (distance / slow_radius)
    } else {
        body.max_speed
    };
    to_target.normalize_or_zero() * speed - body.velocity
}

pub fn wander<R>(body: &SteeringBody, w: &mut Wander, dt: f32, rng: &mut R) -> Vec2
where
    R: DeterministicRng + ?Sized,
{
    if let Some(bounds) = w.bounds {
        // Outside the zone: point the heading back in and head straight there.
        if body.position.x < bounds.min_x {
            w.angle = 0.0;
            return seek(body, Vec2::new(bounds.min_x.max(bounds.max_x), body.position.y));
        }
        if body.position.x > bounds.max_x {
            w.angle = core::f32::consts::PI;
            return seek(body, Vec2::new(bounds.min_x.min(bounds.max_x), body.position.y));
        }
    }

    w.angle += rng.next_f32_signed() * w.jitter * dt.max(0.0);

    let heading = if body.velocity.length() > 1e-3 {
        body.velocity.normalize_or_zero()
    } else {
        Vec2::X
    };
    let circle_center = heading * w.distance;
    let displacement = Vec2::new(w.angle.cos() * w.radius, w.angle.sin() * w.radius);

    (circle_center + displacement).normalize_or_zero() * body.max_speed - body.velocity
}

/// Seek the current waypoint; advance when inside the arrival radius; settle on the last one.
pub fn follow_path(body: &SteeringBody, path: &mut FollowPath) -> Vec2 {
    if path.waypoints.is_empty() {
        return Vec2::ZERO;
    }
    path.index = path.index.min(path.waypoints.len() - 1);

    let radius2 = path.arrival_radius * path.arrival_radius;
    while !path.is_finished() && path.waypoints[path.index].distance_squared(body.position) <= radius2
    {
        path.index += 1;
    }

    let target = path.waypoints[path.index];
    if path.is_finished() {
        arrive(body, target, path.arrival_radius)
    } else {
        seek(body, target)
    }
}
