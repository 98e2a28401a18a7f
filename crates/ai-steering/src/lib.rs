//! Deterministic steering: small force primitives blended by a weighted controller.
//!
//! Primitives are owned by the controller and addressed through [`SteeringHandle`]s, so the
//! code that pushed a primitive is also the only code that can take it back out.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod controller;
pub mod primitives;

pub use controller::{
    SteeringController, SteeringEntry, SteeringHandle, SteeringOutput, SteeringTuning,
    SteeringWeights,
};
pub use primitives::{
    arrive, flee, follow_path, seek, wander, FollowPath, PrimitiveKind, SteeringBody,
    SteeringPrimitive, Wander, WanderBounds,
};
