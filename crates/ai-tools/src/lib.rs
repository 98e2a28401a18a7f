//! Tooling primitives for inspecting enemy AI.
//!
//! This crate is intentionally lightweight and engine-agnostic: the coordinator pushes plain
//! [`TraceEvent`]s into whatever [`TraceSink`] the host installs.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{tags, NullTraceSink, SharedTraceLog, TraceEvent, TraceLog, TraceSink, VecTraceSink};
