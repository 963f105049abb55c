//! Last-mile courier dispatch.
//!
//! Orders on a 10x10 grid are matched to the courier that can reach them
//! soonest and still has room to carry them. The domain layer is pure; the
//! [`actors::DispatchActor`] owns the live fleet and serializes dispatch.

pub mod domain;
pub mod config;
pub mod metrics;
pub mod actors;
