//! Core types for impel, a per-frame engine that drives scalar values toward
//! their targets.
//!
//! This crate defines the pieces that models and engines share:
//!
//! - [`ValueRange`]: a bounded or modular (wrapping) value domain
//! - [`Settled1f`]: the tolerances that decide when a channel is at rest
//! - [`ImpellerState`]: the value, velocity, and target of one channel
//! - [`ImpelInit`]: per-profile tuning, naming the [`ModelKind`] to use
//! - [`ImpelModel`]: the capability of advancing one channel by a time step
//! - [`registry`]: the process-wide map from model kinds to factories
//!
//! With the default `serde` feature, [`ValueRange`], [`Settled1f`], and
//! [`ImpellerState`] can be serialized.

mod init;
mod model;
mod range;
pub mod registry;
mod settled;
mod state;
pub mod time;

pub use init::{ImpelInit, InitError};
pub use model::{ImpelModel, MAX_PASSES_PER_UPDATE, ModelKind};
pub use range::{Clamped, ValueRange};
pub use registry::{ModelFactory, RegistryError};
pub use settled::{Progress, Settleable, Settled1f};
pub use state::ImpellerState;
