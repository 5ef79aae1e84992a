//! A per-frame engine that drives many scalar values toward their targets.
//!
//! An [`ImpelEngine`] owns dense storage for every simulated channel.
//! Application code holds [`Impeller`] handles, binds them with an
//! [`ImpelInit`](impel_core::ImpelInit) naming a registered model, sets
//! targets at bind time, and reads back values after each
//! [`advance_frame`](ImpelEngine::advance_frame).
//!
//! ```
//! use impel_core::{ImpellerState, ValueRange, time::millis};
//! use impel_engine::{ImpelEngine, Impeller};
//! use impel_models::OvershootModel;
//!
//! OvershootModel::register();
//!
//! let init = OvershootModel::init()
//!     .with_range(ValueRange::bounded(0.0, 100.0))
//!     .with_max_velocity(0.5)
//!     .with_accel_per_difference(0.00097);
//!
//! let mut engine = ImpelEngine::new();
//! let mut impeller = Impeller::new();
//! impeller
//!     .initialize_with_state(&init, &engine, ImpellerState::new(0.0, 0.0, 50.0))
//!     .unwrap();
//!
//! engine.advance_frame(millis(16.0));
//! assert!(impeller.value().unwrap() > 0.0);
//! ```

mod engine;
mod error;
mod impeller;
mod run;

pub use engine::ImpelEngine;
pub use error::ImpelError;
pub use impeller::Impeller;
pub use run::{Action, FrameEvent, FrameObserver, Run, Status};
