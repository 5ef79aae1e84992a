//! Motion models for impel.
//!
//! - [`OvershootModel`]: a spring that overshoots its target and settles
//! - [`SmoothModel`]: an exponential approach that never overshoots
//!
//! Register the models once at startup, before binding any channel that uses
//! them:
//!
//! ```
//! use impel_core::registry;
//! use impel_models::{OvershootModel, SmoothModel};
//!
//! impel_models::register_all();
//!
//! assert!(registry::is_registered(OvershootModel::KIND));
//! assert!(registry::is_registered(SmoothModel::KIND));
//! ```

mod overshoot;
mod smooth;

pub use overshoot::OvershootModel;
pub use smooth::SmoothModel;

/// Registers every model in this crate.
///
/// Safe to call more than once; later calls change nothing.
pub fn register_all() {
    OvershootModel::register();
    SmoothModel::register();
}
