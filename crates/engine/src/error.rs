use impel_core::{InitError, RegistryError};
use thiserror::Error;

/// Errors returned by [`Impeller`](crate::Impeller) operations.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ImpelError {
    /// The handle is not bound to a slot.
    ///
    /// Default-constructed, invalidated, and moved-from handles are unbound.
    #[error("impeller is not bound to a simulation slot")]
    Unbound,

    /// The engine the handle was bound to no longer exists.
    #[error("the engine owning this impeller has been dropped")]
    EngineDropped,

    /// The engine was mid-update when the handle was read.
    #[error("the engine owning this impeller is busy")]
    EngineBusy,

    /// The configuration names a model kind that was never registered.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The configuration failed validation.
    #[error("invalid impeller configuration: {0}")]
    InvalidInit(#[from] InitError),
}
