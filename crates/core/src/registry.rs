//! Process-wide registry of motion models.
//!
//! Every [`ModelKind`] must be registered, once, before a channel configured
//! with it is bound to an engine. Registration pairs the kind with a factory
//! that builds a fresh [`ImpelModel`] for each channel.
//!
//! # Lifecycle
//!
//! - [`register`] at startup, typically through a model's own `register()`
//!   helper. Registration is idempotent: the first factory registered for a
//!   kind wins, and later calls for the same kind return `false` and change
//!   nothing.
//! - [`create`] is called by the engine whenever it allocates a slot.
//! - [`clear`] tears the registry down, for example between independent
//!   application runs inside one process. Channels that are already bound keep
//!   their model instances.
//!
//! The registry is guarded by a lock so registration may happen on any thread,
//! but engines themselves are single-threaded.

use std::{
    collections::BTreeMap,
    sync::{PoisonError, RwLock},
};

use thiserror::Error;

use crate::{ImpelModel, ModelKind};

/// Builds a new model instance for one channel.
pub type ModelFactory = fn() -> Box<dyn ImpelModel>;

/// Errors returned by registry lookups.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    #[error("model kind `{0}` has not been registered")]
    Unregistered(ModelKind),
}

static REGISTRY: RwLock<BTreeMap<ModelKind, ModelFactory>> = RwLock::new(BTreeMap::new());

/// Registers `factory` as the builder for `kind`.
///
/// Returns `true` if the kind was newly registered and `false` if it was
/// already present, in which case the existing factory is kept.
pub fn register(kind: ModelKind, factory: ModelFactory) -> bool {
    let mut registry = REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
    if registry.contains_key(&kind) {
        tracing::debug!(%kind, "model kind already registered");
        return false;
    }

    registry.insert(kind, factory);
    tracing::debug!(%kind, "registered model kind");
    true
}

/// Returns `true` if `kind` has been registered.
#[must_use]
pub fn is_registered(kind: ModelKind) -> bool {
    REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .contains_key(&kind)
}

/// Returns every registered kind, in name order.
#[must_use]
pub fn registered_kinds() -> Vec<ModelKind> {
    REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .keys()
        .copied()
        .collect()
}

/// Builds a new model instance for `kind`.
///
/// # Errors
///
/// Returns [`RegistryError::Unregistered`] if `kind` was never registered.
pub fn create(kind: ModelKind) -> Result<Box<dyn ImpelModel>, RegistryError> {
    let factory = REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&kind)
        .copied()
        .ok_or(RegistryError::Unregistered(kind))?;

    Ok(factory())
}

/// Removes every registration.
pub fn clear() {
    let mut registry = REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
    tracing::debug!(count = registry.len(), "clearing model registry");
    registry.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{ImpelInit, ImpellerState};

    // Each test uses its own kinds because the registry is shared by every
    // test in the process. None of them calls `clear`.

    #[derive(Debug)]
    struct Still(ModelKind);

    impl ImpelModel for Still {
        fn kind(&self) -> ModelKind {
            self.0
        }

        fn step(&mut self, _init: &ImpelInit, _dt_ms: f32, _state: &mut ImpellerState) {}
    }

    const FIRST: ModelKind = ModelKind::new("registry-test-first");
    const SECOND: ModelKind = ModelKind::new("registry-test-second");
    const MISSING: ModelKind = ModelKind::new("registry-test-missing");

    #[test]
    fn creates_registered_models() {
        assert!(register(FIRST, || Box::new(Still(FIRST))));
        assert!(is_registered(FIRST));
        assert!(registered_kinds().contains(&FIRST));

        let model = create(FIRST).unwrap();
        assert_eq!(model.kind(), FIRST);
    }

    #[test]
    fn first_registration_wins() {
        assert!(register(SECOND, || Box::new(Still(SECOND))));
        assert!(!register(SECOND, || Box::new(Still(MISSING))));

        assert_eq!(create(SECOND).unwrap().kind(), SECOND);
    }

    #[test]
    fn unregistered_kind_is_an_error() {
        assert!(!is_registered(MISSING));
        assert_eq!(
            create(MISSING).unwrap_err(),
            RegistryError::Unregistered(MISSING)
        );
    }
}
