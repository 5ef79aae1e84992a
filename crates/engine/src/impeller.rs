use std::{mem, rc::Weak};

use impel_core::{ImpelInit, ImpellerState, Progress, Settleable, Settled1f};

use crate::{
    ImpelEngine, ImpelError,
    engine::{Shared, Slot, SlotId},
};

/// A handle to one simulated channel inside an [`ImpelEngine`].
///
/// A default `Impeller` is unbound. Binding it with
/// [`initialize_with_state`](Impeller::initialize_with_state) reserves a slot
/// in the engine; from then on the engine advances the channel every frame
/// and the handle reads the results.
///
/// # Ownership
///
/// Each bound slot has exactly one owning handle:
///
/// - `Impeller` is not `Clone`; a channel cannot be duplicated.
/// - Rust moves (`let b = a;`, pushing into a `Vec`, a `Vec` reallocating)
///   keep the binding intact, since a handle names its slot by id rather than
///   by address.
/// - [`take`](Impeller::take) moves the binding out and leaves the source
///   unbound; [`rebind_from`](Impeller::rebind_from) does the same into an
///   existing handle, releasing whatever that handle was bound to first.
/// - Dropping a bound handle, or calling [`invalidate`](Impeller::invalidate),
///   releases its slot. The engine reclaims the storage on its next frame.
///
/// # Unbound access
///
/// Accessors return [`ImpelError::Unbound`] on an unbound handle,
/// [`ImpelError::EngineDropped`] once the engine is gone, and
/// [`ImpelError::EngineBusy`] if read while the engine is mid-update (from
/// inside a model, for instance). [`settled`](Impeller::settled) returns
/// `false` in all three cases.
#[derive(Debug, Default)]
pub struct Impeller {
    binding: Option<Binding>,
}

#[derive(Debug)]
struct Binding {
    engine: Weak<Shared>,
    id: SlotId,
}

impl Impeller {
    /// Creates an unbound handle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds this handle to a new slot in `engine`.
    ///
    /// Any slot the handle was previously bound to is released first.
    ///
    /// # Errors
    ///
    /// Returns [`ImpelError::InvalidInit`] if `init` fails validation and
    /// [`ImpelError::Registry`] if its model kind was never registered.
    /// On error the handle is left unbound.
    pub fn initialize_with_state(
        &mut self,
        init: &ImpelInit,
        engine: &ImpelEngine,
        state: ImpellerState,
    ) -> Result<(), ImpelError> {
        self.invalidate();

        let id = engine.core_mut().allocate(*init, state)?;
        self.binding = Some(Binding {
            engine: engine.downgrade(),
            id,
        });
        Ok(())
    }

    /// Releases the bound slot, if any, leaving this handle unbound.
    pub fn invalidate(&mut self) {
        if let Some(binding) = self.binding.take() {
            binding.release();
        }
    }

    /// Moves the binding into a new handle, leaving this one unbound.
    ///
    /// The channel's state is untouched and its model is not invoked.
    #[must_use]
    pub fn take(&mut self) -> Impeller {
        mem::take(self)
    }

    /// Releases this handle's slot and takes over the binding of `source`.
    ///
    /// Afterwards `source` is unbound. If `source` was unbound, so is `self`.
    pub fn rebind_from(&mut self, source: &mut Impeller) {
        self.invalidate();
        self.binding = source.binding.take();
    }

    /// Returns `true` if this handle is bound to a live slot.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.with_slot(|_| ()).is_ok()
    }

    /// # Errors
    ///
    /// Fails if the handle is unbound or its engine was dropped.
    pub fn value(&self) -> Result<f32, ImpelError> {
        self.with_slot(|slot| slot.state.value)
    }

    /// # Errors
    ///
    /// Fails if the handle is unbound or its engine was dropped.
    pub fn velocity(&self) -> Result<f32, ImpelError> {
        self.with_slot(|slot| slot.state.velocity)
    }

    /// # Errors
    ///
    /// Fails if the handle is unbound or its engine was dropped.
    pub fn target_value(&self) -> Result<f32, ImpelError> {
        self.with_slot(|slot| slot.state.target_value)
    }

    /// Returns a snapshot of the channel's value, velocity, and target.
    ///
    /// # Errors
    ///
    /// Fails if the handle is unbound or its engine was dropped.
    pub fn state(&self) -> Result<ImpellerState, ImpelError> {
        self.with_slot(|slot| slot.state)
    }

    /// Returns the signed, range-aware distance from the value to the target.
    ///
    /// # Errors
    ///
    /// Fails if the handle is unbound or its engine was dropped.
    pub fn difference(&self) -> Result<f32, ImpelError> {
        self.with_slot(|slot| slot.state.difference(slot.init.range()))
    }

    /// Returns the configuration the channel was bound with.
    ///
    /// # Errors
    ///
    /// Fails if the handle is unbound or its engine was dropped.
    pub fn init(&self) -> Result<ImpelInit, ImpelError> {
        self.with_slot(|slot| slot.init)
    }

    /// Returns `true` if the channel meets its configuration's `at_target`
    /// tolerances.
    #[must_use]
    pub fn settled(&self) -> bool {
        self.with_slot(|slot| {
            slot.init
                .at_target()
                .settled_state(&slot.state, slot.init.range())
        })
        .unwrap_or(false)
    }

    /// Returns `true` if the channel meets the given tolerances.
    #[must_use]
    pub fn settled_with(&self, at_target: &Settled1f) -> bool {
        at_target.is_settled(self)
    }

    fn with_slot<R>(&self, read: impl FnOnce(&Slot) -> R) -> Result<R, ImpelError> {
        let binding = self.binding.as_ref().ok_or(ImpelError::Unbound)?;
        let engine = binding.engine.upgrade().ok_or(ImpelError::EngineDropped)?;
        let core = engine.core().map_err(|_| ImpelError::EngineBusy)?;
        let slot = core.slot(binding.id).ok_or(ImpelError::Unbound)?;
        Ok(read(slot))
    }
}

impl Settleable for Impeller {
    fn progress(&self) -> Option<Progress> {
        self.with_slot(|slot| Progress {
            difference: slot.state.difference(slot.init.range()),
            velocity: slot.state.velocity,
        })
        .ok()
    }
}

impl Drop for Impeller {
    fn drop(&mut self) {
        self.invalidate();
    }
}

impl Binding {
    /// Invalidates the bound slot, if the engine still exists.
    fn release(self) {
        if let Some(engine) = self.engine.upgrade() {
            engine.release(self.id);
        }
    }
}
