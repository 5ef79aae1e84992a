mod slot;

use std::{
    cell::{BorrowError, Ref, RefCell, RefMut},
    rc::{Rc, Weak},
};

use impel_core::{ImpelInit, ImpelModel, ImpellerState, registry, time};
use uom::si::f64::Time;

use crate::ImpelError;

pub(crate) use slot::{Entry, Slot, SlotId};

/// Drives every bound [`Impeller`](crate::Impeller) once per frame.
///
/// The engine packs all live channels into one dense array of slots.
/// Handles never point into that array directly; each holds a [`SlotId`]
/// naming a directory entry, and the directory records where the slot
/// currently lives. Storage can therefore grow, and be compacted, without
/// disturbing any handle.
///
/// Invalidating a handle only marks its slot. The gaps are closed at the
/// start of the next [`advance_frame`](ImpelEngine::advance_frame), so churn
/// from many short-lived channels costs one compaction per frame.
///
/// The engine is single-threaded: it is neither `Send` nor `Sync`.
#[derive(Debug, Default)]
pub struct ImpelEngine {
    shared: Rc<Shared>,
}

impl ImpelEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances every live channel by `delta_time`.
    ///
    /// Invalidated slots are reclaimed first, then each live slot's model
    /// updates its own state. Channels are independent, so the update order
    /// is unspecified.
    ///
    /// Zero or negative times change no channel state.
    pub fn advance_frame(&mut self, delta_time: Time) {
        let mut core = self.shared.settle();
        core.defragment();
        core.advance(delta_time);
    }

    /// Reclaims invalidated slots by moving live slots into the gaps.
    ///
    /// Returns the number of slots reclaimed. Channel state is never changed;
    /// only storage positions move.
    pub fn defragment(&mut self) -> usize {
        self.shared.settle().defragment()
    }

    /// Returns the number of live channels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shared.settle().live()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of occupied slots, including those awaiting reclaim.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.shared.settle().slots.len()
    }

    /// Returns the number of invalidated slots not yet reclaimed.
    #[must_use]
    pub fn pending_reclaim(&self) -> usize {
        self.shared.settle().holes.len()
    }

    /// Returns the number of frames advanced so far.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.shared.settle().frame
    }

    pub(crate) fn downgrade(&self) -> Weak<Shared> {
        Rc::downgrade(&self.shared)
    }

    pub(crate) fn core_mut(&self) -> RefMut<'_, EngineCore> {
        self.shared.settle()
    }

    #[cfg(test)]
    pub(crate) fn core(&self) -> Ref<'_, EngineCore> {
        self.shared.core.borrow()
    }
}

/// State shared between an engine and the handles bound to it.
#[derive(Debug, Default)]
pub(crate) struct Shared {
    core: RefCell<EngineCore>,
    /// Slots whose handles let go while `core` was borrowed, for example a
    /// handle owned by a model that compaction dropped.
    deferred: RefCell<Vec<SlotId>>,
}

impl Shared {
    pub(crate) fn core(&self) -> Result<Ref<'_, EngineCore>, BorrowError> {
        self.core.try_borrow()
    }

    /// Invalidates `id` now, or on the engine's next access if it is busy.
    pub(crate) fn release(&self, id: SlotId) {
        match self.core.try_borrow_mut() {
            Ok(mut core) => {
                core.invalidate(id);
            }
            Err(_) => {
                tracing::debug!(?id, "engine busy; deferring slot release");
                self.deferred.borrow_mut().push(id);
            }
        }
    }

    /// Borrows the core after applying any deferred releases.
    fn settle(&self) -> RefMut<'_, EngineCore> {
        let mut core = self.core.borrow_mut();
        for id in self.deferred.borrow_mut().drain(..) {
            core.invalidate(id);
        }
        core
    }
}

/// Slot storage and bookkeeping for one engine.
#[derive(Debug, Default)]
pub(crate) struct EngineCore {
    /// Dense slot storage. Live slots and not-yet-reclaimed holes.
    slots: Vec<Slot>,
    /// Maps `SlotId::index` to the slot's current position.
    directory: Vec<Entry>,
    /// Directory entries available for reuse.
    free_entries: Vec<u32>,
    /// Positions in `slots` that were invalidated since the last compaction.
    holes: Vec<usize>,
    frame: u64,
}

impl EngineCore {
    /// Binds a new slot to `init` and `state`.
    ///
    /// The model is built before any storage is reserved, so a failed
    /// allocation leaves the engine unchanged.
    pub(crate) fn allocate(
        &mut self,
        init: ImpelInit,
        state: ImpellerState,
    ) -> Result<SlotId, ImpelError> {
        init.validate()?;
        let model = registry::create(init.kind())?;

        let id = self.reserve_entry();
        let slot = Slot {
            owner: id,
            init,
            state,
            model,
            valid: true,
        };

        let position = if let Some(hole) = self.holes.pop() {
            self.slots[hole] = slot;
            hole
        } else {
            self.slots.push(slot);
            self.slots.len() - 1
        };
        self.directory[id.index as usize].slot = Some(position);

        tracing::debug!(?id, position, kind = %init.kind(), "allocated slot");
        Ok(id)
    }

    /// Marks the slot named by `id` as invalid.
    ///
    /// Returns `false` if `id` no longer names a live slot.
    pub(crate) fn invalidate(&mut self, id: SlotId) -> bool {
        let Some(position) = self.position(id) else {
            return false;
        };

        self.slots[position].valid = false;
        self.holes.push(position);

        let entry = &mut self.directory[id.index as usize];
        entry.slot = None;
        entry.generation = entry.generation.wrapping_add(1);
        self.free_entries.push(id.index);

        tracing::debug!(?id, position, "invalidated slot");
        true
    }

    /// Returns the live slot named by `id`.
    pub(crate) fn slot(&self, id: SlotId) -> Option<&Slot> {
        self.position(id).map(|position| &self.slots[position])
    }

    /// Moves every live slot to the front of storage and drops the rest.
    ///
    /// Each moved slot's directory entry is retargeted through the slot's
    /// `owner`, so the pass touches each slot once and never scans handles.
    pub(crate) fn defragment(&mut self) -> usize {
        if self.holes.is_empty() {
            return 0;
        }

        let mut next = 0;
        for position in 0..self.slots.len() {
            if !self.slots[position].valid {
                continue;
            }
            if position != next {
                self.slots.swap(position, next);
                let owner = self.slots[next].owner;
                self.directory[owner.index as usize].slot = Some(next);
            }
            next += 1;
        }

        let reclaimed = self.slots.len() - next;
        self.slots.truncate(next);
        self.holes.clear();

        tracing::debug!(reclaimed, live = next, "defragmented slots");
        reclaimed
    }

    /// Updates every live slot through its own model.
    pub(crate) fn advance(&mut self, delta_time: Time) {
        self.frame += 1;
        tracing::trace!(
            frame = self.frame,
            dt_ms = time::as_millis(delta_time),
            live = self.live(),
            "advancing frame"
        );

        for slot in self.slots.iter_mut().filter(|slot| slot.valid) {
            let Slot {
                init, state, model, ..
            } = slot;
            model.update(init, delta_time, state);
        }
    }

    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.holes.len()
    }

    fn position(&self, id: SlotId) -> Option<usize> {
        self.directory
            .get(id.index as usize)
            .filter(|entry| entry.generation == id.generation)
            .and_then(|entry| entry.slot)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn reserve_entry(&mut self) -> SlotId {
        if let Some(index) = self.free_entries.pop() {
            let generation = self.directory[index as usize].generation;
            return SlotId { index, generation };
        }

        let index = self.directory.len() as u32;
        self.directory.push(Entry {
            generation: 0,
            slot: None,
        });
        SlotId {
            index,
            generation: 0,
        }
    }
}
