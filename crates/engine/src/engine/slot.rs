use impel_core::{ImpelInit, ImpelModel, ImpellerState};

/// A stable name for one allocated slot.
///
/// `index` selects an entry in the engine's directory, which records where
/// the slot currently lives in dense storage. `generation` changes every time
/// the entry is released, so an id outlives its slot without aliasing the
/// next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SlotId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

/// Engine-owned storage for one channel.
#[derive(Debug)]
pub(crate) struct Slot {
    /// The id whose directory entry points back at this slot; compaction uses
    /// it to retarget the entry after moving the slot.
    pub(crate) owner: SlotId,
    pub(crate) init: ImpelInit,
    pub(crate) state: ImpellerState,
    pub(crate) model: Box<dyn ImpelModel>,
    pub(crate) valid: bool,
}

/// Where a directory entry's slot currently lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Entry {
    pub(crate) generation: u32,
    pub(crate) slot: Option<usize>,
}
