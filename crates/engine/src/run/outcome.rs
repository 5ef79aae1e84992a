use uom::si::f64::Time;

/// Indicates how a run terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Advanced every requested frame.
    Complete,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The result of [`ImpelEngine::run`](crate::ImpelEngine::run).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Run {
    /// How the run terminated.
    pub status: Status,

    /// Number of frames advanced.
    pub frames: usize,

    /// Simulated time advanced.
    pub elapsed: Time,
}
