use uom::si::f64::Time;

/// Event emitted by [`ImpelEngine::run`](crate::ImpelEngine::run).
///
/// Frame 0 is emitted before anything advances.
/// Frames 1..N are emitted after each advance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameEvent {
    /// Frames advanced so far in this run.
    pub frame: usize,

    /// Simulated time elapsed so far in this run.
    pub elapsed: Time,

    /// Live channels after this frame.
    pub live: usize,
}
