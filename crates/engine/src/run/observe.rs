use super::{Action, FrameEvent};

/// Watches a [`run`](crate::ImpelEngine::run) one frame at a time.
///
/// The engine calls `observe` with frame 0 before advancing and again after
/// every advance. Returning `Some(Action::StopEarly)` ends the run with the
/// frames already taken; `None` keeps going.
///
/// Any `FnMut(&FrameEvent) -> Option<Action>` closure is a `FrameObserver`,
/// and `()` observes nothing, so the run goes the full distance.
pub trait FrameObserver {
    fn observe(&mut self, event: &FrameEvent) -> Option<Action>;
}

impl<F> FrameObserver for F
where
    F: FnMut(&FrameEvent) -> Option<Action>,
{
    fn observe(&mut self, event: &FrameEvent) -> Option<Action> {
        self(event)
    }
}

impl FrameObserver for () {
    fn observe(&mut self, _event: &FrameEvent) -> Option<Action> {
        None
    }
}
