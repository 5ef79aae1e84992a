/// Control actions an observer can return from [`ImpelEngine::run`](crate::ImpelEngine::run).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop advancing frames and return the run so far.
    StopEarly,
}
