//! Observed frame loop.
//!
//! Games advance the engine from their own main loop with
//! [`ImpelEngine::advance_frame`]. Tools and tests often want the opposite:
//! advance at a fixed frame time until something is true. [`ImpelEngine::run`]
//! does that, reporting each frame to a [`FrameObserver`] that may stop the loop.
//!
//! # Example
//!
//! ```ignore
//! use impel_engine::{Action, FrameEvent, ImpelEngine};
//! use impel_core::time::millis;
//!
//! let run = engine.run(millis(10.0), 1_000, |_: &FrameEvent| {
//!     impeller.settled().then_some(Action::StopEarly)
//! });
//! println!("settled after {} frames", run.frames);
//! ```

mod action;
mod event;
mod observe;
mod outcome;

pub use action::Action;
pub use event::FrameEvent;
pub use observe::FrameObserver;
pub use outcome::{Run, Status};

use impel_core::time;
use uom::si::f64::Time;

use crate::ImpelEngine;

impl ImpelEngine {
    /// Advances up to `max_frames` frames of `frame_time` each.
    ///
    /// # Algorithm
    ///
    /// 1. Emit frame 0 to the observer before anything advances.
    /// 2. For each frame:
    ///    - Advance every live channel by `frame_time`.
    ///    - Emit a [`FrameEvent`] to the observer.
    ///    - If the observer returns [`Action::StopEarly`], terminate.
    /// 3. Return a [`Run`] describing how far the engine got.
    pub fn run<Obs>(&mut self, frame_time: Time, max_frames: usize, mut observer: Obs) -> Run
    where
        Obs: FrameObserver,
    {
        let mut elapsed = time::millis(0.0);

        let event = FrameEvent {
            frame: 0,
            elapsed,
            live: self.len(),
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Run {
                status: Status::StoppedByObserver,
                frames: 0,
                elapsed,
            };
        }

        for frame in 1..=max_frames {
            self.advance_frame(frame_time);
            elapsed += frame_time;

            let event = FrameEvent {
                frame,
                elapsed,
                live: self.len(),
            };
            if let Some(Action::StopEarly) = observer.observe(&event) {
                return Run {
                    status: Status::StoppedByObserver,
                    frames: frame,
                    elapsed,
                };
            }
        }

        Run {
            status: Status::Complete,
            frames: max_frames,
            elapsed,
        }
    }
}
