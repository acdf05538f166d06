/*!
 * Rendezvous Channel
 * Lock-and-condvar handshake between the coordinator and worker threads
 */

use crate::core::types::{Pid, Ticks};
use log::trace;
use parking_lot::{Condvar, Mutex};

/// What a worker observes when its wait on the turn condition ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// The coordinator granted this worker a slice of the given length
    Granted(Ticks),
    /// The simulation is over; the worker must exit
    Stop,
}

/// Shared handshake fields, all guarded by the one mutex in [`Rendezvous`].
///
/// `started` and `stopped` live under the same lock as the rest of the state
/// rather than as free-standing atomics, so every observation of them is
/// ordered with the turn fields.
#[derive(Debug, Default)]
struct ChannelState {
    turn_owner: Option<Pid>,
    granted: Ticks,
    consumed: Ticks,
    slice_done: bool,
    started: bool,
    stopped: bool,
}

/// Coordination point between the coordinator and all worker threads.
///
/// Exactly one grant is outstanding at a time: [`Rendezvous::grant`] does not
/// return until the owning worker has reported its slice back through
/// [`Rendezvous::complete`]. That structural property is what makes the
/// protocol deadlock-free.
#[derive(Debug, Default)]
pub struct Rendezvous {
    state: Mutex<ChannelState>,
    /// coordinator -> workers: gate opened, turn granted, or stop requested
    turn_cv: Condvar,
    /// workers -> coordinator: the current slice is done
    done_cv: Condvar,
}

impl Rendezvous {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the start gate once every worker thread has been spawned.
    pub fn open(&self) {
        let mut state = self.state.lock();
        state.started = true;
        self.turn_cv.notify_all();
    }

    /// Grant a slice to `pid` and block until the worker reports it consumed.
    ///
    /// Returns the amount the worker actually consumed, which equals the
    /// quantum except on the defensive zero-grant path.
    pub fn grant(&self, pid: Pid, quantum: Ticks) -> Ticks {
        let mut state = self.state.lock();
        state.turn_owner = Some(pid);
        state.granted = quantum;
        state.slice_done = false;
        trace!("granting {} units to process {}", quantum, pid);
        self.turn_cv.notify_all();

        while !state.slice_done {
            self.done_cv.wait(&mut state);
        }
        state.consumed
    }

    /// Block until this worker's turn comes up or the simulation stops.
    pub fn await_turn(&self, pid: Pid) -> Turn {
        let mut state = self.state.lock();
        while !state.started {
            self.turn_cv.wait(&mut state);
        }
        while !state.stopped && state.turn_owner != Some(pid) {
            self.turn_cv.wait(&mut state);
        }

        if state.stopped {
            Turn::Stop
        } else {
            Turn::Granted(state.granted)
        }
    }

    /// Report the current slice finished and hand the turn back.
    pub fn complete(&self, pid: Pid, consumed: Ticks) {
        let mut state = self.state.lock();
        debug_assert_eq!(state.turn_owner, Some(pid));
        state.consumed = consumed;
        state.turn_owner = None;
        state.slice_done = true;
        self.done_cv.notify_one();
    }

    /// Broadcast the terminal stop flag; all workers must observe it and exit.
    pub fn shutdown(&self) {
        let mut state = self.state.lock();
        state.stopped = true;
        self.turn_cv.notify_all();
    }
}
