//! Tick scheduling seam.
//!
//! The engine never owns a timer. Hosts provide a cancellable scheduler;
//! the runner arms it on `start`, cancels it on any stop, and forwards
//! ticks only while it is armed, so a tick that fires after cancellation
//! can never mutate a stopped session.

use crate::session::{DiveError, DiveSession, TickOutcome};

/// Host-provided, cancellable tick source. Implementations map `schedule`
/// and `cancel` onto whatever timing facility the platform has; the engine
/// only ever observes the armed state.
pub trait TickScheduler {
    /// Arm the scheduler at the host's cadence.
    fn schedule(&mut self);
    /// Disarm; pending ticks must not be delivered afterwards.
    fn cancel(&mut self);
    fn is_scheduled(&self) -> bool;
}

/// Scheduler that keeps only the armed flag. Hosts and tests drive ticks
/// explicitly at whatever cadence they choose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManualScheduler {
    armed: bool,
}

impl ManualScheduler {
    #[must_use]
    pub const fn new() -> Self {
        Self { armed: false }
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule(&mut self) {
        self.armed = true;
    }

    fn cancel(&mut self) {
        self.armed = false;
    }

    fn is_scheduled(&self) -> bool {
        self.armed
    }
}

/// Binds a session to its scheduler so the armed state always tracks the
/// session's active state.
#[derive(Debug, Clone)]
pub struct SessionRunner<S: TickScheduler> {
    session: DiveSession,
    scheduler: S,
}

impl<S: TickScheduler> SessionRunner<S> {
    #[must_use]
    pub const fn new(session: DiveSession, scheduler: S) -> Self {
        Self { session, scheduler }
    }

    /// Start the dive and arm the scheduler.
    ///
    /// # Errors
    ///
    /// Propagates [`DiveError::CannotStart`]; the scheduler stays disarmed.
    pub fn start(&mut self) -> Result<(), DiveError> {
        self.session.start()?;
        self.scheduler.schedule();
        Ok(())
    }

    /// Stop the dive and cancel any pending tick.
    pub fn stop(&mut self) {
        self.session.stop();
        self.scheduler.cancel();
    }

    /// Deliver one scheduled tick. Ticks arriving while disarmed are
    /// dropped without touching the session; a forced stop disarms.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.scheduler.is_scheduled() {
            return TickOutcome {
                active: self.session.is_active(),
                oxygen: self.session.oxygen_level(),
                forced_stop: false,
                encounter: None,
            };
        }
        let outcome = self.session.tick();
        if outcome.forced_stop {
            self.scheduler.cancel();
        }
        outcome
    }

    #[must_use]
    pub const fn session(&self) -> &DiveSession {
        &self.session
    }

    pub const fn session_mut(&mut self) -> &mut DiveSession {
        &mut self.session
    }

    #[must_use]
    pub const fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Consume the runner, returning the underlying session.
    #[must_use]
    pub fn into_session(self) -> DiveSession {
        self.session
    }
}
