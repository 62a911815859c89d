//! Resync and newsletter-subscription state machines.
//!
//! ```text
//! resync:    Idle -> Requesting -> Refreshing -> Idle
//!                        \-------(failure)-----> Idle
//!
//! subscribe: Idle -> Submitting -> Success -(2s)-> Idle (modal closes)
//!                              \-> Error   -(2s)-> Idle (modal stays)
//! ```

use std::time::{Duration, Instant};

use crate::controller::Timer;

/// Delay before the subscribe button returns to idle.
pub const SUBSCRIBE_RESET: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPhase {
    #[default]
    Idle,
    /// Pacing delay and `POST` in flight.
    Requesting,
    /// Server accepted the sync; the feed is being re-fetched.
    Refreshing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubscribeStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

/// Which timed reset just happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeReset {
    AfterSuccess,
    AfterError,
}

#[derive(Debug, Default)]
pub struct ActionController {
    sync: SyncPhase,
    subscribe: SubscribeStatus,
    reset_timer: Timer,
}

impl ActionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sync_phase(&self) -> SyncPhase {
        self.sync
    }

    pub fn is_syncing(&self) -> bool {
        self.sync != SyncPhase::Idle
    }

    pub fn subscribe_status(&self) -> SubscribeStatus {
        self.subscribe
    }

    /// The subscribe trigger is disabled while pending or showing success.
    pub fn can_subscribe(&self) -> bool {
        !matches!(
            self.subscribe,
            SubscribeStatus::Submitting | SubscribeStatus::Success
        )
    }

    /// Returns false if a resync is already running.
    pub fn begin_resync(&mut self) -> bool {
        if self.is_syncing() {
            return false;
        }
        self.sync = SyncPhase::Requesting;
        true
    }

    pub fn resync_accepted(&mut self) {
        if self.sync == SyncPhase::Requesting {
            self.sync = SyncPhase::Refreshing;
        }
    }

    pub fn finish_resync(&mut self) {
        self.sync = SyncPhase::Idle;
    }

    /// Returns false if the trigger is currently disabled.
    pub fn begin_subscribe(&mut self) -> bool {
        if !self.can_subscribe() {
            return false;
        }
        self.reset_timer.cancel();
        self.subscribe = SubscribeStatus::Submitting;
        true
    }

    pub fn subscribe_succeeded(&mut self, now: Instant) {
        self.settle_subscribe(SubscribeStatus::Success, now);
    }

    pub fn subscribe_failed(&mut self, now: Instant) {
        self.settle_subscribe(SubscribeStatus::Error, now);
    }

    fn settle_subscribe(&mut self, status: SubscribeStatus, now: Instant) {
        self.subscribe = status;
        self.reset_timer.schedule(now, SUBSCRIBE_RESET);
    }

    pub fn tick(&mut self, now: Instant) -> Option<SubscribeReset> {
        if !self.reset_timer.fire(now) {
            return None;
        }
        let reset = match self.subscribe {
            SubscribeStatus::Success => SubscribeReset::AfterSuccess,
            SubscribeStatus::Error => SubscribeReset::AfterError,
            SubscribeStatus::Idle | SubscribeStatus::Submitting => return None,
        };
        self.subscribe = SubscribeStatus::Idle;
        Some(reset)
    }
}
