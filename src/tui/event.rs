use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use crate::api::{SubscriptionOutcome, SyncReport};
use crate::app::Result;
use crate::domain::{FeedSnapshot, Section};

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
}

pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    pub fn next(&self) -> Result<AppEvent> {
        if event::poll(self.tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(AppEvent::Key(key));
                }
            }
        }
        Ok(AppEvent::Tick)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    Select,
    Back,
    Dismiss,
    OpenInBrowser,
    ToggleMenu,
    Resync,
    Newsletter,
    JumpTo(Section),
    None,
}

/// Why a feed fetch was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchReason {
    Startup,
    AfterSync(SyncReport),
}

/// Side effects requested by the state container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchFeed { cycle: u64, reason: FetchReason },
    Resync,
    Subscribe(String),
    OpenUrl(String),
}

/// Results posted back to the UI loop by background tasks.
#[derive(Debug)]
pub enum AppMessage {
    FeedLoaded {
        cycle: u64,
        reason: FetchReason,
        result: Result<FeedSnapshot>,
    },
    ResyncFinished(Result<SyncReport>),
    SubscribeFinished(Result<SubscriptionOutcome>),
    BrowserFailed(String),
}
