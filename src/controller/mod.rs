//! UI-side controllers. Each one is the only writer of the state it holds.

pub mod actions;
pub mod timer;
pub mod toast;

pub use actions::{ActionController, SubscribeReset, SubscribeStatus, SyncPhase, SUBSCRIBE_RESET};
pub use timer::Timer;
pub use toast::{Severity, Toast, ToastController, TOAST_DURATION};
