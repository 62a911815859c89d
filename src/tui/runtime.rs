use std::future::Future;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::api::NewsClient;
use crate::tui::event::{AppMessage, Command};

/// Runs [`Command`]s as background tasks and posts their results back to the
/// UI loop. Tasks still running when the runtime is dropped are aborted.
pub struct Runtime {
    client: NewsClient,
    tx: UnboundedSender<AppMessage>,
    tasks: Vec<JoinHandle<()>>,
}

impl Runtime {
    pub fn new(client: NewsClient) -> (Self, UnboundedReceiver<AppMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let runtime = Self {
            client,
            tx,
            tasks: Vec::new(),
        };
        (runtime, rx)
    }

    pub fn dispatch(&mut self, commands: Vec<Command>) {
        for command in commands {
            self.run(command);
        }
    }

    fn run(&mut self, command: Command) {
        tracing::debug!("Dispatching {:?}", command);
        let client = self.client.clone();
        match command {
            Command::FetchFeed { cycle, reason } => self.spawn(async move {
                let result = client.fetch_feed().await;
                Some(AppMessage::FeedLoaded {
                    cycle,
                    reason,
                    result,
                })
            }),
            Command::Resync => self.spawn(async move {
                Some(AppMessage::ResyncFinished(client.trigger_resync().await))
            }),
            Command::Subscribe(email) => self.spawn(async move {
                Some(AppMessage::SubscribeFinished(
                    client.submit_subscription(&email).await,
                ))
            }),
            Command::OpenUrl(url) => self.spawn(async move {
                let target = url.clone();
                match tokio::task::spawn_blocking(move || open::that(&target)).await {
                    Ok(Ok(())) => None,
                    Ok(Err(e)) => {
                        tracing::warn!("Failed to open {}: {}", url, e);
                        Some(AppMessage::BrowserFailed(e.to_string()))
                    }
                    Err(e) => Some(AppMessage::BrowserFailed(e.to_string())),
                }
            }),
        }
    }

    fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = Option<AppMessage>> + Send + 'static,
    {
        self.tasks.retain(|handle| !handle.is_finished());
        let tx = self.tx.clone();
        self.tasks.push(tokio::spawn(async move {
            if let Some(message) = task.await {
                // The receiver is gone once the UI loop has exited.
                let _ = tx.send(message);
            }
        }));
    }

    /// Background tasks that have not finished yet.
    pub fn in_flight(&self) -> usize {
        self.tasks.iter().filter(|h| !h.is_finished()).count()
    }

    pub fn shutdown(&mut self) {
        for handle in self.tasks.drain(..) {
            handle.abort();
        }
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        self.shutdown();
    }
}
