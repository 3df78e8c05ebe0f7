use std::time::Duration;

use fetchdeck_models::{Ack, TaskConfigRead};
use tokio::sync::watch;
use tokio::time::interval;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::alert::Alert;
use crate::client::ApiClient;
use crate::services::{runs, tasks};

/// Cadence of the run-view log poll.
pub const DEFAULT_LOG_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Bridges a persisted task's remote execution state into the session: run
/// trigger, schedule toggle, and the live log tail.
pub struct RunController {
    client: ApiClient,
    task_id: String,
}

impl RunController {
    pub fn new(client: ApiClient, task_id: impl Into<String>) -> Self {
        Self {
            client,
            task_id: task_id.into(),
        }
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    pub async fn fetch(&self) -> Option<TaskConfigRead> {
        tasks::get(&self.client, &self.task_id).await
    }

    /// Triggers one immediate execution and surfaces the server's message.
    /// Waits only for the trigger acknowledgment, not for completion.
    pub async fn trigger(&self) -> Option<Ack> {
        let ack = runs::run(&self.client, &self.task_id).await?;
        self.client.alert(Alert::success(ack.message.clone()));
        Some(ack)
    }

    /// Registers or deregisters the recurring job, then re-fetches the task
    /// so the returned `is_scheduled`/`next_run_time` reflect server truth.
    /// The toggle is never applied optimistically: on failure the caller's
    /// displayed state is left exactly as it was.
    pub async fn set_scheduled(&self, scheduled: bool) -> Option<TaskConfigRead> {
        let message = if scheduled {
            runs::schedule(&self.client, &self.task_id).await?;
            "The task is scheduled successfully"
        } else {
            runs::unschedule(&self.client, &self.task_id).await?;
            "The task is unscheduled successfully"
        };
        self.client.alert(Alert::success(message));
        self.fetch().await
    }

    /// Starts polling the task's log text every `every`, publishing each
    /// fetched snapshot wholesale through the returned watch handle. The
    /// poll loop stops when the handle is cancelled or dropped.
    pub fn watch_logs(&self, every: Duration) -> LogWatch {
        let (tx, rx) = watch::channel(String::new());
        let cancel = CancellationToken::new();
        let client = self.client.clone();
        let task_id = self.task_id.clone();
        let token = cancel.clone();

        tokio::spawn(async move {
            let mut ticker = interval(every);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {}
                }

                if let Some(text) = runs::log(&client, &task_id).await {
                    // Replace, never append: the server owns the full log.
                    tx.send_replace(text);
                }
            }
            debug!(task_id = %task_id, "log poll stopped");
        });

        LogWatch { rx, cancel }
    }
}

/// Cancellable subscription to a task's polled log text.
///
/// Dropping the handle cancels the underlying poll loop, so a torn-down view
/// cannot receive further updates.
pub struct LogWatch {
    rx: watch::Receiver<String>,
    cancel: CancellationToken,
}

impl LogWatch {
    /// Latest full log snapshot.
    pub fn current(&self) -> String {
        self.rx.borrow().clone()
    }

    /// Waits for the next published snapshot. Returns `false` once the poll
    /// loop has stopped and no further updates will arrive.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for LogWatch {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
