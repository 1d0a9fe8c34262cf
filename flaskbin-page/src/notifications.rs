use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use std::{path::PathBuf, time::Duration};
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};

pub const NOTIFICATION_POLL_PERIOD: Duration = Duration::from_secs(60);

#[async_trait]
pub trait NotificationSource {
    async fn fetch_count(&self) -> Result<u32, anyhow::Error>;
}

/// The badges and document title showing unread notifications.
pub trait NotificationView {
    /// `None` hides the badges.
    fn set_badge(&mut self, count: Option<u32>);
    fn set_title(&mut self, title: &str);
}

#[derive(Deserialize)]
struct NotificationCountResponse {
    count: u32,
}

/// Parses the `{"count": n}` body returned by the notification count endpoint.
pub fn parse_count_response(body: &str) -> Result<u32, anyhow::Error> {
    let response: NotificationCountResponse =
        serde_json::from_str(body).context("Failed to deserialise notification count")?;
    Ok(response.count)
}

/// Removes a leading `"(<digits>) "` unread prefix.
pub fn strip_count_prefix(title: &str) -> &str {
    if let Some(rest) = title.strip_prefix('(') {
        if let Some(close) = rest.find(") ") {
            let digits = &rest[..close];
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                return &rest[close + 2..];
            }
        }
    }
    title
}

pub fn title_with_count(title: &str, count: u32) -> String {
    let title = strip_count_prefix(title);
    if count > 0 {
        format!("({}) {}", count, title)
    } else {
        title.to_string()
    }
}

pub fn apply_count<V: NotificationView + ?Sized>(view: &mut V, title: &str, count: u32) {
    view.set_badge(if count > 0 { Some(count) } else { None });
    view.set_title(&title_with_count(title, count));
}

/// Reads the count response from a file, for hosts which mirror the endpoint
/// to disk.
pub struct FileNotificationSource {
    path: PathBuf,
}

impl FileNotificationSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl NotificationSource for FileNotificationSource {
    async fn fetch_count(&self) -> Result<u32, anyhow::Error> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read file {}", self.path.to_string_lossy()))?;
        parse_count_response(&body)
    }
}

pub struct NotificationPollerHandle {
    stop_tx: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl NotificationPollerHandle {
    pub fn stop(&self) {
        let _ = self.stop_tx.send(true);
    }

    pub async fn wait(mut self) {
        if let Some(task) = self.task.take() {
            if let Err(error) = task.await {
                log::error!("Notification poller failed: {}", error);
            }
        }
    }
}

impl Drop for NotificationPollerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Fetches the unread count now and then every `period`. A failed fetch is
/// logged and leaves the view as it was.
pub fn spawn_notification_poller<S, V>(
    source: S,
    mut view: V,
    title: String,
    period: Duration,
) -> NotificationPollerHandle
where
    S: NotificationSource + Send + Sync + 'static,
    V: NotificationView + Send + 'static,
{
    let (stop_tx, mut stop_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        let title = strip_count_prefix(&title).to_string();
        let mut ticks = interval(period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticks.tick() => {
                    match source.fetch_count().await {
                        Ok(count) => apply_count(&mut view, &title, count),
                        Err(error) => log::error!("Error fetching notification count: {:?}", error),
                    }
                },
                _ = stop_rx.changed() => {
                    return;
                }
            };
        }
    });

    NotificationPollerHandle {
        stop_tx,
        task: Some(task),
    }
}
