use thiserror::Error;
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};

use crate::{Clock, DisplaySurface, ExpirationRenderer};

#[derive(Debug, Error)]
pub enum CountdownError {
    #[error("countdown task failed")]
    TaskFailed(#[from] tokio::task::JoinError),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CountdownOutcome {
    Expired,
    Stopped,
}

/// Disposer for a running countdown. Dropping the handle stops the countdown.
pub struct CountdownHandle {
    stop_tx: watch::Sender<bool>,
    task: Option<JoinHandle<CountdownOutcome>>,
}

impl CountdownHandle {
    /// Cancels the periodic schedule. Safe to call any number of times.
    pub fn stop(&self) {
        // Fails only when the task has already finished
        let _ = self.stop_tx.send(true);
    }

    pub async fn wait(mut self) -> Result<CountdownOutcome, CountdownError> {
        match self.task.take() {
            Some(task) => Ok(task.await?),
            None => Ok(CountdownOutcome::Stopped),
        }
    }
}

impl Drop for CountdownHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Renders immediately and then once per tick period of the renderer's
/// granularity, until the target expires or the handle stops it.
///
/// Must be called from within a tokio runtime.
pub fn spawn_countdown<C, S>(mut renderer: ExpirationRenderer<C, S>) -> CountdownHandle
where
    C: Clock + Send + 'static,
    S: DisplaySurface + Send + 'static,
{
    let (stop_tx, mut stop_rx) = watch::channel(false);
    let period = renderer.format().granularity.tick_period();
    let expires_at = renderer.target().expires_at();

    let task = tokio::spawn(async move {
        log::debug!("Starting countdown to {} every {:?}", expires_at, period);

        let mut ticks = interval(period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticks.tick() => {
                    if renderer.render().is_expired() {
                        log::debug!("Countdown to {} expired", expires_at);
                        return CountdownOutcome::Expired;
                    }
                },
                _ = stop_rx.changed() => {
                    log::debug!("Countdown to {} stopped", expires_at);
                    return CountdownOutcome::Stopped;
                }
            };
        }
    });

    CountdownHandle {
        stop_tx,
        task: Some(task),
    }
}
