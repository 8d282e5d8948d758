use crate::api::PollApi;
use crate::handlers::{handle_action, UserAction};
use crate::sync::{PollSync, PollView};
use log::{debug, info};
use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(2000);

const ACTION_QUEUE_SIZE: usize = 32;

// Cloneable handle for requesting work outside the regular schedule
#[derive(Debug, Clone)]
pub struct SchedulerHandle {
    actions: mpsc::Sender<UserAction>,
}

impl SchedulerHandle {
    // false once the scheduler has stopped
    pub async fn send(&self, action: UserAction) -> bool {
        self.actions.send(action).await.is_ok()
    }

    pub async fn request_refresh(&self) -> bool {
        self.send(UserAction::Refresh).await
    }
}

// One repeating refresh plus a queue of out-of-band actions, all run on the
// caller's task so no two cycles or writes overlap
pub struct RefreshScheduler {
    period: Duration,
    actions: mpsc::Receiver<UserAction>,
}

impl RefreshScheduler {
    pub fn new(period: Duration) -> (Self, SchedulerHandle) {
        let (tx, rx) = mpsc::channel(ACTION_QUEUE_SIZE);
        (
            Self {
                period,
                actions: rx,
            },
            SchedulerHandle { actions: tx },
        )
    }

    // Refreshes until `shutdown` resolves. The first tick fires immediately.
    // Dropping every handle only stops action intake; ticks keep coming.
    pub async fn run<A, V, F>(mut self, sync: &mut PollSync<A, V>, shutdown: F)
    where
        A: PollApi,
        V: PollView,
        F: Future<Output = ()>,
    {
        info!(
            "Starting refresh loop for poll {} every {:?}",
            sync.poll_id(),
            self.period
        );
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut accepting_actions = true;
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = ticker.tick() => {
                    sync.run_cycle().await;
                }
                action = self.actions.recv(), if accepting_actions => match action {
                    Some(action) => {
                        // failures are already surfaced through the view
                        let _ = handle_action(sync, action).await;
                    }
                    None => {
                        debug!("Action input for poll {} closed", sync.poll_id());
                        accepting_actions = false;
                    }
                },
            }
        }

        info!(
            "Refresh loop for poll {} stopped after {} cycle(s)",
            sync.poll_id(),
            sync.cycles()
        );
    }
}
