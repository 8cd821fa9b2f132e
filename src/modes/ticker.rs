use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use crate::game::TimerHandle;

/// Arms a tokio interval for the scheduler's current timer handle
///
/// At most one interval exists at a time. A new handle id replaces it, no
/// handle drops it. Like a repeating browser timer, the first tick fires one
/// full period after arming.
#[derive(Default)]
pub struct TickDriver {
    armed: Option<(u64, Interval)>,
}

impl TickDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sync(&mut self, handle: Option<TimerHandle>) {
        match handle {
            None => self.armed = None,
            Some(handle) if self.armed_id() == Some(handle.id) => {}
            Some(handle) => {
                let mut interval = interval_at(Instant::now() + handle.interval, handle.interval);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                self.armed = Some((handle.id, interval));
            }
        }
    }

    pub fn armed_id(&self) -> Option<u64> {
        self.armed.as_ref().map(|(id, _)| *id)
    }

    /// Wait for the next tick; never completes while disarmed
    pub async fn tick(&mut self) {
        match self.armed.as_mut() {
            Some((_, interval)) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    fn handle(id: u64, ms: u64) -> TimerHandle {
        TimerHandle {
            id,
            interval: Duration::from_millis(ms),
        }
    }

    #[tokio::test]
    async fn test_disarmed_never_ticks() {
        let mut driver = TickDriver::new();
        driver.sync(None);
        assert!(timeout(Duration::from_millis(30), driver.tick())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_armed_ticks_repeatedly() {
        let mut driver = TickDriver::new();
        driver.sync(Some(handle(1, 5)));
        for _ in 0..3 {
            assert!(timeout(Duration::from_millis(500), driver.tick())
                .await
                .is_ok());
        }
    }

    #[tokio::test]
    async fn test_sync_replaces_only_on_new_id() {
        let mut driver = TickDriver::new();
        driver.sync(Some(handle(1, 10_000)));
        assert_eq!(driver.armed_id(), Some(1));

        driver.sync(Some(handle(1, 10_000)));
        assert_eq!(driver.armed_id(), Some(1));

        driver.sync(Some(handle(2, 5)));
        assert_eq!(driver.armed_id(), Some(2));
        assert!(timeout(Duration::from_millis(500), driver.tick())
            .await
            .is_ok());

        driver.sync(None);
        assert_eq!(driver.armed_id(), None);
    }
}
