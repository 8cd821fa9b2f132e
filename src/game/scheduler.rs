//! Movement scheduler: the Idle / Running / Ended state machine and the one
//! repeating tick timer
//!
//! The scheduler does not sleep or spawn anything itself. It owns a
//! [`TimerHandle`] describing the timer that should be running; the runtime
//! driver arms a real interval for whatever handle is current and drops it
//! when the handle goes away. Handle ids only increase, so a restart at the
//! same period is still visible to the driver.

use std::time::Duration;

use tracing::debug;

use super::action::Direction;

/// Scheduler state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// No timer: before the first move or while paused
    Idle,
    /// A repeating tick is moving the snake in `direction`
    Running { direction: Direction, interval_ms: u64 },
    /// A collision ended the game; only a reset leaves this state
    Ended,
}

/// The single active repeating timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle {
    pub id: u64,
    pub interval: Duration,
}

/// Why a direction intent was turned down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The intent would reverse the snake into its own body
    Reversal,
    /// The timer is already driving the snake this way
    Redundant,
}

/// Result of a direction intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentOutcome {
    Accepted,
    Rejected(RejectReason),
    /// The game has ended
    Ignored,
}

impl IntentOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, IntentOutcome::Accepted)
    }
}

#[derive(Debug, Clone)]
pub struct MovementScheduler {
    state: SchedulerState,
    timer: Option<TimerHandle>,
    next_timer_id: u64,
}

impl MovementScheduler {
    pub fn new() -> Self {
        Self {
            state: SchedulerState::Idle,
            timer: None,
            next_timer_id: 1,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn timer(&self) -> Option<TimerHandle> {
        self.timer
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, SchedulerState::Running { .. })
    }

    pub fn is_ended(&self) -> bool {
        self.state == SchedulerState::Ended
    }

    pub fn running_direction(&self) -> Option<Direction> {
        match self.state {
            SchedulerState::Running { direction, .. } => Some(direction),
            _ => None,
        }
    }

    pub fn running_interval_ms(&self) -> Option<u64> {
        match self.state {
            SchedulerState::Running { interval_ms, .. } => Some(interval_ms),
            _ => None,
        }
    }

    /// Gate a request to travel in `direction`
    ///
    /// `forbidden` is the direction that would reverse the snake. On
    /// acceptance the previous timer is cancelled and a new one started at
    /// `interval_ms`; the caller records the new forbidden direction.
    pub fn request(
        &mut self,
        direction: Direction,
        forbidden: Option<Direction>,
        interval_ms: u64,
    ) -> IntentOutcome {
        if self.is_ended() {
            return IntentOutcome::Ignored;
        }
        if forbidden == Some(direction) {
            debug!(?direction, "rejected reversal");
            return IntentOutcome::Rejected(RejectReason::Reversal);
        }
        if self.running_direction() == Some(direction) {
            return IntentOutcome::Rejected(RejectReason::Redundant);
        }

        self.start(direction, interval_ms);
        IntentOutcome::Accepted
    }

    /// Stop the timer; Running becomes Idle
    pub fn pause(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.cancel_timer();
        self.state = SchedulerState::Idle;
        true
    }

    /// Restart the running timer at a new period, same direction
    pub fn restart_at(&mut self, interval_ms: u64) -> bool {
        match self.state {
            SchedulerState::Running {
                direction,
                interval_ms: current,
            } if current != interval_ms => {
                debug!(from = current, to = interval_ms, "restarting tick timer");
                self.start(direction, interval_ms);
                true
            }
            _ => false,
        }
    }

    /// Collision: cancel the timer and stay Ended until reset
    pub fn end(&mut self) {
        self.cancel_timer();
        self.state = SchedulerState::Ended;
    }

    pub fn reset(&mut self) {
        self.cancel_timer();
        self.state = SchedulerState::Idle;
    }

    fn start(&mut self, direction: Direction, interval_ms: u64) {
        self.cancel_timer();
        let id = self.next_timer_id;
        self.next_timer_id += 1;
        self.timer = Some(TimerHandle {
            id,
            interval: Duration::from_millis(interval_ms),
        });
        self.state = SchedulerState::Running {
            direction,
            interval_ms,
        };
    }

    fn cancel_timer(&mut self) {
        self.timer = None;
    }
}

impl Default for MovementScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_right() -> MovementScheduler {
        let mut scheduler = MovementScheduler::new();
        assert!(scheduler.request(Direction::Right, None, 200).is_accepted());
        scheduler
    }

    #[test]
    fn test_first_intent_starts_timer() {
        let scheduler = running_right();
        assert_eq!(
            scheduler.state(),
            SchedulerState::Running {
                direction: Direction::Right,
                interval_ms: 200
            }
        );
        let timer = scheduler.timer().unwrap();
        assert_eq!(timer.interval, Duration::from_millis(200));
    }

    #[test]
    fn test_reversal_rejected_while_running() {
        let mut scheduler = running_right();
        let timer = scheduler.timer();
        assert_eq!(
            scheduler.request(Direction::Left, Some(Direction::Left), 200),
            IntentOutcome::Rejected(RejectReason::Reversal)
        );
        assert_eq!(scheduler.running_direction(), Some(Direction::Right));
        assert_eq!(scheduler.timer(), timer);
    }

    #[test]
    fn test_same_direction_is_redundant() {
        let mut scheduler = running_right();
        let timer = scheduler.timer();
        assert_eq!(
            scheduler.request(Direction::Right, Some(Direction::Left), 200),
            IntentOutcome::Rejected(RejectReason::Redundant)
        );
        assert_eq!(scheduler.timer(), timer);
    }

    #[test]
    fn test_turn_replaces_timer() {
        let mut scheduler = running_right();
        let first = scheduler.timer().unwrap();
        assert!(scheduler
            .request(Direction::Up, Some(Direction::Left), 180)
            .is_accepted());
        let second = scheduler.timer().unwrap();
        assert!(second.id > first.id);
        assert_eq!(second.interval, Duration::from_millis(180));
        assert_eq!(scheduler.running_direction(), Some(Direction::Up));
    }

    #[test]
    fn test_idle_accepts_previous_direction_but_not_reversal() {
        let mut scheduler = running_right();
        assert!(scheduler.pause());
        assert_eq!(scheduler.state(), SchedulerState::Idle);
        assert_eq!(scheduler.timer(), None);

        assert_eq!(
            scheduler.request(Direction::Left, Some(Direction::Left), 200),
            IntentOutcome::Rejected(RejectReason::Reversal)
        );
        // Same direction as before the pause is fine once idle
        assert!(scheduler
            .request(Direction::Right, Some(Direction::Left), 200)
            .is_accepted());
    }

    #[test]
    fn test_ended_ignores_everything_until_reset() {
        let mut scheduler = running_right();
        scheduler.end();
        assert!(scheduler.is_ended());
        assert_eq!(scheduler.timer(), None);
        assert_eq!(
            scheduler.request(Direction::Up, None, 200),
            IntentOutcome::Ignored
        );
        assert!(!scheduler.pause());
        assert!(!scheduler.restart_at(100));

        scheduler.reset();
        assert_eq!(scheduler.state(), SchedulerState::Idle);
        assert!(scheduler.request(Direction::Up, None, 200).is_accepted());
    }

    #[test]
    fn test_restart_at_keeps_direction() {
        let mut scheduler = running_right();
        let first = scheduler.timer().unwrap();
        assert!(!scheduler.restart_at(200));
        assert!(scheduler.restart_at(180));
        let second = scheduler.timer().unwrap();
        assert!(second.id > first.id);
        assert_eq!(scheduler.running_direction(), Some(Direction::Right));
        assert_eq!(scheduler.running_interval_ms(), Some(180));
    }

    #[test]
    fn test_restart_while_idle_is_noop() {
        let mut scheduler = MovementScheduler::new();
        assert!(!scheduler.restart_at(100));
        assert_eq!(scheduler.timer(), None);
    }
}
