use super::config::GameConfig;

/// Tick interval for `score`
///
/// Every `grabs_per_step` grabs shorten the interval by `increment`, down to
/// `floor_ms`. A zero `grabs_per_step` never speeds up.
pub fn tick_interval(
    score: u32,
    initial_interval: u64,
    increment: u64,
    grabs_per_step: u32,
    floor_ms: u64,
) -> u64 {
    if grabs_per_step == 0 {
        return initial_interval;
    }
    let steps = (score / grabs_per_step) as u64;
    if steps == 0 {
        return initial_interval;
    }
    initial_interval
        .saturating_sub(steps.saturating_mul(increment))
        .max(floor_ms)
}

/// Speed controller bound to a configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedController {
    initial_interval_ms: u64,
    increment_ms: u64,
    grabs_per_step: u32,
    floor_ms: u64,
}

impl SpeedController {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            initial_interval_ms: config.initial_interval_ms,
            increment_ms: config.speed_increment_ms,
            grabs_per_step: config.grabs_per_step,
            floor_ms: config.min_interval_ms,
        }
    }

    pub fn interval_for(&self, score: u32) -> u64 {
        tick_interval(
            score,
            self.initial_interval_ms,
            self.increment_ms,
            self.grabs_per_step,
            self.floor_ms,
        )
    }
}
