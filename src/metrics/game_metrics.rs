use std::time::{Duration, Instant};

/// Per-process play statistics shown next to the board
pub struct GameMetrics {
    last_update: Instant,
    /// Time spent with the snake moving in the current game
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    pub food_eaten: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            last_update: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            food_eaten: 0,
        }
    }

    /// Accumulate wall time, counting it only while the game is playing
    pub fn update(&mut self, playing: bool) {
        let now = Instant::now();
        if playing {
            self.elapsed_time += now.duration_since(self.last_update);
        }
        self.last_update = now;
    }

    pub fn on_game_start(&mut self) {
        self.last_update = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_food_eaten(&mut self, score: u32) {
        self.food_eaten += 1;
        self.high_score = self.high_score.max(score);
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
