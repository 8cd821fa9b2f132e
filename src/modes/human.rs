use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info, warn};

use super::ticker::TickDriver;
use crate::game::{GameConfig, GameEngine, GameError, GameStatus, TickOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{BoardCanvas, Renderer};

pub struct HumanMode {
    engine: GameEngine,
    canvas: BoardCanvas,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let engine = GameEngine::new(config).context("Failed to start game session")?;
        let mut canvas = BoardCanvas::new(engine.board().cell_size);
        engine.draw(&mut canvas);

        Ok(Self {
            engine,
            canvas,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Follows the scheduler's timer; idle until the first move
        let mut ticker = TickDriver::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            ticker.sync(self.engine.timer());

            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event)?,
                        Some(Err(err)) => warn!(%err, "terminal event error"),
                        None => self.should_quit = true,
                    }
                }

                // Movement tick
                _ = ticker.tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update(self.engine.status() == GameStatus::Playing);
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.engine, &self.canvas, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        info!(
            high_score = self.metrics.high_score,
            games = self.metrics.games_played,
            "leaving game"
        );
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::GameAction(action) => {
                    let outcome = self.engine.apply(action);
                    debug!(?action, ?outcome, "key intent");
                }
                KeyAction::TogglePause => {
                    self.engine.toggle_pause();
                }
                KeyAction::Restart => {
                    self.reset_game()?;
                }
                KeyAction::ResizeBoard(step) => {
                    self.resize_board(step);
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    fn update_game(&mut self) {
        match self.engine.tick() {
            Ok(TickOutcome::Ate { score }) => self.metrics.on_food_eaten(score),
            Ok(outcome) if outcome.is_terminal() => {
                self.metrics.on_game_over(self.engine.score())
            }
            Ok(_) => {}
            Err(err) => {
                // The engine has already stopped the timer
                warn!(%err, "game ended");
                self.metrics.on_game_over(self.engine.score());
            }
        }
        self.engine.draw(&mut self.canvas);
    }

    fn reset_game(&mut self) -> Result<()> {
        self.engine.reset().context("Failed to reset game")?;
        self.engine.draw(&mut self.canvas);
        self.metrics.on_game_start();
        Ok(())
    }

    fn resize_board(&mut self, step: i32) {
        let current = self.engine.config().clone();
        let config = GameConfig {
            columns: current.columns.saturating_add_signed(step),
            rows: current.rows.saturating_add_signed(step),
            ..current
        };

        match self.engine.reconfigure(config) {
            Ok(()) => {
                self.canvas = BoardCanvas::new(self.engine.board().cell_size);
                self.engine.draw(&mut self.canvas);
                self.metrics.on_game_start();
            }
            Err(GameError::InvalidConfiguration(reason)) => {
                debug!(%reason, "board size unchanged");
            }
            Err(err) => warn!(%err, "could not resize board"),
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mode() -> HumanMode {
        HumanMode::new(GameConfig::new(10, 8).with_seed(11)).unwrap()
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert_eq!(mode.engine.status(), GameStatus::Paused);
        assert_eq!(mode.engine.score(), 0);
        assert!(mode.engine.timer().is_none());
        // Snake and food are already painted
        assert_eq!(mode.canvas.painted_cells(), 5);
    }

    #[test]
    fn test_arrow_key_starts_movement() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Up)).unwrap();
        assert_eq!(mode.engine.status(), GameStatus::Playing);
        assert!(mode.engine.timer().is_some());

        mode.handle_event(key(KeyCode::Char(' '))).unwrap();
        assert_eq!(mode.engine.status(), GameStatus::Paused);
    }

    #[test]
    fn test_game_reset() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Right)).unwrap();
        for _ in 0..20 {
            mode.update_game();
        }
        assert_eq!(mode.engine.status(), GameStatus::GameOver);
        assert_eq!(mode.metrics.games_played, 1);

        mode.handle_event(key(KeyCode::Char('r'))).unwrap();
        assert_eq!(mode.engine.status(), GameStatus::Paused);
        assert_eq!(mode.engine.score(), 0);
    }

    #[test]
    fn test_resize_board() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Char('+'))).unwrap();
        assert_eq!(mode.engine.config().columns, 11);
        assert_eq!(mode.engine.config().rows, 9);
        assert_eq!(mode.canvas.columns(), 11);

        // Shrinking below the minimum board is refused
        let mut small = HumanMode::new(GameConfig::new(6, 3).with_seed(1)).unwrap();
        small.handle_event(key(KeyCode::Char('-'))).unwrap();
        assert_eq!(small.engine.config().columns, 6);
        assert_eq!(small.engine.config().rows, 3);
    }

    #[test]
    fn test_quit_key() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Char('q'))).unwrap();
        assert!(mode.should_quit);
    }
}
