use anyhow::{Context, Result};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{debug, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::controller::{GameController, GameOverReason, Phase, TickOutcome};
use crate::game::GameConfig;
use crate::input::{InputHandler, KeyAction, SwipeTracker};
use crate::metrics::GameMetrics;
use crate::render::{Screen, ScreenView};
use crate::schedule::IntervalScheduler;
use crate::storage::{JsonFileStore, KeyValueStore};

/// One wake-up of the game loop
enum LoopEvent {
    Terminal(Option<std::io::Result<Event>>),
    Tick,
    Clock,
    Quit,
}

pub struct HumanMode<K: KeyValueStore = JsonFileStore> {
    controller: GameController<IntervalScheduler, K>,
    metrics: GameMetrics,
    screen: Screen,
    input_handler: InputHandler,
    swipe: SwipeTracker,
    notice: Option<String>,
    should_quit: bool,
    needs_redraw: bool,
}

impl<K: KeyValueStore> HumanMode<K> {
    pub fn new(config: GameConfig, store: K) -> Result<Self> {
        let screen = Screen::new(&config);
        let controller = GameController::new(config, IntervalScheduler::new(), store)
            .context("Failed to set up the game")?;

        Ok(Self {
            controller,
            metrics: GameMetrics::new(),
            screen,
            input_handler: InputHandler::new(),
            swipe: SwipeTracker::new(),
            notice: None,
            should_quit: false,
            needs_redraw: true,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
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

        // Keeps the HUD clock moving between ticks
        let mut clock = interval(Duration::from_secs(1));

        info!("entering game loop");
        while !self.should_quit {
            if self.needs_redraw {
                self.draw(terminal)?;
            }

            let event = tokio::select! {
                maybe_event = event_stream.next() => LoopEvent::Terminal(maybe_event),
                _ = self.controller.scheduler_mut().tick() => LoopEvent::Tick,
                _ = clock.tick() => LoopEvent::Clock,
                _ = tokio::signal::ctrl_c() => LoopEvent::Quit,
            };

            match event {
                LoopEvent::Terminal(Some(Ok(event))) => self.handle_event(event)?,
                LoopEvent::Terminal(Some(Err(e))) => {
                    return Err(e).context("Failed to read terminal event");
                }
                LoopEvent::Terminal(None) | LoopEvent::Quit => self.should_quit = true,
                LoopEvent::Tick => self.on_tick(),
                LoopEvent::Clock => {
                    if self.metrics.running {
                        self.metrics.update();
                        self.needs_redraw = true;
                    }
                }
            }
        }

        info!("leaving game loop");
        Ok(())
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        self.metrics.update();
        let view = ScreenView {
            state: self.controller.state(),
            phase: self.controller.phase(),
            high_score: self.controller.high_score(),
            metrics: &self.metrics,
            notice: self.notice.as_deref(),
        };
        terminal
            .draw(|frame| self.screen.render(frame, &view))
            .context("Failed to draw frame")?;
        self.needs_redraw = false;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            // Only process key press events, not release
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key)?,
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(_, _) => self.needs_redraw = true,
            _ => {}
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let action = self.input_handler.handle_key_event(key);

        // The notice is modal: a key press only dismisses it
        if self.notice.is_some() && action != KeyAction::Quit {
            self.notice = None;
            self.needs_redraw = true;
            return Ok(());
        }

        match action {
            KeyAction::Steer(direction) => {
                if self.controller.request_direction(direction) {
                    debug!("pending direction {:?}", direction);
                }
            }
            KeyAction::Start => {
                if self.controller.start() {
                    self.metrics.on_game_start();
                    self.needs_redraw = true;
                }
            }
            KeyAction::Reset => self.reset_game()?,
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }

        Ok(())
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        // Rows are about twice as tall as columns are wide
        let point = (mouse.column as f32, mouse.row as f32 * 2.0);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.swipe.begin(point),
            MouseEventKind::Drag(MouseButton::Left) if self.controller.is_running() => {
                if let Some(direction) = self.swipe.sample(point) {
                    if self.controller.request_direction(direction) {
                        debug!("pending direction {:?} from drag", direction);
                    }
                }
            }
            MouseEventKind::Up(MouseButton::Left) => self.swipe.end(),
            _ => {}
        }
    }

    fn on_tick(&mut self) {
        match self.controller.tick() {
            TickOutcome::Idle => {}
            TickOutcome::Moved { .. } => self.needs_redraw = true,
            TickOutcome::GameOver {
                final_score,
                reason,
            } => {
                self.metrics.on_game_over();
                self.notice = Some(match reason {
                    GameOverReason::Collision(_) => format!("Game over! Score: {}", final_score),
                    GameOverReason::BoardFilled => {
                        format!("Board filled!\nScore: {}", final_score)
                    }
                });
                self.needs_redraw = true;
            }
        }
    }

    fn reset_game(&mut self) -> Result<()> {
        self.controller.reset().context("Failed to reset the game")?;
        self.metrics.on_reset();
        self.swipe.end();
        self.notice = None;
        self.needs_redraw = true;
        Ok(())
    }

    pub fn phase(&self) -> Phase {
        self.controller.phase()
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;
    use crate::storage::MemoryStore;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn mode() -> HumanMode<MemoryStore> {
        HumanMode::new(GameConfig::default(), MemoryStore::new()).unwrap()
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert_eq!(mode.phase(), Phase::Idle);
        assert_eq!(mode.controller.state().score, 0);
        assert!(mode.notice.is_none());
    }

    #[test]
    fn test_steering_ignored_before_start() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Up)).unwrap();
        assert_eq!(mode.controller.state().pending_direction, None);
    }

    #[tokio::test]
    async fn test_start_and_steer_with_keys() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Char(' '))).unwrap();
        assert_eq!(mode.phase(), Phase::Running);
        assert!(mode.metrics.running);

        mode.handle_event(key(KeyCode::Left)).unwrap();
        assert_eq!(
            mode.controller.state().pending_direction,
            Some(Direction::Right)
        );

        mode.handle_event(key(KeyCode::Char('w'))).unwrap();
        assert_eq!(mode.controller.state().pending_direction, Some(Direction::Up));
    }

    #[tokio::test]
    async fn test_drag_steers() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Enter)).unwrap();

        mode.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 10, 5))
            .unwrap();
        mode.handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), 11, 7))
            .unwrap();
        assert_eq!(
            mode.controller.state().pending_direction,
            Some(Direction::Down)
        );

        // Sideways drag that would reverse the current direction is rejected
        mode.handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), 4, 7))
            .unwrap();
        assert_eq!(
            mode.controller.state().pending_direction,
            Some(Direction::Down)
        );
    }

    #[tokio::test]
    async fn test_drag_before_start_keeps_gesture_origin() {
        let mut mode = mode();
        mode.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 10, 5))
            .unwrap();
        mode.handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), 10, 9))
            .unwrap();
        assert_eq!(mode.controller.state().pending_direction, None);

        // Measured from the press, not from the ignored drag, this is downward
        mode.handle_event(key(KeyCode::Enter)).unwrap();
        mode.handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), 11, 9))
            .unwrap();
        assert_eq!(
            mode.controller.state().pending_direction,
            Some(Direction::Down)
        );
    }

    #[tokio::test]
    async fn test_game_over_raises_modal_notice() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Char(' '))).unwrap();

        // Heading right from the center hits the wall within the grid width
        for _ in 0..=20 {
            mode.on_tick();
            if mode.phase() == Phase::GameOver {
                break;
            }
        }

        assert_eq!(mode.phase(), Phase::GameOver);
        assert_eq!(mode.metrics.games_played, 1);
        let notice = mode.notice.clone().unwrap();
        assert!(notice.starts_with("Game over! Score: "));

        // First key only dismisses the notice
        mode.handle_event(key(KeyCode::Char('r'))).unwrap();
        assert!(mode.notice.is_none());
        assert_eq!(mode.phase(), Phase::GameOver);

        mode.handle_event(key(KeyCode::Char('r'))).unwrap();
        assert_eq!(mode.phase(), Phase::Idle);
        assert_eq!(mode.controller.state().score, 0);
    }

    #[test]
    fn test_quit_keys() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Char('q'))).unwrap();
        assert!(mode.should_quit);
    }
}
