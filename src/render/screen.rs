use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::renderer::Renderer;
use super::surface::TerminalSurface;
use crate::controller::Phase;
use crate::game::{GameConfig, GameState};
use crate::metrics::GameMetrics;

/// Everything the screen shows for one frame
pub struct ScreenView<'a> {
    pub state: &'a GameState,
    pub phase: Phase,
    pub high_score: u32,
    pub metrics: &'a GameMetrics,
    /// Modal message drawn over the board
    pub notice: Option<&'a str>,
}

/// Lays out the HUD around the board and hands the board to [`Renderer`]
pub struct Screen {
    board: Renderer,
    surface_size: (usize, usize),
    cell_size: usize,
}

impl Screen {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            board: Renderer::new(config.cell_size),
            surface_size: (config.surface_width, config.surface_height),
            cell_size: config.cell_size,
        }
    }

    pub fn render(&self, frame: &mut Frame, view: &ScreenView) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(view), chunks[0]);

        let (cols, rows) = TerminalSurface::footprint(self.surface_size, self.cell_size);
        let board_area = centered(chunks[1], cols.saturating_add(2), rows.saturating_add(2));
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::White))
            .title(" Snake ");
        let inner = block.inner(board_area);
        frame.render_widget(block, board_area);

        let mut surface =
            TerminalSurface::new(frame.buffer_mut(), inner, self.surface_size, self.cell_size);
        self.board.draw(view.state, &mut surface);

        if let Some(notice) = view.notice {
            let popup = centered(board_area, 32, 7);
            frame.render_widget(Clear, popup);
            frame.render_widget(self.render_notice(notice), popup);
        }

        frame.render_widget(self.render_controls(view.phase), chunks[2]);
    }

    fn render_stats(&self, view: &ScreenView) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(view.state.score.to_string(), value),
            Span::raw("    "),
            Span::styled("High Score: ", label),
            Span::styled(view.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(
                format!("{}ms", view.state.tick_interval.as_millis()),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(view.metrics.format_time(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Games: ", label),
            Span::styled(
                view.metrics.games_played.to_string(),
                Style::default().fg(Color::White),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_notice(&self, notice: &str) -> Paragraph<'_> {
        let mut text = vec![Line::from("")];
        text.extend(notice.lines().map(|line| {
            Line::from(Span::styled(
                line.to_string(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ))
        }));
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(
            "press any key",
            Style::default().fg(Color::Gray),
        )));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, phase: Phase) -> Paragraph<'_> {
        let key = |k: &'static str, color: Color| Span::styled(k, Style::default().fg(color));

        let spans = match phase {
            Phase::Idle => vec![
                key("Space", Color::Green),
                Span::raw(" to start | "),
                key("↑↓←→", Color::Cyan),
                Span::raw(" / "),
                key("WASD", Color::Cyan),
                Span::raw(" / drag to steer | "),
                key("Q", Color::Red),
                Span::raw(" to quit"),
            ],
            Phase::Running => vec![
                key("↑↓←→", Color::Cyan),
                Span::raw(" / "),
                key("WASD", Color::Cyan),
                Span::raw(" / drag to steer | "),
                key("R", Color::Yellow),
                Span::raw(" to reset | "),
                key("Q", Color::Red),
                Span::raw(" to quit"),
            ],
            Phase::GameOver => vec![
                key("R", Color::Green),
                Span::raw(" to reset | "),
                key("Q", Color::Red),
                Span::raw(" to quit"),
            ],
        };

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }
}

/// A `width` x `height` rect in the middle of `area`, shrunk to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Position, Snake};
    use ratatui::{Terminal, backend::TestBackend};
    use std::time::Duration;

    fn screen_text(view: &ScreenView) -> String {
        let config = GameConfig::default();
        let screen = Screen::new(&config);
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| screen.render(frame, view)).unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn state() -> GameState {
        let mut state = GameState::new(
            Snake::new(Position::new(10, 10)),
            Position::new(2, 2),
            20,
            20,
            Duration::from_millis(98),
        );
        state.score = 20;
        state
    }

    #[test]
    fn test_header_shows_scores_and_speed() {
        let state = state();
        let mut metrics = GameMetrics::new();
        metrics.games_played = 7;
        let text = screen_text(&ScreenView {
            state: &state,
            phase: Phase::Running,
            high_score: 140,
            metrics: &metrics,
            notice: None,
        });

        assert!(text.contains("Score: 20"));
        assert!(text.contains("High Score: 140"));
        assert!(text.contains("Speed: 98ms"));
        assert!(text.contains("Time: 00:00"));
        assert!(text.contains("Games: 7"));
        assert!(text.contains("Snake"));
        assert!(!text.contains("press any key"));
    }

    #[test]
    fn test_notice_is_drawn_over_board() {
        let state = state();
        let metrics = GameMetrics::new();
        let text = screen_text(&ScreenView {
            state: &state,
            phase: Phase::GameOver,
            high_score: 20,
            metrics: &metrics,
            notice: Some("Game over! Score: 20"),
        });

        assert!(text.contains("Game over! Score: 20"));
        assert!(text.contains("press any key"));
        assert!(text.contains("to reset"));
    }

    #[test]
    fn test_centered_shrinks_to_fit() {
        let area = Rect::new(0, 0, 10, 4);
        assert_eq!(centered(area, 4, 2), Rect::new(3, 1, 4, 2));
        assert_eq!(centered(area, 40, 20), area);
    }
}
