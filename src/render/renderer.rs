use ratatui::style::Color;

use super::surface::Surface;
use crate::game::{GameState, Position};

/// Colors used to paint the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub head: Color,
    pub body: Color,
    pub food: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::Rgb(0x22, 0x22, 0x22),
            head: Color::Rgb(0x4c, 0xaf, 0x50),
            body: Color::Rgb(0x8b, 0xc3, 0x4a),
            food: Color::Rgb(0xff, 0x57, 0x22),
        }
    }
}

/// Paints a [`GameState`] onto a [`Surface`]. Holds no game logic.
pub struct Renderer {
    cell_size: usize,
    palette: Palette,
}

impl Renderer {
    pub fn new(cell_size: usize) -> Self {
        Self::with_palette(cell_size, Palette::default())
    }

    pub fn with_palette(cell_size: usize, palette: Palette) -> Self {
        Self { cell_size, palette }
    }

    pub fn draw(&self, state: &GameState, surface: &mut impl Surface) {
        let (width, height) = surface.size();
        surface.fill_rect(0, 0, width, height, self.palette.background);

        for (index, segment) in state.snake.body.iter().enumerate() {
            let color = if index == 0 {
                self.palette.head
            } else {
                self.palette.body
            };
            self.fill_cell(surface, *segment, color);
        }

        // A filled board leaves the last meal under the head
        if !state.snake.occupies(state.food) {
            self.fill_cell(surface, state.food, self.palette.food);
        }
    }

    /// One grid cell, leaving a one-unit gap on the right and bottom
    fn fill_cell(&self, surface: &mut impl Surface, pos: Position, color: Color) {
        if pos.x < 0 || pos.y < 0 {
            return;
        }
        let side = self.cell_size.saturating_sub(1);
        surface.fill_rect(
            pos.x as usize * self.cell_size,
            pos.y as usize * self.cell_size,
            side,
            side,
            color,
        );
    }
}
