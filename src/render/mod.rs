//! Drawing
//!
//! [`Renderer`] paints the board onto any [`Surface`]; [`Screen`] arranges the
//! board and the HUD in a ratatui frame.

pub mod renderer;
pub mod screen;
pub mod surface;

pub use renderer::{Palette, Renderer};
pub use screen::{Screen, ScreenView};
pub use surface::{Surface, TerminalSurface};
