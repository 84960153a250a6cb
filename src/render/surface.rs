use ratatui::{buffer::Buffer, layout::Rect, style::Color};

/// A fixed-size canvas addressed in surface units
pub trait Surface {
    /// Width and height in surface units
    fn size(&self) -> (usize, usize);

    /// Paint the rectangle at (x, y) spanning w x h units
    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: Color);
}

/// A [`Surface`] painted onto a region of a ratatui [`Buffer`].
///
/// One grid cell of `cell_size` units covers two terminal columns and one
/// row, which keeps cells roughly square in most terminal fonts. Anything
/// outside `area` is clipped.
pub struct TerminalSurface<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    width: usize,
    height: usize,
    cell_size: usize,
}

impl<'a> TerminalSurface<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect, size: (usize, usize), cell_size: usize) -> Self {
        Self {
            buf,
            area,
            width: size.0,
            height: size.1,
            cell_size: cell_size.max(1),
        }
    }

    /// Terminal columns and rows needed to show a surface of `size` units
    pub fn footprint(size: (usize, usize), cell_size: usize) -> (u16, u16) {
        let cell_size = cell_size.max(1);
        let cols = (size.0 * 2).div_ceil(cell_size);
        let rows = size.1.div_ceil(cell_size);
        (
            cols.min(u16::MAX as usize) as u16,
            rows.min(u16::MAX as usize) as u16,
        )
    }

    fn column(&self, x: usize) -> usize {
        (x * 2).div_ceil(self.cell_size)
    }

    fn row(&self, y: usize) -> usize {
        y.div_ceil(self.cell_size)
    }
}

impl Surface for TerminalSurface<'_> {
    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: Color) {
        // A terminal cell is painted when the rect covers its top-left corner
        let cols = self.column(x)..self.column(x + w);
        let rows = self.row(y)..self.row(y + h);

        for row in rows {
            if row >= self.area.height as usize {
                break;
            }
            for col in cols.clone() {
                if col >= self.area.width as usize {
                    break;
                }
                let pos = (self.area.x + col as u16, self.area.y + row as u16);
                if let Some(cell) = self.buf.cell_mut(pos) {
                    cell.set_symbol(" ").set_bg(color);
                }
            }
        }
    }
}
