use crate::game::Direction;

/// Turns a stream of drag samples into direction requests.
///
/// Every sample is compared with the one before it, not with where the
/// gesture began, so a drag that bends produces a request per bend.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SwipeTracker {
    last: Option<(f32, f32)>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new gesture starts at `point`
    pub fn begin(&mut self, point: (f32, f32)) {
        self.last = Some(point);
    }

    /// The gesture ended; later samples start over
    pub fn end(&mut self) {
        self.last = None;
    }

    /// Feed the next sample and get the direction it suggests, if any
    pub fn sample(&mut self, point: (f32, f32)) -> Option<Direction> {
        let previous = self.last.replace(point)?;
        let dx = point.0 - previous.0;
        let dy = point.1 - previous.1;

        // Ties go to the vertical axis
        if dx.abs() > dy.abs() {
            if dx > 0.0 {
                Some(Direction::Right)
            } else if dx < 0.0 {
                Some(Direction::Left)
            } else {
                None
            }
        } else if dy > 0.0 {
            Some(Direction::Down)
        } else if dy < 0.0 {
            Some(Direction::Up)
        } else {
            None
        }
    }
}
