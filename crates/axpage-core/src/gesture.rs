//! Touch gesture construction.
//!
//! A gesture is a simulated press-move-release sequence. Coordinates are
//! computed from an element's frame at the moment the gesture is built, so
//! they go stale if the UI shifts before the gesture runs.

use std::time::Duration;

use crate::driver::{AutomationDriver, DriverError};
use crate::element::ElementFrame;

/// Default duration between press and release for a row-reveal swipe.
pub const ROW_REVEAL_DURATION: Duration = Duration::from_secs(3);

/// A press-move-release gesture between two screen points.
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeGesture {
    /// Press point x-coordinate.
    pub start_x: i32,
    /// Press point y-coordinate.
    pub start_y: i32,
    /// Release point x-coordinate.
    pub end_x: i32,
    /// Release point y-coordinate.
    pub end_y: i32,
    /// Time between press and release.
    pub duration: Duration,
}

impl SwipeGesture {
    /// A gesture between two explicit points.
    pub fn between(start: (i32, i32), end: (i32, i32), duration: Duration) -> Self {
        Self {
            start_x: start.0,
            start_y: start.1,
            end_x: end.0,
            end_y: end.1,
            duration,
        }
    }

    /// A horizontal swipe across a table row, right edge to left edge.
    ///
    /// This is the gesture iOS table views interpret as "reveal row actions".
    /// The press lands one point inside the top-right corner and releases one
    /// point inside the top-left corner, over [`ROW_REVEAL_DURATION`].
    pub fn row_reveal(frame: &ElementFrame) -> Self {
        let right_top = ((frame.x + frame.width) as i32, frame.y as i32);
        let left_top = (frame.x as i32, frame.y as i32);
        Self::between(
            (right_top.0 - 1, right_top.1 + 1),
            (left_top.0 + 1, left_top.1 + 1),
            ROW_REVEAL_DURATION,
        )
    }

    /// Runs the gesture on the given driver.
    pub async fn perform(&self, driver: &dyn AutomationDriver) -> Result<(), DriverError> {
        driver
            .swipe(
                self.start_x,
                self.start_y,
                self.end_x,
                self.end_y,
                Some(self.duration.as_secs_f64()),
            )
            .await
    }
}
