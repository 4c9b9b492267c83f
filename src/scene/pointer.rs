use std::cell::Cell;
use std::rc::Rc;

use crate::foundation::core::Point;
use crate::host::input::PointerEvent;

/// Latest pointer target in surface-relative coordinates.
///
/// Clones share the same cell: an input handler can hold one clone and write to it while the
/// frame loop reads through another. Only the most recent position is kept.
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    target: Rc<Cell<Point>>,
}

impl PointerTracker {
    /// Tracker seeded at `initial`.
    pub fn new(initial: Point) -> Self {
        Self {
            target: Rc::new(Cell::new(initial)),
        }
    }

    /// Current target.
    pub fn target(&self) -> Point {
        self.target.get()
    }

    /// Overwrite the target. Out-of-bounds positions are stored as-is.
    pub fn set_target(&self, p: Point) {
        self.target.set(p);
    }

    /// Convert an absolute event position to surface space and store it.
    ///
    /// Returns `false` when the event carries no position (a touch event with no touches).
    pub fn handle_event(&self, event: &PointerEvent, surface_origin: Point) -> bool {
        let Some(client) = event.client_position() else {
            return false;
        };
        self.set_target(Point::new(
            client.x - surface_origin.x,
            client.y - surface_origin.y,
        ));
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/pointer.rs"]
mod tests;
