use crate::foundation::core::Point;

/// Global pointer input in absolute client coordinates.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    /// Mouse or pen movement.
    Move {
        /// Pointer position.
        client: Point,
    },
    /// Touch movement; only the first active touch is tracked.
    Touch {
        /// Active touch points, in platform order.
        touches: Vec<Point>,
    },
}

impl PointerEvent {
    /// Client position this event reports, if any.
    pub fn client_position(&self) -> Option<Point> {
        match self {
            Self::Move { client } => Some(*client),
            Self::Touch { touches } => touches.first().copied(),
        }
    }
}

/// Page visibility as reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// The page is on screen.
    Visible,
    /// The page is in a background tab or minimized.
    Hidden,
}
