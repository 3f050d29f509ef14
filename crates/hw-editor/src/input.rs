//! Input abstraction layer.
//!
//! Normalizes mouse and touch events into a unified `InputEvent` consumed
//! by the stroke tool. Positions stay in client coordinates here; the pad
//! translates them into canvas-local space.

use hw_core::{Point, Vec2};
use smallvec::SmallVec;

/// A normalized input event from any pointing device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed (mouse down, touch start).
    PointerDown { position: Point },

    /// Pointer moved (mouse move, touch move).
    PointerMove { position: Point },

    /// Pointer released (mouse up, touch end).
    PointerUp,

    /// Pointer left the surface (mouse out).
    PointerLeave,

    /// The host aborted the gesture (touch cancel).
    Cancel,
}

impl InputEvent {
    /// Extract position if this is a positional event.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::PointerDown { position } | Self::PointerMove { position } => Some(*position),
            _ => None,
        }
    }

    /// Shift positional events by `-offset`.
    pub fn translated(self, offset: Vec2) -> Self {
        match self {
            Self::PointerDown { position } => Self::PointerDown {
                position: position - offset,
            },
            Self::PointerMove { position } => Self::PointerMove {
                position: position - offset,
            },
            other => other,
        }
    }

    /// Whether this event ends the current stroke.
    pub fn ends_stroke(&self) -> bool {
        matches!(self, Self::PointerUp | Self::PointerLeave | Self::Cancel)
    }
}

// ─── Mouse ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseKind {
    Down,
    Move,
    Up,
    /// The pointer left the canvas element.
    Out,
}

/// A raw mouse event as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseInput {
    pub kind: MouseKind,
    /// Pointer position in client coordinates.
    pub client: Point,
}

impl MouseInput {
    pub fn new(kind: MouseKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            client: Point::new(x, y),
        }
    }

    pub fn to_event(&self) -> InputEvent {
        match self.kind {
            MouseKind::Down => InputEvent::PointerDown {
                position: self.client,
            },
            MouseKind::Move => InputEvent::PointerMove {
                position: self.client,
            },
            MouseKind::Up => InputEvent::PointerUp,
            MouseKind::Out => InputEvent::PointerLeave,
        }
    }
}

// ─── Touch ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchKind {
    Start,
    Move,
    End,
    Cancel,
}

/// A raw touch event: the kind plus the active touch points, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchInput {
    pub kind: TouchKind,
    /// Active touches in client coordinates. Only the first one draws.
    pub touches: SmallVec<[Point; 2]>,
}

impl TouchInput {
    pub fn new(kind: TouchKind, touches: impl IntoIterator<Item = Point>) -> Self {
        Self {
            kind,
            touches: touches.into_iter().collect(),
        }
    }

    /// Normalize. Start/move events without any touch point carry no
    /// position and produce nothing.
    pub fn to_event(&self) -> Option<InputEvent> {
        let first = self.touches.first().copied();
        match self.kind {
            TouchKind::Start => first.map(|position| InputEvent::PointerDown { position }),
            TouchKind::Move => first.map(|position| InputEvent::PointerMove { position }),
            TouchKind::End => Some(InputEvent::PointerUp),
            TouchKind::Cancel => Some(InputEvent::Cancel),
        }
    }
}
