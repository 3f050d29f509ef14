//! Freehand stroke tool.
//!
//! Translates canvas-local input events into surface ops. The tool keeps no
//! geometry of its own: the surface's current path is the only record of
//! where the pen is.
//!
//! | State   | Down            | Move                  | Up / Leave / Cancel |
//! |---------|-----------------|-----------------------|---------------------|
//! | Idle    | dot → Drawing   | —                     | reset path          |
//! | Drawing | dot (restart)   | segment               | reset path → Idle   |

use crate::input::InputEvent;
use hw_core::Point;
use hw_render::SurfaceOp;
use smallvec::{SmallVec, smallvec};

/// Ops produced by a single event. Six covers the longest (a down).
pub type Ops = SmallVec<[SurfaceOp; 6]>;

/// Whether movement should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawingState {
    #[default]
    Idle,
    Drawing,
}

#[derive(Debug, Default)]
pub struct StrokeTool {
    state: DrawingState,
}

impl StrokeTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DrawingState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        self.state == DrawingState::Drawing
    }

    /// Force the tool back to idle without emitting ops.
    pub fn reset(&mut self) {
        self.state = DrawingState::Idle;
    }

    /// Handle a canvas-local input event.
    pub fn handle(&mut self, event: &InputEvent) -> Ops {
        match *event {
            InputEvent::PointerDown { position } => {
                self.state = DrawingState::Drawing;
                log::debug!("stroke begin at ({}, {})", position.x, position.y);
                begin_ops(position)
            }
            InputEvent::PointerMove { position } => {
                if !self.is_drawing() {
                    return Ops::new();
                }
                log::trace!("stroke segment to ({}, {})", position.x, position.y);
                segment_ops(position)
            }
            InputEvent::PointerUp | InputEvent::PointerLeave | InputEvent::Cancel => {
                if self.is_drawing() {
                    log::debug!("stroke end ({event:?})");
                }
                self.state = DrawingState::Idle;
                // Always reset, so the next stroke never joins this one.
                smallvec![SurfaceOp::BeginPath]
            }
        }
    }
}

/// Fresh path with a zero-length segment at `p`, then park the cursor there.
fn begin_ops(p: Point) -> Ops {
    smallvec![
        SurfaceOp::BeginPath,
        SurfaceOp::MoveTo(p),
        SurfaceOp::LineTo(p),
        SurfaceOp::Stroke,
        SurfaceOp::BeginPath,
        SurfaceOp::MoveTo(p),
    ]
}

/// Segment from the cursor to `p`, stroked alone so each vertex gets round caps.
fn segment_ops(p: Point) -> Ops {
    smallvec![
        SurfaceOp::LineTo(p),
        SurfaceOp::Stroke,
        SurfaceOp::BeginPath,
        SurfaceOp::MoveTo(p),
    ]
}
