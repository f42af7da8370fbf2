//! The transient offscreen render target a capture installs in place of the
//! display's live layer.

use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::buffer::draw_buf::PixelBuffer;
use crate::buffer::format::PixelFormat;
use crate::foundation::geometry::Area;

static NEXT_LAYER_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a render layer.
///
/// Tokens stand in for layer references wherever layer identity must be
/// stored past the layer's own lifetime, most notably in the display's
/// active-layer slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerToken(u64);

impl LayerToken {
    /// Mint a fresh token. Never returns the same value twice in a process.
    pub fn mint() -> Self {
        Self(NEXT_LAYER_TOKEN.fetch_add(1, Ordering::Relaxed))
    }
}

/// One unit of deferred rendering work enqueued against a layer.
///
/// The paint closure receives the layer's destination buffer and the task's
/// buffer-space target area when the dispatcher executes it.
pub struct DrawTask {
    area: Area,
    paint: Box<dyn FnOnce(&mut PixelBuffer, Area)>,
}

impl DrawTask {
    /// Create a task that paints into `area` (buffer-local coordinates).
    pub fn new(area: Area, paint: impl FnOnce(&mut PixelBuffer, Area) + 'static) -> Self {
        Self {
            area,
            paint: Box::new(paint),
        }
    }

    /// Buffer-space target area of the task.
    pub fn area(&self) -> Area {
        self.area
    }

    fn execute(self, buf: &mut PixelBuffer) {
        (self.paint)(buf, self.area);
    }
}

impl fmt::Debug for DrawTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawTask").field("area", &self.area).finish()
    }
}

/// A transient render target bound to exactly one capture operation.
///
/// The layer borrows the destination buffer for the duration of a single
/// capture call; it is created on the caller's stack, installed into the
/// owning display's active-layer slot and unlinked again before the call
/// returns. It is never shared across calls.
pub struct RenderLayer<'a> {
    token: LayerToken,
    buf: &'a mut PixelBuffer,
    buf_area: Area,
    clip_area: Area,
    phys_clip_area: Area,
    color_format: PixelFormat,
    tasks: VecDeque<DrawTask>,
}

impl<'a> RenderLayer<'a> {
    /// Bind `buf` as a render target mapped onto `buf_area` in logical
    /// coordinates, clipped to `clip_area`.
    pub fn new(
        buf: &'a mut PixelBuffer,
        buf_area: Area,
        clip_area: Area,
        color_format: PixelFormat,
    ) -> Self {
        Self {
            token: LayerToken::mint(),
            buf,
            buf_area,
            clip_area,
            phys_clip_area: clip_area,
            color_format,
            tasks: VecDeque::new(),
        }
    }

    /// Identity of this layer.
    pub fn token(&self) -> LayerToken {
        self.token
    }

    /// Where the buffer maps onto logical coordinates.
    pub fn buf_area(&self) -> Area {
        self.buf_area
    }

    /// Logical clip area.
    pub fn clip_area(&self) -> Area {
        self.clip_area
    }

    /// Physical clip area. Identical to the logical clip for capture layers.
    pub fn phys_clip_area(&self) -> Area {
        self.phys_clip_area
    }

    /// Target color format of the layer.
    pub fn color_format(&self) -> PixelFormat {
        self.color_format
    }

    /// The destination buffer.
    pub fn buf(&self) -> &PixelBuffer {
        self.buf
    }

    /// Mutable access to the destination buffer.
    pub fn buf_mut(&mut self) -> &mut PixelBuffer {
        self.buf
    }

    /// Translate a logical-coordinate area into buffer-local coordinates,
    /// clipped to the layer's clip area. Returns `None` when nothing of the
    /// area is visible.
    pub fn to_buf_coords(&self, area: Area) -> Option<Area> {
        let mut clipped = area.intersect(self.clip_area);
        if clipped.is_empty() {
            return None;
        }
        clipped.translate(-self.buf_area.x1, -self.buf_area.y1);
        Some(clipped)
    }

    /// Enqueue a draw task against this layer.
    pub fn push_task(&mut self, task: DrawTask) {
        self.tasks.push_back(task);
    }

    /// Number of draw tasks still waiting for dispatch.
    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Return `true` while rendering work is still queued.
    pub fn has_pending_tasks(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Execute the oldest pending task. Returns `false` when the queue is
    /// empty.
    pub fn run_next_task(&mut self) -> bool {
        match self.tasks.pop_front() {
            Some(task) => {
                task.execute(self.buf);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for RenderLayer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderLayer")
            .field("token", &self.token)
            .field("buf_area", &self.buf_area)
            .field("clip_area", &self.clip_area)
            .field("color_format", &self.color_format)
            .field("pending_tasks", &self.tasks.len())
            .finish()
    }
}
