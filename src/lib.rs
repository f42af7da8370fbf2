//! Sceneshot captures subtree snapshots from a retained-mode scene graph.
//!
//! Given an arbitrary node, the pipeline renders exactly what that node and
//! its visual descendants would draw on screen into a standalone
//! [`PixelBuffer`], without disturbing the live display:
//!
//! - Size the destination from the node's resolved box plus its extra-draw
//!   margin ([`create_snapshot_buf`])
//! - Gate the requested [`PixelFormat`] against what capture can target
//! - Substitute an offscreen [`RenderLayer`] for the display's live render
//!   target, replay the minimal redraw and the ancestor compositing walk
//! - Drain the draw-task queue, restore display state, hand back pixels
//!
//! The scene graph and rasterizer stay external: callers provide them through
//! the [`RenderHost`] trait.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub mod buffer;
pub mod render;
pub mod scene;
pub mod snapshot;

pub use crate::foundation::error::{SceneshotError, SceneshotResult};
pub use crate::foundation::geometry::Area;

pub use crate::buffer::draw_buf::{ImageDescriptor, PixelBuffer, STRIDE_ALIGN, StrideMode};
pub use crate::buffer::format::PixelFormat;
pub use crate::render::display::Display;
pub use crate::render::layer::{DrawTask, LayerToken, RenderLayer};
pub use crate::scene::host::{DisplayId, DrawEvent, NodeId, RenderHost};
pub use crate::snapshot::{
    CaptureOpts, create_snapshot_buf, reshape_snapshot_buf, take, take_to_buf,
    take_to_buf_with_opts,
};
#[allow(deprecated)]
pub use crate::snapshot::take_to_raw;
