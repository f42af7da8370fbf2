//! The capture pipeline: size the destination buffer, gate the color format,
//! substitute an offscreen render layer for the display's live target, replay
//! the minimal redraw, drain the draw-task queue and restore display state.

use std::time::{Duration, Instant};

use smallvec::SmallVec;

use crate::buffer::draw_buf::{ImageDescriptor, PixelBuffer, StrideMode};
use crate::buffer::format::PixelFormat;
use crate::foundation::error::{SceneshotError, SceneshotResult};
use crate::foundation::geometry::Area;
use crate::render::layer::RenderLayer;
use crate::scene::host::{DrawEvent, NodeId, RenderHost};

/// Knobs for a single capture call.
#[derive(Clone, Copy, Debug, Default)]
pub struct CaptureOpts {
    /// Upper bound on the draw-task drain. `None` waits indefinitely and
    /// relies on the dispatcher eventually emptying the queue.
    pub drain_deadline: Option<Duration>,
}

/// Snapshot output dimensions for `node`: its resolved box grown by the
/// extra-draw margin on every side. `None` when either dimension is zero.
fn snapshot_size<H: RenderHost + ?Sized>(host: &mut H, node: NodeId) -> Option<(u32, u32)> {
    host.update_layout(node);
    let ext = host.ext_draw_size(node);
    let w = host.node_width(node) + 2 * ext;
    let h = host.node_height(node) + 2 * ext;
    if w <= 0 || h <= 0 {
        return None;
    }
    Some((w as u32, h as u32))
}

/// Allocate a pixel buffer sized to hold a snapshot of `node`.
///
/// Resolves layout first so stale layout never yields a wrong-sized buffer.
/// A node with zero resolved width or height fails with
/// [`SceneshotError::SizeInvalid`]: an ordinary "nothing to capture" outcome.
pub fn create_snapshot_buf<H: RenderHost + ?Sized>(
    host: &mut H,
    node: NodeId,
    format: PixelFormat,
) -> SceneshotResult<PixelBuffer> {
    let (w, h) = snapshot_size(host, node).ok_or(SceneshotError::SizeInvalid)?;
    PixelBuffer::alloc(w, h, format, StrideMode::Auto)
}

/// Resize an existing buffer to the current snapshot dimensions of `node`,
/// reusing its storage and keeping its color format.
pub fn reshape_snapshot_buf<H: RenderHost + ?Sized>(
    host: &mut H,
    node: NodeId,
    buf: &mut PixelBuffer,
) -> SceneshotResult<()> {
    let (w, h) = snapshot_size(host, node).ok_or(SceneshotError::SizeInvalid)?;
    buf.reshape(w, h, StrideMode::Auto)
}

/// Capture `node` (and its visual descendants) into `buf` with default
/// options. See [`take_to_buf_with_opts`].
pub fn take_to_buf<H: RenderHost + ?Sized>(
    host: &mut H,
    node: NodeId,
    format: PixelFormat,
    buf: &mut PixelBuffer,
) -> SceneshotResult<()> {
    take_to_buf_with_opts(host, node, format, buf, &CaptureOpts::default())
}

/// Capture `node` (and its visual descendants) into `buf`.
///
/// The call is synchronous: it returns once every draw task enqueued against
/// the offscreen layer has executed and the buffer holds a complete image.
/// Exactly one capture operation or real display refresh may be active per
/// display at a time.
///
/// The owning display's active-layer slot and the refreshing-display slot are
/// saved, overwritten for the duration of the call and restored on every exit
/// path, success or failure.
#[tracing::instrument(level = "debug", skip(host, buf))]
pub fn take_to_buf_with_opts<H: RenderHost + ?Sized>(
    host: &mut H,
    node: NodeId,
    format: PixelFormat,
    buf: &mut PixelBuffer,
    opts: &CaptureOpts,
) -> SceneshotResult<()> {
    if !format.snapshot_supported() {
        tracing::warn!(%format, "color format not supported for snapshot capture");
        return Err(SceneshotError::format_unsupported(format));
    }

    reshape_snapshot_buf(host, node, buf)?;

    let ext = host.ext_draw_size(node);
    let mut snapshot_area = host.node_coords(node);
    snapshot_area.inflate(ext);

    // No top object means there is no prior visual content to inherit: start
    // from a cleared buffer and redraw the target itself.
    let top = match host.top_object(snapshot_area, node) {
        Some(top) => top,
        None => {
            buf.clear(None);
            node
        }
    };

    let buf_area = Area::from_size(
        snapshot_area.x1,
        snapshot_area.y1,
        buf.width() as i32,
        buf.height() as i32,
    );
    let mut layer = RenderLayer::new(buf, buf_area, snapshot_area, format);

    let display = host.display_of(node);
    let saved_refreshing = host.refreshing_display();
    let saved_layer = host.display_mut(display).install_layer(layer.token());
    host.set_refreshing_display(Some(display));

    let result = render_and_drain(host, &mut layer, node, top, opts);

    host.display_mut(display).restore_layer(saved_layer);
    host.set_refreshing_display(saved_refreshing);

    result
}

/// Convenience entry point: allocate, capture, return the populated buffer.
///
/// The allocation is dropped on any failure; there is no leak path.
pub fn take<H: RenderHost + ?Sized>(
    host: &mut H,
    node: NodeId,
    format: PixelFormat,
) -> SceneshotResult<PixelBuffer> {
    let mut buf = create_snapshot_buf(host, node, format)?;
    take_to_buf(host, node, format, &mut buf)?;
    Ok(buf)
}

/// Capture into a caller-supplied raw byte budget.
///
/// Wraps `out` as a capacity-limited buffer, runs the full pipeline, copies
/// the pixels into `out` and returns the shape descriptor addressing them.
#[deprecated(note = "use take_to_buf with an owned PixelBuffer instead")]
pub fn take_to_raw<H: RenderHost + ?Sized>(
    host: &mut H,
    node: NodeId,
    format: PixelFormat,
    out: &mut [u8],
) -> SceneshotResult<ImageDescriptor> {
    tracing::warn!("take_to_raw is deprecated, use take_to_buf with an owned PixelBuffer");
    let mut buf = PixelBuffer::with_capacity_limit(format, out.len())?;
    take_to_buf(host, node, format, &mut buf)?;
    out[..buf.data().len()].copy_from_slice(buf.data());
    Ok(buf.descriptor())
}

/// Render phase plus drain, between layer install and restore. Keeping this in
/// one function guarantees the caller restores display state no matter which
/// branch fails.
fn render_and_drain<H: RenderHost + ?Sized>(
    host: &mut H,
    layer: &mut RenderLayer<'_>,
    node: NodeId,
    top: NodeId,
    opts: &CaptureOpts,
) -> SceneshotResult<()> {
    if top == node {
        host.redraw_subtree(layer, node);
    } else {
        host.refresh_subtree(layer, top);
        composite_ancestors(host, layer, node, top);
    }
    drain_draw_tasks(host, layer, opts)
}

/// Replay sibling redraws and post-draw hooks from `top` up to and including
/// the capture target.
///
/// At each level only the children ordered after the border of progress are
/// refreshed; they are exactly the siblings that paint above the content
/// already rendered. The level owned by the target itself is processed last,
/// so the target's own decorations composite on top, then the walk stops.
fn composite_ancestors<H: RenderHost + ?Sized>(
    host: &mut H,
    layer: &mut RenderLayer<'_>,
    node: NodeId,
    top: NodeId,
) {
    let mut border = top;
    let mut parent = host.parent(top);

    while let Some(p) = parent {
        if border == node {
            break;
        }

        let children: SmallVec<[NodeId; 8]> = SmallVec::from_slice(host.children(p));
        let mut past_border = false;
        for child in children {
            if !past_border {
                past_border = child == border;
            } else {
                host.refresh_subtree(layer, child);
            }
        }

        host.send_draw_event(layer, p, DrawEvent::PostDrawBegin);
        host.send_draw_event(layer, p, DrawEvent::PostDraw);
        host.send_draw_event(layer, p, DrawEvent::PostDrawEnd);

        border = p;
        parent = host.parent(p);
    }
}

/// Block until every task enqueued against `layer` has executed.
///
/// Cooperative wait: ask the dispatcher for readiness, run one dispatch
/// cycle, re-check. With no deadline a dispatcher that never completes a task
/// hangs the capture call.
fn drain_draw_tasks<H: RenderHost + ?Sized>(
    host: &mut H,
    layer: &mut RenderLayer<'_>,
    opts: &CaptureOpts,
) -> SceneshotResult<()> {
    let started = Instant::now();
    while layer.has_pending_tasks() {
        if let Some(deadline) = opts.drain_deadline
            && started.elapsed() > deadline
        {
            tracing::warn!(pending = layer.pending_tasks(), "draw task drain timed out");
            return Err(SceneshotError::DrainTimeout);
        }
        host.wait_for_dispatch();
        host.dispatch(layer);
    }
    Ok(())
}
