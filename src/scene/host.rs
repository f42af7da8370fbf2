//! Handles and the [`RenderHost`] trait the capture pipeline drives.

use crate::foundation::geometry::Area;
use crate::render::display::Display;
use crate::render::layer::RenderLayer;

/// Non-owning handle to a scene-graph node.
///
/// Handles index into an arena owned by the host; the capture pipeline never
/// holds one past a single call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct NodeId(pub u32);

/// Non-owning handle to a physical display output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct DisplayId(pub u32);

/// Post-draw hook phases delivered to a container after its subtree painted.
///
/// Containers draw decorations such as borders and scrollbars in these
/// phases, above their children's content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DrawEvent {
    /// Post-draw sequence is starting.
    PostDrawBegin,
    /// Main post-draw content (decorations, scroll indicators).
    PostDraw,
    /// Post-draw sequence finished.
    PostDrawEnd,
}

/// Everything the capture pipeline consumes from the scene graph and its
/// rendering engine.
///
/// One host object implements the scene side (layout, geometry, hierarchy,
/// minimal-redraw resolution) and the engine side (subtree painting, draw
/// events, draw-task dispatch) because painting necessarily reads the scene.
/// Geometry accessors are only valid after [`RenderHost::update_layout`] ran
/// for the queried node.
///
/// Capture mutates the host's display-global state for the duration of one
/// call; exactly one capture operation or real display refresh may be active
/// per display at a time. The crate provides no locking.
pub trait RenderHost {
    /// Resolve pending layout so size and coordinate queries are current.
    /// Idempotent.
    fn update_layout(&mut self, node: NodeId);

    /// Resolved content width of `node`.
    fn node_width(&self, node: NodeId) -> i32;

    /// Resolved content height of `node`.
    fn node_height(&self, node: NodeId) -> i32;

    /// Extra margin around the node's box that its visual effects (shadows,
    /// outlines) may paint into.
    fn ext_draw_size(&self, node: NodeId) -> i32;

    /// Resolved bounding box of `node` in logical coordinates.
    fn node_coords(&self, node: NodeId) -> Area;

    /// Parent of `node`, `None` for a root.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Ordered children of `node`. Order is paint order: later children paint
    /// above earlier ones. The ancestor compositing walk depends on this.
    fn children(&self, node: NodeId) -> &[NodeId];

    /// Display that owns `node`'s tree.
    fn display_of(&self, node: NodeId) -> DisplayId;

    /// Mutable access to a display's render-target slot.
    fn display_mut(&mut self, display: DisplayId) -> &mut Display;

    /// Display currently being refreshed, if any. Coarse global state the
    /// rasterizer reads to locate its live context.
    fn refreshing_display(&self) -> Option<DisplayId>;

    /// Overwrite the currently-refreshing-display slot.
    fn set_refreshing_display(&mut self, display: Option<DisplayId>);

    /// Minimal-redraw resolver: the topmost object inside `node`'s subtree
    /// whose painted bounds fully and opaquely cover `area`, so that nothing
    /// beneath it contributes pixels. Returns `None` when no such object
    /// exists and the target must be drawn onto a cleared buffer.
    fn top_object(&self, area: Area, node: NodeId) -> Option<NodeId>;

    /// Paint `node` and its descendants into `layer` as a full redraw.
    fn redraw_subtree(&mut self, layer: &mut RenderLayer<'_>, node: NodeId);

    /// Refresh `node` and its descendants into `layer`, honoring the layer
    /// clip.
    fn refresh_subtree(&mut self, layer: &mut RenderLayer<'_>, node: NodeId);

    /// Deliver one post-draw hook phase to `node`.
    fn send_draw_event(&mut self, layer: &mut RenderLayer<'_>, node: NodeId, event: DrawEvent);

    /// Block until the draw dispatcher is ready to make progress. Called
    /// between dispatch cycles while draining a layer.
    fn wait_for_dispatch(&mut self) {}

    /// Run one dispatch cycle against `layer`. The default executes a single
    /// pending task synchronously.
    fn dispatch(&mut self, layer: &mut RenderLayer<'_>) {
        layer.run_next_task();
    }
}
