//! Transient render targets: the offscreen layer a capture draws into and the
//! display slot the rasterizer observes.

pub mod display;
pub mod layer;
