//! Pixel buffer model: color formats, stride rules and the owned draw buffer
//! snapshot capture renders into.

pub mod draw_buf;
pub mod format;
