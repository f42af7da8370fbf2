//! The display-global render-target slot capture saves and restores.

use crate::render::layer::LayerToken;

/// Per-physical-output render state the rasterizer observes.
///
/// Each display owns one mutable active-layer slot: the render target that
/// drawing currently lands in. A snapshot capture temporarily points this slot
/// at its offscreen layer and must restore the previous value on every exit
/// path; [`crate::snapshot::take_to_buf`] centralizes that discipline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Display {
    active_layer: Option<LayerToken>,
}

impl Display {
    /// A display with no active layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently installed render target, if any.
    pub fn active_layer(&self) -> Option<LayerToken> {
        self.active_layer
    }

    /// Install `layer` as the active render target, returning the displaced
    /// value so the caller can restore it later.
    pub fn install_layer(&mut self, layer: LayerToken) -> Option<LayerToken> {
        self.active_layer.replace(layer)
    }

    /// Put a previously displaced active-layer value back.
    pub fn restore_layer(&mut self, saved: Option<LayerToken>) {
        self.active_layer = saved;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_and_restore_are_symmetric() {
        let mut disp = Display::new();
        let live = LayerToken::mint();
        disp.install_layer(live);

        let capture = LayerToken::mint();
        let saved = disp.install_layer(capture);
        assert_eq!(disp.active_layer(), Some(capture));

        disp.restore_layer(saved);
        assert_eq!(disp.active_layer(), Some(live));
    }
}
