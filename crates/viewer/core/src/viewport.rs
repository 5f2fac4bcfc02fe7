//! Zoom and pan applied on top of the configured layout.

use replay_core::{Layout, Point};

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 3.0;
const ZOOM_IN_FACTOR: f64 = 1.1;
const ZOOM_OUT_FACTOR: f64 = 0.9;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    zoom: f64,
    pan: Point,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Point::ORIGIN,
        }
    }
}

impl Viewport {
    pub const fn zoom(&self) -> f64 {
        self.zoom
    }

    pub const fn pan(&self) -> Point {
        self.pan
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_IN_FACTOR);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom * ZOOM_OUT_FACTOR);
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Shifts the view by `(dx, dy)` screen units.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan.x += dx;
        self.pan.y += dy;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// `base` scaled by the zoom level and shifted by the pan offset.
    pub fn apply(&self, base: &Layout) -> Layout {
        Layout {
            orientation: base.orientation,
            size: base.size * self.zoom,
            origin: Point::new(base.origin.x + self.pan.x, base.origin.y + self.pan.y),
        }
    }
}
