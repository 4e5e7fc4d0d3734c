//! Spherical Mercator projection with an extent fit.
//!
//! Geographic coordinates go through [`Mercator::project`] into unscaled
//! projected space (radians, y pointing north), then a [`FitTransform`] scales
//! and centres that space into a canvas box with y pointing down.

use std::f64::consts::FRAC_PI_4;

/// Latitude clamp keeping `ln(tan(..))` finite near the poles.
const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

#[derive(Debug, Clone, Copy, Default)]
pub struct Mercator;

impl Mercator {
    /// Project `(lon, lat)` in degrees into unscaled Mercator space.
    pub fn project(self, lon: f64, lat: f64) -> (f64, f64) {
        let lat = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
        let x = lon.to_radians();
        let y = (FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln();
        (x, y)
    }
}

/// Axis-aligned bounds in projected space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    pub fn include(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Uniform scale + translation from projected space to canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitTransform {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl FitTransform {
    /// Fit `bounds` into the canvas box `[(margin, margin), (width - margin, height - margin)]`,
    /// preserving aspect ratio and centring the shorter axis.
    pub fn fit_extent(bounds: &Bounds, width: f64, height: f64, margin: f64) -> Self {
        let box_w = (width - 2.0 * margin).max(0.0);
        let box_h = (height - 2.0 * margin).max(0.0);
        let center_x = width / 2.0;
        let center_y = height / 2.0;

        if bounds.is_empty() {
            return Self {
                scale: 1.0,
                translate_x: center_x,
                translate_y: center_y,
            };
        }

        let scale_x = (bounds.width() > 0.0).then(|| box_w / bounds.width());
        let scale_y = (bounds.height() > 0.0).then(|| box_h / bounds.height());
        let scale = match (scale_x, scale_y) {
            (Some(sx), Some(sy)) => sx.min(sy),
            (Some(s), None) | (None, Some(s)) => s,
            (None, None) => 1.0,
        };

        let mid_x = (bounds.min_x + bounds.max_x) / 2.0;
        let mid_y = (bounds.min_y + bounds.max_y) / 2.0;
        Self {
            scale,
            translate_x: center_x - scale * mid_x,
            translate_y: center_y + scale * mid_y,
        }
    }

    /// Projected space → canvas space (y flipped so north is up on screen).
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.translate_x + x * self.scale,
            self.translate_y - y * self.scale,
        )
    }
}
