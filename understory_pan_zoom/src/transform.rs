// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw and normalized representations of the viewport transform.
//!
//! The same axis-aligned transform is carried in two forms:
//!
//! - [`RawTransform`]: absolute scale and translation, the matrix the
//!   rendering surface actually applies.
//! - [`PanZoom`]: the same translation, with zoom expressed relative to a
//!   baseline [`RawTransform`] so that a zoom of `1.0` always means "the
//!   initial view".
//!
//! Conversions between the two are pure functions of the baseline and never
//! cache a derived value.

use core::fmt;

use kurbo::{Affine, Vec2};

/// Axis-aligned transform with independent X/Y scale and translation.
///
/// This is the non-skewed subset of an SVG matrix `(a, b, c, d, e, f)`:
/// `zoom_x = a`, `zoom_y = d`, `x = e`, `y = f`, with `b = c = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawTransform {
    /// Horizontal scale.
    pub zoom_x: f64,
    /// Vertical scale.
    pub zoom_y: f64,
    /// Horizontal translation.
    pub x: f64,
    /// Vertical translation.
    pub y: f64,
}

impl RawTransform {
    /// Unit scale, no translation.
    pub const IDENTITY: Self = Self::new(1.0, 1.0, 0.0, 0.0);

    /// Creates a transform from its scale and translation components.
    #[must_use]
    pub const fn new(zoom_x: f64, zoom_y: f64, x: f64, y: f64) -> Self {
        Self { zoom_x, zoom_y, x, y }
    }

    /// Creates a transform with the same scale on both axes.
    #[must_use]
    pub const fn uniform(zoom: f64, x: f64, y: f64) -> Self {
        Self::new(zoom, zoom, x, y)
    }

    /// Takes the scale and translation of `affine`, dropping any skew.
    #[must_use]
    pub fn from_affine(affine: Affine) -> Self {
        let [a, _b, _c, d, e, f] = affine.as_coeffs();
        Self::new(a, d, e, f)
    }

    /// Returns this transform as a `kurbo` affine matrix.
    #[must_use]
    pub fn to_affine(self) -> Affine {
        Affine::new([self.zoom_x, 0.0, 0.0, self.zoom_y, self.x, self.y])
    }

    /// Returns the per-axis scale.
    #[must_use]
    pub const fn zooms(self) -> Zooms {
        Zooms {
            zoom_x: self.zoom_x,
            zoom_y: self.zoom_y,
        }
    }

    /// Returns the translation.
    #[must_use]
    pub const fn pan(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Whether the zoom of `self` differs from `other`.
    ///
    /// Zoom counts as changed only when **both** axes differ. A transform
    /// that rescales a single axis is reported as zoom-unchanged.
    #[must_use]
    pub fn zoom_differs(&self, other: &Self) -> bool {
        self.zoom_x != other.zoom_x && self.zoom_y != other.zoom_y
    }

    /// Whether the translation of `self` differs from `other` on either axis.
    #[must_use]
    pub fn pan_differs(&self, other: &Self) -> bool {
        self.x != other.x || self.y != other.y
    }

    /// Whether `self` should be treated as a change relative to `other`.
    ///
    /// Combines [`zoom_differs`](Self::zoom_differs) and
    /// [`pan_differs`](Self::pan_differs).
    #[must_use]
    pub fn differs_from(&self, other: &Self) -> bool {
        self.zoom_differs(other) || self.pan_differs(other)
    }

    /// Expresses this transform relative to `baseline`.
    ///
    /// Zoom is divided by the baseline scale; translation is copied as is.
    #[must_use]
    pub fn to_pan_zoom(self, baseline: &Self) -> PanZoom {
        PanZoom {
            x: self.x,
            y: self.y,
            zoom_x: self.zoom_x / baseline.zoom_x,
            zoom_y: self.zoom_y / baseline.zoom_y,
        }
    }

    /// Inverse of [`to_pan_zoom`](Self::to_pan_zoom): anchors a normalized
    /// transform back onto `baseline`.
    #[must_use]
    pub fn from_pan_zoom(pan_zoom: PanZoom, baseline: &Self) -> Self {
        Self {
            zoom_x: pan_zoom.zoom_x * baseline.zoom_x,
            zoom_y: pan_zoom.zoom_y * baseline.zoom_y,
            x: pan_zoom.x,
            y: pan_zoom.y,
        }
    }
}

impl Default for RawTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Affine> for RawTransform {
    fn from(affine: Affine) -> Self {
        Self::from_affine(affine)
    }
}

impl From<RawTransform> for Affine {
    fn from(transform: RawTransform) -> Self {
        transform.to_affine()
    }
}

/// Formats the transform as an SVG `matrix(a b c d e f)` value.
impl fmt::Display for RawTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "matrix({} 0 0 {} {} {})",
            self.zoom_x, self.zoom_y, self.x, self.y
        )
    }
}

/// Pan/zoom view of a [`RawTransform`], zoom relative to the baseline.
///
/// This is the payload handed to [`ViewportHooks`](crate::ViewportHooks).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanZoom {
    /// Horizontal translation.
    pub x: f64,
    /// Vertical translation.
    pub y: f64,
    /// Horizontal zoom relative to the baseline.
    pub zoom_x: f64,
    /// Vertical zoom relative to the baseline.
    pub zoom_y: f64,
}

impl PanZoom {
    /// Returns the translation.
    #[must_use]
    pub const fn pan(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Returns the relative zoom on both axes.
    #[must_use]
    pub const fn zooms(self) -> Zooms {
        Zooms {
            zoom_x: self.zoom_x,
            zoom_y: self.zoom_y,
        }
    }
}

/// Per-axis zoom pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Zooms {
    /// Horizontal zoom.
    pub zoom_x: f64,
    /// Vertical zoom.
    pub zoom_y: f64,
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use kurbo::Affine;

    use super::{PanZoom, RawTransform};

    #[test]
    fn single_axis_zoom_change_is_not_a_zoom_change() {
        let active = RawTransform::uniform(2.0, 0.0, 0.0);

        let one_axis = RawTransform::new(2.0, 3.0, 0.0, 0.0);
        assert!(!one_axis.zoom_differs(&active));
        assert!(!one_axis.differs_from(&active));

        let both_axes = RawTransform::new(3.0, 3.0, 0.0, 0.0);
        assert!(both_axes.zoom_differs(&active));
    }

    #[test]
    fn single_axis_pan_change_is_a_pan_change() {
        let active = RawTransform::uniform(2.0, 0.0, 0.0);

        let moved = RawTransform::uniform(2.0, 5.0, 0.0);
        assert!(moved.pan_differs(&active));
        assert!(moved.differs_from(&active));

        let moved_y = RawTransform::uniform(2.0, 0.0, -1.0);
        assert!(moved_y.pan_differs(&active));
    }

    #[test]
    fn pan_zoom_is_relative_to_baseline() {
        let baseline = RawTransform::uniform(3.0, 50.0, 0.0);
        let raw = RawTransform::new(6.0, 1.5, 10.0, 20.0);

        let pz = raw.to_pan_zoom(&baseline);
        assert_eq!(
            pz,
            PanZoom {
                x: 10.0,
                y: 20.0,
                zoom_x: 2.0,
                zoom_y: 0.5,
            }
        );
        assert_eq!(RawTransform::from_pan_zoom(pz, &baseline), raw);
    }

    #[test]
    fn baseline_maps_to_unit_zoom() {
        let baseline = RawTransform::new(4.0, 2.5, -7.0, 3.0);
        let pz = baseline.to_pan_zoom(&baseline);
        assert_eq!(pz.zooms().zoom_x, 1.0);
        assert_eq!(pz.zooms().zoom_y, 1.0);
        assert_eq!(pz.pan(), baseline.pan());
    }

    #[test]
    fn affine_conversion_drops_skew() {
        let affine = Affine::new([2.0, 0.25, 0.5, 3.0, 4.0, 5.0]);
        let raw = RawTransform::from(affine);
        assert_eq!(raw, RawTransform::new(2.0, 3.0, 4.0, 5.0));
        assert_eq!(
            raw.to_affine().as_coeffs(),
            [2.0, 0.0, 0.0, 3.0, 4.0, 5.0]
        );
    }

    #[test]
    fn display_is_svg_matrix() {
        let raw = RawTransform::new(3.0, 3.0, 50.0, 0.5);
        assert_eq!(raw.to_string(), "matrix(3 0 0 3 50 0.5)");
    }
}
