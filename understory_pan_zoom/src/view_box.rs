// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The logical coordinate rectangle mapped onto the viewport.

use alloc::string::ToString;

use kurbo::{Rect, Size};

use crate::error::{ViewBoxIssue, ViewportError};
use crate::transform::RawTransform;

/// Logical rectangle `(x, y, width, height)` shown by the viewport.
///
/// Captured once when a [`ShadowViewport`](crate::ShadowViewport) is created,
/// either from the surface's `viewBox` attribute or from its natural bounding
/// box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewBox {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width in logical units.
    pub width: f64,
    /// Height in logical units.
    pub height: f64,
}

impl ViewBox {
    /// Creates a view box from its origin and size.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Parses an SVG `viewBox` attribute.
    ///
    /// Values may be separated by whitespace, commas, or both. Only the first
    /// four values are read; anything after them is ignored. Each value is
    /// read from its longest numeric prefix, so trailing units such as
    /// `100px` are skipped. A value with no numeric prefix, or fewer than
    /// four values, is an error.
    ///
    /// ```
    /// use understory_pan_zoom::ViewBox;
    ///
    /// let vb = ViewBox::parse("0, 0 100 50").unwrap();
    /// assert_eq!(vb, ViewBox::new(0.0, 0.0, 100.0, 50.0));
    /// ```
    pub fn parse(attribute: &str) -> Result<Self, ViewportError> {
        let invalid = |reason| ViewportError::InvalidViewBox {
            attribute: attribute.to_string(),
            reason,
        };

        let mut values = [0.0_f64; 4];
        let mut found = 0;
        let pieces = attribute
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|piece| !piece.is_empty());
        for (slot, piece) in values.iter_mut().zip(pieces) {
            *slot = leading_number(piece)
                .ok_or_else(|| invalid(ViewBoxIssue::NotANumber(found)))?;
            found += 1;
        }
        if found < 4 {
            return Err(invalid(ViewBoxIssue::TooFewValues(found)));
        }

        let [x, y, width, height] = values;
        Ok(Self::new(x, y, width, height))
    }

    /// Returns the view box as a `kurbo` rectangle.
    #[must_use]
    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Returns the width and height.
    #[must_use]
    pub const fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Computes the transform that fits this view box into `viewport`.
    ///
    /// The scale is uniform, the smaller of the two axis ratios, and the
    /// scaled box is centered in the remaining space. Degenerate boxes are
    /// not rejected; a zero extent yields an infinite scale.
    #[must_use]
    pub fn fit(self, viewport: Size) -> RawTransform {
        let zoom = (viewport.width / self.width).min(viewport.height / self.height);
        RawTransform::uniform(
            zoom,
            (viewport.width - self.width * zoom) / 2.0,
            (viewport.height - self.height * zoom) / 2.0,
        )
    }
}

/// Parses the longest prefix of `piece` that is a number.
fn leading_number(piece: &str) -> Option<f64> {
    piece
        .char_indices()
        .map(|(start, c)| start + c.len_utf8())
        .rev()
        .find_map(|end| piece[..end].parse().ok())
}

impl From<Rect> for ViewBox {
    fn from(rect: Rect) -> Self {
        Self::new(rect.x0, rect.y0, rect.width(), rect.height())
    }
}

impl From<ViewBox> for Rect {
    fn from(view_box: ViewBox) -> Self {
        view_box.to_rect()
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Rect, Size};

    use super::ViewBox;
    use crate::error::{ViewBoxIssue, ViewportError};
    use crate::transform::RawTransform;

    #[test]
    fn parse_accepts_mixed_separators() {
        assert_eq!(
            ViewBox::parse("  -10,20   300,\t400 ").unwrap(),
            ViewBox::new(-10.0, 20.0, 300.0, 400.0)
        );
        assert_eq!(
            ViewBox::parse("0 0 1.5e2 75").unwrap(),
            ViewBox::new(0.0, 0.0, 150.0, 75.0)
        );
    }

    #[test]
    fn parse_skips_trailing_units() {
        assert_eq!(
            ViewBox::parse("0 0 100px 50.5pt").unwrap(),
            ViewBox::new(0.0, 0.0, 100.0, 50.5)
        );
        assert_eq!(
            ViewBox::parse("-1e2x,2.,3 4").unwrap(),
            ViewBox::new(-100.0, 2.0, 3.0, 4.0)
        );
    }

    #[test]
    fn parse_rejects_short_attribute() {
        let err = ViewBox::parse("0 0 100").unwrap_err();
        assert!(matches!(
            err,
            ViewportError::InvalidViewBox {
                reason: ViewBoxIssue::TooFewValues(3),
                ..
            }
        ));
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = ViewBox::parse("0 0 wide 100").unwrap_err();
        assert!(matches!(
            err,
            ViewportError::InvalidViewBox {
                reason: ViewBoxIssue::NotANumber(2),
                ..
            }
        ));
    }

    #[test]
    fn fit_centers_on_the_short_axis() {
        let vb = ViewBox::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(
            vb.fit(Size::new(400.0, 300.0)),
            RawTransform::uniform(3.0, 50.0, 0.0)
        );
        assert_eq!(
            vb.fit(Size::new(200.0, 400.0)),
            RawTransform::uniform(2.0, 0.0, 100.0)
        );
    }

    #[test]
    fn rect_conversion_keeps_origin_and_size() {
        let rect = Rect::new(5.0, 10.0, 25.0, 50.0);
        let vb = ViewBox::from(rect);
        assert_eq!(vb, ViewBox::new(5.0, 10.0, 20.0, 40.0));
        assert_eq!(Rect::from(vb), rect);
    }
}
