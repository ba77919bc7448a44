// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binding to the rendering surface.

use alloc::string::String;

use kurbo::Rect;

use crate::transform::RawTransform;

/// The element whose transform a [`ShadowViewport`](crate::ShadowViewport)
/// owns.
///
/// For SVG this is the viewport group inside the root `<svg>` element; the
/// DOM plumbing lives in the implementor. Implementations for test doubles
/// are typically a handful of fields.
pub trait Surface {
    /// Returns the transform currently applied to the surface.
    ///
    /// Read once, when the viewport is created.
    fn current_transform(&self) -> RawTransform;

    /// Writes `transform` to the surface.
    ///
    /// Called once per accepted flush. Values are passed through unchecked.
    fn apply_transform(&mut self, transform: RawTransform);

    /// Returns the natural bounding box of the surface content, in its own
    /// coordinates.
    fn bounding_box(&self) -> Rect;

    /// Returns the on-screen rectangle the surface currently occupies.
    fn rendered_rect(&self) -> Rect;

    /// Returns the surface's `viewBox` attribute, if it has one.
    fn view_box_attribute(&self) -> Option<String>;

    /// Removes the `viewBox` attribute from the surface.
    ///
    /// Called once the attribute has been parsed, when the viewport takes
    /// over the transform; the surface must stop applying its own view box
    /// scaling from then on.
    fn clear_view_box_attribute(&mut self);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn current_transform(&self) -> RawTransform {
        (**self).current_transform()
    }

    fn apply_transform(&mut self, transform: RawTransform) {
        (**self).apply_transform(transform);
    }

    fn bounding_box(&self) -> Rect {
        (**self).bounding_box()
    }

    fn rendered_rect(&self) -> Rect {
        (**self).rendered_rect()
    }

    fn view_box_attribute(&self) -> Option<String> {
        (**self).view_box_attribute()
    }

    fn clear_view_box_attribute(&mut self) {
        (**self).clear_view_box_attribute();
    }
}
