// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport configuration.

use kurbo::Size;

use crate::schedule::RefreshRate;

/// Configuration for a [`ShadowViewport`](crate::ShadowViewport).
///
/// ```
/// use kurbo::Size;
/// use understory_pan_zoom::{RefreshRate, ViewportOptions};
///
/// let options = ViewportOptions::new(Size::new(400.0, 300.0))
///     .with_refresh_rate(RefreshRate::Hz(30.0));
/// assert_eq!(options.size.width, 400.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportOptions {
    /// Size of the viewport in device pixels.
    ///
    /// A `viewBox` found on the surface is fitted into this size.
    pub size: Size,
    /// Upper bound on how often the surface is written.
    ///
    /// Consumed by [`FrameThrottle::new`](crate::FrameThrottle::new) when
    /// the viewport builds its own scheduler.
    pub refresh_rate: RefreshRate,
}

impl ViewportOptions {
    /// Options for a viewport of `size`, flushing on every frame.
    #[must_use]
    pub const fn new(size: Size) -> Self {
        Self {
            size,
            refresh_rate: RefreshRate::Auto,
        }
    }

    /// Sets the viewport size.
    #[must_use]
    pub const fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Sets the refresh rate.
    #[must_use]
    pub const fn with_refresh_rate(mut self, refresh_rate: RefreshRate) -> Self {
        self.refresh_rate = refresh_rate;
        self
    }
}
