// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-bounded flush scheduling.
//!
//! A [`ShadowViewport`](crate::ShadowViewport) never writes to its surface
//! from inside [`propose`](crate::ShadowViewport::propose). It hands a
//! [`FlushRequest`] to its [`FrameScheduler`] and the host's frame loop
//! later feeds frame timestamps into
//! [`ShadowViewport::on_frame`](crate::ShadowViewport::on_frame), which asks
//! the scheduler whether the request is due.
//!
//! ```text
//!   propose() ──► FrameScheduler::schedule(request)
//!                          │
//!   frame tick ──► on_frame(now) ──► take_due(now) ──► flush(request)
//! ```
//!
//! [`FrameThrottle`] is the stock scheduler: it holds a single pending
//! request and releases it on the first frame that respects the configured
//! [`RefreshRate`].

use core::sync::atomic::{AtomicUsize, Ordering};
use core::time::Duration;

/// Identity of one viewport instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ViewportId(usize);

impl ViewportId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicUsize = AtomicUsize::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Token asking for one flush of a specific viewport.
///
/// Every request a viewport issues is equal to every other request from the
/// same viewport, so schedulers can tell "already queued" apart from "new"
/// by comparing tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FlushRequest {
    viewport: ViewportId,
}

impl FlushRequest {
    pub(crate) const fn new(viewport: ViewportId) -> Self {
        Self { viewport }
    }

    /// The viewport that issued this request.
    #[must_use]
    pub const fn viewport(self) -> ViewportId {
        self.viewport
    }
}

/// Defers flushes to the next frame opportunity.
pub trait FrameScheduler {
    /// Queues `request` for a later frame.
    ///
    /// The viewport never schedules while one of its requests is still
    /// outstanding, but schedulers should treat a repeated request as
    /// already queued rather than queue it twice.
    fn schedule(&mut self, request: FlushRequest);

    /// Releases the queued request if it is due at frame time `now`.
    ///
    /// `now` is a monotonic timestamp from an arbitrary origin, such as a
    /// `requestAnimationFrame` timestamp.
    fn take_due(&mut self, now: Duration) -> Option<FlushRequest>;
}

impl<F: FrameScheduler + ?Sized> FrameScheduler for &mut F {
    fn schedule(&mut self, request: FlushRequest) {
        (**self).schedule(request);
    }

    fn take_due(&mut self, now: Duration) -> Option<FlushRequest> {
        (**self).take_due(now)
    }
}

/// Upper bound on how often a viewport flushes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum RefreshRate {
    /// Flush on every frame opportunity.
    #[default]
    Auto,
    /// Flush at most this many times per second.
    ///
    /// Only rates strictly between 1 and 60 throttle; other values behave
    /// like [`RefreshRate::Auto`].
    Hz(f64),
}

impl RefreshRate {
    /// Minimum time between two flushes, or `None` for every frame.
    ///
    /// ```
    /// use core::time::Duration;
    /// use understory_pan_zoom::RefreshRate;
    ///
    /// assert_eq!(RefreshRate::Hz(30.0).min_interval(), Some(Duration::from_millis(33)));
    /// assert_eq!(RefreshRate::Hz(60.0).min_interval(), None);
    /// assert_eq!(RefreshRate::Auto.min_interval(), None);
    /// ```
    #[must_use]
    pub fn min_interval(self) -> Option<Duration> {
        match self {
            Self::Hz(rate) if rate > 1.0 && rate < 60.0 => {
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "rate is in (1, 60), so the interval is a small positive number of ms"
                )]
                let millis = (1000.0 / rate) as u64;
                Some(Duration::from_millis(millis))
            }
            Self::Auto | Self::Hz(_) => None,
        }
    }
}

/// Single-slot scheduler honoring a [`RefreshRate`].
///
/// A request is released on the first [`take_due`](FrameScheduler::take_due)
/// call whose timestamp is at least [`RefreshRate::min_interval`] after the
/// previous release. Without an interval, every call releases.
#[derive(Clone, Debug, Default)]
pub struct FrameThrottle {
    min_interval: Option<Duration>,
    pending: Option<FlushRequest>,
    last_release: Option<Duration>,
}

impl FrameThrottle {
    /// Creates a throttle for `refresh_rate`.
    #[must_use]
    pub fn new(refresh_rate: RefreshRate) -> Self {
        Self {
            min_interval: refresh_rate.min_interval(),
            pending: None,
            last_release: None,
        }
    }

    /// Minimum time between releases, if any.
    #[must_use]
    pub fn min_interval(&self) -> Option<Duration> {
        self.min_interval
    }

    /// Returns `true` while a request is waiting for a frame.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Frame time of the last release.
    #[must_use]
    pub fn last_release(&self) -> Option<Duration> {
        self.last_release
    }
}

impl FrameScheduler for FrameThrottle {
    fn schedule(&mut self, request: FlushRequest) {
        self.pending = Some(request);
    }

    fn take_due(&mut self, now: Duration) -> Option<FlushRequest> {
        let request = self.pending?;
        if let (Some(min), Some(last)) = (self.min_interval, self.last_release)
            && now.saturating_sub(last) < min
        {
            return None;
        }
        self.pending = None;
        self.last_release = Some(now);
        Some(request)
    }
}
