// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported while setting up a viewport.

use alloc::string::String;

/// Error returned by [`ShadowViewport::new`](crate::ShadowViewport::new).
///
/// Committing and flushing transforms never fail; they report vetoes and
/// no-ops through [`ProposeOutcome`](crate::ProposeOutcome) and
/// [`FlushOutcome`](crate::FlushOutcome) instead.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ViewportError {
    /// The surface's `viewBox` attribute does not start with four numbers.
    #[error("invalid viewBox attribute {attribute:?}: {reason}")]
    InvalidViewBox {
        /// The attribute text as read from the surface.
        attribute: String,
        /// What was wrong with it.
        reason: ViewBoxIssue,
    },
}

/// Why a `viewBox` attribute could not be read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ViewBoxIssue {
    /// Fewer than four values were present.
    #[error("expected 4 values, found {0}")]
    TooFewValues(usize),
    /// One of the first four values has no numeric prefix.
    #[error("value {0} is not a number")]
    NotANumber(usize),
}
