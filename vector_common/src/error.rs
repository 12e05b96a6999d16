// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by the checked variants of the APIs in this crate.
//!
//! The core operations ([`RefCount::add_ref`](crate::RefCount::add_ref),
//! [`Color::new`](crate::Color::new), ...) never fail loudly; they report
//! "did not apply" through their return value. The `try_*` and `checked`
//! variants surface the same conditions as an [`Error`].

use thiserror::Error;

use crate::color::Channel;

/// Errors that can occur in `vector_common`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The payload is marked unsharable, or was already released by its last owner.
    #[error("Reference count is unsharable")]
    Unsharable,
    /// The reference count cannot register another owner without overflowing.
    #[error("Reference count overflow")]
    CountOverflow,
    /// A color channel is outside of `0..=255`.
    #[error("Color channel {channel} is out of range: {value}")]
    ChannelOutOfRange {
        /// The offending channel.
        channel: Channel,
        /// The value stored in that channel.
        value: u16,
    },
}

/// A [`Result`](std::result::Result) defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
