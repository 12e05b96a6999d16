// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared resource management and geometric value types for a vector animation renderer.
//!
//! This crate sits underneath paths, color buffers and render trees.
//! It does not rasterize or tessellate anything by itself; it provides the building blocks
//! those stages agree on:
//!
//! - [`RefCount`](refcount::RefCount), an intrusive atomic reference count with
//!   unsharable and static states, and [`CowPtr`](cow::CowPtr), a copy-on-write handle built on it.
//! - [`Color`](color::Color), an 8-bit RGBA color with a packed premultiplied ARGB form.
//! - [`Flags`](flags::Flags), a bit set over a plain enumeration.
//! - [`FillRule`](style::FillRule), [`JoinStyle`](style::JoinStyle) and
//!   [`CapStyle`](style::CapStyle), plus a packed [`Style`](style::Style) word.
//! - Epsilon comparisons and a fast approximate distance in [`scalar`].
//!
//! # Features
//!
//! - `peniko` (enabled by default): Conversions between the types in this crate and
//!   `peniko::Color`, `peniko::Fill` and the `kurbo` stroke join and cap styles.
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
// Only `cow` opts back in.
#![deny(unsafe_code)]

pub mod color;
pub mod cow;
pub mod error;
pub mod flags;
pub mod refcount;
pub mod scalar;
pub mod style;

pub use color::Color;
pub use cow::{CowData, CowPtr};
pub use error::{Error, Result};
pub use flags::{Flag, FlagBits, Flags};
pub use refcount::{RefCount, RefState};
pub use style::{CapStyle, FillRule, JoinStyle, Style};

#[cfg(feature = "peniko")]
pub use peniko;
