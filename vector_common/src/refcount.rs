// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Intrusive atomic reference counting for copy-on-write payloads.
//!
//! A [`RefCount`] lives inside the payload it protects (see [`CowData`](crate::CowData)).
//! It has three modes, packed into one signed integer:
//!
//! - `0`: unsharable. The payload belongs to exactly one owner and must be copied instead of
//!   shared.
//! - `-1`: static. The payload lives for the whole process and is never freed. Sharing it needs
//!   no bookkeeping.
//! - `n >= 1`: shared by `n` owners.
//!
//! The counter only reports; freeing the payload is up to the owner that sees
//! [`RefCount::release_ref`] return `false`.
//!
//! Every transition is a single compare-and-swap loop, so deciding whether a transition applies
//! and applying it happen as one step even when several threads hold handles to the same
//! payload.

use core::num::NonZeroU32;
use core::sync::atomic::{self, AtomicI32, Ordering};

use crate::error::{Error, Result};

const UNSHARABLE: i32 = 0;
const STATIC: i32 = -1;
const OWNED: i32 = 1;

/// A snapshot of a [`RefCount`], as a tagged value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RefState {
    /// The payload must never be shared.
    Unsharable,
    /// The payload is never freed.
    Static,
    /// The payload is shared by this many owners.
    Counted(NonZeroU32),
}

impl RefState {
    fn from_raw(raw: i32) -> Self {
        if raw == STATIC {
            return Self::Static;
        }
        match u32::try_from(raw).ok().and_then(NonZeroU32::new) {
            Some(owners) => Self::Counted(owners),
            None => Self::Unsharable,
        }
    }
}

/// An atomic reference count embedded in a shared payload.
#[derive(Debug)]
pub struct RefCount {
    count: AtomicI32,
}

static_assertions::assert_impl_all!(RefCount: Send, Sync);
static_assertions::assert_eq_size!(RefCount, i32);

impl RefCount {
    /// Create a count with an explicit raw value.
    ///
    /// `count` must be `-1`, `0`, or positive.
    pub const fn new(count: i32) -> Self {
        debug_assert!(count >= STATIC, "reference count below the static sentinel");
        Self {
            count: AtomicI32::new(count),
        }
    }

    /// A count for a fresh payload with a single owner.
    pub const fn owned() -> Self {
        Self::new(OWNED)
    }

    /// A count for a payload that must never be shared.
    pub const fn unsharable() -> Self {
        Self::new(UNSHARABLE)
    }

    /// A count for a payload that lives for the whole process.
    pub const fn new_static() -> Self {
        Self::new(STATIC)
    }

    /// Register one more owner.
    ///
    /// Returns `false` without changing anything if the payload is unsharable, or if the count is
    /// saturated; the caller must then copy the payload rather than share it. Static payloads
    /// always return `true` and are left untouched.
    pub fn add_ref(&self) -> bool {
        self.try_add_ref().is_ok()
    }

    /// Release one owner.
    ///
    /// Returns `true` if owners remain and the payload must be kept, and `false` if the caller
    /// was the last owner and must free it. Static payloads always return `true` and are left
    /// untouched.
    ///
    /// Releasing an unsharable (or already fully released) count returns `false` and changes
    /// nothing; that is a double release upstream.
    pub fn release_ref(&self) -> bool {
        self.try_release_ref().unwrap_or(false)
    }

    /// Like [`add_ref`](Self::add_ref), but says why the owner could not be registered.
    pub fn try_add_ref(&self) -> Result<()> {
        // Like `Arc::clone`: the new owner is derived from an existing one, so no
        // synchronization is needed beyond the atomicity of the update.
        let update = self
            .count
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |count| match count {
                UNSHARABLE | STATIC => None,
                count => count.checked_add(1),
            });
        match update {
            Ok(_) | Err(STATIC) => Ok(()),
            Err(UNSHARABLE) => Err(Error::Unsharable),
            Err(_) => Err(Error::CountOverflow),
        }
    }

    /// Like [`release_ref`](Self::release_ref), but reports a release of an unsharable count as
    /// [`Error::Unsharable`].
    ///
    /// On success, returns whether owners remain.
    pub fn try_release_ref(&self) -> Result<bool> {
        let update = self
            .count
            .fetch_update(Ordering::Release, Ordering::Relaxed, |count| match count {
                UNSHARABLE | STATIC => None,
                count => Some(count - 1),
            });
        match update {
            Ok(OWNED) => {
                // Everything the other owners did to the payload happens before it is freed.
                atomic::fence(Ordering::Acquire);
                Ok(false)
            }
            Ok(_) | Err(STATIC) => Ok(true),
            Err(_) => {
                log::warn!("released a reference count that has no owners to release");
                Err(Error::Unsharable)
            }
        }
    }

    /// Returns `true` unless the count is unsharable or has exactly one owner.
    ///
    /// Static payloads report as shared: a writer must copy them first.
    pub fn is_shared(&self) -> bool {
        let count = self.count.load(Ordering::Acquire);
        count != OWNED && count != UNSHARABLE
    }

    /// Returns `true` if the payload is never freed.
    pub fn is_static(&self) -> bool {
        self.count.load(Ordering::Relaxed) == STATIC
    }

    /// Returns `true` unless the payload is unsharable.
    pub fn is_sharable(&self) -> bool {
        self.count.load(Ordering::Relaxed) != UNSHARABLE
    }

    /// Make the calling owner the only one, whatever the previous state.
    ///
    /// Used after cloning a payload, or once an owner has established it holds the only handle.
    pub fn set_owned(&self) {
        self.count.store(OWNED, Ordering::Release);
    }

    /// The raw count. Only meaningful as a snapshot.
    pub fn count(&self) -> i32 {
        self.count.load(Ordering::Relaxed)
    }

    /// The count as a [`RefState`]. Only meaningful as a snapshot.
    pub fn state(&self) -> RefState {
        RefState::from_raw(self.count())
    }
}

impl Default for RefCount {
    fn default() -> Self {
        Self::owned()
    }
}
