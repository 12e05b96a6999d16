// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Copy-on-write handles to reference counted payloads.
//!
//! A [`CowPtr`] points at a [`CowData`], which carries a [`RefCount`] next to the payload.
//! Cloning a handle shares the payload; the first write through a shared handle copies it
//! ([`CowPtr::make_mut`]). This is what paths and other geometry containers use to make copies
//! cheap while still being able to hand them to other threads.
//!
//! ```
//! use vector_common::cow::{CowData, CowPtr};
//!
//! static EMPTY: CowData<Vec<f32>> = CowData::new_static(Vec::new());
//!
//! let shared = CowPtr::from_static(&EMPTY);
//! let mut points = shared.clone();
//! assert!(CowPtr::ptr_eq(&shared, &points));
//!
//! points.make_mut().extend([1.0, 2.0]);
//! assert!(shared.is_empty());
//! assert_eq!(*points, [1.0, 2.0]);
//! ```

#![allow(
    unsafe_code,
    reason = "handles own their payload through a raw pointer shared with other handles"
)]

use core::fmt;
use core::marker::PhantomData;
use core::ops::Deref;
use core::ptr::NonNull;

use crate::refcount::RefCount;

/// A payload together with its reference count.
///
/// Only ever reached through a [`CowPtr`]. Statics defined with [`CowData::new_static`] are
/// never freed and can back any number of handles.
pub struct CowData<T> {
    count: RefCount,
    value: T,
}

impl<T> CowData<T> {
    /// A payload for a `static`, to be handed out with [`CowPtr::from_static`].
    pub const fn new_static(value: T) -> Self {
        Self {
            count: RefCount::new_static(),
            value,
        }
    }

    fn alloc(count: RefCount, value: T) -> NonNull<Self> {
        NonNull::from(Box::leak(Box::new(Self { count, value })))
    }
}

impl<T: fmt::Debug> fmt::Debug for CowData<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CowData")
            .field("count", &self.count.count())
            .field("value", &self.value)
            .finish()
    }
}

/// A copy-on-write handle.
///
/// The payload is immutable while it is shared. Static payloads count as shared forever, so a
/// write always copies them.
pub struct CowPtr<T> {
    ptr: NonNull<CowData<T>>,
    _marker: PhantomData<CowData<T>>,
}

// SAFETY: Handles on different threads only touch the shared payload through `&T` and the
// atomic count; `&mut T` is only handed out when the count proves this is the only handle.
// This is the same contract as `Arc`.
unsafe impl<T: Send + Sync> Send for CowPtr<T> {}
// SAFETY: See above.
unsafe impl<T: Send + Sync> Sync for CowPtr<T> {}

static_assertions::assert_impl_all!(CowPtr<Vec<f32>>: Send, Sync);
static_assertions::assert_not_impl_any!(CowPtr<core::cell::Cell<f32>>: Send, Sync);

impl<T> CowPtr<T> {
    /// A handle to a fresh payload.
    pub fn new(value: T) -> Self {
        Self::from_ptr(CowData::alloc(RefCount::owned(), value))
    }

    /// A handle to a payload that is copied, not shared, whenever the handle is cloned.
    pub fn new_unsharable(value: T) -> Self {
        Self::from_ptr(CowData::alloc(RefCount::unsharable(), value))
    }

    /// A handle to a static payload.
    pub fn from_static(data: &'static CowData<T>) -> Self {
        Self::from_ptr(NonNull::from(data))
    }

    fn from_ptr(ptr: NonNull<CowData<T>>) -> Self {
        Self {
            ptr,
            _marker: PhantomData,
        }
    }

    fn data(&self) -> &CowData<T> {
        // SAFETY: The payload stays alive as long as any handle to it does.
        unsafe { self.ptr.as_ref() }
    }

    /// Returns `true` if both handles point at the same payload.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        this.ptr == other.ptr
    }

    /// The raw reference count of the payload. See [`RefCount::count`].
    pub fn ref_count(this: &Self) -> i32 {
        this.data().count.count()
    }

    /// Returns `true` if a write through this handle would copy the payload.
    pub fn is_shared(this: &Self) -> bool {
        this.data().count.is_shared()
    }

    /// Mutable access to the payload, if this handle is the only one.
    pub fn get_mut(this: &mut Self) -> Option<&mut T> {
        if this.data().count.is_shared() {
            None
        } else {
            // SAFETY: The count is 0 (unsharable) or 1, so no other handle exists, and we hold
            // this one mutably.
            Some(unsafe { &mut this.ptr.as_mut().value })
        }
    }
}

impl<T: Clone> CowPtr<T> {
    /// Mutable access to the payload, copying it first if it is shared.
    ///
    /// After this returns, this handle is the only owner of its payload.
    pub fn make_mut(&mut self) -> &mut T {
        if self.data().count.is_shared() {
            log::trace!("copying shared payload before write");
            *self = Self::new(self.data().value.clone());
        }
        // SAFETY: Either the count was already 0 or 1, or we just replaced the payload with a
        // fresh one owned by this handle.
        unsafe { &mut self.ptr.as_mut().value }
    }
}

impl<T: Clone> Clone for CowPtr<T> {
    fn clone(&self) -> Self {
        if self.data().count.add_ref() {
            Self::from_ptr(self.ptr)
        } else {
            log::debug!("copying a payload that cannot be shared");
            Self::new(self.data().value.clone())
        }
    }
}

impl<T> Drop for CowPtr<T> {
    fn drop(&mut self) {
        let count = &self.data().count;
        // An unsharable payload only ever has this handle, so there is nothing to release.
        if count.is_sharable() && count.release_ref() {
            return;
        }
        // SAFETY: This was the last handle, and the payload is not static (static counts always
        // report owners remaining), so it came from `CowData::alloc`.
        drop(unsafe { Box::from_raw(self.ptr.as_ptr()) });
    }
}

impl<T> Deref for CowPtr<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data().value
    }
}

impl<T> AsRef<T> for CowPtr<T> {
    fn as_ref(&self) -> &T {
        self
    }
}

impl<T: Default> Default for CowPtr<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

// Payloads only; a shared `NaN` is unequal to itself.
impl<T: PartialEq> PartialEq for CowPtr<T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq> Eq for CowPtr<T> {}

impl<T: fmt::Debug> fmt::Debug for CowPtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

impl<T> From<T> for CowPtr<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}
