// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bit sets over plain enumerations.
//!
//! An enumeration whose variants are bit positions (powers of two, optionally with an explicit
//! zero "none" variant) implements [`Flag`], usually through [`impl_flag!`](crate::impl_flag).
//! [`Flags<E>`] then stores any combination of those variants in the enumeration's own integer
//! representation.
//!
//! ```
//! use vector_common::flags::Flags;
//! use vector_common::impl_flag;
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq)]
//! #[repr(u8)]
//! enum Dirty {
//!     None = 0,
//!     Path = 1 << 0,
//!     Paint = 1 << 1,
//!     Transform = 1 << 2,
//! }
//! impl_flag!(Dirty: u8);
//!
//! let mut dirty = Dirty::Path | Dirty::Transform;
//! assert!(dirty.test_flag(Dirty::Path));
//! assert!(!dirty.test_flag(Dirty::None));
//!
//! dirty.set_flag(Dirty::Path, false).set_flag(Dirty::Transform, false);
//! assert!(dirty.test_flag(Dirty::None));
//! assert_eq!(dirty, Flags::empty());
//! ```

use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

/// The integer types a [`Flags`] set can be stored in.
pub trait FlagBits:
    Copy
    + Eq
    + Hash
    + fmt::Debug
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Not<Output = Self>
{
    /// The empty set.
    const ZERO: Self;
}

macro_rules! impl_flag_bits {
    ($($ty:ty),*) => {
        $(
            impl FlagBits for $ty {
                const ZERO: Self = 0;
            }
        )*
    };
}

impl_flag_bits!(i8, u8, i16, u16, i32, u32);

/// An enumeration usable as a member of a [`Flags`] set.
pub trait Flag: Copy {
    /// Storage for a set of these flags, with the width and signedness of the enumeration.
    type Bits: FlagBits;

    /// The bits of this single flag.
    fn bits(self) -> Self::Bits;
}

/// Implement [`Flag`] for fieldless `#[repr(int)]` enumerations.
///
/// Also implements `|` between two variants, yielding a [`Flags`] set.
#[macro_export]
macro_rules! impl_flag {
    ($($ty:ty: $repr:ty),* $(,)?) => {
        $(
            impl $crate::flags::Flag for $ty {
                type Bits = $repr;

                #[inline]
                fn bits(self) -> $repr {
                    self as $repr
                }
            }

            impl ::core::ops::BitOr for $ty {
                type Output = $crate::flags::Flags<$ty>;

                #[inline]
                fn bitor(self, rhs: Self) -> Self::Output {
                    $crate::flags::Flags::from(self) | rhs
                }
            }
        )*
    };
}

/// A set of flags of the enumeration `E`.
///
/// All binary operators accept another set, a single `E`, or a raw `E::Bits` mask, and return a
/// new set; the `*Assign` forms update in place. `!` is the bitwise complement; use
/// [`Flags::is_empty`] for the logical test.
pub struct Flags<E: Flag> {
    bits: E::Bits,
    _marker: PhantomData<E>,
}

impl<E: Flag> Flags<E> {
    /// The set with no bits set.
    #[inline]
    pub const fn empty() -> Self {
        Self::from_bits(E::Bits::ZERO)
    }

    /// A set from its raw storage. Bits that match no variant are kept.
    #[inline]
    pub const fn from_bits(bits: E::Bits) -> Self {
        Self {
            bits,
            _marker: PhantomData,
        }
    }

    /// The raw storage.
    #[inline]
    pub fn bits(self) -> E::Bits {
        self.bits
    }

    /// Returns `true` if no bits are set.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.bits == E::Bits::ZERO
    }

    /// Returns `true` if every bit of `flag` is set.
    ///
    /// A flag with no bits (a "none" variant) only matches the empty set, so that it can be
    /// tested for exactly.
    #[inline]
    pub fn test_flag(self, flag: E) -> bool {
        let flag = flag.bits();
        (self.bits & flag) == flag && (flag != E::Bits::ZERO || self.bits == flag)
    }

    /// Set or clear exactly the bits of `flag`, leaving every other bit untouched.
    #[inline]
    pub fn set_flag(&mut self, flag: E, on: bool) -> &mut Self {
        if on {
            self.bits = self.bits | flag.bits();
        } else {
            self.bits = self.bits & !flag.bits();
        }
        self
    }
}

impl<E: Flag> Clone for Flags<E> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: Flag> Copy for Flags<E> {}

impl<E: Flag> PartialEq for Flags<E> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl<E: Flag> Eq for Flags<E> {}

impl<E: Flag> Hash for Flags<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits.hash(state);
    }
}

impl<E: Flag> Default for Flags<E> {
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

impl<E: Flag> fmt::Debug for Flags<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Flags").field(&self.bits).finish()
    }
}

impl<E: Flag> From<E> for Flags<E> {
    #[inline]
    fn from(flag: E) -> Self {
        Self::from_bits(flag.bits())
    }
}

impl<E: Flag> FromIterator<E> for Flags<E> {
    fn from_iter<T: IntoIterator<Item = E>>(iter: T) -> Self {
        let mut flags = Self::empty();
        flags.extend(iter);
        flags
    }
}

impl<E: Flag> Extend<E> for Flags<E> {
    fn extend<T: IntoIterator<Item = E>>(&mut self, iter: T) {
        for flag in iter {
            *self |= flag;
        }
    }
}

impl<E: Flag> Not for Flags<E> {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        Self::from_bits(!self.bits)
    }
}

macro_rules! impl_binary_op {
    ($op:ident, $method:ident, $assign_op:ident, $assign_method:ident, $tok:tt) => {
        impl<E: Flag> $op for Flags<E> {
            type Output = Self;

            #[inline]
            fn $method(self, rhs: Self) -> Self {
                Self::from_bits(self.bits $tok rhs.bits)
            }
        }

        impl<E: Flag> $op<E> for Flags<E> {
            type Output = Self;

            #[inline]
            fn $method(self, rhs: E) -> Self {
                Self::from_bits(self.bits $tok rhs.bits())
            }
        }

        impl<E: Flag> $assign_op for Flags<E> {
            #[inline]
            fn $assign_method(&mut self, rhs: Self) {
                *self = $op::$method(*self, rhs);
            }
        }

        impl<E: Flag> $assign_op<E> for Flags<E> {
            #[inline]
            fn $assign_method(&mut self, rhs: E) {
                *self = $op::$method(*self, rhs);
            }
        }
    };
}

impl_binary_op!(BitAnd, bitand, BitAndAssign, bitand_assign, &);
impl_binary_op!(BitOr, bitor, BitOrAssign, bitor_assign, |);
impl_binary_op!(BitXor, bitxor, BitXorAssign, bitxor_assign, ^);

// Raw masks are spelled out per storage type; a blanket impl over `E::Bits`
// would overlap with the impls taking `E`.
macro_rules! impl_mask_ops {
    ($($ty:ty),*) => {
        $(
            impl<E: Flag<Bits = $ty>> From<Flags<E>> for $ty {
                #[inline]
                fn from(flags: Flags<E>) -> Self {
                    flags.bits
                }
            }

            impl<E: Flag<Bits = $ty>> BitAnd<$ty> for Flags<E> {
                type Output = Self;

                #[inline]
                fn bitand(self, mask: $ty) -> Self {
                    Self::from_bits(self.bits & mask)
                }
            }

            impl<E: Flag<Bits = $ty>> BitOr<$ty> for Flags<E> {
                type Output = Self;

                #[inline]
                fn bitor(self, mask: $ty) -> Self {
                    Self::from_bits(self.bits | mask)
                }
            }

            impl<E: Flag<Bits = $ty>> BitXor<$ty> for Flags<E> {
                type Output = Self;

                #[inline]
                fn bitxor(self, mask: $ty) -> Self {
                    Self::from_bits(self.bits ^ mask)
                }
            }

            impl<E: Flag<Bits = $ty>> BitAndAssign<$ty> for Flags<E> {
                #[inline]
                fn bitand_assign(&mut self, mask: $ty) {
                    self.bits = self.bits & mask;
                }
            }

            impl<E: Flag<Bits = $ty>> BitOrAssign<$ty> for Flags<E> {
                #[inline]
                fn bitor_assign(&mut self, mask: $ty) {
                    self.bits = self.bits | mask;
                }
            }

            impl<E: Flag<Bits = $ty>> BitXorAssign<$ty> for Flags<E> {
                #[inline]
                fn bitxor_assign(&mut self, mask: $ty) {
                    self.bits = self.bits ^ mask;
                }
            }
        )*
    };
}

impl_mask_ops!(i8, u8, i16, u16, i32, u32);
