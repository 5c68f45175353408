//! Checked arithmetic over the integral member value types.
//!
//! Number and flag enums derive implicit member values from the last inserted
//! value. The two derivations live here so they can be shared by every
//! integral width:
//!
//! | Sequence | No prior member | After `0` | After `n` |
//! |---|---|---|---|
//! | [`Increment`] | `0` | `1` | `n + 1` |
//! | [`BitShift`] | `0` | `1` | `n << 1` |
//!
//! Overflow never wraps. It surfaces as [`EnumError::ArithmeticOverflow`].

use std::fmt::Debug;
use std::ops::BitAnd;

use crate::error::{EnumError, Operation};
use crate::member::MemberValue;

/// Integral types usable as number or flag enum values.
///
/// Signed types use every bit as a flag, including the sign bit: a flag
/// sequence over `i8` ends with `0x40 << 1 == i8::MIN`, and only the shift
/// after that overflows.
pub trait Integral: MemberValue + Copy + Ord + Default + BitAnd<Output = Self> {
	const ZERO: Self;
	const ONE: Self;
	/// Rust spelling of the type, used in overflow diagnostics.
	const TYPE_NAME: &'static str;

	fn checked_increment(self) -> Option<Self>;

	/// Shifts left by one bit. Returns `None` when a set bit would be shifted
	/// out of the type (including the sign bit of a negative value). Shifting
	/// a set bit into the sign bit succeeds.
	fn checked_shift_left(self) -> Option<Self>;
}

macro_rules! impl_integral {
	($($ty:ty),* $(,)?) => {
		$(
			impl Integral for $ty {
				const ZERO: Self = 0;
				const ONE: Self = 1;
				const TYPE_NAME: &'static str = stringify!($ty);

				#[inline]
				fn checked_increment(self) -> Option<Self> {
					self.checked_add(1)
				}

				#[inline]
				fn checked_shift_left(self) -> Option<Self> {
					if self.leading_zeros() == 0 {
						None
					} else {
						Some(self << 1)
					}
				}
			}
		)*
	};
}

impl_integral!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

/// Strategy deriving an implicit value from the last inserted one.
pub trait Sequence: Send + Sync + 'static {
	fn next<V: Integral>(last: Option<V>) -> Result<V, EnumError>;
}

/// Auto-increment: `0, 1, 2, ...`, resuming after explicit values.
#[derive(Debug, Clone, Copy, Default)]
pub struct Increment;

/// Bit-flag generation: `0, 1, 2, 4, ...`.
///
/// The first implicit member is the zero ("none") flag. The transition out of
/// zero yields bit 0, every later implicit value doubles the previous one.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitShift;

impl Sequence for Increment {
	fn next<V: Integral>(last: Option<V>) -> Result<V, EnumError> {
		match last {
			None => Ok(V::ZERO),
			Some(last) => last
				.checked_increment()
				.ok_or_else(|| overflow(Operation::Increment, last)),
		}
	}
}

impl Sequence for BitShift {
	fn next<V: Integral>(last: Option<V>) -> Result<V, EnumError> {
		match last {
			None => Ok(V::ZERO),
			Some(last) if last == V::ZERO => Ok(V::ONE),
			Some(last) => last
				.checked_shift_left()
				.ok_or_else(|| overflow(Operation::ShiftLeft, last)),
		}
	}
}

/// Returns true when every bit of `flag` is set in `value`.
#[inline]
pub fn has_flag<V: Integral>(value: V, flag: V) -> bool {
	value & flag == flag
}

fn overflow<V: Integral + Debug>(operation: Operation, last: V) -> EnumError {
	EnumError::ArithmeticOverflow {
		operation,
		type_name: V::TYPE_NAME,
		last: format!("{last:?}"),
	}
}
