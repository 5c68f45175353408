//! Number and flag enums: integral values, implicit values derived from the
//! last inserted one.

use std::any::Any;
use std::marker::PhantomData;
use std::ops::Deref;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::{EnumCore, Insertion, OnExisting};
use crate::error::Result;
use crate::member::{Extension, Member};
use crate::numeric::{self, BitShift, Increment, Integral, Sequence};
use crate::options::EnumOptions;

/// Integral enum whose implicit values follow `S`.
///
/// Use the [`NumberEnum`] and [`FlagsEnum`] aliases.
pub struct SequencedEnum<V: Integral, S: Sequence> {
	core: EnumCore<V>,
	/// Value of the most recent successful insert, explicit or implicit.
	/// Held across a whole create so implicit values are never handed out
	/// twice.
	last: Mutex<Option<V>>,
	_sequence: PhantomData<fn() -> S>,
}

/// Auto-incrementing enum: `0, 1, 2, ...`.
pub type NumberEnum<V = i32> = SequencedEnum<V, Increment>;

/// Bit-flag enum: `0, 1, 2, 4, ...`.
pub type FlagsEnum<V = i32> = SequencedEnum<V, BitShift>;

impl<V: Integral, S: Sequence> SequencedEnum<V, S> {
	pub fn new(name: &'static str, options: EnumOptions) -> Self {
		Self::from_core(EnumCore::new(name, options))
	}

	pub(crate) fn from_core(core: EnumCore<V>) -> Self {
		Self {
			core,
			last: Mutex::new(None),
			_sequence: PhantomData,
		}
	}

	/// Registers `name` with the next value of the sequence.
	///
	/// # Errors
	///
	/// [`EnumError::DuplicateName`](crate::EnumError::DuplicateName), or
	/// [`EnumError::ArithmeticOverflow`](crate::EnumError::ArithmeticOverflow)
	/// when the sequence is exhausted.
	pub fn create_member(&self, name: &str) -> Result<Member<V>> {
		self.sequenced(name, None, None, OnExisting::Fail)
	}

	/// Registers `name` with an explicit value. Later implicit values continue
	/// from `value`.
	pub fn create_member_with(&self, name: &str, value: V) -> Result<Member<V>> {
		self.sequenced(name, Some(value), None, OnExisting::Fail)
	}

	/// Registers `name` with `value` (or the next implicit value when `None`),
	/// attaching `extension` to the member. Advances the sequence like
	/// [`create_member_with`](Self::create_member_with).
	pub fn create_member_with_extension<X>(&self, name: &str, value: Option<V>, extension: X) -> Result<Member<V>>
	where
		X: Any + Send + Sync,
	{
		self.sequenced(name, value, Some(Arc::new(extension)), OnExisting::Fail)
	}

	/// Returns the member registered as `name`, creating it with `value` (or
	/// the next implicit value when `None`) if it does not exist yet.
	pub fn get_or_create_member(&self, name: &str, value: Option<V>) -> Result<Member<V>> {
		self.sequenced(name, value, None, OnExisting::Return)
	}

	/// Value of the most recently inserted member.
	pub fn last_inserted_value(&self) -> Option<V> {
		*self.last.lock()
	}

	pub(crate) fn sequenced(
		&self,
		name: &str,
		value: Option<V>,
		extension: Option<Extension>,
		on_existing: OnExisting,
	) -> Result<Member<V>> {
		let mut last = self.last.lock();
		let prev = *last;
		let Insertion { member, inserted } = self.core.insert(
			name,
			|| match value {
				Some(value) => Ok(value),
				None => S::next(prev),
			},
			extension,
			on_existing,
		)?;
		if inserted {
			*last = Some(*member.value());
		}
		Ok(member)
	}
}

impl<V: Integral> FlagsEnum<V> {
	/// True when every bit of `flag` is set in `value`.
	#[inline]
	pub fn has_flag(value: V, flag: V) -> bool {
		numeric::has_flag(value, flag)
	}

	/// Members whose flag is contained in `value`, in insertion order.
	///
	/// Zero-valued members are only returned for a zero `value`, so a
	/// composite never reports the "none" flag.
	pub fn get_unique_flags(&self, value: V) -> Vec<Member<V>> {
		self.core
			.get_unique_value_members()
			.into_iter()
			.filter(|m| {
				let flag = *m.value();
				if value == V::ZERO {
					flag == V::ZERO
				} else {
					flag != V::ZERO && numeric::has_flag(value, flag)
				}
			})
			.collect()
	}
}

impl<V: Integral> Member<V> {
	/// True when every bit of `flag` is set in this member's value.
	#[inline]
	pub fn has_flag(&self, flag: V) -> bool {
		numeric::has_flag(*self.value(), flag)
	}
}

impl<V: Integral, S: Sequence> Deref for SequencedEnum<V, S> {
	type Target = EnumCore<V>;

	fn deref(&self) -> &EnumCore<V> {
		&self.core
	}
}

impl<V: Integral, S: Sequence> std::fmt::Debug for SequencedEnum<V, S> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SequencedEnum")
			.field("core", &self.core)
			.field("last", &*self.last.lock())
			.finish()
	}
}
