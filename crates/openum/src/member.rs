//! The immutable member record.
//!
//! A [`Member`] is a cheap handle (one `Arc`) to a name/value pair owned by
//! its enum. Equality, hashing and ordering look at the owning enum and the
//! value, the same way two native enum constants with the same discriminant
//! are indistinguishable while constants of different enums never compare
//! equal. Use [`Member::same_member`] for identity.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Bounds every member value satisfies.
pub trait MemberValue: Eq + Hash + fmt::Debug + Send + Sync + 'static {}
impl<T> MemberValue for T where T: Eq + Hash + fmt::Debug + Send + Sync + 'static {}

/// Opaque payload attached to a member at creation time.
pub(crate) type Extension = Arc<dyn Any + Send + Sync>;

pub struct Member<V> {
	inner: Arc<MemberInner<V>>,
}

struct MemberInner<V> {
	enum_name: &'static str,
	name: Box<str>,
	value: V,
	extension: Option<Extension>,
}

impl<V> Member<V> {
	pub(crate) fn new(enum_name: &'static str, name: &str, value: V, extension: Option<Extension>) -> Self {
		Self {
			inner: Arc::new(MemberInner {
				enum_name,
				name: name.into(),
				value,
				extension,
			}),
		}
	}

	/// The name as it was declared (original casing).
	#[inline]
	pub fn name(&self) -> &str {
		&self.inner.name
	}

	#[inline]
	pub fn value(&self) -> &V {
		&self.inner.value
	}

	/// Name of the enum this member belongs to.
	#[inline]
	pub fn enum_name(&self) -> &'static str {
		self.inner.enum_name
	}

	/// Returns the extension payload if one of type `X` was attached.
	pub fn extension<X: Any>(&self) -> Option<&X> {
		self.inner.extension.as_deref()?.downcast_ref::<X>()
	}

	/// True when both handles point at the same registered member.
	#[inline]
	pub fn same_member(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner)
	}

	pub fn into_value(self) -> V
	where
		V: Clone,
	{
		match Arc::try_unwrap(self.inner) {
			Ok(inner) => inner.value,
			Err(shared) => shared.value.clone(),
		}
	}
}

impl<V> Clone for Member<V> {
	fn clone(&self) -> Self {
		Self {
			inner: self.inner.clone(),
		}
	}
}

impl<V: PartialEq> PartialEq for Member<V> {
	#[inline]
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner)
			|| (self.inner.enum_name == other.inner.enum_name && self.inner.value == other.inner.value)
	}
}

impl<V: Eq> Eq for Member<V> {}

impl<V: PartialEq> PartialEq<V> for Member<V> {
	#[inline]
	fn eq(&self, other: &V) -> bool {
		self.inner.value == *other
	}
}

impl<V: Hash> Hash for Member<V> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.inner.enum_name.hash(state);
		self.inner.value.hash(state);
	}
}

impl<V: PartialOrd> PartialOrd for Member<V> {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		match self.inner.value.partial_cmp(&other.inner.value) {
			Some(Ordering::Equal) => Some(self.inner.enum_name.cmp(other.inner.enum_name)),
			ordering => ordering,
		}
	}
}

impl<V: Ord> Ord for Member<V> {
	fn cmp(&self, other: &Self) -> Ordering {
		self.inner
			.value
			.cmp(&other.inner.value)
			.then_with(|| self.inner.enum_name.cmp(other.inner.enum_name))
	}
}

impl<V> AsRef<V> for Member<V> {
	fn as_ref(&self) -> &V {
		&self.inner.value
	}
}

impl<V> fmt::Display for Member<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.inner.name)
	}
}

impl<V: fmt::Debug> fmt::Debug for Member<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Member")
			.field("enum", &self.inner.enum_name)
			.field("name", &self.inner.name)
			.field("value", &self.inner.value)
			.finish()
	}
}

#[cfg(test)]
mod tests;
