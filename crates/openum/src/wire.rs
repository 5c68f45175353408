//! Wire format for members: `"{Enum}.{Member}"`.
//!
//! Serializing a member needs nothing but the member. Deserializing needs the
//! enum, which is only known by name at that point, so every participating
//! enum puts a resolver in a process-wide table:
//!
//! - [`magic_enum!`](crate::magic_enum) statics are submitted through
//!   `inventory` and collected on first use.
//! - Enums built by hand join with [`register`].
//!
//! The first `.` separates the enum name from the member name, so member names
//! may contain further dots.

use std::any::{Any, type_name};
use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;
use rustc_hash::FxHashMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, warn};

use crate::core::EnumCore;
use crate::error::EnumError;
use crate::member::{Member, MemberValue};

type ErasedCore = &'static (dyn Any + Send + Sync);

/// Resolver submitted by a declared enum.
///
/// `core` returns the enum's [`EnumCore`], initializing the static on first
/// call.
pub struct WireEnum {
	name: &'static str,
	core: fn() -> ErasedCore,
}

impl WireEnum {
	#[doc(hidden)]
	pub const fn new(name: &'static str, core: fn() -> ErasedCore) -> Self {
		Self { name, core }
	}
}

inventory::collect!(WireEnum);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
	#[error("'{0}' is not of the form 'Enum.Member'")]
	MissingDelimiter(String),

	#[error("no enum named '{0}' is registered for wire resolution")]
	UnknownEnum(String),

	/// The enum exists but holds values of another type.
	#[error("enum {enum_name} does not hold {expected} values")]
	ValueTypeMismatch {
		enum_name: String,
		expected: &'static str,
	},

	#[error("enum {0} is already registered for wire resolution")]
	DuplicateEnum(&'static str),

	#[error(transparent)]
	Member(#[from] EnumError),
}

#[derive(Clone, Copy)]
enum Resolver {
	Declared(fn() -> ErasedCore),
	Registered(ErasedCore),
}

impl Resolver {
	fn core(self) -> ErasedCore {
		match self {
			Self::Declared(core) => core(),
			Self::Registered(core) => core,
		}
	}
}

type Table = FxHashMap<&'static str, Resolver>;

static TABLE: LazyLock<ArcSwap<Table>> = LazyLock::new(|| {
	let mut table = Table::default();
	for declared in inventory::iter::<WireEnum> {
		if table.contains_key(declared.name) {
			warn!(enum_name = declared.name, "enum declared twice for wire resolution; keeping the first");
			continue;
		}
		table.insert(declared.name, Resolver::Declared(declared.core));
	}
	debug!(enums = table.len(), "wire resolvers collected");
	ArcSwap::from_pointee(table)
});

/// Makes a hand-built enum resolvable from the wire.
///
/// Registering the same registry twice is a no-op.
///
/// # Errors
///
/// [`WireError::DuplicateEnum`] when another enum already uses the name.
pub fn register<V: MemberValue>(core: &'static EnumCore<V>) -> Result<(), WireError> {
	let name = core.name();
	let erased: ErasedCore = core;
	loop {
		let current = TABLE.load_full();
		match current.get(name) {
			Some(Resolver::Registered(existing)) if std::ptr::addr_eq(*existing, erased) => return Ok(()),
			Some(_) => return Err(WireError::DuplicateEnum(name)),
			None => {}
		}
		let mut next = Table::clone(&current);
		next.insert(name, Resolver::Registered(erased));
		let prev = TABLE.compare_and_swap(&current, Arc::new(next));
		if Arc::ptr_eq(&prev, &current) {
			debug!(enum_name = name, "enum registered for wire resolution");
			return Ok(());
		}
	}
}

/// Looks up the member a wire string names.
///
/// # Errors
///
/// See [`WireError`]. Member lookup failures arrive as [`WireError::Member`].
pub fn resolve<V: MemberValue>(wire: &str) -> Result<Member<V>, WireError> {
	let (enum_name, member) = wire
		.split_once('.')
		.ok_or_else(|| WireError::MissingDelimiter(wire.to_owned()))?;
	let resolver = TABLE
		.load()
		.get(enum_name)
		.copied()
		.ok_or_else(|| WireError::UnknownEnum(enum_name.to_owned()))?;
	let core = resolver
		.core()
		.downcast_ref::<EnumCore<V>>()
		.ok_or_else(|| WireError::ValueTypeMismatch {
			enum_name: enum_name.to_owned(),
			expected: type_name::<V>(),
		})?;
	Ok(core.get_single_member(member)?)
}

pub fn to_wire<V>(member: &Member<V>) -> String {
	format!("{}.{}", member.enum_name(), member.name())
}

/// Names of every enum resolvable from the wire, sorted.
pub fn registered_enums() -> Vec<&'static str> {
	let mut names: Vec<_> = TABLE.load().keys().copied().collect();
	names.sort_unstable();
	names
}

impl<V> Serialize for Member<V> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(&format_args!("{}.{}", self.enum_name(), self.name()))
	}
}

impl<'de, V: MemberValue> Deserialize<'de> for Member<V> {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let wire = String::deserialize(deserializer)?;
		resolve(&wire).map_err(D::Error::custom)
	}
}

#[cfg(test)]
mod tests;
