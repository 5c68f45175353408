//! Backing stores of a registry.
//!
//! A registry publishes exactly one [`Storage`] at a time:
//!
//! - [`Storage::Plain`]: an ordered map behind a read/write lock, used during
//!   static buildup and for never-concurrent enums.
//! - [`Storage::Concurrent`]: an [`AppendTable`] with lock-free reads, seeded
//!   once from the plain map when the registry upgrades.
//!
//! # Invariants
//!
//! - Members are append-only in both stores.
//! - A plain table is sealed under its write lock in the same critical section
//!   that publishes its concurrent replacement. Writers finding a sealed table
//!   reload the storage and retry, so no insert lands in a retired store.
//! - The value index is a cache derived from the name index. It is dropped by
//!   every insert and rebuilt on the next value lookup.

use std::borrow::Borrow;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use indexmap::IndexMap;
use parking_lot::RwLock;
use rustc_hash::FxBuildHasher;

use super::append::AppendTable;
use super::registry::Insertion;
use crate::error::Result;
use crate::member::{Extension, Member, MemberValue};
use crate::options::ConcurrencyState;

pub(crate) type NameIndex<V> = IndexMap<Box<str>, Member<V>, FxBuildHasher>;

/// Members grouped by value, groups in first-seen order.
pub(crate) type ValueIndex<V> = IndexMap<ValueKey<V>, Vec<Member<V>>, FxBuildHasher>;

/// Value index key. Hashes and compares the member value only, so the index
/// can be queried with a bare `&V`.
pub(crate) struct ValueKey<V>(pub(crate) Member<V>);

impl<V: PartialEq> PartialEq for ValueKey<V> {
	fn eq(&self, other: &Self) -> bool {
		self.0.value() == other.0.value()
	}
}

impl<V: Eq> Eq for ValueKey<V> {}

impl<V: Hash> Hash for ValueKey<V> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.0.value().hash(state);
	}
}

impl<V> Borrow<V> for ValueKey<V> {
	fn borrow(&self) -> &V {
		self.0.value()
	}
}

pub(crate) fn group_by_value<'a, V: MemberValue>(members: impl Iterator<Item = &'a Member<V>>) -> ValueIndex<V> {
	let mut groups = ValueIndex::with_hasher(FxBuildHasher);
	for member in members {
		groups
			.entry(ValueKey(member.clone()))
			.or_insert_with(Vec::new)
			.push(member.clone());
	}
	groups
}

pub(crate) enum Storage<V: MemberValue> {
	Plain(RwLock<PlainTable<V>>),
	Concurrent(AppendTable<V>),
}

impl<V: MemberValue> Storage<V> {
	pub(crate) fn plain(state: ConcurrencyState) -> Self {
		Self::Plain(RwLock::new(PlainTable {
			state,
			sealed: false,
			by_name: NameIndex::default(),
			by_value: OnceLock::new(),
		}))
	}

	pub(crate) fn state(&self) -> ConcurrencyState {
		match self {
			Self::Plain(table) => table.read().state,
			Self::Concurrent(_) => ConcurrencyState::Concurrent,
		}
	}

	pub(crate) fn get(&self, key: &str) -> Option<Member<V>> {
		match self {
			Self::Plain(table) => table.read().by_name.get(key).cloned(),
			Self::Concurrent(table) => table.get(key),
		}
	}

	pub(crate) fn len(&self) -> usize {
		match self {
			Self::Plain(table) => table.read().by_name.len(),
			Self::Concurrent(table) => table.len(),
		}
	}

	/// Members in insertion order.
	pub(crate) fn members(&self) -> Vec<Member<V>> {
		match self {
			Self::Plain(table) => table.read().by_name.values().cloned().collect(),
			Self::Concurrent(table) => table.iter().cloned().collect(),
		}
	}

	pub(crate) fn value_index(&self) -> Arc<ValueIndex<V>> {
		match self {
			Self::Plain(table) => table.read().value_index(),
			Self::Concurrent(table) => table.value_index(),
		}
	}
}

/// Ordered map used before the registry goes concurrent.
pub(crate) struct PlainTable<V: MemberValue> {
	pub(crate) state: ConcurrencyState,
	/// Set once the table has been copied into a concurrent store.
	pub(crate) sealed: bool,
	by_name: NameIndex<V>,
	by_value: OnceLock<Arc<ValueIndex<V>>>,
}

impl<V: MemberValue> PlainTable<V> {
	/// Returns the member registered as `key`, or inserts a new one.
	///
	/// `value` only runs when `key` is free.
	pub(crate) fn get_or_insert(
		&mut self,
		enum_name: &'static str,
		key: Box<str>,
		name: &str,
		value: impl FnOnce() -> Result<V>,
		extension: Option<Extension>,
	) -> Result<Insertion<V>> {
		if let Some(existing) = self.by_name.get(&key) {
			return Ok(Insertion {
				member: existing.clone(),
				inserted: false,
			});
		}
		let member = Member::new(enum_name, name, value()?, extension);
		self.by_name.insert(key, member.clone());
		self.by_value = OnceLock::new();
		Ok(Insertion { member, inserted: true })
	}

	fn value_index(&self) -> Arc<ValueIndex<V>> {
		self.by_value
			.get_or_init(|| Arc::new(group_by_value(self.by_name.values())))
			.clone()
	}

	/// Copies the table into a concurrent store and retires it.
	pub(crate) fn seal(&mut self) -> AppendTable<V> {
		self.sealed = true;
		AppendTable::seeded(self.by_name.iter().map(|(key, member)| (key.clone(), member.clone())))
	}
}

/// Members of one registry, collected for iteration.
pub struct Members<V> {
	pub(crate) members: Vec<Member<V>>,
}

impl<V> Members<V> {
	/// Members in insertion order.
	pub fn iter(&self) -> std::slice::Iter<'_, Member<V>> {
		self.members.iter()
	}

	pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
		self.members.iter().map(Member::value)
	}

	pub fn len(&self) -> usize {
		self.members.len()
	}

	pub fn is_empty(&self) -> bool {
		self.members.is_empty()
	}
}

impl<'a, V> IntoIterator for &'a Members<V> {
	type Item = &'a Member<V>;
	type IntoIter = std::slice::Iter<'a, Member<V>>;

	fn into_iter(self) -> Self::IntoIter {
		self.members.iter()
	}
}
