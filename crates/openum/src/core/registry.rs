//! Adaptive member registry.
//!
//! # Mental model
//!
//! * The registry publishes one [`Storage`] through an `ArcSwap`.
//! * Until it goes concurrent, members live in a plain ordered map behind a
//!   read/write lock. Static buildup and never-concurrent registries stay there.
//! * The first insert into an adaptive registry after buildup upgrades it under
//!   `upgrade_lock` (double-checked): the plain map is sealed, copied once into
//!   an append-only table and the table is published. From then on readers
//!   never block and writers append in amortized O(1).
//!
//! # Invariants
//!
//! * Members are append-only.
//! * Name check and insert happen under one writer lock, so a name is never
//!   registered twice and no member is lost.
//! * The value factory runs at most once per call, and only after the name
//!   was found free.
//! * A failed call registers nothing.

use std::any::Any;
use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use tracing::{debug, trace};

use super::store::{Members, Storage};
use crate::error::{EnumError, Lookup, Result};
use crate::member::{Extension, Member, MemberValue};
use crate::options::{ConcurrencyMode, ConcurrencyState, EnumOptions};

/// What to do when the requested name is already registered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum OnExisting {
	Fail,
	Return,
}

/// Outcome of an insert attempt.
pub(crate) struct Insertion<V> {
	pub(crate) member: Member<V>,
	/// False when an existing member was returned instead.
	pub(crate) inserted: bool,
}

/// Registry of the members of one enum type.
pub struct EnumCore<V: MemberValue> {
	name: &'static str,
	options: EnumOptions,
	storage: ArcSwap<Storage<V>>,
	upgrade_lock: Mutex<()>,
}

impl<V: MemberValue> EnumCore<V> {
	/// Creates an empty registry that is ready to share.
	///
	/// It starts in [`ConcurrencyState::SingleThreaded`]. Use
	/// [`build`](Self::build) to register members during static buildup first.
	pub fn new(name: &'static str, options: EnumOptions) -> Self {
		Self::with_state(name, options, ConcurrencyState::SingleThreaded)
	}

	/// Creates a registry, runs `declare` on it during static buildup, then
	/// completes the buildup.
	///
	/// # Errors
	///
	/// Whatever `declare` returns. The registry is dropped in that case.
	pub fn build(
		name: &'static str,
		options: EnumOptions,
		declare: impl FnOnce(&Self) -> Result<()>,
	) -> Result<Self> {
		let core = Self::in_buildup(name, options);
		declare(&core)?;
		core.complete_buildup();
		Ok(core)
	}

	/// Creates an empty registry in [`ConcurrencyState::StaticBuildup`].
	pub(crate) fn in_buildup(name: &'static str, options: EnumOptions) -> Self {
		Self::with_state(name, options, ConcurrencyState::StaticBuildup)
	}

	fn with_state(name: &'static str, options: EnumOptions, state: ConcurrencyState) -> Self {
		Self {
			name,
			options,
			storage: ArcSwap::from_pointee(Storage::plain(state)),
			upgrade_lock: Mutex::new(()),
		}
	}

	#[inline]
	pub fn name(&self) -> &'static str {
		self.name
	}

	#[inline]
	pub fn options(&self) -> EnumOptions {
		self.options
	}

	/// Ends static buildup. Idempotent, and a no-op on registries created with
	/// [`new`](Self::new).
	pub fn complete_buildup(&self) {
		let storage = self.storage.load();
		if let Storage::Plain(table) = &**storage {
			let mut table = table.write();
			if table.state == ConcurrencyState::StaticBuildup {
				table.state = ConcurrencyState::SingleThreaded;
				drop(table);
				debug!(
					enum_name = self.name,
					members = storage.len(),
					mode = ?self.options.concurrency,
					"static buildup complete"
				);
			}
		}
	}

	pub fn concurrency_state(&self) -> ConcurrencyState {
		self.storage.load().state()
	}

	pub fn is_in_static_buildup(&self) -> bool {
		self.concurrency_state() == ConcurrencyState::StaticBuildup
	}

	pub fn is_in_concurrent_state(&self) -> bool {
		self.concurrency_state() == ConcurrencyState::Concurrent
	}

	/// Registers a new member.
	///
	/// `value` runs once, after the name has been checked. It must not create
	/// members in the same registry.
	///
	/// # Errors
	///
	/// [`EnumError::DuplicateName`] when `name` exists, [`EnumError::InvalidArgument`]
	/// for a blank name, and whatever `value` returns.
	pub fn create_member(&self, name: &str, value: impl FnOnce() -> Result<V>) -> Result<Member<V>> {
		self.insert(name, value, None, OnExisting::Fail).map(|i| i.member)
	}

	/// Registers a new member or returns the one already registered as `name`.
	///
	/// `value` does not run when the member exists.
	pub fn get_or_create_member(&self, name: &str, value: impl FnOnce() -> Result<V>) -> Result<Member<V>> {
		self.insert(name, value, None, OnExisting::Return).map(|i| i.member)
	}

	/// Like [`create_member`](Self::create_member), attaching `extension` to
	/// the member (see [`Member::extension`]).
	pub fn create_member_with_extension<X>(
		&self,
		name: &str,
		value: impl FnOnce() -> Result<V>,
		extension: X,
	) -> Result<Member<V>>
	where
		X: Any + Send + Sync,
	{
		self.insert(name, value, Some(Arc::new(extension)), OnExisting::Fail)
			.map(|i| i.member)
	}

	pub(crate) fn insert(
		&self,
		name: &str,
		value: impl FnOnce() -> Result<V>,
		extension: Option<Extension>,
		on_existing: OnExisting,
	) -> Result<Insertion<V>> {
		if name.trim().is_empty() {
			return Err(self.invalid("member name must not be empty"));
		}
		let key: Box<str> = self.options.name_matching.key(name).into();
		let adaptive = self.options.concurrency == ConcurrencyMode::AdaptiveConcurrency;

		let insertion = loop {
			let storage = self.storage.load_full();
			match &*storage {
				Storage::Concurrent(table) => break table.get_or_insert(self.name, key, name, value, extension)?,
				Storage::Plain(table) => {
					let mut table = table.write();
					if table.sealed {
						continue;
					}
					if adaptive && table.state == ConcurrencyState::SingleThreaded {
						drop(table);
						self.upgrade();
						continue;
					}
					break table.get_or_insert(self.name, key, name, value, extension)?;
				}
			}
		};

		if !insertion.inserted {
			return match on_existing {
				OnExisting::Return => Ok(insertion),
				OnExisting::Fail => Err(EnumError::DuplicateName {
					enum_name: self.name,
					name: insertion.member.name().to_string(),
				}),
			};
		}
		trace!(enum_name = self.name, member = name, "member created");
		Ok(insertion)
	}

	/// Moves the members into concurrent storage. Never reverts.
	fn upgrade(&self) {
		let _guard = self.upgrade_lock.lock();
		let storage = self.storage.load_full();
		let Storage::Plain(table) = &*storage else {
			return;
		};
		let mut table = table.write();
		let concurrent = table.seal();
		let members = concurrent.len();
		self.storage.store(Arc::new(Storage::Concurrent(concurrent)));
		drop(table);
		debug!(enum_name = self.name, members, "switched to concurrent storage");
	}

	pub(crate) fn invalid(&self, reason: impl Into<String>) -> EnumError {
		EnumError::InvalidArgument {
			enum_name: self.name,
			reason: reason.into(),
		}
	}

	pub fn try_get_single_member(&self, name: &str) -> Option<Member<V>> {
		let key = self.options.name_matching.key(name);
		self.storage.load().get(&key)
	}

	/// # Errors
	///
	/// [`EnumError::NotFound`] when no member has that name.
	pub fn get_single_member(&self, name: &str) -> Result<Member<V>> {
		self.try_get_single_member(name).ok_or_else(|| EnumError::NotFound {
			enum_name: self.name,
			lookup: Lookup::Name(name.to_string()),
		})
	}

	/// Returns the only member holding `value`, `None` when there is none.
	///
	/// # Errors
	///
	/// [`EnumError::AmbiguousValue`] when several members share `value`. Use
	/// [`get_members`](Self::get_members) for that case.
	pub fn try_get_single_member_by_value(&self, value: &V) -> Result<Option<Member<V>>> {
		let index = self.storage.load().value_index();
		match index.get(value).map(Vec::as_slice) {
			None | Some([]) => Ok(None),
			Some([only]) => Ok(Some(only.clone())),
			Some(many) => Err(EnumError::AmbiguousValue {
				enum_name: self.name,
				value: format!("{value:?}"),
				count: many.len(),
			}),
		}
	}

	pub fn get_single_member_by_value(&self, value: &V) -> Result<Member<V>> {
		self.try_get_single_member_by_value(value)?
			.ok_or_else(|| self.value_not_found(value))
	}

	/// Every member holding `value`, in insertion order.
	pub fn try_get_members(&self, value: &V) -> Option<Vec<Member<V>>> {
		self.storage.load().value_index().get(value).cloned()
	}

	pub fn get_members(&self, value: &V) -> Result<Vec<Member<V>>> {
		self.try_get_members(value)
			.ok_or_else(|| self.value_not_found(value))
	}

	fn value_not_found(&self, value: &V) -> EnumError {
		EnumError::NotFound {
			enum_name: self.name,
			lookup: Lookup::Value(format!("{value:?}")),
		}
	}

	pub fn get_member_count(&self) -> usize {
		self.storage.load().len()
	}

	pub fn get_unique_value_count(&self) -> usize {
		self.storage.load().value_index().len()
	}

	/// Distinct member values, in first-seen order.
	pub fn get_unique_values(&self) -> Vec<V>
	where
		V: Clone,
	{
		self.storage
			.load()
			.value_index()
			.keys()
			.map(|key| key.0.value().clone())
			.collect()
	}

	/// The first member registered with each distinct value, in first-seen
	/// order.
	pub fn get_unique_value_members(&self) -> Vec<Member<V>> {
		self.storage
			.load()
			.value_index()
			.keys()
			.map(|key| key.0.clone())
			.collect()
	}

	/// The value type's default, independent of the registered members.
	pub fn get_default_value(&self) -> V
	where
		V: Default,
	{
		V::default()
	}

	/// Collects the current members for iteration.
	pub fn members(&self) -> Members<V> {
		Members {
			members: self.enumerate(),
		}
	}

	/// All members in insertion order.
	pub fn enumerate(&self) -> Vec<Member<V>> {
		self.storage.load().members()
	}

	pub fn get_values(&self) -> Vec<V>
	where
		V: Clone,
	{
		self.enumerate().iter().map(|m| m.value().clone()).collect()
	}
}

impl<V: MemberValue> std::fmt::Debug for EnumCore<V> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let storage = self.storage.load();
		f.debug_struct("EnumCore")
			.field("name", &self.name)
			.field("state", &storage.state())
			.field("members", &storage.len())
			.finish()
	}
}
