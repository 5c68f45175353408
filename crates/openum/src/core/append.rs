//! Append-only member table for registries shared across threads.
//!
//! Writers are serialized by one mutex and append in amortized O(1). Readers
//! never lock: they load the published length and read write-once slots.
//!
//! # Invariants
//!
//! - Every slot is written at most once and never cleared.
//! - `len` is stored after the member's log and name slots are set, so every
//!   log index below `len` is readable.
//! - The name table stays at most half full, so a lookup always ends on an
//!   empty slot. Growth rebuilds it at twice the capacity and publishes the new
//!   table; the retired table is never written again.

use std::hash::BuildHasher;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use arc_swap::{ArcSwap, ArcSwapOption};
use parking_lot::Mutex;
use rustc_hash::FxBuildHasher;

use super::registry::Insertion;
use super::store::{ValueIndex, group_by_value};
use crate::error::Result;
use crate::member::{Extension, Member, MemberValue};

const FIRST_BUCKET: usize = 32;
const FIRST_BUCKET_BITS: u32 = FIRST_BUCKET.trailing_zeros();
const BUCKETS: usize = (usize::BITS - FIRST_BUCKET_BITS) as usize;
const MIN_NAME_SLOTS: usize = 64;

/// Maps a log index to its bucket and offset. Bucket `b` holds
/// `FIRST_BUCKET << b` slots.
fn locate(index: usize) -> (usize, usize) {
	let shifted = index + FIRST_BUCKET;
	let bucket = (usize::BITS - 1 - shifted.leading_zeros() - FIRST_BUCKET_BITS) as usize;
	(bucket, shifted - (FIRST_BUCKET << bucket))
}

/// Insertion-ordered member log in doubling buckets that never move.
struct Log<V> {
	buckets: [OnceLock<Box<[OnceLock<Member<V>>]>>; BUCKETS],
}

impl<V> Log<V> {
	fn new() -> Self {
		Self {
			buckets: std::array::from_fn(|_| OnceLock::new()),
		}
	}

	fn get(&self, index: usize) -> Option<&Member<V>> {
		let (bucket, offset) = locate(index);
		self.buckets[bucket].get()?.get(offset)?.get()
	}

	fn push(&self, index: usize, member: Member<V>) {
		let (bucket, offset) = locate(index);
		let slots = self.buckets[bucket].get_or_init(|| (0..FIRST_BUCKET << bucket).map(|_| OnceLock::new()).collect());
		let fresh = slots[offset].set(member).is_ok();
		debug_assert!(fresh, "log slot {index} written twice");
	}
}

/// Open-addressing name table with linear probing.
struct NameSlots<V> {
	slots: Box<[OnceLock<(Box<str>, Member<V>)>]>,
	mask: usize,
}

impl<V> NameSlots<V> {
	fn with_capacity(capacity: usize) -> Self {
		let capacity = capacity.next_power_of_two().max(MIN_NAME_SLOTS);
		Self {
			slots: (0..capacity).map(|_| OnceLock::new()).collect(),
			mask: capacity - 1,
		}
	}

	/// Finds `key`, or the empty slot where it would go.
	fn find(&self, key: &str) -> std::result::Result<&Member<V>, usize> {
		let mut index = FxBuildHasher.hash_one(key) as usize & self.mask;
		loop {
			match self.slots[index].get() {
				None => return Err(index),
				Some((stored, member)) if **stored == *key => return Ok(member),
				Some(_) => index = (index + 1) & self.mask,
			}
		}
	}

	fn put(&self, key: Box<str>, member: Member<V>) {
		if let Err(index) = self.find(&key) {
			let fresh = self.slots[index].set((key, member)).is_ok();
			debug_assert!(fresh, "name slot {index} written twice");
		}
	}

	fn fits(&self, count: usize) -> bool {
		count * 2 <= self.slots.len()
	}

	fn grown(&self) -> Self {
		let grown = Self::with_capacity(self.slots.len() * 2);
		for (key, member) in self.slots.iter().filter_map(OnceLock::get) {
			grown.put(key.clone(), member.clone());
		}
		grown
	}
}

struct ValueCache<V> {
	len: usize,
	index: Arc<ValueIndex<V>>,
}

pub(crate) struct AppendTable<V: MemberValue> {
	log: Log<V>,
	len: AtomicUsize,
	names: ArcSwap<NameSlots<V>>,
	writer: Mutex<()>,
	by_value: ArcSwapOption<ValueCache<V>>,
}

impl<V: MemberValue> AppendTable<V> {
	/// Builds a table holding `members` in iteration order.
	pub(crate) fn seeded(members: impl ExactSizeIterator<Item = (Box<str>, Member<V>)>) -> Self {
		let names = NameSlots::with_capacity(members.len() * 2);
		let log = Log::new();
		let mut len = 0;
		for (key, member) in members {
			log.push(len, member.clone());
			names.put(key, member);
			len += 1;
		}
		Self {
			log,
			len: AtomicUsize::new(len),
			names: ArcSwap::from_pointee(names),
			writer: Mutex::new(()),
			by_value: ArcSwapOption::empty(),
		}
	}

	pub(crate) fn len(&self) -> usize {
		self.len.load(Ordering::Acquire)
	}

	pub(crate) fn get(&self, key: &str) -> Option<Member<V>> {
		self.names.load().find(key).ok().cloned()
	}

	/// Members in insertion order, up to the length published at the call.
	pub(crate) fn iter(&self) -> impl Iterator<Item = &Member<V>> + '_ {
		(0..self.len()).filter_map(|index| self.log.get(index))
	}

	pub(crate) fn value_index(&self) -> Arc<ValueIndex<V>> {
		let len = self.len();
		if let Some(cache) = self.by_value.load().as_deref() {
			if cache.len == len {
				return Arc::clone(&cache.index);
			}
		}
		let index = Arc::new(group_by_value((0..len).filter_map(|i| self.log.get(i))));
		self.by_value.store(Some(Arc::new(ValueCache {
			len,
			index: Arc::clone(&index),
		})));
		index
	}

	/// Returns the member registered as `key`, or appends a new one.
	///
	/// `value` runs under the writer lock and only when `key` is free. It must
	/// not create members in the same registry.
	pub(crate) fn get_or_insert(
		&self,
		enum_name: &'static str,
		key: Box<str>,
		name: &str,
		value: impl FnOnce() -> Result<V>,
		extension: Option<Extension>,
	) -> Result<Insertion<V>> {
		let _writer = self.writer.lock();
		let names = self.names.load_full();
		if let Ok(existing) = names.find(&key) {
			return Ok(Insertion {
				member: existing.clone(),
				inserted: false,
			});
		}

		let member = Member::new(enum_name, name, value()?, extension);
		let index = self.len.load(Ordering::Relaxed);
		self.log.push(index, member.clone());
		let count = index + 1;
		if names.fits(count) {
			names.put(key, member.clone());
		} else {
			let grown = names.grown();
			grown.put(key, member.clone());
			self.names.store(Arc::new(grown));
		}
		self.len.store(count, Ordering::Release);
		Ok(Insertion { member, inserted: true })
	}
}
