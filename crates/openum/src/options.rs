//! Per-enum configuration, fixed when the registry is constructed.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Storage policy chosen once per enum type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcurrencyMode {
	/// Plain storage until the first insert after buildup, then a one-way
	/// switch to linearizable storage.
	#[default]
	AdaptiveConcurrency,
	/// Plain storage forever. Concurrent inserts stay correct, but readers
	/// wait while a writer holds the map.
	NeverConcurrent,
}

/// How member names are compared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameMatching {
	#[default]
	CaseInsensitive,
	CaseSensitive,
}

impl NameMatching {
	/// Normalizes a member name into its index key.
	pub(crate) fn key<'a>(self, name: &'a str) -> Cow<'a, str> {
		match self {
			Self::CaseInsensitive => Cow::Owned(name.to_lowercase()),
			Self::CaseSensitive => Cow::Borrowed(name),
		}
	}
}

/// Observable lifecycle state of a registry.
///
/// Transitions are one-way: `StaticBuildup -> SingleThreaded -> Concurrent`.
/// A [`ConcurrencyMode::NeverConcurrent`] registry stops at `SingleThreaded`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConcurrencyState {
	/// Declared members are still being registered; the registry is not yet
	/// observable by other threads.
	StaticBuildup,
	SingleThreaded,
	Concurrent,
}

/// Options of one enum registry.
///
/// Missing fields deserialize to their defaults: adaptive concurrency and
/// case-insensitive names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnumOptions {
	pub concurrency: ConcurrencyMode,
	pub name_matching: NameMatching,
}

impl EnumOptions {
	/// The default options, usable in `const` and `static` contexts.
	pub const fn new() -> Self {
		Self {
			concurrency: ConcurrencyMode::AdaptiveConcurrency,
			name_matching: NameMatching::CaseInsensitive,
		}
	}

	/// Replaces the concurrency mode.
	pub const fn with_concurrency(mut self, concurrency: ConcurrencyMode) -> Self {
		self.concurrency = concurrency;
		self
	}

	/// Replaces the name comparison rule.
	pub const fn with_name_matching(mut self, name_matching: NameMatching) -> Self {
		self.name_matching = name_matching;
		self
	}

	/// Opts out of the concurrent storage upgrade.
	pub const fn never_concurrent(self) -> Self {
		self.with_concurrency(ConcurrencyMode::NeverConcurrent)
	}

	/// Treats names differing only by case as distinct members.
	pub const fn case_sensitive(self) -> Self {
		self.with_name_matching(NameMatching::CaseSensitive)
	}
}
