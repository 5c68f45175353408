//! Extensible enums.
//!
//! An enum here is a registry of named members holding values of any type:
//! integers, strings, custom structs, or type markers. Members are declared
//! up front with [`magic_enum!`] and may be added at runtime from any thread.
//! Lookups work by name (case-insensitive by default) or by value.
//!
//! # Modules
//!
//! - [`core`] - the registry every variant is built on
//! - [`variants`] - number, flags, string, custom and object enums
//! - [`declare`] - declaration interface and the [`magic_enum!`] macro
//! - [`wire`] - `"{Enum}.{Member}"` (de)serialization
//!
//! # Concurrency
//!
//! Declared registries start in static buildup, where members go into a plain
//! ordered map. Afterwards they stay on that map until the first runtime
//! insert, which copies it once into an append-only table: readers then never
//! block and writers append in amortized O(1). [`EnumCore::new`] skips the
//! buildup, and [`EnumCore::build`] runs one explicitly. Enums that are only
//! ever extended from one thread can keep the plain map with
//! [`EnumOptions::never_concurrent`].

pub mod core;
pub mod declare;
mod error;
mod member;
mod numeric;
mod options;
pub mod variants;
pub mod wire;

pub use crate::core::{EnumCore, Members};
pub use declare::Declare;
pub use error::{EnumError, Lookup, Operation, Result};
pub use member::{Member, MemberValue};
pub use numeric::{BitShift, Increment, Integral, Sequence, has_flag};
pub use options::{ConcurrencyMode, ConcurrencyState, EnumOptions, NameMatching};
pub use variants::{
	CustomEnum, FlagsEnum, IntoMarker, NumberEnum, ObjectEnum, SequencedEnum, StringEnum, TypeMarker,
};
pub use wire::WireError;

#[doc(hidden)]
pub mod __private {
	pub use inventory;
	pub use paste::paste;
}
