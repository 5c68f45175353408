//! Typed enum variants layered on [`EnumCore`](crate::EnumCore).
//!
//! Each variant owns one registry and dereferences to it for lookups. The
//! variants differ only in how a member's value is obtained:
//!
//! - [`NumberEnum`]: explicit, or the previous value plus one.
//! - [`FlagsEnum`]: explicit, or the next single-bit flag.
//! - [`StringEnum`]: explicit, or the member name.
//! - [`CustomEnum`]: always explicit.
//! - [`ObjectEnum`]: a [`TypeMarker`] for a concrete type.

mod custom;
mod object;
mod sequenced;
mod string;

pub use custom::CustomEnum;
pub use object::{IntoMarker, ObjectEnum, TypeMarker};
pub use sequenced::{FlagsEnum, NumberEnum, SequencedEnum};
pub use string::StringEnum;
