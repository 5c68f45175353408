use std::fmt;

/// Errors raised by member registration and lookup.
///
/// All of these are contract violations surfaced to the caller. A failed
/// operation leaves the registry exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnumError {
	/// `create_member` was called with a name that is already registered.
	#[error("member name '{name}' is already defined in enum {enum_name}")]
	DuplicateName { enum_name: &'static str, name: String },

	/// No member matched a name or value lookup.
	#[error("unable to find a member with {lookup} in enum {enum_name}")]
	NotFound {
		enum_name: &'static str,
		lookup: Lookup,
	},

	/// A single-member value lookup matched more than one member.
	#[error("expected enum {enum_name} to have exactly one member with value {value}, found {count}")]
	AmbiguousValue {
		enum_name: &'static str,
		value: String,
		count: usize,
	},

	/// The next implicit value of a number or flag enum does not fit the
	/// value type. `last` is the value the sequence would have advanced from.
	#[error("{operation} of {last} overflows {type_name}")]
	ArithmeticOverflow {
		operation: Operation,
		type_name: &'static str,
		last: String,
	},

	/// A blank member name, or a missing value where the variant has no
	/// implicit one.
	#[error("invalid argument for enum {enum_name}: {reason}")]
	InvalidArgument {
		enum_name: &'static str,
		reason: String,
	},
}

/// What a failed lookup was searching for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
	Name(String),
	/// Debug rendering of the queried value.
	Value(String),
}

impl fmt::Display for Lookup {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Name(name) => write!(f, "name '{name}'"),
			Self::Value(value) => write!(f, "value {value}"),
		}
	}
}

/// Arithmetic step that overflowed while deriving an implicit value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
	Increment,
	ShiftLeft,
}

impl fmt::Display for Operation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Increment => write!(f, "increment"),
			Self::ShiftLeft => write!(f, "left shift"),
		}
	}
}

pub type Result<T, E = EnumError> = std::result::Result<T, E>;
