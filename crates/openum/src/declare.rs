//! Declaring enums.
//!
//! [`Declare`] is the registration interface every variant exposes to
//! declarative member lists: a member is declared by name with an optional
//! value, and the variant decides what an omitted value means.
//!
//! [`magic_enum!`](crate::magic_enum) generates such a list as a lazily
//! initialized static. Initialization is the static buildup: all declared
//! members are registered in declaration order before the static is
//! observable, then [`EnumCore::complete_buildup`] runs. The generated static
//! is also submitted to the [wire table](crate::wire).

use crate::core::{EnumCore, OnExisting};
use crate::error::Result;
use crate::member::{Member, MemberValue};
use crate::numeric::{Integral, Sequence};
use crate::options::EnumOptions;
use crate::variants::{CustomEnum, ObjectEnum, SequencedEnum, StringEnum, TypeMarker};

/// Construction-time registration interface shared by the enum variants.
pub trait Declare: Sized {
	type Value: MemberValue;
	/// What a declaration may spell out as the member value.
	type Input;

	/// Creates an empty registry in static buildup. Call
	/// [`EnumCore::complete_buildup`] once the declared members are registered.
	fn with_options(name: &'static str, options: EnumOptions) -> Self;

	fn core(&self) -> &EnumCore<Self::Value>;

	/// Registers a declared member. `None` asks the variant for its implicit
	/// value.
	///
	/// # Errors
	///
	/// Everything `create_member` raises, plus
	/// [`EnumError::InvalidArgument`](crate::EnumError::InvalidArgument) when
	/// the variant has no implicit value.
	fn declare_member(&self, name: &str, value: Option<Self::Input>) -> Result<Member<Self::Value>>;

	/// Like [`declare_member`](Self::declare_member), returning the existing
	/// member when `name` is taken.
	fn declare_or_get_member(&self, name: &str, value: Option<Self::Input>) -> Result<Member<Self::Value>>;
}

impl<V: Integral, S: Sequence> Declare for SequencedEnum<V, S> {
	type Value = V;
	type Input = V;

	fn with_options(name: &'static str, options: EnumOptions) -> Self {
		Self::from_core(EnumCore::in_buildup(name, options))
	}

	fn core(&self) -> &EnumCore<V> {
		self
	}

	fn declare_member(&self, name: &str, value: Option<V>) -> Result<Member<V>> {
		self.sequenced(name, value, None, OnExisting::Fail)
	}

	fn declare_or_get_member(&self, name: &str, value: Option<V>) -> Result<Member<V>> {
		self.sequenced(name, value, None, OnExisting::Return)
	}
}

impl Declare for StringEnum {
	type Value = String;
	type Input = &'static str;

	fn with_options(name: &'static str, options: EnumOptions) -> Self {
		Self::from_core(EnumCore::in_buildup(name, options))
	}

	fn core(&self) -> &EnumCore<String> {
		self
	}

	fn declare_member(&self, name: &str, value: Option<&'static str>) -> Result<Member<String>> {
		self.declared(name, value, OnExisting::Fail)
	}

	fn declare_or_get_member(&self, name: &str, value: Option<&'static str>) -> Result<Member<String>> {
		self.declared(name, value, OnExisting::Return)
	}
}

impl<V: MemberValue> Declare for CustomEnum<V> {
	type Value = V;
	type Input = V;

	fn with_options(name: &'static str, options: EnumOptions) -> Self {
		Self::from_core(EnumCore::in_buildup(name, options))
	}

	fn core(&self) -> &EnumCore<V> {
		self
	}

	fn declare_member(&self, name: &str, value: Option<V>) -> Result<Member<V>> {
		self.declared(name, value, OnExisting::Fail)
	}

	fn declare_or_get_member(&self, name: &str, value: Option<V>) -> Result<Member<V>> {
		self.declared(name, value, OnExisting::Return)
	}
}

impl<B: ?Sized + Send + Sync + 'static> Declare for ObjectEnum<B> {
	type Value = TypeMarker<B>;
	type Input = TypeMarker<B>;

	fn with_options(name: &'static str, options: EnumOptions) -> Self {
		Self::from_core(EnumCore::in_buildup(name, options))
	}

	fn core(&self) -> &EnumCore<TypeMarker<B>> {
		self
	}

	fn declare_member(&self, name: &str, value: Option<TypeMarker<B>>) -> Result<Member<TypeMarker<B>>> {
		self.declared(name, value, OnExisting::Fail)
	}

	fn declare_or_get_member(&self, name: &str, value: Option<TypeMarker<B>>) -> Result<Member<TypeMarker<B>>> {
		self.declared(name, value, OnExisting::Return)
	}
}

/// Declares an enum as a lazily initialized static.
///
/// ```
/// use openum::{NumberEnum, StringEnum, magic_enum};
///
/// magic_enum! {
/// 	/// HTTP-ish status families.
/// 	pub Status: NumberEnum<u16> {
/// 		Unknown,
/// 		Ok = 200,
/// 		Created,
/// 		NotFound = 404,
/// 	}
/// }
///
/// magic_enum! {
/// 	pub Colors: StringEnum [case_sensitive] {
/// 		Red,
/// 		Green = "#00ff00",
/// 	}
/// }
///
/// # fn main() {
/// assert_eq!(*Status.Created.value(), 201);
/// assert_eq!(Status.get_single_member("notfound").unwrap().value(), &404);
/// assert_eq!(Colors.Red.value(), "Red");
/// assert!(Colors.try_get_single_member("green").is_none());
/// # }
/// ```
///
/// The static is named after the enum and dereferences to the variant, so
/// every lookup and runtime `create_member` is available on it. Each declared
/// member is also a field of the static.
///
/// Optional markers between the variant and the member list:
///
/// - `never_concurrent`: opt out of the concurrent storage upgrade.
/// - `case_sensitive`: member names differing only by case are distinct.
///
/// # Panics
///
/// The first access panics when a declaration is rejected, for example a
/// duplicate name or a [`CustomEnum`] member without a value.
#[macro_export]
macro_rules! magic_enum {
	(
		$(#[$attr:meta])*
		$vis:vis $name:ident: $kind:ty $([$($flag:ident),* $(,)?])? {
			$(
				$(#[$member_attr:meta])*
				$member:ident $(= $value:expr)?
			),* $(,)?
		}
	) => {
		$crate::__private::paste! {
			#[allow(non_snake_case)]
			$vis struct [<$name Enum>] {
				registry: $kind,
				$(
					$(#[$member_attr])*
					pub $member: $crate::Member<<$kind as $crate::Declare>::Value>,
				)*
			}

			impl ::std::ops::Deref for [<$name Enum>] {
				type Target = $kind;

				fn deref(&self) -> &$kind {
					&self.registry
				}
			}

			$(#[$attr])*
			#[allow(non_upper_case_globals, non_snake_case)]
			$vis static $name: ::std::sync::LazyLock<[<$name Enum>]> = ::std::sync::LazyLock::new(|| {
				let registry = <$kind as $crate::Declare>::with_options(
					stringify!($name),
					$crate::EnumOptions::new() $($(.$flag())*)?,
				);
				$(
					let [<__member_ $member>] = {
						let value: ::std::option::Option<<$kind as $crate::Declare>::Input> =
							$crate::__declared_value!($({$value})?);
						match $crate::Declare::declare_member(&registry, stringify!($member), value) {
							::std::result::Result::Ok(member) => member,
							::std::result::Result::Err(err) => panic!(
								"failed to declare {}.{}: {}",
								stringify!($name),
								stringify!($member),
								err
							),
						}
					};
				)*
				$crate::Declare::core(&registry).complete_buildup();
				[<$name Enum>] {
					registry,
					$($member: [<__member_ $member>],)*
				}
			});

			$crate::__private::inventory::submit! {
				$crate::wire::WireEnum::new(stringify!($name), || {
					<$kind as $crate::Declare>::core(&$name) as &'static (dyn ::std::any::Any + Send + Sync)
				})
			}
		}
	};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __declared_value {
	() => {
		::std::option::Option::None
	};
	({$value:expr}) => {
		::std::option::Option::Some($value)
	};
}
