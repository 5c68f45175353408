//! Enums whose members are type markers.
//!
//! Each member value is a [`TypeMarker`]: a placeholder instance of some
//! concrete type, kept only so callers can dispatch on which type a member
//! stands for. Markers are built from `Default` (or a caller-supplied
//! instance) and are never meant to be read for their state.
//!
//! Two markers are equal when they wrap the same concrete type.

use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

use crate::core::{EnumCore, OnExisting};
use crate::error::Result;
use crate::member::Member;
use crate::options::EnumOptions;

/// Conversion of a concrete marker type into the enum's shared base `B`.
///
/// Implemented for every `Any + Send + Sync` type with the default base.
/// Enums dispatching through a trait object implement it per marker type:
///
/// ```
/// use std::sync::Arc;
/// use openum::IntoMarker;
///
/// trait Animal: Send + Sync {
/// 	fn sound(&self) -> &'static str;
/// }
///
/// #[derive(Default)]
/// struct Cat;
///
/// impl Animal for Cat {
/// 	fn sound(&self) -> &'static str {
/// 		"meow"
/// 	}
/// }
///
/// impl IntoMarker<dyn Animal> for Cat {
/// 	fn into_marker(self) -> Arc<dyn Animal> {
/// 		Arc::new(self)
/// 	}
/// }
/// ```
pub trait IntoMarker<B: ?Sized> {
	fn into_marker(self) -> Arc<B>;
}

impl<T: Any + Send + Sync> IntoMarker<dyn Any + Send + Sync> for T {
	fn into_marker(self) -> Arc<dyn Any + Send + Sync> {
		Arc::new(self)
	}
}

/// A placeholder instance identifying a concrete type.
pub struct TypeMarker<B: ?Sized = dyn Any + Send + Sync> {
	instance: Arc<B>,
	type_id: TypeId,
	type_name: &'static str,
}

impl<B: ?Sized> TypeMarker<B> {
	/// Marker for `T` built from its `Default`.
	pub fn of<T>() -> Self
	where
		T: Default + IntoMarker<B> + 'static,
	{
		Self::from_instance(T::default())
	}

	/// Marker wrapping an existing instance, for types without a `Default`.
	pub fn from_instance<T>(instance: T) -> Self
	where
		T: IntoMarker<B> + 'static,
	{
		Self {
			type_id: TypeId::of::<T>(),
			type_name: type_name::<T>(),
			instance: instance.into_marker(),
		}
	}

	pub fn instance(&self) -> &B {
		&self.instance
	}

	pub fn is<T: 'static>(&self) -> bool {
		self.type_id == TypeId::of::<T>()
	}

	pub fn type_id(&self) -> TypeId {
		self.type_id
	}

	pub fn type_name(&self) -> &'static str {
		self.type_name
	}
}

impl<B: ?Sized> Clone for TypeMarker<B> {
	fn clone(&self) -> Self {
		Self {
			instance: self.instance.clone(),
			type_id: self.type_id,
			type_name: self.type_name,
		}
	}
}

impl<B: ?Sized> PartialEq for TypeMarker<B> {
	fn eq(&self, other: &Self) -> bool {
		self.type_id == other.type_id
	}
}

impl<B: ?Sized> Eq for TypeMarker<B> {}

impl<B: ?Sized> Hash for TypeMarker<B> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.type_id.hash(state);
	}
}

impl<B: ?Sized> fmt::Debug for TypeMarker<B> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "TypeMarker<{}>", self.type_name)
	}
}

/// Enum whose members stand for concrete types sharing the base `B`.
pub struct ObjectEnum<B: ?Sized + Send + Sync + 'static = dyn Any + Send + Sync> {
	core: EnumCore<TypeMarker<B>>,
}

impl<B: ?Sized + Send + Sync + 'static> ObjectEnum<B> {
	pub fn new(name: &'static str, options: EnumOptions) -> Self {
		Self::from_core(EnumCore::new(name, options))
	}

	pub(crate) fn from_core(core: EnumCore<TypeMarker<B>>) -> Self {
		Self { core }
	}

	/// Registers `name` with a marker for `T`. The marker is only built once
	/// the name is known to be free.
	pub fn create_member<T>(&self, name: &str) -> Result<Member<TypeMarker<B>>>
	where
		T: Default + IntoMarker<B> + 'static,
	{
		self.core.create_member(name, || Ok(TypeMarker::of::<T>()))
	}

	pub fn create_member_with(&self, name: &str, marker: TypeMarker<B>) -> Result<Member<TypeMarker<B>>> {
		self.core.create_member(name, || Ok(marker))
	}

	pub fn get_or_create_member<T>(&self, name: &str) -> Result<Member<TypeMarker<B>>>
	where
		T: Default + IntoMarker<B> + 'static,
	{
		self.core.get_or_create_member(name, || Ok(TypeMarker::of::<T>()))
	}

	/// Members standing for `T`, in insertion order.
	pub fn members_of<T: 'static>(&self) -> Vec<Member<TypeMarker<B>>> {
		self.core
			.members()
			.iter()
			.filter(|m| m.value().is::<T>())
			.cloned()
			.collect()
	}

	pub(crate) fn declared(
		&self,
		name: &str,
		marker: Option<TypeMarker<B>>,
		on_existing: OnExisting,
	) -> Result<Member<TypeMarker<B>>> {
		let marker = marker.ok_or_else(|| self.core.invalid(format!("member '{name}' needs a marker type")))?;
		self.core
			.insert(name, || Ok(marker), None, on_existing)
			.map(|i| i.member)
	}
}

impl<B: ?Sized + Send + Sync + 'static> Deref for ObjectEnum<B> {
	type Target = EnumCore<TypeMarker<B>>;

	fn deref(&self) -> &Self::Target {
		&self.core
	}
}

impl<B: ?Sized + Send + Sync + 'static> fmt::Debug for ObjectEnum<B> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("ObjectEnum").field(&self.core).finish()
	}
}
