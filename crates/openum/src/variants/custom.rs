use std::ops::Deref;

use crate::core::{EnumCore, OnExisting};
use crate::error::Result;
use crate::member::{Member, MemberValue};
use crate::options::EnumOptions;

/// Enum of caller-supplied values. Nothing is generated: every member needs an
/// explicit value.
#[derive(Debug)]
pub struct CustomEnum<V: MemberValue> {
	core: EnumCore<V>,
}

impl<V: MemberValue> CustomEnum<V> {
	pub fn new(name: &'static str, options: EnumOptions) -> Self {
		Self::from_core(EnumCore::new(name, options))
	}

	pub(crate) fn from_core(core: EnumCore<V>) -> Self {
		Self { core }
	}

	pub fn create_member(&self, name: &str, value: V) -> Result<Member<V>> {
		self.core.create_member(name, || Ok(value))
	}

	pub fn get_or_create_member(&self, name: &str, value: V) -> Result<Member<V>> {
		self.core.get_or_create_member(name, || Ok(value))
	}

	pub(crate) fn declared(&self, name: &str, value: Option<V>, on_existing: OnExisting) -> Result<Member<V>> {
		let value = value.ok_or_else(|| self.core.invalid(format!("member '{name}' needs an explicit value")))?;
		self.core
			.insert(name, || Ok(value), None, on_existing)
			.map(|i| i.member)
	}
}

impl<V: MemberValue> Deref for CustomEnum<V> {
	type Target = EnumCore<V>;

	fn deref(&self) -> &EnumCore<V> {
		&self.core
	}
}
