use std::ops::Deref;

use crate::core::{EnumCore, OnExisting};
use crate::error::Result;
use crate::member::Member;
use crate::options::EnumOptions;

/// Enum of string values. A member declared without a value holds its own
/// name.
#[derive(Debug)]
pub struct StringEnum {
	core: EnumCore<String>,
}

impl StringEnum {
	pub fn new(name: &'static str, options: EnumOptions) -> Self {
		Self::from_core(EnumCore::new(name, options))
	}

	pub(crate) fn from_core(core: EnumCore<String>) -> Self {
		Self { core }
	}

	pub fn create_member(&self, name: &str) -> Result<Member<String>> {
		self.core.create_member(name, || Ok(name.to_owned()))
	}

	pub fn create_member_with(&self, name: &str, value: impl Into<String>) -> Result<Member<String>> {
		self.core.create_member(name, || Ok(value.into()))
	}

	pub fn get_or_create_member(&self, name: &str) -> Result<Member<String>> {
		self.core.get_or_create_member(name, || Ok(name.to_owned()))
	}

	pub fn get_or_create_member_with(&self, name: &str, value: impl Into<String>) -> Result<Member<String>> {
		self.core.get_or_create_member(name, || Ok(value.into()))
	}

	pub(crate) fn declared(&self, name: &str, value: Option<&str>, on_existing: OnExisting) -> Result<Member<String>> {
		let value = value.unwrap_or(name);
		self.core
			.insert(name, || Ok(value.to_owned()), None, on_existing)
			.map(|i| i.member)
	}
}

impl Deref for StringEnum {
	type Target = EnumCore<String>;

	fn deref(&self) -> &EnumCore<String> {
		&self.core
	}
}
