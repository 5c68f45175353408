//! Enums declared with `magic_enum!`, exercised through their statics.

use std::any::Any;

use openum::{
	ConcurrencyState, CustomEnum, EnumError, NumberEnum, ObjectEnum, StringEnum, TypeMarker,
	magic_enum,
};
use pretty_assertions::assert_eq;

magic_enum! {
	/// Mixed implicit and explicit numbers.
	pub Numbers: NumberEnum<u32> {
		InitialImplicit,
		Implicit,
		NonIncremental = 6,
		NonExistingExplicit,
		ExistingExplicit = 7,
		SubsequentImplicit,
	}
}

magic_enum! {
	Flags: openum::FlagsEnum {
		A,
		B = 1 << 0,
		C = 1 << 1,
		D = 1 << 2,
		E = 1 << 3,
		F,
		G,
		H,
	}
}

magic_enum! {
	Strings: StringEnum {
		ValueA,
		ValueB = "b",
	}
}

magic_enum! {
	Plain: NumberEnum [never_concurrent] {
		None,
		Some,
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Text(&'static str);

magic_enum! {
	Texts: CustomEnum<Text> {
		ValueA = Text("ValueA"),
		ValueB = Text("ValueB"),
	}
}

#[derive(Default)]
struct Cat;

#[derive(Default)]
struct Dog;

magic_enum! {
	Animals: ObjectEnum {
		Cat = TypeMarker::of::<Cat>(),
		Dog = TypeMarker::of::<Dog>(),
	}
}

#[test]
fn number_values_follow_declarations() {
	assert_eq!(*Numbers.InitialImplicit.value(), 0);
	assert_eq!(*Numbers.Implicit.value(), 1);
	assert_eq!(*Numbers.NonIncremental.value(), 6);
	assert_eq!(*Numbers.NonExistingExplicit.value(), 7);
	assert_eq!(*Numbers.ExistingExplicit.value(), 7);
	assert_eq!(*Numbers.SubsequentImplicit.value(), 8);
	assert_eq!(Numbers.get_default_value(), *Numbers.InitialImplicit.value());
}

#[test]
fn number_lookups() {
	assert_eq!(*Numbers.get_single_member("NonIncremental").unwrap().value(), 6);
	assert_eq!(Numbers.get_single_member_by_value(&6).unwrap().name(), "NonIncremental");
	assert_eq!(Numbers.get_member_count(), 6);
	assert_eq!(Numbers.get_unique_value_count(), 5);

	let names: Vec<_> = Numbers.enumerate().iter().map(|m| m.name().to_string()).collect();
	assert_eq!(
		names,
		vec![
			"InitialImplicit",
			"Implicit",
			"NonIncremental",
			"NonExistingExplicit",
			"ExistingExplicit",
			"SubsequentImplicit",
		]
	);
}

#[test]
fn number_equality_is_by_value() {
	assert!(Numbers.InitialImplicit == 0);
	assert_ne!(Numbers.InitialImplicit, Numbers.Implicit);
	assert_eq!(Numbers.NonExistingExplicit, Numbers.ExistingExplicit);
	assert!(!Numbers.NonExistingExplicit.same_member(&Numbers.ExistingExplicit));
}

#[test]
fn equal_values_of_different_enums_are_distinct() {
	assert!(Flags.A == 0);
	assert!(Plain.None == 0);
	assert_ne!(Flags.A, Plain.None);
	assert_ne!(Flags.B, Plain.Some);
}

#[test]
fn flags_values() {
	let values: Vec<i32> = [&Flags.A, &Flags.B, &Flags.C, &Flags.D, &Flags.E, &Flags.F, &Flags.G, &Flags.H]
		.into_iter()
		.map(|m| *m.value())
		.collect();
	assert_eq!(values, vec![0, 1, 2, 4, 8, 16, 32, 64]);

	let names: Vec<_> = Flags.get_unique_flags(0b1010).iter().map(|m| m.name().to_string()).collect();
	assert_eq!(names, vec!["C", "E"]);
}

#[test]
fn string_values() {
	assert_eq!(Strings.ValueA.value(), "ValueA");
	assert_eq!(Strings.ValueB.value(), "b");
	assert_eq!(Strings.get_single_member("valueb").unwrap().to_string(), "ValueB");
}

#[test]
fn custom_values() {
	assert_eq!(Texts.ValueA.value().0, "ValueA");
	assert_eq!(Texts.get_single_member("ValueB").unwrap().value(), &Text("ValueB"));
	assert!(Texts.ValueA == Text("ValueA"));
	assert_ne!(Texts.ValueA, Texts.ValueB);
	assert_eq!(Texts.get_unique_value_count(), 2);
}

#[test]
fn object_markers() {
	assert!(Animals.Cat.value().is::<Cat>());
	assert!(Animals.Dog.value().instance().downcast_ref::<Dog>().is_some());
	assert_eq!(Animals.Cat, Animals.Cat.clone());
	assert_ne!(Animals.Cat, Animals.Dog);

	let dog: TypeMarker<dyn Any + Send + Sync> = TypeMarker::of::<Dog>();
	assert!(Animals.get_single_member_by_value(&dog).unwrap().same_member(&Animals.Dog));
}

#[test]
fn declared_statics_leave_buildup() {
	assert_ne!(Strings.concurrency_state(), ConcurrencyState::StaticBuildup);
	assert_ne!(Texts.concurrency_state(), ConcurrencyState::StaticBuildup);
}

#[test]
fn never_concurrent_static_accepts_runtime_members() {
	let added = Plain.create_member("Later").unwrap();
	assert_eq!(*added.value(), 2);
	assert_eq!(Plain.concurrency_state(), ConcurrencyState::SingleThreaded);
	assert_eq!(*Plain.None.value(), 0);
	assert_eq!(*Plain.Some.value(), 1);
}

#[test]
fn runtime_members_extend_declared_enum() {
	let created = Strings.create_member("Dynamic").unwrap();
	assert_eq!(created.value(), "Dynamic");
	assert!(Strings.is_in_concurrent_state());
	assert!(matches!(
		Strings.create_member("VALUEA"),
		Err(EnumError::DuplicateName { enum_name: "Strings", .. })
	));
}
