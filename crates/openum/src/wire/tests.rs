use pretty_assertions::assert_eq;

use super::{WireError, register, registered_enums, resolve, to_wire};
use crate::core::EnumCore;
use crate::error::{EnumError, Lookup};
use crate::options::EnumOptions;
use crate::variants::NumberEnum;

crate::magic_enum! {
	Planets: NumberEnum<u8> {
		Mercury = 1,
		Venus,
		Earth,
	}
}

fn leaked(name: &'static str, members: &[(&str, i64)]) -> &'static EnumCore<i64> {
	let core = EnumCore::build(name, EnumOptions::new(), |core| {
		for &(member, value) in members {
			core.create_member(member, || Ok(value))?;
		}
		Ok(())
	})
	.unwrap();
	Box::leak(Box::new(core))
}

#[test]
fn declared_enums_are_collected() {
	assert!(registered_enums().contains(&"Planets"));
	let earth = resolve::<u8>("Planets.Earth").unwrap();
	assert!(earth.same_member(&Planets.Earth));
	assert_eq!(*earth.value(), 3);
}

#[test]
fn registered_enum_round_trips() {
	let core = leaked("WireTestRegistered", &[("Alpha", 10), ("Beta", 20)]);
	register(core).unwrap();
	register(core).unwrap();

	let beta = core.get_single_member("Beta").unwrap();
	assert_eq!(to_wire(&beta), "WireTestRegistered.Beta");
	assert!(resolve::<i64>("WireTestRegistered.beta").unwrap().same_member(&beta));
}

#[test]
fn second_enum_with_same_name_is_rejected() {
	let first = leaked("WireTestTaken", &[]);
	let second = leaked("WireTestTaken", &[]);
	register(first).unwrap();

	assert_eq!(register(second), Err(WireError::DuplicateEnum("WireTestTaken")));
	assert_eq!(register(leaked("Planets", &[])), Err(WireError::DuplicateEnum("Planets")));
}

#[test]
fn member_names_may_contain_dots() {
	let core = leaked("WireTestDotted", &[("v1.2", 12)]);
	register(core).unwrap();
	assert_eq!(*resolve::<i64>("WireTestDotted.v1.2").unwrap().value(), 12);
}

#[test]
fn resolution_failures() {
	register(leaked("WireTestFailures", &[("Known", 1)])).unwrap();

	assert_eq!(
		resolve::<i64>("NoDelimiter").unwrap_err(),
		WireError::MissingDelimiter("NoDelimiter".into())
	);
	assert_eq!(
		resolve::<i64>("Nowhere.Known").unwrap_err(),
		WireError::UnknownEnum("Nowhere".into())
	);
	assert_eq!(
		resolve::<String>("WireTestFailures.Known").unwrap_err(),
		WireError::ValueTypeMismatch {
			enum_name: "WireTestFailures".into(),
			expected: std::any::type_name::<String>(),
		}
	);
	assert_eq!(
		resolve::<i64>("WireTestFailures.Unknown").unwrap_err(),
		WireError::Member(EnumError::NotFound {
			enum_name: "WireTestFailures",
			lookup: Lookup::Name("Unknown".into()),
		})
	);
}

#[test]
fn serde_uses_wire_string() {
	let json = serde_json::to_string(&Planets.Venus).unwrap();
	assert_eq!(json, "\"Planets.Venus\"");

	let back: crate::Member<u8> = serde_json::from_str(&json).unwrap();
	assert!(back.same_member(&Planets.Venus));

	let err = serde_json::from_str::<crate::Member<u8>>("\"Planets.Pluto\"").unwrap_err();
	assert!(err.to_string().contains("Pluto"));
}
