use std::collections::HashSet;

use super::Member;

fn member<V>(name: &str, value: V) -> Member<V> {
	Member::new("Test", name, value, None)
}

#[test]
fn equality_follows_value_not_name() {
	let a = member("A", 7);
	let b = member("B", 7);
	let c = member("C", 8);

	assert_eq!(a, b);
	assert_ne!(a, c);
	assert!(!a.same_member(&b));
	assert!(a.same_member(&a.clone()));
}

#[test]
fn ordering_follows_value() {
	let mut members = vec![member("Z", 3), member("A", 1), member("M", 2)];
	members.sort();
	let names: Vec<_> = members.iter().map(|m| m.name()).collect();
	assert_eq!(names, vec!["A", "M", "Z"]);
}

#[test]
fn members_of_different_enums_never_compare_equal() {
	let north = Member::new("Compass", "North", 0, None);
	let none = Member::new("Permissions", "None", 0, None);

	assert_ne!(north, none);
	assert!(north == 0);
	assert!(none == 0);
	assert_ne!(north.cmp(&none), std::cmp::Ordering::Equal);

	let set: HashSet<_> = [north.clone(), none, member("Zero", 0), member("Nil", 0)].into_iter().collect();
	assert_eq!(set.len(), 3);
	assert!(set.contains(&north));
}

#[test]
fn display_prints_name_and_compares_to_raw_value() {
	let m = member("ValueA", 3u8);
	assert_eq!(m.to_string(), "ValueA");
	assert_eq!(m.enum_name(), "Test");
	assert!(m == 3u8);
	assert_eq!(*m.as_ref(), 3);
	assert_eq!(m.into_value(), 3);
}

#[test]
fn extension_downcasts_to_attached_type() {
	#[derive(Debug, PartialEq)]
	struct Weight(u32);

	let plain = member("Plain", 1);
	let heavy = Member::new("Test", "Heavy", 2, Some(std::sync::Arc::new(Weight(90)) as _));

	assert_eq!(plain.extension::<Weight>(), None);
	assert_eq!(heavy.extension::<Weight>(), Some(&Weight(90)));
	assert_eq!(heavy.extension::<String>(), None);
}

#[test]
fn into_value_clones_when_shared() {
	let m = member("Shared", vec![1, 2, 3]);
	let other = m.clone();
	assert_eq!(m.into_value(), vec![1, 2, 3]);
	assert_eq!(other.value(), &vec![1, 2, 3]);
}
