//! Runtime member creation racing across threads.

use std::sync::Barrier;
use std::thread;

use openum::{ConcurrencyState, EnumOptions, FlagsEnum, NumberEnum, StringEnum};
use pretty_assertions::assert_eq;

const THREADS: usize = 8;

fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn implicit_values_are_unique_and_gapless() {
	init_tracing();
	const PER_THREAD: usize = 125;
	let numbers: NumberEnum<u64> = NumberEnum::new("ImplicitRace", EnumOptions::new());
	let barrier = Barrier::new(THREADS);

	thread::scope(|scope| {
		for worker in 0..THREADS {
			let numbers = &numbers;
			let barrier = &barrier;
			scope.spawn(move || {
				barrier.wait();
				for i in 0..PER_THREAD {
					numbers.create_member(&format!("{worker}-{i}")).unwrap();
				}
			});
		}
	});

	let mut values = numbers.get_values();
	values.sort_unstable();
	let expected: Vec<u64> = (0..(THREADS * PER_THREAD) as u64).collect();
	assert_eq!(values, expected);
	assert_eq!(numbers.get_unique_value_count(), THREADS * PER_THREAD);
	assert_eq!(numbers.concurrency_state(), ConcurrencyState::Concurrent);
	assert_eq!(numbers.last_inserted_value(), Some((THREADS * PER_THREAD) as u64 - 1));
}

#[test]
fn explicit_values_all_land() {
	init_tracing();
	const TOTAL: u64 = 1000;
	let numbers: NumberEnum<u64> = NumberEnum::new("ExplicitRace", EnumOptions::new());

	thread::scope(|scope| {
		for worker in 0..THREADS as u64 {
			let numbers = &numbers;
			scope.spawn(move || {
				for value in (worker..TOTAL).step_by(THREADS) {
					numbers.create_member_with(&value.to_string(), value).unwrap();
				}
			});
		}
	});

	let mut values = numbers.get_values();
	values.sort_unstable();
	assert_eq!(values, (0..TOTAL).collect::<Vec<_>>());
	assert!(numbers.is_in_concurrent_state());
}

#[test]
fn implicit_flags_stay_single_bits() {
	init_tracing();
	let flags: FlagsEnum<u64> = FlagsEnum::new("FlagRace", EnumOptions::new());
	flags.create_member("None").unwrap();

	thread::scope(|scope| {
		for worker in 0..THREADS {
			let flags = &flags;
			scope.spawn(move || {
				for i in 0..4 {
					flags.create_member(&format!("Flag{worker}_{i}")).unwrap();
				}
			});
		}
	});

	let mut values = flags.get_values();
	values.sort_unstable();
	let expected: Vec<u64> = std::iter::once(0).chain((0..(THREADS * 4) as u32).map(|bit| 1u64 << bit)).collect();
	assert_eq!(values, expected);
}

#[test]
fn racing_get_or_create_agrees_on_one_member() {
	init_tracing();
	let strings = StringEnum::new("Agreement", EnumOptions::new());
	let barrier = Barrier::new(THREADS);

	let results: Vec<_> = thread::scope(|scope| {
		let handles: Vec<_> = (0..THREADS)
			.map(|_| {
				let strings = &strings;
				let barrier = &barrier;
				scope.spawn(move || {
					barrier.wait();
					(0..50)
						.map(|i| strings.get_or_create_member(&format!("Shared{i}")).unwrap())
						.collect::<Vec<_>>()
				})
			})
			.collect();
		handles.into_iter().map(|h| h.join().unwrap()).collect()
	});

	assert_eq!(strings.get_member_count(), 50);
	for per_thread in &results {
		for (i, member) in per_thread.iter().enumerate() {
			let stored = strings.get_single_member(&format!("shared{i}")).unwrap();
			assert!(member.same_member(&stored));
		}
	}
}

#[test]
fn readers_never_see_partial_snapshots() {
	init_tracing();
	let numbers: NumberEnum<u32> = NumberEnum::new("Readers", EnumOptions::new());

	thread::scope(|scope| {
		scope.spawn(|| {
			for i in 0..500u32 {
				numbers.create_member_with(&format!("M{i}"), i).unwrap();
			}
		});
		for _ in 0..3 {
			scope.spawn(|| {
				for _ in 0..200 {
					let pinned = numbers.members();
					let values: Vec<u32> = pinned.values().copied().collect();
					// Single writer: every snapshot is a prefix of the final order.
					assert!(values.iter().enumerate().all(|(i, &v)| v == i as u32));
					assert!(numbers.get_unique_value_count() >= values.len());
				}
			});
		}
	});

	assert_eq!(numbers.get_member_count(), 500);
}

#[test]
fn never_concurrent_single_writer() {
	init_tracing();
	let numbers: NumberEnum = NumberEnum::new("SingleWriter", EnumOptions::new().never_concurrent());
	for i in 0..100 {
		numbers.create_member(&format!("N{i}")).unwrap();
	}

	assert_eq!(numbers.concurrency_state(), ConcurrencyState::SingleThreaded);
	assert!(!numbers.is_in_concurrent_state());
	assert_eq!(numbers.get_values(), (0..100).collect::<Vec<_>>());
}

#[test]
fn extension_members_advance_the_sequence_under_contention() {
	init_tracing();
	let numbers: NumberEnum<u32> = NumberEnum::new("ExtendedRace", EnumOptions::new());

	thread::scope(|scope| {
		for worker in 0..THREADS {
			let numbers = &numbers;
			scope.spawn(move || {
				for i in 0..50 {
					if i % 2 == 0 {
						numbers.create_member_with_extension(&format!("X{worker}-{i}"), None, worker).unwrap();
					} else {
						numbers.create_member(&format!("P{worker}-{i}")).unwrap();
					}
				}
			});
		}
	});

	let mut values = numbers.get_values();
	values.sort_unstable();
	assert_eq!(values, (0..(THREADS * 50) as u32).collect::<Vec<_>>());
	let tagged = numbers.get_single_member("x3-0").unwrap();
	assert_eq!(tagged.extension::<usize>(), Some(&3));
}
