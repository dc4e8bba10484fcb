// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod common;

use std::{
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
	thread,
};

use common::{SumInt8, build, input};
use reifydb_core::{
	interface::AggregateFunction,
	value::column::{Column, ColumnData, Columns},
};
use reifydb_extension::ffi::scope_depth;
use reifydb_function::aggregate::GroupedAggregation;
use reifydb_sdk::{Batch, FFIAggregate, FFIContext, FFIError, ResultWriter};

#[test]
fn test_grouped_sum() {
	let function = build::<SumInt8>("sum_int8");
	let mut aggregation = GroupedAggregation::new(function).unwrap();

	aggregation.update(&input(&[1, 2, 3, 4, 5, 6]), &[0, 1, 0, 1, 2, 0]).unwrap();
	assert_eq!(aggregation.group_count(), 3);

	assert_eq!(aggregation.finalize().unwrap(), ColumnData::int8([10, 6, 5]));
	assert_eq!(scope_depth(), 0);
}

#[test]
fn test_sum_ignores_undefined_and_unselected_rows() {
	let function = build::<SumInt8>("sum_int8");
	let mut aggregation = GroupedAggregation::new(function).unwrap();

	let mut data = ColumnData::int8([1, 100, 2, 3]);
	data.set_value(2, reifydb_type::Value::Undefined).unwrap();
	let columns = Columns::new(vec![Column::new("value", data)]).with_selection(vec![0, 2, 3]);

	aggregation.update(&columns, &[0, 0, 0]).unwrap();
	assert_eq!(aggregation.finalize().unwrap(), ColumnData::int8([4]));
}

#[test]
fn test_partition_order_independence() {
	let values: Vec<i64> = (1..=120).collect();
	let groups: Vec<usize> = values.iter().map(|v| (*v % 4) as usize).collect();

	let single = {
		let mut aggregation = GroupedAggregation::new(build::<SumInt8>("sum_int8")).unwrap();
		aggregation.update(&input(&values), &groups).unwrap();
		aggregation.finalize().unwrap()
	};

	let function = build::<SumInt8>("sum_int8");
	let partitions: Vec<GroupedAggregation> = thread::scope(|s| {
		let handles: Vec<_> = values
			.chunks(25)
			.zip(groups.chunks(25))
			.rev()
			.map(|(values, groups)| {
				let function = function.clone();
				s.spawn(move || {
					let mut aggregation = GroupedAggregation::new(function).unwrap();
					aggregation.update(&input(values), groups).unwrap();
					aggregation
				})
			})
			.collect();
		handles.into_iter().map(|h| h.join().unwrap()).collect()
	});

	let mut merged = GroupedAggregation::new(function).unwrap();
	for partition in partitions {
		merged.merge(partition).unwrap();
	}
	assert_eq!(merged.finalize().unwrap(), single);
}

fn partitions(
	function: &Arc<dyn AggregateFunction>,
	values: &[i64],
	groups: &[usize],
	size: usize,
) -> Vec<GroupedAggregation> {
	values
		.chunks(size)
		.zip(groups.chunks(size))
		.map(|(values, groups)| {
			let mut aggregation = GroupedAggregation::new(function.clone()).unwrap();
			aggregation.update(&input(values), groups).unwrap();
			aggregation
		})
		.collect()
}

fn merged(mut target: GroupedAggregation, source: GroupedAggregation) -> GroupedAggregation {
	target.merge(source).unwrap();
	target
}

/// ((a + b) + c) + d
fn fold_left(parts: Vec<GroupedAggregation>) -> GroupedAggregation {
	parts.into_iter().reduce(merged).unwrap()
}

/// a + (b + (c + d))
fn fold_right(parts: Vec<GroupedAggregation>) -> GroupedAggregation {
	parts.into_iter().rev().reduce(|acc, part| merged(part, acc)).unwrap()
}

/// (a + b) + (c + d)
fn fold_tree(mut parts: Vec<GroupedAggregation>) -> GroupedAggregation {
	while parts.len() > 1 {
		let mut next = Vec::with_capacity(parts.len().div_ceil(2));
		let mut iter = parts.into_iter();
		while let Some(left) = iter.next() {
			match iter.next() {
				Some(right) => next.push(merged(left, right)),
				None => next.push(left),
			}
		}
		parts = next;
	}
	parts.pop().unwrap()
}

#[test]
fn test_grouping_and_merge_shape_independence() {
	let values: Vec<i64> = (1..=120).collect();
	let groups: Vec<usize> = values.iter().map(|v| (*v * 7 % 5) as usize).collect();

	let mut sums = vec![0i64; 5];
	for (value, group) in values.iter().zip(&groups) {
		sums[*group] += value;
	}
	let expected = ColumnData::int8(sums);

	let function = build::<SumInt8>("sum_int8");
	for size in [1, 7, 16, 25, 64, 120] {
		let left = fold_left(partitions(&function, &values, &groups, size)).finalize().unwrap();
		assert_eq!(left, expected, "left fold, chunks of {size}");

		let right = fold_right(partitions(&function, &values, &groups, size)).finalize().unwrap();
		assert_eq!(right, expected, "right fold, chunks of {size}");

		let tree = fold_tree(partitions(&function, &values, &groups, size)).finalize().unwrap();
		assert_eq!(tree, expected, "tree merge, chunks of {size}");
	}
	assert_eq!(scope_depth(), 0);
}

static TRACKED_CREATED: AtomicUsize = AtomicUsize::new(0);
static TRACKED_DROPPED: AtomicUsize = AtomicUsize::new(0);

struct Tracked(i64);

impl Default for Tracked {
	fn default() -> Self {
		TRACKED_CREATED.fetch_add(1, Ordering::SeqCst);
		Tracked(0)
	}
}

impl Drop for Tracked {
	fn drop(&mut self) {
		TRACKED_DROPPED.fetch_add(1, Ordering::SeqCst);
	}
}

struct TrackedSum;

impl FFIAggregate for TrackedSum {
	type State = Tracked;

	fn update(_ctx: &FFIContext, state: &mut Tracked, input: &Batch<'_>, row: usize) -> reifydb_sdk::Result<()> {
		state.0 += input.column(0)?.get_i64(row)?.unwrap_or(0);
		Ok(())
	}

	fn combine(_ctx: &FFIContext, source: &Tracked, target: &mut Tracked) -> reifydb_sdk::Result<()> {
		target.0 += source.0;
		Ok(())
	}

	fn finalize(_ctx: &FFIContext, state: &Tracked, result: &ResultWriter<'_>, row: usize) -> reifydb_sdk::Result<()> {
		result.set_i64(row, state.0)
	}
}

#[test]
fn test_every_state_destroyed_once() {
	let function = build::<TrackedSum>("tracked_sum");

	// abandoned before finalizing
	let mut cancelled = GroupedAggregation::new(function.clone()).unwrap();
	cancelled.update(&input(&[1, 2, 3, 4, 5]), &[0, 1, 2, 3, 4]).unwrap();
	drop(cancelled);
	assert_eq!(TRACKED_CREATED.load(Ordering::SeqCst), 5);
	assert_eq!(TRACKED_DROPPED.load(Ordering::SeqCst), 5);

	// merged partitions and a finalized result
	let mut left = GroupedAggregation::new(function.clone()).unwrap();
	left.update(&input(&[1, 2]), &[0, 1]).unwrap();
	let mut right = GroupedAggregation::new(function).unwrap();
	right.update(&input(&[3, 4, 5]), &[0, 1, 2]).unwrap();
	left.merge(right).unwrap();
	assert_eq!(left.finalize().unwrap(), ColumnData::int8([4, 6, 5]));

	assert_eq!(TRACKED_CREATED.load(Ordering::SeqCst), 5 + 3 + 3);
	assert_eq!(TRACKED_DROPPED.load(Ordering::SeqCst), 5 + 3 + 3);
}

struct RejectNegative;

impl FFIAggregate for RejectNegative {
	type State = i64;

	fn update(_ctx: &FFIContext, state: &mut i64, input: &Batch<'_>, row: usize) -> reifydb_sdk::Result<()> {
		let value = input.column(0)?.get_i64(row)?.unwrap_or(0);
		if value < 0 {
			return Err(FFIError::message(format!("negative input {value}")));
		}
		*state += value;
		Ok(())
	}

	fn combine(_ctx: &FFIContext, source: &i64, target: &mut i64) -> reifydb_sdk::Result<()> {
		*target += *source;
		Ok(())
	}

	fn finalize(_ctx: &FFIContext, state: &i64, result: &ResultWriter<'_>, row: usize) -> reifydb_sdk::Result<()> {
		result.set_i64(row, *state)
	}
}

#[test]
fn test_reported_error() {
	let mut aggregation = GroupedAggregation::new(build::<RejectNegative>("reject_negative")).unwrap();

	aggregation.update(&input(&[1, 2]), &[0, 0]).unwrap();

	let err = aggregation.update(&input(&[3, -4]), &[0, 0]).unwrap_err();
	assert_eq!(err.code(), "FUNCTION_007");
	let message = err.diagnostic().message;
	assert!(message.contains("reject_negative"), "{message}");
	assert!(message.contains("negative input -4"), "{message}");
	assert_eq!(scope_depth(), 0);

	// the next call starts from a clean outcome
	aggregation.update(&input(&[5]), &[0]).unwrap();
}

struct PanicOnFinalize;

impl FFIAggregate for PanicOnFinalize {
	type State = i64;

	fn update(_ctx: &FFIContext, _state: &mut i64, _input: &Batch<'_>, _row: usize) -> reifydb_sdk::Result<()> {
		Ok(())
	}

	fn combine(_ctx: &FFIContext, _source: &i64, _target: &mut i64) -> reifydb_sdk::Result<()> {
		Ok(())
	}

	fn finalize(_ctx: &FFIContext, _state: &i64, _result: &ResultWriter<'_>, _row: usize) -> reifydb_sdk::Result<()> {
		panic!("finalize exploded")
	}
}

#[test]
fn test_panic_becomes_execution_error() {
	let mut aggregation = GroupedAggregation::new(build::<PanicOnFinalize>("panic_on_finalize")).unwrap();
	aggregation.update(&input(&[1]), &[0]).unwrap();

	let err = aggregation.finalize().unwrap_err();
	assert_eq!(err.code(), "FUNCTION_007");
	let message = err.diagnostic().message;
	assert!(message.contains("finalize panicked: finalize exploded"), "{message}");
	assert_eq!(scope_depth(), 0);
}

struct WrongResultType;

impl FFIAggregate for WrongResultType {
	type State = i64;

	fn update(_ctx: &FFIContext, _state: &mut i64, _input: &Batch<'_>, _row: usize) -> reifydb_sdk::Result<()> {
		Ok(())
	}

	fn combine(_ctx: &FFIContext, _source: &i64, _target: &mut i64) -> reifydb_sdk::Result<()> {
		Ok(())
	}

	fn finalize(_ctx: &FFIContext, _state: &i64, result: &ResultWriter<'_>, row: usize) -> reifydb_sdk::Result<()> {
		result.set_utf8(row, "not a number")
	}
}

#[test]
fn test_result_type_mismatch() {
	let mut aggregation = GroupedAggregation::new(build::<WrongResultType>("wrong_result_type")).unwrap();
	aggregation.update(&input(&[1]), &[0]).unwrap();

	let err = aggregation.finalize().unwrap_err();
	assert_eq!(err.code(), "FUNCTION_007");
	assert!(err.diagnostic().message.contains("result.set_utf8: type mismatch"));
}

#[test]
fn test_function_shared_across_threads() {
	let function: Arc<_> = build::<SumInt8>("sum_int8");

	let results: Vec<ColumnData> = thread::scope(|s| {
		(0..4)
			.map(|i| {
				let function = function.clone();
				s.spawn(move || {
					let mut aggregation = GroupedAggregation::new(function).unwrap();
					aggregation.update(&input(&[i, i, i]), &[0, 0, 0]).unwrap();
					aggregation.finalize().unwrap()
				})
			})
			.collect::<Vec<_>>()
			.into_iter()
			.map(|h| h.join().unwrap())
			.collect()
	});

	for (i, result) in results.into_iter().enumerate() {
		assert_eq!(result, ColumnData::int8([3 * i as i64]));
	}
}
