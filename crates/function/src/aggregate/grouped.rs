// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use reifydb_core::{
	interface::{AggregateFunction, StatePtr},
	value::column::{ColumnData, Columns},
};
use reifydb_type::{error::diagnostic::internal::internal, return_error};
use tracing::instrument;

use crate::aggregate::AggregateStates;

/// Drives one aggregate over a partition of the input, one state per group.
///
/// Groups are dense ids starting at zero. Partitions aggregated on different
/// threads are merged with [`GroupedAggregation::merge`] before finalizing.
pub struct GroupedAggregation {
	states: AggregateStates,
}

impl GroupedAggregation {
	pub fn new(function: Arc<dyn AggregateFunction>) -> crate::Result<Self> {
		Ok(Self {
			states: AggregateStates::new(function)?,
		})
	}

	pub fn group_count(&self) -> usize {
		self.states.len()
	}

	pub fn function(&self) -> &Arc<dyn AggregateFunction> {
		self.states.function()
	}

	/// Feeds `input` into the groups; `groups[i]` is the group of active row `i`.
	#[instrument(name = "aggregate::update", level = "trace", skip_all, fields(function = self.function().name(), rows = groups.len()))]
	pub fn update(&mut self, input: &Columns, groups: &[usize]) -> crate::Result<()> {
		if groups.len() != input.active_count() {
			return_error!(internal(format!(
				"{} group ids for {} active rows",
				groups.len(),
				input.active_count()
			)));
		}
		if groups.is_empty() {
			return Ok(());
		}

		if let Some(max) = groups.iter().max() {
			self.states.ensure(max + 1)?;
		}
		let states: Vec<StatePtr> = groups.iter().map(|&g| self.states.states()[g]).collect();

		let function = self.states.function().clone();
		function.update(input, &states)
	}

	/// Folds the groups of `other` into the groups with the same id here.
	#[instrument(name = "aggregate::merge", level = "trace", skip_all, fields(function = self.function().name(), groups = other.group_count()))]
	pub fn merge(&mut self, other: GroupedAggregation) -> crate::Result<()> {
		if other.group_count() == 0 {
			return Ok(());
		}
		self.states.ensure(other.group_count())?;

		let function = self.states.function().clone();
		function.combine(other.states.states(), &self.states.states()[..other.group_count()])
	}

	/// Produces one row per group, in group id order.
	#[instrument(name = "aggregate::finalize", level = "trace", skip_all, fields(function = self.function().name(), groups = self.group_count()))]
	pub fn finalize(self) -> crate::Result<ColumnData> {
		let function = self.states.function().clone();
		let mut result = ColumnData::undefined_typed(function.return_type(), self.group_count());
		function.finalize(self.states.states(), &mut result, 0)?;
		Ok(result)
	}
}
