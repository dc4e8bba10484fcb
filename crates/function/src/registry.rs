// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::HashMap, ops::Deref, sync::Arc};

use crate::{ScalarFunction, sequence::nextval::NextVal};

type ScalarFunctionFactory = Box<dyn Fn() -> Box<dyn ScalarFunction> + Send + Sync>;

#[derive(Clone)]
pub struct Functions(Arc<FunctionsInner>);

pub struct FunctionsInner {
	scalars: HashMap<String, ScalarFunctionFactory>,
}

impl Deref for Functions {
	type Target = FunctionsInner;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl Functions {
	pub fn builder() -> FunctionsBuilder {
		FunctionsBuilder {
			scalars: HashMap::new(),
		}
	}

	/// Registry holding every function the engine ships with
	pub fn builtin() -> Self {
		Self::builder().register_scalar("nextval", NextVal::new).build()
	}
}

impl FunctionsInner {
	pub fn get_scalar(&self, name: &str) -> Option<Box<dyn ScalarFunction>> {
		self.scalars.get(name).map(|func| func())
	}

	pub fn scalar_names(&self) -> Vec<&str> {
		self.scalars.keys().map(String::as_str).collect()
	}
}

pub struct FunctionsBuilder {
	scalars: HashMap<String, ScalarFunctionFactory>,
}

impl FunctionsBuilder {
	pub fn register_scalar<F, A>(mut self, name: &str, init: F) -> Self
	where
		F: Fn() -> A + Send + Sync + 'static,
		A: ScalarFunction + 'static,
	{
		self.scalars.insert(name.to_string(), Box::new(move || Box::new(init()) as Box<dyn ScalarFunction>));
		self
	}

	pub fn build(self) -> Functions {
		Functions(Arc::new(FunctionsInner {
			scalars: self.scalars,
		}))
	}
}
