// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::Write;

use crate::error::diagnostic::Diagnostic;

pub struct DefaultRenderer;

impl DefaultRenderer {
	pub fn render_string(diagnostic: &Diagnostic) -> String {
		let mut output = String::new();
		Self::render(&mut output, diagnostic, 0);
		output
	}

	fn render(output: &mut String, diagnostic: &Diagnostic, depth: usize) {
		let indent = "  ".repeat(depth);

		let _ = writeln!(output, "{indent}Error {}", diagnostic.code);
		let _ = writeln!(output, "{indent}  {}", diagnostic.message);

		if let Some(label) = &diagnostic.label {
			let _ = writeln!(output, "{indent}  = {label}");
		}

		if let Some(help) = &diagnostic.help {
			let _ = writeln!(output, "{indent}help: {help}");
		}

		for note in &diagnostic.notes {
			let _ = writeln!(output, "{indent}note: {note}");
		}

		if let Some(cause) = &diagnostic.cause {
			let _ = writeln!(output, "{indent}caused by:");
			Self::render(output, cause, depth + 1);
		}
	}
}
