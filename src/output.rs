//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Every rule is shown by its image first, with the condition and height as
//! indented context lines. Diagnostics follow under their own header so a
//! resolution reads as an inventory of what will be served and what was
//! skipped.
//!
//! ## Resolve
//!
//! ```text
//! hero.jpg (3 rules)
//! 001 hero.jpg
//!     When: always
//!     Height: 286px
//! 002 hero.medium.jpg
//!     When: @media (min-width: 768px)
//! 003 hero.dark.jpg
//!     When: .dark
//!
//! Diagnostics
//!     Ignoring unknown extensions 'foo' (hero.foo.jpg)
//! ```
//!
//! ## Check
//!
//! ```text
//! cat.jpg: 3 rules
//! hero.jpg: 2 rules, 1 diagnostic
//!     Ignoring unknown extensions 'foo' (hero.foo.jpg)
//! kitten.jpg: FAILED
//!     Cannot read image height of images/kitten.jpg: ...
//!
//! Checked 3 images: 1 with diagnostics, 1 failed
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure and do no I/O.

use crate::resolve::{Condition, Resolution, ResolveError};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Human-readable condition: class scope, then media query.
///
/// ```text
/// always
/// @media (min-width: 768px)
/// .dark @media (min-width: 768px)
/// ```
pub fn format_condition(condition: &Condition) -> String {
    if condition.is_unconditional() {
        return "always".to_string();
    }
    let mut parts = Vec::new();
    if let Some(scope) = condition.selector_scope() {
        parts.push(scope);
    }
    if let Some(media) = &condition.media {
        parts.push(format!("@media {media}"));
    }
    parts.join(" ")
}

pub fn format_resolution(resolution: &Resolution) -> Vec<String> {
    let mut lines = vec![format!(
        "{} ({})",
        resolution.base,
        plural(resolution.rules.len(), "rule")
    )];
    for (i, rule) in resolution.rules.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), rule.image));
        lines.push(format!(
            "{}When: {}",
            indent(1),
            format_condition(&rule.condition)
        ));
        if let Some(height) = rule.height {
            lines.push(format!("{}Height: {}px", indent(1), height));
        }
    }
    if !resolution.diagnostics.is_empty() {
        lines.push(String::new());
        lines.push("Diagnostics".to_string());
        for diagnostic in &resolution.diagnostics {
            lines.push(format!("{}{}", indent(1), diagnostic));
        }
    }
    lines
}

pub fn print_resolution(resolution: &Resolution) {
    for line in format_resolution(resolution) {
        println!("{}", line);
    }
}

pub fn format_check_report(results: &[(String, Result<Resolution, ResolveError>)]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut with_diagnostics = 0;
    let mut failed = 0;
    for (base, result) in results {
        match result {
            Ok(resolution) if resolution.diagnostics.is_empty() => {
                lines.push(format!(
                    "{base}: {}",
                    plural(resolution.rules.len(), "rule")
                ));
            }
            Ok(resolution) => {
                with_diagnostics += 1;
                lines.push(format!(
                    "{base}: {}, {}",
                    plural(resolution.rules.len(), "rule"),
                    plural(resolution.diagnostics.len(), "diagnostic")
                ));
                for diagnostic in &resolution.diagnostics {
                    lines.push(format!("{}{}", indent(1), diagnostic));
                }
            }
            Err(e) => {
                failed += 1;
                lines.push(format!("{base}: FAILED"));
                lines.push(format!("{}{}", indent(1), e));
            }
        }
    }
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "Checked {}: {} with diagnostics, {} failed",
        plural(results.len(), "image"),
        with_diagnostics,
        failed
    ));
    lines
}

pub fn print_check_report(results: &[(String, Result<Resolution, ResolveError>)]) {
    for line in format_check_report(results) {
        println!("{}", line);
    }
}
