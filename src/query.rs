//! Media queries as a disjunction of conjunctions.
//!
//! A breakpoint contributes a single feature, `(min-width: 768px)`; the hidpi
//! query contributes several alternatives. Combining the two distributes the
//! conjunction over the alternatives:
//!
//! ```text
//! (min-width: 768px)
//!   and [(-webkit-min-device-pixel-ratio: 1.75), (min-resolution: 168dpi)]
//! = (min-width: 768px) and (-webkit-min-device-pixel-ratio: 1.75),
//!   (min-width: 768px) and (min-resolution: 168dpi)
//! ```

use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaQuery {
    branches: Vec<Vec<String>>,
}

impl MediaQuery {
    /// A query matching a single feature expression.
    pub fn feature(expr: impl Into<String>) -> Self {
        Self {
            branches: vec![vec![expr.into()]],
        }
    }

    /// `(min-width: <width>)`
    pub fn min_width(width: &str) -> Self {
        Self::feature(format!("(min-width: {width})"))
    }

    /// A query matching any of the given expressions.
    pub fn any_of<I, S>(alternatives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            branches: alternatives.into_iter().map(|a| vec![a.into()]).collect(),
        }
    }

    /// Conjunction of two queries, distributed over their alternatives.
    pub fn and(&self, other: &MediaQuery) -> MediaQuery {
        let branches = self
            .branches
            .iter()
            .flat_map(|left| {
                other.branches.iter().map(move |right| {
                    let mut branch = left.clone();
                    branch.extend(right.iter().cloned());
                    branch
                })
            })
            .collect();
        MediaQuery { branches }
    }

    /// The OR'd branches; each is a list of AND'd expressions.
    pub fn branches(&self) -> &[Vec<String>] {
        &self.branches
    }
}

impl fmt::Display for MediaQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, branch) in self.branches.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(&branch.join(" and "))?;
        }
        Ok(())
    }
}

impl Serialize for MediaQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Split a media query list on its top-level commas.
///
/// Commas nested inside parentheses stay with their expression. Empty
/// alternatives are dropped.
pub fn split_alternatives(query: &str) -> Vec<String> {
    let mut alternatives = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for c in query.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                alternatives.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    alternatives.push(current);
    alternatives
        .into_iter()
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .collect()
}
