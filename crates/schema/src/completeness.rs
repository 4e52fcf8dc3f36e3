//! Comparison of received file identifiers against the expected set.

use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "file_ids", rename_all = "snake_case")]
pub enum Discrepancy {
    /// Expected but not returned.
    Missing(BTreeSet<String>),
    /// Returned but not expected.
    Unexpected(BTreeSet<String>),
}

impl Discrepancy {
    pub fn file_ids(&self) -> &BTreeSet<String> {
        match self {
            Discrepancy::Missing(ids) | Discrepancy::Unexpected(ids) => ids,
        }
    }
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (label, ids) = match self {
            Discrepancy::Missing(ids) => ("Missing file_ids", ids),
            Discrepancy::Unexpected(ids) => ("Unexpected file_ids", ids),
        };
        let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
        write!(f, "{label}: {}", ids.join(", "))
    }
}

/// At most one `Missing` followed by at most one `Unexpected`. Empty when
/// the received ids equal the expected set. Duplicates in `received` are
/// treated as one.
pub fn find_discrepancies<'a, I>(received: I, expected: &HashSet<String>) -> Vec<Discrepancy>
where
    I: IntoIterator<Item = &'a str>,
{
    let received: HashSet<&str> = received.into_iter().collect();

    let missing: BTreeSet<String> = expected
        .iter()
        .filter(|id| !received.contains(id.as_str()))
        .cloned()
        .collect();
    let extra: BTreeSet<String> = received
        .iter()
        .filter(|id| !expected.contains(**id))
        .map(|id| id.to_string())
        .collect();

    let mut discrepancies = Vec::new();
    if !missing.is_empty() {
        discrepancies.push(Discrepancy::Missing(missing));
    }
    if !extra.is_empty() {
        discrepancies.push(Discrepancy::Unexpected(extra));
    }
    discrepancies
}
