//! Cross-validation of two independently produced grammars: an authority and
//! a copy (e.g. one extracted from prose). Grammars are compared as
//! name-keyed collections, never as sequences, so moving a production around
//! is not a difference.

use crate::canonical::canonicalize_production;
use crate::grammar::{Grammar, Production, ProductionName};
use itertools::Itertools;
use std::collections::HashMap;
use std::fmt;

/// A production that both grammars define, but differently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mismatch {
    pub name: ProductionName,
    pub authority: String,
    pub copy: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub mismatches: Vec<Mismatch>,
    pub missing_in_copy: Vec<ProductionName>,
    pub missing_in_authority: Vec<ProductionName>,
}

impl ComparisonReport {
    /// `true` if the grammars agree on every production.
    pub fn is_match(&self) -> bool {
        self.mismatches.is_empty()
            && self.missing_in_copy.is_empty()
            && self.missing_in_authority.is_empty()
    }

    pub fn problem_count(&self) -> usize {
        self.mismatches.len() + self.missing_in_copy.len() + self.missing_in_authority.len()
    }
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for Mismatch {
            name,
            authority,
            copy,
        } in &self.mismatches
        {
            writeln!(f, "MISMATCH for '{}'", name)?;
            writeln!(f, "AUTHORITY:\n{}", authority)?;
            writeln!(f, "COPY:\n{}\n", copy)?;
        }
        for name in &self.missing_in_copy {
            writeln!(f, "Copy doesn't contain '{}'", name)?;
        }
        for name in &self.missing_in_authority {
            writeln!(f, "Authority doesn't contain '{}'", name)?;
        }
        Ok(())
    }
}

/// Named productions in first-occurrence order, later duplicates dropped.
fn first_occurrences(grammar: &Grammar) -> Vec<(&ProductionName, &Production)> {
    grammar
        .named_productions()
        .unique_by(|(name, _)| *name)
        .collect()
}

/// Names in `from` (except `start`) that `other` lacks.
fn missing_from(
    from: &[(&ProductionName, &Production)],
    other: &HashMap<&ProductionName, &Production>,
) -> Vec<ProductionName> {
    from.iter()
        .map(|(name, _)| *name)
        .filter(|name| !name.is_start() && !other.contains_key(name))
        .cloned()
        .collect()
}

/// Reports every way in which `copy` disagrees with `authority`. This only
/// reports; deciding whether a difference is fatal is up to the caller.
pub fn compare(authority: &Grammar, copy: &Grammar) -> ComparisonReport {
    let authority_order = first_occurrences(authority);
    let copy_order = first_occurrences(copy);
    let authority_index: HashMap<_, _> = authority_order.iter().cloned().collect();
    let copy_index: HashMap<_, _> = copy_order.iter().cloned().collect();

    let mismatches: Vec<_> = authority_order
        .iter()
        .filter_map(|(name, authority_production)| {
            let copy_production = copy_index.get(name)?;
            let authority = canonicalize_production(authority_production);
            let copy = canonicalize_production(copy_production);
            if authority == copy {
                None
            } else {
                log::debug!("production `{}` differs between grammars", name);
                Some(Mismatch {
                    name: (*name).clone(),
                    authority,
                    copy,
                })
            }
        })
        .collect();

    let missing_in_copy = missing_from(&authority_order, &copy_index);
    let missing_in_authority = missing_from(&copy_order, &authority_index);

    log::debug!(
        "compared {} authority and {} copy productions: {} mismatched, {} missing in copy, {} missing in authority",
        authority_order.len(),
        copy_order.len(),
        mismatches.len(),
        missing_in_copy.len(),
        missing_in_authority.len(),
    );

    ComparisonReport {
        mismatches,
        missing_in_copy,
        missing_in_authority,
    }
}

#[test]
fn missing_names_are_reported_on_the_right_side() {
    use crate::ebnf::Ebnf;

    let authority = Grammar::new(vec![
        Production::rule("start", Ebnf::reference("foo")),
        Production::rule("foo", Ebnf::terminal("foo")),
    ]);
    let copy = Grammar::new(vec![Production::rule("start", Ebnf::reference("foo"))]);

    let report = compare(&authority, &copy);
    assert_eq!(report.missing_in_copy, vec![ProductionName::new("foo")]);
    assert!(report.missing_in_authority.is_empty());
    assert!(report.mismatches.is_empty());
    assert!(!report.is_match());

    // `start` itself is never required on either side.
    let report = compare(&copy, &Grammar::default());
    assert!(report.is_match());
}
