//! Cross-validation and colorized rendering of EBNF grammars.
//!
//! Two grammars describing the same language (one authoritative, one
//! extracted from prose) are compared production by production through their
//! canonical forms. The authoritative one can then be walked into a styled
//! token stream and coalesced into lines ready for display.

#[macro_use]
extern crate serde_derive;

pub mod canonical;
pub mod colorize;
pub mod compare;
pub mod crossref;
pub mod ebnf;
pub mod fault;
pub mod grammar;
pub mod lines;
pub mod palette;

pub use canonical::{canonicalize, canonicalize_production};
pub use colorize::{render_tokens, Item, Style, StyledToken};
pub use compare::{compare, ComparisonReport, Mismatch};
pub use crossref::enrich_links;
pub use ebnf::{Ebnf, EbnfKind, Trivia};
pub use grammar::{Grammar, Link, Production, ProductionName};
pub use lines::{coalesce_lines, Line, Run};

/// Renders `grammar` straight to coalesced lines.
pub fn render_lines(grammar: &Grammar) -> lines::Lines<colorize::Tokens<'_>> {
    coalesce_lines(render_tokens(grammar))
}
