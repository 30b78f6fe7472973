//! Trivia-free textual forms of grammar expressions. Two expressions are
//! considered equivalent exactly when their canonical forms are equal.
//!
//! Alternatives keep their order, so `a | b` and `b | a` are *not*
//! equivalent.

use crate::ebnf::{Ebnf, EbnfKind};
use crate::grammar::Production;
use itertools::Itertools;

/// Quotes a terminal, escaping `\`, `'` and `"` with a backslash.
pub fn quote_terminal(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('\'');
    for ch in text.chars() {
        if let '\\' | '\'' | '"' = ch {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('\'');
    quoted
}

pub fn canonicalize(ebnf: &Ebnf) -> String {
    match ebnf.kind() {
        EbnfKind::Terminal(text) => quote_terminal(text),
        EbnfKind::ExtendedTerminal(text) => text.clone(),
        EbnfKind::Reference(name) => name.to_string(),
        EbnfKind::OneOrMoreOf(child)
        | EbnfKind::ZeroOrMoreOf(child)
        | EbnfKind::ZeroOrOneOf(child) => {
            let op = ebnf.kind().operator().unwrap_or_default();
            if child.is_group() {
                format!("( {} ){}", canonicalize(child), op)
            } else {
                format!("{}{}", canonicalize(child), op)
            }
        }
        EbnfKind::Choice(alternatives) => alternatives.iter().map(canonicalize).join(" | "),
        EbnfKind::Sequence(elements) => elements
            .iter()
            .map(|element| {
                if element.is_choice() {
                    format!("( {} )", canonicalize(element))
                } else {
                    canonicalize(element)
                }
            })
            .join(" "),
    }
}

/// `name: body;`, or the empty string for an entry without a body.
pub fn canonicalize_production(production: &Production) -> String {
    match (&production.name, &production.ebnf) {
        (Some(name), Some(ebnf)) => format!("{}: {};", name, canonicalize(ebnf)),
        (None, Some(ebnf)) => format!(": {};", canonicalize(ebnf)),
        (_, None) => String::new(),
    }
}
