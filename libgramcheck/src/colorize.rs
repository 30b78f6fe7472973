//! Walks a grammar and produces a flat stream of styled tokens and line
//! breaks. The stream is pulled lazily; walking the same grammar again yields
//! the same stream.

use crate::canonical::quote_terminal;
use crate::ebnf::{Ebnf, EbnfKind};
use crate::grammar::{Grammar, Production};
use std::borrow::Cow;

/// Indentation emitted after every line break that happens inside a rule.
pub const INDENT: &str = "\t";

/// The display categories. How each one looks is up to whoever renders the
/// lines; see `palette` for the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    Plain,
    Production,
    Comment,
    Terminal,
    ExtendedTerminal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledToken<'a> {
    pub text: Cow<'a, str>,
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item<'a> {
    Token(StyledToken<'a>),
    LineBreak,
}

impl<'a> Item<'a> {
    pub fn token(text: impl Into<Cow<'a, str>>, style: Style) -> Self {
        Item::Token(StyledToken {
            text: text.into(),
            style,
        })
    }

    pub fn into_owned(self) -> Item<'static> {
        match self {
            Item::Token(StyledToken { text, style }) => Item::token(text.into_owned(), style),
            Item::LineBreak => Item::LineBreak,
        }
    }
}

/// Pending work for the `Tokens` iterator.
enum Step<'g> {
    Production(&'g Production),
    Node(&'g Ebnf),
    Emit(Item<'g>),
}

fn emit<'g>(text: impl Into<Cow<'g, str>>, style: Style) -> Step<'g> {
    Step::Emit(Item::token(text, style))
}

fn plain<'g>(text: impl Into<Cow<'g, str>>) -> Step<'g> {
    emit(text, Style::Plain)
}

/// The token stream of a grammar. Holds nothing but borrows of the grammar
/// and a stack of not-yet-expanded nodes.
pub struct Tokens<'g> {
    productions: std::slice::Iter<'g, Production>,
    stack: Vec<Step<'g>>,
}

pub fn render_tokens(grammar: &Grammar) -> Tokens<'_> {
    Tokens {
        productions: grammar.productions.iter(),
        stack: Vec::new(),
    }
}

/// The token stream of a single expression, without any production framing.
pub fn render_ebnf(ebnf: &Ebnf) -> Tokens<'_> {
    Tokens {
        productions: (&[] as &[Production]).iter(),
        stack: vec![Step::Node(ebnf)],
    }
}

impl<'g> Tokens<'g> {
    fn push_all(&mut self, steps: Vec<Step<'g>>) {
        self.stack.extend(steps.into_iter().rev());
    }
}

impl<'g> Iterator for Tokens<'g> {
    type Item = Item<'g>;

    fn next(&mut self) -> Option<Item<'g>> {
        loop {
            let step = match self.stack.pop() {
                Some(step) => step,
                None => Step::Production(self.productions.next()?),
            };
            match step {
                Step::Emit(item) => return Some(item),
                Step::Production(production) => self.push_all(production_steps(production)),
                Step::Node(ebnf) => self.push_all(node_steps(ebnf)),
            }
        }
    }
}

fn production_steps(production: &Production) -> Vec<Step<'_>> {
    let ebnf = match &production.ebnf {
        Some(ebnf) => ebnf,
        None => {
            return match production.comment_text() {
                None => vec![Step::Emit(Item::LineBreak)],
                Some(comment) => vec![
                    emit(format!("// {}", comment), Style::Comment),
                    Step::Emit(Item::LineBreak),
                ],
            };
        }
    };

    let mut steps = Vec::new();
    if let Some(name) = &production.name {
        steps.push(emit(name.as_str(), Style::Production));
    }
    steps.push(plain(":"));
    if production.rule_starts_on_new_line {
        steps.push(Step::Emit(Item::LineBreak));
        steps.push(plain(INDENT));
        steps.push(plain("| "));
    } else {
        steps.push(plain(" "));
    }
    steps.push(Step::Node(ebnf));
    steps.push(plain(";"));
    if let Some(comment) = production.comment_text() {
        steps.push(emit(format!("  //{}", comment), Style::Comment));
    }
    steps.push(Step::Emit(Item::LineBreak));
    steps
}

fn node_steps(ebnf: &Ebnf) -> Vec<Step<'_>> {
    let mut steps = Vec::new();
    match ebnf.kind() {
        EbnfKind::Terminal(text) => steps.push(emit(quote_terminal(text), Style::Terminal)),
        EbnfKind::ExtendedTerminal(text) => {
            steps.push(emit(text.as_str(), Style::ExtendedTerminal))
        }
        EbnfKind::Reference(name) => steps.push(emit(name.as_str(), Style::Production)),
        EbnfKind::OneOrMoreOf(child)
        | EbnfKind::ZeroOrMoreOf(child)
        | EbnfKind::ZeroOrOneOf(child) => {
            if child.is_group() {
                steps.push(plain("( "));
                steps.push(Step::Node(&**child));
                steps.push(plain(" )"));
            } else {
                steps.push(Step::Node(&**child));
            }
            steps.push(plain(ebnf.kind().operator().unwrap_or_default()));
        }
        EbnfKind::Choice(alternatives) => {
            for (i, alternative) in alternatives.iter().enumerate() {
                if i > 0 {
                    steps.push(plain("| "));
                }
                steps.push(Step::Node(alternative));
            }
        }
        EbnfKind::Sequence(elements) => {
            let mut after_indent = false;
            for element in elements {
                if after_indent {
                    steps.push(plain("  "));
                }
                if element.is_choice() {
                    steps.push(plain("( "));
                    steps.push(Step::Node(element));
                    steps.push(plain(" )"));
                    after_indent = false;
                } else {
                    steps.push(Step::Node(element));
                    after_indent = ends_with_indent(element);
                }
            }
        }
    }

    let trivia = ebnf.trivia();
    if !trivia.following_whitespace.is_empty() {
        steps.push(emit(trivia.following_whitespace.as_str(), Style::Comment));
    }
    if !trivia.following_comment.is_empty() {
        steps.push(emit(
            format!(" //{}", trivia.following_comment),
            Style::Comment,
        ));
    }
    if trivia.following_newline {
        steps.push(Step::Emit(Item::LineBreak));
        steps.push(plain(INDENT));
    }
    steps
}

/// Whether the last token `node_steps` would produce for `ebnf` is `INDENT`.
fn ends_with_indent(ebnf: &Ebnf) -> bool {
    let trivia = ebnf.trivia();
    if trivia.following_newline {
        return true;
    }
    if !trivia.following_comment.is_empty() {
        return false;
    }
    if !trivia.following_whitespace.is_empty() {
        // Whitespace that is itself a tab counts as the indent.
        return trivia.following_whitespace == INDENT;
    }
    match ebnf.kind() {
        EbnfKind::Choice(alternatives) => alternatives.last().map_or(false, ends_with_indent),
        EbnfKind::Sequence(elements) => elements
            .last()
            .map_or(false, |last| !last.is_choice() && ends_with_indent(last)),
        _ => false,
    }
}

/// Tokens for text that isn't a grammar: one plain token per non-empty line.
/// A single trailing empty line is dropped.
pub fn plain_text(src: &str) -> impl Iterator<Item = Item<'_>> {
    let mut lines: Vec<&str> = src
        .split("\r\n")
        .flat_map(|chunk| chunk.split(|ch: char| ch == '\r' || ch == '\n'))
        .collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    lines.into_iter().flat_map(|line| {
        let token = if line.is_empty() {
            None
        } else {
            Some(Item::token(line, Style::Plain))
        };
        token.into_iter().chain(Some(Item::LineBreak))
    })
}
