//! The recursive grammar-expression tree. Every node is one of a fixed set of
//! kinds and carries the layout trivia that followed it in its source.

use crate::fault::{ModelErr, ModelRes};
use crate::grammar::ProductionName;
use im::Vector;
use std::convert::TryFrom;

/// Layout information recorded by a parser after a node. Only the colorizer
/// looks at this; canonical forms ignore it.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trivia {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub following_whitespace: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub following_comment: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub following_newline: bool,
}

impl Trivia {
    pub fn whitespace(text: impl Into<String>) -> Self {
        Self {
            following_whitespace: text.into(),
            ..Self::default()
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.following_comment = comment.into();
        self
    }

    pub fn with_newline(mut self) -> Self {
        self.following_newline = true;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.following_whitespace.is_empty()
            && self.following_comment.is_empty()
            && !self.following_newline
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EbnfKind {
    /// A literal string, written single-quoted.
    Terminal(String),
    /// A named character class such as a Unicode category. Written verbatim.
    ExtendedTerminal(String),
    /// The name of another production. May be unresolved.
    Reference(ProductionName),
    OneOrMoreOf(Box<Ebnf>),
    ZeroOrMoreOf(Box<Ebnf>),
    ZeroOrOneOf(Box<Ebnf>),
    /// Ordered alternatives. Never empty.
    Choice(Vector<Ebnf>),
    /// Concatenated elements. Never empty.
    Sequence(Vector<Ebnf>),
}

impl EbnfKind {
    /// The postfix operator of a repetition kind.
    pub fn operator(&self) -> Option<&'static str> {
        match self {
            Self::OneOrMoreOf(_) => Some("+"),
            Self::ZeroOrMoreOf(_) => Some("*"),
            Self::ZeroOrOneOf(_) => Some("?"),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Terminal(_) => "Terminal",
            Self::ExtendedTerminal(_) => "ExtendedTerminal",
            Self::Reference(_) => "Reference",
            Self::OneOrMoreOf(_) => "OneOrMoreOf",
            Self::ZeroOrMoreOf(_) => "ZeroOrMoreOf",
            Self::ZeroOrOneOf(_) => "ZeroOrOneOf",
            Self::Choice(_) => "Choice",
            Self::Sequence(_) => "Sequence",
        }
    }
}

/// One node of a grammar expression. The fields are private so that every
/// `Ebnf` in existence has passed the checks in `Ebnf::with_trivia`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EbnfRepr")]
pub struct Ebnf {
    kind: EbnfKind,
    #[serde(skip_serializing_if = "Trivia::is_empty")]
    trivia: Trivia,
}

/// The unchecked shape of an `Ebnf` as it appears in serialized grammars.
#[derive(Deserialize)]
struct EbnfRepr {
    kind: EbnfKind,
    #[serde(default)]
    trivia: Trivia,
}

impl TryFrom<EbnfRepr> for Ebnf {
    type Error = ModelErr;

    fn try_from(EbnfRepr { kind, trivia }: EbnfRepr) -> ModelRes<Self> {
        Self::with_trivia(kind, trivia)
    }
}

impl Ebnf {
    pub fn new(kind: EbnfKind) -> ModelRes<Self> {
        Self::with_trivia(kind, Trivia::default())
    }

    /// Builds a node, rejecting a `Choice` or `Sequence` without children.
    pub fn with_trivia(kind: EbnfKind, trivia: Trivia) -> ModelRes<Self> {
        let childless = match &kind {
            EbnfKind::Choice(children) | EbnfKind::Sequence(children) => children.is_empty(),
            _ => false,
        };
        if childless {
            return Err(ModelErr::malformed_tree(kind.name()));
        }
        Ok(Self { kind, trivia })
    }

    fn leaf(kind: EbnfKind) -> Self {
        Self {
            kind,
            trivia: Trivia::default(),
        }
    }

    pub fn terminal(text: impl Into<String>) -> Self {
        Self::leaf(EbnfKind::Terminal(text.into()))
    }

    pub fn extended_terminal(text: impl Into<String>) -> Self {
        Self::leaf(EbnfKind::ExtendedTerminal(text.into()))
    }

    pub fn reference(name: &str) -> Self {
        Self::leaf(EbnfKind::Reference(ProductionName::new(name)))
    }

    pub fn one_or_more(child: Ebnf) -> Self {
        Self::leaf(EbnfKind::OneOrMoreOf(Box::new(child)))
    }

    pub fn zero_or_more(child: Ebnf) -> Self {
        Self::leaf(EbnfKind::ZeroOrMoreOf(Box::new(child)))
    }

    pub fn zero_or_one(child: Ebnf) -> Self {
        Self::leaf(EbnfKind::ZeroOrOneOf(Box::new(child)))
    }

    pub fn choice(alternatives: impl IntoIterator<Item = Ebnf>) -> ModelRes<Self> {
        Self::new(EbnfKind::Choice(alternatives.into_iter().collect()))
    }

    pub fn sequence(elements: impl IntoIterator<Item = Ebnf>) -> ModelRes<Self> {
        Self::new(EbnfKind::Sequence(elements.into_iter().collect()))
    }

    /// Replaces this node's trivia.
    pub fn followed_by(mut self, trivia: Trivia) -> Self {
        self.trivia = trivia;
        self
    }

    pub fn kind(&self) -> &EbnfKind {
        &self.kind
    }

    pub fn trivia(&self) -> &Trivia {
        &self.trivia
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.kind, EbnfKind::Choice(_))
    }

    /// Choices and sequences get parenthesized under a repetition operator.
    pub fn is_group(&self) -> bool {
        matches!(self.kind, EbnfKind::Choice(_) | EbnfKind::Sequence(_))
    }
}

#[test]
fn empty_groups_are_rejected() {
    use assert_matches::assert_matches;

    assert_matches!(
        Ebnf::choice(vec![]),
        Err(ModelErr::MalformedTree { kind: "Choice" })
    );
    assert_matches!(
        Ebnf::sequence(None),
        Err(ModelErr::MalformedTree { kind: "Sequence" })
    );
    assert!(Ebnf::choice(vec![Ebnf::reference("lonely")]).is_ok());
}

#[test]
fn deserializing_checks_children() {
    let ok = r#"{"kind": {"Sequence": [
        {"kind": {"Reference": "term"}, "trivia": {"following_whitespace": " "}},
        {"kind": {"Terminal": "+"}}
    ]}}"#;
    let parsed: Ebnf = serde_json::from_str(ok).expect("valid tree");
    assert_eq!(
        parsed,
        Ebnf::sequence(vec![
            Ebnf::reference("term").followed_by(Trivia::whitespace(" ")),
            Ebnf::terminal("+"),
        ])
        .unwrap()
    );

    let nested_empty = r#"{"kind": {"ZeroOrMoreOf": {"kind": {"Choice": []}}}}"#;
    let err = serde_json::from_str::<Ebnf>(nested_empty).unwrap_err();
    assert!(err.to_string().contains("`Choice` node needs at least one child"));
}
