use crate::ebnf::Ebnf;
use internship::IStr;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::FromIterator;

/// The production that every grammar may have as an entry point. It is exempt
/// from presence checks when grammars are compared.
pub const START: &str = "start";

/// The name of a production.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductionName(pub IStr);

impl ProductionName {
    pub fn new(name: &str) -> Self {
        Self(IStr::new(name))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_start(&self) -> bool {
        self.as_str() == START
    }
}

impl AsRef<str> for ProductionName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProductionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ProductionName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl Serialize for ProductionName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProductionName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::new(&name))
    }
}

/// One top-level entry of a grammar. An entry with no body is documentation
/// only, and renders as its comment (or as a blank line).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Production {
    #[serde(default)]
    pub name: Option<ProductionName>,
    #[serde(default)]
    pub ebnf: Option<Ebnf>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub rule_starts_on_new_line: bool,
}

impl Production {
    pub fn rule(name: &str, ebnf: Ebnf) -> Self {
        Self {
            name: Some(ProductionName::new(name)),
            ebnf: Some(ebnf),
            ..Self::default()
        }
    }

    pub fn comment_only(comment: impl Into<String>) -> Self {
        Self {
            comment: Some(comment.into()),
            ..Self::default()
        }
    }

    /// An entry with neither body nor comment: a blank line.
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn starting_on_new_line(mut self) -> Self {
        self.rule_starts_on_new_line = true;
        self
    }

    /// The comment, unless it is missing or empty.
    pub fn comment_text(&self) -> Option<&str> {
        self.comment.as_deref().filter(|c| !c.is_empty())
    }
}

/// Where a production is documented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub target: String,
    pub name: String,
}

impl Link {
    pub fn new(target: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            name: name.into(),
        }
    }
}

/// Cross-reference side-table. Keeping links out of `Production` lets the
/// productions stay untouched once a parser has built them.
pub type Links = im::HashMap<ProductionName, Link>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grammar {
    pub productions: Vec<Production>,
    #[serde(default)]
    pub(crate) links: Links,
}

impl Grammar {
    pub fn new(productions: Vec<Production>) -> Self {
        Self {
            productions,
            links: Links::default(),
        }
    }

    /// The first production called `name`. Later duplicates are shadowed.
    pub fn production(&self, name: &str) -> Option<&Production> {
        self.productions
            .iter()
            .find(|p| p.name.as_ref().map(ProductionName::as_str) == Some(name))
    }

    /// Every production that has a name, in grammar order, duplicates included.
    pub fn named_productions(&self) -> impl Iterator<Item = (&ProductionName, &Production)> {
        self.productions
            .iter()
            .filter_map(|p| p.name.as_ref().map(|name| (name, p)))
    }

    pub fn link(&self, name: &ProductionName) -> Option<&Link> {
        self.links.get(name)
    }

    pub fn links(&self) -> &Links {
        &self.links
    }

    pub fn set_link(&mut self, name: &str, link: Link) -> Option<Link> {
        self.links.insert(ProductionName::new(name), link)
    }

    pub fn with_link(mut self, name: &str, link: Link) -> Self {
        self.set_link(name, link);
        self
    }
}

impl FromIterator<Production> for Grammar {
    fn from_iter<T: IntoIterator<Item = Production>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[test]
fn lookup_takes_the_first_duplicate() {
    let grammar: Grammar = vec![
        Production::comment_only("header"),
        Production::rule("item", Ebnf::terminal("a")),
        Production::rule("item", Ebnf::terminal("b")),
    ]
    .into_iter()
    .collect();

    let found = grammar.production("item").expect("item exists");
    assert_eq!(found.ebnf, Some(Ebnf::terminal("a")));
    assert!(grammar.production("missing").is_none());
    assert_eq!(grammar.named_productions().count(), 2);
}

#[test]
fn empty_comment_counts_as_none() {
    assert_eq!(Production::blank().with_comment("").comment_text(), None);
    assert_eq!(Production::comment_only("x").comment_text(), Some("x"));
}
