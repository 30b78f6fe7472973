use thiserror::Error;

pub type ModelRes<T = ()> = std::result::Result<T, ModelErr>;

#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum ModelErr {
    #[error(
        "A `{kind}` node needs at least one child, but this one has none. \
        An empty `{kind}` would render as nothing at all, so I refuse to \
        build it."
    )]
    MalformedTree { kind: &'static str },

    #[error(
        "I don't know the style `{name}`! The styles I know are `plain`, \
        `production`, `comment`, `terminal` and `extended`."
    )]
    UnknownStyle { name: String },

    #[error("I expected a colour like `6a5acd`, but got `{text}`.")]
    BadColor { text: String },
}

impl ModelErr {
    pub fn malformed_tree(kind: &'static str) -> Self {
        Self::MalformedTree { kind }
    }

    pub fn unknown_style(name: &str) -> Self {
        Self::UnknownStyle { name: name.into() }
    }
}
