use libgramcheck::fault::ModelErr;
use std::io;
use thiserror::Error;

pub type CliRes<T = ()> = std::result::Result<T, CliErr>;

#[derive(Error, Debug)]
pub enum CliErr {
    #[error("I couldn't read `{path}`: {source}")]
    Read { path: String, source: io::Error },

    #[error("`{path}` doesn't hold a grammar I understand: {source}")]
    Load {
        path: String,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Model(#[from] ModelErr),

    #[error(
        "The grammars disagree in {count} place(s). I won't render a grammar \
        that doesn't match its documentation."
    )]
    Mismatch { count: usize },

    #[error("Failed to write the rendering: {0}")]
    Write(#[from] io::Error),

    #[error("Failed to serialize the rendering: {0}")]
    Serialize(#[from] serde_json::Error),
}
