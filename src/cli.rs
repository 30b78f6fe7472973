use std::path::PathBuf;
use std::str::FromStr;
use structopt::StructOpt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Format {
    Plain,
    Ansi,
    Json,
}

impl Format {
    pub const NAMES: [&'static str; 3] = ["plain", "ansi", "json"];
}

impl FromStr for Format {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "plain" => Ok(Format::Plain),
            "ansi" => Ok(Format::Ansi),
            "json" => Ok(Format::Json),
            _ => Err(format!("unknown output format `{}`", name)),
        }
    }
}

#[derive(StructOpt, Debug)]
#[structopt(name = "gramcheck")]
pub struct Options {
    /// The JSON file holding the authoritative grammar. This is the grammar
    /// that gets rendered.
    #[structopt(name = "AUTHORITY", parse(from_os_str))]
    pub authority: PathBuf,

    /// The JSON file holding the grammar extracted from the prose. If given,
    /// it must agree with AUTHORITY on every production, and its links are
    /// carried over into the rendering.
    #[structopt(name = "COPY", parse(from_os_str))]
    pub copy: Option<PathBuf>,

    /// How to print the rendered grammar.
    #[structopt(short, long, default_value = "plain", possible_values = &Format::NAMES)]
    pub format: Format,

    /// Overrides the colour of a style, like `--color comment=808080`. May be
    /// given several times.
    #[structopt(long = "color", number_of_values = 1)]
    pub colors: Vec<String>,
}
