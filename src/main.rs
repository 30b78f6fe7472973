#[macro_use]
extern crate serde_derive;

mod cli;
mod fault;
mod output;

use fault::{CliErr, CliRes};
use libgramcheck::{compare, enrich_links, palette::Palette, Grammar};
use std::{fs, io, path::Path, process};
use structopt::StructOpt;

fn load_grammar(path: &Path) -> CliRes<Grammar> {
    let display = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|source| CliErr::Read {
        path: display.clone(),
        source,
    })?;
    let grammar: Grammar = serde_json::from_str(&text).map_err(|source| CliErr::Load {
        path: display.clone(),
        source,
    })?;
    log::info!(
        "loaded {} productions from `{}`",
        grammar.productions.len(),
        display
    );
    Ok(grammar)
}

fn run(options: cli::Options) -> CliRes {
    let mut palette = Palette::default();
    for color in &options.colors {
        palette.apply_override(color)?;
    }

    let mut grammar = load_grammar(&options.authority)?;

    if let Some(copy_path) = &options.copy {
        let copy = load_grammar(copy_path)?;
        let report = compare(&grammar, &copy);
        if !report.is_match() {
            eprint!("{}", report);
            return Err(CliErr::Mismatch {
                count: report.problem_count(),
            });
        }
        log::info!("grammars agree on every production");
        grammar = enrich_links(grammar, &copy);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    output::write_grammar(&mut out, options.format, &grammar, &palette)
}

fn main() {
    env_logger::init();
    let options = cli::Options::from_args();
    if let Err(err) = run(options) {
        eprintln!("{}", err);
        process::exit(1);
    }
}
