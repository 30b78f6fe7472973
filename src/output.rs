use crate::cli::Format;
use crate::fault::CliRes;
use crossterm::style::{style, Color, Stylize};
use libgramcheck::grammar::{Grammar, Link};
use libgramcheck::lines::{Line, Run};
use libgramcheck::palette::{Palette, Rgb};
use libgramcheck::render_lines;
use std::collections::BTreeMap;
use std::io::Write;

#[derive(Serialize)]
struct Rendered<'g> {
    lines: Vec<Line>,
    links: BTreeMap<&'g str, &'g Link>,
}

fn write_ansi_run(out: &mut impl Write, run: &Run, palette: &Palette) -> CliRes {
    let appearance = palette.appearance(run.style);
    let Rgb(r, g, b) = appearance.color;
    let styled = style(run.text.as_str()).with(Color::Rgb { r, g, b });
    if appearance.italic {
        write!(out, "{}", styled.italic())?;
    } else {
        write!(out, "{}", styled)?;
    }
    Ok(())
}

pub fn write_grammar(
    out: &mut impl Write,
    format: Format,
    grammar: &Grammar,
    palette: &Palette,
) -> CliRes {
    match format {
        Format::Plain => {
            for line in render_lines(grammar) {
                writeln!(out, "{}", line)?;
            }
        }
        Format::Ansi => {
            for line in render_lines(grammar) {
                for run in &line.runs {
                    write_ansi_run(out, run, palette)?;
                }
                writeln!(out)?;
            }
        }
        Format::Json => {
            let rendered = Rendered {
                lines: render_lines(grammar).collect(),
                links: grammar
                    .links()
                    .iter()
                    .map(|(name, link)| (name.as_str(), link))
                    .collect(),
            };
            serde_json::to_writer_pretty(&mut *out, &rendered)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
