//! Turns a flat token stream into lines, merging neighbouring tokens so that
//! each line carries as few style runs as possible.

use crate::colorize::{Item, Style, StyledToken};
use std::fmt;
use std::mem;

/// A stretch of text in one style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Run {
    pub text: String,
    pub style: Style,
}

impl Run {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Line {
    pub runs: Vec<Run>,
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.runs.iter().try_for_each(|run| f.write_str(&run.text))
    }
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Lazily coalesces the items it pulls from `I`. At most one run and one
/// line are in flight at any time.
pub struct Lines<I> {
    items: I,
    current_line: Vec<Run>,
    current_run: Option<Run>,
    seen_line_break: bool,
    finished: bool,
}

pub fn coalesce_lines<'a, I>(items: I) -> Lines<I::IntoIter>
where
    I: IntoIterator<Item = Item<'a>>,
{
    Lines {
        items: items.into_iter(),
        current_line: Vec::new(),
        current_run: None,
        seen_line_break: false,
        finished: false,
    }
}

impl<I> Lines<I> {
    fn push_token(&mut self, StyledToken { text, style }: StyledToken<'_>) {
        let next = Run::new(text.into_owned(), style);
        self.current_run = Some(match self.current_run.take() {
            None => next,
            // A blank run donates its whitespace to whatever follows it.
            Some(current) if is_blank(&current.text) => Run {
                text: current.text + &next.text,
                style: next.style,
            },
            Some(mut current) if is_blank(&next.text) || current.style == next.style => {
                current.text.push_str(&next.text);
                current
            }
            Some(current) => {
                self.current_line.push(current);
                next
            }
        });
    }

    /// Moves the pending run onto the line, minus trailing whitespace. A run
    /// with nothing left is dropped.
    fn close_run(&mut self) {
        if let Some(mut run) = self.current_run.take() {
            let len = run.text.trim_end().len();
            run.text.truncate(len);
            if !run.text.is_empty() {
                self.current_line.push(run);
            }
        }
    }

    fn take_line(&mut self) -> Line {
        let line = Line {
            runs: mem::take(&mut self.current_line),
        };
        log::trace!("coalesced line {:?}", line.to_string());
        line
    }
}

impl<'a, I> Iterator for Lines<I>
where
    I: Iterator<Item = Item<'a>>,
{
    type Item = Line;

    fn next(&mut self) -> Option<Line> {
        if self.finished {
            return None;
        }

        while let Some(item) = self.items.next() {
            match item {
                Item::Token(token) => self.push_token(token),
                Item::LineBreak => {
                    self.close_run();
                    let line = self.take_line();
                    // Only an empty line before the very first break is swallowed.
                    let leading_blank = !self.seen_line_break && line.runs.is_empty();
                    self.seen_line_break = true;
                    if !leading_blank {
                        return Some(line);
                    }
                }
            }
        }

        self.finished = true;
        self.close_run();
        if self.current_line.is_empty() {
            None
        } else {
            Some(self.take_line())
        }
    }
}
