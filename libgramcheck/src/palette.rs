//! Default look of each `Style`, and parsing of style and colour names for
//! callers that let users override them.

use crate::colorize::Style;
use crate::fault::{ModelErr, ModelRes};
use std::fmt;
use std::str::FromStr;

impl Style {
    pub const ALL: [Style; 5] = [
        Style::Plain,
        Style::Production,
        Style::Comment,
        Style::Terminal,
        Style::ExtendedTerminal,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Style::Plain => "plain",
            Style::Production => "production",
            Style::Comment => "comment",
            Style::Terminal => "terminal",
            Style::ExtendedTerminal => "extended",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Style {
    type Err = ModelErr;

    fn from_str(name: &str) -> ModelRes<Self> {
        match name.to_ascii_lowercase().as_str() {
            "plain" | "plaintext" => Ok(Style::Plain),
            "production" => Ok(Style::Production),
            "comment" => Ok(Style::Comment),
            "terminal" => Ok(Style::Terminal),
            "extended" | "extended_terminal" | "extendedterminal" => Ok(Style::ExtendedTerminal),
            _ => Err(ModelErr::unknown_style(name)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl FromStr for Rgb {
    type Err = ModelErr;

    /// Parses `rrggbb`, with or without a leading `#`.
    fn from_str(text: &str) -> ModelRes<Self> {
        let bad = || ModelErr::BadColor { text: text.into() };
        let hex = text.strip_prefix('#').unwrap_or(text);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Rgb(r, g, b) = self;
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Appearance {
    pub color: Rgb,
    pub italic: bool,
}

impl Appearance {
    pub const fn colored(color: Rgb) -> Self {
        Self {
            color,
            italic: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    plain: Appearance,
    production: Appearance,
    comment: Appearance,
    terminal: Appearance,
    extended_terminal: Appearance,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            plain: Appearance::colored(Rgb(0, 0, 0)),
            production: Appearance::colored(Rgb(106, 90, 205)),
            comment: Appearance::colored(Rgb(0, 128, 0)),
            terminal: Appearance::colored(Rgb(163, 21, 21)),
            extended_terminal: Appearance {
                color: Rgb(0, 0, 0),
                italic: true,
            },
        }
    }
}

impl Palette {
    fn slot(&mut self, style: Style) -> &mut Appearance {
        match style {
            Style::Plain => &mut self.plain,
            Style::Production => &mut self.production,
            Style::Comment => &mut self.comment,
            Style::Terminal => &mut self.terminal,
            Style::ExtendedTerminal => &mut self.extended_terminal,
        }
    }

    pub fn appearance(&self, style: Style) -> Appearance {
        match style {
            Style::Plain => self.plain,
            Style::Production => self.production,
            Style::Comment => self.comment,
            Style::Terminal => self.terminal,
            Style::ExtendedTerminal => self.extended_terminal,
        }
    }

    /// Changes the colour of `style`, keeping its emphasis.
    pub fn set_color(&mut self, style: Style, color: Rgb) {
        self.slot(style).color = color;
    }

    /// Applies an override of the form `style=rrggbb`.
    pub fn apply_override(&mut self, setting: &str) -> ModelRes {
        let (style, color) = match setting.find('=') {
            Some(eq) => (&setting[..eq], &setting[eq + 1..]),
            None => {
                return Err(ModelErr::BadColor {
                    text: setting.to_string(),
                })
            }
        };
        self.set_color(style.trim().parse()?, color.trim().parse()?);
        Ok(())
    }
}
