//! Terminal capability detection and styling

use owo_colors::{OwoColorize, colors::css};
use supports_color::Stream;

/// Whether the terminal is too narrow for the full inventory table.
pub fn is_narrow() -> bool {
    terminal_size::terminal_size().is_some_and(|(width, _)| width.0 < 40)
}

/// Red text for stderr. Plain when stderr does not accept color, regardless
/// of stdout.
pub fn stderr_error(text: &str) -> String {
    paint(Stream::Stderr, text, red)
}

fn paint(stream: Stream, text: &str, style: impl FnOnce(&str) -> String) -> String {
    styled(supports_color::on(stream).is_some(), text, style)
}

fn styled(color: bool, text: &str, style: impl FnOnce(&str) -> String) -> String {
    if color { style(text) } else { text.to_string() }
}

fn red(text: &str) -> String {
    text.fg::<css::Red>().to_string()
}

/// Semantic colors for stdout. Plain text when stdout does not accept color.
pub trait Colorize {
    /// Green: completed operations, healthy stock.
    fn success(&self) -> String;
    /// Amber: usages and other attention items.
    fn warning(&self) -> String;
    /// Red: failures and low stock.
    fn error(&self) -> String;
    /// Blue: headings.
    fn info(&self) -> String;
    /// Dimmed: rules and column headers.
    fn dim(&self) -> String;
}

impl<T: AsRef<str> + ?Sized> Colorize for T {
    fn success(&self) -> String {
        paint(Stream::Stdout, self.as_ref(), |s| s.fg::<css::Green>().to_string())
    }

    fn warning(&self) -> String {
        paint(Stream::Stdout, self.as_ref(), |s| s.fg::<css::Orange>().to_string())
    }

    fn error(&self) -> String {
        paint(Stream::Stdout, self.as_ref(), red)
    }

    fn info(&self) -> String {
        paint(Stream::Stdout, self.as_ref(), |s| s.fg::<css::LightBlue>().to_string())
    }

    fn dim(&self) -> String {
        paint(Stream::Stdout, self.as_ref(), |s| s.dimmed().to_string())
    }
}
