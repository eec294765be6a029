//! Colouring of shell output

use owo_colors::{OwoColorize, Style};
use supports_color::Stream;

/// Whether `stream` is a terminal that understands colour codes
fn supports_color(stream: Stream) -> bool {
    supports_color::on_cached(stream).is_some()
}

fn paint(text: &str, stream: Stream, style: Style) -> String {
    if supports_color(stream) {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

/// Extension trait for colouring shell output
///
/// Success and warning text is written to stdout, error text to stderr; each
/// is only coloured when its own stream supports it.
pub trait Colorize {
    /// Green, for confirmations
    fn success(&self) -> String;
    /// Amber, for empty listings
    fn warning(&self) -> String;
    /// Red, for rejected commands
    fn error(&self) -> String;
}

impl Colorize for str {
    fn success(&self) -> String {
        paint(self, Stream::Stdout, Style::new().green())
    }

    fn warning(&self) -> String {
        paint(self, Stream::Stdout, Style::new().yellow())
    }

    fn error(&self) -> String {
        paint(self, Stream::Stderr, Style::new().red())
    }
}

impl Colorize for String {
    fn success(&self) -> String {
        self.as_str().success()
    }

    fn warning(&self) -> String {
        self.as_str().warning()
    }

    fn error(&self) -> String {
        self.as_str().error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_survives_colouring() {
        for painted in ["done".success(), "done".warning(), "done".error()] {
            assert!(painted.contains("done"));
        }
    }
}
