use std::io::{stdout, Write};
use termimad::crossterm::terminal;
use termimad::{FmtText, MadSkin};

/// Prints a complete model reply as markdown in the terminal.
pub struct MarkdownPrinter {
    pub skin: MadSkin,
    pub wrap_width: Option<usize>,
}

impl Default for MarkdownPrinter {
    fn default() -> Self {
        Self {
            skin: MadSkin::default(),
            wrap_width: None,
        }
    }
}

impl MarkdownPrinter {
    /// A printer wrapping at the width of the current terminal, if there is one.
    pub fn for_terminal() -> Self {
        Self {
            wrap_width: terminal::size().ok().map(|(columns, _)| columns as usize),
            ..Self::default()
        }
    }

    pub fn render(&self, markdown: &str) -> String {
        format!("{}", FmtText::from(&self.skin, markdown, self.wrap_width))
    }

    pub fn print(&self, markdown: &str) -> std::io::Result<()> {
        let mut out = stdout().lock();
        write!(out, "{}", self.render(markdown))?;
        out.flush()
    }
}
