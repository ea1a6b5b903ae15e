//! Terminal rendition of the classification form.

use std::io::{self, BufRead, Write};

use clap::ValueEnum;
use client_core::{FailureKind, FormView};
use shared::render::{error_html, ResultCard};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
}

/// Writes results to `out` and the busy indicator to `status`, so `out` can
/// be piped without progress noise.
pub struct TerminalView<W: Write, E: Write> {
    out: W,
    status: E,
    format: OutputFormat,
    busy: bool,
}

impl<W: Write, E: Write> TerminalView<W, E> {
    pub fn new(out: W, status: E, format: OutputFormat) -> Self {
        Self {
            out,
            status,
            format,
            busy: false,
        }
    }

    #[cfg(test)]
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    #[cfg(test)]
    pub fn into_writers(self) -> (W, E) {
        (self.out, self.status)
    }
}

impl<W: Write, E: Write> FormView for TerminalView<W, E> {
    fn clear(&mut self) {}

    fn set_busy(&mut self, busy: bool) {
        if busy && !self.busy {
            report(
                write!(self.status, "Classifying... ").and_then(|()| self.status.flush()),
                "status",
            );
        } else if !busy && self.busy {
            report(writeln!(self.status, "done"), "status");
        }
        self.busy = busy;
    }

    fn show_result(&mut self, card: &ResultCard) {
        let rendered = match self.format {
            OutputFormat::Text => card.to_plain_text(),
            OutputFormat::Html => card.to_html(),
        };
        report(
            writeln!(self.out, "{}", rendered.trim_end()).and_then(|()| self.out.flush()),
            "result",
        );
    }

    fn show_error(&mut self, kind: FailureKind, message: &str) {
        let written = match self.format {
            OutputFormat::Text => writeln!(self.out, "Error: {message}"),
            OutputFormat::Html => write!(self.out, "{}", error_html(message)),
        };
        report(written.and_then(|()| self.out.flush()), "error");
        tracing::debug!(?kind, "classification failed");
    }
}

fn report(written: io::Result<()>, what: &'static str) {
    if let Err(err) = written {
        tracing::debug!(%err, what, "terminal write failed");
    }
}

/// Reads one submission. A line ending in `\` continues onto the next line,
/// the terminal stand-in for Shift+Enter. Returns `None` at end of input.
pub fn read_submission<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut submission = String::new();
    let mut read_any = false;

    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Ok(read_any.then_some(submission));
        }
        read_any = true;

        let line = line.trim_end_matches(['\n', '\r']);
        match line.strip_suffix('\\') {
            Some(continued) => {
                submission.push_str(continued);
                submission.push('\n');
            }
            None => {
                submission.push_str(line);
                return Ok(Some(submission));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use shared::domain::InputText;

    use super::*;

    #[test]
    fn submissions_split_on_plain_newlines() {
        let mut input = Cursor::new("first tweet\nsecond tweet\n");
        assert_eq!(
            read_submission(&mut input).expect("read"),
            Some("first tweet".to_string())
        );
        assert_eq!(
            read_submission(&mut input).expect("read"),
            Some("second tweet".to_string())
        );
        assert_eq!(read_submission(&mut input).expect("read"), None);
    }

    #[test]
    fn trailing_backslash_continues_the_submission() {
        let mut input = Cursor::new("flood in\\\r\nmarikina\n");
        assert_eq!(
            read_submission(&mut input).expect("read"),
            Some("flood in\nmarikina".to_string())
        );
    }

    #[test]
    fn empty_line_is_still_a_submission() {
        let mut input = Cursor::new("\n");
        assert_eq!(read_submission(&mut input).expect("read"), Some(String::new()));
    }

    #[test]
    fn html_output_escapes_result_and_errors() {
        let mut view = TerminalView::new(Vec::new(), Vec::new(), OutputFormat::Html);
        let input = InputText::parse("<i>baha</i>").expect("valid");
        view.set_busy(true);
        view.show_result(&ResultCard::new(&input, "High"));
        view.show_error(FailureKind::Server, "<b>oops</b>");
        view.set_busy(false);

        let (out, status) = view.into_writers();
        let out = String::from_utf8(out).expect("utf8");
        assert!(out.contains("&lt;i&gt;baha&lt;/i&gt;"));
        assert!(out.contains("&lt;b&gt;oops&lt;/b&gt;"));
        assert!(!out.contains("<i>"));
        assert_eq!(String::from_utf8(status).expect("utf8"), "Classifying... done\n");
    }

    #[test]
    fn text_output_prints_category_and_error_prefix() {
        let mut view = TerminalView::new(Vec::new(), Vec::new(), OutputFormat::Text);
        let input = InputText::parse("I love pizza").expect("valid");
        view.show_result(&ResultCard::new(&input, "Not Informative"));
        view.show_error(FailureKind::Server, "Tweet text is empty");

        let (out, _) = view.into_writers();
        let out = String::from_utf8(out).expect("utf8");
        assert!(out.contains("Informativeness Level: Not Informative [low-info]"));
        assert!(out.contains("Error: Tweet text is empty"));
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn closed_output_pipe_does_not_abort_the_attempt() {
        let mut view = TerminalView::new(ClosedPipe, ClosedPipe, OutputFormat::Text);
        let input = InputText::parse("baha").expect("valid");
        view.set_busy(true);
        view.show_result(&ResultCard::new(&input, "High"));
        view.show_error(FailureKind::Transport, "down");
        view.set_busy(false);
        assert!(!view.is_busy());
    }

    #[test]
    fn busy_indicator_toggles_once_per_attempt() {
        let mut view = TerminalView::new(Vec::new(), Vec::new(), OutputFormat::Text);
        view.set_busy(true);
        assert!(view.is_busy());
        view.set_busy(true);
        view.set_busy(false);
        view.set_busy(false);
        assert!(!view.is_busy());

        let (_, status) = view.into_writers();
        assert_eq!(String::from_utf8(status).expect("utf8"), "Classifying... done\n");
    }
}
