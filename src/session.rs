//! Console I/O plus settings, handed to every application entry point.

use std::io::{self, BufRead, Write};

use colored::Colorize;

use crate::config::Settings;

pub struct Session<'io> {
    input: Box<dyn BufRead + 'io>,
    output: Box<dyn Write + 'io>,
    settings: Settings,
}

impl<'io> Session<'io> {
    pub fn new(input: impl BufRead + 'io, output: impl Write + 'io, settings: Settings) -> Self {
        Self {
            input: Box::new(input),
            output: Box::new(output),
            settings,
        }
    }

    pub fn stdio(settings: Settings) -> Session<'static> {
        Session::new(io::stdin().lock(), io::stdout(), settings)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Prints `text` without a newline and reads one line of input.
    ///
    /// Returns `None` once input is exhausted. The line terminator is stripped,
    /// any other whitespace is kept. Bytes that are not UTF-8 become U+FFFD, so a
    /// garbled line is just an answer that matches nothing.
    pub fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&line);
        let answer = line.trim_end_matches(['\n', '\r']).to_string();
        Ok(Some(answer))
    }

    pub fn separator(&mut self) -> io::Result<()> {
        let line = self.settings.separator();
        writeln!(self.output, "{}", line.dimmed())
    }
}

impl Write for Session<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }
}

/// Runs `f` against an in-memory session fed with `input` and returns everything it printed.
#[cfg(test)]
pub(crate) fn transcript<F>(input: &str, settings: Settings, f: F) -> String
where
    F: FnOnce(&mut Session<'_>) -> crate::error::Result<()>,
{
    let mut output = Vec::new();
    {
        let mut session = Session::new(io::Cursor::new(input.as_bytes()), &mut output, settings);
        f(&mut session).unwrap();
    }
    String::from_utf8(output).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_reads_lines() {
        let mut output = Vec::new();
        {
            let mut session =
                Session::new(io::Cursor::new("land\r\n sea \n"), &mut output, Settings::default());
            assert_eq!(session.prompt("Deliver by? ").unwrap().as_deref(), Some("land"));
            assert_eq!(session.prompt("Again? ").unwrap().as_deref(), Some(" sea "));
            assert_eq!(session.prompt("More? ").unwrap(), None);
        }
        assert_eq!(String::from_utf8(output).unwrap(), "Deliver by? Again? More? ");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut output = Vec::new();
        let input = io::Cursor::new(&b"\xff\xfeland\nsea"[..]);
        let mut session = Session::new(input, &mut output, Settings::default());
        assert_eq!(session.prompt("").unwrap().as_deref(), Some("\u{FFFD}\u{FFFD}land"));
        assert_eq!(session.prompt("").unwrap().as_deref(), Some("sea"));
        assert_eq!(session.prompt("").unwrap(), None);
    }

    #[test]
    fn test_empty_line_is_not_eof() {
        let text = transcript("\n", Settings::default(), |session| {
            assert_eq!(session.prompt("").unwrap().as_deref(), Some(""));
            assert_eq!(session.prompt("").unwrap(), None);
            Ok(())
        });
        assert!(text.is_empty());
    }

    #[test]
    fn test_separator_width() {
        let settings = Settings::default().with_separator_width(8);
        let text = transcript("", settings, |session| Ok(session.separator()?));
        assert!(text.contains("--------"));
        assert!(!text.contains("---------"));
    }
}
