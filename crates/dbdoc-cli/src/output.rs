//! User-facing status lines
//!
//! Status goes to stdout; diagnostics go through `tracing` to stderr.

use crate::error::Result;
use colored::Colorize;
use std::io::{self, Write};
use tracing::debug;

/// Writes short status lines, honoring `--quiet` and `--no-color`
pub struct OutputWriter {
    use_color: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a writer on stdout
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self::with_writer(use_color, quiet, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(use_color: bool, quiet: bool, writer: Box<dyn Write>) -> Self {
        Self {
            use_color,
            quiet,
            writer,
        }
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);

        if self.quiet {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Writer whose contents stay readable after being boxed
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_plain_messages() {
        let buffer = SharedBuffer::default();
        let mut output = OutputWriter::with_writer(false, false, Box::new(buffer.clone()));

        output.info("Reading schema").unwrap();
        output.success("Wrote db.md").unwrap();

        assert_eq!(buffer.contents(), "INFO: Reading schema\nWrote db.md\n");
    }

    #[test]
    fn test_quiet_suppresses_status() {
        let buffer = SharedBuffer::default();
        let mut output = OutputWriter::with_writer(false, true, Box::new(buffer.clone()));

        output.info("Reading schema").unwrap();
        output.success("Wrote db.md").unwrap();

        assert!(buffer.contents().is_empty());
    }
}
