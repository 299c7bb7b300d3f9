use std::io::{self, Write as _};

use crate::error::RunResult;

/// Trait for handling output produced by the script (`print`, `ZS.System.Print`,
/// Holy-C auto-print).
///
/// Implement this trait to capture or redirect output from interpreted code.
/// The default implementation `StdPrint` writes to stdout.
pub trait PrintWriter {
    /// Writes one already-formatted chunk of program output, without adding a
    /// terminator.
    fn stdout_write(&mut self, output: &str) -> RunResult<()>;

    /// Adds a single character to stdout, generally the trailing newline.
    fn stdout_push(&mut self, end: char) -> RunResult<()>;
}

/// Default `PrintWriter` that writes straight to stdout.
#[derive(Debug, Default)]
pub struct StdPrint;

impl PrintWriter for StdPrint {
    fn stdout_write(&mut self, output: &str) -> RunResult<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(output.as_bytes())?;
        Ok(())
    }

    fn stdout_push(&mut self, end: char) -> RunResult<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        let mut buf = [0u8; 4];
        handle.write_all(end.encode_utf8(&mut buf).as_bytes())?;
        handle.flush()?;
        Ok(())
    }
}

/// A `PrintWriter` that collects all output into a string.
///
/// Useful for testing or capturing program output programmatically.
#[derive(Debug, Default)]
pub struct CollectStringPrint(String);

impl CollectStringPrint {
    /// Creates a new empty `CollectStringPrint`.
    #[must_use]
    pub fn new() -> Self {
        Self(String::new())
    }

    /// Returns the collected output as a string slice.
    #[must_use]
    pub fn output(&self) -> &str {
        self.0.as_str()
    }

    /// Consumes the writer and returns the collected output.
    #[must_use]
    pub fn into_output(self) -> String {
        self.0
    }
}

impl PrintWriter for CollectStringPrint {
    fn stdout_write(&mut self, output: &str) -> RunResult<()> {
        self.0.push_str(output);
        Ok(())
    }

    fn stdout_push(&mut self, end: char) -> RunResult<()> {
        self.0.push(end);
        Ok(())
    }
}

/// `PrintWriter` that ignores all output.
#[derive(Debug, Default)]
pub struct NoPrint;

impl PrintWriter for NoPrint {
    fn stdout_write(&mut self, _output: &str) -> RunResult<()> {
        Ok(())
    }

    fn stdout_push(&mut self, _end: char) -> RunResult<()> {
        Ok(())
    }
}
