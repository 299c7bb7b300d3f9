use std::{fmt, io};

/// Result type alias for operations that can abort interpretation.
pub type RunResult<T> = Result<T, RunError>;

/// Aborting interpreter errors.
///
/// Recoverable conditions (bad coercions, unknown names, unwrap-on-error) are
/// warnings: they are logged and evaluation continues with a zero value or
/// null. `RunError` covers only the critical severities that terminate the
/// run.
#[derive(Debug)]
pub enum RunError {
    /// A script file (the CLI argument or an `include` target) could not be read.
    Script {
        /// Path as it appeared in the source or on the command line.
        path: String,
        /// Underlying I/O failure text.
        detail: String,
    },
    /// The call stack exceeded the embedder safety limit.
    ///
    /// The language itself places no bound on loops, but unbounded script
    /// recursion would otherwise overflow the host stack.
    RecursionLimit {
        /// Depth at which the limit tripped.
        depth: usize,
    },
    /// Writing program output failed.
    Print(io::Error),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Script { path, detail } => write!(f, "cannot read script '{path}': {detail}"),
            Self::RecursionLimit { depth } => write!(f, "maximum call depth exceeded ({depth} frames)"),
            Self::Print(err) => write!(f, "cannot write output: {err}"),
        }
    }
}

impl std::error::Error for RunError {}

impl From<io::Error> for RunError {
    fn from(err: io::Error) -> Self {
        Self::Print(err)
    }
}
