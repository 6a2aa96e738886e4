//! Process-wide error type.
//!
//! Every fallible path in the crate reports an `AppError`: a message suitable
//! for `eprintln!` plus the exit code the binary should terminate with.
//! Errors are never swallowed or retried; they propagate straight to `main`.

/// Exit-code conventions used throughout the crate.
///
/// - `2`: configuration / usage / IO problems (bad paths, unwritable output)
/// - `3`: domain errors (unknown model, out-of-range query, missing table)
/// - `4`: numeric failures (non-finite results, quadrature breakdown)
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// Configuration, usage, or IO error (exit code 2).
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(2, message)
    }

    /// Domain error: the request itself is invalid (exit code 3).
    pub fn domain(message: impl Into<String>) -> Self {
        Self::new(3, message)
    }

    /// Numeric failure inside an otherwise valid computation (exit code 4).
    pub fn numeric(message: impl Into<String>) -> Self {
        Self::new(4, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
