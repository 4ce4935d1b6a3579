/// Structured error types for the armctl-core library.
///
/// Uses `thiserror` for a composable API surface. The binary crate
/// (armctl-cli) wraps these with `anyhow` for convenience.
use thiserror::Error;

/// Main error type for armctl-core operations.
///
/// Deliberately small: a failing `az` invocation is not an error here (see
/// [`crate::exec::Outcome`]); only the fatal startup precondition is.
#[derive(Error, Debug)]
pub enum ArmError {
    /// The external CLI binary is missing or failed its own version check.
    #[error("Azure CLI '{program}' is not available (missing from PATH or failed its version check)")]
    CliUnavailable { program: String },
}

/// Result type alias for armctl-core operations.
pub type Result<T> = std::result::Result<T, ArmError>;
