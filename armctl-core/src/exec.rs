//! Azure CLI process execution and outcome normalization.
//!
//! Everything armctl does funnels through [`Executor::execute`]: build an
//! argument vector, run `az` to completion, fold the result into an
//! [`Outcome`]. A failing invocation is data, not a Rust error — the
//! executor never propagates a fault to its callers.

use std::fmt;
use std::process::{Command, Stdio};
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tracing::{debug, warn};

/// Default external program name, resolved on PATH.
pub const DEFAULT_PROGRAM: &str = "az";

/// Fixed pair appended to every capturing invocation so decoding always
/// attempts the same parser.
pub const OUTPUT_FORMAT_ARGS: [&str; 2] = ["--output", "json"];

/// Ordered argument vector for one invocation, without the program name
/// (the [`Executor`] prepends that, so a spawned argv is never empty).
/// Built fresh per call and discarded with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AzCommand {
    args: Vec<String>,
}

impl AzCommand {
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: parts.into_iter().map(Into::into).collect(),
        }
    }

    pub fn arg(mut self, part: impl Into<String>) -> Self {
        self.args.push(part.into());
        self
    }

    /// Append a `--flag value` pair.
    pub fn arg_pair(self, flag: impl Into<String>, value: impl Into<String>) -> Self {
        self.arg(flag).arg(value)
    }

    /// Append `part` only when `condition` holds (e.g. `--no-wait`).
    pub fn arg_if(self, condition: bool, part: impl Into<String>) -> Self {
        if condition {
            self.arg(part)
        } else {
            self
        }
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    fn into_args(self) -> Vec<String> {
        self.args
    }
}

impl fmt::Display for AzCommand {
    /// Space-joined form for diagnostics only; execution always uses the
    /// discrete vector.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.args.join(" "))
    }
}

/// Raw process result handed back by an invoker.
#[derive(Debug, Clone)]
pub struct RawOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Error spawning the external program.
#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Process-spawning seam (testable).
pub trait CliInvoker: Send + Sync {
    fn invoke(&self, program: &str, args: &[String]) -> Result<RawOutput, InvokeError>;
}

/// Real invoker using `std::process` with a discrete argument vector —
/// arguments are never joined into a shell string.
pub struct AzInvoker;

impl CliInvoker for AzInvoker {
    fn invoke(&self, program: &str, args: &[String]) -> Result<RawOutput, InvokeError> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()?;

        Ok(RawOutput {
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// One recorded invocation: the program name plus the full argument vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokerCall {
    pub program: String,
    pub args: Vec<String>,
}

/// Scripted invoker for tests: returns queued outputs in order and records
/// every call. Clones share state, so tests can keep a handle after handing
/// one to an [`Executor`].
#[derive(Clone, Default)]
pub struct MockInvoker {
    state: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    queue: Vec<RawOutput>,
    calls: Vec<InvokerCall>,
}

impl MockInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw output for the next invocation.
    pub fn push(&self, output: RawOutput) {
        self.state.lock().unwrap().queue.push(output);
    }

    /// Queue a zero-exit invocation whose stdout is `value` serialized.
    pub fn push_json(&self, value: Value) {
        self.push(RawOutput {
            status: 0,
            stdout: value.to_string(),
            stderr: String::new(),
        });
    }

    /// Queue a non-zero exit with diagnostic text on stderr.
    pub fn push_failure(&self, status: i32, stderr: impl Into<String>) {
        self.push(RawOutput {
            status,
            stdout: String::new(),
            stderr: stderr.into(),
        });
    }

    pub fn calls(&self) -> Vec<InvokerCall> {
        self.state.lock().unwrap().calls.clone()
    }
}

impl CliInvoker for MockInvoker {
    fn invoke(&self, program: &str, args: &[String]) -> Result<RawOutput, InvokeError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(InvokerCall {
            program: program.to_string(),
            args: args.to_vec(),
        });

        if state.queue.is_empty() {
            Ok(RawOutput {
                status: 0,
                stdout: String::new(),
                stderr: String::new(),
            })
        } else {
            Ok(state.queue.remove(0))
        }
    }
}

/// Decoded payload of a successful invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Structured output decoded from stdout.
    Json(Value),
    /// Zero exit but undecodable stdout, returned verbatim.
    Text(String),
    /// No capture requested, or nothing on stdout.
    Done,
}

/// Normalized result of one external invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(Payload),
    Failure { exit_code: i32, diagnostic: String },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// The decoded mapping/sequence, if this was a capturing success.
    pub fn json(&self) -> Option<&Value> {
        match self {
            Outcome::Success(Payload::Json(value)) => Some(value),
            _ => None,
        }
    }
}

/// Runs the external CLI to completion and normalizes the result.
pub struct Executor {
    program: String,
    invoker: Box<dyn CliInvoker>,
}

impl Executor {
    pub fn new() -> Self {
        Self::with_program(DEFAULT_PROGRAM)
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            invoker: Box::new(AzInvoker),
        }
    }

    /// Executor over an arbitrary invoker (tests).
    pub fn with_invoker(program: impl Into<String>, invoker: Box<dyn CliInvoker>) -> Self {
        Self {
            program: program.into(),
            invoker,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Trivial version-check invocation. `false` is the one fatal
    /// precondition of the whole tool; callers are expected to bail out.
    pub fn verify_available(&self) -> bool {
        matches!(
            self.invoker.invoke(&self.program, &["--version".to_string()]),
            Ok(output) if output.status == 0
        )
    }

    /// Run `command` to completion. With `capture`, `--output json` is
    /// appended and a zero-exit stdout is decoded; decode failure downgrades
    /// to the raw text, not to an execution failure.
    pub fn execute(&self, command: AzCommand, capture: bool) -> Outcome {
        let mut args = command.into_args();
        if capture {
            args.extend(OUTPUT_FORMAT_ARGS.iter().map(|s| s.to_string()));
        }

        debug!(program = %self.program, ?args, "invoking external CLI");

        let output = match self.invoker.invoke(&self.program, &args) {
            Ok(output) => output,
            Err(err) => {
                return Outcome::Failure {
                    exit_code: -1,
                    diagnostic: err.to_string(),
                }
            }
        };

        if output.status != 0 {
            return Outcome::Failure {
                exit_code: output.status,
                diagnostic: output.stderr.trim().to_string(),
            };
        }

        if capture && !output.stdout.trim().is_empty() {
            return match serde_json::from_str(&output.stdout) {
                Ok(value) => Outcome::Success(Payload::Json(value)),
                Err(err) => {
                    warn!(%err, "output was not valid JSON, returning raw text");
                    Outcome::Success(Payload::Text(output.stdout))
                }
            };
        }

        Outcome::Success(Payload::Done)
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) fn mocked_executor() -> (MockInvoker, Executor) {
    let mock = MockInvoker::new();
    let executor = Executor::with_invoker(DEFAULT_PROGRAM, Box::new(mock.clone()));
    (mock, executor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn capture_appends_output_format() {
        let (mock, executor) = mocked_executor();
        executor.execute(AzCommand::new(["group", "list"]), true);

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, "az");
        assert_eq!(calls[0].args, vec!["group", "list", "--output", "json"]);
    }

    #[test]
    fn no_capture_leaves_command_untouched() {
        let (mock, executor) = mocked_executor();
        executor.execute(
            AzCommand::new(["group", "delete"])
                .arg_pair("--name", "app-rg")
                .arg("--yes"),
            false,
        );

        assert_eq!(
            mock.calls()[0].args,
            vec!["group", "delete", "--name", "app-rg", "--yes"]
        );
    }

    #[test]
    fn well_formed_json_round_trips() {
        let (mock, executor) = mocked_executor();
        let payload = json!([{"name": "rg-a", "location": "eastus"}]);
        mock.push_json(payload.clone());

        let outcome = executor.execute(AzCommand::new(["group", "list"]), true);
        assert_eq!(outcome.json(), Some(&payload));
    }

    #[test]
    fn malformed_output_falls_back_to_raw_text() {
        let (mock, executor) = mocked_executor();
        mock.push(RawOutput {
            status: 0,
            stdout: "not json at all".into(),
            stderr: String::new(),
        });

        let outcome = executor.execute(AzCommand::new(["account", "show"]), true);
        assert_eq!(
            outcome,
            Outcome::Success(Payload::Text("not json at all".into()))
        );
    }

    #[test]
    fn nonzero_exit_maps_to_failure() {
        let (mock, executor) = mocked_executor();
        mock.push_failure(3, "quota exceeded\n");

        let outcome = executor.execute(AzCommand::new(["vm", "create"]), true);
        assert_eq!(
            outcome,
            Outcome::Failure {
                exit_code: 3,
                diagnostic: "quota exceeded".into()
            }
        );
    }

    #[test]
    fn empty_stdout_with_capture_is_done() {
        let (mock, executor) = mocked_executor();
        mock.push(RawOutput {
            status: 0,
            stdout: "  \n".into(),
            stderr: String::new(),
        });

        let outcome = executor.execute(AzCommand::new(["group", "list"]), true);
        assert_eq!(outcome, Outcome::Success(Payload::Done));
    }

    #[test]
    fn no_capture_success_is_done() {
        let (mock, executor) = mocked_executor();
        mock.push(RawOutput {
            status: 0,
            stdout: "progress text".into(),
            stderr: String::new(),
        });

        let outcome = executor.execute(AzCommand::new(["vm", "start"]), false);
        assert_eq!(outcome, Outcome::Success(Payload::Done));
    }

    #[test]
    fn spawn_error_is_failure_not_panic() {
        struct BrokenInvoker;

        impl CliInvoker for BrokenInvoker {
            fn invoke(&self, _: &str, _: &[String]) -> Result<RawOutput, InvokeError> {
                Err(InvokeError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no such file",
                )))
            }
        }

        let executor = Executor::with_invoker("az", Box::new(BrokenInvoker));
        let outcome = executor.execute(AzCommand::new(["group", "list"]), true);

        assert!(matches!(outcome, Outcome::Failure { exit_code: -1, .. }));
    }

    #[test]
    fn verify_available_reflects_exit_status() {
        let (mock, executor) = mocked_executor();
        mock.push(RawOutput {
            status: 0,
            stdout: "azure-cli 2.60.0".into(),
            stderr: String::new(),
        });
        assert!(executor.verify_available());

        mock.push_failure(1, "boom");
        assert!(!executor.verify_available());
    }

    #[test]
    fn command_display_is_space_joined() {
        let command = AzCommand::new(["group", "create"]).arg_pair("--name", "app-rg");
        assert_eq!(command.to_string(), "group create --name app-rg");
    }
}
