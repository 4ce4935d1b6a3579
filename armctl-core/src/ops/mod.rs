//! Operation catalog: named, parameterized provider operations.
//!
//! Each operation builds an [`AzCommand`](crate::exec::AzCommand), delegates
//! to the [`Executor`](crate::exec::Executor), and maps the normalized
//! outcome into an [`OpResult`]. Operations validate presence only — whether
//! a name is legal for a resource kind is the provider's call.

pub mod group;
pub mod resource;
pub mod storage;
pub mod vm;

pub use group::{create_group, delete_group, list_groups};
pub use resource::{list_resources, resources_by_tag};
pub use storage::{create_blob_container, create_storage_account, list_storage_accounts};
pub use vm::{create_vm, list_vms, start_vm, stop_vm};

use serde_json::Value;

use crate::exec::{Outcome, Payload};

/// What a catalog operation hands back: a value for programmatic reuse plus
/// the human-readable report the front end prints. Never the raw
/// [`Outcome`].
#[derive(Debug, Clone)]
pub struct OpResult<T> {
    pub value: T,
    pub report: String,
}

impl<T> OpResult<T> {
    fn new(value: T, report: impl Into<String>) -> Self {
        Self {
            value,
            report: report.into(),
        }
    }
}

/// Failure report naming the attempted action, with the external diagnostic
/// when there is one.
pub(crate) fn failure_report(action: &str, outcome: &Outcome) -> String {
    match outcome {
        Outcome::Failure {
            exit_code,
            diagnostic,
        } if !diagnostic.is_empty() => {
            format!("❌ Error {action} (exit code {exit_code})\nDetails: {diagnostic}")
        }
        Outcome::Failure { exit_code, .. } => {
            format!("❌ Error {action} (exit code {exit_code})")
        }
        _ => format!("❌ Error {action}"),
    }
}

/// Shared adapter for list operations: a sequence payload goes through the
/// pure display transform; anything else yields an empty list plus a report.
pub(crate) fn list_result(
    outcome: Outcome,
    action: &str,
    render: impl FnOnce(&[Value]) -> String,
) -> OpResult<Vec<Value>> {
    match outcome {
        Outcome::Success(Payload::Json(Value::Array(items))) => {
            let report = render(&items);
            OpResult::new(items, report)
        }
        Outcome::Success(_) => OpResult::new(
            Vec::new(),
            format!("⚠️  Unexpected response while {action}: no decodable listing"),
        ),
        outcome => OpResult::new(Vec::new(), failure_report(action, &outcome)),
    }
}
