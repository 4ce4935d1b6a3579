//! Subscription snapshot and the per-run context value.
//!
//! `az account show` is fetched once at startup and treated as a read-only
//! snapshot for the process lifetime — there is no invalidation or refresh.
//! Fields are narrowed defensively; the full mapping stays reachable through
//! [`Subscription::raw`].

use serde_json::Value;
use tracing::warn;

use crate::error::{ArmError, Result};
use crate::exec::{AzCommand, Executor, Outcome, Payload};
use crate::render;

/// The active subscription as an opaque provider mapping.
pub struct Subscription {
    raw: Value,
}

impl Subscription {
    /// Fetch the active subscription. `None` when `az account show` fails
    /// (not logged in, for instance) — the tool still works, minus the
    /// banner details.
    pub fn fetch(executor: &Executor) -> Option<Self> {
        match executor.execute(AzCommand::new(["account", "show"]), true) {
            Outcome::Success(Payload::Json(raw)) => Some(Self { raw }),
            Outcome::Failure { diagnostic, .. } => {
                warn!(%diagnostic, "could not fetch the active subscription");
                None
            }
            _ => None,
        }
    }

    pub fn name(&self) -> &str {
        render::field(&self.raw, "name")
    }

    pub fn id(&self) -> &str {
        render::field(&self.raw, "id")
    }

    pub fn state(&self) -> &str {
        render::field(&self.raw, "state")
    }

    pub fn tenant_id(&self) -> &str {
        render::field(&self.raw, "tenantId")
    }

    pub fn is_default(&self) -> Option<bool> {
        self.raw.get("isDefault").and_then(Value::as_bool)
    }

    /// The untouched provider mapping.
    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

/// Immutable per-run context threaded into every operation: the executor
/// plus the subscription snapshot.
pub struct AzContext {
    pub executor: Executor,
    pub subscription: Option<Subscription>,
}

impl AzContext {
    /// Verify the external CLI answers its version check, then snapshot the
    /// subscription. The `Err` here is the single fatal error of the tool.
    pub fn init(executor: Executor) -> Result<Self> {
        if !executor.verify_available() {
            return Err(ArmError::CliUnavailable {
                program: executor.program().to_string(),
            });
        }

        let subscription = Subscription::fetch(&executor);
        Ok(Self {
            executor,
            subscription,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::{mocked_executor, RawOutput};
    use serde_json::json;

    #[test]
    fn accessors_fall_back_on_missing_fields() {
        let sub = Subscription {
            raw: json!({"name": "Pay-As-You-Go"}),
        };
        assert_eq!(sub.name(), "Pay-As-You-Go");
        assert_eq!(sub.id(), "N/A");
        assert_eq!(sub.tenant_id(), "N/A");
        assert_eq!(sub.is_default(), None);
    }

    #[test]
    fn fetch_tolerates_failure() {
        let (mock, executor) = mocked_executor();
        mock.push_failure(1, "Please run 'az login' to setup account.");
        assert!(Subscription::fetch(&executor).is_none());
    }

    #[test]
    fn init_fails_when_version_check_fails() {
        let (mock, executor) = mocked_executor();
        mock.push_failure(127, "az: command not found");
        assert!(matches!(
            AzContext::init(executor),
            Err(ArmError::CliUnavailable { .. })
        ));
    }

    #[test]
    fn init_snapshots_subscription_once() {
        let (mock, executor) = mocked_executor();
        mock.push(RawOutput {
            status: 0,
            stdout: "azure-cli 2.60.0".into(),
            stderr: String::new(),
        });
        mock.push_json(json!({"name": "Dev", "id": "0000", "isDefault": true}));

        let context = AzContext::init(executor).unwrap();
        let sub = context.subscription.expect("snapshot present");
        assert_eq!(sub.name(), "Dev");
        assert_eq!(sub.is_default(), Some(true));
        assert_eq!(mock.calls().len(), 2);
    }
}
