//! Resource group operations: create, list, delete.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::exec::{AzCommand, Executor, Outcome};
use crate::render::{field, nested_field, Table};

use super::{failure_report, list_result, OpResult};

/// Create a resource group, optionally tagged.
pub fn create_group(
    executor: &Executor,
    name: &str,
    location: &str,
    tags: &BTreeMap<String, String>,
) -> OpResult<bool> {
    let mut command = AzCommand::new(["group", "create"])
        .arg_pair("--name", name)
        .arg_pair("--location", location);

    if !tags.is_empty() {
        let rendered = tags
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(" ");
        command = command.arg_pair("--tags", rendered);
    }

    match executor.execute(command, true) {
        Outcome::Success(_) => {
            OpResult::new(true, format!("✅ Resource group '{name}' created"))
        }
        outcome => OpResult::new(
            false,
            failure_report(&format!("creating resource group '{name}'"), &outcome),
        ),
    }
}

/// List resource groups in the active subscription.
pub fn list_groups(executor: &Executor) -> OpResult<Vec<Value>> {
    let outcome = executor.execute(AzCommand::new(["group", "list"]), true);
    list_result(outcome, "listing resource groups", group_table)
}

fn group_table(items: &[Value]) -> String {
    let mut table = Table::new(&[("Name", 30), ("Location", 15), ("Status", 15)]);
    for item in items {
        table.row(vec![
            field(item, "name").to_string(),
            field(item, "location").to_string(),
            nested_field(item, "properties", "provisioningState").to_string(),
        ]);
    }
    format!(
        "{}\n\n📊 Total resource groups: {}",
        table.render(),
        items.len()
    )
}

/// Delete a resource group and everything in it. `confirmed` must already be
/// affirmed by the caller — prompting belongs to the interactive layer, and
/// an unconfirmed request never reaches the executor.
pub fn delete_group(
    executor: &Executor,
    name: &str,
    confirmed: bool,
    no_wait: bool,
) -> OpResult<bool> {
    if !confirmed {
        return OpResult::new(false, format!("❌ Deletion of '{name}' cancelled"));
    }

    let command = AzCommand::new(["group", "delete"])
        .arg_pair("--name", name)
        .arg("--yes")
        .arg_if(no_wait, "--no-wait");

    match executor.execute(command, false) {
        Outcome::Success(_) if no_wait => OpResult::new(
            true,
            format!("✅ Deletion of '{name}' started (running in background)"),
        ),
        Outcome::Success(_) => OpResult::new(true, format!("✅ Resource group '{name}' deleted")),
        outcome => OpResult::new(
            false,
            failure_report(&format!("deleting resource group '{name}'"), &outcome),
        ),
    }
}
