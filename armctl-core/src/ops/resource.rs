//! Subscription-wide resource queries.

use serde_json::Value;

use crate::exec::{AzCommand, Executor};
use crate::render::{field, Table, MISSING};

use super::{list_result, OpResult};

/// Display cap for the flat listing; the returned payload still carries
/// everything.
const DISPLAY_LIMIT: usize = 20;

/// List all resources in the subscription, optionally filtered by type
/// (e.g. `Microsoft.Compute/virtualMachines`).
pub fn list_resources(executor: &Executor, resource_type: Option<&str>) -> OpResult<Vec<Value>> {
    let mut command = AzCommand::new(["resource", "list"]);
    if let Some(kind) = resource_type {
        command = command.arg_pair("--resource-type", kind);
    }

    let outcome = executor.execute(command, true);
    list_result(outcome, "listing resources", resource_table)
}

fn resource_table(items: &[Value]) -> String {
    let mut table = Table::new(&[("Name", 30), ("Type", 40), ("Location", 15)]);
    for item in items.iter().take(DISPLAY_LIMIT) {
        let kind = field(item, "type");
        // Show only the trailing segment of namespaced types.
        let short = if kind == MISSING {
            kind
        } else {
            kind.rsplit('/').next().unwrap_or(kind)
        };
        table.row(vec![
            field(item, "name").to_string(),
            short.to_string(),
            field(item, "location").to_string(),
        ]);
    }

    let mut report = format!("{}\n\n📊 Total resources: {}", table.render(), items.len());
    if items.len() > DISPLAY_LIMIT {
        report.push_str(&format!(
            "\n   (showing first {DISPLAY_LIMIT} of {})",
            items.len()
        ));
    }
    report
}

/// List resources carrying a `key=value` tag.
pub fn resources_by_tag(executor: &Executor, key: &str, value: &str) -> OpResult<Vec<Value>> {
    let command =
        AzCommand::new(["resource", "list"]).arg_pair("--tag", format!("{key}={value}"));

    let outcome = executor.execute(command, true);
    list_result(
        outcome,
        &format!("querying resources tagged {key}={value}"),
        tag_listing,
    )
}

fn tag_listing(items: &[Value]) -> String {
    let mut lines: Vec<String> = items
        .iter()
        .map(|item| format!("  - {} ({})", field(item, "name"), field(item, "type")))
        .collect();
    lines.push(format!("\n📊 Found {} resources", items.len()));
    lines.join("\n")
}
