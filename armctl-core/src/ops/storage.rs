//! Storage account and blob container operations.

use serde_json::Value;

use crate::exec::{AzCommand, Executor, Outcome};
use crate::render::{field, nested_field, Table};

use super::{failure_report, list_result, OpResult};

/// SKU used when the caller does not pick one.
pub const DEFAULT_SKU: &str = "Standard_LRS";

/// Create a storage account. Name legality (3-24 lowercase alphanumeric,
/// globally unique) is enforced by the provider, not here.
pub fn create_storage_account(
    executor: &Executor,
    name: &str,
    resource_group: &str,
    location: &str,
    sku: &str,
) -> OpResult<bool> {
    let command = AzCommand::new(["storage", "account", "create"])
        .arg_pair("--name", name)
        .arg_pair("--resource-group", resource_group)
        .arg_pair("--location", location)
        .arg_pair("--sku", sku);

    match executor.execute(command, true) {
        Outcome::Success(_) => {
            OpResult::new(true, format!("✅ Storage account '{name}' created"))
        }
        outcome => OpResult::new(
            false,
            failure_report(&format!("creating storage account '{name}'"), &outcome),
        ),
    }
}

/// List storage accounts, optionally scoped to one resource group.
pub fn list_storage_accounts(
    executor: &Executor,
    resource_group: Option<&str>,
) -> OpResult<Vec<Value>> {
    let mut command = AzCommand::new(["storage", "account", "list"]);
    if let Some(group) = resource_group {
        command = command.arg_pair("--resource-group", group);
    }

    let outcome = executor.execute(command, true);
    list_result(outcome, "listing storage accounts", storage_table)
}

fn storage_table(items: &[Value]) -> String {
    let mut table = Table::new(&[
        ("Name", 25),
        ("Resource Group", 30),
        ("Location", 15),
        ("SKU", 20),
    ]);
    for item in items {
        table.row(vec![
            field(item, "name").to_string(),
            field(item, "resourceGroup").to_string(),
            field(item, "location").to_string(),
            nested_field(item, "sku", "name").to_string(),
        ]);
    }
    format!(
        "{}\n\n📊 Total storage accounts: {}",
        table.render(),
        items.len()
    )
}

/// Create a blob container inside an existing storage account.
pub fn create_blob_container(
    executor: &Executor,
    account_name: &str,
    container_name: &str,
) -> OpResult<bool> {
    let command = AzCommand::new(["storage", "container", "create"])
        .arg_pair("--name", container_name)
        .arg_pair("--account-name", account_name);

    match executor.execute(command, true) {
        Outcome::Success(_) => OpResult::new(
            true,
            format!("✅ Container '{container_name}' created in account '{account_name}'"),
        ),
        outcome => OpResult::new(
            false,
            failure_report(&format!("creating container '{container_name}'"), &outcome),
        ),
    }
}
