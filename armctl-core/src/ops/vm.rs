//! Virtual machine operations: create, list, start, stop.

use serde_json::Value;

use crate::exec::{AzCommand, Executor, Outcome, Payload};
use crate::render::{field, Table};

use super::{failure_report, list_result, OpResult};

pub const DEFAULT_IMAGE: &str = "Ubuntu2204";
pub const DEFAULT_SIZE: &str = "Standard_B1s";
pub const DEFAULT_ADMIN_USERNAME: &str = "azureuser";

/// Create a virtual machine, generating SSH keys on the fly. With `no_wait`
/// the provider returns before provisioning finishes.
pub fn create_vm(
    executor: &Executor,
    name: &str,
    resource_group: &str,
    image: &str,
    size: &str,
    admin_username: &str,
    no_wait: bool,
) -> OpResult<bool> {
    let command = AzCommand::new(["vm", "create"])
        .arg_pair("--resource-group", resource_group)
        .arg_pair("--name", name)
        .arg_pair("--image", image)
        .arg_pair("--size", size)
        .arg_pair("--admin-username", admin_username)
        .arg("--generate-ssh-keys")
        .arg_if(no_wait, "--no-wait");

    match executor.execute(command, true) {
        Outcome::Success(_) if no_wait => OpResult::new(
            true,
            format!("✅ Creation of '{name}' started (running in background)"),
        ),
        Outcome::Success(payload) => {
            let mut report = format!("✅ Virtual machine '{name}' created");
            if let Payload::Json(value) = &payload {
                report.push_str(&format!(
                    "\n   Public IP: {}",
                    field(value, "publicIpAddress")
                ));
            }
            OpResult::new(true, report)
        }
        outcome => OpResult::new(
            false,
            failure_report(&format!("creating virtual machine '{name}'"), &outcome),
        ),
    }
}

/// List virtual machines with power state details, optionally scoped to one
/// resource group.
pub fn list_vms(executor: &Executor, resource_group: Option<&str>) -> OpResult<Vec<Value>> {
    let mut command = AzCommand::new(["vm", "list"]);
    if let Some(group) = resource_group {
        command = command.arg_pair("--resource-group", group);
    }
    // --show-details is what populates powerState in the payload.
    let command = command.arg("--show-details");

    let outcome = executor.execute(command, true);
    list_result(outcome, "listing virtual machines", vm_table)
}

fn vm_table(items: &[Value]) -> String {
    let mut table = Table::new(&[
        ("Name", 25),
        ("Resource Group", 30),
        ("Location", 15),
        ("Power State", 20),
    ]);
    for item in items {
        table.row(vec![
            field(item, "name").to_string(),
            field(item, "resourceGroup").to_string(),
            field(item, "location").to_string(),
            field(item, "powerState").to_string(),
        ]);
    }
    format!("{}\n\n📊 Total VMs: {}", table.render(), items.len())
}

pub fn start_vm(executor: &Executor, name: &str, resource_group: &str) -> OpResult<bool> {
    let command = AzCommand::new(["vm", "start"])
        .arg_pair("--name", name)
        .arg_pair("--resource-group", resource_group);

    match executor.execute(command, false) {
        Outcome::Success(_) => OpResult::new(true, format!("✅ VM '{name}' started")),
        outcome => OpResult::new(
            false,
            failure_report(&format!("starting VM '{name}'"), &outcome),
        ),
    }
}

/// Stop means deallocate: compute billing stops, not just the guest OS.
pub fn stop_vm(executor: &Executor, name: &str, resource_group: &str) -> OpResult<bool> {
    let command = AzCommand::new(["vm", "deallocate"])
        .arg_pair("--name", name)
        .arg_pair("--resource-group", resource_group);

    match executor.execute(command, false) {
        Outcome::Success(_) => OpResult::new(true, format!("✅ VM '{name}' stopped (deallocated)")),
        outcome => OpResult::new(
            false,
            failure_report(&format!("stopping VM '{name}'"), &outcome),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::mocked_executor;
    use serde_json::json;

    #[test]
    fn create_generates_ssh_keys() {
        let (mock, executor) = mocked_executor();
        create_vm(
            &executor,
            "web-01",
            "app-rg",
            DEFAULT_IMAGE,
            DEFAULT_SIZE,
            DEFAULT_ADMIN_USERNAME,
            false,
        );

        let calls = mock.calls();
        let args = &calls[0].args;
        assert!(args.contains(&"--generate-ssh-keys".to_string()));
        assert!(!args.contains(&"--no-wait".to_string()));
    }

    #[test]
    fn create_no_wait_adds_background_flag() {
        let (mock, executor) = mocked_executor();
        let result = create_vm(
            &executor,
            "web-01",
            "app-rg",
            DEFAULT_IMAGE,
            DEFAULT_SIZE,
            DEFAULT_ADMIN_USERNAME,
            true,
        );

        assert!(result.value);
        assert!(mock.calls()[0].args.contains(&"--no-wait".to_string()));
        assert!(result.report.contains("background"));
    }

    #[test]
    fn create_reports_public_ip_from_payload() {
        let (mock, executor) = mocked_executor();
        mock.push_json(json!({"publicIpAddress": "203.0.113.7", "powerState": "VM running"}));

        let result = create_vm(
            &executor,
            "web-01",
            "app-rg",
            DEFAULT_IMAGE,
            DEFAULT_SIZE,
            DEFAULT_ADMIN_USERNAME,
            false,
        );
        assert!(result.value);
        assert!(result.report.contains("203.0.113.7"));
    }

    #[test]
    fn list_appends_show_details_last() {
        let (mock, executor) = mocked_executor();
        list_vms(&executor, Some("app-rg"));

        let calls = mock.calls();
        assert_eq!(
            calls[0].args,
            vec![
                "vm",
                "list",
                "--resource-group",
                "app-rg",
                "--show-details",
                "--output",
                "json"
            ]
        );
    }

    #[test]
    fn list_renders_power_state() {
        let (mock, executor) = mocked_executor();
        mock.push_json(json!([
            {"name": "web-01", "resourceGroup": "app-rg", "location": "eastus", "powerState": "VM running"},
            {"name": "web-02", "resourceGroup": "app-rg", "location": "eastus"}
        ]));

        let result = list_vms(&executor, None);
        assert!(result.report.contains("VM running"));
        assert!(result.report.contains("N/A"));
        assert!(result.report.contains("Total VMs: 2"));
    }

    #[test]
    fn start_and_stop_do_not_capture() {
        let (mock, executor) = mocked_executor();
        start_vm(&executor, "web-01", "app-rg");
        stop_vm(&executor, "web-01", "app-rg");

        let calls = mock.calls();
        assert_eq!(calls[0].args[..2], ["vm".to_string(), "start".to_string()]);
        assert_eq!(
            calls[1].args[..2],
            ["vm".to_string(), "deallocate".to_string()]
        );
        for call in &calls {
            assert!(!call.args.contains(&"--output".to_string()));
        }
    }

    #[test]
    fn stop_failure_surfaces_diagnostic() {
        let (mock, executor) = mocked_executor();
        mock.push_failure(1, "quota exceeded");

        let result = stop_vm(&executor, "web-01", "app-rg");
        assert!(!result.value);
        assert!(result.report.contains("quota exceeded"));
    }
}
