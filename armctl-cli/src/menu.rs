//! Interactive menu mode, entered when no subcommand is given.
//!
//! Prompt flow mirrors the one-shot commands. Esc or Ctrl-C backs out of the
//! current prompt instead of killing the session.

use std::collections::BTreeMap;

use anyhow::Result;
use inquire::{Confirm, InquireError, Select, Text};

use armctl_core::{ops, AzContext};

use crate::config::ArmConfig;
use crate::ui;

/// A cancelled prompt (Esc / Ctrl-C) is a "go back", not an error.
fn cancelled<T>(result: Result<T, InquireError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

pub fn run(context: &AzContext, config: &ArmConfig) -> Result<()> {
    ui::print_banner(context);

    loop {
        let choice = cancelled(
            Select::new(
                "Main menu",
                vec![
                    "Resource groups",
                    "Storage accounts",
                    "Virtual machines",
                    "All resources",
                    "Subscription info",
                    "Exit",
                ],
            )
            .prompt(),
        )?;

        match choice {
            Some("Resource groups") => group_menu(context, config)?,
            Some("Storage accounts") => storage_menu(context, config)?,
            Some("Virtual machines") => vm_menu(context)?,
            Some("All resources") => {
                let result = ops::list_resources(&context.executor, None);
                println!("{}\n", result.report);
            }
            Some("Subscription info") => ui::print_subscription(context),
            _ => break,
        }
    }

    println!("\n👋 Thanks for using armctl!");
    Ok(())
}

fn group_menu(context: &AzContext, config: &ArmConfig) -> Result<()> {
    let executor = &context.executor;

    loop {
        let choice = cancelled(
            Select::new("Resource groups", vec!["Create", "List", "Delete", "Back"]).prompt(),
        )?;

        match choice {
            Some("Create") => {
                let Some(name) = cancelled(Text::new("Resource group name:").prompt())? else {
                    continue;
                };
                let Some(location) = cancelled(
                    Text::new("Location:")
                        .with_default(&config.location(None))
                        .prompt(),
                )?
                else {
                    continue;
                };

                let pb = ui::spinner(format!("Creating resource group '{name}'..."));
                let result = ops::create_group(executor, &name, &location, &BTreeMap::new());
                ui::finish(pb);
                println!("{}\n", result.report);
            }
            Some("List") => {
                let result = ops::list_groups(executor);
                println!("{}\n", result.report);
            }
            Some("Delete") => {
                let Some(name) = cancelled(Text::new("Resource group to delete:").prompt())?
                else {
                    continue;
                };

                println!("⚠️  This will delete ALL resources in '{name}'!");
                let confirmed = cancelled(Confirm::new("Delete it?").with_default(false).prompt())?
                    .unwrap_or(false);

                // Menu deletions always run in no-wait mode.
                let result = ops::delete_group(executor, &name, confirmed, true);
                println!("{}\n", result.report);
            }
            _ => break,
        }
    }

    Ok(())
}

fn storage_menu(context: &AzContext, config: &ArmConfig) -> Result<()> {
    let executor = &context.executor;

    loop {
        let choice = cancelled(
            Select::new(
                "Storage accounts",
                vec![
                    "Create account",
                    "List accounts",
                    "Create blob container",
                    "Back",
                ],
            )
            .prompt(),
        )?;

        match choice {
            Some("Create account") => {
                let Some(name) = cancelled(
                    Text::new("Account name (3-24 lowercase alphanumeric):").prompt(),
                )?
                else {
                    continue;
                };
                let Some(group) = cancelled(Text::new("Resource group:").prompt())? else {
                    continue;
                };
                let Some(location) = cancelled(
                    Text::new("Location:")
                        .with_default(&config.location(None))
                        .prompt(),
                )?
                else {
                    continue;
                };

                let pb = ui::spinner(format!("Creating storage account '{name}'..."));
                let result = ops::create_storage_account(
                    executor,
                    &name,
                    &group,
                    &location,
                    ops::storage::DEFAULT_SKU,
                );
                ui::finish(pb);
                println!("{}\n", result.report);
            }
            Some("List accounts") => {
                let result = ops::list_storage_accounts(executor, None);
                println!("{}\n", result.report);
            }
            Some("Create blob container") => {
                let Some(account) = cancelled(Text::new("Storage account:").prompt())? else {
                    continue;
                };
                let Some(container) = cancelled(Text::new("Container name:").prompt())? else {
                    continue;
                };

                let pb = ui::spinner(format!("Creating container '{container}'..."));
                let result = ops::create_blob_container(executor, &account, &container);
                ui::finish(pb);
                println!("{}\n", result.report);
            }
            _ => break,
        }
    }

    Ok(())
}

fn vm_menu(context: &AzContext) -> Result<()> {
    let executor = &context.executor;

    loop {
        let choice = cancelled(
            Select::new(
                "Virtual machines",
                vec!["Create", "List", "Start", "Stop", "Back"],
            )
            .prompt(),
        )?;

        match choice {
            Some("Create") => {
                let Some(name) = cancelled(Text::new("VM name:").prompt())? else {
                    continue;
                };
                let Some(group) = cancelled(Text::new("Resource group:").prompt())? else {
                    continue;
                };

                println!("⚠️  Creating a VM will incur costs!");
                let confirmed = cancelled(Confirm::new("Continue?").with_default(false).prompt())?
                    .unwrap_or(false);
                if !confirmed {
                    println!("❌ VM creation cancelled.\n");
                    continue;
                }

                let pb = ui::spinner(format!(
                    "Creating virtual machine '{name}' (this may take several minutes)..."
                ));
                let result = ops::create_vm(
                    executor,
                    &name,
                    &group,
                    ops::vm::DEFAULT_IMAGE,
                    ops::vm::DEFAULT_SIZE,
                    ops::vm::DEFAULT_ADMIN_USERNAME,
                    false,
                );
                ui::finish(pb);
                println!("{}\n", result.report);
            }
            Some("List") => {
                let result = ops::list_vms(executor, None);
                println!("{}\n", result.report);
            }
            Some("Start") => {
                if let Some((name, group)) = vm_ref()? {
                    let pb = ui::spinner(format!("Starting VM '{name}'..."));
                    let result = ops::start_vm(executor, &name, &group);
                    ui::finish(pb);
                    println!("{}\n", result.report);
                }
            }
            Some("Stop") => {
                if let Some((name, group)) = vm_ref()? {
                    let pb = ui::spinner(format!("Stopping VM '{name}'..."));
                    let result = ops::stop_vm(executor, &name, &group);
                    ui::finish(pb);
                    println!("{}\n", result.report);
                }
            }
            _ => break,
        }
    }

    Ok(())
}

fn vm_ref() -> Result<Option<(String, String)>> {
    let Some(name) = cancelled(Text::new("VM name:").prompt())? else {
        return Ok(None);
    };
    let Some(group) = cancelled(Text::new("Resource group:").prompt())? else {
        return Ok(None);
    };
    Ok(Some((name, group)))
}
