//! armctl CLI - Azure resource management from the terminal
//!
//! armctl shells out to the Azure CLI for every operation: it builds an
//! argument vector, runs `az` to completion, and prints a tabular summary of
//! the JSON it returns. Run without a subcommand for the interactive menu.

use std::collections::BTreeMap;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use armctl_core::exec::DEFAULT_PROGRAM;
use armctl_core::{ops, AzContext, Executor, OpResult};

use config::ArmConfig;

mod config;
mod menu;
mod ui;

#[derive(Parser, Debug)]
#[command(
    name = "armctl",
    version,
    about = "Manage Azure resource groups, storage accounts and VMs via the az CLI",
    long_about = "armctl shells out to the Azure CLI for every operation: it builds an \
                  argument vector, runs `az` to completion, and prints a tabular summary \
                  of the JSON it returns. Run without a subcommand for the interactive menu."
)]
struct Cli {
    /// Suppress progress spinners (for script/LLM consumption)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Path to the az binary (default: `az` on PATH, or az_bin from config)
    #[arg(long, global = true, value_name = "PATH")]
    az_bin: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a resource group
    CreateRg(CreateRgArgs),
    /// List resource groups in the active subscription
    ListRg,
    /// Delete a resource group and all resources in it
    DeleteRg(DeleteRgArgs),
    /// Create a storage account
    CreateStorage(CreateStorageArgs),
    /// List storage accounts, optionally scoped to a resource group
    ListStorage(ScopeArgs),
    /// Create a blob container in a storage account
    CreateContainer(CreateContainerArgs),
    /// Create a virtual machine
    CreateVm(CreateVmArgs),
    /// List virtual machines, optionally scoped to a resource group
    ListVm(ScopeArgs),
    /// Start a virtual machine
    StartVm(VmRefArgs),
    /// Stop (deallocate) a virtual machine
    StopVm(VmRefArgs),
    /// List all resources, optionally filtered by type
    ListResources(ListResourcesArgs),
    /// List resources carrying a tag
    FindByTag(FindByTagArgs),
    /// Show the active subscription
    Account,
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CreateRgArgs {
    /// Resource group name
    #[arg(long)]
    name: String,

    /// Azure region (default: eastus, or default_location from config)
    #[arg(long)]
    location: Option<String>,

    /// Tags as KEY=VALUE pairs (repeatable)
    #[arg(long = "tag", value_name = "KEY=VALUE")]
    tags: Vec<String>,
}

#[derive(Parser, Debug)]
struct DeleteRgArgs {
    /// Resource group name
    #[arg(long)]
    name: String,

    /// Skip the confirmation prompt
    #[arg(long)]
    yes: bool,

    /// Return without waiting for the deletion to complete
    #[arg(long)]
    no_wait: bool,
}

#[derive(Parser, Debug)]
struct CreateStorageArgs {
    /// Storage account name (3-24 lowercase alphanumeric, globally unique)
    #[arg(long)]
    name: String,

    /// Resource group name
    #[arg(long)]
    resource_group: String,

    /// Azure region (default: eastus, or default_location from config)
    #[arg(long)]
    location: Option<String>,

    /// Storage SKU
    #[arg(long, default_value = ops::storage::DEFAULT_SKU)]
    sku: String,
}

#[derive(Parser, Debug)]
struct ScopeArgs {
    /// Resource group to scope the listing to
    #[arg(long)]
    resource_group: Option<String>,
}

#[derive(Parser, Debug)]
struct CreateContainerArgs {
    /// Container name
    #[arg(long)]
    name: String,

    /// Storage account holding the container
    #[arg(long)]
    account_name: String,
}

#[derive(Parser, Debug)]
struct CreateVmArgs {
    /// Virtual machine name
    #[arg(long)]
    name: String,

    /// Resource group name
    #[arg(long)]
    resource_group: String,

    /// OS image
    #[arg(long, default_value = ops::vm::DEFAULT_IMAGE)]
    image: String,

    /// VM size
    #[arg(long, default_value = ops::vm::DEFAULT_SIZE)]
    size: String,

    /// Administrator username
    #[arg(long, default_value = ops::vm::DEFAULT_ADMIN_USERNAME)]
    admin_username: String,

    /// Return without waiting for provisioning to complete
    #[arg(long)]
    no_wait: bool,
}

#[derive(Parser, Debug)]
struct VmRefArgs {
    /// Virtual machine name
    #[arg(long)]
    name: String,

    /// Resource group name
    #[arg(long)]
    resource_group: String,
}

#[derive(Parser, Debug)]
struct ListResourcesArgs {
    /// Resource type filter (e.g. Microsoft.Compute/virtualMachines)
    #[arg(long)]
    resource_type: Option<String>,
}

#[derive(Parser, Debug)]
struct FindByTagArgs {
    /// Tag key
    #[arg(long)]
    key: String,

    /// Tag value
    #[arg(long)]
    value: String,
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

fn main() -> Result<()> {
    init_tracing().ok();
    let cli = Cli::parse();

    ui::init_quiet_mode(cli.quiet);

    // Completions need neither az nor a context.
    if let Some(Commands::Completions(args)) = &cli.command {
        return run_completions(args);
    }

    let config = ArmConfig::load();
    let program = cli
        .az_bin
        .clone()
        .or_else(|| config.az_bin.clone())
        .unwrap_or_else(|| DEFAULT_PROGRAM.to_string());

    let context = match AzContext::init(Executor::with_program(program.as_str())) {
        Ok(context) => context,
        Err(err) => {
            if which::which(&program).is_err() {
                eprintln!("❌ Error: '{program}' not found on PATH.");
            } else {
                eprintln!("❌ Error: {err}");
            }
            eprintln!(
                "Install the Azure CLI: https://learn.microsoft.com/cli/azure/install-azure-cli"
            );
            std::process::exit(1);
        }
    };

    match cli.command {
        None => menu::run(&context, &config),
        Some(command) => {
            ui::print_banner(&context);
            run_command(&context, &config, command)
        }
    }
}

fn run_command(context: &AzContext, config: &ArmConfig, command: Commands) -> Result<()> {
    let executor = &context.executor;

    let ok = match command {
        Commands::CreateRg(args) => {
            let tags = parse_tags(&args.tags)?;
            let location = config.location(args.location);
            run_mutation(
                format!("Creating resource group '{}' in {location}...", args.name),
                || ops::create_group(executor, &args.name, &location, &tags),
            )
        }
        Commands::ListRg => print_report(ops::list_groups(executor)),
        Commands::DeleteRg(args) => {
            let confirmed = args.yes || confirm_deletion(&args.name)?;
            run_mutation(
                format!("Deleting resource group '{}'...", args.name),
                || ops::delete_group(executor, &args.name, confirmed, args.no_wait),
            )
        }
        Commands::CreateStorage(args) => {
            let location = config.location(args.location);
            run_mutation(
                format!("Creating storage account '{}'...", args.name),
                || {
                    ops::create_storage_account(
                        executor,
                        &args.name,
                        &args.resource_group,
                        &location,
                        &args.sku,
                    )
                },
            )
        }
        Commands::ListStorage(args) => print_report(ops::list_storage_accounts(
            executor,
            args.resource_group.as_deref(),
        )),
        Commands::CreateContainer(args) => run_mutation(
            format!(
                "Creating container '{}' in account '{}'...",
                args.name, args.account_name
            ),
            || ops::create_blob_container(executor, &args.account_name, &args.name),
        ),
        Commands::CreateVm(args) => run_mutation(
            format!(
                "Creating virtual machine '{}' (this may take several minutes)...",
                args.name
            ),
            || {
                ops::create_vm(
                    executor,
                    &args.name,
                    &args.resource_group,
                    &args.image,
                    &args.size,
                    &args.admin_username,
                    args.no_wait,
                )
            },
        ),
        Commands::ListVm(args) => {
            print_report(ops::list_vms(executor, args.resource_group.as_deref()))
        }
        Commands::StartVm(args) => run_mutation(format!("Starting VM '{}'...", args.name), || {
            ops::start_vm(executor, &args.name, &args.resource_group)
        }),
        Commands::StopVm(args) => run_mutation(format!("Stopping VM '{}'...", args.name), || {
            ops::stop_vm(executor, &args.name, &args.resource_group)
        }),
        Commands::ListResources(args) => print_report(ops::list_resources(
            executor,
            args.resource_type.as_deref(),
        )),
        Commands::FindByTag(args) => {
            print_report(ops::resources_by_tag(executor, &args.key, &args.value))
        }
        Commands::Account => {
            ui::print_subscription(context);
            true
        }
        Commands::Completions(_) => unreachable!("handled before context init"),
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

/// Run a mutating operation behind a spinner, print its report, return
/// whether it succeeded.
fn run_mutation(message: String, op: impl FnOnce() -> OpResult<bool>) -> bool {
    let pb = ui::spinner(message);
    let result = op();
    ui::finish(pb);
    println!("{}", result.report);
    result.value
}

/// Print a listing report. A failed listing is already reported by the
/// catalog and yields an empty sequence, not an exit code.
fn print_report(result: OpResult<Vec<serde_json::Value>>) -> bool {
    println!("{}", result.report);
    true
}

/// Parse repeatable KEY=VALUE tag arguments. Presence-only validation, like
/// everything else; tag legality is az's call.
fn parse_tags(pairs: &[String]) -> Result<BTreeMap<String, String>> {
    let mut tags = BTreeMap::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("invalid tag '{pair}', expected KEY=VALUE"))?;
        tags.insert(key.to_string(), value.to_string());
    }
    Ok(tags)
}

/// TTY confirmation for deletion; refuses instead of deleting blind when
/// there is no terminal to ask.
fn confirm_deletion(name: &str) -> Result<bool> {
    use std::io::IsTerminal;

    if !std::io::stdin().is_terminal() {
        return Err(anyhow!(
            "deleting '{name}' needs confirmation; pass --yes in non-interactive use"
        ));
    }

    println!("⚠️  This will delete ALL resources in '{name}'!");
    let confirmed = inquire::Confirm::new(&format!("Delete resource group '{name}'?"))
        .with_default(false)
        .prompt()
        .unwrap_or(false);
    Ok(confirmed)
}

fn run_completions(args: &CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tags_accepts_key_value_pairs() {
        let tags = parse_tags(&["env=dev".into(), "team=core".into()]).unwrap();
        assert_eq!(tags.get("env").map(String::as_str), Some("dev"));
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn parse_tags_rejects_bare_keys() {
        assert!(parse_tags(&["env".into()]).is_err());
    }

    #[test]
    fn parse_tags_keeps_equals_in_value() {
        let tags = parse_tags(&["expr=a=b".into()]).unwrap();
        assert_eq!(tags.get("expr").map(String::as_str), Some("a=b"));
    }
}
