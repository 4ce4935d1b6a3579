//! UI helpers for the armctl CLI: banner, subscription view, spinners.
//!
//! # Quiet mode
//!
//! Spinners are suppressed when:
//! - the `--quiet` flag is passed
//! - `ARMCTL_QUIET=1` is set
//! - stderr is not a TTY (piped output)
//!
//! This keeps armctl usable from scripts and LLM tooling.

use std::io::IsTerminal;
use std::sync::OnceLock;
use std::time::Duration;

use armctl_core::{render, AzContext};
use indicatif::{ProgressBar, ProgressStyle};

/// Global quiet mode state
static QUIET_MODE: OnceLock<bool> = OnceLock::new();

/// Initialize quiet mode once at startup with the --quiet flag value.
pub fn init_quiet_mode(quiet_flag: bool) {
    let is_quiet = quiet_flag
        || std::env::var("ARMCTL_QUIET")
            .map(|v| v == "1")
            .unwrap_or(false)
        || !std::io::stderr().is_terminal();

    QUIET_MODE.set(is_quiet).ok();
}

/// Check if we're in quiet mode
pub fn is_quiet() -> bool {
    *QUIET_MODE.get().unwrap_or(&false)
}

/// Spinner shown while an az invocation runs; `None` in quiet mode.
pub fn spinner(msg: impl Into<String>) -> Option<ProgressBar> {
    if is_quiet() {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
            .template("{spinner:.cyan} {msg}")
            .expect("valid template"),
    );
    pb.set_message(msg.into());
    pb.enable_steady_tick(Duration::from_millis(80));
    Some(pb)
}

/// Clear the spinner so the operation report prints on a clean line.
pub fn finish(pb: Option<ProgressBar>) {
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
}

/// Application banner with the active subscription.
pub fn print_banner(context: &AzContext) {
    println!();
    println!("{}", "=".repeat(60));
    println!("  armctl — Azure Resource Manager");
    println!("{}", "=".repeat(60));

    if let Some(sub) = &context.subscription {
        println!();
        println!("📍 Subscription: {}", sub.name());
        println!("   ID: {}", sub.id());
    }
    println!();
}

/// Detailed view of the subscription snapshot.
pub fn print_subscription(context: &AzContext) {
    match &context.subscription {
        Some(sub) => {
            println!("{}", "=".repeat(60));
            println!("Active Subscription");
            println!("{}", "=".repeat(60));
            println!("Name: {}", sub.name());
            println!("ID: {}", sub.id());
            println!("State: {}", sub.state());
            println!("Tenant ID: {}", sub.tenant_id());
            println!(
                "Is Default: {}",
                sub.is_default()
                    .map_or_else(|| render::MISSING.to_string(), |b| b.to_string())
            );
        }
        None => println!("❌ Could not retrieve subscription information."),
    }
}
