//! gatectl: command-line front end for the ApprovalTask admission webhook.
//!
//! Usage:
//!   gatectl review --request review.json [--config gate.toml] [--trail]
//!   gatectl decide --old old.json --new new.json --user alice --group qa
//!   gatectl scenarios

mod scenarios;

use std::{fs, path::PathBuf, sync::Arc};

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use approval_gate_audit::InMemoryDecisionLog;
use approval_gate_config::GateConfig;
use approval_gate_contracts::{
    admission::AdmissionReview,
    approver::TaskState,
    error::{GateError, GateResult},
    requester::Requester,
};
use approval_gate_core::{traits::DecisionEngine, ApprovalGate};
use approval_gate_webhook::{AdmissionController, ObjectRole, TaskDecoder};

// ── CLI definition ────────────────────────────────────────────────────────────

/// Validate ApprovalTask updates the way the admission webhook does.
#[derive(Parser)]
#[command(
    name = "gatectl",
    about = "ApprovalTask admission gate",
    long_about = "Answers AdmissionReview documents, decides on old/new ApprovalTask pairs,\n\
                  and runs the reference approval scenarios."
)]
struct Cli {
    /// Gate configuration (TOML). Built-in defaults when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Answer an AdmissionReview document and print the response review.
    Review {
        /// AdmissionReview JSON file.
        #[arg(long)]
        request: PathBuf,
        /// Also print the hash-chained decision trail.
        #[arg(long)]
        trail: bool,
    },
    /// Decide on an old/new ApprovalTask pair for one requester.
    Decide {
        /// Current ApprovalTask JSON. An empty task when omitted.
        #[arg(long)]
        old: Option<PathBuf>,
        /// Proposed ApprovalTask JSON.
        #[arg(long)]
        new: PathBuf,
        /// Requester username.
        #[arg(long)]
        user: String,
        /// Requester group; repeat for several.
        #[arg(long = "group")]
        groups: Vec<String>,
    },
    /// Run the reference approval scenarios.
    Scenarios,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // RUST_LOG=debug shows every evaluation step.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = load_config(cli.config.as_ref()).and_then(|config| match cli.command {
        Command::Review { request, trail } => run_review(&config, &request, trail),
        Command::Decide {
            old,
            new,
            user,
            groups,
        } => run_decide(&config, old.as_ref(), &new, Requester::new(user, groups)),
        Command::Scenarios => match scenarios::run_all()? {
            0 => Ok(()),
            failed => {
                eprintln!("{failed} scenario(s) produced an unexpected outcome");
                std::process::exit(1);
            }
        },
    });

    if let Err(e) = result {
        eprintln!("gatectl error: {e}");
        std::process::exit(1);
    }
}

fn load_config(path: Option<&PathBuf>) -> GateResult<GateConfig> {
    match path {
        Some(path) => GateConfig::from_file(path),
        None => {
            debug!("no configuration file given; using defaults");
            Ok(GateConfig::default())
        }
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────

fn run_review(config: &GateConfig, request: &PathBuf, trail: bool) -> GateResult<()> {
    let text = read(request)?;
    let review: AdmissionReview = serde_json::from_str(&text).map_err(|e| GateError::Decode {
        reason: format!("invalid AdmissionReview in {}: {e}", request.display()),
    })?;

    let log = Arc::new(InMemoryDecisionLog::new(&config.webhook.name));
    let controller = AdmissionController::new(
        config,
        Box::new(ApprovalGate::new()),
        Box::new(Arc::clone(&log)),
    )?;
    debug!(path = controller.path(), "controller ready");

    let answer = controller.review(&review)?;
    println!("{}", to_pretty(&answer)?);

    if trail {
        println!("{}", to_pretty(&log.export()?)?);
    }
    Ok(())
}

fn run_decide(
    config: &GateConfig,
    old: Option<&PathBuf>,
    new: &PathBuf,
    requester: Requester,
) -> GateResult<()> {
    let decoder = TaskDecoder::new(config.webhook.disallow_unknown_fields)?;

    let old_text = old.map(read).transpose()?;
    let new_text = read(new)?;
    let old_task = decoder.decode(old_text.as_deref().map(str::as_bytes), ObjectRole::Old)?;
    let new_task = decoder.decode(Some(new_text.as_bytes()), ObjectRole::New)?;

    let decision = ApprovalGate::new().decide(
        &TaskState::from(&old_task),
        &TaskState::from(&new_task),
        &requester,
    );

    match decision.message() {
        None => println!("allowed"),
        Some(message) => println!("denied: {message}"),
    }
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn read(path: &PathBuf) -> GateResult<String> {
    fs::read_to_string(path).map_err(|e| GateError::Decode {
        reason: format!("cannot read {}: {e}", path.display()),
    })
}

fn to_pretty<T: serde::Serialize>(value: &T) -> GateResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| GateError::Decode {
        reason: format!("cannot render output: {e}"),
    })
}
