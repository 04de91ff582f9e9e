// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports normal, quiet (CI), and JSON output modes.

use serde::Serialize;
use std::time::Instant;

use crate::types::SystemId;
use crate::upgrade::{RedeployOutcome, UpgradePlan};

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Minimal output for CI (only final result)
    Quiet,
    /// JSON lines for scripting
    Json,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    start_time: Option<Instant>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            start_time: None,
        }
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Get elapsed time since timer started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    fn duration(&self) -> Option<f64> {
        self.start_time.map(|_| self.elapsed_secs())
    }

    /// Print a progress message (suppressed in quiet/json mode).
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    /// Print a warning (suppressed in quiet mode).
    pub fn warning(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => eprintln!("Warning: {message}"),
            OutputMode::Quiet => {}
            OutputMode::Json => emit_json_err(&JsonEvent {
                event: "warning",
                message,
                duration_secs: None,
            }),
        }
    }

    /// Print the outcome of one machine's redeploy.
    pub fn outcome(&self, system_id: &SystemId, outcome: &RedeployOutcome) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => match outcome {
                RedeployOutcome::NoUpdateNeeded { current } => {
                    println!("  ✓ {system_id}: no update needed ({current})");
                }
                RedeployOutcome::Redeploying { target } => {
                    println!("  ✓ {system_id}: redeploying with {target}");
                }
                RedeployOutcome::Failed { reason } => {
                    eprintln!("  ✗ {system_id}: {reason}");
                }
            },
            OutputMode::Json => emit_json(&MachineReport { system_id, outcome }),
        }
    }

    /// Print the dry-run plan for one machine.
    pub fn plan(&self, system_id: &SystemId, plan: &UpgradePlan) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                if plan.needs_update() {
                    println!(
                        "  → {system_id}: {} → {}",
                        plan.machine.current_image,
                        plan.target()
                    );
                } else {
                    println!(
                        "  ✓ {system_id}: up to date ({})",
                        plan.machine.current_image
                    );
                }
            }
            OutputMode::Json => emit_json(&PlanReport {
                system_id,
                status: plan.machine.status.as_str(),
                current: &plan.machine.current_image,
                latest: &plan.latest_image,
                update_available: plan.needs_update(),
            }),
        }
    }

    /// Print a success message with optional timing.
    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => {
                let elapsed = self.elapsed_secs();
                if elapsed > 0.0 {
                    println!("{message} ({:.1}s)", elapsed);
                } else {
                    println!("{message}");
                }
            }
            OutputMode::Quiet => {
                println!("{message}");
            }
            OutputMode::Json => emit_json(&JsonEvent {
                event: "success",
                message,
                duration_secs: self.duration(),
            }),
        }
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                eprintln!("Error: {message}");
            }
            OutputMode::Json => emit_json_err(&JsonEvent {
                event: "error",
                message,
                duration_secs: self.duration(),
            }),
        }
    }
}

fn emit_json<T: Serialize>(value: &T) {
    if let Ok(json) = serde_json::to_string(value) {
        println!("{json}");
    }
}

fn emit_json_err<T: Serialize>(value: &T) {
    if let Ok(json) = serde_json::to_string(value) {
        eprintln!("{json}");
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
}

/// One line of batch output: `{"system_id": ..., "status": ..., ...}`.
#[derive(Serialize)]
pub struct MachineReport<'a> {
    pub system_id: &'a SystemId,
    #[serde(flatten)]
    pub outcome: &'a RedeployOutcome,
}

#[derive(Serialize)]
struct PlanReport<'a> {
    system_id: &'a SystemId,
    status: &'a str,
    current: &'a str,
    latest: &'a str,
    update_available: bool,
}
