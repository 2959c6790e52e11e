// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `parlor doctor` command implementation.
//!
//! Runs diagnostic checks against the Parlor environment to identify
//! configuration issues before they show up at serve time.

use std::io::IsTerminal;
use std::time::{Duration, Instant};

use parlor_config::model::{ParlorConfig, ProviderMode};
use parlor_core::ParlorError;

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

/// Run the `parlor doctor` command.
///
/// With `--plain`, disables colored output.
pub async fn run_doctor(config: &ParlorConfig, plain: bool) -> Result<(), ParlorError> {
    let use_color = !plain && std::io::stdout().is_terminal();

    let results = vec![
        check_engine_config(config),
        check_database(&config.storage.database_path),
        check_provider_credentials(config),
        check_faq(config),
    ];

    println!();
    println!("  parlor doctor");
    println!("  {}", "-".repeat(50));

    let mut fail_count = 0;
    let mut warn_count = 0;

    for result in &results {
        let duration_ms = result.duration.as_millis();
        let line = format!(
            "  {} {:<24} {} ({duration_ms}ms)",
            symbol(&result.status, use_color),
            result.name,
            result.message
        );
        println!("{line}");
        match result.status {
            CheckStatus::Fail => fail_count += 1,
            CheckStatus::Warn => warn_count += 1,
            CheckStatus::Pass => {}
        }
    }

    println!("  {}", "-".repeat(50));
    println!(
        "  {} checks, {} warnings, {} failures",
        results.len(),
        warn_count,
        fail_count
    );
    println!();

    if fail_count > 0 {
        return Err(ParlorError::Internal(format!(
            "{fail_count} diagnostic check(s) failed"
        )));
    }
    Ok(())
}

fn symbol(status: &CheckStatus, use_color: bool) -> String {
    use colored::Colorize;
    match (status, use_color) {
        (CheckStatus::Pass, true) => "ok".green().to_string(),
        (CheckStatus::Warn, true) => "warn".yellow().to_string(),
        (CheckStatus::Fail, true) => "FAIL".red().to_string(),
        (CheckStatus::Pass, false) => "ok".to_string(),
        (CheckStatus::Warn, false) => "warn".to_string(),
        (CheckStatus::Fail, false) => "FAIL".to_string(),
    }
}

fn check_engine_config(config: &ParlorConfig) -> CheckResult {
    let start = Instant::now();
    // load_and_validate already ran; report the effective knobs.
    CheckResult {
        name: "engine config".to_string(),
        status: CheckStatus::Pass,
        message: format!(
            "threshold={}, history={}, loop={}",
            config.engine.confidence_threshold,
            config.engine.max_history_turns,
            config.engine.loop_repeat_threshold
        ),
        duration: start.elapsed(),
    }
}

fn check_database(database_path: &str) -> CheckResult {
    let start = Instant::now();
    let (status, message) = match rusqlite::Connection::open(database_path) {
        Ok(conn) => match conn.query_row("PRAGMA integrity_check", [], |row| {
            row.get::<_, String>(0)
        }) {
            Ok(result) if result == "ok" => (CheckStatus::Pass, format!("{database_path} ok")),
            Ok(result) => (CheckStatus::Fail, format!("integrity check: {result}")),
            Err(e) => (CheckStatus::Fail, format!("integrity check failed: {e}")),
        },
        Err(e) => (CheckStatus::Fail, format!("cannot open {database_path}: {e}")),
    };
    CheckResult {
        name: "database".to_string(),
        status,
        message,
        duration: start.elapsed(),
    }
}

fn check_provider_credentials(config: &ParlorConfig) -> CheckResult {
    let start = Instant::now();
    let (status, message) = match config.provider.mode {
        ProviderMode::Mock => (
            CheckStatus::Pass,
            "mock mode, no credentials needed".to_string(),
        ),
        ProviderMode::Gemini => match &config.gemini.api_key {
            Some(_) => (CheckStatus::Pass, "gemini api key present".to_string()),
            None => (
                CheckStatus::Warn,
                "gemini mode configured but gemini.api_key is not set".to_string(),
            ),
        },
        ProviderMode::Openai => match &config.openai.api_key {
            Some(_) => (CheckStatus::Pass, "openai api key present".to_string()),
            None => (
                CheckStatus::Warn,
                "openai mode configured but openai.api_key is not set".to_string(),
            ),
        },
    };
    CheckResult {
        name: "provider".to_string(),
        status,
        message,
        duration: start.elapsed(),
    }
}

fn check_faq(config: &ParlorConfig) -> CheckResult {
    let start = Instant::now();
    let inline = config.faq.len();
    let (status, message) = match config.engine.faq_file.as_deref() {
        Some(path) if !std::path::Path::new(path).exists() => (
            CheckStatus::Warn,
            format!("{inline} inline entries; faq_file {path} does not exist"),
        ),
        Some(path) => (
            CheckStatus::Pass,
            format!("{inline} inline entries + file {path}"),
        ),
        None => (CheckStatus::Pass, format!("{inline} inline entries")),
    };
    CheckResult {
        name: "faq".to_string(),
        status,
        message,
        duration: start.elapsed(),
    }
}
