//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the Ctrl-C handler, validates the
//! root, collects the batch and drives a run on the worker thread while printing its events.

use anyhow::{Context, Result, anyhow};
use std::sync::{Arc, Mutex};
use tracing::{debug, error};

use date_sort::cli::Args;
use date_sort::config::{create_template_config, load_config};
use date_sort::output as out;
use date_sort::{CONFIG_ENV, RunEvent, ShutdownFlag, collect_files, default_config_path, spawn_run};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handled before logging init: these only print or write the config file.
    if args.print_config {
        print_config_location();
        return Ok(());
    }
    if args.init_config {
        let path = default_config_path().ok_or_else(|| anyhow!("could not determine a config path"))?;
        create_template_config(&path)?;
        out::print_success(&format!("A template date_sort config was written to: {}", path.display()));
        out::print_info(&format!("Edit it, or point {CONFIG_ENV} at another file."));
        return Ok(());
    }

    // Defaults < XML < CLI flags.
    let mut cfg = load_config()?;
    args.apply_overrides(&mut cfg);
    if cfg.policy.root.as_os_str().is_empty() {
        cfg.policy.root = std::env::current_dir().context("determine current directory")?;
    }

    let guard_opt = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    // Guard needs to be dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    let stop = ShutdownFlag::new();
    {
        let guard_slot = Arc::clone(&guard_slot);
        let stop = stop.clone();
        ctrlc::set_handler(move || {
            stop.request();
            out::print_warn("Received interrupt; stopping after the current file...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
        })
        .context("install Ctrl-C handler")?;
    }

    debug!(?args, policy = ?cfg.policy, "starting date_sort");

    let result = (|| -> Result<()> {
        let policy = cfg.policy.clone();
        let files = collect_files(&policy.root, policy.recurse).inspect_err(|e| {
            error!(code = e.code(), error = %e, "cannot collect files");
        })?;

        if args.list {
            for f in &files {
                out::print_user(&f.display().to_string());
            }
            return Ok(());
        }

        let handle = spawn_run(policy, files, stop.clone()).context("start worker thread")?;
        for event in handle.events().iter() {
            match console_line(event) {
                Some(ConsoleLine::Run(line)) => out::print_run_line(&line),
                Some(ConsoleLine::Success(line)) => out::print_success(&line),
                None => {}
            }
        }
        handle.join()??;
        Ok(())
    })();

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result
}

#[derive(Debug, PartialEq, Eq)]
enum ConsoleLine {
    Run(String),
    Success(String),
}

/// What a run event prints on the console, if anything.
fn console_line(event: RunEvent) -> Option<ConsoleLine> {
    match event {
        RunEvent::Progress { current, total } => {
            debug!(current, total, "progress");
            None
        }
        RunEvent::Log(line) => Some(ConsoleLine::Run(line)),
        RunEvent::Finished(report) => Some(ConsoleLine::Success(report.to_string())),
        // The same error comes back from `join` and is reported once, by `main`.
        RunEvent::Failed(msg) => {
            debug!(%msg, "run failed");
            None
        }
    }
}

fn print_config_location() {
    if let Some(cfg_env) = std::env::var_os(CONFIG_ENV) {
        out::print_info(&format!(
            "Using {CONFIG_ENV} (explicit):\n  {}\n",
            std::path::Path::new(&cfg_env).display()
        ));
        out::print_info(&format!("To override, unset {CONFIG_ENV} or set it to another file."));
        return;
    }
    match default_config_path() {
        Some(p) => {
            out::print_info(&format!("Default date_sort config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file already exists at that location.");
            } else {
                out::print_info("No config file exists there yet. Run with --init-config to create a template.");
            }
        }
        None => out::print_error("Could not determine a default config path."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use date_sort::RunReport;

    #[test]
    fn failed_event_is_left_to_the_returned_error() {
        assert_eq!(console_line(RunEvent::Failed("Interrupted after 1 of 2 files".into())), None);
        assert_eq!(console_line(RunEvent::Progress { current: 1, total: 2 }), None);
    }

    #[test]
    fn log_and_report_lines_are_printed() {
        assert_eq!(
            console_line(RunEvent::Log("Moved: a.txt -> 2024_03_05/a.txt".into())),
            Some(ConsoleLine::Run("Moved: a.txt -> 2024_03_05/a.txt".into()))
        );
        let report = RunReport::new(0, false);
        assert_eq!(
            console_line(RunEvent::Finished(report.clone())),
            Some(ConsoleLine::Success(report.to_string()))
        );
    }
}
