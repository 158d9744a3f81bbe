//! Tracing initialization.
//! Console output goes to stderr (stdout carries the run's outcome lines and summary),
//! compact or JSON, with an optional non-blocking file layer in the same format.
//!
//! Behavior:
//! - Log level is driven by LogLevel (no RUST_LOG override here).
//! - File logging is refused if any ancestor of the log path is a symlink.
//! - The returned WorkerGuard must live until exit so buffered file logs get flushed.

use anyhow::Result;
use chrono::Local;
use date_sort::output as out;
use date_sort::platform::open_log_file_secure_append;
use date_sort::{LogLevel, default_log_path, path_has_symlink_ancestor};
use std::fmt as stdfmt;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt as tsfmt;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, Registry, registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Human-friendly timestamp formatter (DD/MM/YY HH:MM:SS)
struct LocalHumanTime;
impl FormatTime for LocalHumanTime {
    fn format_time(&self, w: &mut tsfmt::format::Writer<'_>) -> stdfmt::Result {
        write!(w, "{}", Local::now().format("%d/%m/%y %H:%M:%S"))
    }
}

fn to_level_filter(lvl: &LogLevel) -> LevelFilter {
    match lvl {
        LogLevel::Quiet => LevelFilter::ERROR,
        LogLevel::Normal => LevelFilter::INFO,
        LogLevel::Info => LevelFilter::DEBUG,
        LogLevel::Debug => LevelFilter::TRACE,
    }
}

fn fmt_layer<W>(writer: W, json: bool, ansi: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    if json {
        tsfmt::layer()
            .json()
            .with_timer(LocalHumanTime)
            .with_thread_names(true)
            .with_writer(writer)
            .boxed()
    } else {
        tsfmt::layer()
            .compact()
            .with_timer(LocalHumanTime)
            .with_thread_names(true)
            .with_ansi(ansi)
            .with_writer(writer)
            .boxed()
    }
}

/// Open the log file for appending behind a non-blocking writer, or explain on stderr why not.
fn open_file_writer(path: &Path) -> Option<(NonBlocking, WorkerGuard)> {
    match path_has_symlink_ancestor(path) {
        Ok(false) => {}
        Ok(true) => {
            eprintln!(
                "Refusing to enable file logging: ancestor of {} is a symlink.",
                path.display()
            );
            return None;
        }
        Err(e) => {
            eprintln!("Error checking log path {} for symlinks: {}", path.display(), e);
            return None;
        }
    }

    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    match open_log_file_secure_append(path) {
        Ok(file) => Some(tracing_appender::non_blocking(file)),
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", path.display(), e);
            None
        }
    }
}

/// Initialize tracing for the binary. Returns the file appender's guard when file
/// logging is active.
pub fn init_tracing(lvl: &LogLevel, log_file: Option<&Path>, json: bool) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::default().add_directive(to_level_filter(lvl).into());
    let ansi = atty::is(atty::Stream::Stderr);
    let mut layers: Vec<BoxedLayer> = vec![fmt_layer(io::stderr, json, ansi)];

    let mut guard = None;
    if let Some(path) = log_file {
        match open_file_writer(path) {
            Some((writer, g)) => {
                layers.push(fmt_layer(writer, json, false));
                guard = Some(g);
            }
            None => {
                out::print_warn(&format!(
                    "File logging to '{}' was not enabled; logs go to the console only.",
                    path.display()
                ));
                if let Some(def) = default_log_path()
                    && def != path
                {
                    out::print_info(&format!("The default log path may work instead: {}", def.display()));
                }
            }
        }
    }

    registry().with(layers).with(filter).try_init()?;
    Ok(guard)
}
