//! Core library for `date_sort`.
//!
//! Sorts the files under a root directory into date-named folders
//! (`2024_03_05/` or `05_03_2024/`), optionally nested by extension and size bucket.
//! Moves never overwrite: collisions get a `_001`, `_002`, ... suffix and a file that
//! already sits at its destination is left alone, so a run can be repeated safely.
//!
//! Typical use:
//! ```no_run
//! use date_sort::{PolicyConfig, RunEvent, collect_files, run_move};
//!
//! let policy = PolicyConfig::new("/data/camera");
//! let files = collect_files(&policy.root, policy.recurse)?;
//! let report = run_move(&policy, &files, &mut |event: RunEvent| {
//!     if let RunEvent::Log(line) = event {
//!         println!("{line}");
//!     }
//! })?;
//! println!("{report}");
//! # Ok::<(), date_sort::DateSortError>(())
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod platform;
pub mod run;
pub mod shutdown;

pub use config::{
    CONFIG_ENV, Config, DateFormat, LogLevel, PolicyConfig, default_config_path, default_log_path,
    path_has_symlink_ancestor,
};
pub use errors::DateSortError;
pub use fs_ops::{collect_files, remove_empty_dirs, size_bucket_label};
pub use run::{
    EventSink, FileOutcome, FileRecord, RunEvent, RunHandle, RunReport, run_move, run_move_until, spawn_run,
};
pub use shutdown::ShutdownFlag;
