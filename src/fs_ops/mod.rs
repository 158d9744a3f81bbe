//! Filesystem operations: modularized.
//!
//! Classification (timestamp, size bucket), destination planning, collision naming,
//! the single-file mover with its cross-device fallback, batch collection and reaping.

mod atomic;
mod collect;
mod copy;
mod duplicate;
mod file_move;
mod helpers;
mod io_copy;
mod meta;
mod planner;
mod reaper;
mod size_bucket;
mod space;
mod timestamp;
mod util;

pub use collect::collect_files;
pub use duplicate::{MAX_SUFFIX_ATTEMPTS, NameResolution, resolve_free_name, resolve_free_name_avoiding};
pub use file_move::{MoveFileError, MoveMethod, move_file};
pub use helpers::{io_error_with_help, io_error_with_help_io};
pub use planner::{NO_EXTENSION, date_folder_name, ensure_target_dir, extension_folder_name, plan_target_dir};
pub use reaper::remove_empty_dirs;
pub use size_bucket::{UNDER_1_KB, size_bucket_label};
pub use timestamp::{classification_time, local_time, timestamp_from_metadata};
pub use util::{path_occupied, same_file};
