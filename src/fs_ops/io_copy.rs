//! Streaming copy used by the cross-device fallback.
//!
//! - Destination is created with `create_new(true)`: an existing file is never clobbered.
//! - Buffered I/O with 1 MiB buffers to reduce syscall count.
//! - The destination is fsynced before returning so a later rename publishes complete data.
//!
//! Snapshot semantics: the source is read once to EOF. Callers compare the returned byte
//! count against the source length to detect concurrent truncation or growth.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

const BUF_SIZE: usize = 1024 * 1024;

/// Copy `src` -> `dst` (new file) and fsync it. Returns bytes written.
pub(super) fn copy_streaming(src: &Path, dst: &Path) -> io::Result<u64> {
    let src_f = File::open(src)?;
    let dst_f = OpenOptions::new().write(true).create_new(true).open(dst)?;

    let mut reader = BufReader::with_capacity(BUF_SIZE, src_f);
    let mut writer = BufWriter::with_capacity(BUF_SIZE, dst_f);
    let bytes = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(bytes)
}
