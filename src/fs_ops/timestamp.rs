//! Classification timestamp.
//! Creation time when asked for and the platform/filesystem reports it, otherwise the
//! modification time. Missing creation time is not an error; a timestamp chrono cannot
//! represent is.

use chrono::{DateTime, Local, Utc};
use std::fs::Metadata;
use std::io;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::trace;

/// Pick the timestamp used for classification from already-fetched metadata.
///
/// Only fails if even the modification time is unavailable.
pub fn timestamp_from_metadata(meta: &Metadata, prefer_creation: bool) -> io::Result<SystemTime> {
    if prefer_creation {
        match meta.created() {
            Ok(t) => return Ok(t),
            Err(e) => trace!(error = %e, "creation time unavailable; using modification time"),
        }
    }
    meta.modified()
}

/// Local date-time for `meta`, which is what folder names are derived from.
pub fn classification_time(meta: &Metadata, prefer_creation: bool) -> io::Result<DateTime<Local>> {
    local_time(timestamp_from_metadata(meta, prefer_creation)?)
}

/// Checked `SystemTime` -> local time. Filesystems can store times far outside chrono's range.
pub fn local_time(t: SystemTime) -> io::Result<DateTime<Local>> {
    let (secs, nanos) = match t.duration_since(UNIX_EPOCH) {
        Ok(d) => (i64::try_from(d.as_secs()).ok(), d.subsec_nanos()),
        Err(e) => {
            // Before the epoch: whole seconds go down by one when there is a fraction.
            let d = e.duration();
            let secs = i64::try_from(d.as_secs()).ok().and_then(i64::checked_neg);
            match d.subsec_nanos() {
                0 => (secs, 0),
                n => (secs.and_then(|s| s.checked_sub(1)), 1_000_000_000 - n),
            }
        }
    };
    secs.and_then(|s| DateTime::<Utc>::from_timestamp(s, nanos))
        .map(|utc| utc.with_timezone(&Local))
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, format!("timestamp out of range: {t:?}")))
}
