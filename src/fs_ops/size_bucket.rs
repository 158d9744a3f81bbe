//! Coarse size buckets for the optional size folder.
//!
//! Sizes are floored into the largest 1024-based unit that fits, then rounded down to
//! a bucket boundary: multiples of 100 from 100 up, of 10 from 10 to 99, and whole
//! units below 10. A file never changes bucket unless it crosses such a boundary.
//!
//! Below 10 units the bucket is the whole unit count (`2 MB`, `7 KB`), not a flat `1`.
//! The flat-`1` rule would put every 1-9 MB file in `1 MB`; the whole-unit rule is the one
//! that sends a 2,400,000-byte file to `2 MB`.

/// Label for files smaller than one kilobyte.
pub const UNDER_1_KB: &str = "under 1 KB";

const UNITS: [(u64, &str); 3] = [(1 << 30, "GB"), (1 << 20, "MB"), (1 << 10, "KB")];

/// Bucket label for `bytes`, e.g. `"2 MB"`, `"40 KB"`, `"300 GB"`.
pub fn size_bucket_label(bytes: u64) -> String {
    for (divisor, unit) in UNITS {
        if bytes >= divisor {
            let n = bytes / divisor;
            let bucket = if n >= 100 {
                n / 100 * 100
            } else if n >= 10 {
                n / 10 * 10
            } else {
                n
            };
            return format!("{bucket} {unit}");
        }
    }
    UNDER_1_KB.to_string()
}
