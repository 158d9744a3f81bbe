//! Collision resolution for destination names.
//!
//! The original name is tried first, then `stem_001.ext`, `stem_002.ext`, ... up to
//! `MAX_SUFFIX_ATTEMPTS`. Every candidate is checked against the source first (a file that
//! already sits at its destination is not renamed), then for occupancy.
//!
//! This only reflects the filesystem at the time of the call. The mover still uses a
//! no-replace publish, and callers re-resolve when a candidate gets taken in between.

use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};
use tracing::trace;

use super::util::{path_occupied, same_file};

/// Suffixed attempts after the original name (`_001` through `_1000`).
pub const MAX_SUFFIX_ATTEMPTS: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameResolution {
    /// Nothing sits at this path.
    Free(PathBuf),
    /// The candidate is the source file itself.
    SameFile,
    /// Every candidate up to the cap is occupied.
    Exhausted,
}

/// Pick a free name for `src` inside `dir`.
pub fn resolve_free_name(dir: &Path, src: &Path) -> io::Result<NameResolution> {
    resolve_free_name_avoiding(dir, src, &HashSet::new())
}

/// Like [`resolve_free_name`], but paths in `claimed` count as occupied even if nothing
/// is on disk there yet (names handed out earlier in a dry run).
pub fn resolve_free_name_avoiding(dir: &Path, src: &Path, claimed: &HashSet<PathBuf>) -> io::Result<NameResolution> {
    let name = src
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "source path has no file name"))?;
    let (stem, ext) = split_name(name);

    for n in 0..=MAX_SUFFIX_ATTEMPTS {
        let candidate = if n == 0 {
            dir.join(name)
        } else {
            dir.join(suffixed_name(&stem, ext.as_deref(), n))
        };
        if same_file(src, &candidate) {
            return Ok(NameResolution::SameFile);
        }
        if !claimed.contains(&candidate) && !path_occupied(&candidate)? {
            if n > 0 {
                trace!(dir = %dir.display(), name = ?candidate.file_name(), attempt = n, "collision: picked suffixed name");
            }
            return Ok(NameResolution::Free(candidate));
        }
    }
    Ok(NameResolution::Exhausted)
}

/// Split into stem and extension the way `Path` does, so `.bashrc` has no extension
/// and `archive.tar.gz` has extension `gz`.
fn split_name(name: &OsStr) -> (OsString, Option<OsString>) {
    let p = Path::new(name);
    let stem = p
        .file_stem()
        .map(OsStr::to_os_string)
        .unwrap_or_else(|| name.to_os_string());
    let ext = p.extension().map(OsStr::to_os_string);
    (stem, ext)
}

/// `stem_NNN[.ext]`, zero-padded to three digits.
fn suffixed_name(stem: &OsStr, ext: Option<&OsStr>, n: u32) -> OsString {
    let mut out = OsString::with_capacity(stem.len() + 8);
    out.push(stem);
    out.push(format!("_{n:03}"));
    if let Some(e) = ext {
        out.push(".");
        out.push(e);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn free_name(res: NameResolution) -> String {
        match res {
            NameResolution::Free(p) => p.file_name().unwrap().to_string_lossy().into_owned(),
            other => panic!("expected a free name, got {other:?}"),
        }
    }

    #[test]
    fn original_name_when_free() {
        let td = tempdir().unwrap();
        let src = td.path().join("photo.jpg");
        fs::write(&src, b"x").unwrap();
        let dir = td.path().join("2024_03_05");
        fs::create_dir(&dir).unwrap();
        assert_eq!(free_name(resolve_free_name(&dir, &src).unwrap()), "photo.jpg");
    }

    #[test]
    fn first_collision_gets_001() {
        let td = tempdir().unwrap();
        let src = td.path().join("photo.jpg");
        fs::write(&src, b"new").unwrap();
        let dir = td.path().join("2024_03_05");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("photo.jpg"), b"old").unwrap();
        assert_eq!(free_name(resolve_free_name(&dir, &src).unwrap()), "photo_001.jpg");

        fs::write(dir.join("photo_001.jpg"), b"older").unwrap();
        assert_eq!(free_name(resolve_free_name(&dir, &src).unwrap()), "photo_002.jpg");
    }

    #[test]
    fn claimed_names_count_as_occupied() {
        let td = tempdir().unwrap();
        let src = td.path().join("a.txt");
        fs::write(&src, b"x").unwrap();
        let dir = td.path().join("2024_03_05");
        let claimed: HashSet<PathBuf> = [dir.join("a.txt")].into_iter().collect();
        // The directory does not exist yet; only the claim makes `a.txt` taken.
        assert_eq!(
            free_name(resolve_free_name_avoiding(&dir, &src, &claimed).unwrap()),
            "a_001.txt"
        );
    }

    #[test]
    fn suffix_goes_before_last_extension_only() {
        assert_eq!(suffixed_name(OsStr::new("archive.tar"), Some(OsStr::new("gz")), 7), "archive.tar_007.gz");
        assert_eq!(suffixed_name(OsStr::new(".bashrc"), None, 1), ".bashrc_001");
        assert_eq!(suffixed_name(OsStr::new("x"), None, 1000), "x_1000");
    }

    #[test]
    fn dotfile_collision() {
        let td = tempdir().unwrap();
        let src = td.path().join(".env");
        fs::write(&src, b"a").unwrap();
        let dir = td.path().join("out");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join(".env"), b"b").unwrap();
        assert_eq!(free_name(resolve_free_name(&dir, &src).unwrap()), ".env_001");
    }

    #[test]
    fn source_already_in_place_is_same_file() {
        let td = tempdir().unwrap();
        let dir = td.path().join("2024_03_05");
        fs::create_dir(&dir).unwrap();
        let src = dir.join("a.txt");
        fs::write(&src, b"x").unwrap();
        assert_eq!(resolve_free_name(&dir, &src).unwrap(), NameResolution::SameFile);
    }

    #[test]
    fn exhausted_after_cap() {
        let td = tempdir().unwrap();
        let src = td.path().join("f.txt");
        fs::write(&src, b"x").unwrap();
        let dir = td.path().join("crowded");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("f.txt"), b"").unwrap();
        for n in 1..=MAX_SUFFIX_ATTEMPTS {
            fs::write(dir.join(format!("f_{n:03}.txt")), b"").unwrap();
        }
        assert_eq!(resolve_free_name(&dir, &src).unwrap(), NameResolution::Exhausted);

        fs::remove_file(dir.join("f_1000.txt")).unwrap();
        assert_eq!(free_name(resolve_free_name(&dir, &src).unwrap()), "f_1000.txt");
    }
}
