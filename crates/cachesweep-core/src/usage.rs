//! Read-only disk usage measurement shared by analysis and deletion.

use std::fs;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::path::Path;

use serde::Serialize;
use walkdir::WalkDir;

/// Bytes and entry counts beneath a target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiskUsage {
    pub bytes: u64,
    pub files: u64,
    pub dirs: u64,
}

impl DiskUsage {
    pub fn is_empty(&self) -> bool {
        self.bytes == 0 && self.files == 0 && self.dirs == 0
    }
}

impl Add for DiskUsage {
    type Output = DiskUsage;

    fn add(self, rhs: Self) -> Self::Output {
        DiskUsage {
            bytes: self.bytes + rhs.bytes,
            files: self.files + rhs.files,
            dirs: self.dirs + rhs.dirs,
        }
    }
}

impl AddAssign for DiskUsage {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for DiskUsage {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(DiskUsage::default(), Add::add)
    }
}

/// Measure what deleting the contents of `path` would remove.
///
/// A missing path is empty. A file (or symlink) counts as one file of its
/// own size. For a directory, everything beneath it is counted but the
/// directory itself is not, since only contents are deleted. `path` itself
/// is followed when it links to a directory; symlinks below it are not.
/// Unreadable entries are skipped.
pub fn measure(path: &Path) -> DiskUsage {
    let Ok(metadata) = fs::metadata(path) else {
        return DiskUsage::default();
    };

    if !metadata.is_dir() {
        return DiskUsage {
            bytes: fs::symlink_metadata(path).map_or(0, |m| m.len()),
            files: 1,
            dirs: 0,
        };
    }

    WalkDir::new(path)
        .min_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
        .map(|entry| {
            if entry.file_type().is_dir() {
                DiskUsage {
                    bytes: 0,
                    files: 0,
                    dirs: 1,
                }
            } else {
                DiskUsage {
                    bytes: entry.metadata().map(|m| m.len()).unwrap_or(0),
                    files: 1,
                    dirs: 0,
                }
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_path_is_empty() {
        assert!(measure(Path::new("/no/such/path/for/usage")).is_empty());
    }

    #[test]
    fn test_single_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("IconCache.db");
        fs::write(&file, vec![0u8; 42]).unwrap();
        assert_eq!(
            measure(&file),
            DiskUsage {
                bytes: 42,
                files: 1,
                dirs: 0
            }
        );
    }

    #[test]
    fn test_nested_tree_excludes_root() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a"), vec![0u8; 100]).unwrap();
        fs::create_dir_all(temp.path().join("sub/deeper")).unwrap();
        fs::write(temp.path().join("sub/b"), vec![0u8; 200]).unwrap();
        fs::write(temp.path().join("sub/deeper/c"), vec![0u8; 300]).unwrap();

        assert_eq!(
            measure(temp.path()),
            DiskUsage {
                bytes: 600,
                files: 3,
                dirs: 2
            }
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_is_measured_through_the_link() {
        let temp = TempDir::new().unwrap();
        let real = temp.path().join("real");
        fs::create_dir(&real).unwrap();
        fs::write(real.join("cached.bin"), vec![0u8; 100]).unwrap();
        let link = temp.path().join(".cache");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        assert_eq!(
            measure(&link),
            DiskUsage {
                bytes: 100,
                files: 1,
                dirs: 0
            }
        );
    }

    #[test]
    fn test_sum_and_add() {
        let a = DiskUsage {
            bytes: 1,
            files: 1,
            dirs: 0,
        };
        let total: DiskUsage = vec![a, a, a].into_iter().sum();
        assert_eq!(total.bytes, 3);
        assert_eq!(total.files, 3);
    }
}
