//! Shared helpers for the integration tests.
#![allow(dead_code)]

use rand::{thread_rng, RngCore};
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write `content` to `path`, creating parent directories as needed.
pub fn write_file(path: &Path, content: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    File::create(path).unwrap().write_all(content).unwrap();
}

pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    thread_rng().fill_bytes(&mut buf);
    buf
}

/// Byte-exact file comparison.
pub fn files_equal(a: &Path, b: &Path) -> bool {
    fs::read(a).unwrap() == fs::read(b).unwrap()
}

/// Assert two directory trees hold the same regular files with the same
/// contents at the same relative paths. Empty directories are ignored.
pub fn assert_dirs_equal(a: &Path, b: &Path) {
    let list = |root: &Path| -> BTreeSet<PathBuf> {
        walkdir::WalkDir::new(root)
            .into_iter()
            .map(|e| e.unwrap())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.path().strip_prefix(root).unwrap().to_path_buf())
            .collect()
    };
    let la = list(a);
    let lb = list(b);
    assert_eq!(la, lb, "file sets differ between {:?} and {:?}", a, b);
    for rel in la {
        assert_eq!(
            fs::read(a.join(&rel)).unwrap(),
            fs::read(b.join(&rel)).unwrap(),
            "content mismatch at {:?}",
            rel
        );
    }
}
