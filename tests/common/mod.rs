//! Common test utilities and helpers

#![allow(dead_code)]

use orderq::queue::Queue;
use std::io::Write;
use tempfile::NamedTempFile;

/// Remove everything, returning contents in removal order
pub fn drain<T: Send + 'static>(queue: &Queue<T>) -> Vec<T> {
    std::iter::from_fn(|| queue.remove().ok().map(|(content, _)| content)).collect()
}

/// Write `contents` to a temporary TOML file that lives as long as the handle
pub fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}
