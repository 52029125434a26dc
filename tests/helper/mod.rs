//! Shared test utilities

mod clock;

#[allow(unused_imports)]
pub use clock::FixedClock;

use std::path::PathBuf;

use tempfile::TempDir;

/// Contents of the pre-seeded versions list used by read-side tests
pub const SEEDED_CONTENTS: &str = "gem1 1.1,1.2\ngem2 2.1,2.1-jruby\n";

/// Create a temp dir holding a versions list with `contents`
#[allow(dead_code)]
pub fn create_versions_list(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("versions.list");
    std::fs::write(&path, contents).unwrap();
    (temp_dir, path)
}
