//! Shared test fixtures for the tmux and tool test modules.
//!
//! Process-backed tests all need the same thing, an executable stand-in for
//! the tmux binary with scripted behavior. Keeping the fixture here prevents
//! each test module from rebuilding ad-hoc temp dir and script code.

use std::fs;
use std::io::Write as _;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary directory fixture with best-effort cleanup.
///
/// This helper is intentionally simple and std-only so unit tests can use it
/// without introducing new dependencies.
#[derive(Debug)]
pub struct TestTempDir {
    path: PathBuf,
}

impl TestTempDir {
    /// Create a unique temporary directory with a readable prefix.
    pub fn new(prefix: &str) -> Self {
        let suffix = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = std::env::temp_dir().join(format!("muxpal-{prefix}-{millis}-{suffix}"));
        fs::create_dir_all(&dir).expect("failed to create temporary fixture directory");
        Self { path: dir }
    }

    /// Root directory path for this fixture.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build a child path under the fixture root.
    pub fn child(&self, relative: &str) -> PathBuf {
        self.path.join(relative)
    }

    /// Write UTF-8 text to a child path, creating parent directories as needed.
    pub fn write_text(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.child(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directories for fixture");
        }
        fs::write(&path, content).expect("failed to write fixture file");
        path
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Write an executable shell script named `tmux` into the fixture directory
/// and return its path as a string suitable for client construction.
///
/// The body runs under `/bin/sh` with the original argv, so scripts can echo
/// `"$@"` to observe exactly what would have been passed to real tmux.
pub fn fake_tmux(dir: &TestTempDir, body: &str) -> String {
    let path = dir.child("tmux");
    let mut file = fs::File::create(&path).expect("failed to create fake tmux script");
    writeln!(file, "#!/bin/sh").expect("failed to write script shebang");
    file.write_all(body.as_bytes())
        .expect("failed to write script body");
    drop(file);
    let mut perms = fs::metadata(&path)
        .expect("failed to stat fake tmux script")
        .permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("failed to mark fake tmux script executable");
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_dir_fixture_writes_and_resolves_paths() {
        let fixture = TestTempDir::new("fixture");
        let file = fixture.write_text("nested/file.txt", "hello");
        assert_eq!(fs::read_to_string(file).unwrap(), "hello");
    }

    #[test]
    fn fake_tmux_script_is_executable() {
        let fixture = TestTempDir::new("script");
        let bin = fake_tmux(&fixture, "exit 0\n");
        let mode = fs::metadata(&bin).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }
}
