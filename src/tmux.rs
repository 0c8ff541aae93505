//! Thin client for the tmux binary.
//!
//! Every operation is one fresh process invocation against live tmux state;
//! nothing is cached between calls. Failures are reported through
//! [`TmuxError`] so callers can tell a missing binary from a non-zero exit
//! from undecodable output, while the tool layer flattens them into the
//! in-band messages callers see.

use crate::error::TmuxError;
use serde::Serialize;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

/// Format string handed to `list-sessions -F`: name, id, window count.
const SESSION_FORMAT: &str = "#{session_name}:#{session_id}:#{session_windows}";

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// One tmux session as reported by a single listing call.
///
/// A snapshot, not a tracked entity: identity is `name`, all fields stay
/// strings exactly as tmux printed them, and no record outlives the call
/// that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub name: String,
    pub id: String,
    pub windows: String,
}

/// Optional line-range parameters for a buffer capture. Used only to compute
/// capture flags, never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BufferRange {
    pub start_line: Option<i64>,
    pub num_lines: Option<i64>,
}

impl BufferRange {
    /// Range flags for `capture-pane`:
    /// - both set: `-S <start> -E <start + num - 1>` (inclusive end)
    /// - only `num_lines`: `-S -<num>`, the last `num` lines of history
    /// - only `start_line`: `-S <start>`, through the end of the buffer
    /// - neither: no flags, the default visible pane content
    pub fn capture_flags(&self) -> Vec<String> {
        let mut flags = Vec::new();
        if let Some(start) = self.start_line {
            flags.push("-S".into());
            flags.push(start.to_string());
            if let Some(num) = self.num_lines {
                let end = start.saturating_add(num).saturating_sub(1);
                flags.push("-E".into());
                flags.push(end.to_string());
            }
        } else if let Some(num) = self.num_lines {
            flags.push("-S".into());
            flags.push(format!("-{num}"));
        }
        flags
    }
}

// ---------------------------------------------------------------------------
// Listing output parsing
// ---------------------------------------------------------------------------

/// Parse `list-sessions -F` output: one record per non-empty line with at
/// least three colon-delimited fields, in output order. Malformed lines are
/// dropped without aborting the rest of the parse.
pub fn parse_sessions(raw: &str) -> Vec<Session> {
    raw.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(parse_session_line)
        .collect()
}

fn parse_session_line(line: &str) -> Option<Session> {
    // Split from the right: ids are `$N` and window counts are decimal, so
    // the two rightmost fields can never contain the delimiter. Any extra
    // colons therefore belong to the session name and stay in it.
    let mut fields = line.rsplitn(3, ':');
    let windows = fields.next()?;
    let id = fields.next()?;
    let name = fields.next()?;
    Some(Session {
        name: name.to_string(),
        id: id.to_string(),
        windows: windows.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Handle on the tmux binary. Cheap to clone; holds only the program name.
#[derive(Debug, Clone)]
pub struct TmuxClient {
    bin: String,
}

impl TmuxClient {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }

    /// List the sessions currently known to the tmux server.
    ///
    /// Total: a non-zero exit (tmux not running, or no sessions) yields an
    /// empty list; any other fault is logged to the diagnostic stream and
    /// also yields an empty list. Callers never see an error from this.
    pub async fn list_sessions(&self) -> Vec<Session> {
        match self.run(&list_sessions_args()).await {
            Ok(stdout) => parse_sessions(&stdout),
            Err(TmuxError::CommandFailed { .. }) => Vec::new(),
            Err(err) => {
                warn!("error listing tmux sessions: {err}");
                Vec::new()
            }
        }
    }

    /// True when a fresh listing contains a session named exactly `name`.
    pub async fn session_exists(&self, name: &str) -> bool {
        self.list_sessions().await.iter().any(|s| s.name == name)
    }

    /// Capture pane contents for `session`, ranged per `range`. Returns the
    /// captured text verbatim, trailing newline included.
    pub async fn capture_pane(
        &self,
        session: &str,
        range: BufferRange,
    ) -> Result<String, TmuxError> {
        self.run(&capture_pane_args(session, range)).await
    }

    /// Type `command` into `session` and press Enter.
    ///
    /// The text is forwarded verbatim, with no quoting or sanitization:
    /// injecting keystrokes into a live terminal is the feature, and the
    /// caller is trusted exactly like an interactive user at that terminal.
    /// Success means the keystrokes were delivered, nothing more.
    pub async fn send_keys(&self, session: &str, command: &str) -> Result<(), TmuxError> {
        self.run(&send_keys_args(session, command)).await?;
        Ok(())
    }

    /// Spawn one tmux invocation and collect its stdout.
    ///
    /// Stdin is closed (this process's own stdin carries the protocol), and
    /// the child is killed if the owning future is dropped.
    async fn run(&self, args: &[String]) -> Result<String, TmuxError> {
        debug!("running: {} {}", self.bin, args.join(" "));
        let mut cmd = Command::new(&self.bin);
        cmd.kill_on_drop(true);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let output = cmd.output().await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            debug!(
                "tmux {} failed with status {:?}: {}",
                args.first().map(String::as_str).unwrap_or(""),
                output.status.code(),
                stderr.trim()
            );
            return Err(TmuxError::CommandFailed {
                code: output.status.code(),
                stderr,
            });
        }
        Ok(String::from_utf8(output.stdout)?)
    }
}

fn list_sessions_args() -> Vec<String> {
    vec!["list-sessions".into(), "-F".into(), SESSION_FORMAT.into()]
}

fn capture_pane_args(session: &str, range: BufferRange) -> Vec<String> {
    let mut args: Vec<String> = vec!["capture-pane".into(), "-p".into()];
    args.extend(range.capture_flags());
    args.push("-t".into());
    args.push(session.into());
    args
}

fn send_keys_args(session: &str, command: &str) -> Vec<String> {
    vec![
        "send-keys".into(),
        "-t".into(),
        session.into(),
        command.into(),
        "Enter".into(),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::{fake_tmux, TestTempDir};

    #[test]
    fn parse_sessions_yields_one_record_per_line_in_order() {
        let raw = "work:$1:2\nmain:$0:1\nscratch:$7:4\n";
        let sessions = parse_sessions(raw);
        assert_eq!(sessions.len(), 3);
        assert_eq!(sessions[0].name, "work");
        assert_eq!(sessions[0].id, "$1");
        assert_eq!(sessions[0].windows, "2");
        assert_eq!(sessions[1].name, "main");
        assert_eq!(sessions[2].name, "scratch");
    }

    #[test]
    fn parse_sessions_drops_malformed_lines() {
        let raw = "work:$1:2\nbogus line\nonly:two\nmain:$0:1\n";
        let sessions = parse_sessions(raw);
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].name, "work");
        assert_eq!(sessions[1].name, "main");
    }

    #[test]
    fn parse_sessions_skips_blank_lines() {
        let raw = "\nwork:$1:2\n\n   \nmain:$0:1\n\n";
        let sessions = parse_sessions(raw);
        assert_eq!(sessions.len(), 2);
    }

    #[test]
    fn parse_sessions_keeps_delimiter_inside_names() {
        let raw = "ci:build:$3:12\n";
        let sessions = parse_sessions(raw);
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].name, "ci:build");
        assert_eq!(sessions[0].id, "$3");
        assert_eq!(sessions[0].windows, "12");
    }

    #[test]
    fn parse_sessions_empty_input() {
        assert!(parse_sessions("").is_empty());
    }

    #[test]
    fn capture_flags_with_start_and_count() {
        let range = BufferRange {
            start_line: Some(5),
            num_lines: Some(10),
        };
        assert_eq!(range.capture_flags(), vec!["-S", "5", "-E", "14"]);
    }

    #[test]
    fn capture_flags_with_count_only() {
        let range = BufferRange {
            start_line: None,
            num_lines: Some(20),
        };
        assert_eq!(range.capture_flags(), vec!["-S", "-20"]);
    }

    #[test]
    fn capture_flags_with_start_only() {
        let range = BufferRange {
            start_line: Some(5),
            num_lines: None,
        };
        assert_eq!(range.capture_flags(), vec!["-S", "5"]);
    }

    #[test]
    fn capture_flags_default_is_empty() {
        assert!(BufferRange::default().capture_flags().is_empty());
    }

    #[test]
    fn list_sessions_args_shape() {
        assert_eq!(
            list_sessions_args(),
            vec![
                "list-sessions",
                "-F",
                "#{session_name}:#{session_id}:#{session_windows}"
            ]
        );
    }

    #[test]
    fn capture_pane_args_shape() {
        let range = BufferRange {
            start_line: Some(5),
            num_lines: Some(10),
        };
        assert_eq!(
            capture_pane_args("work", range),
            vec!["capture-pane", "-p", "-S", "5", "-E", "14", "-t", "work"]
        );
        assert_eq!(
            capture_pane_args("work", BufferRange::default()),
            vec!["capture-pane", "-p", "-t", "work"]
        );
    }

    #[test]
    fn send_keys_args_command_then_enter() {
        assert_eq!(
            send_keys_args("work", "echo hi"),
            vec!["send-keys", "-t", "work", "echo hi", "Enter"]
        );
    }

    #[test]
    fn session_serializes_with_wire_field_names() {
        let session = Session {
            name: "work".into(),
            id: "$1".into(),
            windows: "2".into(),
        };
        let json = serde_json::to_value(&session).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"name": "work", "id": "$1", "windows": "2"})
        );
    }

    #[tokio::test]
    async fn list_sessions_parses_fake_output_and_is_idempotent() {
        let dir = TestTempDir::new("tmux");
        let bin = fake_tmux(&dir, "printf 'work:$1:2\\nmain:$0:1\\n'\n");
        let client = TmuxClient::new(bin);
        let first = client.list_sessions().await;
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].name, "work");
        let second = client.list_sessions().await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn list_sessions_returns_empty_on_nonzero_exit() {
        let dir = TestTempDir::new("tmux");
        let bin = fake_tmux(&dir, "echo 'no server running' >&2\nexit 1\n");
        let client = TmuxClient::new(bin);
        assert!(client.list_sessions().await.is_empty());
    }

    #[tokio::test]
    async fn list_sessions_returns_empty_when_binary_is_missing() {
        let client = TmuxClient::new("muxpal-test-no-such-binary");
        assert!(client.list_sessions().await.is_empty());
    }

    #[tokio::test]
    async fn session_exists_matches_exact_names_only() {
        let dir = TestTempDir::new("tmux");
        let bin = fake_tmux(&dir, "printf 'work:$1:2\\n'\n");
        let client = TmuxClient::new(bin);
        assert!(client.session_exists("work").await);
        assert!(!client.session_exists("wor").await);
        assert!(!client.session_exists("workx").await);
    }

    #[tokio::test]
    async fn capture_pane_passes_computed_argv() {
        let dir = TestTempDir::new("tmux");
        let bin = fake_tmux(&dir, "echo \"$@\"\n");
        let client = TmuxClient::new(bin);
        let range = BufferRange {
            start_line: Some(5),
            num_lines: Some(10),
        };
        let out = client.capture_pane("work", range).await.expect("capture");
        assert_eq!(out, "capture-pane -p -S 5 -E 14 -t work\n");
    }

    #[tokio::test]
    async fn capture_pane_surfaces_stderr_on_failure() {
        let dir = TestTempDir::new("tmux");
        let bin = fake_tmux(&dir, "echo \"can't find session\" >&2\nexit 1\n");
        let client = TmuxClient::new(bin);
        let err = client
            .capture_pane("gone", BufferRange::default())
            .await
            .expect_err("should fail");
        assert_eq!(err.stderr(), Some("can't find session"));
    }

    #[tokio::test]
    async fn send_keys_writes_command_then_enter() {
        let dir = TestTempDir::new("tmux");
        let bin = fake_tmux(&dir, "printf '%s\\n' \"$@\" > \"$(dirname \"$0\")/argv\"\n");
        let client = TmuxClient::new(bin);
        client.send_keys("work", "echo hi").await.expect("send");
        let argv = std::fs::read_to_string(dir.path().join("argv")).expect("argv file");
        let args: Vec<&str> = argv.lines().collect();
        assert_eq!(args, vec!["send-keys", "-t", "work", "echo hi", "Enter"]);
    }

    #[cfg(feature = "fuzz-tests")]
    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn parse_sessions_round_trips_formatted_records(
                records in proptest::collection::vec(
                    (
                        proptest::string::string_regex("[a-zA-Z][a-zA-Z0-9 _.-]{0,16}").expect("regex"),
                        0u32..512,
                        0u32..64,
                    ),
                    0..12
                )
            ) {
                let mut raw = String::new();
                let mut expected = Vec::new();
                for (name, id, windows) in &records {
                    raw.push_str(&format!("{name}:${id}:{windows}\n"));
                    expected.push(Session {
                        name: name.clone(),
                        id: format!("${id}"),
                        windows: windows.to_string(),
                    });
                }
                prop_assert_eq!(parse_sessions(&raw), expected);
            }
        }
    }
}
