//! Typed invocation of external command-line tools.
//!
//! The file path is always passed as its own argument; no shell is involved.

use crate::error::ToolError;
use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Captured result of a successful run.
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// A program plus fixed leading arguments; the target path is appended last.
#[derive(Debug, Clone)]
pub struct ExternalTool {
    program: PathBuf,
    args: Vec<OsString>,
    timeout: Option<Duration>,
}

impl ExternalTool {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: None,
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run the tool against `path` and wait for it to finish.
    ///
    /// The timeout also bounds reading the output, so a background process
    /// that keeps the pipes open after the tool exits cannot stall the run.
    /// A timeout too large to represent as a deadline means no limit.
    ///
    /// # Errors
    /// Returns [`ToolError::Spawn`] if the program cannot be started,
    /// [`ToolError::Timeout`] if it outlives the configured timeout (the child
    /// is killed), and [`ToolError::Exit`] on a non-zero exit status.
    pub fn run(&self, path: &Path) -> Result<ToolOutput, ToolError> {
        let deadline = self
            .timeout
            .and_then(|limit| Instant::now().checked_add(limit));

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ToolError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        // Drain both pipes so a verbose child never stalls on a full buffer.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        // Reader threads still blocked at the deadline are left detached.
        let status = self.wait(&mut child, deadline)?;
        let output = ToolOutput {
            stdout: collect(stdout, deadline).ok_or_else(|| self.timed_out())?,
            stderr: collect(stderr, deadline).ok_or_else(|| self.timed_out())?,
        };

        if status.success() {
            Ok(output)
        } else {
            Err(ToolError::Exit {
                code: status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
    }

    fn timed_out(&self) -> ToolError {
        ToolError::Timeout {
            after: self.timeout.unwrap_or_default(),
        }
    }

    fn wait(&self, child: &mut Child, deadline: Option<Instant>) -> Result<ExitStatus, ToolError> {
        let wait_error = |source: std::io::Error| ToolError::Spawn {
            program: self.program.display().to_string(),
            source,
        };

        let Some(deadline) = deadline else {
            return child.wait().map_err(wait_error);
        };

        loop {
            if let Some(status) = child.try_wait().map_err(wait_error)? {
                return Ok(status);
            }
            if Instant::now() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                return Err(self.timed_out());
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<Receiver<Vec<u8>>> {
    pipe.map(|mut reader| {
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = reader.read_to_end(&mut buf);
            let _ = tx.send(buf);
        });
        rx
    })
}

/// `None` if the pipe is still open at `deadline`.
fn collect(pipe: Option<Receiver<Vec<u8>>>, deadline: Option<Instant>) -> Option<Vec<u8>> {
    let Some(rx) = pipe else {
        return Some(Vec::new());
    };
    let received = match deadline {
        Some(deadline) => rx.recv_timeout(deadline.saturating_duration_since(Instant::now())),
        None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
    };
    match received {
        Ok(buf) => Some(buf),
        Err(RecvTimeoutError::Timeout) => None,
        Err(RecvTimeoutError::Disconnected) => Some(Vec::new()),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sh(script: &str) -> ExternalTool {
        // `sh -c SCRIPT PATH` binds the appended path to $0.
        ExternalTool::new("sh").arg("-c").arg(script)
    }

    #[test]
    fn test_path_is_passed_verbatim() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("it's a \"file\"; rm -rf x.txt");
        fs::write(&path, "payload\n").unwrap();

        let output = sh("cat \"$0\"").run(&path).unwrap();
        assert_eq!(output.stdout, b"payload\n");
    }

    #[test]
    fn test_non_zero_exit_is_reported() {
        let temp = TempDir::new().unwrap();
        let err = sh("echo boom >&2; exit 3").run(temp.path()).unwrap_err();
        match err {
            ToolError::Exit { code, stderr } => {
                assert_eq!(code, Some(3));
                assert!(stderr.contains("boom"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_timeout_kills_child() {
        let temp = TempDir::new().unwrap();
        let started = Instant::now();
        let err = sh("exec sleep 5")
            .timeout(Some(Duration::from_millis(100)))
            .run(temp.path())
            .unwrap_err();
        assert!(matches!(err, ToolError::Timeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_unrepresentable_timeout_means_no_limit() {
        let temp = TempDir::new().unwrap();
        let output = sh("echo ok")
            .timeout(Some(Duration::from_secs(u64::MAX)))
            .run(temp.path())
            .unwrap();
        assert_eq!(output.stdout, b"ok\n");
    }

    #[test]
    fn test_timeout_bounds_output_held_open_by_background_process() {
        let temp = TempDir::new().unwrap();
        let started = Instant::now();
        let err = sh("sleep 5 & echo started")
            .timeout(Some(Duration::from_millis(300)))
            .run(temp.path())
            .unwrap_err();
        assert!(matches!(err, ToolError::Timeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_missing_program() {
        let temp = TempDir::new().unwrap();
        let err = ExternalTool::new("/nonexistent/check_format-tool")
            .run(temp.path())
            .unwrap_err();
        assert!(matches!(err, ToolError::Spawn { .. }));
    }
}
