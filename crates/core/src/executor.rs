//! Timeout-bounded execution of external commands.
//!
//! [`Executor::execute`] spawns the command, hands the child to a worker
//! thread that waits for it, and waits on a channel for at most the
//! request's timeout. Every outcome, including a program that cannot be
//! started, comes back as an [`ExecutionResult`] so the interactive loop
//! can always carry on.
//!
//! On unix the child is placed in its own process group. When the deadline
//! passes the whole group is killed (unless disabled in
//! [`ExecutorConfig`]) and whatever output the child produced so far is
//! attached to the [`ExecutionResult::TimedOut`] result.

use std::fmt::{Display, Formatter};
use std::io;
use std::process::{Output, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::command_line::CommandLine;
use crate::config::ExecutorConfig;
use crate::error::Result;

/// One command to run, and how long it may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRequest {
    pub command: CommandLine,
    pub timeout: Duration,
}

impl ExecutionRequest {
    /// A request using [`DEFAULT_TIMEOUT`](crate::config::DEFAULT_TIMEOUT).
    #[must_use]
    pub fn new(command: CommandLine) -> Self {
        Self::with_timeout(command, crate::config::DEFAULT_TIMEOUT)
    }

    #[must_use]
    pub fn with_timeout(command: CommandLine, timeout: Duration) -> Self {
        Self { command, timeout }
    }

    /// Parses `text` into a [`CommandLine`] and wraps it in a request.
    ///
    /// # Errors
    ///
    /// Returns an error if `text` cannot be split into tokens.
    pub fn parse(text: &str, timeout: Duration) -> Result<Self> {
        Ok(Self::with_timeout(CommandLine::parse(text)?, timeout))
    }
}

/// The classified outcome of one [`ExecutionRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionResult {
    /// The program ran and exited with code 0.
    Completed {
        exit_code: i32,
        stdout: String,
        stderr: String,
    },
    /// The program exited unsuccessfully or could not be started.
    ///
    /// `exit_code` is `None` when there is no code to report: the program
    /// was never launched (the reason is in `stderr`) or it was ended by a
    /// signal.
    Failed {
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    },
    /// The deadline passed first. Output is whatever was captured by then.
    TimedOut {
        elapsed: Duration,
        stdout: String,
        stderr: String,
    },
}

impl ExecutionResult {
    fn launch_failure(command: &CommandLine, error: &io::Error) -> Self {
        Self::Failed {
            exit_code: None,
            stdout: String::new(),
            stderr: format!("Unable to start `{}`: {error}", command.program),
        }
    }

    fn from_output(output: io::Result<Output>) -> Self {
        let output = match output {
            Ok(output) => output,
            Err(e) => {
                return Self::Failed {
                    exit_code: None,
                    stdout: String::new(),
                    stderr: format!("Unable to wait for the process: {e}"),
                }
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        match output.status.code() {
            Some(0) => Self::Completed {
                exit_code: 0,
                stdout,
                stderr,
            },
            exit_code => Self::Failed {
                exit_code,
                stdout,
                stderr,
            },
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::TimedOut { .. })
    }

    #[must_use]
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Completed { exit_code, .. } => Some(*exit_code),
            Self::Failed { exit_code, .. } => *exit_code,
            Self::TimedOut { .. } => None,
        }
    }

    #[must_use]
    pub fn stdout(&self) -> &str {
        match self {
            Self::Completed { stdout, .. }
            | Self::Failed { stdout, .. }
            | Self::TimedOut { stdout, .. } => stdout,
        }
    }

    #[must_use]
    pub fn stderr(&self) -> &str {
        match self {
            Self::Completed { stderr, .. }
            | Self::Failed { stderr, .. }
            | Self::TimedOut { stderr, .. } => stderr,
        }
    }
}

impl Display for ExecutionResult {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Completed { exit_code, .. } => {
                write!(formatter, "Completed with exit code {exit_code}")
            }
            Self::Failed {
                exit_code: Some(exit_code),
                ..
            } => write!(formatter, "Failed with exit code {exit_code}"),
            Self::Failed {
                exit_code: None, ..
            } => formatter.write_str("Failed without an exit code"),
            Self::TimedOut { elapsed, .. } => {
                write!(formatter, "Timed out after {:.1}s", elapsed.as_secs_f64())
            }
        }
    }
}

type WorkerOutput = io::Result<Output>;

/// Runs external commands under a wall-clock deadline.
///
/// The executor holds only its configuration; every call to
/// [`execute`](Self::execute) is independent and may run concurrently
/// with others.
#[derive(Debug, Clone, Default)]
pub struct Executor {
    config: ExecutorConfig,
}

impl Executor {
    #[must_use]
    pub fn new(config: ExecutorConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// A request for `command` using this executor's default timeout.
    #[must_use]
    pub fn request(&self, command: CommandLine) -> ExecutionRequest {
        ExecutionRequest::with_timeout(command, self.config.default_timeout)
    }

    /// Runs `request` and classifies the outcome.
    ///
    /// Returns no later than `request.timeout` after the call (plus the
    /// kill grace period when a timed-out child is killed).
    #[must_use]
    pub fn execute(&self, request: &ExecutionRequest) -> ExecutionResult {
        let started = Instant::now();

        let mut command = request.command.to_command();
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        info!(
            "Executing `{}` with a timeout of {:?}",
            request.command, request.timeout
        );

        let child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!("Unable to start `{}`: {e}", request.command);
                return ExecutionResult::launch_failure(&request.command, &e);
            }
        };

        let child_id = child.id();
        let (tx, rx) = mpsc::channel::<WorkerOutput>();

        let worker = thread::spawn(move || {
            // The receiver is gone if the caller has given up on us.
            let _ = tx.send(child.wait_with_output());
        });

        match rx.recv_timeout(request.timeout) {
            Ok(output) => {
                let _ = worker.join();
                let result = ExecutionResult::from_output(output);
                debug!(
                    "`{}` finished in {:?}: {result}",
                    request.command,
                    started.elapsed()
                );
                result
            }
            Err(RecvTimeoutError::Timeout) => self.time_out(request, child_id, &rx, worker),
            Err(RecvTimeoutError::Disconnected) => ExecutionResult::Failed {
                exit_code: None,
                stdout: String::new(),
                stderr: "Process monitoring thread terminated unexpectedly".to_string(),
            },
        }
    }

    fn time_out(
        &self,
        request: &ExecutionRequest,
        child_id: u32,
        rx: &Receiver<WorkerOutput>,
        worker: JoinHandle<()>,
    ) -> ExecutionResult {
        warn!(
            "`{}` timed out after {:?}",
            request.command, request.timeout
        );

        let mut stdout = String::new();
        let mut stderr = String::new();

        if self.config.kill_on_timeout {
            terminate_process_group(child_id);

            if let Ok(Ok(output)) = rx.recv_timeout(self.config.kill_grace) {
                let _ = worker.join();
                stdout = String::from_utf8_lossy(&output.stdout).into_owned();
                stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            } else {
                warn!("Worker for pid {child_id} did not finish after the kill, abandoning it");
            }
        } else {
            info!("Leaving pid {child_id} running, kill on timeout is disabled");
        }

        ExecutionResult::TimedOut {
            elapsed: request.timeout,
            stdout,
            stderr,
        }
    }
}

/// Sends SIGKILL to the process group led by `pid`.
#[cfg(unix)]
fn terminate_process_group(pid: u32) {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    let Ok(raw_pid) = i32::try_from(pid) else {
        warn!("Process id {pid} is out of range, not killing it");
        return;
    };

    match killpg(Pid::from_raw(raw_pid), Signal::SIGKILL) {
        Ok(()) => debug!("Killed process group {pid}"),
        Err(e) => warn!("Unable to kill process group {pid}: {e}"),
    }
}

#[cfg(not(unix))]
fn terminate_process_group(pid: u32) {
    warn!("Killing timed out processes is not supported on this platform, leaving pid {pid}");
}
