//! Waiting on external programs with a deadline.
//!
//! Shared by the ffmpeg renderer and the TTS driver.

use std::io::{self, Read};
use std::process::{Child, ExitStatus};
use std::thread;
use std::time::{Duration, Instant};

/// How a waited-on child ended.
#[derive(Debug)]
pub enum WaitOutcome {
    /// The child exited on its own; `stderr` holds everything it wrote there.
    Exited { status: ExitStatus, stderr: String },
    /// The deadline passed and the child was killed.
    TimedOut,
}

/// Polls `child` until it exits or `timeout` elapses.
///
/// A piped stderr is drained on a separate thread while polling, so a child
/// that writes more than the pipe buffer does not stall.
pub fn wait_with_timeout(mut child: Child, timeout: Duration) -> io::Result<WaitOutcome> {
    let drain = child.stderr.take().map(|mut err| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = err.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).into_owned()
        })
    });

    let start = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                return Ok(WaitOutcome::Exited {
                    status,
                    stderr: drain
                        .and_then(|handle| handle.join().ok())
                        .unwrap_or_default(),
                });
            }
            Ok(None) => {
                if start.elapsed() > timeout {
                    // The drain thread is left detached: a grandchild may
                    // still hold the pipe open.
                    let _ = child.kill();
                    let _ = child.wait();
                    return Ok(WaitOutcome::TimedOut);
                }
                thread::sleep(Duration::from_millis(50));
            }
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(e);
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::process::{Command, Stdio};

    fn sh(script: &str) -> Child {
        Command::new("sh")
            .arg("-c")
            .arg(script)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap()
    }

    #[test]
    fn test_large_stderr_does_not_stall() {
        let child = sh("head -c 262144 /dev/zero | tr '\\0' x 1>&2; exit 0");
        match wait_with_timeout(child, Duration::from_secs(20)).unwrap() {
            WaitOutcome::Exited { status, stderr } => {
                assert!(status.success());
                assert_eq!(stderr.len(), 262144);
                assert!(stderr.bytes().all(|b| b == b'x'));
            }
            WaitOutcome::TimedOut => panic!("verbose child was treated as a timeout"),
        }
    }

    #[test]
    fn test_exit_status_and_stderr() {
        let child = sh("echo 'bad input' 1>&2; exit 4");
        match wait_with_timeout(child, Duration::from_secs(20)).unwrap() {
            WaitOutcome::Exited { status, stderr } => {
                assert_eq!(status.code(), Some(4));
                assert_eq!(stderr.trim(), "bad input");
            }
            WaitOutcome::TimedOut => panic!("unexpected timeout"),
        }
    }

    #[test]
    fn test_deadline_kills_child() {
        let child = sh("exec sleep 5");
        let outcome = wait_with_timeout(child, Duration::from_millis(100)).unwrap();
        assert!(matches!(outcome, WaitOutcome::TimedOut));
    }
}
