//! TTS subprocess driver.
//!
//! Each request is written as JSON into a fresh temp directory; the program
//! writes its WAV next to it and the bytes are read back.

use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Duration;

use vocatrack_audio::process::{wait_with_timeout, WaitOutcome};
use vocatrack_spec::{SynthesisRequest, SynthesizerConfig};

use crate::error::{SynthError, SynthResult};
use crate::Synthesizer;

/// Program looked up on `PATH` when nothing else is configured.
pub const DEFAULT_PROGRAM: &str = "vocatrack-tts";

/// Configuration for [`CommandSynthesizer`].
#[derive(Debug, Clone)]
pub struct CommandConfig {
    /// Path to the TTS program.
    pub program: Option<PathBuf>,
    /// Arguments placed before `--request`/`--output`.
    pub args: Vec<String>,
    /// Timeout per clip.
    pub timeout: Duration,
}

impl Default for CommandConfig {
    fn default() -> Self {
        SynthesizerConfig::default().into()
    }
}

impl From<SynthesizerConfig> for CommandConfig {
    fn from(config: SynthesizerConfig) -> Self {
        Self {
            program: config.program,
            args: config.args,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

impl CommandConfig {
    /// Sets the program path.
    pub fn program(mut self, path: impl Into<PathBuf>) -> Self {
        self.program = Some(path.into());
        self
    }

    /// Appends a leading argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }
}

/// Runs an external program once per clip.
#[derive(Debug, Clone, Default)]
pub struct CommandSynthesizer {
    config: CommandConfig,
}

impl CommandSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: impl Into<CommandConfig>) -> Self {
        Self {
            config: config.into(),
        }
    }

    /// Finds the program: config, then `VOCATRACK_TTS`, then `PATH`.
    pub fn find_program(&self) -> SynthResult<PathBuf> {
        if let Some(ref program) = self.config.program {
            if program.exists() {
                return Ok(program.clone());
            }
            // A bare name from the project file is looked up like any command.
            if program.components().count() == 1 {
                if let Ok(path) = which::which(program) {
                    return Ok(path);
                }
            }
        }

        if let Ok(path) = std::env::var("VOCATRACK_TTS") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Ok(path);
            }
        }

        which::which(DEFAULT_PROGRAM).map_err(|_| SynthError::ProgramNotFound)
    }
}

impl Synthesizer for CommandSynthesizer {
    fn name(&self) -> &'static str {
        "command"
    }

    fn synthesize(&self, request: &SynthesisRequest) -> SynthResult<Vec<u8>> {
        let program = self.find_program()?;

        let work = tempfile::Builder::new().prefix("vocatrack-tts-").tempdir()?;
        let request_path = work.path().join("request.json");
        let output_path = work.path().join("clip.wav");

        let json = serde_json::to_vec_pretty(request).map_err(SynthError::SerializeRequest)?;
        std::fs::write(&request_path, json)?;

        // <program> [args...] --request <path> --output <path>
        let mut cmd = Command::new(&program);
        cmd.args(&self.config.args)
            .arg("--request")
            .arg(&request_path)
            .arg("--output")
            .arg(&output_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        let child = cmd.spawn().map_err(SynthError::SpawnFailed)?;
        let outcome =
            wait_with_timeout(child, self.config.timeout).map_err(SynthError::SpawnFailed)?;
        let (status, stderr) = match outcome {
            WaitOutcome::Exited { status, stderr } => (status, stderr),
            WaitOutcome::TimedOut => {
                return Err(SynthError::Timeout {
                    timeout_secs: self.config.timeout.as_secs(),
                });
            }
        };

        if !status.success() {
            let exit_code = status.code().unwrap_or(-1);
            return Err(SynthError::process_failed(exit_code, stderr.trim()));
        }

        match std::fs::read(&output_path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(SynthError::OutputMissing { path: output_path })
            }
            Err(e) => Err(SynthError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SynthesisRequest {
        SynthesisRequest {
            reference_audio: PathBuf::from("ref.wav"),
            reference_text: "知道太多会被杀掉。".to_string(),
            reference_language: "Chinese".to_string(),
            text: "cat".to_string(),
            language: "English".to_string(),
        }
    }

    #[test]
    fn test_config_from_project_settings() {
        let config: CommandConfig = SynthesizerConfig {
            program: Some(PathBuf::from("/opt/tts/run")),
            args: vec!["--fp16".to_string()],
            timeout_secs: 30,
        }
        .into();
        assert_eq!(config.program, Some(PathBuf::from("/opt/tts/run")));
        assert_eq!(config.args, vec!["--fp16".to_string()]);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_config_builder() {
        let config = CommandConfig::default()
            .program("/usr/local/bin/tts")
            .arg("--quiet")
            .timeout_secs(10);
        assert_eq!(config.program, Some(PathBuf::from("/usr/local/bin/tts")));
        assert_eq!(config.args, vec!["--quiet".to_string()]);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_explicit_existing_program_wins() {
        let dir = tempfile::tempdir().unwrap();
        let program = dir.path().join("tts");
        std::fs::write(&program, b"").unwrap();
        let synth = CommandSynthesizer::with_config(CommandConfig::default().program(&program));
        assert_eq!(synth.find_program().unwrap(), program);
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use std::os::unix::fs::PermissionsExt;
        use std::path::Path;

        fn script(dir: &Path, body: &str) -> PathBuf {
            let path = dir.join("fake-tts");
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        /// Finds the value following `--output` and writes the request there.
        const ECHO_REQUEST: &str = r#"
while [ "$#" -gt 0 ]; do
  case "$1" in
    --request) req="$2"; shift 2 ;;
    --output) out="$2"; shift 2 ;;
    *) shift ;;
  esac
done
cp "$req" "$out""#;

        #[test]
        fn test_program_receives_request_and_output_paths() {
            let dir = tempfile::tempdir().unwrap();
            let program = script(dir.path(), ECHO_REQUEST);
            let synth = CommandSynthesizer::with_config(CommandConfig::default().program(program));

            let bytes = synth.synthesize(&request()).unwrap();
            let echoed: SynthesisRequest = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(echoed, request());
        }

        #[test]
        fn test_non_zero_exit_captures_stderr() {
            let dir = tempfile::tempdir().unwrap();
            let program = script(dir.path(), "echo 'voice model missing' 1>&2\nexit 3");
            let synth = CommandSynthesizer::with_config(CommandConfig::default().program(program));

            match synth.synthesize(&request()) {
                Err(SynthError::ProcessFailed { exit_code, stderr }) => {
                    assert_eq!(exit_code, 3);
                    assert_eq!(stderr, "voice model missing");
                }
                other => panic!("expected process failure, got {:?}", other),
            }
        }

        #[test]
        fn test_missing_output_is_reported() {
            let dir = tempfile::tempdir().unwrap();
            let program = script(dir.path(), "exit 0");
            let synth = CommandSynthesizer::with_config(CommandConfig::default().program(program));

            let err = synth.synthesize(&request()).unwrap_err();
            assert!(matches!(err, SynthError::OutputMissing { .. }));
        }

        #[test]
        fn test_verbose_program_is_not_a_timeout() {
            let dir = tempfile::tempdir().unwrap();
            let body = format!("head -c 262144 /dev/zero | tr '\\0' x 1>&2\n{ECHO_REQUEST}");
            let program = script(dir.path(), &body);
            let synth = CommandSynthesizer::with_config(
                CommandConfig::default().program(program).timeout_secs(20),
            );

            let bytes = synth.synthesize(&request()).unwrap();
            let echoed: SynthesisRequest = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(echoed, request());
        }

        #[test]
        fn test_verbose_failure_keeps_all_of_stderr() {
            let dir = tempfile::tempdir().unwrap();
            let program = script(dir.path(), "head -c 262144 /dev/zero | tr '\\0' x 1>&2\nexit 2");
            let synth = CommandSynthesizer::with_config(
                CommandConfig::default().program(program).timeout_secs(20),
            );

            match synth.synthesize(&request()) {
                Err(SynthError::ProcessFailed { exit_code, stderr }) => {
                    assert_eq!(exit_code, 2);
                    assert_eq!(stderr.len(), 262144);
                }
                other => panic!("expected process failure, got {:?}", other),
            }
        }

        #[test]
        fn test_timeout_kills_program() {
            let dir = tempfile::tempdir().unwrap();
            let program = script(dir.path(), "sleep 5");
            let synth = CommandSynthesizer::with_config(
                CommandConfig::default().program(program).timeout_secs(0),
            );

            let err = synth.synthesize(&request()).unwrap_err();
            assert!(matches!(err, SynthError::Timeout { timeout_secs: 0 }));
        }
    }
}
