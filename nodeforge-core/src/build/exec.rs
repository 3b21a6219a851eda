// nodeforge-core/src/build/exec.rs
use std::path::Path;
use std::process::{Output, Stdio};

use nodeforge_common::error::{ForgeError, Result};
use tokio::process::Command;
use tracing::debug;

/// Runs an external command with `cwd` as its working directory and captures
/// its output. The working directory is scoped to the child; the parent
/// process CWD is never touched. Captured stdout/stderr surfaces at debug
/// level whether the command succeeded or not.
///
/// No timeout is enforced: a hung tool hangs the pipeline.
pub async fn run_command(program: &str, args: &[String], cwd: &Path) -> Result<Output> {
    debug!(
        "Running command: {} {:?} (cwd: {})",
        program,
        args,
        cwd.display()
    );

    let mut cmd = Command::new(program);
    cmd.args(args);
    cmd.current_dir(cwd);
    cmd.kill_on_drop(true);
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    cmd.stdin(Stdio::null());

    let output = cmd
        .output()
        .await
        .map_err(|e| ForgeError::CommandExec(format!("{program}: {e}")))?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stdout.trim().is_empty() {
        debug!("Stdout:\n{}", stdout.trim());
    }
    if !stderr.trim().is_empty() {
        debug!("Stderr:\n{}", stderr.trim());
    }
    if !output.status.success() {
        debug!("Command {} failed with status: {}", program, output.status);
    }

    Ok(output)
}

/// Exit code of a finished command; `-1` when it was killed by a signal.
pub fn exit_code(output: &Output) -> i32 {
    output.status.code().unwrap_or(-1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn zero_exit_reports_success() {
        let dir = tempfile::tempdir().unwrap();
        let output = run_command("sh", &["-c".to_string(), "true".to_string()], dir.path())
            .await
            .unwrap();
        assert!(output.status.success());
        assert_eq!(exit_code(&output), 0);
    }

    #[tokio::test]
    async fn nonzero_exit_carries_the_code() {
        let dir = tempfile::tempdir().unwrap();
        let output = run_command("sh", &["-c".to_string(), "exit 4".to_string()], dir.path())
            .await
            .unwrap();
        assert!(!output.status.success());
        assert_eq!(exit_code(&output), 4);
    }

    #[tokio::test]
    async fn commands_run_in_the_given_directory() {
        let dir = tempfile::tempdir().unwrap();
        let output = run_command("sh", &["-c".to_string(), "pwd".to_string()], dir.path())
            .await
            .unwrap();
        let reported = String::from_utf8_lossy(&output.stdout);
        let canonical = dir.path().canonicalize().unwrap();
        assert_eq!(reported.trim(), canonical.to_string_lossy());
    }

    #[tokio::test]
    async fn unknown_program_is_an_exec_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_command("definitely-not-a-real-tool", &[], dir.path())
            .await
            .unwrap_err();
        assert!(matches!(err, ForgeError::CommandExec(_)));
    }
}
