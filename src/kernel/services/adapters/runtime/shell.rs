use std::path::Path;
use tokio::process::Command;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellOutput {
    pub lines: Vec<String>,
    pub exit_code: Option<i32>,
}

/// Builds the OS shell invocation for `command`, running in `cwd`.
///
/// `shell` overrides the platform default (`sh` on unix, `cmd` on windows). Shells named
/// `cmd`/`cmd.exe` take `/C`, everything else `-c`.
pub fn shell_command(shell: Option<&str>, command: &str, cwd: &Path) -> Command {
    let default_shell = if cfg!(windows) { "cmd" } else { "sh" };
    let program = shell.filter(|s| !s.trim().is_empty()).unwrap_or(default_shell);
    let flag = if is_cmd(program) { "/C" } else { "-c" };

    let mut cmd = Command::new(program);
    cmd.arg(flag)
        .arg(command)
        .current_dir(cwd)
        .stdin(std::process::Stdio::null())
        .kill_on_drop(true);
    cmd
}

fn is_cmd(program: &str) -> bool {
    let name = Path::new(program)
        .file_stem()
        .map(|s| s.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    name == "cmd"
}

/// Runs `command` to completion; stdout lines come first, then stderr.
pub async fn run_shell_command(
    shell: Option<&str>,
    command: &str,
    cwd: &Path,
) -> std::io::Result<ShellOutput> {
    let output = shell_command(shell, command, cwd).output().await?;
    let mut lines: Vec<String> = String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect();
    lines.extend(
        String::from_utf8_lossy(&output.stderr)
            .lines()
            .map(str::to_string),
    );
    Ok(ShellOutput {
        lines,
        exit_code: output.status.code(),
    })
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/runtime/shell.rs"]
mod tests;
