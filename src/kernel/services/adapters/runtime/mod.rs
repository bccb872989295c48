//! Async runtime adapter: executes effects and sends the resulting actions back to the UI loop.

mod async_runtime;
mod shell;

pub use async_runtime::AsyncRuntime;
pub use shell::{run_shell_command, shell_command, ShellOutput};
