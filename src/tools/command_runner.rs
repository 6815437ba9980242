use anyhow::{Context, Result};
use log::debug;
use std::ffi::OsStr;
use std::process::{Command, Stdio};

/// 外部程式執行介面，只回報是否成功結束
pub trait CommandRunner {
    fn run(&self, command: &mut Command) -> Result<bool>;
}

/// 直接啟動子程序並等待結束
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &mut Command) -> Result<bool> {
        debug!("執行: {command:?}");
        let status = command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .status()
            .with_context(|| format!("無法啟動程式: {}", command.get_program().to_string_lossy()))?;
        Ok(status.success())
    }
}

/// 以 `sh -c` 執行腳本，`params` 依序成為 `$1`、`$2`…
#[must_use]
pub fn shell_command<I, S>(script: &str, params: I) -> Command
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(script).arg("sh").args(params);
    cmd
}
