use super::callback::CallbackContext;
use crate::component::notifier::{NotificationPayload, Notify};
use crate::config::{Config, OperationDefinition};
use crate::error::PreviewError;
use crate::tools::{CommandRunner, render_shell_script, render_template, shell_command};
use log::{error, info, warn};
use std::path::{Path, PathBuf};

pub const GENERIC_FAILURE: &str = "Something went wrong while running the operation";

/// 執行結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Finished { message: String },
    Failed { message: String },
}

impl DispatchOutcome {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Finished { message } | Self::Failed { message } => message,
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Finished { .. })
    }
}

/// 依名稱執行設定檔中的操作
///
/// 查詢 → 驗證 → 通知開始 → 執行 → 通知結果
pub struct OperationDispatcher<'a, N: Notify, R: CommandRunner> {
    config: &'a Config,
    notifier: &'a N,
    runner: &'a R,
}

impl<'a, N: Notify, R: CommandRunner> OperationDispatcher<'a, N, R> {
    pub const fn new(config: &'a Config, notifier: &'a N, runner: &'a R) -> Self {
        Self {
            config,
            notifier,
            runner,
        }
    }

    /// 永遠回傳結果，錯誤都在這裡收斂成一則錯誤通知
    pub fn run(&self, request: &CallbackContext) -> DispatchOutcome {
        let name = request.command.as_str();
        let file_label = request.filename.display().to_string();

        match self.dispatch(name, &request.filename) {
            Ok(message) => DispatchOutcome::Finished { message },
            Err(e) => {
                error!("操作 {name} 執行失敗 ({file_label}): {e}");
                self.notifier
                    .notify_best_effort(NotificationPayload::text(error_text(&e, name, &file_label)));
                DispatchOutcome::Failed {
                    message: GENERIC_FAILURE.to_string(),
                }
            }
        }
    }

    fn dispatch(&self, name: &str, input: &Path) -> Result<String, PreviewError> {
        let operation = self
            .config
            .file_operations
            .get(name)
            .ok_or_else(|| PreviewError::UnknownOperation(name.to_string()))?;

        let template = operation
            .command
            .as_deref()
            .filter(|command| !command.trim().is_empty())
            .ok_or_else(|| PreviewError::MissingCommand(name.to_string()))?;

        let file_label = input.display().to_string();
        self.notifier.notify_best_effort(NotificationPayload::text(format!(
            "Running {name} on {file_label}"
        )));

        let output = self.output_path(operation, input);
        let script = render_shell_script(template);
        info!("執行操作 {name}: {script} ($1={file_label}, $2={})", output.display());

        let succeeded = self
            .runner
            .run(&mut shell_command(&script, [input, output.as_path()]))
            .unwrap_or_else(|e| {
                warn!("無法啟動操作 {name}: {e:#}");
                false
            });

        if !succeeded {
            return Err(PreviewError::ExternalToolFailure { tool: script });
        }

        let message = operation.text.as_deref().map_or_else(
            || format!("Finished running {name} on {file_label}"),
            |text| render_template(text, input, &output),
        );
        self.notifier
            .notify_best_effort(NotificationPayload::text(message.clone()));

        info!("操作完成 {name}: {file_label}");
        Ok(message)
    }

    /// 輸出位置：操作自訂目錄，否則為 transcode 目錄，檔名沿用輸入檔名
    fn output_path(&self, operation: &OperationDefinition, input: &Path) -> PathBuf {
        let directory = operation
            .location
            .as_deref()
            .unwrap_or(self.config.web_server.transcode_dir.as_path());
        input
            .file_name()
            .map_or_else(|| directory.to_path_buf(), |name| directory.join(name))
    }
}

/// 聊天室看到的錯誤訊息
fn error_text(error: &PreviewError, name: &str, file_label: &str) -> String {
    let reason = match error {
        PreviewError::ExternalToolFailure { .. } => {
            return format!("### Error\nError running {name} on {file_label}");
        }
        PreviewError::UnknownOperation(_) => "no such operation is configured",
        PreviewError::MissingCommand(_) => "the operation has no command configured",
        _ => "unexpected error",
    };
    format!("### Error\nCould not run {name} on {file_label}: {reason}")
}
