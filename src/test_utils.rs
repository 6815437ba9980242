//! 測試用的通知與程式執行替身

use crate::component::notifier::{NotificationPayload, Notify};
use crate::config::Config;
use crate::error::PreviewError;
use crate::tools::CommandRunner;
use std::cell::{Cell, RefCell};
use std::path::Path;
use std::process::Command;

/// 記錄所有通知，不送出網路請求
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: RefCell<Vec<NotificationPayload>>,
}

impl RecordingNotifier {
    pub fn texts(&self) -> Vec<String> {
        self.sent
            .borrow()
            .iter()
            .map(|p| {
                p.text
                    .clone()
                    .or_else(|| p.attachments.as_ref().map(|a| a[0].text.clone()))
                    .unwrap_or_default()
            })
            .collect()
    }
}

impl Notify for RecordingNotifier {
    fn notify(&self, payload: NotificationPayload) -> Result<String, PreviewError> {
        self.sent.borrow_mut().push(payload);
        Ok("ok".to_string())
    }
}

/// 回傳固定結果並記錄命令列
pub struct ScriptedRunner {
    pub succeed: bool,
    pub calls: Cell<usize>,
    pub commands: RefCell<Vec<Vec<String>>>,
}

impl ScriptedRunner {
    pub fn new(succeed: bool) -> Self {
        Self {
            succeed,
            calls: Cell::new(0),
            commands: RefCell::new(Vec::new()),
        }
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, command: &mut Command) -> anyhow::Result<bool> {
        self.calls.set(self.calls.get() + 1);
        let mut line = vec![command.get_program().to_string_lossy().into_owned()];
        line.extend(command.get_args().map(|a| a.to_string_lossy().into_owned()));
        self.commands.borrow_mut().push(line);
        Ok(self.succeed)
    }
}

/// 以暫存目錄為網站根目錄的設定
pub fn config_in(root: &Path) -> Config {
    let yaml = format!(
        r#"
Mattermost:
  hook_url: http://127.0.0.1:9/hooks/test
  callback_url: https://hooks.example.com/run
DefaultPayload:
  channel: notifications
WebServer:
  webroot: {root}/www
  preview_dir: previews
  transcode_dir: {root}/transcode
  url: https://media.example.com
PreviewSettings:
  temp_output: {root}/video_preview.jpg
FileOperations:
  h264:
    command: ffmpeg -i "{{input_filename}}" "{{output_filename}}"
  archive:
    command: mv "{{input_filename}}" "{{output_filename}}"
    location: {root}/archive
    text: "Archived to {{output_filename}}"
  broken:
    location: {root}/nowhere
"#,
        root = root.display()
    );
    Config::from_yaml_str(&yaml).expect("test config")
}
