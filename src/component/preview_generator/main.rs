use super::ffmpeg_command::{GridSpec, PreviewCommand, resolve_interval};
use super::message::{
    PreviewMessage, extraction_failed_message, metadata_failed_message, source_unreadable_message,
    upload_failed_message,
};
use super::publisher::Publisher;
use crate::component::notifier::Notify;
use crate::config::Config;
use crate::error::PreviewError;
use crate::tools::{CommandRunner, MediaInfo, get_media_info, validate_file_exists};
use anyhow::{Context, Result};
use log::{error, info};
use std::fs;
use std::path::{Path, PathBuf};

/// 單次預覽的參數
#[derive(Debug, Clone)]
pub struct PreviewRequest {
    pub source: PathBuf,
    pub grid: GridSpec,
    /// 0 表示依影片長度計算
    pub interval: f64,
    pub height: u32,
}

impl PreviewRequest {
    /// 未指定的欄位取自 `PreviewSettings`
    pub fn from_config(
        config: &Config,
        source: &Path,
        grid: Option<&str>,
        interval: Option<f64>,
        height: Option<u32>,
    ) -> Result<Self, PreviewError> {
        let settings = &config.preview;
        Ok(Self {
            source: source.to_path_buf(),
            grid: GridSpec::parse(grid.unwrap_or(&settings.default_grid))?,
            interval: interval.unwrap_or(settings.default_interval),
            height: height.unwrap_or(settings.default_height),
        })
    }
}

/// 預覽圖生成流程
///
/// 1. 讀取影片資訊（ffprobe）
/// 2. 以 ffmpeg 產生格狀預覽圖
/// 3. 發佈到網站目錄
/// 4. 發送附帶操作按鈕的通知；任何一步失敗改發錯誤通知
pub struct PreviewGenerator<'a, N: Notify, R: CommandRunner> {
    config: &'a Config,
    notifier: &'a N,
    runner: &'a R,
}

impl<'a, N: Notify, R: CommandRunner> PreviewGenerator<'a, N, R> {
    pub const fn new(config: &'a Config, notifier: &'a N, runner: &'a R) -> Self {
        Self {
            config,
            notifier,
            runner,
        }
    }

    /// 回傳預覽圖的公開網址
    pub fn run(&self, request: &PreviewRequest) -> Result<String> {
        let file_name = display_name(&request.source);

        let size_bytes = match source_size(&request.source) {
            Ok(size) => size,
            Err(e) => {
                error!("無法讀取來源檔案 {file_name}: {e:#}");
                self.notifier
                    .notify_best_effort(source_unreadable_message(&file_name));
                return Err(e);
            }
        };

        let media = match get_media_info(&self.config.preview.ffprobe_path, &request.source) {
            Ok(media) => media,
            Err(e) => {
                error!("讀取影片資訊失敗 {file_name}: {e:#}");
                self.notifier
                    .notify_best_effort(metadata_failed_message(&file_name));
                return Err(e);
            }
        };

        self.generate(request, size_bytes, &media)
    }

    /// 已取得影片資訊後的步驟
    pub fn generate(&self, request: &PreviewRequest, size_bytes: u64, media: &MediaInfo) -> Result<String> {
        let file_name = display_name(&request.source);
        let settings = &self.config.preview;

        let interval = resolve_interval(request.interval, media.duration_seconds, request.grid);
        let command = PreviewCommand::new(
            &settings.ffmpeg_path,
            &request.source,
            &settings.temp_output,
            request.grid,
            interval,
            request.height,
        );

        info!(
            "產生預覽圖 {file_name}: grid={}, interval={interval:.2}s, height={}",
            request.grid, request.height
        );

        let succeeded = self
            .runner
            .run(&mut command.build_command())
            .unwrap_or_else(|e| {
                error!("無法執行 ffmpeg: {e:#}");
                false
            });

        if !succeeded {
            error!("ffmpeg 產生預覽圖失敗: {file_name}");
            self.notifier
                .notify_best_effort(extraction_failed_message(&file_name));
            return Err(PreviewError::ExternalToolFailure {
                tool: settings.ffmpeg_path.clone(),
            }
            .into());
        }

        let publisher = Publisher::new(&self.config.web_server);
        let preview_url = match publisher.publish(command.destination_path(), &file_name) {
            Ok(url) => url,
            Err(e) => {
                error!("{e}");
                self.notifier.notify_best_effort(upload_failed_message(&file_name));
                return Err(e.into());
            }
        };

        let absolute_path =
            std::path::absolute(&request.source).unwrap_or_else(|_| request.source.clone());
        let payload = PreviewMessage {
            file_name: &file_name,
            size_bytes,
            media,
            preview_url: &preview_url,
        }
        .into_payload(
            self.config.file_operations.keys(),
            self.config.mattermost.callback_url.as_deref(),
            &absolute_path,
        );

        self.notifier
            .notify(payload)
            .with_context(|| format!("預覽通知發送失敗: {file_name}"))?;

        info!("預覽已發佈: {preview_url}");
        Ok(preview_url)
    }
}

fn source_size(path: &Path) -> Result<u64> {
    validate_file_exists(path)?;
    let metadata =
        fs::metadata(path).with_context(|| format!("無法讀取檔案大小: {}", path.display()))?;
    Ok(metadata.len())
}

fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{RecordingNotifier, ScriptedRunner, config_in};
    use tempfile::TempDir;

    fn media() -> MediaInfo {
        MediaInfo {
            duration_seconds: 300.0,
            format: "QuickTime / MOV".to_string(),
            width: Some(640),
            height: Some(360),
        }
    }

    #[test]
    fn test_request_defaults_from_config() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());

        let request =
            PreviewRequest::from_config(&config, Path::new("/v/a.mp4"), None, None, None).unwrap();
        assert_eq!(request.grid, GridSpec { rows: 5, columns: 6 });
        assert!(request.interval.abs() < f64::EPSILON);
        assert_eq!(request.height, 120);

        let request =
            PreviewRequest::from_config(&config, Path::new("/v/a.mp4"), Some("3x3"), Some(2.0), Some(90))
                .unwrap();
        assert_eq!(request.grid.total_frames(), 9);
        assert_eq!(request.height, 90);
    }

    #[test]
    fn test_generate_publishes_and_notifies() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());
        fs::write(&config.preview.temp_output, b"jpeg").unwrap();

        let notifier = RecordingNotifier::default();
        let runner = ScriptedRunner::new(true);
        let request =
            PreviewRequest::from_config(&config, Path::new("/srv/in/movie.mp4"), None, None, None)
                .unwrap();

        let url = PreviewGenerator::new(&config, &notifier, &runner)
            .generate(&request, 2048, &media())
            .unwrap();

        let name = Publisher::published_name("movie.mp4");
        assert_eq!(url, format!("https://media.example.com/previews/{name}"));
        assert!(dir.path().join("www").join("previews").join(&name).exists());

        let commands = runner.commands.borrow();
        assert!(commands[0].iter().any(|a| a.contains("prev_selected_t\\,10.0")));

        let sent = notifier.sent.borrow();
        assert_eq!(sent.len(), 1);
        let attachment = &sent[0].attachments.as_ref().unwrap()[0];
        assert!(attachment.text.contains("|File Size| **2.0 KB**|"));
        assert!(attachment.text.contains("|Duration| **5 min**|"));
        assert!(attachment.text.contains(&url));

        let buttons: Vec<_> = attachment.actions.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(buttons, ["archive", "broken", "h264"]);
        assert_eq!(attachment.actions[0].integration.context.filename, "/srv/in/movie.mp4");
    }

    #[test]
    fn test_tool_failure_sends_error_instead_of_preview() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());
        let notifier = RecordingNotifier::default();
        let runner = ScriptedRunner::new(false);
        let request =
            PreviewRequest::from_config(&config, Path::new("/srv/in/movie.mp4"), None, None, None)
                .unwrap();

        let err = PreviewGenerator::new(&config, &notifier, &runner)
            .generate(&request, 2048, &media())
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<PreviewError>(),
            Some(PreviewError::ExternalToolFailure { .. })
        ));
        let texts = notifier.texts();
        assert_eq!(texts.len(), 1);
        assert!(texts[0].starts_with("### Preview failed"));
    }

    #[test]
    fn test_missing_image_sends_upload_error() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());
        let notifier = RecordingNotifier::default();
        let runner = ScriptedRunner::new(true);
        let request =
            PreviewRequest::from_config(&config, Path::new("/srv/in/movie.mp4"), None, None, None)
                .unwrap();

        let err = PreviewGenerator::new(&config, &notifier, &runner)
            .generate(&request, 2048, &media())
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<PreviewError>(),
            Some(PreviewError::UploadFailure { .. })
        ));
        assert!(notifier.texts()[0].contains("problem uploading"));
    }

    #[test]
    fn test_run_rejects_missing_source() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());
        let notifier = RecordingNotifier::default();
        let runner = ScriptedRunner::new(true);
        let request = PreviewRequest::from_config(
            &config,
            &dir.path().join("missing.mp4"),
            None,
            None,
            None,
        )
        .unwrap();

        assert!(PreviewGenerator::new(&config, &notifier, &runner).run(&request).is_err());
        assert_eq!(runner.calls.get(), 0);
        assert_eq!(
            notifier.texts(),
            ["### Preview failed\n**missing.mp4** could not be found or read."]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_probe_failure_sends_metadata_error() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(dir.path());
        config.preview.ffprobe_path = "false".to_string();

        let video = dir.path().join("clip.mp4");
        fs::write(&video, b"data").unwrap();
        let notifier = RecordingNotifier::default();
        let runner = ScriptedRunner::new(true);
        let request = PreviewRequest::from_config(&config, &video, None, None, None).unwrap();

        assert!(PreviewGenerator::new(&config, &notifier, &runner).run(&request).is_err());
        assert_eq!(runner.calls.get(), 0);
        let texts = notifier.texts();
        assert_eq!(texts.len(), 1);
        assert!(texts[0].contains("ffprobe could not read the video details of **clip.mp4**"));
    }
}
