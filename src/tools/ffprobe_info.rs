use crate::error::PreviewError;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::process::Command;

/// 預覽訊息所需的影片資訊
#[derive(Debug, Clone, PartialEq)]
pub struct MediaInfo {
    pub duration_seconds: f64,
    /// 容器格式，例如 `QuickTime / MOV`
    pub format: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Deserialize)]
struct FfprobeOutput {
    format: Option<FormatInfo>,
    streams: Option<Vec<StreamInfo>>,
}

#[derive(Deserialize)]
struct FormatInfo {
    duration: Option<String>,
    format_name: Option<String>,
    format_long_name: Option<String>,
}

#[derive(Deserialize)]
struct StreamInfo {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    duration: Option<String>,
}

/// 使用 ffprobe 取得影片資訊
pub fn get_media_info(ffprobe: &str, path: &Path) -> Result<MediaInfo> {
    let output = Command::new(ffprobe)
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .output()
        .with_context(|| format!("無法執行 ffprobe: {}", path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(PreviewError::MediaProbeFailure(format!(
            "{}: {}",
            path.display(),
            stderr.trim()
        ))
        .into());
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_ffprobe_output(&stdout).with_context(|| format!("無法解析 ffprobe 輸出: {}", path.display()))
}

/// 解析 `ffprobe -print_format json` 的輸出
pub fn parse_ffprobe_output(raw: &str) -> Result<MediaInfo> {
    let probe: FfprobeOutput = serde_json::from_str(raw)?;

    let video_stream = probe.streams.as_ref().and_then(|streams| {
        streams
            .iter()
            .find(|s| s.codec_type.as_deref() == Some("video"))
    });

    // 影片長度優先從 format 取得，其次從視訊串流
    let duration_seconds = probe
        .format
        .as_ref()
        .and_then(|f| f.duration.as_ref())
        .or_else(|| video_stream.and_then(|s| s.duration.as_ref()))
        .and_then(|d| d.parse::<f64>().ok())
        .ok_or_else(|| PreviewError::MediaProbeFailure("無法取得影片長度".to_string()))?;

    let format = probe
        .format
        .as_ref()
        .and_then(|f| f.format_long_name.clone().or_else(|| f.format_name.clone()))
        .unwrap_or_else(|| "unknown".to_string());

    Ok(MediaInfo {
        duration_seconds,
        format,
        width: video_stream.and_then(|s| s.width),
        height: video_stream.and_then(|s| s.height),
    })
}

impl MediaInfo {
    /// `1920x1080`；音訊檔等沒有視訊串流時為 None
    #[must_use]
    pub fn resolution(&self) -> Option<String> {
        match (self.width, self.height) {
            (Some(w), Some(h)) => Some(format!("{w}x{h}")),
            _ => None,
        }
    }
}
