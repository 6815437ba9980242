use crate::error::PreviewError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

/// 單張預覽圖最多的格數
pub const MAX_TILES: u32 = 1024;

/// `RxC` 格線設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    pub rows: u32,
    pub columns: u32,
}

impl GridSpec {
    pub fn parse(raw: &str) -> Result<Self, PreviewError> {
        let invalid = || PreviewError::InvalidGrid(raw.to_string());

        let (rows, columns) = raw.trim().split_once('x').ok_or_else(invalid)?;
        let rows: u32 = rows.trim().parse().map_err(|_| invalid())?;
        let columns: u32 = columns.trim().parse().map_err(|_| invalid())?;

        match rows.checked_mul(columns) {
            Some(tiles) if tiles > 0 && tiles <= MAX_TILES => Ok(Self { rows, columns }),
            _ => Err(invalid()),
        }
    }

    #[must_use]
    pub const fn total_frames(&self) -> u32 {
        self.rows.saturating_mul(self.columns)
    }
}

impl fmt::Display for GridSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.columns)
    }
}

/// 擷取間隔；0 代表依影片長度平均分配到每一格
#[must_use]
pub fn resolve_interval(interval: f64, duration_seconds: f64, grid: GridSpec) -> f64 {
    if interval > 0.0 {
        interval
    } else {
        duration_seconds / f64::from(grid.total_frames().max(1))
    }
}

/// 間隔的文字形式：保留完整精度，整數補上 `.0`
#[must_use]
pub fn format_interval(interval: f64) -> String {
    let text = interval.to_string();
    if text.contains('.') || !interval.is_finite() {
        text
    } else {
        format!("{text}.0")
    }
}

/// 產生單張格狀預覽圖的 ffmpeg 命令
pub struct PreviewCommand {
    ffmpeg: String,
    source_path: PathBuf,
    destination_path: PathBuf,
    grid: GridSpec,
    interval: f64,
    height: u32,
}

impl PreviewCommand {
    #[must_use]
    pub fn new(
        ffmpeg: &str,
        source_path: &Path,
        destination_path: &Path,
        grid: GridSpec,
        interval: f64,
        height: u32,
    ) -> Self {
        Self {
            ffmpeg: ffmpeg.to_string(),
            source_path: source_path.to_path_buf(),
            destination_path: destination_path.to_path_buf(),
            grid,
            interval,
            height,
        }
    }

    #[must_use]
    pub fn destination_path(&self) -> &Path {
        &self.destination_path
    }

    #[must_use]
    pub const fn interval(&self) -> f64 {
        self.interval
    }

    /// 每隔 interval 秒選一幀，縮放到指定高度後拼成格狀
    #[must_use]
    pub fn video_filter(&self) -> String {
        format!(
            "select='isnan(prev_selected_t)+gte(t-prev_selected_t\\,{})',scale=-1:{},tile={}",
            format_interval(self.interval),
            self.height,
            self.grid
        )
    }

    #[must_use]
    pub fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.ffmpeg);
        cmd.args(["-hide_banner", "-loglevel", "error", "-y", "-i"]);
        cmd.arg(&self.source_path);
        cmd.args(["-frames", "1", "-q:v", "1", "-vf"]);
        cmd.arg(self.video_filter());
        cmd.arg(&self.destination_path);
        cmd
    }
}
