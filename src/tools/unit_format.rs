//! 檔案大小與影片長度的人類可讀格式

const SIZE_UNITS: [&str; 5] = ["bytes", "KB", "MB", "GB", "TB"];
const DURATION_UNITS: [&str; 3] = ["sec", "min", "h"];

/// 將位元組數轉為 `1.5 MB` 形式
///
/// 每滿 1024 進位一次，最高到 TB；未進位時維持整數（`1023 bytes`），
/// 進位後取到小數第二位，整數值仍保留一位小數（`1.0 KB`）
#[must_use]
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} {}", SIZE_UNITS[0]);
    }

    let mut value = bytes as f64;
    let mut unit_index = 0;
    while value >= 1024.0 && unit_index < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit_index += 1;
    }

    format!("{} {}", format_decimal(value), SIZE_UNITS[unit_index])
}

/// 將秒數轉為 `1 min 1 sec` 形式
///
/// 每滿 60 進位一次，最高到小時；只保留最後一次進位的餘數，
/// 並以下一個較小的單位標示
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    let mut value = seconds.max(0.0).round() as u64;
    let mut remainder = 0;
    let mut unit_index = 0;

    while value >= 60 && unit_index < DURATION_UNITS.len() - 1 {
        remainder = value % 60;
        value /= 60;
        unit_index += 1;
    }

    if remainder > 0 {
        format!(
            "{value} {} {remainder} {}",
            DURATION_UNITS[unit_index],
            DURATION_UNITS[unit_index - 1]
        )
    } else {
        format!("{value} {}", DURATION_UNITS[unit_index])
    }
}

/// 取到小數第二位；整數值保留 `.0`，讓 `10` 秒顯示為 `10.0`
#[must_use]
pub fn format_decimal(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let text = rounded.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_bytes() {
        assert_eq!(format_size(0), "0 bytes");
        assert_eq!(format_size(1023), "1023 bytes");
    }

    #[test]
    fn test_format_size_units() {
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(86_402_662), "82.4 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.0 GB");
    }

    #[test]
    fn test_format_size_caps_at_terabytes() {
        let petabyte = 1024_u64.pow(5);
        assert_eq!(format_size(petabyte), "1024.0 TB");
    }

    #[test]
    fn test_format_duration_seconds() {
        assert_eq!(format_duration(0.0), "0 sec");
        assert_eq!(format_duration(59.0), "59 sec");
        assert_eq!(format_duration(35.767), "36 sec");
    }

    #[test]
    fn test_format_duration_minutes() {
        assert_eq!(format_duration(60.0), "1 min");
        assert_eq!(format_duration(61.0), "1 min 1 sec");
        assert_eq!(format_duration(1500.0), "25 min");
    }

    #[test]
    fn test_format_duration_hours() {
        assert_eq!(format_duration(3661.0), "1 h 1 min");
        assert_eq!(format_duration(7200.0), "2 h");
        assert_eq!(format_duration(360_000.0), "100 h");
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(10.0), "10.0");
        assert_eq!(format_decimal(1.234_56), "1.23");
        assert_eq!(format_decimal(0.5), "0.5");
    }
}
