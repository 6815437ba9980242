//! 操作樣板的佔位符處理
//!
//! 只認得 `{input_filename}` 與 `{output_filename}`；`${VAR}` 保留給 shell 展開。
//! 命令列中的佔位符換成位置參數 `$1` / `$2`，路徑本身不會進入 shell 文字

use crate::error::PreviewError;
use regex::{Captures, Regex};
use std::path::Path;
use std::sync::LazyLock;

pub const INPUT_FILENAME: &str = "input_filename";
pub const OUTPUT_FILENAME: &str = "output_filename";

const KNOWN_PLACEHOLDERS: [&str; 2] = [INPUT_FILENAME, OUTPUT_FILENAME];

static REGEX_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$?\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("Invalid regex")
});

fn is_shell_expansion(caps: &Captures<'_>) -> bool {
    caps.get(0).is_some_and(|m| m.as_str().starts_with('$'))
}

/// 載入設定時檢查樣板，未知佔位符直接拒絕
pub fn validate_template(template: &str) -> Result<(), PreviewError> {
    for caps in REGEX_PLACEHOLDER.captures_iter(template) {
        if is_shell_expansion(&caps) {
            continue;
        }
        let name = &caps[1];
        if !KNOWN_PLACEHOLDERS.contains(&name) {
            return Err(PreviewError::UnknownPlaceholder {
                template: template.to_string(),
                placeholder: name.to_string(),
            });
        }
    }
    Ok(())
}

/// 代入輸入與輸出路徑，用於通知文字
#[must_use]
pub fn render_template(template: &str, input: &Path, output: &Path) -> String {
    REGEX_PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            if is_shell_expansion(caps) {
                return caps[0].to_string();
            }
            match &caps[1] {
                INPUT_FILENAME => input.display().to_string(),
                OUTPUT_FILENAME => output.display().to_string(),
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quoting {
    Unquoted,
    Single,
    Double,
}

/// 掃過一段 shell 文字後的引號狀態
fn scan_quoting(mut state: Quoting, segment: &str) -> Quoting {
    let mut chars = segment.chars();
    while let Some(c) = chars.next() {
        state = match (state, c) {
            (Quoting::Single, '\'') => Quoting::Unquoted,
            (Quoting::Single, _) => Quoting::Single,
            (_, '\\') => {
                chars.next();
                state
            }
            (Quoting::Unquoted, '\'') => Quoting::Single,
            (Quoting::Unquoted, '"') => Quoting::Double,
            (Quoting::Double, '"') => Quoting::Unquoted,
            (current, _) => current,
        };
    }
    state
}

fn positional(index: u8, state: Quoting) -> String {
    match state {
        Quoting::Unquoted => format!("\"${{{index}}}\""),
        Quoting::Double => format!("${{{index}}}"),
        Quoting::Single => format!("'\"${{{index}}}\"'"),
    }
}

/// 產生給 `sh -c` 的腳本：輸入為 `$1`，輸出為 `$2`
///
/// 依佔位符所在的引號環境加上引號，展開結果永遠是單一字串，不會再被 shell 解析
#[must_use]
pub fn render_shell_script(template: &str) -> String {
    let mut script = String::with_capacity(template.len());
    let mut state = Quoting::Unquoted;
    let mut last = 0;

    for caps in REGEX_PLACEHOLDER.captures_iter(template) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let before = &template[last..whole.start()];
        script.push_str(before);
        state = scan_quoting(state, before);
        last = whole.end();

        let index = match &caps[1] {
            _ if is_shell_expansion(&caps) => None,
            INPUT_FILENAME => Some(1),
            OUTPUT_FILENAME => Some(2),
            _ => None,
        };
        match index {
            Some(index) => script.push_str(&positional(index, state)),
            None => script.push_str(whole.as_str()),
        }
    }

    script.push_str(&template[last..]);
    script
}
