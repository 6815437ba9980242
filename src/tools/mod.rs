mod command_runner;
mod ffprobe_info;
mod path_validator;
mod template;
mod unit_format;

pub use command_runner::{CommandRunner, SystemRunner, shell_command};
pub use ffprobe_info::{MediaInfo, get_media_info, parse_ffprobe_output};
pub use path_validator::{ensure_directory_exists, validate_file_exists};
pub use template::{
    INPUT_FILENAME, OUTPUT_FILENAME, render_shell_script, render_template, validate_template,
};
pub use unit_format::{format_duration, format_size};
