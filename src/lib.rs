pub mod cli;
pub mod component;
pub mod config;
pub mod error;
pub mod init;
pub mod tools;

#[cfg(test)]
mod test_utils;

pub use error::PreviewError;
