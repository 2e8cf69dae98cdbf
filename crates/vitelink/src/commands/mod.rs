//! CLI command implementations.

pub mod asset;
pub mod build;
pub mod init;
pub mod render;
