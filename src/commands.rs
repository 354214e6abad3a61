pub mod build;
pub mod clean;
pub mod components;
pub mod init;
