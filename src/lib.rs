pub mod api;
pub mod commands;
pub mod downloader;
pub mod models;
pub mod resolver;
pub mod utils;
