pub mod config;
pub mod logging;

pub mod archive;
pub mod checksum;
pub mod control;
pub mod downloader;
pub mod retry;
pub mod scheduler;
pub mod storage;
pub mod transport;
pub mod url_model;
