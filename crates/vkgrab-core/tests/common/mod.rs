#![allow(dead_code)]

pub mod archive;
pub mod fake_transport;
pub mod http_server;
