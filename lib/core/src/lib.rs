pub mod cache;
pub mod comment;
pub mod config;
pub mod constants;
pub mod geometry;
pub mod reply;
pub mod service;
pub mod state;
pub mod thread;
