pub mod commands;
pub mod config;
pub mod error;
pub mod http;
pub mod listing;
pub mod package;
pub mod repository;
pub mod runtime;
