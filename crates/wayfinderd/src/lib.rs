//! Wayfinder daemon library - exposes modules for testing.

pub mod audit;
pub mod config;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod workbook;
