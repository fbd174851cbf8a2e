pub mod api;
mod app;
pub mod core;
pub mod domain;
