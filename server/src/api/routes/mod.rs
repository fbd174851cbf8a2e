//! API route handlers

pub mod effort;
pub mod health;
