//! HTTP request handlers

pub mod health;
pub mod measurements;
pub mod weather;
