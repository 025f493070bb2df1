//! Recent Sidebar: a persisted "recently viewed products" store and the
//! slide-out panel that lists it.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod app;
pub mod database;
pub mod managers;
pub mod platform;
pub mod services;
pub mod storage;
pub mod types;
pub mod ui;
