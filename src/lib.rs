//! Browser client for the Edu2Job career prediction service.
//!
//! Pure logic (parsing, guarding, aggregation, export) lives in modules that
//! build and test natively; the Leptos components in `components` and
//! `pages` bind it to the DOM.

pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod download;
pub mod error;
pub mod guard;
pub mod insights;
pub mod logging;
pub mod models;
pub mod pages;
pub mod prediction;
pub mod session;
pub mod tasks;
