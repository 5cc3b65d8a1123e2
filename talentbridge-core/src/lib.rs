//! Core types and utilities for the TalentBridge chat client
//!
//! This crate provides the chat domain types, the capability check that gates
//! the widget, notifications, configuration and logging used by the other
//! TalentBridge crates.

pub mod auth;
pub mod chat;
pub mod config;
pub mod error;
pub mod locale;
pub mod logging;
pub mod notify;
pub mod utils;

pub use error::{Error, Result};
