//! `AgenticVoice` Server
//!
//! Admin backend for the AgenticVoice voice-AI platform: authentication,
//! user management, role changes, and audit logging.

pub mod admin;
pub mod api;
pub mod auth;
pub mod config;
pub mod db;
