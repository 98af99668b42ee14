//! Correspondence session management module
//!
//! This module contains:
//! - Session state (the workspace and its two viewport panes)
//! - Message types for session interactions
//! - Message handlers

pub mod handlers;
pub mod messages;
pub mod state;
