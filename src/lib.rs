//! lead-pr: keep one lead pull request current and merge it when green
//!
//! A small merge-queue emulation for GitHub repositories. Each cycle picks
//! the oldest approved open PR, updates it from its base when it falls
//! behind, and optionally squash-merges it once its checks allow.

pub mod auth;
pub mod config;
pub mod error;
pub mod platform;
pub mod queue;
pub mod types;
