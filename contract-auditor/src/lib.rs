//! Terminal client for a remote smart-contract analysis service
//!
//! The binary offers one-shot CLI commands and an interactive terminal UI;
//! both sit on top of [`context::AuditorContext`], which wires the analysis
//! client, local storage and the snippet store together.

pub mod app;
pub mod auth;
pub mod cli;
pub mod compare;
pub mod config;
pub mod context;
pub mod export;
pub mod history;
pub mod snippets;
pub mod storage;
pub mod tui;
pub mod ui;
pub mod utils;
