//! Runbook: task-driven prompt assembly and patch extraction.
//!
//! A task is a markdown file with YAML front matter, found under `tasks/` in a
//! repository or a shared context tree. Running it resolves its required
//! environment variables and declared reference files, assembles a system and
//! a user prompt, sends them to a completion backend, and splits the reply
//! into a commit message and a unified diff.

pub mod backend;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod diff;
pub mod error;
pub mod executor;
pub mod exit_codes;
pub mod logging;
pub mod prompt;
pub mod repo;
pub mod response;
pub mod task;
pub mod template;
