//! Redpen Core Library
//!
//! This crate provides the engine behind redpen, a workflow tracker that
//! steps a developer through a curated library of audit prompts and records
//! completion per git branch.
//!
//! # Key Features
//!
//! - **Prompt Catalog**: Scan the on-disk prompt tree (or an in-memory fake)
//!   behind a small trait
//! - **Run-Order Builder**: Deterministic prompt ordering from a project's
//!   platform/stack configuration
//! - **Progress Store**: Durable branch-scoped completion, skip, and undo
//!   tracking
//! - **Identifier Resolver**: Map a position, name, or partial string onto a
//!   prompt in the current order
//! - **Configuration Store**: Per-project stack selection plus manifest-based
//!   auto-detection
//!
//! # Examples
//!
//! Building a run order and resolving a user token against it:
//!
//! ```
//! use redpen_core::catalog::MemoryCatalog;
//! use redpen_core::config::Config;
//! use redpen_core::resolve::resolve_prompt;
//! use redpen_core::run_order::build_run_order;
//!
//! let mut catalog = MemoryCatalog::new();
//! catalog.insert("core/security/code-analysis.txt", "Audit the code for...");
//!
//! let order = build_run_order(&catalog, &Config::default());
//! assert_eq!(
//!     resolve_prompt("code-analysis", &order),
//!     Some("core/security/code-analysis.txt")
//! );
//! ```

pub mod catalog;
pub mod config;
pub mod context;
pub mod error;
pub mod progress;
pub mod resolve;
pub mod run_order;
pub mod vcs;
