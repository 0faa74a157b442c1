//! Write Transaction Integration Suite
//!
//! End-to-end coverage of the transactional write subsystem against the
//! in-memory reference store:
//! - `scenarios`: the canonical create/save/destroy/delete-by-key flows
//! - `atomicity`: all-or-nothing semantics, rollback hooks, abort exclusion
//! - `hooks`: lifecycle pipelines, validators, timestamps
//!
//! Run with `cargo test --test write_transactions`.

mod common;

mod atomicity;
mod scenarios;
