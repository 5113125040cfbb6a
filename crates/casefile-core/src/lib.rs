//! Core types and trait definitions for the casefile cross-reference engine.
//!
//! This crate is deliberately free of HTTP and database dependencies. It
//! holds the data contracts shared by every other crate, the two read
//! interfaces the engine consumes, and the pure matching primitives.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod case;
pub mod history;
pub mod identity;
pub mod index;
pub mod memory;
pub mod person;
pub mod source;
