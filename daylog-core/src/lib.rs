#![doc = "daylog-core: core logic library for daylog."]

//! This crate contains the contract types, local log-file resolution and the
//! publish pipeline for daylog. Transport code (the real hub client) lives in
//! the CLI crate; everything here is mockable and network-free.
//!
//! # Usage
//! Add this as a dependency for shared pipeline, resolution and config code.

pub mod config;
pub mod contract;
pub mod logfile;
pub mod publish;
