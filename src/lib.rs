//! Core library for the roster-tools command line application.
//!
//! The library merges two participant spreadsheets into one. IO adapters
//! live under [`roster::tools::io`], the table representation inside
//! [`roster::tools::model`], column reconciliation and merging in
//! [`roster::tools::reconcile`], field cleaning in [`roster::tools::clean`],
//! and the phase-by-phase orchestration under [`roster::tools::pipeline`].

pub mod roster;

pub use roster::tools::{
    Result, ToolError, clean, config, error, io, model, pipeline, reconcile,
};
