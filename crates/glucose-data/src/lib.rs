//! Storage and aggregation layer for the glucose log.
//!
//! Appends readings to and loads them from the CSV record store, computes
//! monthly summaries and derives health advice from them.

pub mod advice;
pub mod aggregator;
pub mod store;

pub use glucose_core as core;
