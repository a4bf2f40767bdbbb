//! Feed Digest - a static RSS/Atom aggregator
//!
//! This crate fetches a configured list of feeds, keeps the newest entry
//! from each, and writes the collection as a single JSON document for a
//! static site to render.

pub mod config;
pub mod fetcher;
pub mod normalize;
pub mod output;
