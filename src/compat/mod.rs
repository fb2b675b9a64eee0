//! Compatibility resolution layer
//!
//! This module answers "which versions of a package can I add next to the
//! packages I already declare?" by asking a remote compatibility service once
//! per (declared package, target) pair and intersecting the answers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Source    │────▶│   Lookup    │◀───▶│    Cache    │
//! │  (fetch)    │     │ (memoize)   │     │  (storage)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │
//!                            ▼
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Resolver   │────▶│ Intersector │────▶│  Selector   │
//! │  (batch)    │     │ (fold sets) │     │(oldest/last)│
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`cache`]: In-memory compatibility cache for a single run
//! - [`error`]: Error types for lookups, cache and batch resolution
//! - [`intersect`]: Lenient intersection of compatible-version sets
//! - [`lookup`]: Cache-memoized remote lookup
//! - [`resolver`]: Batch resolution over many target packages
//! - [`select`]: Oldest/latest range selection by semver precedence
//! - [`source`]: Trait for remote compatibility services
//! - [`sources`]: Concrete service implementations (npmpeer)
//! - [`types`]: Common types like `Package` and `ResolvedTarget`

pub mod cache;
pub mod error;
pub mod intersect;
pub mod lookup;
pub mod resolver;
pub mod select;
pub mod source;
pub mod sources;
pub mod types;
