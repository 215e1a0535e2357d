//! Tabweave Engine
//!
//! Declarative tab classification and partitioning.
//!
//! The engine provides:
//! - A strategy registry merging built-ins with user-defined strategies
//! - Field extraction, predicates and string transforms
//! - Grouping of tabs into labelled, colored partitions
//! - A deterministic multi-strategy tab ordering
//!
//! All state besides configuration lives in [`EngineCaches`], which can be
//! shared between engines through an `Arc`.
//!
//! # Examples
//!
//! ```
//! use tabweave_domain::{CustomStrategy, Operator, StrategyRule, TabSnapshot};
//! use tabweave_engine::TabEngine;
//!
//! let mut social = CustomStrategy::new("social", "Social");
//! social.rules = vec![StrategyRule {
//!     field: "url".to_string(),
//!     operator: Operator::Contains,
//!     value: "twitter".to_string(),
//!     result: "Social".to_string(),
//! }];
//!
//! let engine = TabEngine::with_defaults();
//! let tabs = vec![TabSnapshot::new(1, 1, "Home", "https://twitter.com/home")];
//! let partitions = engine.group_tabs(&tabs, &["social".to_string()], &[social]);
//! assert_eq!(partitions[0].label, "Social");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builtin;
pub mod cache;
pub mod color;
mod config;
mod engine;
mod error;
pub mod fields;
pub mod grouping;
pub mod labels;
pub mod predicate;
pub mod registry;
pub mod sorting;
pub mod transform;

pub use builtin::{BuiltinStrategy, StrategyKind};
pub use cache::{CacheStats, EngineCaches};
pub use config::{EngineConfig, DEFAULT_CACHE_CAPACITY};
pub use engine::TabEngine;
pub use error::EngineError;
