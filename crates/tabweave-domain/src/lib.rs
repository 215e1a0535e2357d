//! Tabweave Domain Layer
//!
//! This crate contains the data model shared by the tab classification engine
//! and its hosts. It carries no behaviour beyond simple accessors: the engine
//! crate interprets these types, the host crates produce and consume them.
//!
//! ## Key Concepts
//!
//! - **Tab snapshot**: an immutable record of one open browser tab
//! - **Strategy**: a named rule set usable for grouping and/or sorting tabs
//! - **Custom strategy**: a user-defined strategy built from filters, grouping
//!   rules, sorting rules or legacy first-match rules
//! - **Partition**: an output bucket of tabs sharing a composite grouping key
//! - **Window mode**: the scope of a partition (`current`, `new`, `compound`)
//!
//! ## Architecture
//!
//! - Only `serde`/`serde_json` as dependencies (snapshots and strategies are
//!   persisted JSON, `contextData` is free-form)
//! - Trait definitions for every external collaborator live in [`traits`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod partition;
pub mod strategy;
pub mod tab;
pub mod traits;

// Re-exports for convenience
pub use partition::Partition;
pub use strategy::{
    CustomStrategy, GroupingRule, Operator, RuleCondition, RuleSource, SortOrder, SortingRule,
    StrategyDescriptor, StrategyRule, Transform, WindowMode,
};
pub use tab::TabSnapshot;
