//! Engine facade

use crate::grouping::{self, EvalContext};
use crate::registry;
use crate::sorting;
use crate::{CacheStats, EngineCaches, EngineConfig, EngineError};
use std::sync::Arc;
use tabweave_domain::traits::{Clock, SystemClock};
use tabweave_domain::{CustomStrategy, Partition, StrategyDescriptor, TabSnapshot};
use tracing::debug;

/// Tab classification and partitioning engine
///
/// Holds configuration and the memoization caches; everything else is passed
/// into each call. Calls never fail: malformed rules and URLs degrade to
/// "no match" or sentinel values.
///
/// # Examples
///
/// ```
/// use tabweave_domain::TabSnapshot;
/// use tabweave_engine::TabEngine;
///
/// let engine = TabEngine::with_defaults();
/// let tabs = vec![
///     TabSnapshot::new(1, 1, "G", "https://www.google.com/search"),
///     TabSnapshot::new(2, 1, "GH", "https://github.com/a/b"),
/// ];
/// let partitions = engine.group_tabs(&tabs, &["domain".to_string()], &[]);
/// assert_eq!(partitions.len(), 2);
/// assert_eq!(partitions[0].id, "window-1::domain:google.com");
/// ```
pub struct TabEngine {
    config: EngineConfig,
    caches: Arc<EngineCaches>,
    clock: Box<dyn Clock + Send + Sync>,
}

impl TabEngine {
    /// Create an engine after validating `config`
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let caches = Arc::new(EngineCaches::new(config.cache_capacity));
        Ok(Self {
            config,
            caches,
            clock: Box::new(SystemClock),
        })
    }

    /// Create an engine with default configuration
    pub fn with_defaults() -> Self {
        Self {
            config: EngineConfig::default(),
            caches: Arc::new(EngineCaches::default()),
            clock: Box::new(SystemClock),
        }
    }

    /// Share caches with another engine
    pub fn with_caches(mut self, caches: Arc<EngineCaches>) -> Self {
        self.caches = caches;
        self
    }

    /// Replace the clock used for age buckets
    pub fn with_clock(mut self, clock: impl Clock + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Shared caches
    pub fn caches(&self) -> &Arc<EngineCaches> {
        &self.caches
    }

    /// Cache occupancy
    pub fn cache_stats(&self) -> CacheStats {
        self.caches.stats()
    }

    fn context<'a>(&'a self, custom: &'a [CustomStrategy]) -> EvalContext<'a> {
        EvalContext {
            custom,
            caches: &self.caches,
            palette: &self.config.palette,
            now_ms: self.clock.now_ms(),
        }
    }

    /// Strategy catalog merged with `custom`
    pub fn strategies(&self, custom: &[CustomStrategy]) -> Vec<StrategyDescriptor> {
        registry::resolve(custom)
    }

    /// Partition `tabs` by the grouping-capable ids in `strategy_ids`
    pub fn group_tabs(
        &self,
        tabs: &[TabSnapshot],
        strategy_ids: &[String],
        custom: &[CustomStrategy],
    ) -> Vec<Partition> {
        let partitions = grouping::group_tabs(tabs, strategy_ids, &self.context(custom));
        debug!(
            tabs = tabs.len(),
            partitions = partitions.len(),
            strategies = ?strategy_ids,
            "grouped tabs"
        );
        partitions
    }

    /// Order `tabs`; an empty id list uses the configured default sorting
    pub fn sort_tabs(
        &self,
        tabs: &[TabSnapshot],
        strategy_ids: &[String],
        custom: &[CustomStrategy],
    ) -> Vec<TabSnapshot> {
        let ids = self.effective_sorting(strategy_ids);
        sorting::sort_tabs(tabs, ids, &self.context(custom))
    }

    /// Group, then sort the tabs inside every partition with the same ids
    pub fn calculate_groups(
        &self,
        tabs: &[TabSnapshot],
        strategy_ids: &[String],
        custom: &[CustomStrategy],
    ) -> Vec<Partition> {
        let ctx = self.context(custom);
        let sort_ids = self.effective_sorting(strategy_ids);
        let mut partitions = grouping::group_tabs(tabs, strategy_ids, &ctx);
        for partition in &mut partitions {
            partition.tabs = sorting::sort_tabs(&partition.tabs, sort_ids, &ctx);
        }
        sorting::sort_partitions(&mut partitions, strategy_ids, &ctx);
        partitions
    }

    /// Order partitions with the first requested strategy that sorts groups
    pub fn sort_partitions(
        &self,
        partitions: &mut [Partition],
        strategy_ids: &[String],
        custom: &[CustomStrategy],
    ) {
        sorting::sort_partitions(partitions, strategy_ids, &self.context(custom));
    }

    /// Whether the requested strategies read page-context fields
    pub fn requires_context_analysis(&self, strategy_ids: &[String], custom: &[CustomStrategy]) -> bool {
        registry::requires_context_analysis(strategy_ids, custom)
    }

    fn effective_sorting<'a>(&'a self, strategy_ids: &'a [String]) -> &'a [String] {
        if strategy_ids.is_empty() {
            &self.config.default_sorting
        } else {
            strategy_ids
        }
    }
}

impl Default for TabEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for TabEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabEngine")
            .field("config", &self.config)
            .field("caches", &self.caches.stats())
            .finish_non_exhaustive()
    }
}
