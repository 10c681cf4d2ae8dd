//! The long-lived analyzer front door.
//!
//! An [`Engine`] owns the current configuration, rule set, and parser
//! capability, and spins up one [`AnalysisSession`] per call to
//! [`Engine::analyze`]. Config and rule set live behind [`ArcSwap`] so
//! they can be replaced atomically between runs; a run in flight keeps
//! the snapshot it started with.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::info;

use crate::config::AnalyzerConfig;
use crate::error::AnalyzerError;
use crate::parse::{PlainTextParser, SourceParser};
use crate::results::ResultsTree;
use crate::rules::registry::RuleSet;
use crate::session::AnalysisSession;

pub struct Engine {
    config: ArcSwap<AnalyzerConfig>,
    rules: ArcSwap<RuleSet>,
    parser: Arc<dyn SourceParser>,
}

impl Engine {
    /// An engine with the given config, the built-in rules, and the
    /// plain-text parser.
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config: ArcSwap::from_pointee(config),
            rules: ArcSwap::from_pointee(RuleSet::with_builtin_rules()),
            parser: Arc::new(PlainTextParser),
        }
    }

    /// An engine with default config; callers set directories via
    /// [`Engine::update_config`] before analyzing.
    pub fn with_default_config() -> Self {
        Self::new(AnalyzerConfig::default())
    }

    /// Replace the parser capability.
    pub fn with_parser(mut self, parser: Arc<dyn SourceParser>) -> Self {
        self.parser = parser;
        self
    }

    /// Snapshot of the current configuration.
    pub fn config(&self) -> Arc<AnalyzerConfig> {
        self.config.load_full()
    }

    /// Atomically replace the configuration. Runs already in flight
    /// keep their snapshot.
    pub fn update_config(&self, config: AnalyzerConfig) {
        info!("analyzer configuration updated");
        self.config.store(Arc::new(config));
    }

    /// Snapshot of the current rule set.
    pub fn rules(&self) -> Arc<RuleSet> {
        self.rules.load_full()
    }

    /// Atomically replace the rule set.
    pub fn update_rules(&self, rules: RuleSet) {
        info!(rules = rules.len(), "rule set updated");
        self.rules.store(Arc::new(rules));
    }

    /// Run one analysis over the configured roots.
    pub async fn analyze(&self) -> Result<ResultsTree, AnalyzerError> {
        self.analyze_with_cancel(Arc::new(AtomicBool::new(false)))
            .await
    }

    /// Run one analysis that the caller can abort by setting `cancel`.
    ///
    /// A cancelled run fails with [`AnalyzerError::Cancelled`]; partial
    /// results are discarded.
    pub async fn analyze_with_cancel(
        &self,
        cancel: Arc<AtomicBool>,
    ) -> Result<ResultsTree, AnalyzerError> {
        let config = self.config.load_full();
        let session = AnalysisSession::new(
            (*config).clone(),
            self.rules.load_full(),
            self.parser.clone(),
            cancel,
        );
        session.run().await
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config.load())
            .field("rules", &self.rules.load().len())
            .finish_non_exhaustive()
    }
}
