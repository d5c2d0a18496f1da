//! Configuration for a ritual session.

use std::time::Duration;

use arcana_core::CutMargin;

/// Configuration for a ritual session.
#[derive(Debug, Clone)]
pub struct RitualConfig {
    /// RNG seed for reproducible rituals; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Margin rule for the cut.
    pub cut_margin: CutMargin,
    /// Pause between starting the ritual and the shuffle settling.
    pub shuffle_delay: Duration,
    /// Pause between cutting and the spread being laid.
    pub cut_delay: Duration,
}

impl Default for RitualConfig {
    fn default() -> Self {
        Self {
            seed: None,
            cut_margin: CutMargin::default(),
            shuffle_delay: Duration::from_millis(700),
            cut_delay: Duration::from_millis(500),
        }
    }
}

impl RitualConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the cut margin rule.
    pub fn with_cut_margin(mut self, margin: CutMargin) -> Self {
        self.cut_margin = margin;
        self
    }

    /// Skip the shuffle and cut pauses.
    pub fn without_delays(mut self) -> Self {
        self.shuffle_delay = Duration::ZERO;
        self.cut_delay = Duration::ZERO;
        self
    }
}
