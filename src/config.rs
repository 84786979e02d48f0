//! Encoder configuration.

use serde::{Deserialize, Serialize};

/// Options controlling how a job shop is encoded.
///
/// # Example
/// ```
/// use u_jsp_csp::EncoderConfig;
///
/// let config = EncoderConfig::default().with_horizon(7).with_parallel(true);
/// assert!(config.eliminate_slack);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Last time slot considered. `None` = sum of all operation durations.
    pub horizon: Option<i64>,
    /// Prune start times that cannot lead to a feasible job chain.
    ///
    /// When disabled, every operation may start at any slot `1..=horizon`.
    pub eliminate_slack: bool,
    /// Generate machine-capacity pairs for each machine on the rayon pool.
    pub parallel: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            horizon: None,
            eliminate_slack: true,
            parallel: false,
        }
    }
}

impl EncoderConfig {
    /// Sets an explicit horizon.
    pub fn with_horizon(mut self, horizon: i64) -> Self {
        self.horizon = Some(horizon);
        self
    }

    /// Enables or disables slack elimination.
    pub fn with_slack_elimination(mut self, enabled: bool) -> Self {
        self.eliminate_slack = enabled;
        self
    }

    /// Enables or disables the parallel capacity pass.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
