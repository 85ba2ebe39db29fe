use crate::error::{CoreError, ErrorSeverity};

/// Solver tunables.
///
/// The defaults are empirically tuned for the host's standard mazes; they are
/// meant to be re-tuned per environment, not relied upon as exact values.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverConfig {
    /// Discount factor γ, strictly between 0 and 1.
    pub discount: f64,
    /// Value iteration stops once the summed absolute change over all open
    /// cells in one sweep is at most this value. Not normalised by cell count.
    pub epsilon: f64,
    /// Safety valve on the sweep count; hitting it is a configuration error.
    pub sweep_cap: u32,
    /// Weight of the best action against the worst one during value
    /// iteration. `1.0` is the plain Bellman max.
    pub optimism: f64,
    /// Move budget of the predictive threat search.
    pub prediction_budget: u32,
    /// Budget of the straight sightline search around each threat.
    pub sightline_budget: u32,
    /// Neutralization length at which a neutralized adversary is worth the
    /// full `threat_neutralized` reward.
    pub max_neutral_duration: u32,
    /// Open exits at which a threat's next move is treated as unpredictable.
    pub junction_exits: u32,
}

impl SolverConfig {
    pub const DEFAULT_DISCOUNT: f64 = 0.9;
    pub const DEFAULT_EPSILON: f64 = 0.5;
    pub const DEFAULT_SWEEP_CAP: u32 = 10_000;
    pub const DEFAULT_OPTIMISM: f64 = 1.0;
    pub const DEFAULT_PREDICTION_BUDGET: u32 = 4;
    pub const DEFAULT_SIGHTLINE_BUDGET: u32 = 5;
    pub const DEFAULT_MAX_NEUTRAL_DURATION: u32 = 40;
    pub const DEFAULT_JUNCTION_EXITS: u32 = 4;

    pub fn new() -> Self {
        Self {
            discount: Self::DEFAULT_DISCOUNT,
            epsilon: Self::DEFAULT_EPSILON,
            sweep_cap: Self::DEFAULT_SWEEP_CAP,
            optimism: Self::DEFAULT_OPTIMISM,
            prediction_budget: Self::DEFAULT_PREDICTION_BUDGET,
            sightline_budget: Self::DEFAULT_SIGHTLINE_BUDGET,
            max_neutral_duration: Self::DEFAULT_MAX_NEUTRAL_DURATION,
            junction_exits: Self::DEFAULT_JUNCTION_EXITS,
        }
    }

    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = discount;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_optimism(mut self, optimism: f64) -> Self {
        self.optimism = optimism;
        self
    }

    pub fn with_sweep_cap(mut self, sweep_cap: u32) -> Self {
        self.sweep_cap = sweep_cap;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.discount > 0.0 && self.discount < 1.0) {
            return Err(ConfigError::Discount(self.discount));
        }
        if !(self.epsilon > 0.0 && self.epsilon.is_finite()) {
            return Err(ConfigError::Epsilon(self.epsilon));
        }
        if !(0.0..=1.0).contains(&self.optimism) {
            return Err(ConfigError::Optimism(self.optimism));
        }
        if self.sweep_cap == 0 {
            return Err(ConfigError::SweepCap);
        }
        if self.max_neutral_duration == 0 {
            return Err(ConfigError::NeutralDuration);
        }
        Ok(())
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("discount factor must lie strictly between 0 and 1, got {0}")]
    Discount(f64),

    #[error("convergence threshold must be positive and finite, got {0}")]
    Epsilon(f64),

    #[error("optimism must lie in [0, 1], got {0}")]
    Optimism(f64),

    #[error("sweep cap must be at least 1")]
    SweepCap,

    #[error("maximum neutralization duration must be at least 1")]
    NeutralDuration,
}

impl CoreError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Discount(_) => "CONFIG_DISCOUNT",
            Self::Epsilon(_) => "CONFIG_EPSILON",
            Self::Optimism(_) => "CONFIG_OPTIMISM",
            Self::SweepCap => "CONFIG_SWEEP_CAP",
            Self::NeutralDuration => "CONFIG_NEUTRAL_DURATION",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(SolverConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_out_of_range_values() {
        let base = SolverConfig::default();
        assert_eq!(
            base.clone().with_discount(1.0).validate(),
            Err(ConfigError::Discount(1.0))
        );
        assert_eq!(
            base.clone().with_epsilon(0.0).validate(),
            Err(ConfigError::Epsilon(0.0))
        );
        assert_eq!(
            base.clone().with_optimism(1.5).validate(),
            Err(ConfigError::Optimism(1.5))
        );
        assert_eq!(base.with_sweep_cap(0).validate(), Err(ConfigError::SweepCap));
    }
}
