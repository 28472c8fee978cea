//! Valuation configuration.
//!
//! Loaded from TOML or JSON. Every field has a default, so an empty
//! document is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::error::{PeriodError, PeriodResult};
use crate::metrics::LossQuadratureScheme;

// =============================================================================
// VALUATION CONFIGURATION
// =============================================================================

/// Settings consulted by period valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationConfig {
    /// Calendar days between a default event and the recovery payment.
    #[serde(default = "default_payment_lag_days")]
    pub default_payment_lag_days: u32,

    /// Flat recovery used instead of the credit curve's effective recovery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_override: Option<f64>,

    /// Prefer a stored fixing when the fixing date is on or before the
    /// value date.
    #[serde(default = "default_fixing_lookback")]
    pub fixing_lookback: bool,

    /// How credit-contingent periods are split for loss integration.
    #[serde(default)]
    pub loss_quadrature: LossQuadratureScheme,
}

fn default_payment_lag_days() -> u32 {
    0
}

fn default_fixing_lookback() -> bool {
    true
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            default_payment_lag_days: default_payment_lag_days(),
            recovery_override: None,
            fixing_lookback: default_fixing_lookback(),
            loss_quadrature: LossQuadratureScheme::default(),
        }
    }
}

impl ValuationConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::InvalidConfig` if the document does not parse
    /// or fails validation.
    pub fn from_toml_str(s: &str) -> PeriodResult<Self> {
        let config: Self =
            toml::from_str(s).map_err(|e| PeriodError::invalid_config("toml", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::InvalidConfig` if the document does not parse
    /// or fails validation.
    pub fn from_json_str(s: &str) -> PeriodResult<Self> {
        let config: Self = serde_json::from_str(s)
            .map_err(|e| PeriodError::invalid_config("json", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes to TOML.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::InvalidConfig` if serialization fails.
    pub fn to_toml_string(&self) -> PeriodResult<String> {
        toml::to_string(self).map_err(|e| PeriodError::invalid_config("toml", e.to_string()))
    }

    /// Sets the loss quadrature scheme.
    #[must_use]
    pub fn with_loss_quadrature(mut self, scheme: LossQuadratureScheme) -> Self {
        self.loss_quadrature = scheme;
        self
    }

    /// Sets the default payment lag.
    #[must_use]
    pub fn with_default_payment_lag_days(mut self, days: u32) -> Self {
        self.default_payment_lag_days = days;
        self
    }

    /// Sets a flat recovery override.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::InvalidConfig` unless `recovery` is a finite
    /// value in `[0, 1]`.
    pub fn with_recovery_override(mut self, recovery: f64) -> PeriodResult<Self> {
        self.recovery_override = Some(recovery);
        self.validate()?;
        Ok(self)
    }

    /// Sets whether stored fixings are preferred for past fixing dates.
    #[must_use]
    pub fn with_fixing_lookback(mut self, lookback: bool) -> Self {
        self.fixing_lookback = lookback;
        self
    }

    /// Checks field ranges.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> PeriodResult<()> {
        match self.loss_quadrature {
            LossQuadratureScheme::DayStep { days: 0 } => {
                return Err(PeriodError::invalid_config(
                    "loss_quadrature.days",
                    "step must be positive",
                ));
            }
            LossQuadratureScheme::PeriodUnit { count: 0 } => {
                return Err(PeriodError::invalid_config(
                    "loss_quadrature.count",
                    "count must be positive",
                ));
            }
            _ => {}
        }

        if let Some(recovery) = self.recovery_override {
            if !recovery.is_finite() || !(0.0..=1.0).contains(&recovery) {
                return Err(PeriodError::invalid_config(
                    "recovery_override",
                    format!("{recovery} is not in [0, 1]"),
                ));
            }
        }

        Ok(())
    }
}
