use serde::{Deserialize, Deserializer};
use std::fmt;
use tracing::warn;

use super::Price;
use crate::error::TrackerError;

/// Spending limit for one product. Always finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "f64")]
pub struct Budget(f64);

impl Budget {
    pub fn new(value: f64) -> Result<Self, TrackerError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(TrackerError::Config(format!(
                "budget must be a positive number, got {}",
                value
            )))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Signed percent deviation of `price` from this budget.
    pub fn deviation(self, price: f64) -> f64 {
        ((price - self.0) / self.0) * 100.0
    }
}

impl TryFrom<f64> for Budget {
    type Error = TrackerError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Budget::new(value)
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Decides whether a product shows up in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportPolicy {
    #[default]
    Normal,
    OnLow,
    OnHigh,
    OnChange,
}

impl ReportPolicy {
    pub fn key(&self) -> &'static str {
        match self {
            ReportPolicy::Normal => "normal",
            ReportPolicy::OnLow => "on_low",
            ReportPolicy::OnHigh => "on_high",
            ReportPolicy::OnChange => "on_change",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "normal" => Some(ReportPolicy::Normal),
            "on_low" => Some(ReportPolicy::OnLow),
            "on_high" => Some(ReportPolicy::OnHigh),
            "on_change" => Some(ReportPolicy::OnChange),
            _ => None,
        }
    }

    /// Whether a product with this price passes the gate.
    /// An unavailable price only passes under `Normal`.
    pub fn admits(&self, price: &Price, budget: Budget) -> bool {
        match (self, price.amount()) {
            (ReportPolicy::Normal, _) => true,
            (_, None) => false,
            (ReportPolicy::OnLow, Some(amount)) => (amount as f64) < budget.value(),
            (ReportPolicy::OnHigh, Some(amount)) => (amount as f64) > budget.value(),
            (ReportPolicy::OnChange, Some(amount)) => (amount as f64) != budget.value(),
        }
    }
}

impl fmt::Display for ReportPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl<'de> Deserialize<'de> for ReportPolicy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = Option::<String>::deserialize(deserializer)?;
        Ok(match key {
            None => ReportPolicy::Normal,
            Some(key) => ReportPolicy::from_key(&key).unwrap_or_else(|| {
                warn!("Unknown report policy {:?}, falling back to normal", key);
                ReportPolicy::Normal
            }),
        })
    }
}
