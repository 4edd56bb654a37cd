use crate::config::Config;
use std::collections::BTreeMap;

/// Position → hourly wage, with a fallback for unknown positions.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    rates: BTreeMap<String, f64>,
    default_rate: f64,
}

impl RateTable {
    pub fn new(rates: BTreeMap<String, f64>, default_rate: f64) -> Self {
        let rates = rates
            .into_iter()
            .map(|(k, v)| (k.trim().to_string(), v))
            .collect();
        Self {
            rates,
            default_rate,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.positions.clone(), cfg.default_rate)
    }

    /// Hourly rate for `position`; the default rate when it is empty or unknown.
    pub fn rate_for(&self, position: &str) -> f64 {
        let key = position.trim();
        if key.is_empty() {
            return self.default_rate;
        }
        self.rates.get(key).copied().unwrap_or(self.default_rate)
    }

    pub fn default_rate(&self) -> f64 {
        self.default_rate
    }

    /// Entries ordered by rate, highest first (ties by name).
    pub fn entries(&self) -> Vec<(&str, f64)> {
        let mut out: Vec<(&str, f64)> = self.rates.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        out.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        out
    }
}
