//! Status snapshot domain model.
//!
//! A `StatusSnapshot` is the decoded result of one `GetUserStatus`
//! call. It is immutable once built and exists only for the tick that
//! fetched it; display fallbacks for missing fields are applied at
//! render time, not here.

use serde::{Deserialize, Serialize};

/// An aggregate credit pool (prompt or flow credits).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CreditPool {
    /// Credits still available this period.
    pub available: u64,

    /// Monthly allowance. Zero means the plan reports no limit info.
    pub monthly: u64,
}

impl CreditPool {
    /// Creates a new credit pool.
    pub const fn new(available: u64, monthly: u64) -> Self {
        Self { available, monthly }
    }

    /// Returns the remaining percentage (0.0 - 100.0).
    ///
    /// Returns `None` when the monthly allowance is zero, which the
    /// renderer shows as a "(No limit info)" line instead of a bar.
    pub fn percentage(&self) -> Option<f64> {
        if self.monthly == 0 {
            return None;
        }
        Some((self.available as f64 / self.monthly as f64) * 100.0)
    }
}

/// Per-model quota entry from the status payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelQuota {
    /// Display label. Missing labels render as "Unknown".
    pub label: Option<String>,

    /// Whether the server marks this model as recommended.
    ///
    /// Recommended models sort ahead of all others in the table.
    pub is_recommended: bool,

    /// Fraction of the quota remaining (0.0 - 1.0).
    pub remaining_fraction: f64,

    /// Quota reset instant as an opaque ISO-8601 string.
    ///
    /// Kept raw until render time: an unparseable value is displayed
    /// verbatim rather than dropped.
    pub reset_time: Option<String>,
}

impl ModelQuota {
    /// Returns the remaining quota as a percentage (0.0 - 100.0).
    pub fn percent_remaining(&self) -> f64 {
        self.remaining_fraction * 100.0
    }

    /// Sort key for the model table: recommended entries first, then
    /// ascending label (missing labels sort as empty).
    fn sort_key(&self) -> (bool, &str) {
        (!self.is_recommended, self.label.as_deref().unwrap_or(""))
    }
}

/// One decoded `GetUserStatus` response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// Account display name.
    pub account_name: Option<String>,

    /// Account email address.
    pub account_email: Option<String>,

    /// Plan name (e.g. "Pro"). Missing renders as "Free".
    pub plan_name: Option<String>,

    /// User tier name. Missing renders as "Unknown".
    pub tier_name: Option<String>,

    /// Aggregate prompt credits.
    pub prompt_credits: CreditPool,

    /// Aggregate flow credits. Omitted from the dashboard entirely
    /// when the monthly allowance is zero.
    pub flow_credits: CreditPool,

    /// Per-model quotas in payload order.
    pub models: Vec<ModelQuota>,
}

impl StatusSnapshot {
    /// Returns model entries in display order.
    ///
    /// Stable sort: recommended models first regardless of label, then
    /// ascending label within each group. Payload order is preserved
    /// for equal keys.
    pub fn models_sorted(&self) -> Vec<&ModelQuota> {
        let mut models: Vec<&ModelQuota> = self.models.iter().collect();
        models.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        models
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(label: &str, recommended: bool) -> ModelQuota {
        ModelQuota {
            label: Some(label.to_string()),
            is_recommended: recommended,
            remaining_fraction: 0.5,
            reset_time: None,
        }
    }

    #[test]
    fn test_credit_pool_percentage() {
        let pool = CreditPool::new(250, 1_000);
        assert_eq!(pool.percentage(), Some(25.0));
    }

    #[test]
    fn test_credit_pool_no_limit() {
        // Zero monthly allowance means "no limit info", not 0%
        let pool = CreditPool::new(500, 0);
        assert_eq!(pool.percentage(), None);
    }

    #[test]
    fn test_model_percent_remaining() {
        let quota = ModelQuota {
            remaining_fraction: 0.753,
            ..Default::default()
        };
        assert!((quota.percent_remaining() - 75.3).abs() < 1e-9);
    }

    #[test]
    fn test_models_sorted_recommended_first() {
        let snapshot = StatusSnapshot {
            models: vec![
                model("Zulu", false),
                model("Yankee", true),
                model("Alpha", false),
            ],
            ..Default::default()
        };

        let sorted = snapshot.models_sorted();
        let labels: Vec<&str> = sorted.iter().filter_map(|m| m.label.as_deref()).collect();
        // Recommended sorts before everything, even "Alpha"
        assert_eq!(labels, vec!["Yankee", "Alpha", "Zulu"]);
    }

    #[test]
    fn test_models_sorted_ascending_within_group() {
        let snapshot = StatusSnapshot {
            models: vec![
                model("Charlie", true),
                model("Bravo", true),
                model("Delta", false),
                model("Alpha", false),
            ],
            ..Default::default()
        };

        let sorted = snapshot.models_sorted();
        let labels: Vec<&str> = sorted.iter().filter_map(|m| m.label.as_deref()).collect();
        assert_eq!(labels, vec!["Bravo", "Charlie", "Alpha", "Delta"]);
    }

    #[test]
    fn test_models_sorted_stable_for_equal_keys() {
        let mut first = model("Same", false);
        first.remaining_fraction = 0.1;
        let mut second = model("Same", false);
        second.remaining_fraction = 0.9;

        let snapshot = StatusSnapshot {
            models: vec![first, second],
            ..Default::default()
        };

        let sorted = snapshot.models_sorted();
        // Payload order preserved for identical sort keys
        assert!((sorted[0].remaining_fraction - 0.1).abs() < 1e-9);
        assert!((sorted[1].remaining_fraction - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_models_sorted_missing_label_sorts_first_in_group() {
        let snapshot = StatusSnapshot {
            models: vec![
                model("Alpha", false),
                ModelQuota::default(), // no label, not recommended
            ],
            ..Default::default()
        };

        let sorted = snapshot.models_sorted();
        assert!(sorted[0].label.is_none());
        assert_eq!(sorted[1].label.as_deref(), Some("Alpha"));
    }
}
