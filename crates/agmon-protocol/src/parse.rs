//! Tolerant decode of the `GetUserStatus` response JSON.
//!
//! Every field is optional: the server omits sections freely (no plan
//! info on free tiers, no quota info on unlimited models), and a
//! payload missing `userStatus` entirely still decodes to an empty
//! snapshot. Unknown fields are ignored. Display fallbacks are the
//! renderer's concern, not the decoder's.

use agmon_core::{CreditPool, ModelQuota, StatusSnapshot};
use serde::Deserialize;

/// Raw top-level response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStatusResponse {
    #[serde(default)]
    pub user_status: Option<RawUserStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUserStatus {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_tier: Option<RawUserTier>,
    #[serde(default)]
    pub plan_status: Option<RawPlanStatus>,
    #[serde(default)]
    pub cascade_model_config_data: Option<RawModelConfigData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUserTier {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlanStatus {
    /// Credit counts arrive as JSON numbers, occasionally fractional.
    #[serde(default)]
    pub available_prompt_credits: Option<f64>,
    #[serde(default)]
    pub available_flow_credits: Option<f64>,
    #[serde(default)]
    pub plan_info: Option<RawPlanInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlanInfo {
    #[serde(default)]
    pub plan_name: Option<String>,
    #[serde(default)]
    pub monthly_prompt_credits: Option<f64>,
    #[serde(default)]
    pub monthly_flow_credits: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawModelConfigData {
    #[serde(default)]
    pub client_model_configs: Vec<RawModelConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawModelConfig {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub is_recommended: Option<bool>,
    #[serde(default)]
    pub quota_info: Option<RawQuotaInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuotaInfo {
    #[serde(default)]
    pub remaining_fraction: Option<f64>,
    #[serde(default)]
    pub reset_time: Option<String>,
}

fn as_count(value: Option<f64>) -> u64 {
    value.map(|v| v.max(0.0) as u64).unwrap_or(0)
}

impl RawStatusResponse {
    /// Converts the raw payload into the domain snapshot.
    ///
    /// Never fails: absent sections collapse to defaults (empty model
    /// list, zero credit pools, `None` account fields).
    pub fn to_snapshot(&self) -> StatusSnapshot {
        let user = self.user_status.as_ref();
        let plan_status = user.and_then(|u| u.plan_status.as_ref());
        let plan_info = plan_status.and_then(|p| p.plan_info.as_ref());

        let models = user
            .and_then(|u| u.cascade_model_config_data.as_ref())
            .map(|data| {
                data.client_model_configs
                    .iter()
                    .map(|config| {
                        let quota = config.quota_info.as_ref();
                        ModelQuota {
                            label: config.label.clone(),
                            is_recommended: config.is_recommended.unwrap_or(false),
                            remaining_fraction: quota
                                .and_then(|q| q.remaining_fraction)
                                .unwrap_or(0.0),
                            reset_time: quota.and_then(|q| q.reset_time.clone()),
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        StatusSnapshot {
            account_name: user.and_then(|u| u.name.clone()),
            account_email: user.and_then(|u| u.email.clone()),
            plan_name: plan_info.and_then(|p| p.plan_name.clone()),
            tier_name: user
                .and_then(|u| u.user_tier.as_ref())
                .and_then(|t| t.name.clone()),
            prompt_credits: CreditPool::new(
                as_count(plan_status.and_then(|p| p.available_prompt_credits)),
                as_count(plan_info.and_then(|p| p.monthly_prompt_credits)),
            ),
            flow_credits: CreditPool::new(
                as_count(plan_status.and_then(|p| p.available_flow_credits)),
                as_count(plan_info.and_then(|p| p.monthly_flow_credits)),
            ),
            models,
        }
    }
}
