use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::category::normalize_label;

/// Organizer record fed to [`score_organizer`](super::score_organizer).
///
/// Every field has a default, so a partially populated record is still scorable.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrganizerRiskInput {
    pub organiser_category: String,
    pub years_of_operation: f64,
    pub has_valid_license: bool,
    pub group_size: f64,
    pub monthly_contribution: f64,
    pub location_risk_score: f64,
    pub past_default_rate: f64,
    pub complaint_count: f64,
    pub verification_status: String,
}

impl Default for OrganizerRiskInput {
    fn default() -> Self {
        Self {
            organiser_category: "new".to_string(),
            years_of_operation: 0.0,
            has_valid_license: false,
            group_size: 0.0,
            monthly_contribution: 0.0,
            location_risk_score: 50.0,
            past_default_rate: 0.0,
            complaint_count: 0.0,
            verification_status: "pending".to_string(),
        }
    }
}

impl OrganizerRiskInput {
    /// Build an input from arbitrary JSON, defaulting each field independently.
    ///
    /// Anything that is not an object yields the all-default record.
    pub fn from_value(value: &Value) -> Self {
        let defaults = Self::default();
        let Some(obj) = value.as_object() else {
            return defaults;
        };

        Self {
            organiser_category: label_field(obj, "organiserCategory")
                .unwrap_or(defaults.organiser_category),
            years_of_operation: number_field(obj, "yearsOfOperation")
                .unwrap_or(defaults.years_of_operation),
            has_valid_license: bool_field(obj, "hasValidLicense")
                .unwrap_or(defaults.has_valid_license),
            group_size: number_field(obj, "groupSize").unwrap_or(defaults.group_size),
            monthly_contribution: number_field(obj, "monthlyContribution")
                .unwrap_or(defaults.monthly_contribution),
            location_risk_score: number_field(obj, "locationRiskScore")
                .unwrap_or(defaults.location_risk_score),
            past_default_rate: number_field(obj, "pastDefaultRate")
                .unwrap_or(defaults.past_default_rate),
            complaint_count: number_field(obj, "complaintCount")
                .unwrap_or(defaults.complaint_count),
            verification_status: label_field(obj, "verificationStatus")
                .unwrap_or(defaults.verification_status),
        }
    }
}

/// Group record fed to [`score_group`](super::score_group).
///
/// `group_name`, `city` and `state` are descriptive only and never affect the score.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupRiskInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub group_size: f64,
    pub monthly_contribution: f64,
    pub organizer_risk_score: f64,
    pub default_rate: f64,
    pub complaint_count: f64,
    pub location_risk_score: f64,
    pub escrow_enabled: bool,
    pub verified_members_pct: f64,
}

impl Default for GroupRiskInput {
    fn default() -> Self {
        Self {
            group_name: None,
            city: None,
            state: None,
            group_size: 0.0,
            monthly_contribution: 0.0,
            organizer_risk_score: 50.0,
            default_rate: 0.0,
            complaint_count: 0.0,
            location_risk_score: 50.0,
            escrow_enabled: true,
            verified_members_pct: 0.0,
        }
    }
}

impl GroupRiskInput {
    /// Build an input from arbitrary JSON, defaulting each field independently.
    pub fn from_value(value: &Value) -> Self {
        let defaults = Self::default();
        let Some(obj) = value.as_object() else {
            return defaults;
        };

        Self {
            group_name: text_field(obj, "groupName"),
            city: text_field(obj, "city"),
            state: text_field(obj, "state"),
            group_size: number_field(obj, "groupSize").unwrap_or(defaults.group_size),
            monthly_contribution: number_field(obj, "monthlyContribution")
                .unwrap_or(defaults.monthly_contribution),
            organizer_risk_score: number_field(obj, "organizerRiskScore")
                .unwrap_or(defaults.organizer_risk_score),
            default_rate: number_field(obj, "defaultRate").unwrap_or(defaults.default_rate),
            complaint_count: number_field(obj, "complaintCount")
                .unwrap_or(defaults.complaint_count),
            location_risk_score: number_field(obj, "locationRiskScore")
                .unwrap_or(defaults.location_risk_score),
            escrow_enabled: bool_field(obj, "escrowEnabled").unwrap_or(defaults.escrow_enabled),
            verified_members_pct: number_field(obj, "verifiedMembersPct")
                .unwrap_or(defaults.verified_members_pct),
        }
    }
}

/// Numbers and numeric strings; `None` for anything else, including NaN and infinities.
fn number_field(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    let parsed = match obj.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn bool_field(obj: &Map<String, Value>, key: &str) -> Option<bool> {
    match obj.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|v| v != 0.0),
        Value::String(s) => match normalize_label(s).as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn label_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)?.as_str().map(normalize_label)
}

fn text_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)?.as_str().map(str::to_string)
}
