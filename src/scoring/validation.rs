use serde::Deserialize;

use super::category::{normalize_label, KNOWN_CATEGORIES, KNOWN_VERIFICATION_STATUSES};
use super::input::OrganizerRiskInput;

/// Organizer record as received by the strict API.
///
/// Every field is required; types are enforced during deserialization and
/// ranges by [`validate_organizer_request`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizerRiskRequest {
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

/// Validate a strict organizer request and convert it into a scorer input.
/// Returns all validation errors at once (not just the first).
pub fn validate_organizer_request(
    request: &OrganizerRiskRequest,
) -> Result<OrganizerRiskInput, Vec<String>> {
    let mut errors = Vec::new();

    let category = normalize_label(&request.organiser_category);
    if !KNOWN_CATEGORIES.contains(&category.as_str()) {
        errors.push(format!(
            "organiserCategory: '{}' is not one of {}",
            request.organiser_category,
            KNOWN_CATEGORIES.join(", ")
        ));
    }

    check_integer(
        &mut errors,
        "yearsOfOperation",
        request.years_of_operation,
        Some(100.0),
    );
    check_integer(&mut errors, "groupSize", request.group_size, Some(100_000.0));
    check_range(
        &mut errors,
        "monthlyContribution",
        request.monthly_contribution,
        None,
    );
    check_range(
        &mut errors,
        "locationRiskScore",
        request.location_risk_score,
        Some(100.0),
    );
    check_range(
        &mut errors,
        "pastDefaultRate",
        request.past_default_rate,
        Some(100.0),
    );
    check_integer(&mut errors, "complaintCount", request.complaint_count, None);

    let verification = normalize_label(&request.verification_status);
    if !KNOWN_VERIFICATION_STATUSES.contains(&verification.as_str()) {
        errors.push(format!(
            "verificationStatus: '{}' is not one of {}",
            request.verification_status,
            KNOWN_VERIFICATION_STATUSES.join(", ")
        ));
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(OrganizerRiskInput {
        organiser_category: category,
        years_of_operation: request.years_of_operation,
        has_valid_license: request.has_valid_license,
        group_size: request.group_size,
        monthly_contribution: request.monthly_contribution,
        location_risk_score: request.location_risk_score,
        past_default_rate: request.past_default_rate,
        complaint_count: request.complaint_count,
        verification_status: verification,
    })
}

/// Lower bound is always 0.
fn check_range(errors: &mut Vec<String>, field: &str, value: f64, max: Option<f64>) {
    if !value.is_finite() {
        errors.push(format!("{}: must be a finite number", field));
        return;
    }
    if value < 0.0 {
        errors.push(format!("{}: must be non-negative", field));
    }
    if let Some(max) = max {
        if value > max {
            errors.push(format!("{}: must be at most {}", field, max));
        }
    }
}

fn check_integer(errors: &mut Vec<String>, field: &str, value: f64, max: Option<f64>) {
    if value.is_finite() && value.fract() != 0.0 {
        errors.push(format!("{}: must be a whole number", field));
    }
    check_range(errors, field, value, max);
}
