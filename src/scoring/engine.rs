use serde::{Deserialize, Serialize};

use super::category::category_base_risk;
use super::input::{GroupRiskInput, OrganizerRiskInput};
use super::level::RiskLevel;
use super::normalize::{clamp, normalize, round2};

pub const ORGANIZER_MODEL_VERSION: &str = "weighted_v1";
pub const GROUP_MODEL_VERSION: &str = "group_weighted_v1";

/// Number of organizer factors joined into the explanation sentence.
const ORGANIZER_EXPLANATION_FACTORS: usize = 6;

const GROUP_EXPLANATION: &str =
    "Group risk combines organizer profile, defaults, complaints, location, and escrow controls.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskResult {
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub explanation: String,
    pub factors: Vec<String>,
    pub model_version: String,
}

/// Running score plus the ordered trail of factor sentences.
#[derive(Debug, Default)]
struct Accumulator {
    score: f64,
    factors: Vec<String>,
}

impl Accumulator {
    fn add(&mut self, amount: f64) {
        self.score += amount;
    }

    fn note(&mut self, factor: &str) {
        self.factors.push(factor.to_string());
    }

    fn add_with_note(&mut self, amount: f64, factor: &str) {
        self.add(amount);
        self.note(factor);
    }

    /// Clamp to [0, 100] and round to two decimals.
    fn final_score(&self) -> f64 {
        round2(clamp(self.score, 0.0, 100.0))
    }
}

pub fn score_organizer(input: &OrganizerRiskInput) -> RiskResult {
    let mut acc = Accumulator::default();

    let (base_score, base_reason) = category_base_risk(&input.organiser_category);
    acc.add_with_note(base_score, base_reason);

    if input.has_valid_license {
        acc.add_with_note(-8.0, "Valid license provided: risk reduced.");
    } else {
        acc.add_with_note(20.0, "Valid license missing: +20 risk.");
    }

    let years = input.years_of_operation;
    acc.add((1.0 - normalize(years, 0.0, 15.0)) * 18.0);
    if years >= 5.0 {
        acc.note("Longer operating history lowers risk.");
    } else {
        acc.note("Limited operating history increases risk.");
    }

    acc.add(normalize(input.group_size, 0.0, 500.0) * 10.0);
    if input.group_size > 100.0 {
        acc.note("Larger member base increases operational exposure.");
    }

    acc.add(normalize(input.monthly_contribution, 0.0, 100_000.0) * 8.0);
    if input.monthly_contribution > 25_000.0 {
        acc.note("Higher monthly contribution raises financial impact risk.");
    }

    acc.add(normalize(input.location_risk_score, 0.0, 100.0) * 12.0);
    if input.location_risk_score >= 60.0 {
        acc.note("Region shows elevated location risk profile.");
    }

    acc.add(normalize(input.past_default_rate, 0.0, 50.0) * 16.0);
    if input.past_default_rate > 0.0 {
        acc.note("Historical default rate contributes additional risk.");
    }

    acc.add(normalize(input.complaint_count, 0.0, 50.0) * 10.0);
    if input.complaint_count > 0.0 {
        acc.note("User complaints increase trust risk.");
    }

    if input.verification_status == "verified" {
        acc.add_with_note(-5.0, "Verified profile lowers onboarding risk.");
    } else {
        acc.add_with_note(
            9.0,
            "Verification pending: conservative risk uplift applied.",
        );
    }

    let risk_score = acc.final_score();
    let explanation = acc
        .factors
        .iter()
        .take(ORGANIZER_EXPLANATION_FACTORS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");

    RiskResult {
        risk_score,
        risk_level: RiskLevel::from_score(risk_score),
        explanation,
        factors: acc.factors,
        model_version: ORGANIZER_MODEL_VERSION.to_string(),
    }
}

pub fn score_group(input: &GroupRiskInput) -> RiskResult {
    let mut acc = Accumulator::default();

    // Weighted signals contribute to the score without producing factor text.
    acc.add(normalize(input.group_size, 0.0, 500.0) * 14.0);
    acc.add(normalize(input.monthly_contribution, 0.0, 100_000.0) * 14.0);
    acc.add(normalize(input.organizer_risk_score, 0.0, 100.0) * 24.0);
    acc.add(normalize(input.default_rate, 0.0, 50.0) * 18.0);
    acc.add(normalize(input.complaint_count, 0.0, 50.0) * 10.0);
    acc.add(normalize(input.location_risk_score, 0.0, 100.0) * 10.0);

    if input.escrow_enabled {
        acc.add_with_note(-6.0, "Escrow enabled lowers fund handling risk.");
    } else {
        acc.add_with_note(10.0, "Escrow not enabled increases payout risk.");
    }

    acc.add((1.0 - normalize(input.verified_members_pct, 0.0, 100.0)) * 8.0);
    if input.verified_members_pct < 50.0 {
        acc.note("Low verified member ratio increases trust risk.");
    } else {
        acc.note("Strong verified member ratio reduces trust risk.");
    }

    let risk_score = acc.final_score();

    RiskResult {
        risk_score,
        risk_level: RiskLevel::from_score(risk_score),
        explanation: GROUP_EXPLANATION.to_string(),
        factors: acc.factors,
        model_version: GROUP_MODEL_VERSION.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{sample_group, sample_organizer};

    fn has_at_most_two_decimals(score: f64) -> bool {
        ((score * 100.0).round() - score * 100.0).abs() < 1e-6
    }

    fn worst_organizer() -> OrganizerRiskInput {
        OrganizerRiskInput {
            organiser_category: "new".to_string(),
            years_of_operation: 0.0,
            has_valid_license: false,
            group_size: 100_000.0,
            monthly_contribution: 1_000_000.0,
            location_risk_score: 100.0,
            past_default_rate: 100.0,
            complaint_count: 10_000.0,
            verification_status: "pending".to_string(),
        }
    }

    fn best_organizer() -> OrganizerRiskInput {
        OrganizerRiskInput {
            organiser_category: "existing".to_string(),
            years_of_operation: 100.0,
            has_valid_license: true,
            group_size: 0.0,
            monthly_contribution: 0.0,
            location_risk_score: 0.0,
            past_default_rate: 0.0,
            complaint_count: 0.0,
            verification_status: "verified".to_string(),
        }
    }

    #[test]
    fn test_organizer_regression_baseline() {
        let result = score_organizer(&sample_organizer());

        // 10 - 8 + 9.6 + 2.4 + 0.48 + 4.8 + 1.12 + 0.4 - 5
        assert_eq!(result.risk_score, 15.8);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert_eq!(result.model_version, "weighted_v1");
        assert_eq!(
            result.factors,
            vec![
                "Existing business category reduces base risk due to operating history.",
                "Valid license provided: risk reduced.",
                "Longer operating history lowers risk.",
                "Larger member base increases operational exposure.",
                "Historical default rate contributes additional risk.",
                "User complaints increase trust risk.",
                "Verified profile lowers onboarding risk.",
            ]
        );
    }

    #[test]
    fn test_organizer_explanation_truncates_to_six_factors() {
        let result = score_organizer(&sample_organizer());
        assert_eq!(result.factors.len(), 7);
        assert_eq!(result.explanation, result.factors[..6].join(" "));
        assert!(!result.explanation.contains("Verified profile"));
    }

    #[test]
    fn test_organizer_worst_case_clamps_to_100() {
        let result = score_organizer(&worst_organizer());
        assert_eq!(result.risk_score, 100.0);
        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(result.factors.len(), 9);
    }

    #[test]
    fn test_organizer_best_case_clamps_to_zero() {
        let result = score_organizer(&best_organizer());
        assert_eq!(result.risk_score, 0.0);
        assert_eq!(result.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_organizer_all_defaults() {
        let result = score_organizer(&OrganizerRiskInput::default());
        // 24 + 20 + 18 + 6 (location 50) + 9
        assert_eq!(result.risk_score, 77.0);
        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(
            result.factors[0],
            "New organizer category carries higher base onboarding risk."
        );
        assert_eq!(
            result.factors.last().map(String::as_str),
            Some("Verification pending: conservative risk uplift applied.")
        );
    }

    #[test]
    fn test_organizer_half_cent_rounds_to_even() {
        let input = OrganizerRiskInput {
            monthly_contribution: 1562.5,
            ..OrganizerRiskInput::default()
        };
        // 77.0 + 1562.5 / 100000 * 8 = 77.125 exactly
        assert_eq!(score_organizer(&input).risk_score, 77.12);
    }

    #[test]
    fn test_organizer_unknown_category() {
        let input = OrganizerRiskInput {
            organiser_category: "foo".to_string(),
            ..OrganizerRiskInput::default()
        };
        let result = score_organizer(&input);
        // Same as all defaults but base 20 instead of 24
        assert_eq!(result.risk_score, 73.0);
        assert_eq!(
            result.factors[0],
            "Unknown category; conservative base risk applied."
        );
    }

    #[test]
    fn test_organizer_conditional_factors() {
        let input = OrganizerRiskInput {
            monthly_contribution: 30_000.0,
            location_risk_score: 60.0,
            ..OrganizerRiskInput::default()
        };
        let result = score_organizer(&input);
        assert!(result
            .factors
            .iter()
            .any(|f| f == "Higher monthly contribution raises financial impact risk."));
        assert!(result
            .factors
            .iter()
            .any(|f| f == "Region shows elevated location risk profile."));
        assert!(!result
            .factors
            .iter()
            .any(|f| f == "Larger member base increases operational exposure."));
    }

    #[test]
    fn test_organizer_is_idempotent() {
        let input = sample_organizer();
        assert_eq!(score_organizer(&input), score_organizer(&input));
    }

    #[test]
    fn test_group_fixture_score() {
        let result = score_group(&sample_group());
        // 2.24 + 0.7 + 9.12 + 1.44 + 0.2 + 4.2 - 6 + 1.76
        assert_eq!(result.risk_score, 13.66);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert_eq!(result.model_version, "group_weighted_v1");
        assert_eq!(
            result.factors,
            vec![
                "Escrow enabled lowers fund handling risk.",
                "Strong verified member ratio reduces trust risk.",
            ]
        );
        assert_eq!(result.explanation, GROUP_EXPLANATION);
    }

    #[test]
    fn test_group_escrow_difference_is_sixteen() {
        let enabled = GroupRiskInput {
            group_size: 200.0,
            monthly_contribution: 20_000.0,
            organizer_risk_score: 60.0,
            default_rate: 10.0,
            complaint_count: 5.0,
            location_risk_score: 55.0,
            escrow_enabled: true,
            verified_members_pct: 40.0,
            ..GroupRiskInput::default()
        };
        let disabled = GroupRiskInput {
            escrow_enabled: false,
            ..enabled.clone()
        };

        let with_escrow = score_group(&enabled);
        let without_escrow = score_group(&disabled);
        assert!(without_escrow.risk_score > with_escrow.risk_score);
        assert!((without_escrow.risk_score - with_escrow.risk_score - 16.0).abs() < 1e-9);
        assert_eq!(
            without_escrow.factors[0],
            "Escrow not enabled increases payout risk."
        );
        assert_eq!(
            with_escrow.factors[1],
            "Low verified member ratio increases trust risk."
        );
    }

    #[test]
    fn test_group_extremes() {
        let worst = GroupRiskInput {
            group_size: 500.0,
            monthly_contribution: 100_000.0,
            organizer_risk_score: 100.0,
            default_rate: 50.0,
            complaint_count: 50.0,
            location_risk_score: 100.0,
            escrow_enabled: false,
            verified_members_pct: 0.0,
            ..GroupRiskInput::default()
        };
        assert_eq!(score_group(&worst).risk_score, 100.0);

        let best = GroupRiskInput {
            group_size: 0.0,
            monthly_contribution: 0.0,
            organizer_risk_score: 0.0,
            default_rate: 0.0,
            complaint_count: 0.0,
            location_risk_score: 0.0,
            escrow_enabled: true,
            verified_members_pct: 100.0,
            ..GroupRiskInput::default()
        };
        assert_eq!(score_group(&best).risk_score, 0.0);
    }

    #[test]
    fn test_group_never_exceeds_two_factors() {
        let result = score_group(&GroupRiskInput::default());
        assert_eq!(result.factors.len(), 2);
    }

    #[test]
    fn test_scores_bounded_and_rounded() {
        let categories = ["new", "existing", "migrating", "foo"];
        for (i, category) in categories.iter().enumerate() {
            for step in 0..20 {
                let x = step as f64 * 7.3 + i as f64;
                let organizer = OrganizerRiskInput {
                    organiser_category: category.to_string(),
                    years_of_operation: x / 3.0,
                    has_valid_license: step % 2 == 0,
                    group_size: x * 11.0,
                    monthly_contribution: x * 1234.5,
                    location_risk_score: x,
                    past_default_rate: x / 2.0,
                    complaint_count: x / 4.0,
                    verification_status: if step % 3 == 0 { "verified" } else { "pending" }
                        .to_string(),
                };
                let group = GroupRiskInput {
                    group_size: x * 9.0,
                    monthly_contribution: x * 987.0,
                    organizer_risk_score: x,
                    default_rate: x / 3.0,
                    complaint_count: x / 5.0,
                    location_risk_score: 100.0 - x.min(100.0),
                    escrow_enabled: step % 2 == 1,
                    verified_members_pct: x,
                    ..GroupRiskInput::default()
                };

                for result in [score_organizer(&organizer), score_group(&group)] {
                    assert!((0.0..=100.0).contains(&result.risk_score));
                    assert!(has_at_most_two_decimals(result.risk_score));
                    assert_eq!(result.risk_level, RiskLevel::from_score(result.risk_score));
                }
            }
        }
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = score_group(&sample_group());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["riskScore"], 13.66);
        assert_eq!(json["riskLevel"], "LOW");
        assert_eq!(json["modelVersion"], "group_weighted_v1");
        assert!(json["factors"].is_array());
        assert!(json["explanation"].is_string());
    }
}
