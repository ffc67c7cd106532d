pub mod category;
pub mod engine;
pub mod input;
pub mod level;
pub mod normalize;
pub mod validation;

pub use category::category_base_risk;
pub use engine::{
    score_group, score_organizer, RiskResult, GROUP_MODEL_VERSION, ORGANIZER_MODEL_VERSION,
};
pub use input::{GroupRiskInput, OrganizerRiskInput};
pub use level::{RiskLevel, HIGH_RISK_THRESHOLD, LOW_RISK_THRESHOLD};
pub use normalize::{clamp, normalize};
pub use validation::{validate_organizer_request, OrganizerRiskRequest};
