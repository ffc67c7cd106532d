//! Sample records used by the demo service and the CLI when no input is given.

use serde_json::{json, Value};

use crate::scoring::{GroupRiskInput, OrganizerRiskInput};

/// Sample organizer record as raw JSON, the shape a client would send.
pub fn sample_organizer_json() -> Value {
    json!({
        "organiserCategory": "existing",
        "yearsOfOperation": 7,
        "hasValidLicense": true,
        "groupSize": 120,
        "monthlyContribution": 6000,
        "locationRiskScore": 40,
        "pastDefaultRate": 3.5,
        "complaintCount": 2,
        "verificationStatus": "verified"
    })
}

/// Sample group record as raw JSON.
pub fn sample_group_json() -> Value {
    json!({
        "groupName": "Mahalaxmi Prime Circle",
        "city": "Pune",
        "state": "Maharashtra",
        "groupSize": 80,
        "monthlyContribution": 5000,
        "organizerRiskScore": 38,
        "defaultRate": 4.0,
        "complaintCount": 1,
        "locationRiskScore": 42,
        "escrowEnabled": true,
        "verifiedMembersPct": 78
    })
}

pub fn sample_organizer() -> OrganizerRiskInput {
    OrganizerRiskInput::from_value(&sample_organizer_json())
}

pub fn sample_group() -> GroupRiskInput {
    GroupRiskInput::from_value(&sample_group_json())
}
