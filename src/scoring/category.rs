/// Base risk and reason for an organizer category.
///
/// The table is closed: adding a category changes the formula and belongs
/// with a new model version. Unrecognized categories get a conservative
/// default rather than an error.
pub fn category_base_risk(category: &str) -> (f64, &'static str) {
    match category {
        "new" => (
            24.0,
            "New organizer category carries higher base onboarding risk.",
        ),
        "existing" => (
            10.0,
            "Existing business category reduces base risk due to operating history.",
        ),
        "migrating" => (
            16.0,
            "Migrating platform category receives moderate base risk pending migration checks.",
        ),
        _ => (20.0, "Unknown category; conservative base risk applied."),
    }
}

/// Categories accepted by the strict API.
pub const KNOWN_CATEGORIES: [&str; 3] = ["new", "existing", "migrating"];

/// Verification states accepted by the strict API.
pub const KNOWN_VERIFICATION_STATUSES: [&str; 2] = ["pending", "verified"];

/// Trim and lowercase a categorical value.
pub fn normalize_label(raw: &str) -> String {
    raw.trim().to_lowercase()
}
