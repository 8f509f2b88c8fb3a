//! Disease to specialist lookup.

/// Returned for any disease not in the table, including `"Unknown"`.
pub const DEFAULT_SPECIALIST: &str = "General Physician";

/// Exact, case-sensitive disease names.
const SPECIALISTS: &[(&str, &str)] = &[
    ("Fungal infection", "Dermatologist"),
    ("Diabetes", "Endocrinologist"),
    ("Hypertension", "Cardiologist"),
    ("Malaria", "Infectious Disease Specialist"),
    ("Flu", "General Physician"),
    ("Typhoid", "General Physician"),
    ("Dengue", "General Physician"),
    ("Migraine", "Neurologist"),
    ("Common Cold", "General Physician"),
    ("COVID-19", "General Physician"),
    ("Allergy", "Allergist"),
    ("Heart Attack", "Cardiologist"),
    ("Pneumonia", "Pulmonologist"),
    ("Arthritis", "Rheumatologist"),
    ("Gastroenteritis", "Gastroenterologist"),
    ("Tuberculosis", "Pulmonologist"),
    ("Asthma", "Pulmonologist"),
];

pub fn recommend_specialist(disease: &str) -> &'static str {
    SPECIALISTS
        .iter()
        .find(|(name, _)| *name == disease)
        .map(|(_, specialist)| *specialist)
        .unwrap_or(DEFAULT_SPECIALIST)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_diseases() {
        assert_eq!(recommend_specialist("Diabetes"), "Endocrinologist");
        assert_eq!(recommend_specialist("Asthma"), "Pulmonologist");
        assert_eq!(recommend_specialist("Fungal infection"), "Dermatologist");
    }

    #[test]
    fn unknown_and_case_mismatch_fall_back() {
        assert_eq!(recommend_specialist("Unknown"), DEFAULT_SPECIALIST);
        assert_eq!(recommend_specialist("diabetes"), DEFAULT_SPECIALIST);
    }

    #[test]
    fn every_generated_disease_has_an_answer() {
        for profile in dataset::default_profiles() {
            assert!(!recommend_specialist(&profile.name).is_empty());
        }
    }
}
