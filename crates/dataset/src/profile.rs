use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A disease and the symptoms strongly associated with it.
///
/// Profiles only drive synthetic generation; the trained model never sees
/// them directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiseaseProfile {
    pub name: String,
    pub core_symptoms: Vec<String>,
}

impl DiseaseProfile {
    pub fn new(name: impl Into<String>, core_symptoms: &[&str]) -> Self {
        Self {
            name: name.into(),
            core_symptoms: core_symptoms.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    pub fn is_core(&self, symptom: &str) -> bool {
        self.core_symptoms.iter().any(|s| s == symptom)
    }
}

/// The built-in disease table.
pub fn default_profiles() -> Vec<DiseaseProfile> {
    vec![
        DiseaseProfile::new(
            "Flu",
            &[
                "fever",
                "cough",
                "sore_throat",
                "runny_nose",
                "body_ache",
                "fatigue",
                "headache",
                "chills",
            ],
        ),
        DiseaseProfile::new(
            "Malaria",
            &[
                "fever",
                "chills",
                "sweating",
                "headache",
                "nausea",
                "muscle_pain",
                "vomiting",
                "diarrhea",
            ],
        ),
        DiseaseProfile::new(
            "Typhoid",
            &[
                "high_fever",
                "headache",
                "weakness",
                "stomach_pain",
                "constipation",
                "rash",
                "muscle_pain",
            ],
        ),
        DiseaseProfile::new(
            "Dengue",
            &[
                "high_fever",
                "skin_rash",
                "joint_pain",
                "pain_behind_eyes",
                "nausea",
                "vomiting",
                "bleeding",
            ],
        ),
        DiseaseProfile::new(
            "Migraine",
            &[
                "severe_headache",
                "nausea",
                "sensitivity_to_light",
                "vomiting",
                "dizziness",
            ],
        ),
        DiseaseProfile::new(
            "Diabetes",
            &[
                "excessive_thirst",
                "frequent_urination",
                "extreme_hunger",
                "weight_loss",
                "fatigue",
                "blurred_vision",
            ],
        ),
        DiseaseProfile::new(
            "Common Cold",
            &[
                "sneezing",
                "runny_nose",
                "sore_throat",
                "cough",
                "mild_fever",
                "congestion",
                "watery_eyes",
            ],
        ),
        DiseaseProfile::new(
            "COVID-19",
            &[
                "fever",
                "dry_cough",
                "fatigue",
                "loss_of_taste",
                "loss_of_smell",
                "difficulty_breathing",
                "sore_throat",
            ],
        ),
        DiseaseProfile::new(
            "Allergy",
            &[
                "sneezing",
                "itchy_nose",
                "itchy_eyes",
                "red_eyes",
                "skin_rash",
                "hives",
            ],
        ),
        DiseaseProfile::new(
            "Heart Attack",
            &[
                "chest_pain",
                "shortness_of_breath",
                "pain_in_arm",
                "cold_sweat",
                "nausea",
                "lightheadedness",
            ],
        ),
        DiseaseProfile::new(
            "Pneumonia",
            &[
                "cough_phlegm",
                "stabbing_chest_pain",
                "fever",
                "sweating",
                "shaking_chills",
                "shortness_of_breath",
            ],
        ),
        DiseaseProfile::new(
            "Arthritis",
            &[
                "joint_pain",
                "stiffness",
                "swelling",
                "redness",
                "decreased_range_of_motion",
            ],
        ),
        DiseaseProfile::new(
            "Gastroenteritis",
            &[
                "watery_diarrhea",
                "abdominal_cramps",
                "nausea",
                "vomiting",
                "low_grade_fever",
            ],
        ),
        DiseaseProfile::new(
            "Tuberculosis",
            &[
                "cough_3_weeks",
                "chest_pain",
                "coughing_blood",
                "fatigue",
                "weight_loss",
                "night_sweats",
                "fever",
            ],
        ),
        DiseaseProfile::new(
            "Asthma",
            &[
                "shortness_of_breath",
                "chest_tightness",
                "wheezing",
                "coughing_at_night",
            ],
        ),
    ]
}

/// Sorted, deduplicated union of every profile's core symptoms.
pub fn vocabulary(profiles: &[DiseaseProfile]) -> Vec<String> {
    profiles
        .iter()
        .flat_map(|p| p.core_symptoms.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_is_sorted_and_unique() {
        let vocab = vocabulary(&default_profiles());
        let mut expected = vocab.clone();
        expected.sort();
        expected.dedup();
        assert_eq!(vocab, expected);
        assert!(vocab.contains(&"fever".to_string()));
        assert!(vocab.contains(&"coughing_at_night".to_string()));
    }

    #[test]
    fn vocabulary_covers_every_core_symptom() {
        let profiles = default_profiles();
        let vocab = vocabulary(&profiles);
        for profile in &profiles {
            for symptom in &profile.core_symptoms {
                assert!(vocab.contains(symptom), "missing {symptom}");
            }
        }
    }

    #[test]
    fn default_table_has_fifteen_diseases() {
        let profiles = default_profiles();
        assert_eq!(profiles.len(), 15);
        let diabetes = profiles.iter().find(|p| p.name == "Diabetes").unwrap();
        assert!(diabetes.is_core("frequent_urination"));
        assert!(!diabetes.is_core("fever"));
    }
}
