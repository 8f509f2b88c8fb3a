//! Feature schema: the ordered symptom columns a model was trained on.

use std::collections::HashMap;

/// Lowercase, trim, and turn spaces into underscores.
///
/// `" Sore Throat "` becomes `"sore_throat"`.
pub fn normalize_symptom(symptom: &str) -> String {
    symptom.trim().to_lowercase().replace(' ', "_")
}

/// Ordered column names plus a lookup index.
///
/// Never mutated after construction; a retrain builds a new one.
#[derive(Debug, Clone)]
pub struct FeatureSchema {
    columns: Vec<String>,
    index: HashMap<String, usize>,
}

/// A single-row feature vector and the inputs that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedSymptoms {
    pub vector: Vec<f32>,
    /// Schema column names that were switched on, in input order.
    pub matched: Vec<String>,
}

impl FeatureSchema {
    pub fn new(columns: Vec<String>) -> Self {
        let mut index = HashMap::with_capacity(columns.len());
        for (i, column) in columns.iter().enumerate() {
            index.entry(column.clone()).or_insert(i);
        }
        Self { columns, index }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.index.contains_key(column)
    }

    /// Column matched by `symptom`: the normalized form first, then the raw
    /// string. No fuzzy matching.
    pub fn resolve(&self, symptom: &str) -> Option<(usize, &str)> {
        let normalized = normalize_symptom(symptom);
        self.index
            .get_key_value(normalized.as_str())
            .or_else(|| self.index.get_key_value(symptom))
            .map(|(name, &i)| (i, name.as_str()))
    }

    /// Build the one-hot row for `symptoms` in column order. Unmatched inputs
    /// are dropped.
    pub fn encode<S: AsRef<str>>(&self, symptoms: &[S]) -> EncodedSymptoms {
        let mut vector = vec![0.0f32; self.columns.len()];
        let mut matched = Vec::new();
        for symptom in symptoms {
            if let Some((i, name)) = self.resolve(symptom.as_ref()) {
                vector[i] = 1.0;
                matched.push(name.to_string());
            }
        }
        EncodedSymptoms { vector, matched }
    }
}

impl PartialEq for FeatureSchema {
    fn eq(&self, other: &Self) -> bool {
        self.columns == other.columns
    }
}

impl Eq for FeatureSchema {}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> FeatureSchema {
        FeatureSchema::new(vec![
            "cough".into(),
            "fever".into(),
            "sore_throat".into(),
            "Odd Column".into(),
        ])
    }

    #[test]
    fn normalization_rules() {
        assert_eq!(normalize_symptom("  Sore Throat "), "sore_throat");
        assert_eq!(normalize_symptom("FEVER"), "fever");
        assert_eq!(normalize_symptom("already_clean"), "already_clean");
    }

    #[test]
    fn resolve_prefers_normalized_then_raw() {
        let s = schema();
        assert_eq!(s.resolve("Sore Throat"), Some((2, "sore_throat")));
        assert_eq!(s.resolve("Odd Column"), Some((3, "Odd Column")));
        assert_eq!(s.resolve("sneezing"), None);
    }

    #[test]
    fn encode_sets_columns_in_schema_order() {
        let s = schema();
        let encoded = s.encode(&["fever", "unknown thing", " COUGH "]);
        assert_eq!(encoded.vector, vec![1.0, 1.0, 0.0, 0.0]);
        assert_eq!(encoded.matched, vec!["fever", "cough"]);
    }

    #[test]
    fn encode_with_no_matches_is_all_zero() {
        let s = schema();
        let encoded = s.encode(&["xyz_not_a_symptom"]);
        assert!(encoded.vector.iter().all(|&v| v == 0.0));
        assert!(encoded.matched.is_empty());
    }

    #[test]
    fn equality_is_by_columns() {
        assert_eq!(schema(), schema());
        assert_ne!(schema(), FeatureSchema::new(vec!["fever".into()]));
    }
}
