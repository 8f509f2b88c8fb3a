use symptomatch::dataset::{Dataset, GeneratorConfig, LABEL_COLUMN};
use symptomatch::predictor::{DiseasePredictor, ModelStatus, PredictorConfig, UNKNOWN_DISEASE};
use symptomatch::{generate_dataset, run_self_test, SELF_TEST_SYMPTOMS};
use tempfile::tempdir;

fn small_config(root: &std::path::Path) -> PredictorConfig {
    PredictorConfig::from_dirs(root.join("data"), root.join("model")).with_n_estimators(25)
}

#[test]
fn generate_train_and_self_test() {
    let dir = tempdir().unwrap();
    let cfg = small_config(dir.path());

    let generated = generate_dataset(
        &cfg.dataset_path,
        &GeneratorConfig::new()
            .with_samples_per_disease(50)
            .with_seed(8),
    )
    .expect("dataset");
    assert_eq!(generated.len(), 15 * 50);

    let reread = Dataset::read_csv(&cfg.dataset_path).expect("reread");
    assert_eq!(reread.columns, generated.columns);
    assert_eq!(reread.labels(), generated.labels());

    let predictor = DiseasePredictor::new(cfg);
    let test = run_self_test(&predictor).expect("self test");
    assert_eq!(test.symptoms, SELF_TEST_SYMPTOMS);
    assert_ne!(test.result.prediction, UNKNOWN_DISEASE);
    assert!(test.result.confidence > 0.0);
    assert_eq!(predictor.status(), ModelStatus::Trained);
}

#[test]
fn dataset_header_has_label_last() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("d.csv");
    generate_dataset(&path, &GeneratorConfig::new().with_samples_per_disease(2).with_seed(1))
        .unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let header = text.lines().next().unwrap();
    assert!(header.ends_with(&format!(",{LABEL_COLUMN}")));
    assert_eq!(text.lines().count(), 1 + 15 * 2);
}

#[test]
fn self_test_without_data_fails() {
    let dir = tempdir().unwrap();
    let predictor = DiseasePredictor::new(small_config(dir.path()));
    assert!(run_self_test(&predictor).is_err());
    assert_eq!(predictor.status(), ModelStatus::Failed);
}
