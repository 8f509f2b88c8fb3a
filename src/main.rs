use anyhow::Context;
use clap::Parser;
use dataset::GeneratorConfig;
use predictor::{inspect_artifacts, DiseasePredictor};
use serde_json::json;
use std::process::ExitCode;
use symptomatch::cli::{Args, Commands};
use symptomatch::{generate_dataset, run_self_test};

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(args.log_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let config = args.predictor_config();

    match args.command {
        Some(Commands::Generate {
            output,
            samples_per_disease,
            seed,
        }) => {
            let path = output.unwrap_or_else(|| config.dataset_path.clone());
            let mut generator = GeneratorConfig::new().with_samples_per_disease(samples_per_disease);
            if let Some(seed) = seed {
                generator = generator.with_seed(seed);
            }
            let dataset = generate_dataset(&path, &generator)?;
            println!(
                "Dataset generated with {} samples at {}",
                dataset.len(),
                path.display()
            );
        }
        Some(Commands::Train) => {
            let report = DiseasePredictor::new(config)
                .retrain()
                .context("training failed")?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Some(Commands::Predict { symptoms }) => {
            let predictor = DiseasePredictor::new(config);
            match predictor.predict(&symptoms) {
                Ok(result) => println!("{}", serde_json::to_string(&result)?),
                Err(err) => {
                    println!("{}", json!({ "error": err.to_string() }));
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Some(Commands::Inspect) => {
            let report = inspect_artifacts(&config);
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.compatible {
                return Ok(ExitCode::FAILURE);
            }
        }
        None => {
            let predictor = DiseasePredictor::new(config);
            let test = run_self_test(&predictor)?;
            println!("Model ready. Usage: symptomatch predict <SYMPTOM>...");
            println!("Testing with symptoms: {:?}", test.symptoms);
            println!("Result: {}", serde_json::to_string_pretty(&test.result)?);
        }
    }

    Ok(ExitCode::SUCCESS)
}
