//! Point-level accuracy of one segmentation output.
//!
//! Reads a JSON config naming the predicted VRML point set and the labeled
//! ground-truth file, prints the accuracy and optionally writes a JSON report.

use log::info;
use std::env;
use std::path::Path;
use tree_eval::config::accuracy::load_config;
use tree_eval::io::write_json_file;
use tree_eval::AccuracyEvaluator;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config_path = Path::new(&config_path);
    let config = load_config(config_path).map_err(|e| e.to_string())?;
    let params = config.resolve(config_path).map_err(|e| e.to_string())?;
    let variant = config.variant_name();

    info!(
        "evaluating {variant}: prediction={} ground_truth={} decimals={}",
        config.prediction.display(),
        config.ground_truth.display(),
        params.precision.decimals()
    );

    let evaluator = AccuracyEvaluator::new(params);
    let report = evaluator
        .evaluate_files(&variant, &config.prediction, &config.ground_truth)
        .map_err(|e| e.to_string())?;

    println!("\n**************");
    print!("{}", report.summary());

    if let Some(path) = &config.output.report_json {
        write_json_file(path, &report).map_err(|e| e.to_string())?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}

fn usage() -> String {
    "Usage: evaluate_accuracy <config.json>".to_string()
}
