//! Run a validation from a JSON config file and write the JSON report.
//!
//! Usage: `cargo run --example validate_from_config -- config.json`
//!
//! Config shape: `{"image_path": "flag.png", "output_path": "report.json"}`
//! with optional `params` and `max_bytes` overrides.

use flagcheck::{decode, ValidateConfig};
use std::{env, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("flagcheck_config.json"));
    let cfg = ValidateConfig::load_json(&config_path)?;

    if let Some(limit) = cfg.max_bytes {
        let size = fs::metadata(&cfg.image_path)?.len();
        if size > limit {
            return Err(format!("input of {size} bytes exceeds the limit of {limit}").into());
        }
    }

    let validator = cfg.build_validator();
    let report = decode::validate_image_file(&cfg.image_path, &validator)?;

    let output_path = cfg.output_path();
    report.write_json(&output_path)?;
    println!("wrote report JSON to {}", output_path.display());
    println!(
        "{} of {} criteria passed",
        report.passed_criteria(),
        flagcheck::ValidationReport::criteria_total()
    );

    Ok(())
}
