use clap::Parser;
use flagcheck::{
    decode, CriterionStatus, DecodeError, FlagValidator, ImageInfo, ValidationReport,
    ValidatorParams,
};
use log::LevelFilter;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// Validate a flag image against BIS geometry and colour rules.
#[derive(Parser, Debug)]
#[command(name = "flagcheck", version, about)]
struct Cli {
    /// Image to validate (PNG, JPEG, ...).
    image: PathBuf,

    /// Write the JSON report to this path.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the full JSON report to stdout instead of the summary.
    #[arg(long)]
    json: bool,

    /// Reject inputs larger than this many bytes before decoding.
    #[arg(long)]
    max_bytes: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let _ = flagcheck_core::init_with_level(level);

    let validator = FlagValidator::new(ValidatorParams::default());

    let report = match run(&cli, &validator) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("error: {err}");
            // A pre-analysis failure still gets a structured report on disk
            // when the caller asked for one.
            if let Some(path) = &cli.output {
                let failed = ValidationReport::failure(
                    &validator.params().reference,
                    err.to_string(),
                    ImageInfo::new(0, 0, input_size(&cli.image)),
                );
                if let Err(io_err) = failed.write_json(path) {
                    eprintln!("error: failed to write report: {io_err}");
                }
            }
            return ExitCode::FAILURE;
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: failed to serialize report: {err}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_summary(&report);
    }

    if let Some(path) = &cli.output {
        if let Err(err) = report.write_json(path) {
            eprintln!("error: failed to write report: {err}");
            return ExitCode::FAILURE;
        }
        println!("wrote report JSON to {}", path.display());
    }

    ExitCode::SUCCESS
}

fn run(cli: &Cli, validator: &FlagValidator) -> Result<ValidationReport, DecodeError> {
    let bytes = fs::read(&cli.image)?;
    if let Some(limit) = cli.max_bytes {
        if bytes.len() as u64 > limit {
            return Err(DecodeError::InputTooLarge {
                got: bytes.len() as u64,
                limit,
            });
        }
    }
    decode::validate_image_bytes(&bytes, validator)
}

fn input_size(path: &PathBuf) -> u64 {
    fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

fn print_summary(report: &ValidationReport) {
    let verdict = |status: CriterionStatus| if status.is_pass() { "pass" } else { "FAIL" };

    println!(
        "aspect ratio      {}  actual {} (expected {})",
        verdict(report.aspect_ratio.status),
        report.aspect_ratio.actual,
        report.aspect_ratio.expected
    );
    for (name, check) in [
        ("saffron", &report.colors.saffron),
        ("white", &report.colors.white),
        ("green", &report.colors.green),
        ("chakra blue", &report.colors.chakra_blue),
    ] {
        println!(
            "{name:<17} {}  deviation {} (actual {})",
            verdict(check.status),
            check.deviation,
            check.actual
        );
    }
    println!(
        "stripe proportion {}  {} / {} / {}",
        verdict(report.stripe_proportion.status),
        report.stripe_proportion.saffron,
        report.stripe_proportion.white,
        report.stripe_proportion.green
    );
    println!(
        "chakra position   {}  offset ({}, {})",
        verdict(report.chakra_position.status),
        report.chakra_position.offset_x,
        report.chakra_position.offset_y
    );
    println!(
        "chakra spokes     {}  detected {} of {}",
        verdict(report.chakra_spokes.status),
        report.chakra_spokes.detected,
        report.chakra_spokes.expected
    );
    println!(
        "overall: {} of {} criteria passed",
        report.passed_criteria(),
        ValidationReport::criteria_total()
    );
}
