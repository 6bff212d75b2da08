//! curblabel - assign curb regulations from street sign points
//!
//! Batch tool: reads a sign FeatureCollection and a curb
//! FeatureCollection, labels every curb segment from its nearest
//! qualifying sign, propagates labels across touching segments, and
//! writes the labeled collection.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use curblabel::matching::MatchMode;
use curblabel::pipeline::{self, PipelineConfig};

// ============================================================================
// CLI Arguments
// ============================================================================

struct Args {
    signs_path: PathBuf,
    curbs_path: PathBuf,
    output_path: PathBuf,
    config_path: Option<PathBuf>,
    mode: Option<MatchMode>,
    max_distance_m: Option<f64>,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut positional: Vec<PathBuf> = Vec::new();
    let mut config_path = None;
    let mut mode = None;
    let mut max_distance_m = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--mode" => {
                if i + 1 < args.len() {
                    mode = match args[i + 1].as_str() {
                        "sign_to_curb" => Some(MatchMode::SignToCurb),
                        "curb_to_sign" => Some(MatchMode::CurbToSign),
                        other => {
                            eprintln!("Unknown mode: {}", other);
                            print_help();
                            std::process::exit(1);
                        }
                    };
                    i += 1;
                }
            }
            "--max-distance" => {
                if i + 1 < args.len() {
                    match args[i + 1].parse::<f64>() {
                        Ok(m) => max_distance_m = Some(m),
                        Err(_) => {
                            eprintln!("Invalid distance: {}", args[i + 1]);
                            std::process::exit(1);
                        }
                    }
                    i += 1;
                }
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown argument: {}", other);
                print_help();
                std::process::exit(1);
            }
            other => positional.push(PathBuf::from(other)),
        }
        i += 1;
    }

    if positional.len() != 3 {
        eprintln!(
            "Expected 3 paths (signs, curbs, output), got {}",
            positional.len()
        );
        print_help();
        std::process::exit(1);
    }

    let mut positional = positional.into_iter();
    Args {
        signs_path: positional.next().unwrap(),
        curbs_path: positional.next().unwrap(),
        output_path: positional.next().unwrap(),
        config_path,
        mode,
        max_distance_m,
    }
}

fn print_help() {
    println!("curblabel - assign curb regulations from street sign points");
    println!();
    println!("USAGE:");
    println!("    curblabel [OPTIONS] <SIGNS> <CURBS> <OUTPUT>");
    println!();
    println!("ARGS:");
    println!("    <SIGNS>     GeoJSON FeatureCollection of regulation sign points");
    println!("    <CURBS>     GeoJSON FeatureCollection of curb segment polylines");
    println!("    <OUTPUT>    Path for the labeled curb collection");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <FILE>      TOML configuration file");
    println!("        --mode <MODE>        sign_to_curb (default) or curb_to_sign");
    println!("        --max-distance <M>   Curb-to-sign distance threshold in meters");
    println!("    -h, --help               Print help information");
    println!();
    println!("CONFIGURATION:");
    println!("    All settings are configurable via the TOML file:");
    println!("    - [matching] mode, max_distance_m");
    println!("    - [assignment] excluded_categories, max_iterations");
    println!("    - [adjacency] tolerance");
    println!("    Command line options override the file.");
}

fn load_config(args: &Args) -> PipelineConfig {
    let mut config = match &args.config_path {
        Some(path) => match PipelineConfig::from_file(path) {
            Ok(cfg) => {
                log::info!("Loaded config from {}", path.display());
                cfg
            }
            Err(e) => {
                log::warn!("Failed to load config {}: {}", path.display(), e);
                PipelineConfig::default()
            }
        },
        None => PipelineConfig::default(),
    };

    if let Some(mode) = args.mode {
        config.matching.mode = mode;
    }
    if let Some(meters) = args.max_distance_m {
        config.matching.max_distance_m = meters;
    }
    config
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let args = parse_args();
    let config = load_config(&args);

    log::info!("curblabel starting");
    log::info!("  Signs: {}", args.signs_path.display());
    log::info!("  Curbs: {}", args.curbs_path.display());
    log::info!("  Output: {}", args.output_path.display());
    log::info!(
        "  Mode: {}",
        match config.matching.mode {
            MatchMode::SignToCurb => "sign_to_curb",
            MatchMode::CurbToSign => "curb_to_sign",
        }
    );

    match pipeline::run(
        &args.signs_path,
        &args.curbs_path,
        &args.output_path,
        &config,
    ) {
        Ok(summary) => {
            log::info!(
                "Done: {} direct, {} propagated, {} unresolved of {} segments",
                summary.direct,
                summary.propagated,
                summary.unresolved,
                summary.total_segments
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Pipeline error: {}", e);
            ExitCode::FAILURE
        }
    }
}
