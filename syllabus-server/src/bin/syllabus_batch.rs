//! Batch syllabus generation
//!
//! Runs the pipeline over a JSON array of course specifications and writes,
//! for the n-th course (1-based), `course_{n}.json` and `course_{n}_report.txt`
//! into the output directory.
//!
//! **Usage:**
//! ```bash
//! syllabus-batch data/courses.json [--output-dir output] [--limit 2] [--seed 42]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use syllabus_common::config::{load_config, CONFIG_ENV_VAR};
use syllabus_server::export::text_report;
use syllabus_server::models::ProcessRequest;
use syllabus_server::services::pipeline::resolve_seed;
use syllabus_server::services::SyllabusPipeline;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Batch syllabus generation
#[derive(Parser, Debug)]
#[command(name = "syllabus-batch")]
#[command(about = "Generate syllabi for every course in a JSON file")]
#[command(version)]
struct Args {
    /// JSON file holding an array of course specifications
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Directory receiving the generated files
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,

    /// Process at most this many courses
    #[arg(short, long)]
    limit: Option<usize>,

    /// Configuration file (TOML)
    #[arg(short, long, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// Random seed for courses without their own (overrides config)
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref()).context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting syllabus-batch v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let courses = read_courses(&args.input)?;
    let count = args.limit.map_or(courses.len(), |n| n.min(courses.len()));
    info!("Processing {} of {} courses from {}", count, courses.len(), args.input.display());

    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("Failed to create {}", args.output_dir.display()))?;

    let pipeline = SyllabusPipeline::new(&config.pipeline);
    let configured_seed = args.seed.or(config.seed);
    let mut failed = 0usize;

    for (index, request) in courses.into_iter().take(count).enumerate() {
        let number = index + 1;
        match process_one(&pipeline, request, configured_seed, &args.output_dir, number) {
            Ok(()) => {}
            Err(e) => {
                error!("Course {} failed: {:#}", number, e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} courses failed", failed, count);
    }
    info!("All {} courses written to {}", count, args.output_dir.display());
    Ok(())
}

fn read_courses(path: &Path) -> Result<Vec<ProcessRequest>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let courses: Vec<ProcessRequest> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse course list in {}", path.display()))?;
    if courses.is_empty() {
        warn!("{} contains no courses", path.display());
    }
    Ok(courses)
}

fn process_one(
    pipeline: &SyllabusPipeline,
    request: ProcessRequest,
    configured_seed: Option<u64>,
    output_dir: &Path,
    number: usize,
) -> Result<()> {
    let spec = request.into_spec()?;
    let seed = resolve_seed(spec.seed, configured_seed);
    info!("Course {}: {} (seed {})", number, spec.title, seed);

    let result = pipeline.run(&spec, seed)?;

    let json_path = output_dir.join(format!("course_{}.json", number));
    let json = serde_json::to_string_pretty(&result).context("Failed to serialize result")?;
    fs::write(&json_path, json)
        .with_context(|| format!("Failed to write {}", json_path.display()))?;

    let report_path = output_dir.join(format!("course_{}_report.txt", number));
    fs::write(&report_path, text_report(&result))
        .with_context(|| format!("Failed to write {}", report_path.display()))?;

    info!(
        "Course {}: {} modules, {} questions, quality {:.1} -> {}",
        number,
        result.module_structure.total_modules,
        result.questions.len(),
        result.assessments.analysis.quality_score,
        json_path.display()
    );
    Ok(())
}
