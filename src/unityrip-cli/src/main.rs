//! Local front end for the unityrip pipeline
//!
//! Runs one extraction job on a local APK, printing stage progress and
//! writing `catalog.json` / `stats.json` into the output directory. Stands
//! in for the server layer that normally drives the library.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use unityrip::{run_pipeline, JobUpdate, ToolConfig};

#[derive(Parser)]
#[command(name = "unityrip")]
#[command(about = "Extract Unity assets from an Android APK", long_about = None)]
struct Cli {
    /// Path to the APK to extract
    apk: PathBuf,

    /// Working/output directory for this job
    #[arg(short, long, default_value = "unityrip-out")]
    output: PathBuf,

    /// Java interpreter used to launch apktool
    #[arg(long, env = "JAVA_BIN")]
    java: Option<PathBuf>,

    /// Path to the apktool jar
    #[arg(long, env = "APKTOOL_JAR")]
    apktool_jar: Option<PathBuf>,

    /// Path to the AssetRipper binary
    #[arg(long, env = "ASSET_RIPPER_PATH")]
    asset_ripper: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = ToolConfig::from_env();
    if let Some(java) = cli.java {
        config.java_bin = java;
    }
    if let Some(jar) = cli.apktool_jar {
        config.apktool_jar = jar;
    }
    if let Some(ripper) = cli.asset_ripper {
        config.asset_ripper_bin = ripper;
    }

    fs::create_dir_all(&cli.output)
        .with_context(|| format!("Failed to create output directory {}", cli.output.display()))?;

    let job_id = uuid::Uuid::new_v4().to_string();
    let sink = |_job_id: &str, update: JobUpdate| {
        if let (Some(step), Some(progress)) = (update.step, update.progress) {
            let detail = update.detail.as_deref().unwrap_or("");
            println!("[{progress:>3}%] {step:<9?} {detail}");
        }
    };

    let output = run_pipeline(&job_id, &cli.apk, &cli.output, &config, &sink)
        .with_context(|| format!("Extraction failed for {}", cli.apk.display()))?;

    let catalog_path = cli.output.join("catalog.json");
    fs::write(&catalog_path, serde_json::to_string_pretty(&output.assets)?)
        .with_context(|| format!("Failed to write {}", catalog_path.display()))?;

    let stats_path = cli.output.join("stats.json");
    fs::write(&stats_path, serde_json::to_string_pretty(&output.stats)?)
        .with_context(|| format!("Failed to write {}", stats_path.display()))?;

    println!();
    println!(
        "{} assets from {} bundles ({})",
        output.stats.total, output.stats.bundle_count, output.stats.total_size
    );
    for (asset_type, count) in &output.stats.by_type {
        println!("  {:<10} {}", asset_type, count);
    }
    println!();
    println!("Catalog: {}", catalog_path.display());
    println!("Assets:  {}", cli.output.join("extracted").display());

    Ok(())
}
