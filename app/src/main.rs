mod batch;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

use pcd_transformer::builder::DEFAULT_TRANSLATE_OFFSET;

use crate::batch::{run_batch, BatchOptions, BatchSummary};

#[derive(Parser, Debug)]
#[command(
    name = "vprofile",
    about = "Reconstructs vehicle point clouds from two 2D LIDAR scanners and measures their dimensions",
    version = "0.0.1"
)]
struct Cli {
    /// Tab-separated vehicle manifest (id, pass duration in s, speed in km/h)
    #[arg(short, long, default_value = "input_data/vehicle_info.txt", value_name = "FILE")]
    manifest: PathBuf,

    /// Directory holding LIDAR0_<id>.txt and LIDAR1_<id>.txt
    #[arg(short, long, default_value = "input_data/measurements", value_name = "DIR")]
    data_dir: PathBuf,

    /// Directory for Cloud_<id>.txt files and dimensions.txt
    #[arg(short, long, default_value = "output", value_name = "DIR")]
    output: PathBuf,

    /// Offset of the second scanner along x, in the scanner's native unit
    #[arg(long, default_value_t = DEFAULT_TRANSLATE_OFFSET)]
    translate_offset: f64,

    /// Do not translate the second scanner
    #[arg(long, conflicts_with = "translate_offset")]
    no_translate: bool,

    /// Number of worker threads (defaults to the number of CPUs)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Only process these vehicle ids
    #[arg(long, num_args = 1.., value_name = "ID")]
    only: Vec<u32>,

    #[arg(short, long)]
    verbose: bool,
}

fn print_summary(summary: &BatchSummary) {
    println!("VehicleID\tWidth (m)\tHeight (m)\tLength (m)");
    for (record, extents) in summary.succeeded() {
        println!(
            "{}\t\t{:.2}\t\t{:.2}\t\t{:.2}",
            record.file_id(),
            extents.width,
            extents.height,
            extents.length
        );
    }
}

fn main() -> ExitCode {
    let args = Cli::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, level)
        .parse_default_env()
        .init();

    log::info!("manifest: {:?}", args.manifest);
    log::info!("measurements folder: {:?}", args.data_dir);
    log::info!("output folder: {:?}", args.output);

    if let Some(jobs) = args.jobs {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
        {
            log::warn!("Failed to configure {} worker threads: {}", jobs, e);
        }
    }

    let translate_offset = if args.no_translate {
        None
    } else {
        Some(args.translate_offset)
    };
    log::info!("translate offset of second scanner: {:?}", translate_offset);

    let options = BatchOptions {
        manifest: args.manifest,
        data_dir: args.data_dir,
        output_dir: args.output,
        translate_offset,
        only: args.only,
    };

    let start = std::time::Instant::now();
    log::info!("start processing...");

    let summary = match run_batch(&options) {
        Ok(summary) => summary,
        Err(e) => {
            log::error!("Failed to run batch: {}", e);
            return ExitCode::FAILURE;
        }
    };

    print_summary(&summary);

    let failed = summary.failed_count();
    if failed > 0 {
        log::warn!(
            "{} of {} vehicles could not be processed",
            failed,
            summary.outcomes.len()
        );
    }

    log::info!("Elapsed: {:?}", start.elapsed());
    log::info!("Finish processing");
    ExitCode::SUCCESS
}
