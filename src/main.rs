use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use mktrainset::{BatchConfig, BatchItem, BatchProcessor, Mode, ThresholdContourProvider};
use mktrainset::artifacts::DEFAULT_STROKE_WIDTH;
use mktrainset::pipeline::DEFAULT_MARGIN;

#[derive(Parser)]
#[command(name = "mktrainset")]
#[command(about = "Cut polygon shapes out of scanned images, or mark them for inspection")]
#[command(after_help = "NUMBER OF INPUT FILES MUST BE EQUAL TO NUMBER OF OUTPUTS!")]
struct Cli {
    /// What to produce for each input image
    #[arg(value_enum)]
    action: Mode,

    /// Input images followed by the same number of outputs
    /// (directories for split, PNG files for mark)
    #[arg(value_name = "PATHS", num_args = 2.., required = true)]
    paths: Vec<PathBuf>,

    /// Pixels added around every detected shape
    #[arg(long, default_value_t = DEFAULT_MARGIN)]
    margin: u32,

    /// Outline thickness for mark
    #[arg(long, default_value_t = DEFAULT_STROKE_WIDTH)]
    stroke_width: u32,

    /// Fixed binarization level (Otsu's method when omitted)
    #[arg(long)]
    threshold: Option<u8>,

    /// Ignore contours with fewer points than this
    #[arg(long, default_value_t = 1)]
    min_points: usize,

    /// Write black and white cutouts for split
    #[arg(long)]
    binary_crops: bool,

    /// Exit with an error status if any image failed
    #[arg(long)]
    strict: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// First half of the paths are inputs, second half outputs
    fn batch_items(&self) -> anyhow::Result<Vec<BatchItem>> {
        if self.paths.len() % 2 != 0 {
            anyhow::bail!(
                "Expected as many outputs as inputs, got {} paths",
                self.paths.len()
            );
        }
        let (inputs, outputs) = self.paths.split_at(self.paths.len() / 2);
        Ok(BatchItem::pair(inputs.iter().cloned(), outputs.iter().cloned()))
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_tracing(args.verbose);

    let items = args.batch_items()?;

    let provider = ThresholdContourProvider::new()
        .with_threshold(args.threshold)
        .with_min_points(args.min_points);

    let config = BatchConfig {
        margin: args.margin,
        stroke_width: args.stroke_width,
        binary_crops: args.binary_crops,
        ..BatchConfig::default()
    };
    let processor = BatchProcessor::new(provider).with_config(config);

    let report = processor.run(args.action, &items);

    tracing::info!(
        "Done: {} images, {} failed, {} artifacts written, {} artifacts failed",
        report.items.len(),
        report.failed_items(),
        report.artifacts_written(),
        report.artifacts_failed()
    );

    if args.strict && report.failed_items() > 0 {
        anyhow::bail!("{} of {} images failed", report.failed_items(), report.items.len());
    }

    Ok(())
}
