// label-sheet: Generate printable product label sheets

use chrono::Local;
use clap::Parser;
use label_sheet::catalog::load_catalog;
use label_sheet::{
    render_labels, LabelError, MalformedPolicy, PdfBackend, RecordingBackend, RenderSummary,
    SheetConfig,
};
use tracing_subscriber::EnvFilter;

// ============================================================================
// Data Structures
// ============================================================================

/// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Generate printable product label sheets")]
struct Args {
    /// Product catalog (JSON array of {name, price, upc, expiration_date})
    #[arg(short, long)]
    input: String,

    /// Output filename (defaults to labels-{date}.pdf)
    #[arg(short, long)]
    output: Option<String>,

    /// Sheet configuration file (JSON, partial settings allowed)
    #[arg(short, long)]
    config: Option<String>,

    /// Labels across each row
    #[arg(long)]
    labels_per_row: Option<usize>,

    /// Label rows on each page
    #[arg(long)]
    labels_per_column: Option<usize>,

    /// Highlight the price block
    #[arg(long, overrides_with = "no_highlight")]
    highlight: bool,

    /// Draw the price block without highlight
    #[arg(long, overrides_with = "highlight")]
    no_highlight: bool,

    /// Print an expiry line on each label
    #[arg(long)]
    expiry: bool,

    /// Fail on unreadable prices or barcodes instead of substituting defaults
    #[arg(long)]
    strict: bool,

    /// Lay out the labels without writing a PDF
    #[arg(long)]
    dry_run: bool,

    /// Log every page and slot
    #[arg(short, long)]
    verbose: bool,
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), LabelError> {
    let config = build_config(&args)?;
    let records = load_catalog(&args.input)?;

    if args.dry_run {
        let mut preview = RecordingBackend::new();
        let summary = render_labels(&records, &config, &mut preview)?;
        println!("✓ Dry run: {}", args.input);
        print_summary(&summary);
        println!("  Drawing operations: {}", preview.operations().len());
        return Ok(());
    }

    // Determine output filename
    let output_file = args
        .output
        .clone()
        .unwrap_or_else(|| format!("labels-{}.pdf", Local::now().format("%Y-%m-%d")));

    let mut backend = PdfBackend::create("Product Labels", &config, &output_file)?;
    let summary = render_labels(&records, &config, &mut backend)?;

    println!("✓ Generated: {}", output_file);
    print_summary(&summary);

    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Start from the config file (or defaults) and apply command-line overrides.
fn build_config(args: &Args) -> Result<SheetConfig, LabelError> {
    let mut config = match &args.config {
        Some(path) => SheetConfig::from_json_file(path)?,
        None => SheetConfig::default(),
    };

    if let Some(per_row) = args.labels_per_row {
        config.labels_per_row = per_row;
    }
    if let Some(per_column) = args.labels_per_column {
        config.labels_per_column = per_column;
    }
    if args.highlight {
        config.color_highlight_enabled = true;
    }
    if args.no_highlight {
        config.color_highlight_enabled = false;
    }
    if args.expiry {
        config.expiry_line_enabled = true;
    }
    if args.strict {
        config.malformed_policy = MalformedPolicy::Reject;
    }

    config.validate()?;
    Ok(config)
}

fn print_summary(summary: &RenderSummary) {
    println!("  Labels: {}", summary.records);
    println!("  Pages: {}", summary.pages);
    if summary.substitutions > 0 {
        println!("  Defaults substituted: {}", summary.substitutions);
    }
}
