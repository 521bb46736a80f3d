//! Command line frontend: write automatic list numbers into a `.docx` file.
//!
//! # Usage
//!
//! ```sh
//! listnum report.docx
//! listnum report.docx -o numbered.docx --to gfm --track-changes accept
//! listnum report.docx --config listnum.yaml -vv
//! ```

use clap::{ArgAction, Parser, ValueEnum};
use listnum::convert::convert_docx;
use listnum::{ConvertOptions, NumberingProcessor, ProcessOptions, TrackChanges, default_output_path};
use std::error::Error as _;
use std::path::{Path, PathBuf};

/// Materialise automatic list numbering in Word documents
#[derive(Parser, Debug)]
#[command(
    name = "listnum",
    about = "Write Word's automatic list numbers into the paragraph text",
    long_about = "Resolves the automatic list numbering of a .docx file into literal prefixes\n\
                  (\"1.\", \"2.1.\", \"a)\", \"IV.\") written into the paragraphs, so that tools reading\n\
                  the text keep them. Optionally converts the result with pandoc.",
    version
)]
struct Args {
    /// Input .docx file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output .docx file [default: <INPUT stem>_numbered.docx]
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// YAML file with processing options; flags override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Keep numbering found in tracked revisions
    #[arg(long)]
    no_clean: bool,

    /// Convert the result with pandoc to this format (markdown, gfm, html, ...)
    #[arg(long, value_name = "FORMAT")]
    to: Option<String>,

    /// How pandoc renders tracked changes
    #[arg(long, value_enum)]
    track_changes: Option<TrackChangesArg>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Tracked changes modes for CLI
#[derive(Debug, Clone, Copy, ValueEnum)]
enum TrackChangesArg {
    /// Keep all changes and comments
    All,
    /// Accept all changes
    Accept,
    /// Reject all changes
    Reject,
}

impl From<TrackChangesArg> for TrackChanges {
    fn from(arg: TrackChangesArg) -> Self {
        match arg {
            TrackChangesArg::All => TrackChanges::All,
            TrackChangesArg::Accept => TrackChanges::Accept,
            TrackChangesArg::Reject => TrackChanges::Reject,
        }
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(err) = run(&args) {
        eprintln!("Error: {}", err);
        let mut source = err.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = cause.source();
        }
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    validate_input(&args.input)?;
    let options = build_options(args)?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));

    let processor = NumberingProcessor::new(options);
    let report = processor.process_file(&args.input, &output)?;
    if let Some(stats) = report.document {
        println!(
            "Numbered {} of {} paragraphs: {}",
            stats.numbered,
            stats.paragraphs,
            output.display()
        );
    } else {
        println!("No main document part, copied: {}", output.display());
    }

    if let Some(convert) = &processor.options().convert {
        let converted = convert_docx(&output, convert)?;
        println!("Converted to {}: {}", convert.format, converted.display());
    }

    Ok(())
}

fn validate_input(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !input.is_file() {
        return Err(format!("input file does not exist: {}", input.display()).into());
    }
    let is_docx = input
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("docx"));
    if !is_docx {
        return Err(format!("input must have a .docx extension: {}", input.display()).into());
    }
    Ok(())
}

fn build_options(args: &Args) -> listnum::Result<ProcessOptions> {
    let mut options = match &args.config {
        Some(path) => ProcessOptions::from_yaml_file(path)?,
        None => ProcessOptions::default(),
    };

    if args.no_clean {
        options.clean_revisions = false;
    }

    if args.to.is_some() || args.track_changes.is_some() {
        let mut convert = options.convert.take().unwrap_or_default();
        if let Some(format) = &args.to {
            convert.format = format.clone();
        }
        if let Some(mode) = args.track_changes {
            convert.track_changes = mode.into();
        }
        options.convert = Some(convert);
    }

    Ok(options)
}
