use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{info, warn};
use rerank_viz::core::{
    align_batch, load_rerank_entries, load_score_records, BatchAlignment, CoordSpace,
    GAZE_RESULTS_FILE, REC_RESULTS_FILE,
};
use rerank_viz::draw::{letterbox, Colormap};
use rerank_viz::{
    format_order_text, format_ranking_text, image_report, overlay_file_name, render_bbox,
    render_candidate, render_ordered, select_records, DirImageSource, ImageSource, LookupError,
    Selection, VizConfig, VizError,
};

#[derive(Parser)]
#[command(name = "rerank-viz", version)]
#[command(about = "Compare gaze-based and REC-based rankings of referring expressions")]
struct Cli {
    /// More log output (repeat for debug/trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print both rankings for each image
    Rank(RankArgs),
    /// Draw gaze paths, REC points and gold boxes for the selected candidates
    Render(RenderArgs),
    /// Draw gaze paths in a precomputed rerank order
    Order(OrderArgs),
}

#[derive(Args)]
struct ScoreFiles {
    /// Gaze scoring results
    #[arg(long, default_value = GAZE_RESULTS_FILE)]
    gaze: PathBuf,
    /// REC scoring results
    #[arg(long, default_value = REC_RESULTS_FILE)]
    rec: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Args)]
struct RankArgs {
    #[command(flatten)]
    files: ScoreFiles,
    /// Only this image (full path or file name)
    #[arg(long)]
    image: Option<String>,
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Args)]
struct RenderArgs {
    #[command(flatten)]
    files: ScoreFiles,
    /// Directory holding the base images
    #[arg(long)]
    images: PathBuf,
    /// Output directory for the overlays
    #[arg(long)]
    out: PathBuf,
    /// Only this image (full path or file name)
    #[arg(long)]
    image: Option<String>,
    /// Only this candidate index
    #[arg(long)]
    candidate: Option<usize>,
    /// Coordinate space of gaze and REC points: normalized (0..100) or pixel
    #[arg(long)]
    space: Option<CoordSpace>,
    /// JSON rendering config
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the sequence colormap
    #[arg(long)]
    colormap: Option<Colormap>,
    /// Do not draw fixation indices
    #[arg(long)]
    no_labels: bool,
}

#[derive(Args)]
struct OrderArgs {
    /// Rerank results with stored orders
    #[arg(long)]
    results: PathBuf,
    /// Directory holding the base images
    #[arg(long)]
    images: PathBuf,
    /// Output directory for the overlays
    #[arg(long)]
    out: PathBuf,
    /// JSON rendering config
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the sequence colormap
    #[arg(long)]
    colormap: Option<Colormap>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    #[cfg(feature = "tracing")]
    {
        let _ = (verbose, quiet);
        let _ = tracing_log::LogTracer::init();
        rerank_viz::core::init_tracing(false);
    }
    #[cfg(not(feature = "tracing"))]
    {
        let level = rerank_viz::core::level_from_verbosity(verbose, quiet);
        let _ = rerank_viz::core::init_with_level(level);
    }
}

fn run(command: Commands) -> Result<(), VizError> {
    match command {
        Commands::Rank(args) => run_rank(args),
        Commands::Render(args) => run_render(args),
        Commands::Order(args) => run_order(args),
    }
}

fn load_batch(files: &ScoreFiles) -> Result<BatchAlignment, VizError> {
    let load = |path: &Path| {
        load_score_records(path).map_err(|source| VizError::Records {
            path: path.to_path_buf(),
            source,
        })
    };
    let gaze = load(&files.gaze)?;
    let rec = load(&files.rec)?;
    let batch = align_batch(gaze, rec);
    for failure in &batch.failures {
        eprintln!("skipping pair {}: {}", failure.index, failure.error);
    }
    info!("aligned {} record(s)", batch.records.len());
    Ok(batch)
}

fn load_config(path: Option<&Path>, colormap: Option<Colormap>) -> Result<VizConfig, VizError> {
    let mut config = match path {
        Some(path) => VizConfig::load_json(path)?,
        None => VizConfig::default(),
    };
    if let Some(colormap) = colormap {
        config.sequence.colormap = colormap;
    }
    Ok(config)
}

fn run_rank(args: RankArgs) -> Result<(), VizError> {
    let batch = load_batch(&args.files)?;
    let selection = Selection {
        image: args.image,
        candidate: None,
    };
    let records = select_records(&batch, &selection)?;
    match args.format {
        Format::Text => {
            for record in records {
                print!("{}", format_ranking_text(record));
            }
        }
        Format::Json => {
            let reports: Vec<_> = records.into_iter().map(image_report).collect();
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }
    Ok(())
}

fn run_render(args: RenderArgs) -> Result<(), VizError> {
    let mut config = load_config(args.config.as_deref(), args.colormap)?;
    if args.no_labels {
        config.sequence.show_labels = false;
    }
    let space = config.resolve_space(args.space)?;
    let batch = load_batch(&args.files)?;
    let selection = Selection {
        image: args.image,
        candidate: args.candidate,
    };
    let records = select_records(&batch, &selection)?;

    let source = DirImageSource::new(&args.images);
    fs::create_dir_all(&args.out)?;
    let mut written = 0usize;
    for record in records {
        let candidates = selection.candidates(record)?;
        let base = match source.lookup(record.file_name()) {
            Ok(image) => image,
            Err(LookupError::NotFound(name)) => {
                eprintln!("image `{name}` not found in {}", source.root().display());
                continue;
            }
            Err(err) => {
                warn!("{err}");
                continue;
            }
        };

        let key = record.image_path();
        render_bbox(record, &base, &config).save(args.out.join(overlay_file_name(key, "bbox")))?;
        written += 1;
        for index in candidates {
            let overlays = render_candidate(record, &base, index, space, &config)?;
            if !overlays.has_gaze {
                println!("{}: no gaze coordinates available for candidate {index}", record.file_name());
            }
            if !overlays.has_rec {
                println!("{}: no REC point available for candidate {index}", record.file_name());
            }
            overlays
                .gaze
                .save(args.out.join(overlay_file_name(key, &format!("c{index:02}_gaze"))))?;
            overlays
                .rec
                .save(args.out.join(overlay_file_name(key, &format!("c{index:02}_rec"))))?;
            written += 2;
        }
    }
    println!("wrote {written} image(s) to {}", args.out.display());
    Ok(())
}

fn run_order(args: OrderArgs) -> Result<(), VizError> {
    let config = load_config(args.config.as_deref(), args.colormap)?;
    let entries = load_rerank_entries(&args.results).map_err(|source| VizError::Records {
        path: args.results.clone(),
        source,
    })?;

    let source = DirImageSource::new(&args.images);
    fs::create_dir_all(&args.out)?;
    let mut written = 0usize;
    for entry in &entries {
        print!("{}", format_order_text(entry));
        let base = match source.lookup(&entry.imagefile) {
            Ok(image) => image,
            Err(LookupError::NotFound(name)) => {
                eprintln!("image `{name}` not found in {}", source.root().display());
                continue;
            }
            Err(err) => {
                warn!("{err}");
                continue;
            }
        };

        let canvas = letterbox(&base, config.letterbox.target_size(), config.letterbox.fill);
        for overlay in render_ordered(entry, &canvas.image, &config) {
            let suffix = format!("gaze_r{:02}_c{:02}", overlay.rank, overlay.index);
            overlay
                .image
                .save(args.out.join(overlay_file_name(&entry.imagefile, &suffix)))?;
            written += 1;
        }
    }
    println!("wrote {written} image(s) to {}", args.out.display());
    Ok(())
}
