use anyhow::Result;
use cardgloss::annotator::{builtin_dictionary, AnnotatorConfig, KeywordAnnotator, KeywordDictionary};
use cardgloss::batch::{self, BatchConfig, RunStats};
use cardgloss::render::{self, RenderFormat};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;
use tokio::io::AsyncReadExt;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "cardgloss")]
#[command(about = "Highlight rules keywords in card effect text")]
#[command(version)]
struct Args {
    /// Text files to annotate; reads stdin when none are given
    files: Vec<PathBuf>,

    /// JSON dictionary of {keyword, explanation} objects (defaults to the built-in glossary)
    #[arg(long)]
    dictionary: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = FormatArg::Text)]
    format: FormatArg,

    /// Text shown for empty input
    #[arg(long)]
    placeholder: Option<String>,

    /// Abort on first unreadable file
    #[arg(long)]
    fail_fast: bool,

    /// Maximum files read concurrently
    #[arg(long)]
    concurrency: Option<usize>,

    /// Write run statistics JSON to this path
    #[arg(long)]
    stats_out: Option<PathBuf>,

    /// Print the active dictionary and exit
    #[arg(long)]
    list_keywords: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    /// Keywords wrapped in 【】
    Text,
    Html,
    Json,
}

impl From<FormatArg> for RenderFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => RenderFormat::Brackets,
            FormatArg::Html => RenderFormat::Html,
            FormatArg::Json => RenderFormat::Json,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // WHY: stdout carries annotated output, so structured logs go to stderr
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .json()
        .init();

    let args = Args::parse();
    info!(?args, "Parsed CLI arguments");

    let dictionary = match &args.dictionary {
        Some(path) => {
            if !path.is_file() {
                anyhow::bail!("Dictionary file does not exist: {}", path.display());
            }
            KeywordDictionary::load_json(path).await?
        }
        None => builtin_dictionary()?.clone(),
    };

    if args.list_keywords {
        for entry in &dictionary {
            println!("{}\t{}", entry.keyword, entry.explanation);
        }
        return Ok(());
    }

    let mut config = AnnotatorConfig::default();
    if let Some(placeholder) = args.placeholder.clone() {
        config.placeholder = placeholder;
    }
    let annotator = KeywordAnnotator::new(dictionary, config);
    let format = RenderFormat::from(args.format);

    if args.files.is_empty() {
        let mut input = String::new();
        tokio::io::stdin().read_to_string(&mut input).await?;
        let text = input.trim_end_matches(['\r', '\n']);

        let segments = annotator.annotate(text);
        println!("{}", render::render(format, &segments)?);
        return Ok(());
    }

    let mut batch_config = BatchConfig {
        fail_fast: args.fail_fast,
        ..Default::default()
    };
    if let Some(concurrency) = args.concurrency {
        batch_config.concurrency = concurrency;
    }

    let run_start = Instant::now();
    let annotations = batch::annotate_files(args.files.as_slice(), &annotator, &batch_config).await?;
    let run_stats = RunStats::from_annotations(&annotations, run_start.elapsed().as_millis() as u64);

    let show_headers = annotations.len() > 1;
    for annotation in &annotations {
        if let Some(ref error) = annotation.stats.error {
            eprintln!("cardgloss: {error}");
            continue;
        }
        if show_headers {
            println!("==> {} <==", annotation.path.display());
        }
        let segments: Vec<_> = annotation.segments.iter().map(|s| s.as_segment()).collect();
        println!("{}", render::render(format, &segments)?);
    }

    info!(
        "Annotated {} files ({} failed), {} keyword segments",
        run_stats.files_processed, run_stats.files_failed, run_stats.total_keyword_segments
    );

    if let Some(stats_path) = &args.stats_out {
        batch::write_run_stats(stats_path, &run_stats).await?;
        info!("Wrote run stats to {}", stats_path.display());
    }

    // Unreadable files are reported above; still signal them through the exit status
    if run_stats.files_failed > 0 {
        anyhow::bail!("{} of {} files could not be read", run_stats.files_failed, annotations.len());
    }

    Ok(())
}
