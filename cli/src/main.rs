//! docsift CLI - PDF outline extraction and section ranking tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docsift::input::COLLECTION_OUTPUT_FILE;
use docsift::{render, CleanupPreset, Docsift, JsonFormat, LayoutOptions};

#[derive(Parser)]
#[command(name = "docsift")]
#[command(author = "iyulab")]
#[command(version)]
#[command(
    about = "Extract PDF outlines and rank sections for a persona from text-run dumps",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract title and H1-H3 outline from run dumps
    Outline {
        /// Run dump files or directories of run dumps
        #[arg(value_name = "RUNS", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory (stdout if not specified)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Output Markdown instead of JSON
        #[arg(long)]
        markdown: bool,

        /// Text cleanup preset
        #[arg(long, value_enum)]
        cleanup: Option<CleanupLevel>,

        /// Size difference (pt) below which heading buckets are ordered by style
        #[arg(long, env = "DOCSIFT_SIZE_TOLERANCE")]
        size_tolerance: Option<f32>,

        /// Fraction of page 1 searched for the title
        #[arg(long, env = "DOCSIFT_TITLE_ZONE")]
        title_zone: Option<f32>,

        /// Process documents one at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Rank the sections of a collection for its persona and job
    Rank {
        /// Collection directory (challenge1b_input.json + runs/)
        #[arg(value_name = "DIR")]
        collection: PathBuf,

        /// Output file (defaults to <DIR>/challenge1b_output.json)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Number of sections that get refined text
        #[arg(long, env = "DOCSIFT_TOP_K", default_value = "5")]
        top_k: usize,

        /// Maximum number of ranked sections
        #[arg(long, env = "DOCSIFT_MAX_SECTIONS", default_value = "10")]
        max_sections: usize,

        /// Character cap for refined text
        #[arg(long, env = "DOCSIFT_CHAR_CAP", default_value = "500")]
        char_cap: usize,

        /// Add semantic similarity from the built-in hashing embedder
        #[arg(long)]
        semantic: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Print the result instead of writing it
        #[arg(long)]
        stdout: bool,
    },

    /// Show layout statistics of a run dump
    Info {
        /// Run dump file
        #[arg(value_name = "RUNS")]
        input: PathBuf,

        /// Output statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CleanupLevel {
    /// Minimal cleanup (Unicode normalization only)
    Minimal,
    /// Standard cleanup (default)
    Standard,
}

impl From<CleanupLevel> for CleanupPreset {
    fn from(level: CleanupLevel) -> Self {
        match level {
            CleanupLevel::Minimal => CleanupPreset::Minimal,
            CleanupLevel::Standard => CleanupPreset::Standard,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Outline {
            inputs,
            output,
            compact,
            markdown,
            cleanup,
            size_tolerance,
            title_zone,
            sequential,
        }) => {
            let mut options = LayoutOptions::new().with_parallel(!sequential);
            if let Some(level) = cleanup {
                options = options.with_cleanup_preset(level.into());
            }
            if let Some(points) = size_tolerance {
                options = options.with_size_tolerance(points);
            }
            if let Some(fraction) = title_zone {
                options = options.with_title_zone(fraction);
            }
            let format = if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            cmd_outline(&inputs, output.as_deref(), options, format, markdown)
        }
        Some(Commands::Rank {
            collection,
            output,
            top_k,
            max_sections,
            char_cap,
            semantic,
            compact,
            stdout,
        }) => {
            let mut docsift = Docsift::new()
                .with_top_k(top_k)
                .with_max_sections(max_sections)
                .with_char_cap(char_cap);
            if semantic {
                docsift = docsift.with_hashing_embedder();
            }
            let format = if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            let output = if stdout {
                None
            } else {
                Some(output.unwrap_or_else(|| collection.join(COLLECTION_OUTPUT_FILE)))
            };
            cmd_rank(&docsift, &collection, output.as_deref(), format)
        }
        Some(Commands::Info { input, json }) => cmd_info(&input, json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: docsift <COMMAND>".yellow());
            println!("       docsift --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Expand directories into the run dumps they contain, sorted by name.
fn collect_run_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut entries: Vec<PathBuf> = fs::read_dir(input)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
                .collect();
            entries.sort();
            files.extend(entries);
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}

fn cmd_outline(
    inputs: &[PathBuf],
    output: Option<&Path>,
    options: LayoutOptions,
    format: JsonFormat,
    markdown: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let files = collect_run_files(inputs)?;
    if files.is_empty() {
        return Err("no run dumps found".into());
    }

    let docsift = Docsift::new().with_layout_options(options);
    let extension = if markdown { "md" } else { "json" };

    let pb = match output {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let pb = ProgressBar::new(files.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                    .progress_chars("#>-"),
            );
            Some(pb)
        }
        None => None,
    };

    let mut failures = 0;
    for file in &files {
        if let Some(pb) = &pb {
            pb.set_message(file.display().to_string());
        }

        log::debug!("extracting outline of {}", file.display());
        let result = docsift.load(file).and_then(|analyzed| {
            if markdown {
                Ok(analyzed.to_markdown())
            } else {
                analyzed.to_json(format)
            }
        });

        match (result, output) {
            (Ok(text), Some(dir)) => {
                let stem = file.file_stem().unwrap_or_default().to_string_lossy();
                fs::write(dir.join(format!("{}.{}", stem, extension)), text)?;
            }
            (Ok(text), None) => println!("{}", text),
            (Err(e), _) => {
                failures += 1;
                let line = format!("{} {}: {}", "Failed".red(), file.display(), e);
                match &pb {
                    Some(pb) => pb.println(line),
                    None => eprintln!("{}", line),
                }
            }
        }

        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }

    if let (Some(pb), Some(dir)) = (&pb, output) {
        pb.finish_with_message("Done!");
        println!(
            "\n{} {} outlines written to {}",
            "Done!".green().bold(),
            files.len() - failures,
            dir.display()
        );
    }

    if failures > 0 {
        return Err(format!("{} of {} documents failed", failures, files.len()).into());
    }
    Ok(())
}

fn cmd_rank(
    docsift: &Docsift,
    collection: &Path,
    output: Option<&Path>,
    format: JsonFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Ranking {}...", collection.display()));
    log::debug!("ranking collection {}", collection.display());

    let result = docsift.rank_dir(collection)?;
    pb.finish_and_clear();

    let json = render::collection_to_json(&result, format)?;

    match output {
        Some(path) => {
            fs::write(path, &json)?;
            println!("{} {}", "Saved to".green(), path.display());
        }
        None => println!("{}", json),
    }

    println!(
        "{}: {} processed, {} skipped, {} sections ranked",
        "Summary".bold(),
        result.processed_documents.len(),
        result.skipped_documents.len(),
        result.ranked.len()
    );
    for skipped in &result.skipped_documents {
        println!(
            "  {} {} ({})",
            "└─".dimmed(),
            skipped.document,
            skipped.reason.to_string().yellow()
        );
    }

    Ok(())
}

fn cmd_info(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let analyzed = Docsift::new().load(input)?;
    let stats = analyzed.stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Document".bold(), stats.document);
    println!("{}: {}", "Pages".bold(), stats.page_count);
    let title = analyzed.outline().title.as_str();
    println!(
        "{}: {}",
        "Title".bold(),
        if title.is_empty() { "(none)" } else { title }
    );

    println!();
    println!("{}", "Layout Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Runs".bold(), stats.run_count);
    println!("{}: {}", "Lines".bold(), stats.line_count);
    println!("{}: {:.1}pt", "Body size".bold(), stats.body_size);
    let sizes: Vec<String> = stats
        .distinct_sizes
        .iter()
        .map(|s| format!("{:.1}", s))
        .collect();
    println!("{}: {}", "Font sizes".bold(), sizes.join(", "));
    println!(
        "{}: {} (H1 {}, H2 {}, H3 {})",
        "Headings".bold(),
        stats.heading_count(),
        stats.h1_count,
        stats.h2_count,
        stats.h3_count
    );

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docsift".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF outline extraction and section ranking tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/docsift".dimmed());
    println!("License: MIT");
}
