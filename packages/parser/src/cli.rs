//! Command-line interface for the parser.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{
    ParseOptions, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH, DEFAULT_PAGE_HEADER_PATTERN,
    DEFAULT_STOP_MARKER_PATTERN, TEXT_WRAP_WIDTH,
};
use crate::error::Result;
use crate::output::{load_document, save_document, DocumentFormat};
use crate::parser::parse_file;
use crate::text::wrap_indented;
use crate::types::{Article, Document};

/// Katiba Parser - Segment constitution text into chapters, articles and clauses.
#[derive(Parser)]
#[command(name = "katiba-parser")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse raw constitution text into a YAML or JSON document.
    Parse(ParseArgs),

    /// Search article titles and clause text in a parsed document.
    Search {
        /// Parsed document (.yaml, .yml or .json)
        document: PathBuf,

        /// Case-insensitive search text
        query: String,
    },

    /// Print a condensed outline of a parsed document.
    Summary {
        /// Parsed document (.yaml, .yml or .json)
        document: PathBuf,
    },

    /// Show a single chapter, article or schedule from a parsed document.
    Show {
        /// Parsed document (.yaml, .yml or .json)
        document: PathBuf,

        #[command(flatten)]
        target: ShowTarget,
    },
}

/// What `show` prints; exactly one is required.
#[derive(Args, Debug, PartialEq, Eq)]
#[group(required = true, multiple = false)]
pub struct ShowTarget {
    /// Chapter number
    #[arg(short, long)]
    pub chapter: Option<u32>,

    /// Article number
    #[arg(short, long)]
    pub article: Option<u32>,

    /// Schedule number
    #[arg(short, long)]
    pub schedule: Option<u32>,
}

#[derive(Args)]
pub struct ParseArgs {
    /// Raw text file (default: docs/constitution_raw_text.txt)
    pub input: Option<PathBuf>,

    /// Output file (default: constitution.yaml)
    pub output: Option<PathBuf>,

    /// Output format (default: from the output file extension)
    #[arg(short, long, value_enum)]
    pub format: Option<DocumentFormat>,

    /// Remove running page headers ("Constitution of Kenya, 2010")
    #[arg(long)]
    pub strip_page_headers: bool,

    /// Remove lines matching a custom page header pattern
    #[arg(long, value_name = "REGEX")]
    pub page_header: Option<String>,

    /// End the body at the SCHEDULES heading and parse what follows as schedules
    #[arg(long)]
    pub stop_at_schedules: bool,

    /// Segment chapters in parallel
    #[arg(long)]
    pub parallel: bool,
}

impl ParseArgs {
    /// Build parse options from the flags.
    ///
    /// A custom `--page-header` takes precedence over `--strip-page-headers`.
    pub fn options(&self) -> Result<ParseOptions> {
        let mut options = ParseOptions::new().with_parallel(self.parallel);

        if let Some(pattern) = &self.page_header {
            options = options.with_page_header(pattern)?;
        } else if self.strip_page_headers {
            options = options.with_page_header(DEFAULT_PAGE_HEADER_PATTERN)?;
        }

        if self.stop_at_schedules {
            options = options.with_stop_marker(DEFAULT_STOP_MARKER_PATTERN)?;
        }

        Ok(options)
    }
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse(args) => parse_command(&args),
        Commands::Search { document, query } => search_command(&document, &query),
        Commands::Summary { document } => summary_command(&document),
        Commands::Show { document, target } => show_command(&document, &target),
    }
}

/// Execute the parse command.
fn parse_command(args: &ParseArgs) -> Result<()> {
    // Validate flags before reading anything
    let options = args.options()?;

    let input = args
        .input
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_PATH));
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH));
    let format = match args.format {
        Some(format) => format,
        None => DocumentFormat::from_path(&output)?,
    };

    println!(
        "{} {}",
        style("Parsing").bold(),
        style(input.display()).cyan()
    );
    println!();

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );

    pb.set_message("Segmenting text...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let document = match parse_file(&input, &options) {
        Ok(document) => document,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Saving document...");

    let output_path = match save_document(&document, &output, format) {
        Ok(path) => path,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();

    let stats = document.statistics();
    println!("  Chapters: {}", stats.chapters);
    println!("  Articles: {}", stats.articles);
    println!("  Clauses: {}", stats.clauses);
    if stats.schedules > 0 {
        println!("  Schedules: {}", stats.schedules);
    }
    if stats.chapters == 0 {
        println!(
            "  {}",
            style("Warning: no chapter headings found").yellow().bold()
        );
    }

    println!();
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        output_path.display()
    );

    Ok(())
}

/// Execute the search command.
fn search_command(path: &Path, query: &str) -> Result<()> {
    let document = load_document(path)?;
    let hits = document.search(query);

    println!(
        "{} for {}",
        style(format!("{} result(s)", hits.len())).bold(),
        style(query).cyan()
    );

    for hit in hits {
        println!();
        println!(
            "{} {}: {} {}",
            style("Article").bold(),
            style(hit.article.number).cyan(),
            hit.article.title,
            style(format!("(Chapter {})", hit.chapter.number)).dim()
        );
        print_clauses(hit.article);
    }

    Ok(())
}

/// Execute the summary command.
fn summary_command(path: &Path) -> Result<()> {
    let document = load_document(path)?;
    print!("{}", document.summary());

    let stats = document.statistics();
    println!(
        "{} chapters, {} parts, {} articles, {} clauses, {} sub-clauses, {} mini-clauses, {} schedules",
        stats.chapters,
        stats.parts,
        stats.articles,
        stats.clauses,
        stats.sub_clauses,
        stats.mini_clauses,
        stats.schedules
    );

    Ok(())
}

/// Execute the show command.
fn show_command(path: &Path, target: &ShowTarget) -> Result<()> {
    let document = load_document(path)?;

    match (target.chapter, target.article, target.schedule) {
        (Some(number), _, _) => show_chapter(&document, number),
        (_, Some(number), _) => show_article(&document, number),
        (_, _, Some(number)) => show_schedule(&document, number),
        // clap requires exactly one
        (None, None, None) => Ok(()),
    }
}

fn show_chapter(document: &Document, number: u32) -> Result<()> {
    let chapter = document.require_chapter(number)?;

    println!(
        "{} {}",
        style(format!("CHAPTER {}", chapter.number)).bold(),
        style(&chapter.title).green()
    );
    if !chapter.intro.is_empty() {
        println!("{}", wrap_indented(&chapter.intro, TEXT_WRAP_WIDTH, "  "));
    }
    for article in &chapter.articles {
        println!("  Article {}: {}", article.number, article.title);
    }
    for part in &chapter.parts {
        println!();
        println!(
            "  {} {}",
            style(format!("PART {}", part.number)).bold(),
            part.title
        );
        for article in &part.articles {
            println!("    Article {}: {}", article.number, article.title);
        }
    }

    Ok(())
}

fn show_article(document: &Document, number: u32) -> Result<()> {
    let article = document.require_article(number)?;

    if let Some(chapter) = document.chapter_for_article(number) {
        println!(
            "{}",
            style(format!("Chapter {}: {}", chapter.number, chapter.title)).dim()
        );
    }
    println!(
        "{} {}",
        style(format!("Article {}", article.number)).bold(),
        style(&article.title).green()
    );
    print_clauses(article);

    Ok(())
}

fn show_schedule(document: &Document, number: u32) -> Result<()> {
    let schedule = document.require_schedule(number)?;

    println!(
        "{} {}",
        style(format!("SCHEDULE {}", schedule.number)).bold(),
        style(&schedule.title).green()
    );
    if !schedule.reference.is_empty() {
        println!("{}", style(&schedule.reference).dim());
    }
    if !schedule.text.is_empty() {
        println!("{}", wrap_indented(&schedule.text, TEXT_WRAP_WIDTH, "  "));
    }
    for item in &schedule.items {
        let text = format!("{}. {}", item.label, item.text);
        println!("{}", wrap_indented(&text, TEXT_WRAP_WIDTH, "  "));
    }

    Ok(())
}

fn print_clauses(article: &Article) {
    for clause in &article.clauses {
        let text = if clause.number.is_empty() {
            clause.text.clone()
        } else {
            format!("({}) {}", clause.number, clause.text)
        };
        println!("{}", wrap_indented(&text, TEXT_WRAP_WIDTH, "  "));

        for sub in &clause.sub_clauses {
            let text = format!("({}) {}", sub.label, sub.text);
            println!("{}", wrap_indented(&text, TEXT_WRAP_WIDTH, "    "));

            for mini in &sub.mini_clauses {
                let text = format!("({}) {}", mini.numeral, mini.text);
                println!("{}", wrap_indented(&text, TEXT_WRAP_WIDTH, "      "));
            }
        }
    }
}
