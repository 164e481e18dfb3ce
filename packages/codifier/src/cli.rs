//! Command-line interface for the codifier.

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use lexcodify_analysis::{
    compare_versions, AmendmentAnalysis, ChangeKind, DocumentAnalysis, VersionComparison,
};

use crate::config::{ReasoningEffort, DEFAULT_AMENDMENT_MODEL, DEFAULT_ANALYSIS_MODEL};
use crate::error::Result;
use crate::llm::OpenAiClient;
use crate::pdf::{fetch_text, render_numbered_text};
use crate::pipeline::{analyze_source, parse_amendment_source};

/// Number of sections shown before the listing is truncated.
const SECTION_DISPLAY_LIMIT: usize = 10;

/// Number of amendment changes shown in the summary listing.
const CHANGE_DISPLAY_LIMIT: usize = 3;

/// Lexcodify - Download and analyze legal-document PDFs.
#[derive(Parser)]
#[command(name = "lexcodify")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a legal document and list its sections.
    Analyze {
        /// Document URL or local PDF path
        source: String,

        /// Completion model to use
        #[arg(short, long, default_value = DEFAULT_ANALYSIS_MODEL)]
        model: String,

        /// Reasoning effort for models that support it
        #[arg(short, long, value_enum, default_value_t = ReasoningEffort::Medium)]
        effort: ReasoningEffort,

        /// Emit the analysis as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Parse an amendment document into discrete change instructions.
    Amendment {
        /// Amendment URL or local PDF path
        source: String,

        /// Completion model to use
        #[arg(short, long, default_value = DEFAULT_AMENDMENT_MODEL)]
        model: String,

        /// Emit the analysis as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Compare two versions of an Act section by section.
    Compare {
        /// Base (older) version URL or path
        base: String,

        /// Revised (newer) version URL or path
        revised: String,

        /// Completion model to use
        #[arg(short, long, default_value = DEFAULT_ANALYSIS_MODEL)]
        model: String,

        /// Reasoning effort for models that support it
        #[arg(short, long, value_enum, default_value_t = ReasoningEffort::Medium)]
        effort: ReasoningEffort,

        /// Emit the comparison as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Print a document's extracted text with page markers and line numbers.
    Text {
        /// Document URL or local PDF path
        source: String,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            source,
            model,
            effort,
            json,
        } => analyze_command(&source, &model, effort, json),
        Commands::Amendment {
            source,
            model,
            json,
        } => amendment_command(&source, &model, json),
        Commands::Compare {
            base,
            revised,
            model,
            effort,
            json,
        } => compare_command(&base, &revised, &model, effort, json),
        Commands::Text { source } => text_command(&source),
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Run a closure under a spinner, clearing it before returning.
fn with_spinner<T>(message: &'static str, work: impl FnOnce() -> Result<T>) -> Result<T> {
    let pb = spinner(message);
    let result = work();
    pb.finish_and_clear();
    result
}

fn analyze_command(source: &str, model: &str, effort: ReasoningEffort, json: bool) -> Result<()> {
    let client = OpenAiClient::from_env(model)?.with_reasoning_effort(effort);

    println!(
        "{} {}",
        style("Analyzing").bold(),
        style(source).cyan()
    );

    let analysis = with_spinner("Downloading and analyzing document...", || {
        analyze_source(&client, source)
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    display_analysis(&analysis);
    Ok(())
}

fn amendment_command(source: &str, model: &str, json: bool) -> Result<()> {
    let client = OpenAiClient::from_env(model)?;

    println!(
        "{} {}",
        style("Parsing amendment").bold(),
        style(source).cyan()
    );

    let analysis = with_spinner("Downloading and parsing amendment...", || {
        parse_amendment_source(&client, source)
    })?;

    if json {
        let report = serde_json::json!({
            "analysis": analysis,
            "statistics": analysis.statistics(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    display_amendment(&analysis);
    Ok(())
}

fn compare_command(
    base: &str,
    revised: &str,
    model: &str,
    effort: ReasoningEffort,
    json: bool,
) -> Result<()> {
    let client = OpenAiClient::from_env(model)?.with_reasoning_effort(effort);

    println!(
        "{} {} {} {}",
        style("Comparing").bold(),
        style(base).cyan(),
        style("against").bold(),
        style(revised).cyan()
    );

    let v0 = with_spinner("Analyzing base version...", || {
        analyze_source(&client, base)
    })?;
    let v1 = with_spinner("Analyzing revised version...", || {
        analyze_source(&client, revised)
    })?;

    let comparison = compare_versions(Some(&v0), Some(&v1))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
        return Ok(());
    }

    display_comparison(&comparison);
    Ok(())
}

fn text_command(source: &str) -> Result<()> {
    let document = fetch_text(source)?;

    if !document.warnings.is_empty() {
        println!(
            "{} {} extraction warning(s)",
            style("Warning:").yellow().bold(),
            document.warnings.len()
        );
    }

    println!("{}", render_numbered_text(&document));
    Ok(())
}

fn display_analysis(analysis: &DocumentAnalysis) {
    println!();
    println!("  Document type: {}", style(&analysis.document_type).green());
    println!("  Legal Act: {}", analysis.is_act);
    println!("  Sections: {}", analysis.section_count);
    if !analysis.count_matches_sections() {
        println!(
            "  {} reported count differs from {} parsed section(s)",
            style("Note:").yellow().bold(),
            analysis.sections.len()
        );
    }

    if let Some(summary) = &analysis.summary {
        println!();
        println!("  Summary: {summary}");
    }

    if analysis.sections.is_empty() {
        return;
    }

    println!();
    println!("  Sections found:");
    for section in analysis.sections.iter().take(SECTION_DISPLAY_LIMIT) {
        match &section.title {
            Some(title) => println!(
                "    Section {} - {title}",
                style(&section.section_number).cyan()
            ),
            None => println!("    Section {}", style(&section.section_number).cyan()),
        }
        if let Some(preview) = &section.content_preview {
            println!("      {}", truncate(preview, 80));
        }
    }
    if analysis.sections.len() > SECTION_DISPLAY_LIMIT {
        println!(
            "    ... and {} more section(s)",
            analysis.sections.len() - SECTION_DISPLAY_LIMIT
        );
    }
}

fn display_amendment(analysis: &AmendmentAnalysis) {
    let stats = analysis.statistics();

    println!();
    if let Some(title) = &analysis.document_title {
        println!("  Title: {}", style(title).green());
    }
    if let Some(target) = &analysis.target_act {
        println!("  Target Act: {target}");
    }
    println!("  Total changes: {}", stats.total_changes);
    println!(
        "  Substitutions: {}  Insertions: {}  Deletions: {}",
        stats.substitutions, stats.insertions, stats.deletions
    );
    println!("  Average confidence: {:.2}", stats.avg_confidence);
    println!(
        "  High confidence: {}  Requires review: {}",
        stats.high_confidence_changes,
        style(stats.requires_review).yellow()
    );

    if !analysis.changes.is_empty() {
        println!();
        println!("  First change(s):");
        for change in analysis.changes.iter().take(CHANGE_DISPLAY_LIMIT) {
            println!(
                "    [{}] {} at {}",
                style(&change.change_id).cyan(),
                change.change_type.as_str(),
                change.location
            );
            if let Some(old) = &change.old_text {
                println!("      old: {}", truncate(old, 70));
            }
            if let Some(new) = &change.new_text {
                println!("      new: {}", truncate(new, 70));
            }
            println!("      confidence: {:.2}", change.confidence_score);
        }
    }

    if !analysis.processing_notes.is_empty() {
        println!();
        println!("  {}", style("Processing notes:").yellow().bold());
        for note in &analysis.processing_notes {
            println!("    - {note}");
        }
    }
}

fn display_comparison(comparison: &VersionComparison) {
    println!();
    for record in &comparison.changes {
        let (marker, styled_number) = match record.change {
            ChangeKind::Addition => ("+", style(&record.section_number).green()),
            ChangeKind::Deletion => ("-", style(&record.section_number).red()),
            ChangeKind::Modification => ("~", style(&record.section_number).yellow()),
        };
        println!("  {marker} Section {styled_number}: {}", record.description);

        if let Some(content) = &record.content {
            println!("      {}", truncate(content, 80));
        }
        if let Some(old) = &record.old_content {
            println!("      old: {}", truncate(old, 70));
        }
        if let Some(new) = &record.new_content {
            println!("      new: {}", truncate(new, 70));
        }
    }

    let summary = &comparison.summary;
    println!();
    println!(
        "  {} {} change(s): {} added, {} removed, {} modified",
        style("Summary:").bold(),
        summary.total_changes,
        style(summary.additions).green(),
        style(summary.deletions).red(),
        style(summary.modifications).yellow()
    );
}

/// Truncate to a character budget, appending an ellipsis when shortened.
fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let shortened: String = text.chars().take(limit).collect();
        format!("{shortened}...")
    }
}
