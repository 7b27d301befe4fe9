use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::analysis::{analyze_conversation, format_tool_stats, session_stats};
use crate::config::{DEFAULT_PROMPTS_PER_PAGE, PageBudget, TranscriptConfig};
use crate::discovery::find_local_sessions;
use crate::generator::{generate_batch_html, generate_html};
use crate::grouper::group_conversations;
use crate::models::SessionStats;
use crate::paginate::paginate;
use crate::parsers::parse_session_file;
use crate::utils::{default_projects_dir, format_path_with_tilde};

#[derive(Parser)]
#[command(name = "claude-code-transcripts")]
#[command(version = "0.1.0")]
#[command(
    about = "Convert Claude Code session logs into paginated HTML transcripts",
    long_about = None
)]
pub struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert one session file (JSON or JSONL) into HTML pages
    Convert {
        /// Session file to convert
        file: PathBuf,
        /// Output directory (defaults to ./<session name>)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// GitHub repository (owner/name) for commit links; detected when omitted
        #[arg(long, value_parser = parse_repo)]
        repo: Option<String>,
        /// Conversations per page
        #[arg(long, default_value_t = DEFAULT_PROMPTS_PER_PAGE)]
        prompts_per_page: usize,
        /// Start a new page once the estimated content size would exceed this many bytes
        #[arg(long)]
        max_page_bytes: Option<usize>,
    },
    /// Convert every session under a projects directory into an archive
    Batch {
        /// Projects directory (defaults to ~/.claude/projects)
        #[arg(long)]
        projects_dir: Option<PathBuf>,
        /// Output directory for the archive
        #[arg(short, long)]
        output: PathBuf,
        /// Include agent-* sub-agent sessions
        #[arg(long)]
        include_agents: bool,
    },
    /// List recent local sessions
    List {
        /// Projects directory (defaults to ~/.claude/projects)
        #[arg(long)]
        projects_dir: Option<PathBuf>,
        /// Maximum number of sessions to show
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: usize,
    },
    /// Show statistics about a session file
    Stats {
        /// Session file to analyze
        file: PathBuf,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_repo(value: &str) -> Result<String, String> {
    let valid_part = |part: &str| {
        !part.is_empty()
            && part.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    };
    match value.split_once('/') {
        Some((owner, name)) if valid_part(owner) && valid_part(name) => Ok(value.to_string()),
        _ => Err(format!("expected OWNER/NAME, got '{value}'")),
    }
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Convert { file, output, repo, prompts_per_page, max_page_bytes } => {
            let config = TranscriptConfig::default()
                .with_budget(PageBudget::new(prompts_per_page, max_page_bytes))
                .with_github_repo(repo);
            convert(&file, output, &config)
        }
        Commands::Batch { projects_dir, output, include_agents } => {
            let projects_dir = resolve_projects_dir(projects_dir)?;
            let config = TranscriptConfig::default().with_include_agents(include_agents);
            batch(&projects_dir, &output, &config)
        }
        Commands::List { projects_dir, limit } => {
            let projects_dir = resolve_projects_dir(projects_dir)?;
            list_sessions(&projects_dir, limit)
        }
        Commands::Stats { file, json } => show_stats(&file, json),
    }
}

fn resolve_projects_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(dir) => Ok(dir),
        None => default_projects_dir(),
    }
}

fn convert(file: &Path, output: Option<PathBuf>, config: &TranscriptConfig) -> Result<()> {
    let output = match output {
        Some(dir) => dir,
        None => {
            let stem = file.file_stem().context("session file has no name")?;
            PathBuf::from(stem)
        }
    };

    let report = generate_html(file, &output, config)
        .with_context(|| format!("Failed to convert {}", file.display()))?;

    if let Some(repo) = &report.github_repo {
        println!("GitHub repo: {}", repo);
    }
    if report.warnings > 0 {
        println!("Skipped {} malformed records", report.warnings);
    }
    println!(
        "Generated {} ({} prompts, {} pages)",
        output.join("index.html").display(),
        report.prompts,
        report.pages
    );

    Ok(())
}

fn batch(projects_dir: &Path, output: &Path, config: &TranscriptConfig) -> Result<()> {
    if !projects_dir.exists() {
        bail!("Projects directory not found: {}", projects_dir.display());
    }

    let report = generate_batch_html(projects_dir, output, config)?;

    println!(
        "Converted {} sessions from {} projects into {}",
        report.total_sessions,
        report.total_projects,
        format_path_with_tilde(&report.output_dir)
    );
    if !report.failed.is_empty() {
        println!("Failed sessions: {}", report.failed.len());
        for failure in &report.failed {
            println!("  {}/{}: {}", failure.project, failure.session, failure.error);
        }
    }

    Ok(())
}

fn list_sessions(projects_dir: &Path, limit: usize) -> Result<()> {
    let sessions = find_local_sessions(projects_dir, limit);
    if sessions.is_empty() {
        println!("No sessions found in {}", format_path_with_tilde(projects_dir));
        return Ok(());
    }

    for session in sessions {
        let date = session
            .modified
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "unknown".to_string());
        println!("{}  {:>8.1} KB  {}", date, session.size_bytes as f64 / 1024.0, session.summary);
        println!("    {}", format_path_with_tilde(&session.path));
    }

    Ok(())
}

#[derive(Serialize)]
struct StatsOutput {
    #[serde(flatten)]
    stats: SessionStats,
    conversations: usize,
    skipped_records: usize,
    tool_counts: BTreeMap<String, usize>,
}

fn show_stats(file: &Path, json: bool) -> Result<()> {
    let config = TranscriptConfig::default();
    let parsed = parse_session_file(file)?;
    let skipped_records = parsed.warnings.len();

    let conversations = group_conversations(parsed.lines);
    let tool_counts = analyze_conversation(
        conversations.iter().flat_map(|c| c.lines.iter()),
        config.long_text_threshold,
    )
    .tool_counts;
    let conversation_count = conversations.len();
    let pagination = paginate(conversations, &config.budget);
    let stats = session_stats(
        pagination.pages.iter().flat_map(|p| p.conversations.iter()),
        pagination.total_pages(),
        config.long_text_threshold,
    );

    if json {
        let output = StatsOutput {
            stats,
            conversations: conversation_count,
            skipped_records,
            tool_counts,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Session Statistics");
    println!("==================");
    println!("File: {}", format_path_with_tilde(file));
    println!("Prompts: {}", stats.prompts);
    println!("Messages: {}", stats.messages);
    println!("Tool calls: {}", stats.tool_calls);
    println!("Commits: {}", stats.commits);
    println!("Pages: {}", stats.pages);
    if skipped_records > 0 {
        println!("Skipped records: {}", skipped_records);
    }
    let summary = format_tool_stats(&tool_counts);
    if !summary.is_empty() {
        println!();
        println!("Tools: {}", summary);
    }

    Ok(())
}
