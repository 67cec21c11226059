use std::ops::RangeInclusive;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

use studypro_core::models::question::QuestionKind;
use studypro_core::store::QuestionQuery;
use studypro_paper::filter::RarityFilter;

#[derive(Parser, Debug)]
#[command(
    name = "studypro",
    version,
    about = "Question bank and exam paper generator"
)]
pub struct Cli {
    /// Config file [default: <config dir>/studypro/config.json]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Questions and stats file [default: <data dir>/studypro/state.json]
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a question
    Add(AddArgs),
    /// Replace fields of a stored question
    Edit(EditArgs),
    /// Delete one question by id
    Delete(DeleteArgs),
    /// Delete every question matching the filters
    Purge(FilterArgs),
    /// List questions, optionally filtered
    List(FilterArgs),
    /// Show question counts by subject, kind, rarity and section
    Preview,
    /// Import questions from a CSV file
    Import(ImportArgs),
    /// Export questions to a CSV file
    Export(ExportArgs),
    /// Download the remote question banks
    Fetch(FetchArgs),
    /// Print the text of a PDF with numbered lines
    PdfPages(PdfPagesArgs),
    /// Add a question from a line range of a PDF page
    PdfAdd(PdfAddArgs),
    /// Generate a question paper PDF
    Generate(GenerateArgs),
    /// Show usage stats
    Stats,
    /// Inspect or create the config file
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Question text
    pub text: String,

    /// mcq, paragraph, diagram, ...
    #[arg(long, default_value = "paragraph")]
    pub kind: String,

    /// MCQ option; repeat for each option
    #[arg(long = "option", short = 'o')]
    pub options: Vec<String>,

    #[arg(long)]
    pub rarity: Option<String>,

    #[arg(long)]
    pub section: Option<String>,

    /// Defaults to the configured subject
    #[arg(long)]
    pub subject: Option<String>,

    /// Expected answer, printed on the answer key
    #[arg(long)]
    pub answer: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct EditArgs {
    pub id: Uuid,

    #[arg(long)]
    pub text: Option<String>,

    #[arg(long)]
    pub kind: Option<String>,

    /// Replaces all options when given
    #[arg(long = "option", short = 'o')]
    pub options: Vec<String>,

    #[arg(long)]
    pub rarity: Option<String>,

    #[arg(long)]
    pub section: Option<String>,

    #[arg(long)]
    pub subject: Option<String>,

    #[arg(long)]
    pub answer: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    pub id: Uuid,
}

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Case-insensitive text fragment
    #[arg(long)]
    pub text: Option<String>,

    #[arg(long)]
    pub subject: Option<String>,

    #[arg(long)]
    pub kind: Option<String>,

    #[arg(long)]
    pub rarity: Option<String>,

    #[arg(long)]
    pub section: Option<String>,
}

impl FilterArgs {
    pub fn to_query(&self) -> QuestionQuery {
        QuestionQuery {
            text: self.text.clone(),
            subject: self.subject.clone(),
            kind: self.kind.as_deref().map(QuestionKind::from),
            rarity: self.rarity.clone(),
            section: self.section.clone(),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    pub path: PathBuf,

    /// Subject for rows that do not name one
    #[arg(long)]
    pub subject: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[arg(default_value = "questions.csv")]
    pub path: PathBuf,

    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    /// Subject identifier; repeat for several [default: configured list]
    #[arg(long = "subject")]
    pub subjects: Vec<String>,

    #[arg(long)]
    pub base_url: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct PdfPagesArgs {
    pub path: PathBuf,

    /// Only this page
    #[arg(long)]
    pub page: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct PdfAddArgs {
    pub path: PathBuf,

    #[arg(long)]
    pub page: usize,

    /// Line range as shown by pdf-pages, e.g. `4-6` or `4`
    #[arg(long, value_parser = parse_line_range)]
    pub lines: RangeInclusive<usize>,

    #[arg(long)]
    pub subject: Option<String>,

    #[arg(long)]
    pub rarity: Option<String>,

    #[arg(long)]
    pub section: Option<String>,

    #[arg(long)]
    pub answer: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Paper subject [default: Class12]
    #[arg(long)]
    pub subject: Option<String>,

    /// `all` or a rarity tag, matched lowercased
    #[arg(long, default_value = "all")]
    pub rarity: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub marks: Option<u32>,

    #[arg(long)]
    pub duration: Option<String>,

    /// Exam date, YYYY-MM-DD [default: today]
    #[arg(long)]
    pub date: Option<jiff::civil::Date>,

    /// Directory to write the paper to
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// TrueType font to embed
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Also write `<subject>_answer_key.pdf`
    #[arg(long)]
    pub answer_key: bool,
}

impl GenerateArgs {
    /// Stored rarities are lowercase, so `Rare` and `ALL` are accepted.
    pub fn rarity_filter(&self) -> RarityFilter {
        RarityFilter::from(self.rarity.trim().to_lowercase().as_str())
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Print the effective config
    Show,
    /// Write the effective config to disk
    Init,
}

/// `4-6` → `4..=6`, `4` → `4..=4`.
pub fn parse_line_range(value: &str) -> Result<RangeInclusive<usize>, String> {
    let parse = |s: &str| {
        s.trim()
            .parse::<usize>()
            .map_err(|e| format!("invalid line number `{}`: {e}", s.trim()))
    };
    match value.split_once('-') {
        Some((start, end)) => Ok(parse(start)?..=parse(end)?),
        None => {
            let line = parse(value)?;
            Ok(line..=line)
        }
    }
}
