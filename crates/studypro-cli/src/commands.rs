//! One handler per subcommand. Handlers translate arguments into calls on
//! the core crates and print a short report.

use std::path::Path;

use serde_json::Value;

use studypro_bank::csv_io::{export_csv, import_csv};
use studypro_bank::pdf_import::{extract_pages, page, question_from_selection, select_lines};
use studypro_bank::remote::{HttpBankSource, SubjectStatus, fetch_all};
use studypro_core::models::question::{Question, StoredQuestion};
use studypro_core::normalize::{RawRecord, normalize, normalize_question};
use studypro_core::schema::field;
use studypro_paper::font::{FileFont, FontSource, NoFont};
use studypro_paper::generate::{GeneratedPaper, PaperRequest, generate_answer_key, generate_paper};
use studypro_paper::pdf::{PdfRenderer, RenderedPdf};
use studypro_storage::objects::KeyValueStore;

use crate::cli::{
    AddArgs, Commands, ConfigCommand, DeleteArgs, EditArgs, ExportArgs, FetchArgs, FilterArgs,
    GenerateArgs, ImportArgs, PdfAddArgs, PdfPagesArgs,
};
use crate::config::{StudyProConfig, save_config};
use crate::state::AppState;

pub fn run<S: KeyValueStore + Clone>(state: &mut AppState<S>, command: Commands) -> eyre::Result<()> {
    match command {
        Commands::Add(args) => add(state, args),
        Commands::Edit(args) => edit(state, args),
        Commands::Delete(args) => delete(state, args),
        Commands::Purge(args) => purge(state, &args),
        Commands::List(args) => list(state, &args),
        Commands::Preview => preview(state),
        Commands::Import(args) => import(state, args),
        Commands::Export(args) => export(state, &args),
        Commands::Fetch(args) => fetch(state, args),
        Commands::PdfPages(args) => pdf_pages(&args),
        Commands::PdfAdd(args) => pdf_add(state, args),
        Commands::Generate(args) => generate(state, args),
        Commands::Stats => stats(state),
        Commands::Config(_) => Err(eyre::eyre!("config commands do not use question state")),
    }
}

pub fn config(command: &ConfigCommand, path: &Path, config: &StudyProConfig) -> eyre::Result<()> {
    match command {
        ConfigCommand::Show => {
            println!("# {}", path.display());
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        ConfigCommand::Init => {
            save_config(path, config)?;
            println!("wrote {}", path.display());
        }
    }
    Ok(())
}

/// A raw record from command-line fields, so manual entries go through the
/// same normalization as imported rows.
fn raw_record(
    text: &str,
    kind: &str,
    options: &[String],
    rarity: Option<&str>,
    section: Option<&str>,
    subject: Option<&str>,
    answer: Option<&str>,
) -> RawRecord {
    let mut raw = RawRecord::new();
    raw.insert(field::QUESTION.to_string(), Value::from(text));
    raw.insert(field::TYPE.to_string(), Value::from(kind));
    raw.insert(
        field::OPTIONS.to_string(),
        Value::Array(options.iter().map(|o| Value::from(o.as_str())).collect()),
    );
    for (name, value) in [
        (field::RARITY, rarity),
        (field::SECTION, section),
        (field::SUBJECT, subject),
        (field::ANSWER, answer),
    ] {
        if let Some(value) = value {
            raw.insert(name.to_string(), Value::from(value));
        }
    }
    raw
}

fn add<S: KeyValueStore + Clone>(state: &mut AppState<S>, args: AddArgs) -> eyre::Result<()> {
    let raw = raw_record(
        &args.text,
        &args.kind,
        &args.options,
        args.rarity.as_deref(),
        args.section.as_deref(),
        args.subject.as_deref(),
        args.answer.as_deref(),
    );
    let question = normalize(&raw, &state.context());

    let id = state.questions.add(question)?;
    state.save_questions()?;
    state.stats.record_questions(1)?;

    tracing::info!(%id, "question added");
    println!("added {id}");
    Ok(())
}

fn edit<S: KeyValueStore + Clone>(state: &mut AppState<S>, args: EditArgs) -> eyre::Result<()> {
    let current = state
        .questions
        .get(args.id)
        .map(|e| e.question.clone())
        .ok_or_else(|| eyre::eyre!("question not found: {}", args.id))?;

    let mut updated = Question {
        text: args.text.unwrap_or(current.text),
        kind: args.kind.as_deref().map_or(current.kind, Into::into),
        options: if args.options.is_empty() {
            current.options
        } else {
            args.options
        },
        rarity: args.rarity.unwrap_or(current.rarity),
        section: args.section.unwrap_or(current.section),
        subject: args.subject.unwrap_or(current.subject),
        answer: args.answer.unwrap_or(current.answer),
    };
    updated = normalize_question(&updated, &state.context());

    state.questions.edit(args.id, updated)?;
    state.save_questions()?;

    tracing::info!(id = %args.id, "question edited");
    println!("updated {}", args.id);
    Ok(())
}

fn delete<S: KeyValueStore + Clone>(state: &mut AppState<S>, args: DeleteArgs) -> eyre::Result<()> {
    let removed = state.questions.delete(args.id)?;
    state.save_questions()?;

    tracing::info!(id = %removed.id, "question deleted");
    println!("deleted {}: {}", removed.id, removed.question.text);
    Ok(())
}

fn purge<S: KeyValueStore + Clone>(state: &mut AppState<S>, args: &FilterArgs) -> eyre::Result<()> {
    let query = args.to_query();
    if query.is_empty() {
        return Err(eyre::eyre!(
            "refusing to purge without a filter; pass --subject, --kind, --rarity, --section or --text"
        ));
    }

    let removed = state.questions.delete_where(&query);
    if removed > 0 {
        state.save_questions()?;
    }

    tracing::info!(removed, "questions purged");
    println!("deleted {removed} questions");
    Ok(())
}

fn print_entry(entry: &StoredQuestion) {
    let q = &entry.question;
    println!(
        "{}  [{} | {} | {} | section {}] {}",
        entry.id,
        q.subject,
        q.kind.label(),
        q.rarity,
        q.section,
        q.text
    );
    for (letter, option) in ('A'..='Z').zip(q.printable_options()) {
        println!("        ({letter}) {option}");
    }
    if !q.answer.is_empty() {
        println!("        Answer: {}", q.answer);
    }
}

fn list<S: KeyValueStore + Clone>(state: &AppState<S>, args: &FilterArgs) -> eyre::Result<()> {
    let matches = state.questions.search(&args.to_query());
    for entry in &matches {
        print_entry(entry);
    }
    println!("{} of {} questions", matches.len(), state.questions.len());
    Ok(())
}

fn preview<S: KeyValueStore + Clone>(state: &AppState<S>) -> eyre::Result<()> {
    let summary = state.questions.summary();
    println!("Total questions: {}", summary.total);
    println!("MCQs: {}", summary.mcq_count());
    for (heading, counts) in [
        ("Subject", &summary.by_subject),
        ("Kind", &summary.by_kind),
        ("Rarity", &summary.by_rarity),
        ("Section", &summary.by_section),
    ] {
        println!("{heading}:");
        for (name, count) in counts {
            println!("  {name:<20} {count}");
        }
    }
    Ok(())
}

fn import<S: KeyValueStore + Clone>(state: &mut AppState<S>, args: ImportArgs) -> eyre::Result<()> {
    let bytes = std::fs::read(&args.path)
        .map_err(|e| eyre::eyre!("failed to read {}: {e}", args.path.display()))?;
    let report = import_csv(&bytes, &state.context_for(args.subject.as_deref()))?;

    for skipped in &report.skipped {
        println!("skipped line {}: {}", skipped.line, skipped.reason);
    }
    let added = state.add_questions(report.questions)?;
    println!("imported {added} questions from {}", args.path.display());
    Ok(())
}

fn export<S: KeyValueStore + Clone>(state: &AppState<S>, args: &ExportArgs) -> eyre::Result<()> {
    let questions: Vec<Question> = state
        .questions
        .search(&args.filter.to_query())
        .into_iter()
        .map(|e| e.question.clone())
        .collect();

    let bytes = export_csv(&questions)?;
    std::fs::write(&args.path, bytes)
        .map_err(|e| eyre::eyre!("failed to write {}: {e}", args.path.display()))?;

    tracing::info!(count = questions.len(), path = %args.path.display(), "questions exported");
    println!("exported {} questions to {}", questions.len(), args.path.display());
    Ok(())
}

fn fetch<S: KeyValueStore + Clone>(state: &mut AppState<S>, args: FetchArgs) -> eyre::Result<()> {
    let base_url = args
        .base_url
        .unwrap_or_else(|| state.config.bank.base_url.clone());
    let subjects = if args.subjects.is_empty() {
        state.config.bank.subjects.clone()
    } else {
        args.subjects
    };

    let source = HttpBankSource::new(base_url);
    let report = fetch_all(&source, &subjects);

    for outcome in &report.outcomes {
        match &outcome.status {
            SubjectStatus::Imported { questions, skipped } => {
                println!("{:<12} {questions} questions ({skipped} rows skipped)", outcome.subject);
            }
            SubjectStatus::Failed(reason) => {
                println!("{:<12} skipped: {reason}", outcome.subject);
            }
        }
    }
    let added = state.add_questions(report.questions)?;
    println!("added {added} questions");
    Ok(())
}

fn pdf_pages(args: &PdfPagesArgs) -> eyre::Result<()> {
    let bytes = std::fs::read(&args.path)
        .map_err(|e| eyre::eyre!("failed to read {}: {e}", args.path.display()))?;
    let pages = extract_pages(&bytes)?;

    let selected = match args.page {
        Some(number) => vec![page(&pages, number)?],
        None => pages.iter().collect(),
    };
    for p in selected {
        println!("--- page {} of {} ---", p.number, pages.len());
        for (i, line) in p.lines().iter().enumerate() {
            println!("{:>4}  {line}", i + 1);
        }
    }
    Ok(())
}

fn pdf_add<S: KeyValueStore + Clone>(state: &mut AppState<S>, args: PdfAddArgs) -> eyre::Result<()> {
    let bytes = std::fs::read(&args.path)
        .map_err(|e| eyre::eyre!("failed to read {}: {e}", args.path.display()))?;
    let pages = extract_pages(&bytes)?;
    let selection = select_lines(page(&pages, args.page)?, args.lines)?;

    let ctx = state.context_for(args.subject.as_deref());
    let mut question = question_from_selection(&selection, &ctx)?;
    if let Some(rarity) = args.rarity {
        question.rarity = rarity;
    }
    if let Some(section) = args.section {
        question.section = section;
    }
    if let Some(answer) = args.answer {
        question.answer = answer;
    }
    let question = normalize_question(&question, &ctx);

    let id = state.questions.add(question)?;
    state.save_questions()?;
    state.stats.record_questions(1)?;

    println!("added {id}: {selection}");
    Ok(())
}

fn generate<S: KeyValueStore + Clone>(state: &mut AppState<S>, args: GenerateArgs) -> eyre::Result<()> {
    let paper_config = &state.config.paper;

    let date = args.date.unwrap_or_else(|| jiff::Zoned::now().date());
    let mut request = PaperRequest::new(args.subject.clone().unwrap_or_default(), date, &paper_config.defaults);
    request.rarity = args.rarity_filter();
    if let Some(title) = args.title {
        request.title = title;
    }
    if let Some(marks) = args.marks {
        request.total_marks = marks;
    }
    if let Some(duration) = args.duration {
        request.duration = duration;
    }

    let font: Box<dyn FontSource> = match args.font.or_else(|| paper_config.font_path.clone()) {
        Some(path) => Box::new(FileFont(path)),
        None => Box::new(NoFont),
    };

    let questions: Vec<Question> = state.questions.questions().cloned().collect();
    let renderer = PdfRenderer::a4(&request.title)?;
    let paper = generate_paper(
        &questions,
        &request,
        &state.config.restricted_subjects,
        &paper_config.styles,
        font.as_ref(),
        renderer,
    )?;

    let key = if args.answer_key {
        let renderer = PdfRenderer::a4(&request.title)?;
        Some(generate_answer_key(
            &questions,
            &request,
            &state.config.restricted_subjects,
            &paper_config.styles,
            font.as_ref(),
            renderer,
        )?)
    } else {
        None
    };

    let dir = args.output.unwrap_or_else(|| paper_config.output_dir.clone());
    if !dir.as_os_str().is_empty() {
        std::fs::create_dir_all(&dir)?;
    }
    write_document(&dir, &paper)?;
    if let Some(key) = &key {
        write_document(&dir, key)?;
    }

    state.stats.record_paper()?;
    Ok(())
}

fn write_document(dir: &Path, document: &GeneratedPaper<RenderedPdf>) -> eyre::Result<()> {
    let path = dir.join(&document.filename);
    std::fs::write(&path, &document.output.bytes)
        .map_err(|e| eyre::eyre!("failed to write {}: {e}", path.display()))?;

    println!(
        "wrote {} ({} questions, {} pages)",
        path.display(),
        document.questions,
        document.pages
    );
    if document.overflows > 0 {
        println!(
            "warning: {} questions run past the bottom of a page",
            document.overflows
        );
    }
    Ok(())
}

fn stats<S: KeyValueStore + Clone>(state: &AppState<S>) -> eyre::Result<()> {
    let stats = state.stats.stats();
    println!("Papers generated: {}", stats.papers_generated);
    println!("Questions added:  {}", stats.questions_added);

    for (heading, timeline) in [
        ("Papers per day", &stats.papers_timeline),
        ("Questions per day", &stats.questions_timeline),
    ] {
        if timeline.is_empty() {
            continue;
        }
        println!("{heading}:");
        for point in timeline {
            println!("  {}  {}", point.date, point.count);
        }
    }
    Ok(())
}
