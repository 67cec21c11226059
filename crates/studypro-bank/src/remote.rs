//! Remote question banks: one CSV file per subject under a base URL.

use studypro_core::models::question::Question;
use studypro_core::normalize::{NormalizeContext, title_case};

use crate::csv_io::import_csv;
use crate::error::BankError;

/// Something that can hand back the CSV bank for a subject identifier.
pub trait BankSource {
    fn fetch_csv(&self, subject: &str) -> Result<Vec<u8>, BankError>;
}

/// Fetches `{base}/{subject}/questions.csv` over HTTP, bypassing caches.
pub struct HttpBankSource {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpBankSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
            base_url: base_url.into(),
        }
    }

    pub fn url_for(&self, subject: &str) -> String {
        format!(
            "{}/{}/questions.csv",
            self.base_url.trim_end_matches('/'),
            subject.trim()
        )
    }
}

impl BankSource for HttpBankSource {
    fn fetch_csv(&self, subject: &str) -> Result<Vec<u8>, BankError> {
        let url = self.url_for(subject);
        let http_err = |e: ureq::Error| BankError::Http {
            url: url.clone(),
            message: e.to_string(),
        };

        let mut response = self
            .agent
            .get(&url)
            .header("Cache-Control", "no-cache")
            .call()
            .map_err(http_err)?;
        let bytes = response.body_mut().read_to_vec().map_err(http_err)?;

        tracing::debug!(url = %url, bytes = bytes.len(), "fetched question bank");
        Ok(bytes)
    }
}

/// What happened to one subject during a fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectStatus {
    Imported { questions: usize, skipped: usize },
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectOutcome {
    pub subject: String,
    pub status: SubjectStatus,
}

#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    pub questions: Vec<Question>,
    pub outcomes: Vec<SubjectOutcome>,
}

impl FetchReport {
    pub fn failed(&self) -> impl Iterator<Item = &SubjectOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, SubjectStatus::Failed(_)))
    }
}

/// Fetch every subject in turn. A subject that fails to download or parse
/// is logged and skipped; the others still load. Rows without a subject are
/// assigned the title-cased subject identifier.
pub fn fetch_all(source: &dyn BankSource, subjects: &[String]) -> FetchReport {
    let mut report = FetchReport::default();

    for subject in subjects {
        let ctx = NormalizeContext::new(title_case(subject));
        let result = source
            .fetch_csv(subject)
            .and_then(|bytes| import_csv(&bytes, &ctx));

        let status = match result {
            Ok(import) => {
                let status = SubjectStatus::Imported {
                    questions: import.imported(),
                    skipped: import.skipped.len(),
                };
                report.questions.extend(import.questions);
                status
            }
            Err(e) => {
                tracing::warn!(subject = %subject, error = %e, "skipping question bank");
                SubjectStatus::Failed(e.to_string())
            }
        };
        report.outcomes.push(SubjectOutcome {
            subject: subject.clone(),
            status,
        });
    }

    tracing::info!(
        subjects = subjects.len(),
        questions = report.questions.len(),
        failed = report.failed().count(),
        "question bank fetch finished"
    );
    report
}
