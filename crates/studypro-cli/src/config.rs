use std::path::{Path, PathBuf};

use eyre::WrapErr;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use studypro_core::schema::kind;
use studypro_paper::filter::{RESTRICTED_SUBJECT, SubjectRules};
use studypro_paper::generate::{DEFAULT_SUBJECT, PaperDefaults};
use studypro_paper::styles::PaperStyles;

/// Version written by this build. Raising it needs a new entry in
/// `MIGRATIONS`.
pub const CURRENT_VERSION: u32 = 1;

const DEFAULT_BANK_URL: &str = "https://raw.githubusercontent.com/TechiePavitra/studypro/database";

const DEFAULT_BANK_SUBJECTS: [&str; 7] = [
    "economics",
    "gujarati",
    "sanskrit",
    "english",
    "psychology",
    "philosophy",
    "computer",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyProConfig {
    /// Absent in files written before versioning, read as 0.
    #[serde(default)]
    pub config_version: u32,

    /// Subject given to questions that do not name one.
    #[serde(default = "default_subject")]
    pub default_subject: String,

    #[serde(default)]
    pub bank: BankConfig,

    #[serde(default)]
    pub paper: PaperConfig,

    /// Subjects whose papers only admit certain question kinds. Added in v1.
    #[serde(default)]
    pub restricted_subjects: SubjectRules,
}

impl Default for StudyProConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            default_subject: default_subject(),
            bank: BankConfig::default(),
            paper: PaperConfig::default(),
            restricted_subjects: SubjectRules::default(),
        }
    }
}

fn default_subject() -> String {
    DEFAULT_SUBJECT.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BankConfig {
    pub base_url: String,
    pub subjects: Vec<String>,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BANK_URL.to_string(),
            subjects: DEFAULT_BANK_SUBJECTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaperConfig {
    #[serde(flatten)]
    pub defaults: PaperDefaults,
    /// Where generated papers are written. Empty means the working directory.
    pub output_dir: PathBuf,
    /// TrueType font embedded in papers, e.g. one covering Gujarati script.
    pub font_path: Option<PathBuf>,
    pub styles: PaperStyles,
}

/// `<config dir>/studypro/config.json`.
pub fn default_config_path() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("studypro").join("config.json"))
}

/// `<data dir>/studypro/state.json`, holding questions and stats.
pub fn default_data_path() -> eyre::Result<PathBuf> {
    let base = dirs::data_dir().ok_or_else(|| eyre::eyre!("no data directory found"))?;
    Ok(base.join("studypro").join("state.json"))
}

/// Load the config at `path`, or the defaults if there is none yet.
///
/// Older files are upgraded in memory; they are only rewritten by
/// [`save_config`].
pub fn load_config(path: &Path) -> eyre::Result<StudyProConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(StudyProConfig::default());
    }

    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("reading config {}", path.display()))?;
    let raw: Value = serde_json::from_str(&text)
        .wrap_err_with(|| format!("config {} is not valid JSON", path.display()))?;
    let version = raw
        .get("config_version")
        .and_then(Value::as_u64)
        .map_or(0, |v| v as u32);

    let config = serde_json::from_value(migrate(raw, version)?)?;
    Ok(config)
}

type Migration = fn(&mut Map<String, Value>);

/// `MIGRATIONS[n]` lifts a version `n` config to version `n + 1`.
const MIGRATIONS: [Migration; CURRENT_VERSION as usize] = [add_restricted_subjects];

/// Bring a raw config from `from_version` up to [`CURRENT_VERSION`].
pub fn migrate(mut raw: Value, from_version: u32) -> eyre::Result<Value> {
    if from_version > CURRENT_VERSION {
        eyre::bail!(
            "config version {from_version} was written by a newer StudyPro; \
             this build reads up to version {CURRENT_VERSION}"
        );
    }

    let object = raw
        .as_object_mut()
        .ok_or_else(|| eyre::eyre!("config must be a JSON object"))?;
    for (version, step) in MIGRATIONS.into_iter().enumerate().skip(from_version as usize) {
        step(object);
        let next = version as u32 + 1;
        object.insert("config_version".to_string(), Value::from(next));
        tracing::info!(from = version, to = next, "config migrated");
    }

    Ok(raw)
}

/// v0 → v1: the MCQ-only rule for computer papers becomes a table.
fn add_restricted_subjects(config: &mut Map<String, Value>) {
    config
        .entry("restricted_subjects")
        .or_insert_with(|| json!({ RESTRICTED_SUBJECT: [kind::MCQ] }));
}

/// Write `config` stamped with [`CURRENT_VERSION`]. The file is staged next
/// to `path` and renamed into place, owner-readable only on Unix.
pub fn save_config(path: &Path, config: &StudyProConfig) -> eyre::Result<()> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir)
            .wrap_err_with(|| format!("creating {}", dir.display()))?;
    }

    let current = StudyProConfig {
        config_version: CURRENT_VERSION,
        ..config.clone()
    };
    let bytes = serde_json::to_vec_pretty(&current)?;

    let staging = path.with_extension("json.tmp");
    std::fs::write(&staging, &bytes)
        .wrap_err_with(|| format!("writing {}", staging.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&staging, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&staging, path)
        .wrap_err_with(|| format!("replacing {}", path.display()))?;

    tracing::info!(path = %path.display(), bytes = bytes.len(), "config written");
    Ok(())
}
