use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// `(most imp)`, `(Common)`, `(rare - 2019)` and similar editorial tags.
static BRACKETED_TAG: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)\(\s*(?:most|common|rare)\b[^)]*\)").ok());

/// A bare `most imp` marker outside brackets.
static MOST_IMP: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)\bmost\s+imp\b\.?").ok());

static SPACE_RUN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"[ \t]{2,}").ok());

fn strip<'t>(pattern: &LazyLock<Option<Regex>>, text: &'t str, with: &str) -> Cow<'t, str> {
    match pattern.as_ref() {
        Some(re) => re.replace_all(text, with),
        None => Cow::Borrowed(text),
    }
}

/// Strip editorial tags from question text before it is printed.
///
/// Best effort only: text without a tag is returned trimmed and otherwise
/// untouched.
pub fn clean_question_text(text: &str) -> String {
    let without_tags = strip(&BRACKETED_TAG, text, "");
    let without_marker = strip(&MOST_IMP, &without_tags, "");

    let changed = matches!(without_tags, Cow::Owned(_)) || matches!(without_marker, Cow::Owned(_));
    if changed {
        strip(&SPACE_RUN, &without_marker, " ").trim().to_string()
    } else {
        text.trim().to_string()
    }
}
