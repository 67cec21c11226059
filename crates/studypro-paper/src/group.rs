use std::collections::BTreeMap;

use studypro_core::models::question::Question;
use studypro_core::schema::defaults;

/// Questions keyed by section label, labels in ascending lexical order.
pub type SectionGroups<'a> = BTreeMap<String, Vec<&'a Question>>;

/// Partition questions by section. Relative order within a section follows
/// the input; a blank section falls back to `A`.
pub fn group_by_section<'a>(questions: impl IntoIterator<Item = &'a Question>) -> SectionGroups<'a> {
    let mut groups = SectionGroups::new();
    for q in questions {
        let label = match q.section.trim() {
            "" => defaults::SECTION,
            label => label,
        };
        groups.entry(label.to_string()).or_default().push(q);
    }
    groups
}
