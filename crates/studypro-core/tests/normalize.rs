use serde_json::json;
use studypro_core::models::question::{Question, QuestionKind};
use studypro_core::normalize::{
    NormalizeContext, RawRecord, normalize, normalize_question, title_case,
};

fn raw(value: serde_json::Value) -> RawRecord {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("test record must be an object"),
    }
}

fn ctx() -> NormalizeContext {
    NormalizeContext::new("Economics")
}

#[test]
fn missing_fields_take_defaults() {
    let q = normalize(&raw(json!({ "question": "Define GDP." })), &ctx());
    assert_eq!(q.text, "Define GDP.");
    assert_eq!(q.kind, QuestionKind::Paragraph);
    assert!(q.options.is_empty());
    assert_eq!(q.rarity, "common");
    assert_eq!(q.section, "A");
    assert_eq!(q.subject, "Economics");
}

#[test]
fn missing_text_becomes_empty() {
    let q = normalize(&raw(json!({ "type": "mcq" })), &ctx());
    assert_eq!(q.text, "");
}

#[test]
fn case_is_canonicalized() {
    let q = normalize(
        &raw(json!({
            "question": "  What is demand?  ",
            "type": "MCQ",
            "options": "Want, Need ,Desire,Wish",
            "rarity": "RARE",
            "section": "b",
            "subject": "Economics",
        })),
        &ctx(),
    );
    assert_eq!(q.text, "What is demand?");
    assert_eq!(q.kind, QuestionKind::Mcq);
    assert_eq!(q.options, vec!["Want", "Need", "Desire", "Wish"]);
    assert_eq!(q.rarity, "rare");
    assert_eq!(q.section, "B");
}

#[test]
fn unknown_kind_passes_through_lowercased() {
    let q = normalize(&raw(json!({ "question": "Match", "type": "Match-The-Following" })), &ctx());
    assert_eq!(q.kind, QuestionKind::Other("match-the-following".to_string()));
    assert_eq!(q.kind.as_str(), "match-the-following");
}

#[test]
fn options_are_dropped_for_non_mcq() {
    let q = normalize(
        &raw(json!({ "question": "Draw a cell", "type": "diagram", "options": "a,b" })),
        &ctx(),
    );
    assert_eq!(q.kind, QuestionKind::Diagram);
    assert!(q.options.is_empty());
}

#[test]
fn options_accept_arrays_and_keep_empty_entries() {
    let q = normalize(
        &raw(json!({ "question": "Pick", "type": "mcq", "options": ["x", " ", "y"] })),
        &ctx(),
    );
    assert_eq!(q.options, vec!["x", "", "y"]);
    assert_eq!(q.printable_options().collect::<Vec<_>>(), vec!["x", "y"]);
}

#[test]
fn all_blank_options_normalize_to_none() {
    for options in [json!([""]), json!(["", "  "]), json!(" , ")] {
        let q = normalize(
            &raw(json!({ "question": "Pick", "type": "mcq", "options": options })),
            &ctx(),
        );
        assert!(q.options.is_empty(), "{options} kept {:?}", q.options);
    }
}

#[test]
fn answer_is_trimmed_and_accepts_the_long_column_name() {
    let q = normalize(&raw(json!({ "question": "Pick", "answer": " C " })), &ctx());
    assert_eq!(q.answer, "C");

    let q = normalize(
        &raw(json!({ "question": "Define GDP", "correct_answer": "Total output" })),
        &ctx(),
    );
    assert_eq!(q.answer, "Total output");

    let q = normalize(&raw(json!({ "question": "No key" })), &ctx());
    assert_eq!(q.answer, "");
}

#[test]
fn printable_options_cap_at_four() {
    let q = normalize(
        &raw(json!({ "question": "Pick", "type": "mcq", "options": "a,b,,c,d,e" })),
        &ctx(),
    );
    assert_eq!(q.printable_options().collect::<Vec<_>>(), vec!["a", "b", "c", "d"]);
}

#[test]
fn aliases_and_section_prefixes_are_accepted() {
    let q = normalize(
        &raw(json!({ "text": "Explain", "kind": "Paragraph", "section": "section_c" })),
        &ctx(),
    );
    assert_eq!(q.text, "Explain");
    assert_eq!(q.section, "C");

    let q = normalize(&raw(json!({ "question": "Explain", "section": "Section D" })), &ctx());
    assert_eq!(q.section, "D");
}

#[test]
fn numeric_values_are_rendered_as_strings() {
    let q = normalize(&raw(json!({ "question": 42, "section": null })), &ctx());
    assert_eq!(q.text, "42");
    assert_eq!(q.section, "A");
}

#[test]
fn normalizing_twice_is_idempotent() {
    let records = [
        json!({ "question": "Define GDP" }),
        json!({ "question": " Pick one ", "type": "MCQ", "options": "a, ,b", "rarity": "Rare", "section": "e" }),
        json!({ "text": "Label the parts", "kind": "DIAGRAM", "subject": "Biology" }),
        json!({ "question": "Odd", "type": "Essay", "section": "section_b" }),
        json!({ "question": "Pick", "type": "mcq", "options": [""], "correct_answer": " B " }),
    ];

    for record in records {
        let once = normalize(&raw(record), &ctx());
        let twice = normalize_question(&once, &ctx());
        assert_eq!(once, twice);
    }
}

#[test]
fn canonical_question_serializes_with_record_field_names() {
    let q = Question::paragraph("Explain inflation", "Economics");
    let value = serde_json::to_value(&q).unwrap();
    assert_eq!(value["question"], "Explain inflation");
    assert_eq!(value["type"], "paragraph");
    assert_eq!(value["section"], "A");
    assert!(value.get("answer").is_none());
}

#[test]
fn title_case_subject_identifiers() {
    assert_eq!(title_case("economics"), "Economics");
    assert_eq!(title_case("political science"), "Political Science");
    assert_eq!(title_case(""), "");
}
