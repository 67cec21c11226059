use jiff::civil::date;
use studypro_core::models::stats::{Stats, TimelinePoint};

#[test]
fn same_day_questions_accumulate_into_one_point() {
    let mut stats = Stats::default();
    let today = date(2026, 10, 19);

    stats.record_questions_on(3, today);
    stats.record_questions_on(3, today);

    assert_eq!(stats.questions_added, 6);
    assert_eq!(
        stats.questions_timeline,
        vec![TimelinePoint { date: today, count: 6 }]
    );
}

#[test]
fn new_day_appends_a_point() {
    let mut stats = Stats::default();
    stats.record_paper_on(date(2026, 10, 18));
    stats.record_paper_on(date(2026, 10, 19));
    stats.record_paper_on(date(2026, 10, 19));

    assert_eq!(stats.papers_generated, 3);
    assert_eq!(stats.papers_timeline.len(), 2);
    assert_eq!(stats.papers_timeline[1].count, 2);
}

#[test]
fn zero_questions_is_a_no_op() {
    let mut stats = Stats::default();
    stats.record_questions_on(0, date(2026, 10, 19));
    assert_eq!(stats, Stats::default());
}

#[test]
fn timeline_points_serialize_dates_as_iso_strings() {
    let point = TimelinePoint {
        date: date(2026, 1, 5),
        count: 2,
    };
    let json = serde_json::to_value(point).unwrap();
    assert_eq!(json["date"], "2026-01-05");
    assert_eq!(json["count"], 2);
}
