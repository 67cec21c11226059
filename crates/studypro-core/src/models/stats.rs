use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// One calendar day on a usage timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub date: Date,
    pub count: u64,
}

/// Usage counters and their per-day timelines.
///
/// Counters only ever grow. Timelines hold at most one point per day, in
/// the order the days were first recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub papers_generated: u64,
    pub questions_added: u64,
    pub papers_timeline: Vec<TimelinePoint>,
    pub questions_timeline: Vec<TimelinePoint>,
}

impl Stats {
    pub fn record_paper_on(&mut self, date: Date) {
        self.papers_generated += 1;
        bump(&mut self.papers_timeline, date, 1);
    }

    pub fn record_questions_on(&mut self, n: u64, date: Date) {
        if n == 0 {
            return;
        }
        self.questions_added += n;
        bump(&mut self.questions_timeline, date, n);
    }
}

/// Increment the last point if it is for `date`, otherwise append a new one.
fn bump(timeline: &mut Vec<TimelinePoint>, date: Date, n: u64) {
    match timeline.last_mut() {
        Some(last) if last.date == date => last.count += n,
        _ => timeline.push(TimelinePoint { date, count: n }),
    }
}
