//! Derived progress statistics.
//!
//! Everything here is recomputed from the tree on demand. No counters live
//! on the entities, so the numbers can never go stale.

use crate::filter::FilterContext;
use crate::model::{Difficulty, Sheet, Topic};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DifficultyCount {
    pub total: usize,
    pub solved: usize,
}

impl DifficultyCount {
    fn record(&mut self, solved: bool) {
        self.total += 1;
        if solved {
            self.solved += 1;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicProgress {
    pub id: String,
    pub title: String,
    pub total: usize,
    pub solved: usize,
}

impl TopicProgress {
    /// A topic is completed when it has at least one question and all are solved.
    pub fn is_completed(&self) -> bool {
        self.total > 0 && self.solved == self.total
    }

    pub fn percent(&self) -> u8 {
        percent(self.solved, self.total)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SheetStats {
    /// Easy and legacy Basic questions share this bucket.
    pub easy: DifficultyCount,
    pub medium: DifficultyCount,
    pub hard: DifficultyCount,
    pub total_questions: usize,
    pub solved_questions: usize,
    pub total_topics: usize,
    pub completed_topics: usize,
    pub favorite_count: usize,
    pub overall_progress: u8,
    pub topic_breakdown: Vec<TopicProgress>,
}

impl SheetStats {
    pub fn compute(sheet: &Sheet) -> Self {
        let mut stats = SheetStats {
            total_topics: sheet.topics.len(),
            ..Default::default()
        };

        for topic in &sheet.topics {
            let mut progress = TopicProgress::empty(topic);
            for q in topic.questions() {
                let bucket = match q.difficulty.bucket() {
                    Difficulty::Hard => &mut stats.hard,
                    Difficulty::Medium => &mut stats.medium,
                    _ => &mut stats.easy,
                };
                bucket.record(q.is_completed);

                progress.total += 1;
                if q.is_completed {
                    progress.solved += 1;
                }
                if q.is_favorite {
                    stats.favorite_count += 1;
                }
            }
            stats.total_questions += progress.total;
            stats.solved_questions += progress.solved;
            if progress.is_completed() {
                stats.completed_topics += 1;
            }
            stats.topic_breakdown.push(progress);
        }

        stats.overall_progress = percent(stats.solved_questions, stats.total_questions);
        stats
    }

    /// Per-topic counts restricted to questions passing the filter. Topics
    /// with no matching question are left out while the filter is active.
    pub fn compute_visible(sheet: &Sheet, ctx: &FilterContext) -> Vec<TopicProgress> {
        if !ctx.is_active() {
            return Self::compute(sheet).topic_breakdown;
        }
        let mut out = Vec::new();
        for topic in &sheet.topics {
            let mut progress = TopicProgress::empty(topic);
            for sub_topic in &topic.sub_topics {
                for q in &sub_topic.questions {
                    if ctx.matches(topic, sub_topic, q) {
                        progress.total += 1;
                        if q.is_completed {
                            progress.solved += 1;
                        }
                    }
                }
            }
            if progress.total > 0 {
                out.push(progress);
            }
        }
        out
    }
}

impl TopicProgress {
    fn empty(topic: &Topic) -> Self {
        Self {
            id: topic.id.clone(),
            title: topic.title.clone(),
            total: 0,
            solved: 0,
        }
    }
}

/// `round(100 * solved / total)` clamped to 0..=100; 0 for an empty total.
pub fn percent(solved: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (100.0 * solved as f64 / total as f64).round();
    pct.clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{arrays_sheet, SheetFixture};

    #[test]
    fn arrays_scenario() {
        let (sheet, _) = arrays_sheet();
        let stats = SheetStats::compute(&sheet);

        assert_eq!(stats.easy, DifficultyCount { total: 1, solved: 0 });
        assert_eq!(stats.hard, DifficultyCount { total: 1, solved: 1 });
        assert_eq!(stats.medium, DifficultyCount::default());
        assert_eq!(stats.total_questions, 2);
        assert_eq!(stats.solved_questions, 1);
        assert_eq!(stats.overall_progress, 50);
        assert_eq!(stats.completed_topics, 0);
        assert!(!stats.topic_breakdown[0].is_completed());
    }

    #[test]
    fn empty_sheet_has_zero_progress() {
        let stats = SheetStats::compute(&Sheet::default());
        assert_eq!(stats.total_questions, 0);
        assert_eq!(stats.overall_progress, 0);
        assert!(stats.topic_breakdown.is_empty());
    }

    #[test]
    fn topic_without_questions_is_not_completed() {
        let sheet = SheetFixture::new().with_topic("Empty").build();
        let stats = SheetStats::compute(&sheet);
        assert_eq!(stats.total_topics, 1);
        assert_eq!(stats.completed_topics, 0);
    }

    #[test]
    fn buckets_add_up_and_basic_counts_as_easy() {
        let mut sheet = SheetFixture::new()
            .with_topic("A")
            .with_sub_topic(0, "a")
            .with_question(0, 0, "1", Difficulty::Basic)
            .with_question(0, 0, "2", Difficulty::Easy)
            .with_question(0, 0, "3", Difficulty::Medium)
            .with_topic("B")
            .with_sub_topic(1, "b")
            .with_question(1, 0, "4", Difficulty::Hard)
            .build();
        sheet.topics[0].sub_topics[0].questions[0].is_completed = true;
        sheet.topics[0].sub_topics[0].questions[2].is_favorite = true;
        sheet.topics[1].sub_topics[0].questions[0].is_completed = true;

        let s = SheetStats::compute(&sheet);
        assert_eq!(s.easy, DifficultyCount { total: 2, solved: 1 });
        assert_eq!(
            s.easy.total + s.medium.total + s.hard.total,
            s.total_questions
        );
        assert_eq!(
            s.easy.solved + s.medium.solved + s.hard.solved,
            s.solved_questions
        );
        assert_eq!(s.favorite_count, 1);
        assert_eq!(s.completed_topics, 1);
        assert!(s.topic_breakdown[1].is_completed());
        assert_eq!(s.overall_progress, 50);
    }

    #[test]
    fn percent_rounds() {
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(3, 3), 100);
        assert_eq!(percent(0, 0), 0);
    }

    #[test]
    fn visible_counts_follow_filter() {
        let (mut sheet, [easy, _]) = arrays_sheet();
        sheet.question_mut(&easy).unwrap().is_favorite = true;
        let ctx = FilterContext {
            favorites_only: true,
            ..Default::default()
        };
        let visible = SheetStats::compute_visible(&sheet, &ctx);
        assert_eq!(visible.len(), 1);
        assert_eq!((visible[0].total, visible[0].solved), (1, 0));

        let none = FilterContext {
            tag_filter: "nope".into(),
            ..Default::default()
        };
        assert!(SheetStats::compute_visible(&sheet, &none).is_empty());
    }
}
