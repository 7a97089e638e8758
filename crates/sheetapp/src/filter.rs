//! # Filter Engine
//!
//! Narrows the visible questions by three independent clauses:
//!
//! | Clause           | Off when             | Passes when                                   |
//! |------------------|----------------------|-----------------------------------------------|
//! | `search_query`   | empty                | case-insensitive substring of the question    |
//! |                  |                      | title, any tag, the subtopic or topic title   |
//! | `favorites_only` | `false`              | question is a favorite                        |
//! | `tag_filter`     | empty                | question carries exactly that tag             |
//!
//! Clauses combine conjunctively. With every clause off, every question
//! matches.
//!
//! ## Visibility
//!
//! While a filter is active, a subtopic with no matching questions is hidden,
//! and a topic is hidden when none of its subtopics survive. Matching entries
//! are shown expanded so the hits are visible. Without an active filter every
//! topic is listed and the stored collapse flags decide what is expanded.
//!
//! Filter state is transient view state: it is never persisted.

use crate::model::{Question, Sheet, SubTopic, Topic};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterContext {
    pub search_query: String,
    pub favorites_only: bool,
    /// A single tag; empty means no tag filter.
    pub tag_filter: String,
}

impl FilterContext {
    pub fn is_active(&self) -> bool {
        !self.search_query.trim().is_empty() || self.favorites_only || !self.tag_filter.is_empty()
    }

    pub fn matches(&self, topic: &Topic, sub_topic: &SubTopic, question: &Question) -> bool {
        self.matches_search(topic, sub_topic, question)
            && (!self.favorites_only || question.is_favorite)
            && (self.tag_filter.is_empty() || question.has_tag(&self.tag_filter))
    }

    fn matches_search(&self, topic: &Topic, sub_topic: &SubTopic, question: &Question) -> bool {
        let needle = self.search_query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let hit = |s: &str| s.to_lowercase().contains(&needle);
        hit(&question.title)
            || question.tags.iter().any(|t| hit(t))
            || hit(&sub_topic.title)
            || hit(&topic.title)
    }
}

#[derive(Debug)]
pub struct VisibleSubTopic<'a> {
    pub sub_topic: &'a SubTopic,
    pub questions: Vec<&'a Question>,
    pub expanded: bool,
}

#[derive(Debug)]
pub struct VisibleTopic<'a> {
    pub topic: &'a Topic,
    pub sub_topics: Vec<VisibleSubTopic<'a>>,
    pub expanded: bool,
}

/// Projects the sheet through the filter, in display order.
pub fn visible_sheet<'a>(sheet: &'a Sheet, ctx: &FilterContext) -> Vec<VisibleTopic<'a>> {
    let active = ctx.is_active();
    let mut out = Vec::new();

    for topic in &sheet.topics {
        let mut sub_topics = Vec::new();
        for sub_topic in &topic.sub_topics {
            let questions: Vec<&Question> = sub_topic
                .questions
                .iter()
                .filter(|q| !active || ctx.matches(topic, sub_topic, q))
                .collect();
            if active && questions.is_empty() {
                continue;
            }
            sub_topics.push(VisibleSubTopic {
                sub_topic,
                questions,
                expanded: active || !sub_topic.is_collapsed,
            });
        }
        if active && sub_topics.is_empty() {
            continue;
        }
        out.push(VisibleTopic {
            topic,
            sub_topics,
            expanded: active || !topic.is_collapsed,
        });
    }
    out
}

/// Every distinct tag in the sheet, sorted.
pub fn all_tags(sheet: &Sheet) -> Vec<String> {
    let tags: BTreeSet<&str> = sheet
        .iter_questions()
        .flat_map(|(_, _, q)| q.tags.iter().map(String::as_str))
        .collect();
    tags.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Difficulty;
    use crate::test_utils::SheetFixture;

    fn sample() -> Sheet {
        let mut sheet = SheetFixture::new()
            .with_topic("Arrays")
            .with_sub_topic(0, "Basics")
            .with_question(0, 0, "Two Sum", Difficulty::Easy)
            .with_question(0, 0, "Rotate Array", Difficulty::Medium)
            .with_topic("Graphs")
            .with_sub_topic(1, "Traversal")
            .with_question(1, 0, "Number of Islands", Difficulty::Medium)
            .with_sub_topic(1, "Shortest Path")
            .with_question(1, 1, "Network Delay", Difficulty::Medium)
            .build();
        let islands = &mut sheet.topics[1].sub_topics[0].questions[0];
        islands.tags = vec!["bfs".into(), "matrix".into()];
        islands.is_favorite = true;
        sheet.topics[0].sub_topics[0].questions[0].tags = vec!["hashing".into()];
        sheet
    }

    fn visible_titles(sheet: &Sheet, ctx: &FilterContext) -> Vec<String> {
        visible_sheet(sheet, ctx)
            .iter()
            .flat_map(|t| t.sub_topics.iter())
            .flat_map(|st| st.questions.iter().map(|q| q.title.clone()))
            .collect()
    }

    #[test]
    fn inactive_filter_matches_everything() {
        let sheet = sample();
        let ctx = FilterContext::default();
        assert!(!ctx.is_active());
        assert!(sheet
            .iter_questions()
            .all(|(t, st, q)| ctx.matches(t, st, q)));
        assert_eq!(visible_titles(&sheet, &ctx).len(), 4);
    }

    #[test]
    fn whitespace_search_is_inactive() {
        let ctx = FilterContext {
            search_query: "   ".into(),
            ..Default::default()
        };
        assert!(!ctx.is_active());
    }

    #[test]
    fn search_hits_title_tags_and_owners() {
        let sheet = sample();
        let by = |q: &str| FilterContext {
            search_query: q.into(),
            ..Default::default()
        };
        assert_eq!(visible_titles(&sheet, &by("two SUM")), vec!["Two Sum"]);
        assert_eq!(visible_titles(&sheet, &by("hash")), vec!["Two Sum"]);
        assert_eq!(
            visible_titles(&sheet, &by("shortest")),
            vec!["Network Delay"]
        );
        assert_eq!(
            visible_titles(&sheet, &by("arrays")),
            vec!["Two Sum", "Rotate Array"]
        );
    }

    #[test]
    fn clauses_are_conjunctive() {
        let sheet = sample();
        let fav_and_tag = FilterContext {
            favorites_only: true,
            tag_filter: "bfs".into(),
            ..Default::default()
        };
        assert_eq!(
            visible_titles(&sheet, &fav_and_tag),
            vec!["Number of Islands"]
        );

        let fav_and_other_tag = FilterContext {
            favorites_only: true,
            tag_filter: "hashing".into(),
            ..Default::default()
        };
        assert!(visible_titles(&sheet, &fav_and_other_tag).is_empty());
    }

    #[test]
    fn tag_filter_is_exact() {
        let sheet = sample();
        let ctx = FilterContext {
            tag_filter: "bf".into(),
            ..Default::default()
        };
        assert!(visible_titles(&sheet, &ctx).is_empty());
    }

    #[test]
    fn active_filter_hides_empty_branches() {
        let sheet = sample();
        let ctx = FilterContext {
            favorites_only: true,
            ..Default::default()
        };
        let visible = visible_sheet(&sheet, &ctx);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].topic.title, "Graphs");
        assert!(visible[0].expanded);
        assert_eq!(visible[0].sub_topics.len(), 1);
        assert_eq!(visible[0].sub_topics[0].sub_topic.title, "Traversal");
    }

    #[test]
    fn inactive_filter_follows_collapse_state() {
        let mut sheet = sample();
        sheet.topics[0].is_collapsed = false;
        let visible = visible_sheet(&sheet, &FilterContext::default());
        assert_eq!(visible.len(), 2);
        assert!(visible[0].expanded);
        assert!(!visible[1].expanded);
        assert!(!visible[0].sub_topics[0].expanded);
    }

    #[test]
    fn all_tags_sorted_and_distinct() {
        let mut sheet = sample();
        sheet.topics[0].sub_topics[0].questions[1].tags = vec!["bfs".into()];
        assert_eq!(all_tags(&sheet), vec!["bfs", "hashing", "matrix"]);
    }
}
