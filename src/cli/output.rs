use serde::Serialize;

use crate::model::idea::{Category, Idea, Priority, Status};
use crate::model::stats::{ChannelStats, StatField};
use crate::ops::filter::{CategoryFilter, StatusFilter};
use crate::ops::stats_ops;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct IdeaListJson<'a> {
    pub status: &'static str,
    pub category: &'static str,
    pub total: usize,
    pub ideas: Vec<&'a Idea>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsJson<'a> {
    #[serde(flatten)]
    pub stats: &'a ChannelStats,
    pub ideas: usize,
    pub published: usize,
}

pub fn stats_to_json<'a>(stats: &'a ChannelStats, ideas: &[Idea]) -> StatsJson<'a> {
    StatsJson {
        stats,
        ideas: ideas.len(),
        published: ideas
            .iter()
            .filter(|i| i.status == Status::Published)
            .count(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Format a single idea as a one-line summary
pub fn format_idea_line(idea: &Idea) -> String {
    format!(
        "{} [{}] {} ({}, {})",
        idea.id, idea.status, idea.title, idea.category, idea.priority
    )
}

/// Date part of an ISO-8601 timestamp, or the whole string if it has none
fn created_date(created_at: &str) -> &str {
    created_at.split('T').next().unwrap_or(created_at)
}

/// Format detailed idea view
pub fn format_idea_detail(idea: &Idea) -> Vec<String> {
    let mut lines = vec![
        format!("{} {}", idea.id, idea.title),
        format!("status: {}", idea.status),
        format!("category: {}", idea.category.label()),
        format!("priority: {}", idea.priority),
        format!("created: {}", created_date(&idea.created_at)),
    ];

    if !idea.description.is_empty() {
        lines.push("description:".to_string());
        for line in idea.description.lines() {
            lines.push(format!("  {}", line));
        }
    }
    lines
}

pub fn format_stat_line(stats: &ChannelStats, field: StatField) -> String {
    format!(
        "{}: {}",
        field.label(),
        stats_ops::field_display(stats, field)
    )
}

pub fn format_stats(stats: &ChannelStats) -> Vec<String> {
    StatField::ALL
        .into_iter()
        .map(|f| format_stat_line(stats, f))
        .collect()
}

// ---------------------------------------------------------------------------
// Argument parsing
// ---------------------------------------------------------------------------

fn expected<T: Copy>(all: &[T], as_str: fn(T) -> &'static str) -> String {
    all.iter().map(|v| as_str(*v)).collect::<Vec<_>>().join(", ")
}

pub fn parse_status(s: &str) -> Result<Status, String> {
    Status::parse(s).ok_or_else(|| {
        format!(
            "unknown status '{}' (expected: {})",
            s,
            expected(&Status::ALL, Status::as_str)
        )
    })
}

pub fn parse_category(s: &str) -> Result<Category, String> {
    Category::parse(s).ok_or_else(|| {
        format!(
            "unknown category '{}' (expected: {})",
            s,
            expected(&Category::ALL, Category::as_str)
        )
    })
}

pub fn parse_priority(s: &str) -> Result<Priority, String> {
    Priority::parse(s).ok_or_else(|| {
        format!(
            "unknown priority '{}' (expected: {})",
            s,
            expected(&Priority::ALL, Priority::as_str)
        )
    })
}

pub fn parse_status_filter(s: &str) -> Result<StatusFilter, String> {
    StatusFilter::parse(s).ok_or_else(|| {
        format!(
            "unknown status '{}' (expected: all, {})",
            s,
            expected(&Status::ALL, Status::as_str)
        )
    })
}

pub fn parse_category_filter(s: &str) -> Result<CategoryFilter, String> {
    CategoryFilter::parse(s).ok_or_else(|| {
        format!(
            "unknown category '{}' (expected: all, {})",
            s,
            expected(&Category::ALL, Category::as_str)
        )
    })
}

pub fn parse_stat_field(s: &str) -> Result<StatField, String> {
    StatField::parse(s).ok_or_else(|| {
        format!(
            "unknown stats field '{}' (expected: {})",
            s,
            expected(&StatField::ALL, StatField::as_str)
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Idea {
        Idea {
            id: "1715688000000".into(),
            title: "10 Tips for Your First Marathon".into(),
            description: "Pacing\nFueling".into(),
            category: Category::Tips,
            priority: Priority::High,
            status: Status::Scripting,
            created_at: "2024-05-14T12:00:00.000Z".into(),
        }
    }

    #[test]
    fn idea_line() {
        insta::assert_snapshot!(
            format_idea_line(&sample()),
            @"1715688000000 [scripting] 10 Tips for Your First Marathon (tips, high)"
        );
    }

    #[test]
    fn idea_detail() {
        assert_eq!(
            format_idea_detail(&sample()),
            vec![
                "1715688000000 10 Tips for Your First Marathon",
                "status: scripting",
                "category: Tips & Advice",
                "priority: high",
                "created: 2024-05-14",
                "description:",
                "  Pacing",
                "  Fueling",
            ]
        );
    }

    #[test]
    fn detail_omits_empty_description() {
        let mut idea = sample();
        idea.description.clear();
        assert_eq!(format_idea_detail(&idea).len(), 5);
    }

    #[test]
    fn stat_line() {
        let stats = ChannelStats {
            weekly_miles: 26.2,
            ..ChannelStats::default()
        };
        insta::assert_snapshot!(format_stat_line(&stats, StatField::WeeklyMiles), @"Weekly Miles: 26.2");
        assert_eq!(
            format_stats(&ChannelStats::default()),
            vec![
                "Weekly Miles: 0",
                "Total Videos: 0",
                "Subscribers: 0",
                "Avg Views: 0"
            ]
        );
    }

    #[test]
    fn stats_json_flattens_record() {
        let mut published = sample();
        published.status = Status::Published;
        let stats = ChannelStats::default();
        let value = serde_json::to_value(stats_to_json(&stats, &[sample(), published])).unwrap();
        assert_eq!(value["weeklyMiles"], serde_json::json!(0));
        assert_eq!(value["ideas"], serde_json::json!(2));
        assert_eq!(value["published"], serde_json::json!(1));
    }

    #[test]
    fn parse_errors_list_choices() {
        assert_eq!(parse_status("filming"), Ok(Status::Filming));
        assert_eq!(
            parse_status("done").unwrap_err(),
            "unknown status 'done' (expected: idea, scripting, filming, editing, scheduled, published)"
        );
        assert_eq!(parse_category_filter("all"), Ok(CategoryFilter::All));
        assert!(parse_priority("urgent").is_err());
        assert_eq!(parse_stat_field("avg-views"), Ok(StatField::AvgViews));
        assert!(parse_stat_field("avgViews").is_err());
    }
}
