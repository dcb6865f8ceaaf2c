use crate::model::idea::{Category, Idea, Status};
use crate::util::cycle;

/// Status selector: `all` or one exact status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

impl StatusFilter {
    pub fn matches(self, status: Status) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(s) => s == status,
        }
    }

    /// Parse `all` or a status literal
    pub fn parse(s: &str) -> Option<Self> {
        if s == "all" {
            return Some(StatusFilter::All);
        }
        Status::parse(s).map(StatusFilter::Only)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(s) => s.as_str(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All Status",
            StatusFilter::Only(s) => s.label(),
        }
    }

    /// Selector order: All, then each status; wraps around
    pub fn cycle(self, forward: bool) -> Self {
        let mut options = vec![StatusFilter::All];
        options.extend(Status::ALL.into_iter().map(StatusFilter::Only));
        cycle::step(&options, self, forward)
    }
}

/// Category selector: `all` or one exact category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => c == category,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        if s == "all" {
            return Some(CategoryFilter::All);
        }
        Category::parse(s).map(CategoryFilter::Only)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(c) => c.as_str(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryFilter::All => "All Categories",
            CategoryFilter::Only(c) => c.label(),
        }
    }

    pub fn cycle(self, forward: bool) -> Self {
        let mut options = vec![CategoryFilter::All];
        options.extend(Category::ALL.into_iter().map(CategoryFilter::Only));
        cycle::step(&options, self, forward)
    }
}

/// Does an idea pass both selectors?
pub fn matches(idea: &Idea, status: StatusFilter, category: CategoryFilter) -> bool {
    status.matches(idea.status) && category.matches(idea.category)
}

/// The visible subset of `ideas`, in list order
pub fn filter_ideas(ideas: &[Idea], status: StatusFilter, category: CategoryFilter) -> Vec<&Idea> {
    ideas
        .iter()
        .filter(|idea| matches(idea, status, category))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::idea::Priority;

    fn idea(id: &str, category: Category, status: Status) -> Idea {
        Idea {
            id: id.into(),
            title: format!("Idea {}", id),
            description: String::new(),
            category,
            priority: Priority::Medium,
            status,
            created_at: "2025-05-14T12:00:00.000Z".into(),
        }
    }

    fn sample() -> Vec<Idea> {
        vec![
            idea("4", Category::Race, Status::Filming),
            idea("3", Category::Gear, Status::Idea),
            idea("2", Category::Race, Status::Idea),
            idea("1", Category::Tips, Status::Published),
        ]
    }

    fn ids(ideas: &[&Idea]) -> Vec<String> {
        ideas.iter().map(|i| i.id.clone()).collect()
    }

    #[test]
    fn all_all_returns_everything_in_order() {
        let ideas = sample();
        let visible = filter_ideas(&ideas, StatusFilter::All, CategoryFilter::All);
        assert_eq!(ids(&visible), vec!["4", "3", "2", "1"]);
    }

    #[test]
    fn category_race_with_all_status() {
        let ideas = vec![
            idea("2", Category::Race, Status::Idea),
            idea("1", Category::Gear, Status::Idea),
        ];
        let visible = filter_ideas(
            &ideas,
            StatusFilter::All,
            CategoryFilter::Only(Category::Race),
        );
        assert_eq!(ids(&visible), vec!["2"]);
    }

    #[test]
    fn predicates_are_anded() {
        let ideas = sample();
        let visible = filter_ideas(
            &ideas,
            StatusFilter::Only(Status::Idea),
            CategoryFilter::Only(Category::Race),
        );
        assert_eq!(ids(&visible), vec!["2"]);

        let none = filter_ideas(
            &ideas,
            StatusFilter::Only(Status::Published),
            CategoryFilter::Only(Category::Race),
        );
        assert!(none.is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let ideas = sample();
        let status = StatusFilter::Only(Status::Idea);
        let category = CategoryFilter::All;
        let once: Vec<Idea> = filter_ideas(&ideas, status, category)
            .into_iter()
            .cloned()
            .collect();
        let twice = filter_ideas(&once, status, category);
        assert_eq!(ids(&twice), once.iter().map(|i| i.id.clone()).collect::<Vec<_>>());
    }

    #[test]
    fn parse_all_and_literals() {
        assert_eq!(StatusFilter::parse("all"), Some(StatusFilter::All));
        assert_eq!(
            StatusFilter::parse("editing"),
            Some(StatusFilter::Only(Status::Editing))
        );
        assert_eq!(StatusFilter::parse("Editing"), None);
        assert_eq!(
            CategoryFilter::parse("vlog"),
            Some(CategoryFilter::Only(Category::Vlog))
        );
        assert_eq!(CategoryFilter::parse("music"), None);
    }

    #[test]
    fn cycle_wraps_both_ways() {
        assert_eq!(
            StatusFilter::All.cycle(true),
            StatusFilter::Only(Status::Idea)
        );
        assert_eq!(
            StatusFilter::All.cycle(false),
            StatusFilter::Only(Status::Published)
        );
        assert_eq!(
            CategoryFilter::Only(Category::Other).cycle(true),
            CategoryFilter::All
        );
    }
}
