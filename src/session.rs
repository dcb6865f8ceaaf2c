//! The owned state store for one run of the board.
//!
//! A [`Session`] hydrates the idea list and stats record from a
//! [`Repository`] when opened and writes through to it after every mutation.
//! If a write fails the in-memory change stands and the error is returned so
//! the caller can report it; the collection stays marked unsaved until a
//! later write (or [`Session::close`]) gets it to disk.
//!
//! Another process may write the same store. Callers that share it hold the
//! board lock and call [`Session::reload`] before mutating, so a mutation is
//! always applied to what is on disk rather than to a stale copy.

use chrono::{DateTime, Utc};

use crate::io::repository::Repository;
use crate::io::store::StoreError;
use crate::model::idea::{Idea, Status};
use crate::model::stats::{ChannelStats, StatField};
use crate::ops::filter::{self, CategoryFilter, StatusFilter};
use crate::ops::form::FormController;
use crate::ops::{idea_ops, stats_ops};

pub struct Session<R: Repository> {
    repo: R,
    ideas: Vec<Idea>,
    stats: ChannelStats,
    /// Last save of the idea list failed
    ideas_unsaved: bool,
    /// Last save of the stats record failed
    stats_unsaved: bool,
}

impl<R: Repository> Session<R> {
    /// Load both collections from `repo`
    pub fn open(mut repo: R) -> Self {
        let ideas = repo.load_ideas();
        let stats = repo.load_stats();
        Session {
            repo,
            ideas,
            stats,
            ideas_unsaved: false,
            stats_unsaved: false,
        }
    }

    /// Flush whatever an earlier failed save left behind and hand back the
    /// repository. Collections already on disk are not rewritten, so a
    /// closing session never overwrites another process's newer data.
    pub fn close(mut self) -> Result<R, StoreError> {
        if self.ideas_unsaved {
            self.persist_ideas()?;
        }
        if self.stats_unsaved {
            self.persist_stats()?;
        }
        Ok(self.repo)
    }

    /// Load again to pick up writes made by another process. A collection
    /// whose last save failed keeps its in-memory state.
    pub fn reload(&mut self) {
        if !self.ideas_unsaved {
            self.ideas = self.repo.load_ideas();
        }
        if !self.stats_unsaved {
            self.stats = self.repo.load_stats();
        }
    }

    fn persist_ideas(&mut self) -> Result<(), StoreError> {
        let result = self.repo.save_ideas(&self.ideas);
        self.ideas_unsaved = result.is_err();
        result
    }

    fn persist_stats(&mut self) -> Result<(), StoreError> {
        let result = self.repo.save_stats(&self.stats);
        self.stats_unsaved = result.is_err();
        result
    }

    pub fn ideas(&self) -> &[Idea] {
        &self.ideas
    }

    pub fn stats(&self) -> &ChannelStats {
        &self.stats
    }

    pub fn find(&self, id: &str) -> Option<&Idea> {
        idea_ops::find(&self.ideas, id)
    }

    /// The filtered view, newest first
    pub fn visible(&self, status: StatusFilter, category: CategoryFilter) -> Vec<&Idea> {
        filter::filter_ideas(&self.ideas, status, category)
    }

    // -----------------------------------------------------------------------
    // Mutations (each one persists)
    // -----------------------------------------------------------------------

    /// Submit the form's draft. Returns the new idea's id, or `None` when the
    /// title was blank and nothing changed.
    pub fn add(
        &mut self,
        form: &mut FormController,
        now: DateTime<Utc>,
    ) -> Result<Option<String>, StoreError> {
        let Some(idea) = form.submit(&self.ideas, now) else {
            return Ok(None);
        };
        let id = idea.id.clone();
        idea_ops::prepend(&mut self.ideas, idea);
        self.persist_ideas()?;
        Ok(Some(id))
    }

    /// Set the status of `id`. Returns false (and writes nothing) for unknown ids.
    pub fn update_status(&mut self, id: &str, status: Status) -> Result<bool, StoreError> {
        if !idea_ops::update_status(&mut self.ideas, id, status) {
            return Ok(false);
        }
        self.persist_ideas()?;
        Ok(true)
    }

    /// Remove `id`, returning the removed idea. Unknown ids are a no-op.
    pub fn delete(&mut self, id: &str) -> Result<Option<Idea>, StoreError> {
        let Some(removed) = idea_ops::delete(&mut self.ideas, id) else {
            return Ok(None);
        };
        self.persist_ideas()?;
        Ok(Some(removed))
    }

    /// Edit one stats field from raw text; always persists
    pub fn set_stat(&mut self, field: StatField, raw: &str) -> Result<(), StoreError> {
        stats_ops::set_field(&mut self.stats, field, raw);
        self.persist_stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::repository::KvRepository;
    use crate::io::store::{FileStore, IDEAS_KEY, KeyValueStore, MemoryStore, STATS_KEY};
    use crate::model::idea::{Category, Priority};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::collections::HashSet;
    use std::rc::Rc;
    use tempfile::TempDir;

    type MemSession = Session<KvRepository<MemoryStore>>;

    fn empty() -> MemSession {
        Session::open(KvRepository::new(MemoryStore::new()))
    }

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    fn add<R: Repository>(
        session: &mut Session<R>,
        title: &str,
        category: Category,
    ) -> Option<String> {
        let mut form = FormController::default();
        form.open();
        form.draft_mut().title = title.into();
        form.draft_mut().category = category;
        session.add(&mut form, at(1_715_688_000_000)).unwrap()
    }

    fn stored_ideas(session: &MemSession) -> Option<String> {
        session.repo.store().get(IDEAS_KEY)
    }

    #[test]
    fn add_marathon_tips_scenario() {
        let mut session = empty();
        let mut form = FormController::default();
        form.open();
        let draft = form.draft_mut();
        draft.title = "10 Tips for Your First Marathon".into();
        draft.category = Category::Tips;
        draft.priority = Priority::High;

        let id = session.add(&mut form, Utc::now()).unwrap().unwrap();
        assert_eq!(session.ideas().len(), 1);
        let idea = &session.ideas()[0];
        assert_eq!(idea.id, id);
        assert!(!idea.id.is_empty());
        assert_eq!(idea.status, Status::Idea);
        assert_eq!(idea.category, Category::Tips);
        assert_eq!(idea.priority, Priority::High);
        assert!(DateTime::parse_from_rfc3339(&idea.created_at).is_ok());
    }

    #[test]
    fn many_adds_get_distinct_ids_newest_first() {
        let mut session = empty();
        for i in 0..20 {
            add(&mut session, &format!("Idea {}", i), Category::Vlog).unwrap();
        }
        assert_eq!(session.ideas().len(), 20);
        let ids: HashSet<&str> = session.ideas().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids.len(), 20);
        assert_eq!(session.ideas()[0].title, "Idea 19");
        assert_eq!(session.ideas()[19].title, "Idea 0");
    }

    #[test]
    fn blank_add_changes_nothing() {
        let mut session = empty();
        add(&mut session, "Keep me", Category::Race);
        let before = session.ideas().to_vec();
        assert!(add(&mut session, "", Category::Race).is_none());
        assert!(add(&mut session, "   ", Category::Race).is_none());
        assert_eq!(session.ideas(), before.as_slice());
    }

    #[test]
    fn add_writes_through() {
        let mut session = empty();
        add(&mut session, "Race week vlog", Category::Vlog);
        let raw = stored_ideas(&session).unwrap();
        assert!(raw.contains("Race week vlog"));
    }

    #[test]
    fn update_status_persists_only_on_match() {
        let mut session = empty();
        let id = add(&mut session, "Taper", Category::Training).unwrap();

        assert!(session.update_status(&id, Status::Editing).unwrap());
        assert_eq!(session.find(&id).unwrap().status, Status::Editing);
        assert!(stored_ideas(&session).unwrap().contains("\"editing\""));

        assert!(!session.update_status("missing", Status::Published).unwrap());
    }

    #[test]
    fn delete_counts() {
        let mut session = empty();
        let a = add(&mut session, "A", Category::Race).unwrap();
        add(&mut session, "B", Category::Gear);

        assert!(session.delete("missing").unwrap().is_none());
        assert_eq!(session.ideas().len(), 2);

        let removed = session.delete(&a).unwrap().unwrap();
        assert_eq!(removed.title, "A");
        assert_eq!(session.ideas().len(), 1);
    }

    #[test]
    fn deleting_last_idea_clears_storage() {
        let mut session = empty();
        let id = add(&mut session, "Only one", Category::Other).unwrap();
        session.delete(&id).unwrap();
        assert!(stored_ideas(&session).is_none());

        let repo = session.close().unwrap();
        let reopened = Session::open(repo);
        assert!(reopened.ideas().is_empty());
    }

    #[test]
    fn close_and_reopen_round_trips() {
        let mut session = empty();
        add(&mut session, "Race", Category::Race);
        add(&mut session, "Gear", Category::Gear);
        session.set_stat(StatField::Subscribers, "1.2k").unwrap();
        let ideas = session.ideas().to_vec();
        let stats = session.stats().clone();

        let repo = session.close().unwrap();
        let reopened = Session::open(repo);
        assert_eq!(reopened.ideas(), ideas.as_slice());
        assert_eq!(reopened.stats(), &stats);
    }

    #[test]
    fn weekly_miles_text_is_stored_as_number() {
        let mut session = empty();
        session.set_stat(StatField::WeeklyMiles, "12").unwrap();
        let raw = session.repo.store().get(STATS_KEY).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["weeklyMiles"], serde_json::json!(12));

        let repo = session.close().unwrap();
        assert_eq!(Session::open(repo).stats().weekly_miles, 12.0);
    }

    #[test]
    fn stats_zero_state_is_written() {
        let mut session = empty();
        session.set_stat(StatField::TotalVideos, "5").unwrap();
        session.set_stat(StatField::TotalVideos, "0").unwrap();
        assert!(session.repo.store().get(STATS_KEY).is_some());
        assert_eq!(session.stats(), &ChannelStats::default());
    }

    #[test]
    fn visible_filters_race_only() {
        let mut session = empty();
        add(&mut session, "Gear", Category::Gear);
        add(&mut session, "Race", Category::Race);
        let visible = session.visible(StatusFilter::All, CategoryFilter::Only(Category::Race));
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Race");
    }

    #[test]
    fn reload_picks_up_external_writes() {
        let mut session = empty();
        add(&mut session, "Mine", Category::Race);
        let external = r#"[{"id":"9","title":"From CLI","description":"","category":"vlog","priority":"low","status":"idea","createdAt":"2025-01-01T00:00:00.000Z"}]"#;
        session
            .repo
            .save_ideas(&serde_json::from_str::<Vec<Idea>>(external).unwrap())
            .unwrap();
        session.reload();
        assert_eq!(session.ideas().len(), 1);
        assert_eq!(session.ideas()[0].title, "From CLI");
    }

    #[test]
    fn open_with_corrupt_data_starts_empty() {
        let store = MemoryStore::new()
            .with_entry(IDEAS_KEY, "nope")
            .with_entry(STATS_KEY, "[]");
        let session = Session::open(KvRepository::new(store));
        assert!(session.ideas().is_empty());
        assert_eq!(session.stats(), &ChannelStats::default());
    }

    fn file_session(dir: &std::path::Path) -> Session<KvRepository<FileStore>> {
        Session::open(KvRepository::new(FileStore::new(dir)))
    }

    fn titles<R: Repository>(session: &Session<R>) -> Vec<&str> {
        session.ideas().iter().map(|i| i.title.as_str()).collect()
    }

    #[test]
    fn reload_before_write_keeps_other_process_ideas() {
        let tmp = TempDir::new().unwrap();
        let mut tui = file_session(tmp.path());
        let tui_id = add(&mut tui, "tui idea", Category::Vlog).unwrap();

        let mut cli = file_session(tmp.path());
        add(&mut cli, "cli idea", Category::Race).unwrap();
        cli.close().unwrap();

        tui.reload();
        assert!(tui.update_status(&tui_id, Status::Filming).unwrap());

        let reopened = file_session(tmp.path());
        assert_eq!(titles(&reopened), vec!["cli idea", "tui idea"]);
        assert_eq!(reopened.find(&tui_id).unwrap().status, Status::Filming);
    }

    #[test]
    fn close_does_not_rewrite_saved_collections() {
        let tmp = TempDir::new().unwrap();
        let mut tui = file_session(tmp.path());
        add(&mut tui, "tui idea", Category::Vlog).unwrap();
        tui.set_stat(StatField::Subscribers, "900").unwrap();

        let mut cli = file_session(tmp.path());
        add(&mut cli, "cli idea", Category::Race).unwrap();
        cli.set_stat(StatField::Subscribers, "1.2k").unwrap();
        cli.close().unwrap();

        tui.close().unwrap();
        let reopened = file_session(tmp.path());
        assert_eq!(titles(&reopened), vec!["cli idea", "tui idea"]);
        assert_eq!(reopened.stats().subscribers, "1.2k");
    }

    /// Memory store whose writes fail while `failing` is set
    struct FlakyStore {
        inner: MemoryStore,
        failing: Rc<Cell<bool>>,
    }

    impl FlakyStore {
        fn check(&self, key: &str) -> Result<(), StoreError> {
            if self.failing.get() {
                return Err(StoreError::WriteError {
                    key: key.to_string(),
                    source: std::io::Error::other("disk full"),
                });
            }
            Ok(())
        }
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            self.check(key)?;
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<(), StoreError> {
            self.check(key)?;
            self.inner.remove(key)
        }
    }

    #[test]
    fn failed_save_survives_reload_and_flushes_on_close() {
        let failing = Rc::new(Cell::new(true));
        let store = FlakyStore {
            inner: MemoryStore::new(),
            failing: Rc::clone(&failing),
        };
        let mut session = Session::open(KvRepository::new(store));

        let mut form = FormController::default();
        form.open();
        form.draft_mut().title = "Not yet on disk".into();
        assert!(session.add(&mut form, at(1_715_688_000_000)).is_err());
        assert!(session.set_stat(StatField::TotalVideos, "7").is_err());

        session.reload();
        assert_eq!(titles(&session), vec!["Not yet on disk"]);
        assert_eq!(session.stats().total_videos, 7);

        failing.set(false);
        let reopened = Session::open(session.close().unwrap());
        assert_eq!(titles(&reopened), vec!["Not yet on disk"]);
        assert_eq!(reopened.stats().total_videos, 7);
    }
}
