use chrono::{DateTime, Utc};

use crate::model::config::FormConfig;
use crate::model::idea::{Draft, Idea};
use crate::ops::idea_ops;

/// The "new idea" form: a draft that is not part of the list until submitted.
#[derive(Debug, Clone)]
pub struct FormController {
    draft: Draft,
    open: bool,
    defaults: Draft,
    reset_on_cancel: bool,
}

impl FormController {
    pub fn new(config: &FormConfig) -> Self {
        let defaults = config.empty_draft();
        FormController {
            draft: defaults.clone(),
            open: false,
            defaults,
            reset_on_cancel: config.reset_on_cancel,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Show or hide the panel; the draft is kept either way
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    /// Turn the draft into a record, reset the draft and close the panel.
    ///
    /// A blank title leaves everything as it was and returns `None`. The
    /// caller is responsible for prepending the record to the list.
    pub fn submit(&mut self, ideas: &[Idea], now: DateTime<Utc>) -> Option<Idea> {
        let idea = idea_ops::idea_from_draft(&self.draft, ideas, now)?;
        self.draft = self.defaults.clone();
        self.open = false;
        Some(idea)
    }

    /// Close the panel without touching the list
    pub fn cancel(&mut self) {
        self.open = false;
        if self.reset_on_cancel {
            self.draft = self.defaults.clone();
        }
    }
}

impl Default for FormController {
    fn default() -> Self {
        FormController::new(&FormConfig::default())
    }
}
