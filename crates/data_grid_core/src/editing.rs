//! Transient view/edit state owned by an editable cell.

/// Result of feeding an event to an [`EditableCellState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The draft differed from the original; the caller should invoke its save callback.
    Saved(String),
    /// Edit mode ended without a change.
    Unchanged,
    /// Edit mode was abandoned and the original restored.
    Cancelled,
    /// The event did not affect the cell.
    Ignored,
}

/// Keys the editable cell reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    /// Commit.
    Enter,
    /// Cancel.
    Escape,
    /// Any other key.
    Other,
}

impl EditKey {
    /// Classifies a DOM `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Self {
        match key {
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            _ => Self::Other,
        }
    }
}

/// Two-state machine: view (plain text) and edit (input seeded with the current value).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditableCellState {
    value: String,
    draft: Option<String>,
    incoming: Option<String>,
}

impl EditableCellState {
    /// Starts in view mode showing `value`.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            draft: None,
            incoming: None,
        }
    }

    /// Whether the input is active.
    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// Text shown in view mode.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Current input contents, if editing.
    pub fn draft(&self) -> Option<&str> {
        self.draft.as_deref()
    }

    /// Double activation: enters edit mode with the input seeded from the current value.
    pub fn begin(&mut self) {
        if self.draft.is_none() {
            self.draft = Some(self.value.clone());
        }
    }

    /// Replaces the input contents.
    pub fn input(&mut self, text: impl Into<String>) {
        if let Some(draft) = self.draft.as_mut() {
            *draft = text.into();
        }
    }

    /// Enter or blur: leaves edit mode, reporting [`EditOutcome::Saved`] only on change.
    pub fn commit(&mut self) -> EditOutcome {
        self.settle_incoming();
        match self.draft.take() {
            Some(draft) if draft != self.value => {
                self.value = draft.clone();
                EditOutcome::Saved(draft)
            }
            Some(_) => EditOutcome::Unchanged,
            None => EditOutcome::Ignored,
        }
    }

    /// Escape: discards the draft and restores the original value.
    pub fn cancel(&mut self) -> EditOutcome {
        self.settle_incoming();
        match self.draft.take() {
            Some(_) => EditOutcome::Cancelled,
            None => EditOutcome::Ignored,
        }
    }

    /// Keyboard dispatch.
    pub fn key(&mut self, key: EditKey) -> EditOutcome {
        match key {
            EditKey::Enter => self.commit(),
            EditKey::Escape => self.cancel(),
            EditKey::Other => EditOutcome::Ignored,
        }
    }

    /// Accepts an externally updated value. Mid-edit the value is held back until the edit ends,
    /// so the input is never overwritten under the user.
    pub fn sync(&mut self, value: impl Into<String>) {
        if self.draft.is_none() {
            self.value = value.into();
        } else {
            self.incoming = Some(value.into());
        }
    }

    /// Restores `value` after a rejected save.
    pub fn revert(&mut self, value: impl Into<String>) {
        self.draft = None;
        self.incoming = None;
        self.value = value.into();
    }

    fn settle_incoming(&mut self) {
        if let Some(value) = self.incoming.take() {
            self.value = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn escape_restores_pre_edit_value_without_saving() {
        let mut cell = EditableCellState::new("Ada");
        cell.begin();
        cell.input("Grace");
        assert_eq!(cell.key(EditKey::from_key("Escape")), EditOutcome::Cancelled);
        assert_eq!(cell.value(), "Ada");
        assert!(!cell.is_editing());
    }

    #[test]
    fn enter_saves_once_with_new_value() {
        let mut cell = EditableCellState::new("Ada");
        cell.begin();
        assert_eq!(cell.draft(), Some("Ada"));
        cell.input("Grace");
        assert_eq!(
            cell.key(EditKey::from_key("Enter")),
            EditOutcome::Saved("Grace".to_string())
        );
        assert_eq!(cell.value(), "Grace");
        assert_eq!(cell.key(EditKey::Enter), EditOutcome::Ignored);
    }

    #[test]
    fn blur_without_change_does_not_save() {
        let mut cell = EditableCellState::new("Ada");
        cell.begin();
        assert_eq!(cell.commit(), EditOutcome::Unchanged);
    }

    #[test]
    fn sync_mid_edit_lands_when_the_edit_ends() {
        let mut cell = EditableCellState::new("Ada");
        cell.begin();
        cell.sync("External");
        assert_eq!(cell.value(), "Ada");
        assert_eq!(cell.draft(), Some("Ada"));
        cell.cancel();
        assert_eq!(cell.value(), "External");
    }

    #[test]
    fn rejected_save_reverted_mid_edit_is_not_left_stale() {
        let mut cell = EditableCellState::new("Ada");
        cell.begin();
        cell.input("Grace");
        assert_eq!(cell.commit(), EditOutcome::Saved("Grace".to_string()));

        // The optimistic value is shown, then the user reopens the cell before the verdict.
        cell.sync("Grace");
        cell.begin();
        cell.sync("Ada");
        assert_eq!(cell.key(EditKey::Escape), EditOutcome::Cancelled);
        assert_eq!(cell.value(), "Ada");

        cell.begin();
        cell.input("Grace");
        assert_eq!(cell.commit(), EditOutcome::Saved("Grace".to_string()));
    }

    #[test]
    fn unchanged_commit_adopts_the_newer_external_value() {
        let mut cell = EditableCellState::new("Ada");
        cell.begin();
        cell.sync("Grace");
        cell.input("Grace");
        assert_eq!(cell.commit(), EditOutcome::Unchanged);
        assert_eq!(cell.value(), "Grace");
    }
}
