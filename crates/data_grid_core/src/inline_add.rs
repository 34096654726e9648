//! Inline row creation: placeholder affordance and active draft row.

use std::rc::Rc;

use crate::column::ColumnDef;
use crate::config::InlineAddConfig;
use crate::model::{CellValue, FieldErrors, GridRow, Record};

/// Message recorded for a blank required field.
pub const REQUIRED_MESSAGE: &str = "This field is required";

/// Caller validator run over the merged record on submit.
pub type RecordValidator = Rc<dyn Fn(&Record) -> FieldErrors>;

/// Inline-add state machine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InlineAddState {
    /// Placeholder affordance.
    #[default]
    Inactive,
    /// Editable draft row.
    Active {
        /// Entered values.
        draft: Record,
        /// Field-level messages from the last submit.
        errors: FieldErrors,
    },
}

/// Keyboard intent inside an inline-add input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineAddKey {
    /// Modifier + Enter.
    Submit,
    /// Escape.
    Cancel,
    /// Anything else.
    None,
}

impl InlineAddKey {
    /// Classifies a DOM key with the ctrl/meta modifier state.
    pub fn classify(key: &str, modifier: bool) -> Self {
        match key {
            "Enter" if modifier => Self::Submit,
            "Escape" | "Esc" => Self::Cancel,
            _ => Self::None,
        }
    }
}

/// Fields offered as inputs: data columns not excluded, inside the allow-list when one is
/// configured, and not explicitly marked non-editable.
pub fn eligible_fields<R: GridRow>(
    columns: &[ColumnDef<R>],
    config: &InlineAddConfig,
) -> Vec<String> {
    columns
        .iter()
        .filter(|column| column.kind.holds_data())
        .filter(|column| column.editable != Some(false))
        .filter(|column| !config.exclude_fields.contains(&column.field))
        .filter(|column| {
            config
                .fields
                .as_ref()
                .map_or(true, |allowed| allowed.contains(&column.field))
        })
        .map(|column| column.field.clone())
        .collect()
}

/// Defaults overlaid with entered values. Blank entries do not override a default.
pub fn merge_with_defaults(defaults: &Record, entered: &Record) -> Record {
    let mut merged = defaults.clone();
    for (field, value) in entered.iter() {
        if value.is_blank() && defaults.get(field).is_some() {
            continue;
        }
        merged.insert(field.clone(), value.clone());
    }
    merged
}

/// Required-field and custom validation over a merged record.
pub fn validate_record(
    merged: &Record,
    config: &InlineAddConfig,
    validator: Option<&RecordValidator>,
) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for field in &config.required_fields {
        if merged.get(field).map_or(true, CellValue::is_blank) {
            errors.insert(field.clone(), REQUIRED_MESSAGE.to_string());
        }
    }
    if let Some(validator) = validator {
        for (field, message) in validator(merged) {
            errors.entry(field).or_insert(message);
        }
    }
    errors
}

impl InlineAddState {
    /// Whether the draft row is showing.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    /// Entered values, if active.
    pub fn draft(&self) -> Option<&Record> {
        match self {
            Self::Active { draft, .. } => Some(draft),
            Self::Inactive => None,
        }
    }

    /// Field errors from the last submit.
    pub fn errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Active { errors, .. } => Some(errors),
            Self::Inactive => None,
        }
    }

    /// Placeholder activation. A no-op when already active.
    pub fn activate(&mut self) {
        if !self.is_active() {
            *self = Self::Active {
                draft: Record::new(),
                errors: FieldErrors::new(),
            };
        }
    }

    /// Records an entered value and clears that field's error.
    pub fn set_field(&mut self, field: &str, value: CellValue) {
        if let Self::Active { draft, errors } = self {
            draft.insert(field, value);
            errors.remove(field);
        }
    }

    /// Escape or explicit cancel: discards the draft unconditionally.
    pub fn cancel(&mut self) {
        *self = Self::Inactive;
    }

    /// Submit: merges defaults, validates, and on success returns the record and deactivates.
    ///
    /// On validation failure the errors are stored and `None` is returned; the draft survives.
    pub fn submit(
        &mut self,
        config: &InlineAddConfig,
        validator: Option<&RecordValidator>,
    ) -> Option<Record> {
        let Self::Active { draft, errors } = self else {
            return None;
        };
        let merged = merge_with_defaults(&config.default_values, draft);
        let found = validate_record(&merged, config, validator);
        if found.is_empty() {
            *self = Self::Inactive;
            Some(merged)
        } else {
            *errors = found;
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cells::CellKind;

    fn config() -> InlineAddConfig {
        InlineAddConfig {
            enabled: true,
            required_fields: vec!["email".to_string()],
            default_values: Record::new().with("role", "viewer").with("status", "active"),
            ..InlineAddConfig::default()
        }
    }

    #[test]
    fn required_field_blocks_submit_until_filled() {
        let config = config();
        let mut state = InlineAddState::default();
        state.activate();
        state.set_field("name", "Ada".into());

        assert_eq!(state.submit(&config, None), None);
        assert_eq!(
            state.errors().and_then(|errors| errors.get("email")).map(String::as_str),
            Some(REQUIRED_MESSAGE)
        );

        state.set_field("email", "ada@x.io".into());
        assert!(state.errors().is_some_and(FieldErrors::is_empty));
        let added = state.submit(&config, None).expect("record");
        assert_eq!(
            added,
            Record::new()
                .with("email", "ada@x.io")
                .with("name", "Ada")
                .with("role", "viewer")
                .with("status", "active")
        );
        assert!(!state.is_active());
    }

    #[test]
    fn entered_values_override_defaults_but_blanks_do_not() {
        let defaults = Record::new().with("role", "viewer").with("team", "core");
        let entered = Record::new().with("role", "admin").with("team", "  ");
        let merged = merge_with_defaults(&defaults, &entered);
        assert_eq!(merged.get("role"), Some(&CellValue::from("admin")));
        assert_eq!(merged.get("team"), Some(&CellValue::from("core")));
    }

    #[test]
    fn custom_validator_errors_are_merged() {
        let config = InlineAddConfig {
            enabled: true,
            ..InlineAddConfig::default()
        };
        let validator: RecordValidator = Rc::new(|record: &Record| {
            let mut errors = FieldErrors::new();
            if record.get("age").and_then(CellValue::as_f64).is_some_and(|age| age < 0.0) {
                errors.insert("age".to_string(), "Age must be positive".to_string());
            }
            errors
        });
        let mut state = InlineAddState::default();
        state.activate();
        state.set_field("age", CellValue::Number(-1.0));
        assert_eq!(state.submit(&config, Some(&validator)), None);
        assert_eq!(state.errors().map(FieldErrors::len), Some(1));
    }

    #[test]
    fn cancel_discards_draft() {
        let mut state = InlineAddState::default();
        state.activate();
        state.set_field("name", "Ada".into());
        state.cancel();
        assert_eq!(state, InlineAddState::Inactive);
        state.activate();
        assert_eq!(state.draft(), Some(&Record::new()));
    }

    #[test]
    fn eligibility_respects_exclusions_allow_list_and_editability() {
        let columns = vec![
            ColumnDef::<Record>::new("id", "ID").editable(false),
            ColumnDef::new("name", "Name"),
            ColumnDef::new("email", "Email").editable(true),
            ColumnDef::new("notes", "Notes"),
            ColumnDef::new("drag", "").kind(CellKind::DragHandle),
        ];
        let mut config = InlineAddConfig {
            exclude_fields: vec!["notes".to_string()],
            ..InlineAddConfig::default()
        };
        assert_eq!(eligible_fields(&columns, &config), vec!["name", "email"]);
        config.fields = Some(vec!["email".to_string(), "id".to_string()]);
        assert_eq!(eligible_fields(&columns, &config), vec!["email"]);
    }

    #[test]
    fn modifier_enter_submits() {
        assert_eq!(InlineAddKey::classify("Enter", true), InlineAddKey::Submit);
        assert_eq!(InlineAddKey::classify("Enter", false), InlineAddKey::None);
        assert_eq!(InlineAddKey::classify("Escape", false), InlineAddKey::Cancel);
    }
}
