//! Sample team directory rendered by the showcase grid.

use data_grid_core::cells::{AvatarOptions, StatusPalette, StatusTone};
use data_grid_core::model::FieldErrors;
use data_grid_core::{
    CellKind, CellValue, ColumnDef, CurrencyFormatter, DataGridConfig, GridRow, Record, RowId,
};
use leptos::logging;

const TEAM_JSON: &str = r#"[
    { "id": 1, "name": "Ada Lovelace", "email": "ada@example.com", "status": "active",
      "department": "Engineering", "team": "Compilers", "completion": 100, "rating": 4.5, "salary": 182000 },
    { "id": 2, "name": "Grace Hopper", "email": "grace@example.com", "status": "active",
      "department": "Engineering", "team": "Tooling", "completion": 85, "rating": 5, "salary": 176500 },
    { "id": 3, "name": "Alan Turing", "email": "alan@example.com", "status": "on-leave",
      "department": "Research", "team": "Foundations", "completion": 60, "rating": 4, "salary": 168000 },
    { "id": 4, "name": "Katherine Johnson", "email": "katherine@example.com", "status": "active",
      "department": "Research", "team": "Trajectory", "completion": 92, "rating": 4.5, "salary": 159250 },
    { "id": 5, "name": "Edsger Dijkstra", "email": "edsger@example.com", "status": "pending",
      "department": "Engineering", "team": "Runtime", "completion": 35, "rating": 3.5, "salary": 149900 },
    { "id": 6, "name": "Barbara Liskov", "email": "barbara@example.com", "status": "active",
      "department": "Architecture", "team": "Platform", "completion": 78, "rating": 5, "salary": 188000 },
    { "id": 7, "name": "Donald Knuth", "email": "donald@example.com", "status": "suspended",
      "department": "Documentation", "team": "Typesetting", "completion": 12, "rating": 4, "salary": 121000 },
    { "id": 8, "name": "Margaret Hamilton", "email": "margaret@example.com", "status": "active",
      "department": "Engineering", "team": "Flight Software", "completion": 97, "rating": 5, "salary": 191500 },
    { "id": 9, "name": "John Backus", "email": "john@example.com", "status": "pending",
      "department": "Research", "team": "Languages", "completion": 48, "rating": 3, "salary": 138750 },
    { "id": 10, "name": "Frances Allen", "email": "frances@example.com", "status": "active",
      "department": "Engineering", "team": "Optimizers", "completion": 88, "rating": 4.5, "salary": 172300 },
    { "id": 11, "name": "Ken Thompson", "email": "ken@example.com", "status": "on-leave",
      "department": "Architecture", "team": "Operating Systems", "completion": 70, "rating": 4, "salary": 165000 },
    { "id": 12, "name": "Radia Perlman", "email": "radia@example.com", "status": "active",
      "department": "Networking", "team": "Routing", "completion": 81, "rating": 4.5, "salary": 170400 }
]"#;

const GRID_CONFIG_JSON: &str = r#"{
    "density": "standard",
    "pagination": { "page_size": 5, "page_size_options": [5, 10, 25] },
    "sorting": { "initial": { "field": "name", "direction": "asc" } },
    "row_actions": { "display": "menu", "max_inline": 2 },
    "inline_add": {
        "enabled": true,
        "required_fields": ["name", "email"],
        "exclude_fields": ["completion"],
        "default_values": { "status": "pending", "completion": 0, "rating": 3 },
        "placeholder": "Add a team member"
    },
    "toolbar": {
        "title": "Team directory",
        "subtitle": "Double-click a cell to edit it",
        "search_placeholder": "Search people..."
    },
    "export": { "file_name": "team-directory" },
    "empty_message": "No people match the current filters"
}"#;

/// Seed rows for the directory grid.
pub fn team_rows() -> Vec<Record> {
    match serde_json::from_str(TEAM_JSON) {
        Ok(rows) => rows,
        Err(err) => {
            logging::warn!("showcase sample rows failed to parse: {err}");
            Vec::new()
        }
    }
}

/// Grid configuration; a malformed payload falls back to defaults.
pub fn grid_config() -> DataGridConfig {
    DataGridConfig::from_json(GRID_CONFIG_JSON).unwrap_or_else(|err| {
        logging::warn!("showcase grid config failed to parse: {err}");
        DataGridConfig::default()
    })
}

/// Directory columns exercising every renderer.
pub fn team_columns() -> Vec<ColumnDef<Record>> {
    let status = StatusPalette::new()
        .with("active", StatusTone::Success)
        .with("pending", StatusTone::Info)
        .with("on-leave", StatusTone::Warning)
        .with("suspended", StatusTone::Error);
    let salary = CurrencyFormatter::new("USD", "en-US").unwrap_or_default();

    vec![
        ColumnDef::new("handle", "").kind(CellKind::DragHandle).width(36),
        ColumnDef::new("name", "Name")
            .kind(CellKind::Avatar(AvatarOptions {
                secondary_field: Some("email".to_string()),
                show_secondary: true,
                image_field: None,
            }))
            .flex(2.0)
            .editable(true)
            .validator(|value, _| value.is_blank().then(|| "Name is required".to_string())),
        ColumnDef::new("email", "Email").flex(1.5).editable(true),
        ColumnDef::new("status", "Status")
            .kind(CellKind::Status(status))
            .width(120)
            .editable(true),
        ColumnDef::new("department", "Department")
            .kind(CellKind::TwoLine {
                secondary_field: "team".to_string(),
            })
            .flex(1.0),
        ColumnDef::new("completion", "Onboarding")
            .kind(CellKind::progress())
            .width(160),
        ColumnDef::new("rating", "Rating")
            .kind(CellKind::rating())
            .width(120)
            .editable(true)
            .validator(|value, _| match value.as_f64() {
                Some(rating) if (0.0..=5.0).contains(&rating) => None,
                _ => Some("Rating must be between 0 and 5".to_string()),
            }),
        ColumnDef::new("salary", "Salary")
            .kind(CellKind::Currency(salary))
            .width(140)
            .editable(true),
    ]
}

/// Next free numeric id.
pub fn next_id(rows: &[Record]) -> u32 {
    rows.iter()
        .filter_map(|row| row.field("id").as_f64())
        .fold(0.0_f64, f64::max) as u32
        + 1
}

/// Replaces the row sharing `updated`'s id.
pub fn apply_update(rows: &mut [Record], updated: &Record) {
    let id = row_id(updated);
    if let Some(row) = rows.iter_mut().find(|row| row_id(row) == id) {
        *row = updated.clone();
    }
}

/// Appends an inline-add record under a fresh id.
pub fn append_record(rows: &mut Vec<Record>, mut record: Record) -> RowId {
    let id = next_id(rows);
    record.insert("id", id);
    rows.push(record);
    RowId::from(id)
}

/// Drops rows whose ids appear in `ids`.
pub fn remove_rows(rows: &mut Vec<Record>, ids: &[RowId]) {
    rows.retain(|row| !ids.contains(&row_id(row)));
}

/// Row id as read by the grid's default identifier.
pub fn row_id(row: &Record) -> RowId {
    RowId::new(row.field("id").display())
}

/// Rejects blank names; the grid reverts the edit and shows the message.
pub fn check_update(row: &Record) -> Result<(), String> {
    if row.field("name").is_blank() {
        return Err("Name cannot be empty".to_string());
    }
    if row.field("email") != CellValue::Null && !row.field("email").display().contains('@') {
        return Err("Email must contain @".to_string());
    }
    Ok(())
}

/// Extra inline-add check run after the required-field pass.
pub fn validate_new_member(record: &Record) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let email = record.field("email");
    if !email.is_blank() && !email.display().contains('@') {
        errors.insert("email".to_string(), "Enter a valid email address".to_string());
    }
    errors
}

#[cfg(test)]
mod tests {
    use data_grid_core::{ExportFormat, GridSchema};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn embedded_payloads_parse() {
        let rows = team_rows();
        assert_eq!(rows.len(), 12);
        assert_eq!(rows[0].field("name"), CellValue::from("Ada Lovelace"));

        let config = grid_config();
        assert_eq!(config.pagination.page_size, 5);
        assert!(config.inline_add.enabled);
        assert_eq!(
            config.export.formats,
            vec![ExportFormat::Csv, ExportFormat::Json, ExportFormat::Clipboard]
        );
    }

    #[test]
    fn columns_build_into_a_schema() {
        let schema = GridSchema::builder(team_columns())
            .build(&grid_config())
            .expect("schema");
        assert_eq!(schema.columns().len(), 8);
    }

    #[test]
    fn appended_records_take_the_next_id() {
        let mut rows = team_rows();
        let id = append_record(&mut rows, Record::new().with("name", "Hedy Lamarr"));
        assert_eq!(id, RowId::from(13u32));
        assert_eq!(next_id(&rows), 14);
        assert_eq!(next_id(&[]), 1);
    }

    #[test]
    fn updates_and_removals_target_matching_ids() {
        let mut rows = team_rows();
        let updated = rows[1].clone().with("status", "suspended");
        apply_update(&mut rows, &updated);
        assert_eq!(rows[1].field("status"), CellValue::from("suspended"));

        remove_rows(&mut rows, &[RowId::from(1u32), RowId::from(2u32)]);
        assert_eq!(rows.len(), 10);
        assert!(rows.iter().all(|row| row_id(row) != RowId::from(1u32)));
    }

    #[test]
    fn new_member_email_needs_an_at_sign() {
        let invalid = Record::new().with("email", "ada");
        assert_eq!(
            validate_new_member(&invalid).get("email").map(String::as_str),
            Some("Enter a valid email address")
        );
        assert!(validate_new_member(&Record::new()).is_empty());
    }

    #[test]
    fn blank_names_and_malformed_emails_are_rejected() {
        let row = team_rows().remove(0);
        assert_eq!(check_update(&row), Ok(()));
        assert_eq!(
            check_update(&row.clone().with("name", "  ")),
            Err("Name cannot be empty".to_string())
        );
        assert_eq!(
            check_update(&row.with("email", "nobody")),
            Err("Email must contain @".to_string())
        );
    }
}
