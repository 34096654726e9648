//! Row derivation pipeline: search, then structured filter, then sort, then paginate.

use std::cmp::Ordering;

use crate::model::{CellValue, FilterModel, GridRow, PaginationModel, SortDirection, SortModel};

/// Whether `row` survives the free-text search.
///
/// An empty search passes every row. Otherwise some non-null field's string cast must contain
/// the search text, compared case-insensitively.
pub fn row_matches_search<R: GridRow>(row: &R, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    row.field_names().into_iter().any(|name| {
        let value = row.field(name);
        !value.is_null() && value.display().to_lowercase().contains(&needle)
    })
}

/// Filters `rows` by the free-text search, preserving order.
pub fn search_rows<'a, R: GridRow>(rows: &'a [R], search: &str) -> Vec<&'a R> {
    rows.iter()
        .filter(|row| row_matches_search(*row, search))
        .collect()
}

fn rank(value: &CellValue) -> u8 {
    match value {
        CellValue::Null => 0,
        CellValue::Bool(_) => 1,
        CellValue::Number(_) => 2,
        CellValue::Text(_) => 3,
    }
}

/// Ascending comparator: nulls first, numbers numerically, text case-insensitively with the raw
/// text as a tie-breaker. Mixed kinds order by kind.
pub fn compare_cells(left: &CellValue, right: &CellValue) -> Ordering {
    match (left, right) {
        (CellValue::Null, CellValue::Null) => Ordering::Equal,
        (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
        (CellValue::Number(a), CellValue::Number(b)) => a.total_cmp(b),
        (CellValue::Text(a), CellValue::Text(b)) => a
            .to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b)),
        _ => rank(left).cmp(&rank(right)),
    }
}

/// Stable sort of row indices by the sort model. An empty model keeps caller order.
pub fn sort_indices<R: GridRow>(rows: &[&R], indices: &mut [usize], sort: &SortModel) {
    if sort.is_empty() {
        return;
    }
    indices.sort_by(|&a, &b| {
        sort.0
            .iter()
            .map(|item| {
                let ordering =
                    compare_cells(&rows[a].field(&item.field), &rows[b].field(&item.field));
                match item.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    });
}

/// Output of [`derive_rows`]. Indices point into the input slice.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DerivedRows {
    /// Rows surviving search and filter, in sort order.
    pub filtered: Vec<usize>,
    /// The visible page of `filtered`.
    pub page: Vec<usize>,
    /// Page count for the filtered set.
    pub page_count: usize,
}

impl DerivedRows {
    /// Filtered row count.
    pub fn total(&self) -> usize {
        self.filtered.len()
    }
}

/// Runs the full pipeline. `pagination` of `None` renders every filtered row on one page.
pub fn derive_rows<R: GridRow>(
    rows: &[&R],
    search: &str,
    filter: &FilterModel,
    sort: &SortModel,
    pagination: Option<&PaginationModel>,
) -> DerivedRows {
    let mut filtered = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row_matches_search(**row, search) && filter.matches(**row))
        .map(|(index, _)| index)
        .collect::<Vec<_>>();
    sort_indices(rows, &mut filtered, sort);

    let (page, page_count) = match pagination {
        Some(pagination) => (
            filtered[pagination.range(filtered.len())].to_vec(),
            pagination.page_count(filtered.len()),
        ),
        None => (filtered.clone(), 1),
    };
    DerivedRows {
        filtered,
        page,
        page_count,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{FilterItem, FilterLogic, FilterOperator, Record, SortItem};

    fn people() -> Vec<Record> {
        vec![
            Record::new().with("id", 1).with("name", "Ada").with("age", 36),
            Record::new().with("id", 2).with("name", "grace").with("age", 85),
            Record::new().with("id", 3).with("name", "Alan").with("age", CellValue::Null),
            Record::new().with("id", 4).with("name", "Barbara").with("age", 36),
            Record::new().with("id", 5).with("name", "Edsger").with("age", 72),
        ]
    }

    fn names(rows: &[&Record], indices: &[usize]) -> Vec<String> {
        indices
            .iter()
            .map(|&index| rows[index].field("name").display())
            .collect()
    }

    #[test]
    fn search_is_case_insensitive_subset() {
        let rows = people();
        for search in ["", "a", "GRACE", "36", "zzz", "ar"] {
            let found = search_rows(&rows, search);
            for row in &rows {
                let expected = search.is_empty()
                    || row.iter().any(|(_, value)| {
                        !value.is_null()
                            && value
                                .display()
                                .to_lowercase()
                                .contains(&search.to_lowercase())
                    });
                assert_eq!(found.contains(&row), expected, "search {search:?} row {row:?}");
            }
        }
    }

    #[test]
    fn null_fields_never_match_search() {
        let rows = vec![Record::new().with("note", CellValue::Null)];
        assert!(search_rows(&rows, "null").is_empty());
    }

    #[test]
    fn three_header_clicks_restore_original_order() {
        let owned = people();
        let rows = owned.iter().collect::<Vec<_>>();
        let original = derive_rows(&rows, "", &FilterModel::default(), &SortModel::default(), None);

        let mut sort = SortModel::default();
        sort.toggle("name");
        let asc = derive_rows(&rows, "", &FilterModel::default(), &sort, None);
        assert_eq!(
            names(&rows, &asc.filtered),
            vec!["Ada", "Alan", "Barbara", "Edsger", "grace"]
        );
        sort.toggle("name");
        let desc = derive_rows(&rows, "", &FilterModel::default(), &sort, None);
        assert_eq!(names(&rows, &desc.filtered)[0], "grace");
        sort.toggle("name");
        let reset = derive_rows(&rows, "", &FilterModel::default(), &sort, None);
        assert_eq!(reset.filtered, original.filtered);
    }

    #[test]
    fn numeric_sort_puts_nulls_first_and_is_stable() {
        let owned = people();
        let rows = owned.iter().collect::<Vec<_>>();
        let sort = SortModel(vec![SortItem {
            field: "age".to_string(),
            direction: SortDirection::Asc,
        }]);
        let derived = derive_rows(&rows, "", &FilterModel::default(), &sort, None);
        assert_eq!(
            names(&rows, &derived.filtered),
            vec!["Alan", "Ada", "Barbara", "Edsger", "grace"]
        );
    }

    #[test]
    fn pages_concatenate_to_filtered_set() {
        let owned = (0..23)
            .map(|n| Record::new().with("id", n).with("name", format!("row {n}")))
            .collect::<Vec<_>>();
        let rows = owned.iter().collect::<Vec<_>>();
        let sort = SortModel(vec![SortItem {
            field: "id".to_string(),
            direction: SortDirection::Desc,
        }]);
        let mut pagination = PaginationModel {
            page: 0,
            page_size: 5,
        };
        let first = derive_rows(&rows, "", &FilterModel::default(), &sort, Some(&pagination));
        assert_eq!(first.page_count, 5);

        let mut concatenated = Vec::new();
        for page in 0..first.page_count {
            pagination.page = page;
            let derived = derive_rows(&rows, "", &FilterModel::default(), &sort, Some(&pagination));
            concatenated.extend(derived.page);
        }
        assert_eq!(concatenated, first.filtered);
    }

    #[test]
    fn search_applies_before_structured_filter() {
        let owned = people();
        let rows = owned.iter().collect::<Vec<_>>();
        let filter = FilterModel {
            items: vec![
                FilterItem {
                    field: "age".to_string(),
                    operator: FilterOperator::GreaterThan,
                    value: 50.into(),
                },
                FilterItem {
                    field: "name".to_string(),
                    operator: FilterOperator::StartsWith,
                    value: "b".into(),
                },
            ],
            logic: FilterLogic::Or,
        };
        let derived = derive_rows(&rows, "a", &filter, &SortModel::default(), None);
        assert_eq!(names(&rows, &derived.filtered), vec!["grace", "Barbara"]);
    }
}
