// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! List-view engine: filtering, stable sorting, page windowing, and
//! per-dimension aggregate counts over an in-memory record collection.
//!
//! Every screen with a searchable table goes through [`compute_view`]; the
//! engine never mutates its inputs and the same inputs always produce the
//! same [`ViewResult`].

use std::cmp::Ordering;
use std::collections::BTreeMap;

use time::{Date, PrimitiveDateTime};

/// Filter value meaning "no constraint on this dimension".
pub const ALL_VALUES: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Column-header sort toggle. Once a field has been sorted the view never
/// returns to `Unsorted`; repeated clicks on the same field flip direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortState {
    #[default]
    Unsorted,
    By {
        field: &'static str,
        direction: SortDirection,
    },
}

impl SortState {
    #[must_use]
    pub fn click(self, field: &'static str) -> Self {
        match self {
            Self::By {
                field: current,
                direction: SortDirection::Asc,
            } if current == field => Self::By {
                field,
                direction: SortDirection::Desc,
            },
            _ => Self::By {
                field,
                direction: SortDirection::Asc,
            },
        }
    }

    pub fn direction_for(self, field: &'static str) -> Option<SortDirection> {
        match self {
            Self::By { field: current, direction } if current == field => Some(direction),
            _ => None,
        }
    }
}

/// One sortable cell value. Comparison is total within a kind: numbers
/// numerically, dates and timestamps chronologically, text by codepoint.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Money(i64),
    Date(Date),
    DateTime(PrimitiveDateTime),
}

impl FieldValue {
    fn cmp_value(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(left), Self::Text(right)) => left.cmp(right),
            (Self::Integer(left), Self::Integer(right)) => left.cmp(right),
            (Self::Money(left), Self::Money(right)) => left.cmp(right),
            (Self::Date(left), Self::Date(right)) => left.cmp(right),
            (Self::DateTime(left), Self::DateTime(right)) => left.cmp(right),
            // Mixed kinds only occur on malformed records; treat them as
            // equal so the stable sort leaves their order alone.
            _ => Ordering::Equal,
        }
    }
}

/// A named enumerable field usable to narrow the visible set. Dimensions
/// flagged `shortcut` are also rendered as clickable statistic tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDimension {
    pub name: &'static str,
    pub label: &'static str,
    pub values: Vec<String>,
    pub shortcut: bool,
}

/// Everything that determines what is currently visible on a list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub search: String,
    pub filters: BTreeMap<&'static str, String>,
    pub sort: SortState,
    pub page: usize,
    pub page_size: usize,
}

impl ViewState {
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            filters: BTreeMap::new(),
            sort: SortState::Unsorted,
            page: 1,
            page_size,
        }
    }

    pub fn filter_value(&self, dimension: &str) -> &str {
        self.filters
            .get(dimension)
            .map_or(ALL_VALUES, String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewResult<R> {
    /// Records on the current page, at most `page_size` of them.
    pub rows: Vec<R>,
    pub total_filtered: usize,
    pub total_pages: usize,
    /// The clamped page actually rendered.
    pub page: usize,
    /// dimension name -> value -> count over the filtered set, with an
    /// `"all"` entry per dimension equal to `total_filtered`.
    pub counts: BTreeMap<&'static str, BTreeMap<String, usize>>,
}

impl<R> ViewResult<R> {
    pub fn count_for(&self, dimension: &str, value: &str) -> usize {
        self.counts
            .get(dimension)
            .and_then(|values| values.get(value))
            .copied()
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewError {
    InvalidConfiguration { page_size: usize },
    UnknownSortField(&'static str),
}

impl std::fmt::Display for ViewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfiguration { page_size } => {
                write!(f, "page size must be at least 1, got {page_size}")
            }
            Self::UnknownSortField(field) => {
                write!(f, "unknown sort field `{field}`")
            }
        }
    }
}

impl std::error::Error for ViewError {}

pub type ViewResultOf<R> = Result<ViewResult<R>, ViewError>;

/// A record a list screen can display. `SORT_FIELDS` declares which field
/// names [`compute_view`] accepts as a sort key for this record type.
pub trait ListRecord {
    const SORT_FIELDS: &'static [&'static str];

    /// Fields eligible for substring search, in display order.
    fn search_text(&self) -> Vec<&str>;

    /// Categorical value for a filter dimension, if the record has one.
    fn dimension_value(&self, dimension: &str) -> Option<&str>;

    /// Sortable value for a declared sort field.
    fn sort_value(&self, field: &str) -> Option<FieldValue>;
}

/// Pure view computation: filter, stable-sort, clamp and slice the page,
/// then count the filtered set per declared dimension value.
pub fn compute_view<R>(
    records: &[R],
    dimensions: &[FilterDimension],
    state: &ViewState,
) -> ViewResultOf<R>
where
    R: ListRecord + Clone,
{
    if state.page_size == 0 {
        return Err(ViewError::InvalidConfiguration {
            page_size: state.page_size,
        });
    }
    if let SortState::By { field, .. } = state.sort
        && !R::SORT_FIELDS.contains(&field)
    {
        return Err(ViewError::UnknownSortField(field));
    }

    let needle = state.search.trim().to_lowercase();
    let mut filtered: Vec<&R> = records
        .iter()
        .filter(|record| {
            matches_search(*record, &needle) && matches_dimensions(*record, dimensions, state)
        })
        .collect();

    if let SortState::By { field, direction } = state.sort {
        filtered.sort_by(|left, right| compare_by_field(*left, *right, field, direction));
    }

    let total_filtered = filtered.len();
    let total_pages = total_filtered.div_ceil(state.page_size);
    let page = state.page.clamp(1, total_pages.max(1));
    let start = (page - 1) * state.page_size;
    let rows = filtered
        .iter()
        .skip(start)
        .take(state.page_size)
        .map(|record| (*record).clone())
        .collect();

    let counts = count_dimensions(&filtered, dimensions);

    Ok(ViewResult {
        rows,
        total_filtered,
        total_pages,
        page,
        counts,
    })
}

fn matches_search<R: ListRecord>(record: &R, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    record
        .search_text()
        .iter()
        .any(|text| text.to_lowercase().contains(needle))
}

fn matches_dimensions<R: ListRecord>(
    record: &R,
    dimensions: &[FilterDimension],
    state: &ViewState,
) -> bool {
    dimensions.iter().all(|dimension| {
        let selected = state.filter_value(dimension.name);
        selected == ALL_VALUES || record.dimension_value(dimension.name) == Some(selected)
    })
}

fn compare_by_field<R: ListRecord>(
    left: &R,
    right: &R,
    field: &'static str,
    direction: SortDirection,
) -> Ordering {
    match (left.sort_value(field), right.sort_value(field)) {
        (None, None) => Ordering::Equal,
        // Records without a value sort after the rest in either direction.
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(left), Some(right)) => match direction {
            SortDirection::Asc => left.cmp_value(&right),
            SortDirection::Desc => left.cmp_value(&right).reverse(),
        },
    }
}

fn count_dimensions<R: ListRecord>(
    filtered: &[&R],
    dimensions: &[FilterDimension],
) -> BTreeMap<&'static str, BTreeMap<String, usize>> {
    dimensions
        .iter()
        .map(|dimension| {
            let mut by_value: BTreeMap<String, usize> = dimension
                .values
                .iter()
                .map(|value| (value.clone(), 0))
                .collect();
            for record in filtered {
                if let Some(value) = record.dimension_value(dimension.name)
                    && let Some(count) = by_value.get_mut(value)
                {
                    *count += 1;
                }
            }
            by_value.insert(ALL_VALUES.to_owned(), filtered.len());
            (dimension.name, by_value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{
        ALL_VALUES, FieldValue, FilterDimension, ListRecord, SortDirection, SortState, ViewError,
        ViewState, compute_view,
    };
    use time::macros::datetime;

    #[derive(Debug, Clone, PartialEq)]
    struct Bill {
        code: &'static str,
        tenant: &'static str,
        amount: i64,
        status: &'static str,
    }

    impl ListRecord for Bill {
        const SORT_FIELDS: &'static [&'static str] = &["code", "tenant", "amount"];

        fn search_text(&self) -> Vec<&str> {
            vec![self.code, self.tenant]
        }

        fn dimension_value(&self, dimension: &str) -> Option<&str> {
            (dimension == "status").then_some(self.status)
        }

        fn sort_value(&self, field: &str) -> Option<FieldValue> {
            match field {
                "code" => Some(FieldValue::Text(self.code.to_owned())),
                "tenant" => Some(FieldValue::Text(self.tenant.to_owned())),
                "amount" => Some(FieldValue::Money(self.amount)),
                _ => None,
            }
        }
    }

    fn status_dimension() -> Vec<FilterDimension> {
        vec![FilterDimension {
            name: "status",
            label: "status",
            values: vec!["paid".to_owned(), "pending".to_owned(), "overdue".to_owned()],
            shortcut: true,
        }]
    }

    fn sample_bills() -> Vec<Bill> {
        vec![
            Bill {
                code: "HD002",
                tenant: "Trần Thị Bình",
                amount: 4_200_000,
                status: "pending",
            },
            Bill {
                code: "HD001",
                tenant: "Nguyễn Văn An",
                amount: 3_500_000,
                status: "paid",
            },
            Bill {
                code: "HD003",
                tenant: "Lê Văn Cường",
                amount: 3_800_000,
                status: "overdue",
            },
        ]
    }

    fn numbered_bills(count: usize) -> Vec<Bill> {
        const CODES: [&str; 12] = [
            "HD001", "HD002", "HD003", "HD004", "HD005", "HD006", "HD007", "HD008", "HD009",
            "HD010", "HD011", "HD012",
        ];
        CODES[..count]
            .iter()
            .copied()
            .map(|code| Bill {
                code,
                tenant: "khách",
                amount: 1_000_000,
                status: "pending",
            })
            .collect()
    }

    #[test]
    fn zero_page_size_is_invalid_configuration() {
        let state = ViewState::new(0);
        let error = compute_view(&sample_bills(), &status_dimension(), &state)
            .expect_err("page size 0 should fail");
        assert_eq!(error, ViewError::InvalidConfiguration { page_size: 0 });
    }

    #[test]
    fn undeclared_sort_field_is_reported() {
        let mut state = ViewState::new(10);
        state.sort = SortState::By {
            field: "color",
            direction: SortDirection::Asc,
        };
        let error = compute_view(&sample_bills(), &status_dimension(), &state)
            .expect_err("unknown field should fail");
        assert_eq!(error, ViewError::UnknownSortField("color"));
    }

    #[test]
    fn unsorted_view_preserves_input_order() {
        let state = ViewState::new(10);
        let result = compute_view(&sample_bills(), &status_dimension(), &state)
            .expect("compute unsorted view");
        let codes: Vec<&str> = result.rows.iter().map(|bill| bill.code).collect();
        assert_eq!(codes, ["HD002", "HD001", "HD003"]);
    }

    #[test]
    fn sort_by_code_ascending_orders_bills() {
        let mut state = ViewState::new(10);
        state.sort = SortState::By {
            field: "code",
            direction: SortDirection::Asc,
        };
        let result =
            compute_view(&sample_bills(), &status_dimension(), &state).expect("compute view");
        let codes: Vec<&str> = result.rows.iter().map(|bill| bill.code).collect();
        assert_eq!(codes, ["HD001", "HD002", "HD003"]);
    }

    #[test]
    fn descending_only_inverts_the_comparison() {
        let mut state = ViewState::new(10);
        state.sort = SortState::By {
            field: "amount",
            direction: SortDirection::Desc,
        };
        let result =
            compute_view(&sample_bills(), &status_dimension(), &state).expect("compute view");
        let amounts: Vec<i64> = result.rows.iter().map(|bill| bill.amount).collect();
        assert_eq!(amounts, [4_200_000, 3_800_000, 3_500_000]);
    }

    #[test]
    fn equal_keys_keep_relative_input_order_in_both_directions() {
        let bills = vec![
            Bill {
                code: "HD005",
                tenant: "same",
                amount: 100,
                status: "paid",
            },
            Bill {
                code: "HD004",
                tenant: "same",
                amount: 100,
                status: "paid",
            },
            Bill {
                code: "HD006",
                tenant: "same",
                amount: 100,
                status: "paid",
            },
        ];
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let mut state = ViewState::new(10);
            state.sort = SortState::By {
                field: "amount",
                direction,
            };
            let result =
                compute_view(&bills, &status_dimension(), &state).expect("compute view");
            let codes: Vec<&str> = result.rows.iter().map(|bill| bill.code).collect();
            assert_eq!(codes, ["HD005", "HD004", "HD006"], "direction {direction:?}");
        }
    }

    #[test]
    fn search_is_case_insensitive_and_ored_across_fields() {
        let mut state = ViewState::new(10);
        state.search = "an".to_owned();
        let result =
            compute_view(&sample_bills(), &status_dimension(), &state).expect("compute view");
        // "an" matches "Nguyễn Văn An" but not "Trần Thị Bình" (the ầ in
        // Trần is a different codepoint from plain a).
        assert_eq!(result.total_filtered, 1);
        assert_eq!(result.rows[0].tenant, "Nguyễn Văn An");

        state.search = "hd00".to_owned();
        let result =
            compute_view(&sample_bills(), &status_dimension(), &state).expect("compute view");
        assert_eq!(result.total_filtered, 3);
    }

    #[test]
    fn filter_and_search_are_anded() {
        let mut state = ViewState::new(10);
        state.search = "hd00".to_owned();
        state.filters.insert("status", "paid".to_owned());
        let result =
            compute_view(&sample_bills(), &status_dimension(), &state).expect("compute view");
        assert_eq!(result.total_filtered, 1);
        assert_eq!(result.rows[0].code, "HD001");
    }

    #[test]
    fn all_filter_value_is_no_constraint() {
        let mut state = ViewState::new(10);
        state.filters.insert("status", ALL_VALUES.to_owned());
        let result =
            compute_view(&sample_bills(), &status_dimension(), &state).expect("compute view");
        assert_eq!(result.total_filtered, 3);
    }

    #[test]
    fn filtering_is_idempotent() {
        let mut state = ViewState::new(100);
        state.filters.insert("status", "pending".to_owned());
        let once =
            compute_view(&sample_bills(), &status_dimension(), &state).expect("first pass");
        let twice = compute_view(&once.rows, &status_dimension(), &state).expect("second pass");
        assert_eq!(once.rows, twice.rows);
    }

    #[test]
    fn page_is_clamped_to_available_pages() {
        let bills = numbered_bills(12);
        let mut state = ViewState::new(5);
        state.page = 4;
        let result = compute_view(&bills, &status_dimension(), &state).expect("compute view");
        assert_eq!(result.total_pages, 3);
        assert_eq!(result.page, 3);
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.rows[0].code, "HD011");
    }

    #[test]
    fn visible_page_never_exceeds_page_size() {
        let bills = numbered_bills(12);
        for page in 0..6 {
            let mut state = ViewState::new(5);
            state.page = page;
            let result = compute_view(&bills, &status_dimension(), &state).expect("compute view");
            assert!(result.rows.len() <= state.page_size);
        }
    }

    #[test]
    fn empty_filtered_set_clamps_page_to_one() {
        let mut state = ViewState::new(5);
        state.search = "không khớp".to_owned();
        state.page = 7;
        let result =
            compute_view(&sample_bills(), &status_dimension(), &state).expect("compute view");
        assert_eq!(result.total_filtered, 0);
        assert_eq!(result.total_pages, 0);
        assert_eq!(result.page, 1);
        assert!(result.rows.is_empty());
    }

    #[test]
    fn counts_cover_declared_values_and_all() {
        let state = ViewState::new(10);
        let result =
            compute_view(&sample_bills(), &status_dimension(), &state).expect("compute view");
        assert_eq!(result.count_for("status", "paid"), 1);
        assert_eq!(result.count_for("status", "pending"), 1);
        assert_eq!(result.count_for("status", "overdue"), 1);
        assert_eq!(result.count_for("status", ALL_VALUES), result.total_filtered);
    }

    #[test]
    fn counts_are_computed_over_the_filtered_set() {
        let mut state = ViewState::new(10);
        state.filters.insert("status", "paid".to_owned());
        let result =
            compute_view(&sample_bills(), &status_dimension(), &state).expect("compute view");
        assert_eq!(result.count_for("status", "paid"), 1);
        assert_eq!(result.count_for("status", "pending"), 0);
        assert_eq!(result.count_for("status", ALL_VALUES), 1);
    }

    #[test]
    fn compute_view_leaves_inputs_untouched() {
        let bills = sample_bills();
        let mut state = ViewState::new(2);
        state.page = 9;
        state.sort = SortState::By {
            field: "code",
            direction: SortDirection::Desc,
        };
        let before_bills = bills.clone();
        let before_state = state.clone();
        let _ = compute_view(&bills, &status_dimension(), &state).expect("compute view");
        assert_eq!(bills, before_bills);
        assert_eq!(state, before_state);
    }

    #[test]
    fn sort_toggle_cycles_and_never_returns_to_unsorted() {
        let start = SortState::Unsorted;
        let first = start.click("name");
        assert_eq!(
            first,
            SortState::By {
                field: "name",
                direction: SortDirection::Asc
            }
        );
        let second = first.click("name");
        assert_eq!(
            second,
            SortState::By {
                field: "name",
                direction: SortDirection::Desc
            }
        );
        let third = second.click("name");
        assert_eq!(third, first);

        let other = second.click("building");
        assert_eq!(
            other,
            SortState::By {
                field: "building",
                direction: SortDirection::Asc
            }
        );
    }

    #[test]
    fn direction_for_reports_only_the_active_field() {
        let sorted = SortState::Unsorted.click("amount");
        assert_eq!(sorted.direction_for("amount"), Some(SortDirection::Asc));
        assert_eq!(sorted.direction_for("code"), None);
        assert_eq!(SortState::Unsorted.direction_for("amount"), None);
    }

    #[test]
    fn datetime_values_compare_chronologically() {
        let earlier = FieldValue::DateTime(datetime!(2024-01-10 16:45:00));
        let later = FieldValue::DateTime(datetime!(2024-01-15 14:30:00));
        assert_eq!(earlier.cmp_value(&later), std::cmp::Ordering::Less);
    }
}
