use std::{cmp::Ordering, collections::BTreeSet};

use leptos::*;

use crate::utils::{export, time::today_in_display_tz};

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub key: &'static str,
    pub label: &'static str,
}

impl Column {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

/// One table row; `cells` follow the column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRowData {
    pub id: String,
    pub cells: Vec<String>,
}

impl TableRowData {
    pub fn new(id: impl ToString, cells: Vec<String>) -> Self {
        Self {
            id: id.to_string(),
            cells,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    pub search: String,
    pub sort: Option<(usize, SortDirection)>,
    pub page: usize,
    pub page_size: usize,
    pub hidden: BTreeSet<usize>,
}

impl Default for TableQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: None,
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            hidden: BTreeSet::new(),
        }
    }
}

impl TableQuery {
    /// Ascending, then descending, then unsorted.
    pub fn toggle_sort(&mut self, column: usize) {
        self.sort = match self.sort {
            Some((current, SortDirection::Asc)) if current == column => {
                Some((column, SortDirection::Desc))
            }
            Some((current, SortDirection::Desc)) if current == column => None,
            _ => Some((column, SortDirection::Asc)),
        };
        self.page = 0;
    }

    /// Hides or shows a column; the last visible column cannot be hidden.
    pub fn toggle_column(&mut self, column: usize, column_count: usize) {
        if self.hidden.contains(&column) {
            self.hidden.remove(&column);
        } else if column_count.saturating_sub(self.hidden.len()) > 1 {
            self.hidden.insert(column);
        }
    }

    pub fn set_search(&mut self, search: String) {
        self.search = search;
        self.page = 0;
    }
}

pub fn filter_rows(rows: &[TableRowData], search: &str) -> Vec<TableRowData> {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return rows.to_vec();
    }
    rows.iter()
        .filter(|row| row.cells.iter().any(|cell| cell.to_lowercase().contains(&needle)))
        .cloned()
        .collect()
}

fn compare_cells(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

/// Stable sort; numbers compare numerically, everything else case-insensitively.
pub fn sort_rows(rows: &mut [TableRowData], sort: Option<(usize, SortDirection)>) {
    let Some((column, direction)) = sort else {
        return;
    };
    rows.sort_by(|a, b| {
        let left = a.cells.get(column).map(String::as_str).unwrap_or("");
        let right = b.cells.get(column).map(String::as_str).unwrap_or("");
        let ordering = compare_cells(left, right);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total.div_ceil(page_size).max(1)
}

/// The requested page, clamped to the last page.
pub fn paginate(rows: &[TableRowData], page: usize, page_size: usize) -> (Vec<TableRowData>, usize) {
    let pages = page_count(rows.len(), page_size);
    let page = page.min(pages - 1);
    if page_size == 0 {
        return (rows.to_vec(), 0);
    }
    let slice = rows
        .iter()
        .skip(page * page_size)
        .take(page_size)
        .cloned()
        .collect();
    (slice, page)
}

pub fn visible_columns(column_count: usize, hidden: &BTreeSet<usize>) -> Vec<usize> {
    (0..column_count).filter(|idx| !hidden.contains(idx)).collect()
}

pub fn apply_query(rows: &[TableRowData], query: &TableQuery) -> Vec<TableRowData> {
    let mut filtered = filter_rows(rows, &query.search);
    sort_rows(&mut filtered, query.sort);
    filtered
}

/// Headers and cells for export: every filtered row, visible columns only.
pub fn export_view(
    columns: &[Column],
    rows: &[TableRowData],
    query: &TableQuery,
) -> (Vec<String>, Vec<Vec<String>>) {
    let visible = visible_columns(columns.len(), &query.hidden);
    let headers = visible
        .iter()
        .map(|idx| columns[*idx].label.to_string())
        .collect();
    let body = apply_query(rows, query)
        .into_iter()
        .map(|row| {
            visible
                .iter()
                .map(|idx| row.cells.get(*idx).cloned().unwrap_or_default())
                .collect()
        })
        .collect();
    (headers, body)
}

#[component]
pub fn DataTable(
    #[prop(into)] columns: Vec<Column>,
    #[prop(into)] rows: Signal<Vec<TableRowData>>,
    #[prop(optional, into)] export_name: Option<String>,
    #[prop(optional)] row_actions: Option<Callback<String, View>>,
    #[prop(optional, into)] empty_message: Option<String>,
    #[prop(optional)] page_size: Option<usize>,
) -> impl IntoView {
    let column_count = columns.len();
    let columns = store_value(columns);
    let query = create_rw_signal(TableQuery {
        page_size: page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        ..TableQuery::default()
    });
    let export_error = create_rw_signal(None::<String>);
    let empty_message = empty_message.unwrap_or_else(|| "No records found.".into());

    let filtered = create_memo(move |_| query.with(|q| rows.with(|all| apply_query(all, q))));
    let visible = create_memo(move |_| query.with(|q| visible_columns(column_count, &q.hidden)));
    let page_view = create_memo(move |_| {
        let q = query.get();
        filtered.with(|all| paginate(all, q.page, q.page_size))
    });
    let total_pages = move || page_count(filtered.with(Vec::len), query.with(|q| q.page_size));

    let on_export = {
        let export_name = export_name.clone();
        move |_| {
            let Some(name) = export_name.clone() else {
                return;
            };
            let (headers, body) =
                columns.with_value(|cols| rows.with(|all| query.with(|q| export_view(cols, all, q))));
            match export::export_rows(&name, today_in_display_tz(), &headers, &body) {
                Ok(_) => export_error.set(None),
                Err(err) => {
                    log::warn!("export of {} failed: {}", name, err);
                    export_error.set(Some(err.to_string()));
                }
            }
        }
    };

    let header_cells = move || {
        visible
            .get()
            .into_iter()
            .map(|idx| {
                let label = columns.with_value(|cols| cols[idx].label);
                let indicator = move || match query.with(|q| q.sort) {
                    Some((col, SortDirection::Asc)) if col == idx => " ▲",
                    Some((col, SortDirection::Desc)) if col == idx => " ▼",
                    _ => "",
                };
                view! {
                    <th
                        class="px-4 py-2 text-left text-xs font-medium text-fg-muted uppercase tracking-wider cursor-pointer select-none"
                        on:click=move |_| query.update(|q| q.toggle_sort(idx))
                    >
                        {label}
                        {indicator}
                    </th>
                }
            })
            .collect_view()
    };

    let body_rows = move || {
        let (page_rows, _) = page_view.get();
        let cols = visible.get();
        page_rows
            .into_iter()
            .map(|row| {
                let cells = cols
                    .iter()
                    .map(|idx| {
                        let text = row.cells.get(*idx).cloned().unwrap_or_default();
                        view! { <td class="px-4 py-2 whitespace-nowrap text-sm text-fg">{text}</td> }
                    })
                    .collect_view();
                let actions = row_actions.map(|render| {
                    view! { <td class="px-4 py-2 whitespace-nowrap text-sm text-right">{render.call(row.id.clone())}</td> }
                });
                view! { <tr class="hover:bg-surface-muted">{cells}{actions}</tr> }
            })
            .collect_view()
    };

    let column_toggles = move || {
        (0..column_count)
            .map(|idx| {
                let label = columns.with_value(|cols| cols[idx].label);
                view! {
                    <label class="inline-flex items-center gap-1 text-xs text-fg-muted">
                        <input
                            type="checkbox"
                            prop:checked=move || query.with(|q| !q.hidden.contains(&idx))
                            on:change=move |_| query.update(|q| q.toggle_column(idx, column_count))
                        />
                        {label}
                    </label>
                }
            })
            .collect_view()
    };

    let has_export = export_name.is_some();
    let has_actions = row_actions.is_some();

    view! {
        <div class="bg-surface-elevated shadow rounded-lg p-4 space-y-3">
            <div class="flex flex-wrap items-center justify-between gap-2">
                <input
                    type="search"
                    placeholder="Search..."
                    class="border border-border rounded-md px-3 py-1.5 text-sm w-64"
                    prop:value=move || query.with(|q| q.search.clone())
                    on:input=move |ev| query.update(|q| q.set_search(event_target_value(&ev)))
                />
                <div class="flex flex-wrap items-center gap-3">
                    {column_toggles}
                    <Show when=move || has_export>
                        <button
                            type="button"
                            class="inline-flex items-center rounded-md px-3 py-1.5 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover"
                            on:click=on_export.clone()
                        >
                            "Export"
                        </button>
                    </Show>
                </div>
            </div>
            {move || export_error.get().map(|msg| view! {
                <p class="text-sm text-status-error-text">{msg}</p>
            })}
            <div class="overflow-x-auto">
                <table class="min-w-full divide-y divide-border">
                    <thead class="bg-surface-muted">
                        <tr>
                            {header_cells}
                            {has_actions.then(|| view! { <th class="px-4 py-2"></th> })}
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-border">{body_rows}</tbody>
                </table>
            </div>
            <Show when=move || filtered.with(Vec::is_empty)>
                <p class="text-center text-sm text-fg-muted py-4">{empty_message.clone()}</p>
            </Show>
            <div class="flex items-center justify-between text-sm text-fg-muted">
                <span>{move || format!("{} records", filtered.with(Vec::len))}</span>
                <div class="flex items-center gap-2">
                    <button
                        type="button"
                        class="px-2 py-1 rounded border border-border disabled:opacity-50"
                        disabled=move || page_view.with(|(_, page)| *page == 0)
                        on:click=move |_| query.update(|q| q.page = q.page.saturating_sub(1))
                    >
                        "Prev"
                    </button>
                    <span>{move || format!("Page {} of {}", page_view.with(|(_, page)| *page) + 1, total_pages())}</span>
                    <button
                        type="button"
                        class="px-2 py-1 rounded border border-border disabled:opacity-50"
                        disabled=move || page_view.with(|(_, page)| *page + 1 >= total_pages())
                        on:click=move |_| {
                            let current = page_view.with_untracked(|(_, page)| *page);
                            query.update(|q| q.page = current + 1);
                        }
                    >
                        "Next"
                    </button>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: u32, name: &str, dept: &str, hours: &str) -> TableRowData {
        TableRowData::new(id, vec![name.into(), dept.into(), hours.into()])
    }

    fn sample() -> Vec<TableRowData> {
        vec![
            row(1, "Priya Nair", "Engineering", "9"),
            row(2, "arjun Rao", "Sales", "10"),
            row(3, "Meera Das", "engineering", "7.5"),
        ]
    }

    const COLUMNS: [Column; 3] = [
        Column::new("name", "Name"),
        Column::new("department", "Department"),
        Column::new("hours", "Hours"),
    ];

    #[test]
    fn search_is_case_insensitive_across_cells() {
        let rows = filter_rows(&sample(), "ENGINEERING");
        assert_eq!(rows.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), ["1", "3"]);
        assert_eq!(filter_rows(&sample(), "  ").len(), 3);
    }

    #[test]
    fn numeric_columns_sort_numerically() {
        let mut rows = sample();
        sort_rows(&mut rows, Some((2, SortDirection::Asc)));
        assert_eq!(rows.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), ["3", "1", "2"]);
        sort_rows(&mut rows, Some((0, SortDirection::Desc)));
        assert_eq!(rows[0].id, "1");
        assert_eq!(rows[2].id, "2");
    }

    #[test]
    fn sort_toggle_cycles() {
        let mut query = TableQuery {
            page: 3,
            ..TableQuery::default()
        };
        query.toggle_sort(1);
        assert_eq!(query.sort, Some((1, SortDirection::Asc)));
        assert_eq!(query.page, 0);
        query.toggle_sort(1);
        assert_eq!(query.sort, Some((1, SortDirection::Desc)));
        query.toggle_sort(1);
        assert_eq!(query.sort, None);
    }

    #[test]
    fn pagination_clamps_to_last_page() {
        let rows: Vec<_> = (0..23).map(|i| row(i, "n", "d", "1")).collect();
        let (page, index) = paginate(&rows, 9, 10);
        assert_eq!(index, 2);
        assert_eq!(page.len(), 3);
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(20, 10), 2);
    }

    #[test]
    fn last_visible_column_cannot_be_hidden() {
        let mut query = TableQuery::default();
        query.toggle_column(0, 2);
        query.toggle_column(1, 2);
        assert_eq!(visible_columns(2, &query.hidden), vec![1]);
        query.toggle_column(0, 2);
        assert_eq!(visible_columns(2, &query.hidden), vec![0, 1]);
    }

    #[test]
    fn export_covers_every_filtered_row_and_visible_columns_only() {
        let rows: Vec<_> = (0..25)
            .map(|i| row(i, &format!("Person {}", i), "Engineering", &i.to_string()))
            .chain(std::iter::once(row(99, "Outsider", "Sales", "1")))
            .collect();
        let mut query = TableQuery {
            search: "engineering".into(),
            page: 2,
            ..TableQuery::default()
        };
        query.toggle_column(1, 3);
        query.sort = Some((2, SortDirection::Desc));
        let (headers, body) = export_view(&COLUMNS, &rows, &query);
        assert_eq!(headers, vec!["Name".to_string(), "Hours".to_string()]);
        assert_eq!(body.len(), 25);
        assert_eq!(body[0], vec!["Person 24".to_string(), "24".to_string()]);
    }
}
