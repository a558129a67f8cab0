use crate::*;

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use alloc::{format, vec};
use core::cmp::Ordering;
use core::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }
}

type Recorded = Vec<RenderInstruction>;

fn columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("images", "Image"),
        ColumnDescriptor::sortable("title", "Name", SortType::String),
        ColumnDescriptor::sortable("quantity", "Quantity", SortType::Number),
        ColumnDescriptor::sortable("price", "Price", SortType::Number)
            .with_cell_renderer(|v| RenderFragment(format!("${v}"))),
    ]
}

fn product(i: usize) -> Row {
    Row::new()
        .with("id", i)
        .with("title", format!("Product {i:03}"))
        .with("quantity", (i * 7) % 11)
        .with("price", (i * 37) % 100)
}

fn catalog(n: usize) -> Vec<Row> {
    (0..n).map(product).collect()
}

/// A backend that honours window and sort parameters.
fn serve(data: &[Row], request: &FetchRequest) -> Vec<Row> {
    let mut rows = data.to_vec();
    if let Some(sort) = &request.sort {
        let sort_type = if sort.field == "title" {
            SortType::String
        } else {
            SortType::Number
        };
        sort_rows(&mut rows, &sort.field, sort_type, sort.order);
    }
    rows.into_iter()
        .skip(request.offset)
        .take(request.limit)
        .collect()
}

fn controller(mode: SortMode, window_size: usize) -> ListController<Recorded> {
    let options = ListOptions::new(columns())
        .with_mode(mode)
        .with_window_size(window_size);
    ListController::new(options, Vec::new()).unwrap()
}

fn ids(rows: &[Row]) -> Vec<usize> {
    rows.iter()
        .map(|r| r.value("id").as_number().unwrap() as usize)
        .collect()
}

fn titles(rows: &[Row]) -> Vec<String> {
    rows.iter()
        .map(|r| r.value("title").to_string())
        .collect()
}

fn string_rows(values: &[&str]) -> Vec<Row> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| Row::new().with("id", i).with("title", *v))
        .collect()
}

/// Initializes against `data` and resolves the first page.
fn loaded(mode: SortMode, window_size: usize, data: &[Row]) -> ListController<Recorded> {
    let mut c = controller(mode, window_size);
    let ticket = c.initialize();
    let page = serve(data, ticket.request());
    assert!(c.resolve(ticket, Ok(page)).is_applied());
    c.view_mut().clear();
    c
}

#[test]
fn registry_rejects_duplicate_ids() {
    let err = ColumnRegistry::new(vec![
        ColumnDescriptor::new("title", "Name"),
        ColumnDescriptor::new("title", "Other"),
    ])
    .unwrap_err();
    assert_eq!(err, ConfigError::DuplicateColumn("title".into()));
}

#[test]
fn registry_rejects_sortable_column_without_sort_type() {
    let err = ColumnRegistry::new(vec![
        ColumnDescriptor::new("price", "Price").with_sortable(true),
    ])
    .unwrap_err();
    assert_eq!(err, ConfigError::MissingSortType("price".into()));

    let err = ColumnRegistry::new(vec![ColumnDescriptor::new("", "Nameless")]).unwrap_err();
    assert_eq!(err, ConfigError::EmptyColumnId);
}

#[test]
fn registry_lookup_and_sortability() {
    let registry = ColumnRegistry::new(columns()).unwrap();
    assert_eq!(registry.len(), 4);
    assert_eq!(registry.get("price").unwrap().title, "Price");
    assert!(registry.get("missing").is_none());
    assert_eq!(registry.sort_type_of("title"), Some(SortType::String));
    assert_eq!(registry.sort_type_of("images"), None);
    assert!(!registry.is_sortable("missing"));
}

#[test]
fn header_activation_toggles_order() {
    let registry = ColumnRegistry::new(columns()).unwrap();
    assert_eq!(registry.next_order("price", None), Some(SortOrder::Desc));

    let desc = SortSpec::new("price", SortOrder::Desc);
    assert_eq!(registry.next_order("price", Some(&desc)), Some(SortOrder::Asc));
    let asc = SortSpec::new("price", SortOrder::Asc);
    assert_eq!(registry.next_order("price", Some(&asc)), Some(SortOrder::Desc));
    // Another column starts over.
    assert_eq!(registry.next_order("title", Some(&desc)), Some(SortOrder::Desc));
    assert_eq!(registry.next_order("images", None), None);

    let cells = registry.header_cells(Some(&desc));
    let marked: Vec<_> = cells.iter().filter(|c| c.order.is_some()).collect();
    assert_eq!(marked.len(), 1);
    assert_eq!(marked[0].id, "price");
    assert_eq!(marked[0].order, Some(SortOrder::Desc));
    assert!(!cells[0].sortable);
}

#[test]
fn cells_render_through_column_renderer() {
    let registry = ColumnRegistry::new(columns()).unwrap();
    let row = Row::new()
        .with("title", "Lamp")
        .with("quantity", 3)
        .with("price", 12.5);
    let cells = registry.render_row(&row);
    assert_eq!(cells[0].as_str(), "");
    assert_eq!(cells[1].as_str(), "Lamp");
    assert_eq!(cells[2].as_str(), "3");
    assert_eq!(cells[3].as_str(), "$12.5");
    assert_eq!(
        registry.render_cell("price", &row),
        Some(RenderFragment::from("$12.5"))
    );
    assert_eq!(registry.render_cell("missing", &row), None);
}

#[test]
fn string_collation_puts_uppercase_first() {
    let mut rows = string_rows(&["b", "A", "a", "B"]);
    sort_rows(&mut rows, "title", SortType::String, SortOrder::Asc);
    assert_eq!(titles(&rows), ["A", "a", "B", "b"]);

    sort_rows(&mut rows, "title", SortType::String, SortOrder::Desc);
    assert_eq!(titles(&rows), ["b", "B", "a", "A"]);
}

#[test]
fn string_collation_handles_cyrillic() {
    let mut rows = string_rows(&["жук", "ёж", "Ель", "арбуз", "Apple", "10"]);
    sort_rows(&mut rows, "title", SortType::String, SortOrder::Asc);
    assert_eq!(titles(&rows), ["10", "арбуз", "ёж", "Ель", "жук", "Apple"]);

    assert_eq!(compare_strings("е", "ё"), Ordering::Less);
    assert_eq!(compare_strings("ё", "ж"), Ordering::Less);
    assert_eq!(compare_strings("Ab", "aB"), Ordering::Less);
    assert_eq!(compare_strings("abc", "abc"), Ordering::Equal);
    assert_eq!(compare_strings("и", "й"), Ordering::Less);
    assert_eq!(compare_strings("й", "к"), Ordering::Less);
}

#[test]
fn string_collation_keeps_accents_next_to_base_letter() {
    let mut rows = string_rows(&["Apple", "арбуз", "f", "é", "e"]);
    sort_rows(&mut rows, "title", SortType::String, SortOrder::Asc);
    assert_eq!(titles(&rows), ["арбуз", "Apple", "e", "é", "f"]);

    assert_eq!(compare_strings("é", "z"), Ordering::Less);
    assert_eq!(compare_strings("ea", "éa"), Ordering::Less);
    assert_eq!(compare_strings("éa", "eb"), Ordering::Less);
    assert_eq!(compare_strings("É", "é"), Ordering::Less);
}

#[test]
fn string_collation_orders_punctuation_before_digits() {
    let mut rows = string_rows(&["1", "-", "a", "_", " "]);
    sort_rows(&mut rows, "title", SortType::String, SortOrder::Asc);
    assert_eq!(titles(&rows), [" ", "_", "-", "1", "a"]);
}

#[test]
fn number_sort_is_ordered_and_stable() {
    let mut rng = Lcg::new(7);
    for round in 0..20 {
        let n = 5 + round * 3;
        let mut rows: Vec<Row> = (0..n)
            .map(|i| {
                Row::new()
                    .with("id", i)
                    .with("price", rng.gen_range_u64(0, 6) as f64)
            })
            .collect();

        sort_rows(&mut rows, "price", SortType::Number, SortOrder::Asc);
        for pair in rows.windows(2) {
            let a = pair[0].value("price").as_number().unwrap();
            let b = pair[1].value("price").as_number().unwrap();
            assert!(a <= b);
            if a == b {
                // Equal keys keep their original relative order.
                let ia = pair[0].value("id").as_number().unwrap();
                let ib = pair[1].value("id").as_number().unwrap();
                assert!(ia < ib);
            }
        }

        sort_rows(&mut rows, "price", SortType::Number, SortOrder::Desc);
        for pair in rows.windows(2) {
            let a = pair[0].value("price").as_number().unwrap();
            let b = pair[1].value("price").as_number().unwrap();
            assert!(a >= b);
        }
    }
}

#[test]
fn number_sort_coerces_numeric_strings() {
    let mut rows = vec![
        Row::new().with("id", 0).with("price", "10"),
        Row::new().with("id", 1).with("price", "n/a"),
        Row::new().with("id", 2).with("price", 2),
        Row::new().with("id", 3),
        Row::new().with("id", 4).with("price", " 3.5 "),
    ];
    sort_rows(&mut rows, "price", SortType::Number, SortOrder::Asc);
    assert_eq!(ids(&rows), [2, 4, 0, 1, 3]);

    sort_rows(&mut rows, "price", SortType::Number, SortOrder::Desc);
    assert_eq!(ids(&rows), [1, 3, 0, 4, 2]);
}

#[test]
fn local_sort_is_idempotent() {
    let data = catalog(20);
    let mut c = loaded(SortMode::Local, 30, &data);

    assert!(c.sort("quantity", SortOrder::Asc).is_none());
    let first = ids(c.rows());
    assert!(c.sort("quantity", SortOrder::Asc).is_none());
    assert_eq!(ids(c.rows()), first);

    // Re-applying is not skipped: each sort re-renders.
    let replaces = c
        .view()
        .iter()
        .filter(|i| matches!(i, RenderInstruction::ReplaceAll(_)))
        .count();
    assert_eq!(replaces, 2);
    assert_eq!(c.pagination().window_start(), 30);
}

#[test]
fn pagination_stops_after_partial_page() {
    let data = catalog(65);
    let mut c = controller(SortMode::Local, 30);
    let mut lengths = Vec::new();

    let ticket = c.initialize();
    assert_eq!(ticket.request().offset, 0);
    assert_eq!(ticket.request().limit, 30);
    let page = serve(&data, ticket.request());
    assert_eq!(c.resolve(ticket, Ok(page)), Resolution::Replaced { rows: 30 });
    lengths.push(c.rows().len());

    for expected_offset in [30, 60] {
        let ticket = c.on_scroll_near_end().unwrap();
        assert_eq!(ticket.request().offset, expected_offset);
        let page = serve(&data, ticket.request());
        assert!(c.resolve(ticket, Ok(page)).is_applied());
        lengths.push(c.rows().len());
    }

    assert_eq!(lengths, [30, 60, 65]);
    assert!(c.is_exhausted());
    assert_eq!(c.phase(), ListPhase::ReadyExhausted);
    assert!(c.on_scroll_near_end().is_none());
    assert_eq!(ids(c.rows()), (0..65).collect::<Vec<_>>());

    let appends: Vec<usize> = c
        .view()
        .iter()
        .filter_map(|i| match i {
            RenderInstruction::Append(rows) => Some(rows.len()),
            _ => None,
        })
        .collect();
    assert_eq!(appends, [30, 5]);
    assert_eq!(
        c.view().last(),
        Some(&RenderInstruction::SetExhausted(true))
    );
}

#[test]
fn empty_incremental_page_marks_exhausted_without_append() {
    let data = catalog(30);
    let mut c = loaded(SortMode::Local, 30, &data);

    let ticket = c.on_scroll_near_end().unwrap();
    assert_eq!(c.resolve(ticket, Ok(Vec::new())), Resolution::Appended { rows: 0 });
    assert!(c.is_exhausted());
    assert_eq!(c.rows().len(), 30);
    assert_eq!(
        c.view().as_slice(),
        [
            RenderInstruction::SetLoading(true),
            RenderInstruction::SetLoading(false),
            RenderInstruction::SetExhausted(true),
        ]
    );
}

#[test]
fn duplicate_scroll_signal_issues_one_fetch() {
    let data = catalog(100);
    let mut c = loaded(SortMode::Local, 30, &data);

    let first = c.on_scroll_near_end();
    let second = c.on_scroll_near_end();
    assert!(first.is_some());
    assert!(second.is_none());
    assert_eq!(c.phase(), ListPhase::LoadingMore);
    assert_eq!(c.view().as_slice(), [RenderInstruction::SetLoading(true)]);
}

#[test]
fn scroll_before_first_page_is_ignored() {
    let mut c = controller(SortMode::Local, 30);
    assert!(c.on_scroll_near_end().is_none());

    let _ticket = c.initialize();
    assert!(c.on_scroll_near_end().is_none());
    assert_eq!(c.phase(), ListPhase::Loading);
}

#[test]
fn remote_sort_discards_in_flight_page() {
    let data = catalog(100);
    let mut c = loaded(SortMode::Remote, 30, &data);

    let more = c.on_scroll_near_end().unwrap();
    let sorted = c.sort("price", SortOrder::Desc).unwrap();
    assert_eq!(sorted.kind(), FetchKind::Initial);
    assert_eq!(
        sorted.request().sort,
        Some(SortSpec::new("price", SortOrder::Desc))
    );
    assert_eq!(c.phase(), ListPhase::Loading);

    let sorted_page = serve(&data, sorted.request());
    let expected = ids(&sorted_page);
    assert!(c.resolve(sorted, Ok(sorted_page)).is_applied());

    // The superseded incremental page resolves late and must not be appended.
    let late_page = serve(&data, more.request());
    assert_eq!(c.resolve(more, Ok(late_page)), Resolution::Stale);
    assert_eq!(ids(c.rows()), expected);
    assert_eq!(c.rows().len(), 30);
    assert_eq!(c.phase(), ListPhase::Ready);
}

#[test]
fn remote_sort_keeps_rows_visible_until_first_page() {
    let data = catalog(100);
    let mut c = loaded(SortMode::Remote, 30, &data);

    let ticket = c.sort("title", SortOrder::Asc).unwrap();
    assert!(c.rows().is_empty());
    assert_eq!(c.pagination().window_start(), 0);
    // No clear yet: the surface still shows the previous rows.
    assert_eq!(c.view().as_slice(), [RenderInstruction::SetLoading(true)]);

    let page = serve(&data, ticket.request());
    let _ = c.resolve(ticket, Ok(page.clone()));
    assert_eq!(
        c.view().as_slice(),
        [
            RenderInstruction::SetLoading(true),
            RenderInstruction::ReplaceAll(page),
            RenderInstruction::SetLoading(false),
        ]
    );

    let next = c.on_scroll_near_end().unwrap();
    assert_eq!(next.request().offset, 30);
    assert_eq!(
        next.request().sort,
        Some(SortSpec::new("title", SortOrder::Asc))
    );
}

#[test]
fn remote_sort_resets_exhaustion() {
    let data = catalog(10);
    let mut c = loaded(SortMode::Remote, 30, &data);
    assert!(c.is_exhausted());

    let ticket = c.sort("quantity", SortOrder::Asc).unwrap();
    assert!(!c.is_exhausted());
    assert_eq!(
        c.view().as_slice(),
        [
            RenderInstruction::SetExhausted(false),
            RenderInstruction::SetLoading(true),
        ]
    );
    let page = serve(&data, ticket.request());
    let _ = c.resolve(ticket, Ok(page));
    assert!(c.is_exhausted());
}

#[test]
fn unknown_or_unsortable_column_is_ignored() {
    let data = catalog(10);
    for mode in [SortMode::Local, SortMode::Remote] {
        let mut c = loaded(mode, 30, &data);
        let before = ids(c.rows());

        assert!(c.sort("nonexistent", SortOrder::Asc).is_none());
        assert!(c.sort("images", SortOrder::Desc).is_none());
        assert!(c.on_header_activated("nonexistent").is_none());

        assert_eq!(c.sort_spec(), None);
        assert_eq!(ids(c.rows()), before);
        assert!(c.view().is_empty());
    }
}

#[test]
fn empty_first_page_renders_empty_state() {
    let mut c = controller(SortMode::Remote, 30);
    let ticket = c.initialize();
    assert_eq!(c.resolve(ticket, Ok(Vec::new())), Resolution::Replaced { rows: 0 });

    assert!(c.is_exhausted());
    assert_eq!(c.phase(), ListPhase::ReadyExhausted);
    assert!(c.snapshot().is_empty_state());
    assert_eq!(
        c.view().as_slice(),
        [
            RenderInstruction::SetLoading(true),
            RenderInstruction::ReplaceAll(Vec::new()),
            RenderInstruction::SetLoading(false),
            RenderInstruction::SetExhausted(true),
        ]
    );
    assert!(c.on_scroll_near_end().is_none());
}

#[test]
fn failed_incremental_load_keeps_rows_and_window() {
    let data = catalog(100);
    let mut c = loaded(SortMode::Local, 30, &data);

    let seen = Arc::new(AtomicUsize::new(0));
    let id = c.observe_load_errors({
        let seen = Arc::clone(&seen);
        move |_| {
            seen.fetch_add(1, AtomicOrdering::SeqCst);
        }
    });

    let ticket = c.on_scroll_near_end().unwrap();
    let resolution = c.resolve(ticket, Err(LoadError::rejected("503")));
    assert_eq!(resolution.error(), Some(&LoadError::rejected("503")));
    assert_eq!(seen.load(AtomicOrdering::SeqCst), 1);

    assert_eq!(c.rows().len(), 30);
    assert_eq!(c.pagination().window_start(), 30);
    assert!(!c.is_loading());
    assert_eq!(c.phase(), ListPhase::Ready);

    // Retry asks for the same window.
    let retry = c.on_scroll_near_end().unwrap();
    assert_eq!(retry.request().offset, 30);
    let page = serve(&data, retry.request());
    let _ = c.resolve(retry, Ok(page));
    assert_eq!(c.rows().len(), 60);

    assert!(c.remove_observer(id));
    assert!(!c.remove_observer(id));
}

#[test]
fn failed_first_page_returns_to_idle() {
    let data = catalog(100);
    let mut c = loaded(SortMode::Remote, 30, &data);

    let ticket = c.sort("price", SortOrder::Asc).unwrap();
    let resolution = c.resolve(ticket, Err(LoadError::malformed("not an array")));
    assert!(matches!(resolution, Resolution::Failed(LoadError::Malformed { .. })));
    assert_eq!(c.phase(), ListPhase::Idle);
    assert!(c.rows().is_empty());
    // The requested sort survives so a retry uses it.
    assert_eq!(c.sort_spec(), Some(&SortSpec::new("price", SortOrder::Asc)));
    assert_eq!(
        c.view().as_slice(),
        [
            RenderInstruction::SetLoading(true),
            RenderInstruction::ReplaceAll(Vec::new()),
            RenderInstruction::SetLoading(false),
        ]
    );

    let retry = c.initialize();
    assert_eq!(retry.request().sort_field(), Some("price"));
}

#[test]
fn reset_returns_to_idle_and_discards_in_flight() {
    let data = catalog(100);
    let mut c = loaded(SortMode::Local, 30, &data);
    let _ = c.sort("title", SortOrder::Desc);
    let generation = c.pagination().generation();

    let more = c.on_scroll_near_end().unwrap();
    c.reset();
    assert_eq!(c.phase(), ListPhase::Idle);
    assert!(c.rows().is_empty());
    assert_eq!(c.sort_spec(), None);
    assert_eq!(c.pagination().window_start(), 0);
    assert!(c.pagination().generation() > generation);

    let page = serve(&data, more.request());
    assert_eq!(c.resolve(more, Ok(page)), Resolution::Stale);
    assert!(c.rows().is_empty());
}

#[test]
fn reload_supersedes_previous_first_page() {
    let data = catalog(100);
    let mut c = controller(SortMode::Remote, 30);

    let first = c.initialize();
    let second = c.initialize();
    assert!(second.generation() > first.generation());

    let page = serve(&data, first.request());
    assert_eq!(c.resolve(first, Ok(page)), Resolution::Stale);
    assert_eq!(c.phase(), ListPhase::Loading);

    let page = serve(&data, second.request());
    assert!(c.resolve(second, Ok(page)).is_applied());
    assert_eq!(c.phase(), ListPhase::Ready);
}

#[test]
fn local_sort_during_incremental_load_loses_nothing() {
    let data = catalog(100);
    let mut c = loaded(SortMode::Local, 30, &data);

    let more = c.on_scroll_near_end().unwrap();
    assert!(c.sort("price", SortOrder::Asc).is_none());
    let page = serve(&data, more.request());
    assert_eq!(c.resolve(more, Ok(page)), Resolution::Appended { rows: 30 });

    let mut seen = ids(c.rows());
    seen.sort_unstable();
    assert_eq!(seen, (0..60).collect::<Vec<_>>());
}

#[test]
fn local_sort_while_first_page_in_flight_sorts_on_arrival() {
    let data = catalog(30);
    let mut c = controller(SortMode::Local, 30);

    let ticket = c.initialize();
    assert!(c.sort("price", SortOrder::Desc).is_none());
    let page = serve(&data, &FetchRequest {
        sort: None,
        ..ticket.request().clone()
    });
    let _ = c.resolve(ticket, Ok(page));

    let prices: Vec<f64> = c
        .rows()
        .iter()
        .map(|r| r.value("price").as_number().unwrap())
        .collect();
    assert!(prices.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn header_activation_drives_sort() {
    let data = catalog(20);
    let mut c = loaded(SortMode::Local, 30, &data);

    assert!(c.on_header_activated("quantity").is_none());
    assert_eq!(c.sort_spec(), Some(&SortSpec::new("quantity", SortOrder::Desc)));
    let _ = c.on_header_activated("quantity");
    assert_eq!(c.sort_spec(), Some(&SortSpec::new("quantity", SortOrder::Asc)));
    let _ = c.on_header_activated("quantity");
    assert_eq!(c.sort_spec(), Some(&SortSpec::new("quantity", SortOrder::Desc)));
}

#[test]
fn initial_sort_is_validated_and_applied() {
    let err = ListController::new(
        ListOptions::new(columns())
            .with_initial_sort(Some(SortSpec::new("images", SortOrder::Asc))),
        Recorded::new(),
    )
    .unwrap_err();
    assert_eq!(err, ConfigError::UnsortableInitialSort("images".into()));

    let err = ListController::new(
        ListOptions::new(columns()).with_window_size(0),
        Recorded::new(),
    )
    .unwrap_err();
    assert_eq!(err, ConfigError::ZeroWindowSize);

    let mut c = ListController::new(
        ListOptions::new(columns())
            .with_initial_sort(Some(SortSpec::new("title", SortOrder::Desc))),
        Recorded::new(),
    )
    .unwrap();
    let ticket = c.initialize();
    assert_eq!(
        ticket.request().sort,
        Some(SortSpec::new("title", SortOrder::Desc))
    );
    // Local mode sorts the first page even if the backend ignores the parameters.
    let page = serve(&catalog(5), &FetchRequest {
        sort: None,
        ..ticket.request().clone()
    });
    let _ = c.resolve(ticket, Ok(page));
    assert_eq!(
        titles(c.rows()),
        ["Product 004", "Product 003", "Product 002", "Product 001", "Product 000"]
    );
}

#[test]
fn partial_sort_state_is_rejected() {
    assert_eq!(
        SortSpec::from_parts(Some("price"), None),
        Err(ConfigError::PartialSort)
    );
    assert_eq!(
        SortSpec::from_parts(None::<&str>, Some(SortOrder::Asc)),
        Err(ConfigError::PartialSort)
    );
    assert_eq!(SortSpec::from_parts(None::<&str>, None), Ok(None));
    assert_eq!(
        SortSpec::from_parts(Some("price"), SortOrder::parse("DESC")),
        Ok(Some(SortSpec::new("price", SortOrder::Desc)))
    );
}

#[test]
fn fetch_request_query_pairs() {
    let plain = FetchRequest {
        offset: 30,
        limit: 30,
        sort: None,
    };
    assert_eq!(
        plain.query_pairs(),
        [("_start", "30".to_string()), ("_end", "60".to_string())]
    );

    let sorted = FetchRequest {
        sort: Some(SortSpec::new("title", SortOrder::Asc)),
        ..plain
    };
    assert_eq!(
        sorted.query_pairs(),
        [
            ("_start", "30".to_string()),
            ("_end", "60".to_string()),
            ("_sort", "title".to_string()),
            ("_order", "asc".to_string()),
        ]
    );
}

#[test]
fn destroy_drops_observers_and_in_flight_fetches() {
    let data = catalog(100);
    let mut c = loaded(SortMode::Local, 30, &data);
    let _ = c.observe_load_errors(|_| {});
    let _ = c.observe_load_errors(|_| {});
    assert_eq!(c.observer_count(), 2);

    let more = c.on_scroll_near_end().unwrap();
    c.destroy();
    assert_eq!(c.observer_count(), 0);
    assert_eq!(c.resolve(more, Err(LoadError::rejected("aborted"))), Resolution::Stale);
    assert_eq!(c.phase(), ListPhase::Idle);
}

#[test]
fn snapshot_reflects_state() {
    let data = catalog(45);
    let mut c = loaded(SortMode::Remote, 30, &data);
    let snap = c.snapshot();
    assert_eq!(snap.len(), 30);
    assert_eq!(snap.mode, SortMode::Remote);
    assert_eq!(snap.phase, ListPhase::Ready);
    assert_eq!(snap.window_start, 30);
    assert!(!snap.is_empty_state());

    let _ticket = c.on_scroll_near_end().unwrap();
    let snap = c.snapshot();
    assert!(snap.loading);
    assert_eq!(snap.phase, ListPhase::LoadingMore);
}

#[test]
fn value_display_and_coercion() {
    assert_eq!(Value::from(3).to_string(), "3");
    assert_eq!(Value::from(2.5).to_string(), "2.5");
    assert_eq!(Value::Null.to_string(), "");
    assert_eq!(
        Value::List(vec![Value::from("a"), Value::from(1)]).to_string(),
        "a,1"
    );
    assert_eq!(Value::from(true).as_number(), Some(1.0));
    assert_eq!(Value::from("").as_number(), None);
    assert_eq!(Value::from(f64::NAN).as_number(), None);
    assert_eq!(Value::from(None::<i32>), Value::Null);
}
