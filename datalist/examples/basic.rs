// Example: drive the controller against an in-memory backend, then sort locally.
use datalist::{
    ColumnDescriptor, FetchRequest, ListController, ListOptions, RenderInstruction, Row,
    SortOrder, SortType,
};

fn backend(request: &FetchRequest) -> Vec<Row> {
    (request.offset..request.end().min(45))
        .map(|i| {
            Row::new()
                .with("title", format!("Item {i}"))
                .with("price", (i * 37) % 100)
        })
        .collect()
}

fn main() {
    let columns = vec![
        ColumnDescriptor::sortable("title", "Name", SortType::String),
        ColumnDescriptor::sortable("price", "Price", SortType::Number),
    ];
    let mut list =
        ListController::new(ListOptions::new(columns).with_window_size(20), Vec::new()).unwrap();

    // Load pages until the backend runs dry.
    let mut next = Some(list.initialize());
    while let Some(ticket) = next {
        let page = backend(ticket.request());
        let resolution = list.resolve(ticket, Ok(page));
        println!("{resolution:?} -> {:?}", list.phase());
        next = list.on_scroll_near_end();
    }

    let _ = list.sort("price", SortOrder::Desc);
    let top: Vec<String> = list
        .rows()
        .iter()
        .take(3)
        .map(|row| {
            let cells: Vec<String> = list
                .registry()
                .render_row(row)
                .into_iter()
                .map(|c| c.into_string())
                .collect();
            cells.join(" | ")
        })
        .collect();
    println!("top by price: {top:?}");

    for instruction in list.view() {
        match instruction {
            RenderInstruction::ReplaceAll(rows) => println!("replace_all({})", rows.len()),
            RenderInstruction::Append(rows) => println!("append({})", rows.len()),
            other => println!("{other:?}"),
        }
    }
}
