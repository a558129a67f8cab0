// Example: an async driver over an in-memory backend with server-side sorting.
use datalist::{ColumnDescriptor, ColumnRegistry, ListOptions, Row, SortMode, SortType};
use datalist_adapter::{InputSignal, ListDriver, MemoryClient, TableModel};
use futures::executor::block_on;

fn main() {
    let columns = vec![
        ColumnDescriptor::sortable("title", "Name", SortType::String),
        ColumnDescriptor::sortable("price", "Price", SortType::Number),
    ];
    let registry = ColumnRegistry::new(columns.clone()).expect("valid columns");
    let rows: Vec<Row> = (0..12)
        .map(|i| {
            Row::new()
                .with("title", format!("Item {i:02}"))
                .with("price", (i * 37) % 100)
        })
        .collect();

    let client = MemoryClient::new(registry.clone(), rows);
    let options = ListOptions::new(columns)
        .with_mode(SortMode::Remote)
        .with_window_size(5);
    let driver = ListDriver::with_options(client, options, TableModel::new(registry))
        .expect("valid options");
    let _errors = driver.observe_load_errors(|error| eprintln!("load failed: {error}"));

    block_on(async {
        println!("{:?}", driver.initialize().await);
        while let Some(resolution) = driver.dispatch(InputSignal::ScrollNearEnd).await {
            println!("{resolution:?}");
        }
        let resolution = driver
            .dispatch(InputSignal::HeaderActivated("price".to_owned()))
            .await;
        println!("{resolution:?}");
    });

    let controller = driver.controller();
    println!("{}", controller.view().to_text(controller.sort_spec()));
    for request in driver.client().requests() {
        println!("GET /products?{:?}", request.query_pairs());
    }
}
