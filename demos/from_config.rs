//! Open a store from a JSON config document.

use json_docstore::{DocumentStore, Error, StoreConfig};
use serde_json::json;

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt().with_target(false).init();

    let root = std::env::temp_dir().join("json_docstore_demo_config");
    let text = json!({
        "root": root,
        "shape": "dict",
        "defaults": { "theme": "dark", "visits": 0 },
        "repair": "when_changed"
    })
    .to_string();
    let store = DocumentStore::from_config(StoreConfig::from_json(&text)?)?;

    if !store.exists("guest") {
        store.create("guest")?;
    }
    let visits: u64 = store.read_field_as("guest", "visits")?;
    store.set_field("guest", "visits", visits + 1)?;
    println!("guest = {:?}", store.read("guest")?);

    store.purge_all()
}
