//! Sequence store walkthrough: append items, read them back, clean up.

use json_docstore::{DocumentStore, Error};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let root = std::env::temp_dir().join("json_docstore_demo_lists");
    let lists = DocumentStore::sequence(&root)?;

    let id = "groceries";
    if !lists.exists(id) {
        lists.create(id)?;
    }
    println!("before = {:?}", lists.read_sequence(id)?);

    for item in ["apple", "banana", "carrot"] {
        lists.append_item(id, item)?;
    }
    println!("after  = {:?}", lists.read_sequence(id)?);

    if let Err(e) = lists.create(id) {
        println!("duplicate: {e}");
    }
    if let Err(e) = lists.read_field(id, "identifier") {
        println!("field read on a list: {e}");
    }

    lists.purge_all()
}
