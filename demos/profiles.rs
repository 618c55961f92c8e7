//! Mapping store walkthrough: create, read, set, missing fields, delete, purge.
//!
//! `RUST_LOG=json_docstore=debug cargo run --example profiles`

use json_docstore::{DocumentStore, Error, RecordShape};
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let root = std::env::temp_dir().join("json_docstore_demo_profiles");
    let defaults = json!({ "string": "example", "number": 1234, "bool": true })
        .as_object()
        .cloned()
        .unwrap_or_default();
    let users = DocumentStore::builder(&root)
        .shape(RecordShape::Mapping)
        .defaults(defaults)
        .build()?;

    let id = "user123";
    if !users.exists(id) {
        users.create(id)?;
    }
    println!("user data      = {:?}", users.read(id)?);
    println!("string field   = {}", users.read_field(id, "string")?);

    users.set_field(id, "string", "new_value_for_string")?;
    println!("after set      = {:?}", users.read(id)?);

    match users.read_field(id, "non_existent_key") {
        Err(e @ Error::FieldNotFound { .. }) => println!("missing field  : {e}"),
        other => println!("unexpected     : {other:?}"),
    }
    match users.create(id) {
        Err(e @ Error::AlreadyExists { .. }) => println!("duplicate      : {e}"),
        other => println!("unexpected     : {other:?}"),
    }

    users.delete(id)?;
    if let Err(e) = users.read(id) {
        println!("after delete   : {e}");
    }

    users.purge_all()?;
    if let Err(e) = users.purge_all() {
        println!("second purge   : {e}");
    }
    Ok(())
}
