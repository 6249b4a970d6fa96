//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `thoughtdeck_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use thoughtdeck_core::db::open_db_in_memory;
use thoughtdeck_core::{NoteStore, SqliteCollectionGateway};

fn main() {
    println!("thoughtdeck_core ping={}", thoughtdeck_core::ping());
    println!(
        "thoughtdeck_core version={}",
        thoughtdeck_core::core_version()
    );

    // Exercise the full init path against a throwaway in-memory store.
    match open_db_in_memory() {
        Ok(conn) => {
            let store = NoteStore::initialize(SqliteCollectionGateway::new(conn));
            println!(
                "thoughtdeck_core smoke documents={} cards={}",
                store.documents().len(),
                store.cards().len()
            );
        }
        Err(err) => {
            eprintln!("thoughtdeck_core smoke failed: {err}");
            std::process::exit(1);
        }
    }
}
