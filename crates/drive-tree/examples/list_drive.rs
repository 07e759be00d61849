//! CLI example that seeds a drive and prints its full hierarchy
//!
//! Usage:
//!   cargo run --example list_drive [count]
//!
//! If no count is provided, 30 items are generated.

use drive_tree::prelude::*;
use std::env;

fn main() {
    // Get the item count from command line args or use the default
    let args: Vec<String> = env::args().collect();
    let count = match args.get(1).map(|arg| arg.parse::<usize>()) {
        Some(Ok(count)) => count,
        Some(Err(e)) => {
            eprintln!("Invalid item count: {}", e);
            std::process::exit(1);
        }
        None => 30,
    };

    let store = generate_items_seeded(count, 42);

    println!("Generated {} items", store.len());
    println!(
        "Folders: {}",
        store.iter().filter(|item| item.is_folder()).count()
    );
    println!(
        "Top level: {}",
        store.iter().filter(|item| item.is_root()).count()
    );
    println!();

    for row in store.flatten() {
        let marker = if row.item.is_folder() { "+" } else { "-" };
        println!(
            "{:indent$}{} {}  ({})",
            "",
            marker,
            row.item.name,
            store.path(row.id()),
            indent = row.depth * 2
        );
    }
}
