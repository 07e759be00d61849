//! Synthetic drive contents for demos and tests

use log::warn;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::tree::{Item, ItemId, ItemKind, ItemStore};

const FOLDER_NAMES: &[&str] = &[
    "Documents", "Photos", "Projects", "Music", "Archive", "Invoices", "Drafts", "Shared",
];

const FILE_STEMS: &[&str] = &[
    "report", "notes", "budget", "holiday", "resume", "backup", "slides", "todo", "readme",
];

const FILE_EXTENSIONS: &[&str] = &["txt", "pdf", "png", "jpg", "docx", "xlsx", "md", "zip"];

/// Generate `count` items with ids `"1"` to `count`
///
/// Each item's parent is either the top level or a folder generated before
/// it, so ids are unique, every parent exists and the result is a forest.
pub fn generate_items<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Item> {
    let mut items: Vec<Item> = Vec::with_capacity(count);
    let mut folders: Vec<ItemId> = Vec::new();

    for n in 1..=count {
        // Bias early items towards folders so there is something to nest into
        let folder_odds = if folders.len() < 3 { 0.7 } else { 0.3 };
        let kind = if rng.gen_bool(folder_odds) {
            ItemKind::Folder
        } else {
            ItemKind::File
        };

        let parent_id = if rng.gen_bool(0.35) {
            None
        } else {
            folders.choose(rng).cloned()
        };

        let (name, size) = match kind {
            ItemKind::Folder => {
                let base = FOLDER_NAMES.choose(rng).copied().unwrap_or("Folder");
                (format!("{} {}", base, n), 0)
            }
            ItemKind::File => {
                let stem = FILE_STEMS.choose(rng).copied().unwrap_or("file");
                let ext = FILE_EXTENSIONS.choose(rng).copied().unwrap_or("bin");
                (format!("{}-{}.{}", stem, n, ext), rng.gen_range(512..5_000_000))
            }
        };

        let item = Item {
            id: ItemId::from(n),
            name,
            parent_id,
            kind,
            size,
        };
        if kind.is_folder() {
            folders.push(item.id.clone());
        }
        items.push(item);
    }

    items
}

/// Generate a reproducible store of `count` items
pub fn generate_items_seeded(count: usize, seed: u64) -> ItemStore {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut store = ItemStore::new();
    for item in generate_items(count, &mut rng) {
        // Parents always precede their children, so insertion never fails
        if let Err(err) = store.insert(item) {
            warn!("Skipping generated item: {}", err);
        }
    }
    store
}
