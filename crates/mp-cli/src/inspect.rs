//! The inspect command: list keys and Events branches of a ROOT file.

use std::path::Path;

use anyhow::{Context, Result};

use mp_resolution::events::EVENTS_TREE;
use mp_root::RootFile;

pub fn run(path: &Path) -> Result<()> {
    let file =
        RootFile::open(path).with_context(|| format!("opening {}", path.display()))?;

    println!("{}", path.display());
    for key in file.list_keys()? {
        println!("  {} ({}, cycle {})", key.name, key.class_name, key.cycle);
    }

    match file.get_tree(EVENTS_TREE) {
        Ok(tree) => {
            println!("{EVENTS_TREE}: {} entries", tree.entries);
            for branch in &tree.branches {
                println!(
                    "  {:32} {:?}{}",
                    branch.name,
                    branch.leaf,
                    if branch.entry_offset_len > 0 { " (jagged)" } else { "" }
                );
            }
        }
        Err(e) => println!("no {EVENTS_TREE} tree: {e}"),
    }

    Ok(())
}
