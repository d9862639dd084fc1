//! Minimal single-replica walkthrough: import a document, make a local
//! edit, and look at the resulting changeset.
//!
//! Run with `cargo run --example simple`.

use std::sync::Arc;

use md_crdt_rga::Document;
use md_crdt_rga::crdt::{Event, EventCmpFn};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Seq(u64);

impl Event for Seq {
    fn to_event_string(&self) -> String {
        self.0.to_string()
    }
}

fn event_cmp() -> EventCmpFn<Seq> {
    Arc::new(|a: &Seq, b: &Seq| a.cmp(b))
}

fn main() {
    let doc = Document::from_markdown("# Shopping List\n\n- milk\n- eggs", Seq(0), event_cmp());
    println!("imported:\n{}", doc.to_markdown());

    let change_set = doc.diff("# Shopping List\n\n- milk\n- eggs\n- bread", Seq(1));
    println!("\nresolved {} change(s)", change_set.changes.len());

    let edited = doc.apply(&change_set);
    println!("\nafter edit:\n{}", edited.to_markdown());

    println!("\nnode count (including tombstones): {}", edited.total_node_count());
}
