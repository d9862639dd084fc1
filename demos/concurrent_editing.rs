//! Three replicas editing the same markdown document while offline, then
//! syncing pairwise and all together, showing convergence regardless of
//! merge order.
//!
//! Run with `cargo run --example concurrent_editing`.

use std::sync::Arc;

use md_crdt_rga::Document;
use md_crdt_rga::crdt::{Event, EventCmpFn};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct ReplicaEvent {
    replica: &'static str,
    seq: u64,
}

impl Event for ReplicaEvent {
    fn to_event_string(&self) -> String {
        format!("{}:{}", self.replica, self.seq)
    }
}

fn event_cmp() -> EventCmpFn<ReplicaEvent> {
    Arc::new(|a: &ReplicaEvent, b: &ReplicaEvent| a.cmp(b))
}

fn ev(replica: &'static str, seq: u64) -> ReplicaEvent {
    ReplicaEvent { replica, seq }
}

fn main() {
    let original = "# Release Checklist\n\n\
        Track the remaining work before cut.\n\n\
        - Write release notes\n\
        - Tag the repository\n\
        - Notify downstream teams";

    let base = Document::from_markdown(original, ev("origin", 0), event_cmp());
    println!("--- shared base ---\n{}", base.to_markdown());

    // Three replicas go offline and each make an independent edit against
    // the same base, with no knowledge of each other's changes.
    let alice_md = "# Release Checklist\n\n\
        Track the remaining work before cut.\n\n\
        - Write release notes\n\
        - Tag the repository\n\
        - Notify downstream teams\n\
        - Archive the sprint board";
    let alice_changes = base.diff(alice_md, ev("alice", 1));
    let alice = base.apply(&alice_changes);
    println!("\n--- alice (appended a checklist item) ---\n{}", alice.to_markdown());

    let bob_md = "# Release Checklist (v2)\n\n\
        Track the remaining work before cut.\n\n\
        - Write release notes\n\
        - Tag the repository\n\
        - Notify downstream teams";
    let bob_changes = base.diff(bob_md, ev("bob", 1));
    let bob = base.apply(&bob_changes);
    println!("\n--- bob (renamed the heading) ---\n{}", bob.to_markdown());

    let carol_md = "# Release Checklist\n\n\
        Track the remaining work before cut.\n\n\
        - Write release notes\n\
        - Tag the repository";
    let carol_changes = base.diff(carol_md, ev("carol", 1));
    let carol = base.apply(&carol_changes);
    println!("\n--- carol (dropped the last item) ---\n{}", carol.to_markdown());

    // Pairwise merges, checked both directions, before the three-way merge.
    let ab = alice.merge(&bob);
    let ba = bob.merge(&alice);
    assert_eq!(ab.to_markdown(), ba.to_markdown());
    println!("\n--- alice + bob (either order) ---\n{}", ab.to_markdown());

    let all_forward = alice.merge(&bob).merge(&carol);
    let all_backward = carol.merge(&bob).merge(&alice);
    let all_shuffled = bob.merge(&carol).merge(&alice);
    assert_eq!(all_forward.to_markdown(), all_backward.to_markdown());
    assert_eq!(all_forward.to_markdown(), all_shuffled.to_markdown());
    println!("\n--- all three, merged in any order ---\n{}", all_forward.to_markdown());

    let rendered = all_forward.to_markdown();
    assert!(rendered.contains("Release Checklist (v2)"));
    assert!(rendered.contains("Archive the sprint board"));
    assert!(!rendered.contains("Notify downstream teams"));

    println!(
        "\nconverged: {} live/tombstoned nodes across the merged tree",
        all_forward.total_node_count()
    );
}
