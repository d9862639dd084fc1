//! Demo CLI: a scripted walkthrough of importing, editing, and merging a
//! markdown document under CRDT control.
//!
//! Logging is via `tracing`; set `RUST_LOG=md_crdt_rga=debug` to see the
//! changeset resolver/applier narrate their work. `MD_RGA_REPLICA` (any
//! string) overrides the local replica name used to stamp events.

use std::sync::Arc;

use md_crdt_rga::Document;
use md_crdt_rga::crdt::{Event, EventCmpFn};
use tracing_subscriber::EnvFilter;

/// Events are simply `(replica name, monotonic sequence)` pairs here; a
/// real deployment would likely use a Lamport or hybrid-logical clock, but
/// the CRDT core treats `Event` as opaque either way (see `crdt::Event`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct ReplicaEvent {
    replica: String,
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

fn replica_name() -> String {
    std::env::var("MD_RGA_REPLICA").unwrap_or_else(|_| "local".to_string())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let replica = replica_name();
    tracing::info!(%replica, "starting md-rga-demo");

    let original = "# Project Notes\n\n\
        This document describes the plan.\n\n\
        - Draft the proposal\n\
        - Circulate for review\n\
        - Ship it";

    let bootstrap = ReplicaEvent { replica: replica.clone(), seq: 0 };
    let base = Document::from_markdown(original, bootstrap, event_cmp());
    println!("--- base document ---\n{}", base.to_markdown());

    let edited_by_a = "# Project Notes\n\n\
        This document describes the plan for Q3.\n\n\
        - Draft the proposal\n\
        - Circulate for review\n\
        - Ship it";
    let change_a = base.diff(edited_by_a, ReplicaEvent { replica: "alice".into(), seq: 1 });
    let replica_a = base.apply(&change_a);
    println!("\n--- alice's edit applied ---\n{}", replica_a.to_markdown());

    let edited_by_b = "# Project Notes\n\n\
        This document describes the plan.\n\n\
        - Draft the proposal\n\
        - Circulate for review\n\
        - Get sign-off\n\
        - Ship it";
    let change_b = base.diff(edited_by_b, ReplicaEvent { replica: "bob".into(), seq: 1 });
    let replica_b = base.apply(&change_b);
    println!("\n--- bob's edit applied ---\n{}", replica_b.to_markdown());

    let merged = replica_a.merge(&replica_b);
    println!("\n--- merged (alice + bob) ---\n{}", merged.to_markdown());

    let merged_other_order = replica_b.merge(&replica_a);
    assert_eq!(merged.to_markdown(), merged_other_order.to_markdown());
    tracing::info!("merge is commutative: both orders converged to the same document");

    let bytes = merged.encode().expect("encode");
    println!("\nencoded size: {} bytes", bytes.len());
    let decoded = Document::decode(&bytes, event_cmp()).expect("decode");
    assert_eq!(merged.to_markdown(), decoded.to_markdown());
    tracing::info!("round-tripped through CBOR");
}
