//! The DAG-CBOR-style wire format (§10.1 of `SPEC_FULL.md`): encoding and
//! decoding trees and changesets for transport or storage. Transport itself
//! is explicitly out of scope (see Non-goals); this module only handles the
//! bytes.

mod codec;
mod wire;

pub use codec::{decode_change_set, decode_tree, encode_change_set, encode_tree};
pub use wire::{ChangeSetWire, NodeIdWire, RgaChangeOpWire, RgaChangeWire, RgaNodeWire, RgaWire, TreeNodeWire, TreeParentWire};
