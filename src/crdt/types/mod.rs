//! Type definitions for the RGA CRDT.
//!
//! This module contains the identity and ordering primitives used throughout
//! the RGA implementation: a caller-supplied [`Event`] type and the
//! [`NodeId`] built from it.

pub mod event;

pub use event::{Event, NodeId};
