//! # listkeep-client
//!
//! Remote store client and list synchronizer.
//!
//! [`remote::RemoteStore`] issues typed CRUD calls against the external
//! API for one record kind; [`sync::ListSync`] owns the local collection
//! and reconciles it with server truth by re-fetching the full list after
//! every successful mutation. The two edit surfaces
//! ([`sync::SingleEditSync`], [`sync::MultiEditSync`]) layer the
//! edit-mode state machine from `listkeep-core` on top.

#![deny(unsafe_code)]

pub mod remote;
pub mod sync;

pub use remote::{HttpRemoteStore, RemoteStore};
pub use sync::{ListSync, MultiEditSync, SingleEditSync, TaskSync, TodoSync};
