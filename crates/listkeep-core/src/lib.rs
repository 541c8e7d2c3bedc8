//! # listkeep-core
//!
//! Record kinds, drafts, validation, and the edit-mode state machine.
//!
//! Everything in this crate is pure state: no IO, no HTTP. The client
//! crate layers the remote store and synchronizer on top of these types.

#![deny(unsafe_code)]

pub mod edit;
pub mod errors;
pub mod records;

pub use edit::{EditIntent, EditMode, EditSlot, EditTable};
pub use errors::{Result, StoreError};
pub use records::{RecordKind, Task, TaskDraft, TaskKind, Todo, TodoDraft, TodoKind};
