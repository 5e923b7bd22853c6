//! Backlink index: which notes link to which.
//!
//! Rows are written per source note as a batch and replaced wholesale on
//! every save. [`compute_entries`] turns note content into that batch;
//! [`BacklinkRepository`] stores it.

mod entries;
mod repository;
mod schema;
mod sqlite;
mod sync;

pub use entries::{NoteCatalog, TitleResolver, compute_entries};
pub use repository::{BacklinkRepository, IndexError, IndexResult};
pub use schema::{SCHEMA_VERSION, create_schema, get_schema_version};
pub use sqlite::{SqliteIndex, Transaction};
pub use sync::{SyncSummary, purge_missing, refresh_note, sync_vault};
