//! Cross-Store Synchronization
//!
//! `POST /api/sync` copies the primary store into the Supabase mirror.
//!
//! # Module Structure
//!
//! ```text
//! sync/
//! ├── mirror.rs        - MirrorStore trait, mirrored tables, MirrorError
//! ├── supabase.rs      - PostgREST client (reqwest)
//! ├── memory.rs        - in-process mirror backing the tests
//! ├── projection.rs    - snake_case row shapes written to the mirror
//! ├── synchronizer.rs  - read snapshot, upsert table by table, report
//! └── handler.rs       - HTTP handler
//! ```
//!
//! # Semantics
//!
//! Every table is upserted keyed by its identifier, so running the sync twice
//! leaves one row per id holding the latest values. A failing table is logged
//! and reported; the remaining tables are still written. The three source
//! reads are independent snapshots, not one transaction, so the mirror is
//! eventually consistent at best.

pub mod handler;
pub mod memory;
pub mod mirror;
pub mod projection;
pub mod supabase;
pub mod synchronizer;

pub use handler::run_sync;
pub use memory::MemoryMirror;
pub use mirror::{DynMirrorStore, MirrorError, MirrorStore, MirrorTable};
pub use supabase::SupabaseMirror;
pub use synchronizer::{SyncOutcome, SyncReport, SyncStats, Synchronizer, TableSyncResult};
