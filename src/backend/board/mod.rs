//! Board Resources
//!
//! HTTP handlers for the entities hanging off a card:
//!
//! - **`handlers::checklist`** - list/create/update/delete checklist items
//! - **`handlers::comments`** - list/create/update/delete comments
//! - **`handlers::cards`** - card deletion with its checklist and comments
//!
//! Every handler receives the repository it needs through `State`, so the
//! same handlers run against PostgreSQL or the in-memory store.

pub mod types;
pub mod handlers;

pub use handlers::cards::delete_card;
pub use handlers::checklist::{
    create_checklist_item, delete_checklist_item, list_checklist, update_checklist_item,
};
pub use handlers::comments::{
    create_comment, delete_comment, list_comments, remove_comment, update_comment,
};
