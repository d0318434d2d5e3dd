//! Board resource handlers

pub mod cards;
pub mod checklist;
pub mod comments;
