//! # Jump Types
//!
//! Shared data model for the jump-keys services.
//!
//! ## Philosophy
//!
//! - **Host is a collaborator**: Everything the services need from the
//!   host application flows through the [`JumpHost`] capability trait
//! - **Snapshots, not live views**: Open documents are captured into an
//!   immutable [`OpenDocumentSnapshot`] and rebuilt on demand
//! - **No cached status**: Document flags are recomputed per snapshot
//!
//! ## Key Types
//!
//! - [`DocumentId`]: Title of an open document
//! - [`DocumentHandle`]: Document plus its derived status flags
//! - [`OpenDocumentSnapshot`]: Recency-ordered open documents
//! - [`JumpHost`]: Host capability set

pub mod document;
pub mod fake;
pub mod geometry;
pub mod host;
pub mod ids;

pub use document::{
    DocumentHandle, DocumentStatus, OpenDocument, OpenDocumentSnapshot, MISSING_CLASS, SHADOW_CLASS,
};
pub use geometry::{Point, Rect, Size};
pub use host::JumpHost;
pub use ids::DocumentId;
