//! Tavola Social - likes and comments for menu items.
//!
//! The state-consistency core behind the menu's social features. A shared
//! remote document store holds like records and comments; this crate keeps
//! one item's local view in sync with it and derives aggregate counts for
//! whole-menu displays.
//!
//! # Architecture
//!
//! - **Models**: like records, comments, menu item references
//! - **Sync**: [`ItemSocial`], the per-item synchronizer (load, toggle-like,
//!   add-comment)
//! - **Totals**: [`LikeTotals`], the aggregate like-count resolver
//! - **Notify**: the user-facing notification surface for successes and
//!   non-fatal failures
//!
//! # Consistency
//!
//! At most one like record exists per (identity, item): the record key is
//! `{identity}_{item_id}`, so create and delete against that fixed key are
//! the only concurrency control needed. Record existence is the sole source
//! of truth for "has liked"; like counts are always the cardinality of the
//! matching record set, never a stored counter.
//!
//! # Example
//!
//! ```no_run
//! use tavola_profile::Prefs;
//! use tavola_social::{ItemSocial, LogNotifier};
//! use tavola_store::MemoryStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MemoryStore::new();
//!     let mut prefs = Prefs::open("./tavola-data/prefs.json")?;
//!
//!     let mut item = ItemSocial::for_profile(store, LogNotifier, &mut prefs, 5)?;
//!     item.load().await;
//!     item.toggle_like().await;
//!     Ok(())
//! }
//! ```

pub mod models;
pub mod notify;
pub mod sync;
pub mod totals;
mod error;

pub use error::{Error, Result};
pub use models::{Comment, CommentDraft, LikeRecord, MenuItem, COMMENTS, LIKES};
pub use notify::{LogNotifier, Notice, NoticeKind, Notifier, RecordingNotifier};
pub use sync::ItemSocial;
pub use totals::LikeTotals;
