//! Per-item social state synchronizer.
//!
//! One [`ItemSocial`] owns the like/comment view of one menu item: whether
//! the current identity has liked it, the visible like count, and the
//! comment list. Mutations go to the store first and the local view is
//! adjusted only after the store call resolves; a failed call leaves the
//! view untouched and raises an error notice, so no rollback is ever
//! needed.
//!
//! # Concurrency
//!
//! Methods take `&mut self`, which serializes operations on one item. The
//! busy flag additionally guards logical reentry when the presentation
//! layer shares the synchronizer across callbacks: mutating operations
//! issued while busy are rejected with an info notice rather than silently
//! dropped. If a caller drops an in-flight future, the abandoned result is
//! simply discarded; the busy flag may be left set, and the next `load`
//! clears it.

use crate::error::{Error, Result};
use crate::models::{Comment, CommentDraft, LikeRecord, COMMENTS, LIKES};
use crate::notify::{Notice, Notifier};
use tavola_profile::Prefs;
use tavola_store::{DocumentStore, Filter};

const BUSY_MESSAGE: &str = "Hold on, the previous action is still being saved";

/// Synchronizes one menu item's likes and comments with the shared store.
pub struct ItemSocial<S, N> {
    store: S,
    notifier: N,
    identity: String,
    item_id: u32,
    has_liked: bool,
    like_count: u64,
    comments: Vec<Comment>,
    busy: bool,
}

impl<S: DocumentStore, N: Notifier> ItemSocial<S, N> {
    /// Create a synchronizer for `item_id` with an explicit identity.
    pub fn new(store: S, notifier: N, identity: String, item_id: u32) -> Self {
        Self {
            store,
            notifier,
            identity,
            item_id,
            has_liked: false,
            like_count: 0,
            comments: Vec::new(),
            busy: false,
        }
    }

    /// Create a synchronizer using (and lazily creating) the profile's
    /// persistent identity.
    pub fn for_profile(store: S, notifier: N, prefs: &mut Prefs, item_id: u32) -> Result<Self> {
        let identity = prefs.get_or_create_identity()?;
        Ok(Self::new(store, notifier, identity, item_id))
    }

    /// Builder: pre-seed the visible count (e.g. from [`crate::LikeTotals`])
    /// before the first `load`.
    pub fn with_like_count(mut self, count: u64) -> Self {
        self.like_count = count;
        self
    }

    /// The item this synchronizer tracks.
    pub fn item_id(&self) -> u32 {
        self.item_id
    }

    /// Whether the current identity has liked this item.
    pub fn has_liked(&self) -> bool {
        self.has_liked
    }

    /// The visible like count.
    pub fn like_count(&self) -> u64 {
        self.like_count
    }

    /// Comments in display order (creation order).
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Whether a store call for this item is in flight. Presentation
    /// disables mutating controls while this is set.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Refresh the full view from the store: like-record existence, like
    /// count, and comment list, fetched concurrently.
    ///
    /// Each of the three reads fails independently: a failure raises an
    /// error notice and leaves that part of the view at its prior value,
    /// while successfully fetched parts are kept.
    pub async fn load(&mut self) {
        self.busy = true;

        let key = LikeRecord::compose_key(&self.identity, self.item_id);
        let item_filter = Filter::eq("item_id", self.item_id);

        let (liked, count, comments) = tokio::join!(
            self.store.get(LIKES, &key),
            self.store.query(LIKES, Some(&item_filter)),
            self.fetch_comments(),
        );

        match liked {
            Ok(record) => self.has_liked = record.is_some(),
            Err(e) => {
                tracing::warn!(item_id = self.item_id, error = %e, "like status read failed");
                self.notifier
                    .notify(Notice::error("Could not load your like status"));
            }
        }

        match count {
            Ok(records) => self.like_count = records.len() as u64,
            Err(e) => {
                tracing::warn!(item_id = self.item_id, error = %e, "like count read failed");
                self.notifier
                    .notify(Notice::error("Could not load the like count"));
            }
        }

        match comments {
            Ok(list) => self.comments = list,
            Err(e) => {
                tracing::warn!(item_id = self.item_id, error = %e, "comment read failed");
                self.notifier
                    .notify(Notice::error("Could not load the comments"));
            }
        }

        self.busy = false;
    }

    /// Fetch this item's comments in display order. Malformed records are
    /// logged and skipped rather than failing the whole list.
    async fn fetch_comments(&self) -> Result<Vec<Comment>> {
        let filter = Filter::eq("item_id", self.item_id);
        let docs = self.store.query(COMMENTS, Some(&filter)).await?;

        let mut comments: Vec<Comment> = docs
            .iter()
            .filter_map(|doc| match Comment::from_document(doc) {
                Ok(comment) => Some(comment),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping malformed comment");
                    None
                }
            })
            .collect();
        comments.sort_by_key(|c| c.timestamp);
        Ok(comments)
    }

    /// Like the item if not liked, un-like it otherwise.
    ///
    /// The store write resolves first; only then is the local view
    /// adjusted by exactly one. On failure the view is untouched and an
    /// error notice is raised.
    pub async fn toggle_like(&mut self) {
        if self.busy {
            self.notifier.notify(Notice::info(BUSY_MESSAGE));
            return;
        }
        self.busy = true;

        if self.has_liked {
            let key = LikeRecord::compose_key(&self.identity, self.item_id);
            match self.store.delete(LIKES, &key).await {
                Ok(()) => {
                    self.has_liked = false;
                    self.like_count = self.like_count.saturating_sub(1);
                    self.notifier.notify(Notice::info("Your like was removed"));
                }
                Err(e) => {
                    tracing::warn!(item_id = self.item_id, error = %e, "like removal failed");
                    self.notifier
                        .notify(Notice::error("Could not remove your like, please try again"));
                }
            }
        } else {
            let record = LikeRecord::new(self.identity.clone(), self.item_id);
            match self
                .store
                .create(LIKES, Some(&record.key()), record.fields())
                .await
            {
                Ok(_) => {
                    self.has_liked = true;
                    self.like_count += 1;
                    self.notifier.notify(Notice::success("Thanks for your like!"));
                }
                Err(e) => {
                    tracing::warn!(item_id = self.item_id, error = %e, "like save failed");
                    self.notifier
                        .notify(Notice::error("Could not save your like, please try again"));
                }
            }
        }

        self.busy = false;
    }

    /// Persist a comment and append it to the local list.
    ///
    /// Empty or whitespace-only author/text is rejected locally with a
    /// validation notice and no store call. On success the author name is
    /// remembered in the profile for future comment forms.
    pub async fn add_comment(&mut self, prefs: &mut Prefs, author: &str, text: &str) {
        if self.busy {
            self.notifier.notify(Notice::info(BUSY_MESSAGE));
            return;
        }

        if let Err(e) = validate_comment(author, text) {
            self.notifier.notify(Notice::error(e.to_string()));
            return;
        }
        self.busy = true;

        let draft = CommentDraft::new(self.item_id, author.trim(), text.trim());
        match self.store.create(COMMENTS, None, draft.fields()).await {
            Ok(id) => {
                self.comments.push(draft.into_comment(id));
                if let Err(e) = prefs.set_last_author(author.trim()) {
                    tracing::warn!(error = %e, "could not remember author name");
                }
                self.notifier.notify(Notice::success("Comment added"));
            }
            Err(e) => {
                tracing::warn!(item_id = self.item_id, error = %e, "comment save failed");
                self.notifier
                    .notify(Notice::error("Could not save your comment, please try again"));
            }
        }

        self.busy = false;
    }
}

fn validate_comment(author: &str, text: &str) -> Result<()> {
    if author.trim().is_empty() {
        return Err(Error::Validation(
            "please enter your name before commenting".to_string(),
        ));
    }
    if text.trim().is_empty() {
        return Err(Error::Validation("the comment text is empty".to_string()));
    }
    Ok(())
}
