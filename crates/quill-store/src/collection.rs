//! Per-user post collection.

use std::collections::BTreeSet;
use std::rc::Rc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use quill_model::{Origin, PostId, PostRecord, UserId};
use quill_persistence::{Storage, load_json, save_json};
use quill_wizard::PostSubmission;

use crate::error::{Result, StoreError};
use crate::remote::{RemotePost, RemoteSource};
use crate::session::SessionStore;

/// Storage key of a user's posts.
pub fn posts_key(user: &UserId) -> String {
    format!("posts_{user}")
}

/// Storage key of the remote posts a user has deleted.
pub fn tombstones_key(user: &UserId) -> String {
    format!("deleted_{user}")
}

/// Posts owned by the signed-in user.
///
/// Every operation resolves the owner from the shared [`SessionStore`] at
/// call time, so signing in as someone else switches collections without
/// rebuilding the store. Mutations are written through to storage before
/// they return, and a mutation whose write fails changes nothing in memory.
pub struct CollectionStore {
    session: Rc<SessionStore>,
    storage: Rc<dyn Storage>,
    remote: Option<Box<dyn RemoteSource>>,
    posts: Vec<PostRecord>,
    /// Records stored under the user's key but owned by someone else. Never
    /// shown, kept so writes do not drop them.
    foreign: Vec<PostRecord>,
    loaded_for: Option<UserId>,
}

impl CollectionStore {
    pub fn new(session: Rc<SessionStore>, storage: Rc<dyn Storage>) -> Self {
        Self {
            session,
            storage,
            remote: None,
            posts: Vec::new(),
            foreign: Vec::new(),
            loaded_for: None,
        }
    }

    /// Merge placeholder posts from `remote` on every [`fetch`](Self::fetch).
    pub fn with_remote(mut self, remote: Box<dyn RemoteSource>) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Reload the current user's posts from storage and reconcile them with
    /// the remote source.
    ///
    /// Locally stored records win over remote ones with the same id, and
    /// remote posts the user deleted stay deleted. A failing remote source is
    /// logged and the local posts are returned on their own.
    pub fn fetch(&mut self) -> Result<&[PostRecord]> {
        let Some(user) = self.session.current_user_id() else {
            self.posts.clear();
            self.foreign.clear();
            self.loaded_for = None;
            return Err(StoreError::NotAuthenticated);
        };

        self.load_local(&user)?;

        if let Some(remote) = &self.remote {
            match remote.fetch_posts() {
                Ok(remote_posts) => {
                    let tombstones = self.load_tombstones(&user)?;
                    let merged = reconcile(&mut self.posts, remote_posts, &tombstones, &user);
                    debug!(merged, "Merged remote posts");
                }
                Err(err) => warn!(error = %err, "Remote posts unavailable, using local posts only"),
            }
        }

        Ok(&self.posts)
    }

    /// Posts from the last load, in display order.
    pub fn posts(&self) -> &[PostRecord] {
        match (&self.loaded_for, self.session.current_user_id()) {
            (Some(loaded), Some(current)) if *loaded == current => self.posts.as_slice(),
            _ => &[],
        }
    }

    /// Find one of the current user's posts.
    pub fn lookup(&self, id: &PostId) -> Option<&PostRecord> {
        let user = self.session.current_user_id()?;
        self.posts()
            .iter()
            .find(|p| &p.id == id && p.is_owned_by(&user))
    }

    pub fn add(&mut self, submission: &PostSubmission) -> Result<PostRecord> {
        let user = self.require_user()?;

        let post = PostRecord {
            id: PostId::new(Uuid::new_v4().simple().to_string())?,
            title: submission.title.clone(),
            category: submission.category.clone(),
            description: submission.description.clone(),
            tags: submission.tags.clone(),
            author_name: submission.author_name.clone(),
            owner_id: user.clone(),
            origin: Origin::Local,
            created_at: Utc::now(),
            updated_at: None,
        };

        let mut next = self.posts.clone();
        next.push(post.clone());
        self.commit(&user, next)?;
        info!(post_id = %post.id, "Added post");
        Ok(post)
    }

    /// Replace the editable fields of an existing post.
    ///
    /// Identity, owner, origin and creation time are kept; optional fields
    /// absent from `submission` are cleared.
    pub fn update(&mut self, id: &PostId, submission: &PostSubmission) -> Result<PostRecord> {
        let user = self.require_user()?;
        let index = self.owned_index(id, &user)?;

        let mut next = self.posts.clone();
        let post = &mut next[index];
        post.title = submission.title.clone();
        post.category = submission.category.clone();
        post.description = submission.description.clone();
        post.tags = submission.tags.clone();
        post.author_name = submission.author_name.clone();
        post.updated_at = Some(Utc::now());
        let updated = post.clone();

        self.commit(&user, next)?;
        info!(post_id = %updated.id, "Updated post");
        Ok(updated)
    }

    /// Remove a post. Remote posts are also remembered as deleted so the
    /// next fetch does not bring them back.
    ///
    /// The list is written before the tombstone. If only the tombstone write
    /// fails the post is gone locally and the error is returned.
    pub fn delete(&mut self, id: &PostId) -> Result<()> {
        let user = self.require_user()?;
        let index = self.owned_index(id, &user)?;

        let mut next = self.posts.clone();
        let removed = next.remove(index);
        let tombstones = if removed.origin.is_remote() {
            let mut tombstones = self.load_tombstones(&user)?;
            tombstones.insert(removed.id.clone());
            Some(tombstones)
        } else {
            None
        };

        self.commit(&user, next)?;
        if let Some(tombstones) = tombstones {
            save_json(self.storage.as_ref(), &tombstones_key(&user), &tombstones)?;
        }
        info!(post_id = %removed.id, origin = removed.origin.label(), "Deleted post");
        Ok(())
    }

    fn require_user(&mut self) -> Result<UserId> {
        let user = self
            .session
            .current_user_id()
            .ok_or(StoreError::NotAuthenticated)?;
        if self.loaded_for.as_ref() != Some(&user) {
            self.load_local(&user)?;
        }
        Ok(user)
    }

    fn owned_index(&self, id: &PostId, user: &UserId) -> Result<usize> {
        if let Some(index) = self
            .posts
            .iter()
            .position(|p| &p.id == id && p.is_owned_by(user))
        {
            return Ok(index);
        }
        if self.foreign.iter().any(|p| &p.id == id) {
            return Err(StoreError::Unauthorized(id.clone()));
        }
        Err(StoreError::NotFound(id.clone()))
    }

    fn load_local(&mut self, user: &UserId) -> Result<()> {
        let stored: Vec<PostRecord> =
            load_json(self.storage.as_ref(), &posts_key(user))?.unwrap_or_default();
        let (owned, foreign): (Vec<_>, Vec<_>) =
            stored.into_iter().partition(|p| p.is_owned_by(user));
        if !foreign.is_empty() {
            warn!(user_id = %user, count = foreign.len(), "Ignoring posts owned by another user");
        }
        self.posts = owned;
        self.foreign = foreign;
        self.loaded_for = Some(user.clone());
        debug!(user_id = %user, count = self.posts.len(), "Loaded local posts");
        Ok(())
    }

    fn load_tombstones(&self, user: &UserId) -> Result<BTreeSet<PostId>> {
        Ok(load_json(self.storage.as_ref(), &tombstones_key(user))?.unwrap_or_default())
    }

    /// Write `next` (plus foreign records) and only then make it the
    /// in-memory list. A failed write leaves the store as it was.
    fn commit(&mut self, user: &UserId, next: Vec<PostRecord>) -> Result<()> {
        let all: Vec<&PostRecord> = next.iter().chain(&self.foreign).collect();
        save_json(self.storage.as_ref(), &posts_key(user), &all)?;
        self.posts = next;
        Ok(())
    }
}

/// Append remote posts that are neither tombstoned nor already present.
/// Returns how many were added.
fn reconcile(
    posts: &mut Vec<PostRecord>,
    remote: Vec<RemotePost>,
    tombstones: &BTreeSet<PostId>,
    owner: &UserId,
) -> usize {
    let known: BTreeSet<PostId> = posts.iter().map(|p| p.id.clone()).collect();
    let fetched_at = Utc::now();
    let mut added = 0;

    for item in remote {
        let Ok(id) = PostId::new(item.id.to_string()) else {
            continue;
        };
        if known.contains(&id) || tombstones.contains(&id) {
            continue;
        }
        posts.push(PostRecord {
            id,
            title: item.title,
            category: String::new(),
            description: item.body,
            tags: None,
            author_name: None,
            owner_id: owner.clone(),
            origin: Origin::Remote,
            created_at: fetched_at,
            updated_at: None,
        });
        added += 1;
    }

    added
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote(id: u64, title: &str) -> RemotePost {
        RemotePost {
            id,
            user_id: Some(1),
            title: title.into(),
            body: "placeholder body".into(),
        }
    }

    #[test]
    fn reconcile_skips_known_and_tombstoned() {
        let owner = UserId::new("1").unwrap();
        let mut posts = Vec::new();
        let tombstones: BTreeSet<PostId> = [PostId::new("2").unwrap()].into_iter().collect();

        let added = reconcile(
            &mut posts,
            vec![remote(1, "one"), remote(2, "two"), remote(3, "three")],
            &tombstones,
            &owner,
        );
        assert_eq!(added, 2);

        let again = reconcile(&mut posts, vec![remote(1, "changed")], &tombstones, &owner);
        assert_eq!(again, 0);
        assert_eq!(posts[0].title, "one");
        assert!(posts.iter().all(|p| p.origin == Origin::Remote));
    }

    #[test]
    fn storage_keys_are_per_user() {
        let user = UserId::new("1").unwrap();
        assert_eq!(posts_key(&user), "posts_1");
        assert_eq!(tombstones_key(&user), "deleted_1");
    }
}
