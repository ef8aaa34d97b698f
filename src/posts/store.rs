//! In-memory post storage.
//!
//! One ordered `Vec<Post>` behind a lock. Lookups are linear scans in
//! insertion order; deletions shift later posts down so relative order is
//! preserved. Each operation takes the lock once, so a read-then-mutate
//! sequence can never interleave with another request.

use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::error::PostError;
use super::id::IdGenerator;
use super::model::{Comment, NewPost, Post, PostPatch};

/// Cheap, clonable handle to the process-wide post sequence.
///
/// Created once at startup and injected into every handler through the
/// router state. The data is dropped with the last handle.
#[derive(Clone, Debug, Default)]
pub struct PostStore {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    posts: RwLock<Vec<Post>>,
    ids: IdGenerator,
}

impl PostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every post, in insertion order.
    pub async fn list(&self) -> Vec<Post> {
        self.inner.posts.read().await.clone()
    }

    /// Posts whose category equals `category` exactly (case-sensitive).
    pub async fn list_by_category(&self, category: &str) -> Vec<Post> {
        self.inner.posts.read().await
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect()
    }

    /// The first post with this id.
    pub async fn get(&self, id: &str) -> Result<Post, PostError> {
        let posts = self.inner.posts.read().await;
        let found = posts.iter().find(|p| p.id == id).cloned();
        debug!(id, found = found.is_some(), "lookup");
        found.ok_or(PostError::NotFound)
    }

    /// Assigns a fresh id and appends the post to the end of the sequence.
    pub async fn create(&self, new: NewPost) -> Post {
        let post = new.into_post(self.inner.ids.next_id());
        self.inner.posts.write().await.push(post.clone());
        info!(id = %post.id, category = %post.category, "post created");
        post
    }

    /// Appends `comment` to the post's comments and returns it.
    pub async fn add_comment(&self, id: &str, comment: Comment) -> Result<Comment, PostError> {
        let mut posts = self.inner.posts.write().await;
        let post = posts.iter_mut().find(|p| p.id == id).ok_or(PostError::NotFound)?;
        post.comments.push(comment.clone());
        info!(id, comments = post.comments.len(), "comment added");
        Ok(comment)
    }

    /// Replaces the post at its current position with a patched copy.
    ///
    /// The id is looked up before `body` is read, so an unknown id is
    /// `NotFound` whatever the body holds.
    pub async fn update(&self, id: &str, body: &Map<String, Value>) -> Result<Post, PostError> {
        let mut posts = self.inner.posts.write().await;
        let index = position(&posts, id).ok_or(PostError::NotFound)?;
        let updated = PostPatch::from_body(body)?.apply(&posts[index]);
        posts[index] = updated.clone();
        info!(id, "post updated");
        Ok(updated)
    }

    /// Removes exactly one post, closing the gap.
    pub async fn delete(&self, id: &str) -> Result<(), PostError> {
        let mut posts = self.inner.posts.write().await;
        let index = position(&posts, id).ok_or(PostError::NotFound)?;
        posts.remove(index);
        info!(id, remaining = posts.len(), "post deleted");
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.inner.posts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn position(posts: &[Post], id: &str) -> Option<usize> {
    posts.iter().position(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn new_post(title: &str, category: &str) -> NewPost {
        NewPost {
            title: title.into(),
            image: "img".into(),
            description: "desc".into(),
            category: category.into(),
            comments: Vec::new(),
        }
    }

    fn body(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn comment(author: &str) -> Comment {
        Comment { author: author.into(), content: "hello".into() }
    }

    #[tokio::test]
    async fn create_then_get_returns_same_record() {
        let store = PostStore::new();
        let created = store.create(new_post("A", "c")).await;
        assert!(!created.id.is_empty());
        assert_eq!(store.get(&created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn ids_are_unique_under_rapid_creation() {
        let store = PostStore::new();
        let mut ids = Vec::new();
        for _ in 0..50 {
            ids.push(store.create(new_post("A", "c")).await.id);
        }
        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
    }

    #[tokio::test]
    async fn category_filter_is_exact_and_ordered() {
        let store = PostStore::new();
        let a = store.create(new_post("a", "rust")).await;
        store.create(new_post("b", "Rust")).await;
        let c = store.create(new_post("c", "rust")).await;

        let found = store.list_by_category("rust").await;
        assert_eq!(found, vec![a, c]);
        assert!(store.list_by_category("go").await.is_empty());
    }

    #[tokio::test]
    async fn add_comment_touches_only_the_target() {
        let store = PostStore::new();
        let a = store.create(new_post("a", "c")).await;
        let b = store.create(new_post("b", "c")).await;

        let added = store.add_comment(&a.id, comment("X")).await.unwrap();
        assert_eq!(added, comment("X"));
        assert_eq!(store.get(&a.id).await.unwrap().comments.len(), 1);
        assert!(store.get(&b.id).await.unwrap().comments.is_empty());

        let before = store.list().await;
        assert!(matches!(store.add_comment("missing", comment("Y")).await, Err(PostError::NotFound)));
        assert_eq!(store.list().await, before);
    }

    #[tokio::test]
    async fn update_keeps_position_and_unpatched_fields() {
        let store = PostStore::new();
        let a = store.create(new_post("a", "c")).await;
        let b = store.create(new_post("b", "c")).await;

        let updated = store.update(&a.id, &body(json!({ "title": "New" }))).await.unwrap();
        assert_eq!(updated.title, "New");
        assert_eq!(updated.description, a.description);

        let ids: Vec<_> = store.list().await.into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);

        assert!(matches!(store.update("missing", &Map::new()).await, Err(PostError::NotFound)));
    }

    #[tokio::test]
    async fn update_checks_id_before_body() {
        let store = PostStore::new();
        let a = store.create(new_post("a", "c")).await;
        let bad = body(json!({ "title": 5 }));

        assert!(matches!(store.update("missing", &bad).await, Err(PostError::NotFound)));
        assert!(matches!(
            store.update(&a.id, &bad).await,
            Err(PostError::InvalidField { field: "title", .. })
        ));
        assert_eq!(store.get(&a.id).await.unwrap(), a);
    }

    #[tokio::test]
    async fn delete_removes_one_and_preserves_order() {
        let store = PostStore::new();
        let a = store.create(new_post("a", "c")).await;
        let b = store.create(new_post("b", "c")).await;
        let c = store.create(new_post("c", "c")).await;

        store.delete(&b.id).await.unwrap();
        assert!(matches!(store.get(&b.id).await, Err(PostError::NotFound)));
        assert_eq!(store.list().await, vec![a, c]);
        assert!(matches!(store.delete(&b.id).await, Err(PostError::NotFound)));
        assert_eq!(store.len().await, 2);
    }
}
