//! The content store: posts, authorship, and like counts.

use crate::graph::GraphStore;
use crate::types::{ContentKind, Post, PostId, UserId};
use std::collections::HashMap;

/// Owns the post arena and the per-author creation-order sequences.
///
/// Arena order is global creation order; the posts file is written in it.
/// Feeds are built in user-iteration order instead, not chronologically:
/// all of the first user's posts, then all of the second's, and so on.
#[derive(Debug, Default)]
pub struct ContentStore {
    posts: Vec<Post>,
    by_author: HashMap<UserId, Vec<PostId>>,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a post with zero likes, appending it to the global arena and
    /// the author's sequence.
    pub fn create_post(&mut self, author: UserId, text: &str) -> PostId {
        self.create_post_with_likes(author, text, 0)
    }

    /// Create a post with a pre-existing like count. Used when replaying
    /// the posts file at load.
    pub(crate) fn create_post_with_likes(&mut self, author: UserId, text: &str, likes: u32) -> PostId {
        let id = PostId(self.posts.len());
        self.posts.push(Post {
            author,
            text: text.to_string(),
            likes,
            kind: ContentKind::Post,
        });
        self.by_author.entry(author).or_default().push(id);
        id
    }

    /// Increment a post's like count. No upper bound, no dedup: the same
    /// reader may like a post any number of times. Returns the new count.
    pub fn like(&mut self, id: PostId) -> u32 {
        let post = &mut self.posts[id.0];
        post.likes += 1;
        post.likes
    }

    pub fn post(&self, id: PostId) -> &Post {
        &self.posts[id.0]
    }

    /// All posts in global creation order.
    pub fn posts(&self) -> impl Iterator<Item = (PostId, &Post)> {
        self.posts.iter().enumerate().map(|(i, p)| (PostId(i), p))
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// A user's posts in creation order.
    pub fn posts_by_user(&self, author: UserId) -> &[PostId] {
        self.by_author.get(&author).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every user's posts, concatenated in user-iteration order with each
    /// user's posts in creation order. Not global chronological order.
    pub fn all_posts(&self, graph: &GraphStore) -> Vec<PostId> {
        let mut out = Vec::with_capacity(self.posts.len());
        for (id, _) in graph.users() {
            out.extend_from_slice(self.posts_by_user(id));
        }
        out
    }

    /// Posts from the users the viewer follows, in following-list order.
    pub fn following_posts(&self, graph: &GraphStore, viewer: UserId) -> Vec<PostId> {
        let mut out = Vec::new();
        for &followed in graph.user(viewer).following() {
            out.extend_from_slice(self.posts_by_user(followed));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (GraphStore, ContentStore, Vec<UserId>) {
        let mut graph = GraphStore::new();
        let ids = ["alice", "bob", "carol"]
            .iter()
            .map(|n| graph.add_user(n).unwrap())
            .collect();
        (graph, ContentStore::new(), ids)
    }

    #[test]
    fn test_create_post_starts_at_zero_likes() {
        let (_, mut content, ids) = setup();
        let post = content.create_post(ids[0], "hello");
        assert_eq!(content.post(post).likes, 0);
        assert_eq!(content.post(post).text, "hello");
        assert_eq!(content.post(post).author, ids[0]);
    }

    #[test]
    fn test_like_increments_without_bound() {
        let (_, mut content, ids) = setup();
        let post = content.create_post(ids[0], "hello");
        assert_eq!(content.like(post), 1);
        assert_eq!(content.like(post), 2);
        assert_eq!(content.like(post), 3);
        assert_eq!(content.post(post).likes, 3);
    }

    #[test]
    fn test_posts_by_user_in_creation_order() {
        let (_, mut content, ids) = setup();
        let first = content.create_post(ids[0], "first");
        content.create_post(ids[1], "interleaved");
        let second = content.create_post(ids[0], "second");
        assert_eq!(content.posts_by_user(ids[0]), &[first, second]);
    }

    #[test]
    fn test_posts_by_user_empty_without_posts() {
        let (_, content, ids) = setup();
        assert!(content.posts_by_user(ids[2]).is_empty());
    }

    #[test]
    fn test_all_posts_in_user_iteration_order() {
        let (graph, mut content, ids) = setup();
        // bob posts before alice; the feed still leads with alice's post
        // because alice signed up first.
        let bobs = content.create_post(ids[1], "from bob");
        let alices = content.create_post(ids[0], "from alice");
        assert_eq!(content.all_posts(&graph), vec![alices, bobs]);
    }

    #[test]
    fn test_following_posts_in_following_order() {
        let (mut graph, mut content, ids) = setup();
        let from_carol = content.create_post(ids[2], "from carol");
        let from_bob = content.create_post(ids[1], "from bob");
        // alice follows carol first, then bob.
        graph.follow(ids[0], ids[2]);
        graph.follow(ids[0], ids[1]);
        assert_eq!(
            content.following_posts(&graph, ids[0]),
            vec![from_carol, from_bob]
        );
    }

    #[test]
    fn test_following_posts_excludes_own_posts() {
        let (mut graph, mut content, ids) = setup();
        content.create_post(ids[0], "mine");
        graph.follow(ids[0], ids[1]);
        assert!(content.following_posts(&graph, ids[0]).is_empty());
    }
}
