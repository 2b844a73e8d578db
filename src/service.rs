//! The composition root: stores, persistence, and the operations the
//! console surface calls.

use crate::codec::{self, PostRecord, UserRecord};
use crate::content::ContentStore;
use crate::feed::Feed;
use crate::graph::GraphStore;
use crate::persist::{FilePersister, Persister};
use crate::types::{FeedScope, Post, PostId, SocialError, User, UserId};
use eyre::{Context, Result};
use std::path::Path;

/// The social media service.
///
/// Owns the graph and content stores plus the persistence capability.
/// Every mutating operation re-encodes the affected store and rewrites its
/// snapshot before returning; there is no batching and no dirty tracking.
pub struct SocialMedia {
    graph: GraphStore,
    content: ContentStore,
    persister: Box<dyn Persister>,
}

impl SocialMedia {
    /// Open a service over the given persister, reconstructing state from
    /// its snapshots.
    ///
    /// Loading is not a raw deserialize: user lines are parsed into
    /// edge-less users first, then both stored edge lists are replayed
    /// through [`GraphStore::follow`], so every invariant is re-established
    /// on the way in. Names that do not resolve, malformed lines, and posts
    /// with unknown authors are logged and dropped.
    pub fn open(persister: Box<dyn Persister>) -> Result<Self> {
        let mut service = Self {
            graph: GraphStore::new(),
            content: ContentStore::new(),
            persister,
        };
        service.load()?;
        Ok(service)
    }

    /// Open a service over `users.csv` / `posts.csv` in a data directory,
    /// creating them on first use.
    pub fn open_dir(root: &Path) -> Result<Self> {
        let persister = FilePersister::open(root).context("Failed to open data directory")?;
        Self::open(Box::new(persister))
    }

    fn load(&mut self) -> Result<()> {
        let users_text = self.persister.load_users().context("Failed to load users")?;

        // First pass: create every user without edges.
        let mut records: Vec<UserRecord> = Vec::new();
        for line in users_text.lines() {
            let Some(record) = codec::decode_user(line) else {
                continue;
            };
            if let Err(e) = self.graph.add_user(&record.username) {
                log::warn!("Dropping user line {:?}: {}", line, e);
                continue;
            }
            records.push(record);
        }

        // Second pass: replay both edge lists as follow calls. The
        // followers field is redundant with some other user's following
        // field, but follow is idempotent so replaying both is harmless.
        for record in &records {
            let Some(user) = self.graph.find_user(&record.username) else {
                continue;
            };
            for name in &record.following {
                match self.graph.find_user(name) {
                    Some(followed) => {
                        self.graph.follow(user, followed);
                    }
                    None => log::warn!("Dropping dangling follow edge {} -> {}", record.username, name),
                }
            }
            for name in &record.followers {
                match self.graph.find_user(name) {
                    Some(follower) => {
                        self.graph.follow(follower, user);
                    }
                    None => log::warn!("Dropping dangling follower edge {} <- {}", record.username, name),
                }
            }
        }

        let posts_text = self.persister.load_posts().context("Failed to load posts")?;
        for line in posts_text.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let Some(record) = codec::decode_post(line) else {
                log::warn!("Dropping malformed post line {:?}", line);
                continue;
            };
            match self.graph.find_user(&record.author) {
                Some(author) => {
                    self.content
                        .create_post_with_likes(author, &record.text, record.likes);
                }
                None => log::warn!("Dropping post by unknown author {:?}", record.author),
            }
        }

        Ok(())
    }

    /// Create a user and persist the user set.
    pub fn add_user(&mut self, name: &str) -> Result<UserId> {
        let id = self.graph.add_user(name).map_err(|e| eyre::eyre!(e))?;
        self.persist_users()?;
        Ok(id)
    }

    /// Exact, case-sensitive lookup.
    pub fn find_user(&self, name: &str) -> Option<UserId> {
        self.graph.find_user(name)
    }

    /// Resolve a name or fail with `UserNotFound`.
    pub fn resolve_user(&self, name: &str) -> Result<UserId> {
        self.graph
            .find_user(name)
            .ok_or_else(|| eyre::eyre!(SocialError::UserNotFound(name.to_string())))
    }

    /// Add a follow edge by name and persist if anything changed. Returns
    /// whether an edge was added (self-follows and existing edges are
    /// no-ops).
    pub fn follow(&mut self, follower: &str, followed: &str) -> Result<bool> {
        let a = self.resolve_user(follower)?;
        let b = self.resolve_user(followed)?;
        let changed = self.graph.follow(a, b);
        if changed {
            self.persist_users()?;
        }
        Ok(changed)
    }

    /// Remove a follow edge by name and persist if anything changed.
    pub fn unfollow(&mut self, follower: &str, followed: &str) -> Result<bool> {
        let a = self.resolve_user(follower)?;
        let b = self.resolve_user(followed)?;
        let changed = self.graph.unfollow(a, b);
        if changed {
            self.persist_users()?;
        }
        Ok(changed)
    }

    /// Create a post and persist the post set.
    pub fn create_post(&mut self, author: &str, text: &str) -> Result<PostId> {
        let author = self.resolve_user(author)?;
        let id = self.content.create_post(author, text);
        self.persist_posts()?;
        Ok(id)
    }

    /// Snapshot a feed for a viewer. The feed does not see posts created
    /// after this call.
    pub fn feed_of(&self, scope: FeedScope, viewer: UserId) -> Feed {
        let posts = match scope {
            FeedScope::AllPosts => self.content.all_posts(&self.graph),
            FeedScope::FollowingOnly => self.content.following_posts(&self.graph, viewer),
        };
        Feed::new(posts)
    }

    /// Like a post and persist the post set. Returns the new like count.
    pub fn like(&mut self, post: PostId) -> Result<u32> {
        let likes = self.content.like(post);
        self.persist_posts()?;
        Ok(likes)
    }

    /// Like the post under the feed cursor and persist the post set.
    /// Returns the new like count.
    pub fn like_current(&mut self, feed: &Feed) -> Result<u32> {
        let likes = feed
            .like_current(&mut self.content)
            .map_err(|e| eyre::eyre!(e))?;
        self.persist_posts()?;
        Ok(likes)
    }

    /// Users by descending follower count, ties in signup order.
    pub fn sorted_by_follower_count(&self) -> Vec<UserId> {
        self.graph.sorted_by_follower_count()
    }

    pub fn user(&self, id: UserId) -> &User {
        self.graph.user(id)
    }

    pub fn post(&self, id: PostId) -> &Post {
        self.content.post(id)
    }

    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    /// The persistence capability, for inspecting snapshot text.
    pub fn persister(&self) -> &dyn Persister {
        self.persister.as_ref()
    }

    fn persist_users(&mut self) -> Result<()> {
        let mut text = String::new();
        for (_, user) in self.graph.users() {
            let record = UserRecord {
                username: user.username.clone(),
                following: self.usernames(user.following()),
                followers: self.usernames(user.followers()),
            };
            text.push_str(&codec::encode_user(&record));
            text.push('\n');
        }
        self.persister
            .save_users(&text)
            .context("Failed to persist users")
    }

    fn persist_posts(&mut self) -> Result<()> {
        let mut text = String::new();
        for (_, post) in self.content.posts() {
            let record = PostRecord {
                author: self.graph.user(post.author).username.clone(),
                text: post.text.clone(),
                likes: post.likes,
            };
            text.push_str(&codec::encode_post(&record));
            text.push('\n');
        }
        self.persister
            .save_posts(&text)
            .context("Failed to persist posts")
    }

    fn usernames(&self, ids: &[UserId]) -> Vec<String> {
        ids.iter()
            .map(|&id| self.graph.user(id).username.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::MemoryPersister;

    fn open_empty() -> SocialMedia {
        SocialMedia::open(Box::new(MemoryPersister::new())).unwrap()
    }

    fn open_with(users: &str, posts: &str) -> SocialMedia {
        SocialMedia::open(Box::new(MemoryPersister::with_data(users, posts))).unwrap()
    }

    #[test]
    fn test_add_user_writes_through() {
        let mut service = open_empty();
        service.add_user("alice").unwrap();
        assert_eq!(service.persister().load_users().unwrap(), "alice,,\n");
    }

    #[test]
    fn test_follow_writes_both_edge_lists() {
        let mut service = open_empty();
        service.add_user("alice").unwrap();
        service.add_user("bob").unwrap();
        assert!(service.follow("alice", "bob").unwrap());
        assert_eq!(
            service.persister().load_users().unwrap(),
            "alice,bob|,\nbob,,alice|\n"
        );
    }

    #[test]
    fn test_unfollow_rewrites_snapshot() {
        let mut service = open_empty();
        service.add_user("alice").unwrap();
        service.add_user("bob").unwrap();
        service.follow("alice", "bob").unwrap();
        assert!(service.unfollow("alice", "bob").unwrap());
        assert_eq!(service.persister().load_users().unwrap(), "alice,,\nbob,,\n");
    }

    #[test]
    fn test_duplicate_follow_is_noop() {
        let mut service = open_empty();
        service.add_user("alice").unwrap();
        service.add_user("bob").unwrap();
        assert!(service.follow("alice", "bob").unwrap());
        assert!(!service.follow("alice", "bob").unwrap());
        assert_eq!(
            service.persister().load_users().unwrap(),
            "alice,bob|,\nbob,,alice|\n"
        );
    }

    #[test]
    fn test_follow_unknown_user_fails() {
        let mut service = open_empty();
        service.add_user("alice").unwrap();
        assert!(service.follow("alice", "nobody").is_err());
        assert!(service.follow("nobody", "alice").is_err());
    }

    #[test]
    fn test_create_post_and_like_write_through() {
        let mut service = open_empty();
        service.add_user("bob").unwrap();
        service.create_post("bob", "hello").unwrap();
        assert_eq!(service.persister().load_posts().unwrap(), "bob,hello,0\n");

        let bob = service.find_user("bob").unwrap();
        let feed = service.feed_of(FeedScope::AllPosts, bob);
        assert_eq!(service.like_current(&feed).unwrap(), 1);
        assert_eq!(service.persister().load_posts().unwrap(), "bob,hello,1\n");
    }

    #[test]
    fn test_load_reconstructs_edges_from_either_field() {
        // Only the followers field carries the edge; replay restores both
        // sides anyway.
        let service = open_with("alice,,\nbob,,alice|\n", "");
        let alice = service.find_user("alice").unwrap();
        let bob = service.find_user("bob").unwrap();
        assert!(service.graph().is_following(alice, bob));
        assert!(service.graph().is_followed_by(bob, alice));
    }

    #[test]
    fn test_load_drops_dangling_edge_names() {
        let service = open_with("alice,ghost|bob|,\nbob,,\n", "");
        let alice = service.find_user("alice").unwrap();
        let bob = service.find_user("bob").unwrap();
        assert_eq!(service.user(alice).following(), &[bob]);
    }

    #[test]
    fn test_load_drops_posts_with_unknown_author() {
        let service = open_with("alice,,\n", "ghost,boo,4\nalice,hi,2\n");
        assert_eq!(service.content().len(), 1);
        let alice = service.find_user("alice").unwrap();
        let posts = service.content().posts_by_user(alice);
        assert_eq!(service.post(posts[0]).text, "hi");
        assert_eq!(service.post(posts[0]).likes, 2);
    }

    #[test]
    fn test_load_drops_malformed_post_lines() {
        let service = open_with("alice,,\n", "alice,hi\nnot a post\nalice,ok,0\n");
        assert_eq!(service.content().len(), 1);
    }

    #[test]
    fn test_load_first_duplicate_username_wins() {
        let service = open_with("alice,,\nalice,,\nbob,,\n", "");
        assert_eq!(service.graph().len(), 2);
    }

    #[test]
    fn test_load_skips_blank_lines() {
        let service = open_with("\nalice,,\n\n", "\n");
        assert_eq!(service.graph().len(), 1);
        assert!(service.content().is_empty());
    }

    #[test]
    fn test_self_follow_in_file_is_dropped() {
        let service = open_with("alice,alice|,\n", "");
        let alice = service.find_user("alice").unwrap();
        assert!(service.user(alice).following().is_empty());
    }
}
