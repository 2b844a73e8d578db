//! Chirp: a tiny file-backed social network library.
//!
//! Chirp keeps a small social graph (users and follow edges) and a content
//! store (posts with like counts) in memory, persists both to flat
//! delimited files after every mutation, and exposes a cursor-navigable
//! feed over snapshots of the posts.
//!
//! # Example
//!
//! ```no_run
//! use chirp::{FeedScope, SocialMedia};
//! use std::path::Path;
//!
//! let mut social = SocialMedia::open_dir(Path::new(".")).unwrap();
//!
//! social.add_user("alice").unwrap();
//! social.add_user("bob").unwrap();
//! social.follow("alice", "bob").unwrap();
//! social.create_post("bob", "hello").unwrap();
//!
//! let alice = social.find_user("alice").unwrap();
//! let feed = social.feed_of(FeedScope::FollowingOnly, alice);
//! let post = feed.current().unwrap();
//! assert_eq!(social.post(post).text, "hello");
//!
//! social.like_current(&feed).unwrap();
//! ```

mod codec;
mod content;
mod feed;
mod graph;
mod persist;
mod service;
mod types;

// Re-export public API
pub use content::ContentStore;
pub use feed::{Feed, FeedStep};
pub use graph::GraphStore;
pub use persist::{FilePersister, MemoryPersister, Persister};
pub use service::SocialMedia;
pub use types::{
    ContentKind, FeedScope, Post, PostId, SocialError, User, UserId, ValidationError,
};
