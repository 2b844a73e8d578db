//! Cursor navigation over a snapshot of posts.

use crate::content::ContentStore;
use crate::types::{PostId, SocialError};

/// The result of trying to move the cursor. Hitting an end is a normal
/// signal for the caller to display, not an error, and never moves the
/// cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStep {
    Moved,
    /// `retreat` at position 0.
    FirstPost,
    /// `advance` at the final position.
    LastPost,
}

/// A cursor over an ordered snapshot of posts.
///
/// The sequence is captured when the feed is opened; posts created
/// afterwards are not visible until a new feed is opened. Position starts
/// at 0 and always stays in bounds while the sequence is non-empty.
#[derive(Debug)]
pub struct Feed {
    posts: Vec<PostId>,
    position: usize,
}

impl Feed {
    pub fn new(posts: Vec<PostId>) -> Self {
        Self { posts, position: 0 }
    }

    /// The post under the cursor.
    pub fn current(&self) -> Result<PostId, SocialError> {
        self.posts
            .get(self.position)
            .copied()
            .ok_or(SocialError::EmptyFeed)
    }

    /// Move one post forward, or report the end.
    pub fn advance(&mut self) -> FeedStep {
        if self.position + 1 < self.posts.len() {
            self.position += 1;
            FeedStep::Moved
        } else {
            FeedStep::LastPost
        }
    }

    /// Move one post back, or report the start.
    pub fn retreat(&mut self) -> FeedStep {
        if self.position > 0 {
            self.position -= 1;
            FeedStep::Moved
        } else {
            FeedStep::FirstPost
        }
    }

    /// Like the post under the cursor. Write-through persistence is the
    /// caller's job; this only touches in-memory state.
    pub fn like_current(&self, content: &mut ContentStore) -> Result<u32, SocialError> {
        Ok(content.like(self.current()?))
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}
