//! Core data types for the chirp social graph.

/// Index of a user in the graph arena.
///
/// Ids are stable for the lifetime of a store: users are never deleted,
/// only their edges change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub(crate) usize);

/// Index of a post in the content arena. Arena order is global creation
/// order and is the order the posts file is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostId(pub(crate) usize);

/// A member of the social graph.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Unique, case-sensitive identifier. Immutable after creation.
    pub username: String,

    /// Users this user follows, in the order the edges were added.
    /// Duplicate-free; never contains the user itself.
    pub(crate) following: Vec<UserId>,

    /// Inverse of `following` across the graph. Same ordering rules.
    pub(crate) followers: Vec<UserId>,
}

impl User {
    pub(crate) fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
            following: Vec::new(),
            followers: Vec::new(),
        }
    }

    /// Users this user follows, in edge-insertion order.
    pub fn following(&self) -> &[UserId] {
        &self.following
    }

    /// Users following this user, in edge-insertion order.
    pub fn followers(&self) -> &[UserId] {
        &self.followers
    }
}

/// A piece of content in the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    /// The authoring user. Set at creation, immutable.
    pub author: UserId,

    /// Freeform text. Not re-parsed, but the persisted encoding splits on
    /// commas, so a comma in here will not survive a round trip.
    pub text: String,

    /// Like counter. Starts at 0, only ever incremented.
    pub likes: u32,

    /// What kind of content this is.
    pub kind: ContentKind,
}

/// Content kinds. Only posts exist today; the tag leaves room for other
/// kinds (comments, reposts) without a breaking change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Post,
}

/// Which posts a feed is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedScope {
    /// Every post in the store, in user-iteration order.
    AllPosts,
    /// Only posts from users the viewer follows.
    FollowingOnly,
}

/// Validation errors for usernames.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptyUsername,
    /// Username contains a character the wire format reserves.
    ReservedCharacter(char),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyUsername => write!(f, "username cannot be empty"),
            ValidationError::ReservedCharacter(c) => {
                write!(f, "username cannot contain {:?}", c)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check a username against the characters the line format reserves.
pub fn validate_username(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyUsername);
    }
    for c in name.chars() {
        if c == ',' || c == '|' || c == '\n' || c == '\r' {
            return Err(ValidationError::ReservedCharacter(c));
        }
    }
    Ok(())
}

/// Errors that can occur during social graph operations.
#[derive(Debug)]
pub enum SocialError {
    /// Signup with a username that already exists.
    DuplicateUser(String),
    /// A username did not resolve to a user.
    UserNotFound(String),
    /// Navigating a feed with zero posts.
    EmptyFeed,
    /// Validation error.
    Validation(ValidationError),
}

impl std::fmt::Display for SocialError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SocialError::DuplicateUser(name) => write!(f, "user already exists: {}", name),
            SocialError::UserNotFound(name) => write!(f, "user not found: {}", name),
            SocialError::EmptyFeed => write!(f, "feed has no posts"),
            SocialError::Validation(e) => write!(f, "validation error: {}", e),
        }
    }
}

impl std::error::Error for SocialError {}
