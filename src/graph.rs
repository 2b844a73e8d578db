//! The social graph: a user arena and the directed follow relation.

use crate::types::{SocialError, User, UserId, validate_username};

/// Owns the set of users and their follow/follower edges.
///
/// Users are arena-allocated and addressed by [`UserId`]; edges are lists of
/// ids on both endpoints, kept mutually consistent by [`follow`] and
/// [`unfollow`]. Lookup is a linear scan, which is fine at the scale this
/// serves.
///
/// [`follow`]: GraphStore::follow
/// [`unfollow`]: GraphStore::unfollow
#[derive(Debug, Default)]
pub struct GraphStore {
    users: Vec<User>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a user with no edges. Rejects invalid and duplicate names.
    pub fn add_user(&mut self, name: &str) -> Result<UserId, SocialError> {
        validate_username(name).map_err(SocialError::Validation)?;
        if self.find_user(name).is_some() {
            return Err(SocialError::DuplicateUser(name.to_string()));
        }
        self.users.push(User::new(name));
        Ok(UserId(self.users.len() - 1))
    }

    /// Exact, case-sensitive lookup.
    pub fn find_user(&self, name: &str) -> Option<UserId> {
        self.users
            .iter()
            .position(|u| u.username == name)
            .map(UserId)
    }

    pub fn user(&self, id: UserId) -> &User {
        &self.users[id.0]
    }

    /// All users in arena (signup) order.
    pub fn users(&self) -> impl Iterator<Item = (UserId, &User)> {
        self.users.iter().enumerate().map(|(i, u)| (UserId(i), u))
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Add a follow edge from `a` to `b`, updating both endpoints.
    ///
    /// Self-follows and duplicate edges are no-ops. Returns whether an edge
    /// was added, so callers can skip persisting a no-op.
    pub fn follow(&mut self, a: UserId, b: UserId) -> bool {
        if a == b || self.is_following(a, b) {
            return false;
        }
        self.users[a.0].following.push(b);
        if !self.is_followed_by(b, a) {
            self.users[b.0].followers.push(a);
        }
        true
    }

    /// Remove the follow edge from `a` to `b` on both endpoints. No-op if
    /// the edge does not exist.
    pub fn unfollow(&mut self, a: UserId, b: UserId) -> bool {
        if !self.is_following(a, b) {
            return false;
        }
        self.users[a.0].following.retain(|&id| id != b);
        self.users[b.0].followers.retain(|&id| id != a);
        true
    }

    /// Does `a` follow `b`?
    pub fn is_following(&self, a: UserId, b: UserId) -> bool {
        self.users[a.0].following.contains(&b)
    }

    /// Is `a` followed by `b`?
    pub fn is_followed_by(&self, a: UserId, b: UserId) -> bool {
        self.users[a.0].followers.contains(&b)
    }

    /// Users by descending follower count. The sort is stable: ties keep
    /// arena order. The arena itself is never reordered, since ids and the
    /// persisted line order depend on it.
    pub fn sorted_by_follower_count(&self) -> Vec<UserId> {
        let mut ids: Vec<UserId> = (0..self.users.len()).map(UserId).collect();
        ids.sort_by_key(|id| std::cmp::Reverse(self.users[id.0].followers.len()));
        ids
    }
}
