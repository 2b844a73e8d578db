//! Shared test infrastructure for chirp integration tests.
//!
//! Provides TestEnv helper for consistent test setup/teardown.

#![allow(dead_code)]

use chirp::{PostId, SocialMedia, UserId};
use tempfile::TempDir;

/// Test environment with automatic cleanup.
pub struct TestEnv {
    pub temp_dir: TempDir,
    pub social: SocialMedia,
}

impl TestEnv {
    /// Create a new test environment over an empty data directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let social = SocialMedia::open_dir(temp_dir.path()).expect("Failed to open store");
        Self { temp_dir, social }
    }

    /// Sign up a user.
    pub fn signup(&mut self, name: &str) -> UserId {
        self.social.add_user(name).expect("Failed to add user")
    }

    /// Sign up several users at once.
    pub fn signup_all(&mut self, names: &[&str]) -> Vec<UserId> {
        names.iter().map(|n| self.signup(n)).collect()
    }

    /// Add a follow edge by name.
    pub fn follow(&mut self, follower: &str, followed: &str) {
        self.social
            .follow(follower, followed)
            .expect("Failed to follow");
    }

    /// Create a post.
    pub fn post(&mut self, author: &str, text: &str) -> PostId {
        self.social
            .create_post(author, text)
            .expect("Failed to create post")
    }

    /// Reopen the store from the same data directory, as a process restart
    /// would.
    pub fn reopen(&mut self) {
        self.social =
            SocialMedia::open_dir(self.temp_dir.path()).expect("Failed to reopen store");
    }

    /// Raw users.csv contents.
    pub fn users_file(&self) -> String {
        std::fs::read_to_string(self.temp_dir.path().join("users.csv"))
            .expect("Failed to read users.csv")
    }

    /// Raw posts.csv contents.
    pub fn posts_file(&self) -> String {
        std::fs::read_to_string(self.temp_dir.path().join("posts.csv"))
            .expect("Failed to read posts.csv")
    }

    /// Overwrite users.csv, simulating a pre-existing or corrupt file.
    pub fn write_users_file(&self, contents: &str) {
        std::fs::write(self.temp_dir.path().join("users.csv"), contents)
            .expect("Failed to write users.csv");
    }

    /// Overwrite posts.csv, simulating a pre-existing or corrupt file.
    pub fn write_posts_file(&self, contents: &str) {
        std::fs::write(self.temp_dir.path().join("posts.csv"), contents)
            .expect("Failed to write posts.csv");
    }
}
