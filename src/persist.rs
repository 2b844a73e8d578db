//! Persistence capability: where the encoded users and posts text lives.
//!
//! The store of record is in-memory state; these are full-snapshot
//! rewrites after each mutation. There is no atomic rename and no
//! checksum, so a crash mid-write can leave a partial file. Known
//! limitation, documented rather than fixed.

use eyre::{Context, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Users file name inside the data directory.
const USERS_FILE: &str = "users.csv";

/// Posts file name inside the data directory.
const POSTS_FILE: &str = "posts.csv";

/// Where encoded store snapshots are read from and written to.
///
/// The service owns one of these behind a `Box`; tests substitute
/// [`MemoryPersister`] to assert exact on-disk text without a filesystem.
pub trait Persister {
    /// Read the users snapshot. Empty string if nothing was ever saved.
    fn load_users(&self) -> Result<String>;

    /// Read the posts snapshot. Empty string if nothing was ever saved.
    fn load_posts(&self) -> Result<String>;

    /// Replace the users snapshot.
    fn save_users(&mut self, data: &str) -> Result<()>;

    /// Replace the posts snapshot.
    fn save_posts(&mut self, data: &str) -> Result<()>;
}

/// File-backed persister over `users.csv` and `posts.csv` in a data
/// directory.
pub struct FilePersister {
    root: PathBuf,
}

impl FilePersister {
    /// Open a data directory, creating it and empty data files on first
    /// use.
    pub fn open(root: &Path) -> Result<Self> {
        fs::create_dir_all(root).context("Failed to create data directory")?;

        let users_path = root.join(USERS_FILE);
        let posts_path = root.join(POSTS_FILE);
        if !users_path.exists() {
            File::create(&users_path).context("Failed to create users.csv")?;
        }
        if !posts_path.exists() {
            File::create(&posts_path).context("Failed to create posts.csv")?;
        }

        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn users_path(&self) -> PathBuf {
        self.root.join(USERS_FILE)
    }

    pub fn posts_path(&self) -> PathBuf {
        self.root.join(POSTS_FILE)
    }
}

impl Persister for FilePersister {
    fn load_users(&self) -> Result<String> {
        fs::read_to_string(self.users_path()).context("Failed to read users.csv")
    }

    fn load_posts(&self) -> Result<String> {
        fs::read_to_string(self.posts_path()).context("Failed to read posts.csv")
    }

    fn save_users(&mut self, data: &str) -> Result<()> {
        fs::write(self.users_path(), data).context("Failed to write users.csv")
    }

    fn save_posts(&mut self, data: &str) -> Result<()> {
        fs::write(self.posts_path(), data).context("Failed to write posts.csv")
    }
}

/// In-memory persister for tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryPersister {
    pub users: String,
    pub posts: String,
}

impl MemoryPersister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from pre-seeded snapshot text, as if the files already
    /// existed on disk.
    pub fn with_data(users: &str, posts: &str) -> Self {
        Self {
            users: users.to_string(),
            posts: posts.to_string(),
        }
    }
}

impl Persister for MemoryPersister {
    fn load_users(&self) -> Result<String> {
        Ok(self.users.clone())
    }

    fn load_posts(&self) -> Result<String> {
        Ok(self.posts.clone())
    }

    fn save_users(&mut self, data: &str) -> Result<()> {
        self.users = data.to_string();
        Ok(())
    }

    fn save_posts(&mut self, data: &str) -> Result<()> {
        self.posts = data.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_data_files() {
        let temp_dir = TempDir::new().unwrap();
        let persister = FilePersister::open(temp_dir.path()).unwrap();
        assert!(persister.users_path().exists());
        assert!(persister.posts_path().exists());
        assert_eq!(persister.load_users().unwrap(), "");
        assert_eq!(persister.load_posts().unwrap(), "");
    }

    #[test]
    fn test_open_keeps_existing_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(USERS_FILE), "alice,,\n").unwrap();
        let persister = FilePersister::open(temp_dir.path()).unwrap();
        assert_eq!(persister.load_users().unwrap(), "alice,,\n");
    }

    #[test]
    fn test_save_is_a_full_rewrite() {
        let temp_dir = TempDir::new().unwrap();
        let mut persister = FilePersister::open(temp_dir.path()).unwrap();
        persister.save_posts("bob,hello,0\nbob,again,0\n").unwrap();
        persister.save_posts("bob,hello,1\n").unwrap();
        assert_eq!(persister.load_posts().unwrap(), "bob,hello,1\n");
    }

    #[test]
    fn test_memory_persister_round_trip() {
        let mut persister = MemoryPersister::new();
        persister.save_users("alice,,\n").unwrap();
        assert_eq!(persister.load_users().unwrap(), "alice,,\n");
        assert_eq!(persister.load_posts().unwrap(), "");
    }
}
