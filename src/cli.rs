//! CLI argument parsing for chirp.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "chirp",
    about = "A tiny file-backed social network for your terminal",
    version,
    after_help = "Data lives in users.csv and posts.csv under the data directory."
)]
pub struct Cli {
    /// Path to the data directory (default: current directory)
    #[arg(short = 'd', long, global = true)]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a new user
    Signup {
        /// Username (no commas, pipes, or newlines)
        username: String,
    },

    /// Follow another user
    Follow {
        /// Who is following
        username: String,

        /// Who gets followed
        target: String,
    },

    /// Stop following another user
    Unfollow {
        /// Who is unfollowing
        username: String,

        /// Who gets unfollowed
        target: String,
    },

    /// Create a post
    Post {
        /// The authoring user
        username: String,

        /// Post text (commas will not survive the file format)
        text: String,
    },

    /// Show a user's profile
    Profile {
        username: String,
    },

    /// List a user's followers
    Followers {
        username: String,
    },

    /// List who a user follows
    Following {
        username: String,
    },

    /// List a user's posts
    Posts {
        username: String,
    },

    /// Browse the feed one post at a time
    Feed {
        /// The viewing user
        username: String,

        /// Only posts from followed users
        #[arg(short, long)]
        following: bool,
    },

    /// List users by follower count
    Top,
}
