//! chirp CLI - a tiny file-backed social network for your terminal.

use chirp::{Feed, FeedScope, FeedStep, SocialMedia, UserId};
use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::io::{BufRead, Write};
use std::path::PathBuf;

mod cli;

use cli::{Cli, Command};

fn setup_logging() -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("chirp")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("chirp.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn get_data_dir(cli: &Cli) -> PathBuf {
    cli.dir
        .clone()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn print_post(social: &SocialMedia, feed: &Feed) -> Result<()> {
    let post = social.post(feed.current().map_err(|e| eyre::eyre!(e))?);
    let author = &social.user(post.author).username;
    println!(
        "{} {}",
        format!("{}'s post:", author).cyan().bold(),
        post.text
    );
    println!(
        "{} {}",
        format!("{} likes", post.likes).green(),
        format!("({} of {})", feed.position() + 1, feed.len()).dimmed()
    );
    Ok(())
}

fn browse_feed(social: &mut SocialMedia, viewer: UserId, scope: FeedScope) -> Result<()> {
    let mut feed = social.feed_of(scope, viewer);

    if feed.is_empty() {
        let message = match scope {
            FeedScope::AllPosts => "No posts to display",
            FeedScope::FollowingOnly => "No posts from followed users",
        };
        println!("{}", message.dimmed());
        return Ok(());
    }

    let stdin = std::io::stdin();
    loop {
        print_post(social, &feed)?;
        print!("{} ", "[l]ike [n]ext [p]rev [q]uit:".yellow());
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let mut input = String::new();
        if stdin
            .lock()
            .read_line(&mut input)
            .context("Failed to read input")?
            == 0
        {
            break;
        }

        match input.trim() {
            "l" => {
                let likes = social.like_current(&feed)?;
                println!("{} Liked ({} likes)", "✓".green(), likes);
            }
            "n" => {
                if feed.advance() == FeedStep::LastPost {
                    println!("{}", "You've reached the last post".red());
                }
            }
            "p" => {
                if feed.retreat() == FeedStep::FirstPost {
                    println!("{}", "You're at the first post".red());
                }
            }
            "q" => break,
            other => println!("{} Unknown choice: {}", "✗".red(), other),
        }
    }

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let data_dir = get_data_dir(&cli);
    let mut social = SocialMedia::open_dir(&data_dir).context("Failed to open social store")?;

    match cli.command {
        Command::Signup { username } => {
            social.add_user(&username).context("Failed to sign up")?;
            println!("{} Created user {}", "✓".green(), username.cyan());
        }

        Command::Follow { username, target } => {
            let added = social
                .follow(&username, &target)
                .context("Failed to follow")?;
            if added {
                println!("{} {} now follows {}", "✓".green(), username.cyan(), target.cyan());
            } else {
                println!(
                    "{} {} already follows {}",
                    "✗".red(),
                    username.cyan(),
                    target.cyan()
                );
            }
        }

        Command::Unfollow { username, target } => {
            let removed = social
                .unfollow(&username, &target)
                .context("Failed to unfollow")?;
            if removed {
                println!(
                    "{} {} no longer follows {}",
                    "✓".green(),
                    username.cyan(),
                    target.cyan()
                );
            } else {
                println!(
                    "{} {} was not following {}",
                    "✗".red(),
                    username.cyan(),
                    target.cyan()
                );
            }
        }

        Command::Post { username, text } => {
            social
                .create_post(&username, &text)
                .context("Failed to create post")?;
            println!("{} Posted as {}", "✓".green(), username.cyan());
        }

        Command::Profile { username } => {
            let id = social.resolve_user(&username)?;
            let user = social.user(id);
            println!("{}: {}", "User".bold(), username.cyan());
            println!("{}: {}", "Following".bold(), user.following().len());
            println!("{}: {}", "Followers".bold(), user.followers().len());
            println!(
                "{}: {}",
                "Total posts".bold(),
                social.content().posts_by_user(id).len()
            );
        }

        Command::Followers { username } => {
            let id = social.resolve_user(&username)?;
            let followers = social.user(id).followers();
            if followers.is_empty() {
                println!("{}", "No followers".dimmed());
            } else {
                println!("{}", "Followers:".yellow());
                for &follower in followers {
                    println!("  {}", social.user(follower).username);
                }
            }
        }

        Command::Following { username } => {
            let id = social.resolve_user(&username)?;
            let following = social.user(id).following();
            if following.is_empty() {
                println!("{}", "Not following anyone".dimmed());
            } else {
                println!("{}", "Following:".yellow());
                for &followed in following {
                    println!("  {}", social.user(followed).username);
                }
            }
        }

        Command::Posts { username } => {
            let id = social.resolve_user(&username)?;
            let posts = social.content().posts_by_user(id);
            if posts.is_empty() {
                println!("{}", "No posts to display".dimmed());
            } else {
                for &post_id in posts {
                    let post = social.post(post_id);
                    println!("{} {}", post.text, format!("({} likes)", post.likes).green());
                }
            }
        }

        Command::Feed { username, following } => {
            let viewer = social.resolve_user(&username)?;
            let scope = if following {
                FeedScope::FollowingOnly
            } else {
                FeedScope::AllPosts
            };
            browse_feed(&mut social, viewer, scope)?;
        }

        Command::Top => {
            if social.graph().is_empty() {
                println!("{}", "No users yet".dimmed());
            } else {
                for id in social.sorted_by_follower_count() {
                    let user = social.user(id);
                    println!(
                        "{} {}",
                        user.username.as_str().cyan(),
                        format!("{} follower(s)", user.followers().len()).dimmed()
                    );
                }
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    info!("Command: {:?}", std::env::args().collect::<Vec<_>>());

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
