//! gitshelf - browse collections of bare git repositories from the shell.
//!
//! # Usage
//! ```bash
//! gitshelf --root /srv/git repos                     # List repositories
//! gitshelf --root /srv/git refs project.git
//! gitshelf --root /srv/git log project.git --limit 20
//! gitshelf --root /srv/git tree project.git src
//! gitshelf --root /srv/git diff project.git v1 v2
//! gitshelf --root /srv/git blame project.git README.md
//! ```
//!
//! Every command prints the result as JSON on stdout.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gitshelf::git::{discover_repositories, sanitize_path, validate_repo_name};
use gitshelf::GitRepository;

/// Read-only browsing for collections of bare git repositories
#[derive(Parser)]
#[command(name = "gitshelf")]
#[command(about = "Browse bare git repositories: history, trees, diffs, blame", long_about = None)]
struct Cli {
    /// Directory holding the bare repositories
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List bare repositories under the root
    Repos,
    /// List references with the commit each one points at
    Refs {
        /// Repository name under the root
        name: String,
    },
    /// Walk commit history from a ref
    Log {
        name: String,
        /// Ref to start from
        #[arg(long, default_value = "HEAD")]
        r#ref: String,
        /// Commits to skip before collecting
        #[arg(long, default_value = "0")]
        skip: usize,
        /// Maximum commits to return
        #[arg(long, default_value = "50")]
        limit: usize,
    },
    /// Show one commit with its full change set
    Show {
        name: String,
        /// Commit-ish spec
        commit: String,
    },
    /// List a directory or print a file at a path
    Tree {
        name: String,
        /// Path inside the repository, empty for the root
        #[arg(default_value = "")]
        path: String,
        #[arg(long, default_value = "HEAD")]
        r#ref: String,
    },
    /// Diff two commit-ish refs, oldest first
    Diff {
        name: String,
        /// Defaults to the commit before HEAD
        ref1: Option<String>,
        /// Defaults to HEAD
        ref2: Option<String>,
        #[arg(long, default_value = "3")]
        context: u32,
        #[arg(long, default_value = "0")]
        interhunk: u32,
    },
    /// Per-line authorship for a file at a ref
    Blame {
        name: String,
        path: String,
        #[arg(long, default_value = "HEAD")]
        r#ref: String,
    },
    /// Print the libgit2 version
    Version,
}

fn open_repo(root: &Path, name: &str) -> anyhow::Result<GitRepository> {
    // names are joined onto the root, so traversal characters are rejected
    if !validate_repo_name(name) {
        anyhow::bail!("invalid repository name: {}", name);
    }
    Ok(GitRepository::open(root.join(name))?)
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Repos => {
            print_json(&discover_repositories(&cli.root, None))?;
        }
        Commands::Refs { name } => {
            let repo = open_repo(&cli.root, &name)?;
            print_json(&repo.list_references()?)?;
        }
        Commands::Log { name, r#ref, skip, limit } => {
            let repo = open_repo(&cli.root, &name)?;
            print_json(&repo.get_commits(&r#ref, skip, limit)?)?;
        }
        Commands::Show { name, commit } => {
            let repo = open_repo(&cli.root, &name)?;
            print_json(&repo.get_commit(&commit)?)?;
        }
        Commands::Tree { name, path, r#ref } => {
            let repo = open_repo(&cli.root, &name)?;
            let path = sanitize_path(&path)?;
            print_json(&repo.resolve_path(&r#ref, &path)?)?;
        }
        Commands::Diff { name, ref1, ref2, context, interhunk } => {
            let repo = open_repo(&cli.root, &name)?;
            print_json(&repo.get_diff(ref1.as_deref(), ref2.as_deref(), context, interhunk)?)?;
        }
        Commands::Blame { name, path, r#ref } => {
            let repo = open_repo(&cli.root, &name)?;
            let path = sanitize_path(&path)?;
            print_json(&repo.get_blame(&r#ref, &path)?)?;
        }
        Commands::Version => {
            println!("libgit2 {}", gitshelf::backend_version());
        }
    }

    Ok(())
}
