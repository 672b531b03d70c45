use anyhow::Result;
use clap::{Parser, Subcommand};
use stow::areas::repository::Repository;
use stow::artifacts::core::{PagerWriter, should_page};
use stow::artifacts::objects::commit::Author;
use tracing_subscriber::EnvFilter;

const LOG_FILTER_ENV: &str = "STOW_LOG";

#[derive(Parser)]
#[command(
    name = "stow",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A minimal version-control engine",
    long_about = "Snapshot file trees, move between named branches \
    and shelve uncommitted edits in a stash.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command creates the .stow directory in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the working directory")]
        path: Option<String>,
    },
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "This command prints the raw bytes of an object in the repository."
    )]
    CatFile {
        #[arg(index = 1, help = "The object SHA to print")]
        sha: String,
    },
    #[command(
        name = "hash-object",
        about = "Hash a file and optionally write it to the object database"
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: String,
    },
    #[command(name = "add", about = "Add file contents to the index")]
    Add {
        #[arg(index = 1, required = true, help = "Files or directories to stage")]
        paths: Vec<String>,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command records the staged files as a new commit on the current branch."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
        #[arg(long, env = "STOW_AUTHOR_NAME", default_value = "unknown", help = "The author name")]
        author: String,
        #[arg(long, env = "STOW_AUTHOR_DATE", help = "The commit date instead of now")]
        date: Option<String>,
    },
    #[command(name = "status", about = "Show the working tree status")]
    Status,
    #[command(name = "log", about = "Show commit history from HEAD")]
    Log,
    #[command(
        name = "branch",
        about = "List branches, or create one at HEAD",
        long_about = "Without a name this command lists branches and marks the current one. \
        With a name it creates a branch pointing at the current commit."
    )]
    Branch {
        #[arg(index = 1, help = "The name of the branch to create")]
        name: Option<String>,
    },
    #[command(name = "checkout", about = "Switch to another branch")]
    Checkout {
        #[arg(index = 1, help = "The branch to switch to")]
        branch: String,
    },
    #[command(
        name = "stash",
        about = "Shelve uncommitted changes to tracked files",
        long_about = "Without a subcommand this command stashes every tracked file that differs \
        from the index and restores its staged content."
    )]
    Stash {
        #[command(subcommand)]
        command: Option<StashCommands>,
    },
}

#[derive(Subcommand)]
enum StashCommands {
    #[command(name = "push", about = "Stash modified tracked files")]
    Push,
    #[command(name = "pop", about = "Restore the most recent stash")]
    Pop,
    #[command(name = "list", about = "List stashed files")]
    List,
    #[command(name = "clear", about = "Drop every stash entry")]
    Clear,
}

fn open_repository(writer: Box<dyn std::io::Write>) -> Result<Repository> {
    let pwd = std::env::current_dir()?;

    Repository::new(&pwd.to_string_lossy(), writer)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { path } => {
            let mut repository = match path {
                Some(path) => Repository::new(path, Box::new(std::io::stdout()))?,
                None => open_repository(Box::new(std::io::stdout()))?,
            };

            repository.init().await?
        }
        Commands::CatFile { sha } => {
            let mut repository = open_repository(Box::new(std::io::stdout()))?;

            repository.cat_file(sha)?
        }
        Commands::HashObject { write, file } => {
            let mut repository = open_repository(Box::new(std::io::stdout()))?;

            repository.hash_object(file, *write)?
        }
        Commands::Add { paths } => {
            let mut repository = open_repository(Box::new(std::io::stdout()))?;

            repository.add(paths).await?
        }
        Commands::Commit {
            message,
            author,
            date,
        } => {
            let mut repository = open_repository(Box::new(std::io::stdout()))?;
            let author = match date {
                Some(date) => Author::new_with_timestamp(author.clone(), Author::parse_timestamp(date)?),
                None => Author::new(author.clone()),
            };

            repository.commit(message, author).await?
        }
        Commands::Status => {
            let mut repository = open_repository(Box::new(std::io::stdout()))?;

            repository.status().await?
        }
        Commands::Log => {
            if should_page() {
                let pager = minus::Pager::new();
                let mut repository =
                    open_repository(Box::new(PagerWriter::new(pager.clone())))?;

                repository.log()?;
                minus::page_all(pager)?
            } else {
                let mut repository = open_repository(Box::new(std::io::stdout()))?;

                repository.log()?
            }
        }
        Commands::Branch { name } => {
            let mut repository = open_repository(Box::new(std::io::stdout()))?;

            match name {
                Some(name) => repository.branch(name)?,
                None => repository.list_branches()?,
            }
        }
        Commands::Checkout { branch } => {
            let mut repository = open_repository(Box::new(std::io::stdout()))?;

            repository.checkout(branch).await?
        }
        Commands::Stash { command } => {
            let mut repository = open_repository(Box::new(std::io::stdout()))?;

            match command {
                None | Some(StashCommands::Push) => repository.stash_push().await?,
                Some(StashCommands::Pop) => repository.stash_pop()?,
                Some(StashCommands::List) => repository.stash_list()?,
                Some(StashCommands::Clear) => repository.stash_clear()?,
            }
        }
    }

    Ok(())
}
