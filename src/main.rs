//! Bankline terminal client
//!
//! Interactive shell over the client engine. Each command drives one view
//! controller; the mounted view is printed after every command.

use std::path::PathBuf;

use anyhow::Context;
use bankline::{
    generate_default_config, router::History, App, AppResult, Config, Credentials, LoggingConfig,
    PopDirection, Registration, StateStorage, Transport,
};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bankline")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Personal banking client for an Account Service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (default: ~/.config/bankline/config.toml or ./bankline.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Account Service base URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Directory holding the saved session
    #[arg(long, global = true)]
    state_dir: Option<String>,

    /// Keep the session in memory only
    #[arg(long, global = true)]
    ephemeral: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive shell (default)
    Shell,

    /// Print a default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Config { output }) = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("Wrote default config to {}", path.display());
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    if let Some(dir) = cli.state_dir {
        config.storage.state_dir = dir;
    }

    init_logging(&config.logging);
    tracing::info!("Bankline client v{}", env!("CARGO_PKG_VERSION"));

    let input = BufReader::new(tokio::io::stdin());
    if cli.ephemeral {
        let mut app = bankline::app::connect_ephemeral(&config).await?;
        run_shell(&mut app, input).await
    } else {
        let mut app = bankline::app::connect(&config).await?;
        run_shell(&mut app, input).await
    }
}

/// Logs go to stderr so they never interleave with rendered views
fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("bankline={}", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Read commands until `quit` or end of input. A failed command is
/// reported inline and the shell keeps reading.
async fn run_shell<T, S, H, R>(app: &mut App<T, S, H>, input: R) -> anyhow::Result<()>
where
    T: Transport,
    S: StateStorage,
    H: History,
    R: AsyncBufRead + Unpin,
{
    println!("{}", app.surface());
    println!("Type `help` for commands.");

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let command = match ShellCommand::parse(&line) {
            Ok(Some(ShellCommand::Quit)) => break,
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(usage) => {
                println!("{}", usage);
                continue;
            }
        };

        match execute(app, command).await {
            Ok(true) => println!("{}", app.surface()),
            Ok(false) => {}
            Err(e) => {
                tracing::error!(error = %e, "Command failed");
                println!("Error: {}", e);
            }
        }
    }

    Ok(())
}

/// Run one command; `Ok(true)` when the surface should be printed
async fn execute<T, S, H>(app: &mut App<T, S, H>, command: ShellCommand) -> AppResult<bool>
where
    T: Transport,
    S: StateStorage,
    H: History,
{
    match command {
        ShellCommand::Quit => return Ok(false),
        ShellCommand::Help => {
            println!("{}", HELP);
            return Ok(false);
        }
        ShellCommand::Show => {}
        ShellCommand::Open(path) => app.navigate(&path).await?,
        ShellCommand::Back => app.pop_state(PopDirection::Back).await?,
        ShellCommand::Forward => app.pop_state(PopDirection::Forward).await?,
        ShellCommand::Login(credentials) => app.login(credentials).await?,
        ShellCommand::Register(registration) => app.register(registration).await?,
        ShellCommand::Refresh => app.refresh().await?,
        ShellCommand::Add => app.add_transaction_dialog(),
        ShellCommand::Set(field, value) => {
            if !app.surface().dialog().is_open() {
                println!("No transaction dialog open; use `add` first");
                return Ok(false);
            }
            let draft = app.transaction_draft_mut();
            match field {
                DraftField::Date => draft.date = value,
                DraftField::Object => draft.object = value,
                DraftField::Amount => draft.amount = value,
            }
        }
        ShellCommand::Confirm => app.confirm_transaction().await?,
        ShellCommand::Cancel => app.cancel_transaction(),
        ShellCommand::Logout => app.logout().await?,
    }
    Ok(true)
}

const HELP: &str = "\
open <path>                                   navigate to a route
back | forward                                move through history
login <user> <password>
register <user> <password> <currency> [balance] [description...]
refresh                                       reload the account
add                                           open the transaction dialog
set <date|object|amount> <value...>           fill the dialog
confirm | cancel                              submit or close the dialog
logout
show | help | quit";

#[derive(Debug, PartialEq)]
enum DraftField {
    Date,
    Object,
    Amount,
}

#[derive(Debug, PartialEq)]
enum ShellCommand {
    Open(String),
    Back,
    Forward,
    Login(Credentials),
    Register(Registration),
    Refresh,
    Add,
    Set(DraftField, String),
    Confirm,
    Cancel,
    Logout,
    Show,
    Help,
    Quit,
}

impl ShellCommand {
    /// `Ok(None)` for blank lines, `Err(usage)` for malformed commands
    fn parse(line: &str) -> Result<Option<Self>, String> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match (name, args.as_slice()) {
            ("open", [path]) => ShellCommand::Open(path.to_string()),
            ("back", []) => ShellCommand::Back,
            ("forward", []) => ShellCommand::Forward,
            ("login", [user, password]) => ShellCommand::Login(Credentials::new(*user, *password)),
            ("register", [user, password, currency, rest @ ..]) => {
                let mut registration = Registration::new(*user, *password, *currency);
                let mut rest = rest.iter();
                if let Some(balance) = rest.next() {
                    let balance = balance
                        .parse::<f64>()
                        .map_err(|_| format!("Invalid balance: {}", balance))?;
                    registration = registration.balance(balance);
                }
                let description: Vec<&str> = rest.copied().collect();
                if !description.is_empty() {
                    registration = registration.description(description.join(" "));
                }
                ShellCommand::Register(registration)
            }
            ("refresh", []) => ShellCommand::Refresh,
            ("add", []) => ShellCommand::Add,
            ("set", [field, value @ ..]) if !value.is_empty() => {
                let field = match *field {
                    "date" => DraftField::Date,
                    "object" => DraftField::Object,
                    "amount" => DraftField::Amount,
                    other => return Err(format!("Unknown field: {}", other)),
                };
                ShellCommand::Set(field, value.join(" "))
            }
            ("confirm", []) => ShellCommand::Confirm,
            ("cancel", []) => ShellCommand::Cancel,
            ("logout", []) => ShellCommand::Logout,
            ("show", []) => ShellCommand::Show,
            ("help", _) => ShellCommand::Help,
            ("quit" | "exit", []) => ShellCommand::Quit,
            _ => return Err(format!("Unrecognized command: {} (try `help`)", line.trim())),
        };
        Ok(Some(command))
    }
}
