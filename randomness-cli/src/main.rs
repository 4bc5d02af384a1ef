use clap::{Parser, Subcommand};
use randomness_lib::{
    CoreConfig, DecimalScheme, Error, Repository, Result, StringScheme, UuidScheme, WordScheme,
};
use sysexits::ExitCode;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod decimal;
mod scheme;
mod string;
mod table;
mod uuid;
mod word;

#[derive(Parser, Debug)]
#[command(name = "randomness")]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Operate on this scheme instead of the current one
    #[arg(short, long, global = true)]
    scheme: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Random strings built from symbol sets
    #[command(subcommand)]
    String(string::Command),
    /// Random words from dictionaries
    #[command(subcommand)]
    Word(word::Command),
    /// Random UUIDs
    #[command(subcommand)]
    Uuid(uuid::Command),
    /// Random decimal numbers
    #[command(subcommand)]
    Decimal(decimal::Command),
}

impl Command {
    fn persists(&self) -> bool {
        match self {
            Command::String(cmd) => cmd.persists(),
            Command::Word(cmd) => cmd.persists(),
            Command::Uuid(cmd) => cmd.persists(),
            Command::Decimal(cmd) => cmd.persists(),
        }
    }

    fn schemes(&self) -> Option<&scheme::SchemesCommand> {
        match self {
            Command::String(string::Command::Schemes(cmd))
            | Command::Word(word::Command::Schemes(cmd))
            | Command::Uuid(uuid::Command::Schemes(cmd))
            | Command::Decimal(decimal::Command::Schemes(cmd)) => Some(cmd),
            _ => None,
        }
    }

    fn select_override(&self, repo: &Repository, name: &str) -> Result<String> {
        match self {
            Command::String(_) => scheme::select_override::<StringScheme>(repo, name),
            Command::Word(_) => scheme::select_override::<WordScheme>(repo, name),
            Command::Uuid(_) => scheme::select_override::<UuidScheme>(repo, name),
            Command::Decimal(_) => scheme::select_override::<DecimalScheme>(repo, name),
        }
    }

    fn restore_override(&self, repo: &Repository, previous: &str) -> Result<()> {
        let persist = self.persists();
        match self {
            Command::String(_) => scheme::restore_override::<StringScheme>(repo, previous, persist),
            Command::Word(_) => scheme::restore_override::<WordScheme>(repo, previous, persist),
            Command::Uuid(_) => scheme::restore_override::<UuidScheme>(repo, previous, persist),
            Command::Decimal(_) => {
                scheme::restore_override::<DecimalScheme>(repo, previous, persist)
            }
        }
    }
}

fn main() -> ExitCode {
    // Human friendly panicking in release mode
    human_panic::setup_panic!();

    let cli = Cli::parse();

    let cfg = match CoreConfig::load() {
        Ok(cfg) => cfg,
        Err(err) => {
            let err = Error::from(err);
            scheme::report(&err);
            return exit_code(&err);
        }
    };

    // Logging goes to stderr so generated values can be piped
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log_filter));
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::TRACE)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    match run(&cli, cfg) {
        Ok(()) => ExitCode::Ok,
        Err(err) => {
            scheme::report(&err);
            exit_code(&err)
        }
    }
}

fn run(cli: &Cli, cfg: CoreConfig) -> Result<()> {
    let repo = Repository::from_config(cfg)?;

    execute(cli, &repo)
}

fn execute(cli: &Cli, repo: &Repository) -> Result<()> {
    let previous = match &cli.scheme {
        Some(name) => Some(cli.command.select_override(repo, name)?),
        None => None,
    };

    let result = match &cli.command {
        Command::String(cmd) => string::handle(repo, cmd),
        Command::Word(cmd) => word::handle(repo, cmd),
        Command::Uuid(cmd) => uuid::handle(repo, cmd),
        Command::Decimal(cmd) => decimal::handle(repo, cmd),
    };

    // A selection made by the command itself outlives the override.
    let selected = cli.command.schemes().is_some_and(|cmd| cmd.selects());
    if let Some(previous) = previous.filter(|_| !selected) {
        cli.command.restore_override(repo, &previous)?;
    }

    result
}

fn exit_code(err: &Error) -> ExitCode {
    match err {
        Error::Invalid(_) | Error::Generate(_) | Error::Settings(_) | Error::Table(_) => {
            ExitCode::DataErr
        }
        Error::Dictionary(_) => ExitCode::NoInput,
        Error::Fs(randomness_lib::fs::Error::Parse { .. }) => ExitCode::Config,
        Error::Fs(_) => ExitCode::IoErr,
    }
}
