use clap::{Args, Subcommand};
use colored::Colorize;
use randomness_lib::{Configurable, Error, Repository, Result, Scheme, SettingsComponent};

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// How many values to generate
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SchemesCommand {
    /// List schemes, marking the current one
    List,
    /// Add a scheme with default values
    Add { name: String },
    /// Remove a scheme
    Remove { name: String },
    /// Make a scheme current
    Select { name: String },
    /// Copy a scheme under a new name
    Copy { name: String, new_name: String },
}

impl SchemesCommand {
    pub fn persists(&self) -> bool {
        !matches!(self, Self::List)
    }

    /// Whether the command picks the current scheme itself.
    pub fn selects(&self) -> bool {
        matches!(self, Self::Select { .. })
    }
}

pub fn generate<S: Scheme>(repo: &Repository, args: &GenerateArgs) -> Result<()> {
    for value in repo.generate::<S>(args.count)? {
        println!("{value}");
    }

    Ok(())
}

pub fn handle_schemes<S: Scheme>(repo: &Repository, cmd: &SchemesCommand) -> Result<()> {
    if let SchemesCommand::List = cmd {
        let settings = repo.settings().read();
        let schemes = S::of(&settings);
        for scheme in schemes.schemes() {
            if scheme.name() == schemes.current_scheme_name() {
                println!("{} {}", "*".green(), scheme.name().bold());
            } else {
                println!("  {}", scheme.name());
            }
        }
        return Ok(());
    }

    {
        let mut settings = repo.settings().write();
        let schemes = S::of_mut(&mut settings);
        match cmd {
            SchemesCommand::List => {}
            SchemesCommand::Add { name } => schemes.add_scheme(S::default().copy_as(name))?,
            SchemesCommand::Remove { name } => {
                schemes.remove_scheme(name)?;
            }
            SchemesCommand::Select { name } => schemes.select(name)?,
            SchemesCommand::Copy { name, new_name } => schemes.copy_scheme(name, new_name)?,
        }
    }

    repo.save()
}

/// Make the scheme called `name` current for this invocation. Returns the name of the scheme
/// that was current before.
pub fn select_override<S: Scheme>(repo: &Repository, name: &str) -> Result<String> {
    let mut settings = repo.settings().write();
    let schemes = S::of_mut(&mut settings);
    let previous = schemes.current_scheme_name().to_string();
    schemes.select(name)?;

    Ok(previous)
}

/// Undo [`select_override`], persisting the restored selection if `persist` is set.
pub fn restore_override<S: Scheme>(repo: &Repository, previous: &str, persist: bool) -> Result<()> {
    let restored = S::of_mut(&mut repo.settings().write()).select(previous);
    if restored.is_err() {
        tracing::debug!("Scheme {previous} no longer exists, keeping the override selected");
        return Ok(());
    }

    if persist { repo.save() } else { Ok(()) }
}

/// Apply the unsaved state of `configurable`, or explain why it cannot be applied.
pub fn apply<C: SettingsComponent>(mut configurable: Configurable<C>) -> Result<()> {
    if !configurable.is_modified() {
        println!("{}", "Nothing changed".dimmed());
        return Ok(());
    }

    configurable.apply()?;
    println!("{}", "Settings applied".green());

    Ok(())
}

/// Print `err` for the user. Validation failures name the setting that needs attention.
pub fn report(err: &Error) {
    match err {
        Error::Invalid(info) => {
            eprintln!("{} {}", "invalid:".red().bold(), info);
            eprintln!("{} {}", "check:".yellow(), info.target());
        }
        err => eprintln!("{} {err}", "error:".red().bold()),
    }
}

pub fn print_field(name: &str, value: impl std::fmt::Display) {
    println!("{:>28} {value}", format!("{name}:").dimmed());
}
