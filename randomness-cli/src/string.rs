use clap::Subcommand;
use randomness_lib::{
    CapitalizationMode, Configurable, Record, Repository, Result, Scheme, StringScheme,
    StringSettingsComponent, SymbolSet,
    table::{Action, Hooks, Message},
};

use crate::{
    scheme::{self, GenerateArgs, SchemesCommand, print_field},
    table,
};

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate random strings
    Generate(GenerateArgs),
    /// Show the current scheme
    Show,
    /// Change the current scheme
    Set {
        #[arg(long)]
        min_length: Option<usize>,
        #[arg(long)]
        max_length: Option<usize>,
        #[arg(long)]
        enclosure: Option<String>,
        #[arg(long)]
        capitalization: Option<CapitalizationMode>,
        /// Leave out symbols that are easily confused, such as 0 and O
        #[arg(long)]
        exclude_look_alikes: Option<bool>,
    },
    /// Manage the symbol sets of the current scheme
    #[command(subcommand)]
    SymbolSets(SymbolSetsCommand),
    /// Manage string schemes
    #[command(subcommand)]
    Schemes(SchemesCommand),
}

#[derive(Subcommand, Debug, Clone)]
pub enum SymbolSetsCommand {
    /// List symbol sets
    List,
    /// Add a symbol set
    Add { name: String, symbols: String },
    /// Rename a symbol set or change its symbols
    Edit {
        name: String,
        #[arg(long)]
        new_name: Option<String>,
        #[arg(long)]
        symbols: Option<String>,
    },
    /// Remove symbol sets
    Remove { names: Vec<String> },
    /// Use symbol sets when generating
    Activate { names: Vec<String> },
    /// Stop using symbol sets when generating
    Deactivate { names: Vec<String> },
    /// Copy a symbol set under a new name
    Copy { name: String, new_name: String },
    /// Move a symbol set up
    MoveUp { name: String },
    /// Move a symbol set down
    MoveDown { name: String },
}

impl Command {
    pub fn persists(&self) -> bool {
        match self {
            Self::Generate(_) | Self::Show => false,
            Self::SymbolSets(cmd) => !matches!(cmd, SymbolSetsCommand::List),
            Self::Schemes(cmd) => cmd.persists(),
            Self::Set { .. } => true,
        }
    }
}

pub fn handle(repo: &Repository, cmd: &Command) -> Result<()> {
    match cmd {
        Command::Generate(args) => scheme::generate::<StringScheme>(repo, args),
        Command::Show => {
            show(repo.settings().read().string.current_scheme());
            Ok(())
        }
        Command::Set {
            min_length,
            max_length,
            enclosure,
            capitalization,
            exclude_look_alikes,
        } => {
            let mut configurable =
                Configurable::new(repo.clone(), StringSettingsComponent::default());
            let scheme = configurable.component_mut().scheme_mut();
            if let Some(min_length) = min_length {
                scheme.min_length = *min_length;
            }
            if let Some(max_length) = max_length {
                scheme.max_length = *max_length;
            }
            if let Some(enclosure) = enclosure {
                scheme.enclosure.clone_from(enclosure);
            }
            if let Some(capitalization) = capitalization {
                scheme.capitalization = *capitalization;
            }
            if let Some(exclude) = exclude_look_alikes {
                scheme.exclude_look_alike_symbols = *exclude;
            }

            scheme::apply(configurable)
        }
        Command::SymbolSets(cmd) => handle_symbol_sets(repo, cmd),
        Command::Schemes(cmd) => scheme::handle_schemes::<StringScheme>(repo, cmd),
    }
}

fn handle_symbol_sets(repo: &Repository, cmd: &SymbolSetsCommand) -> Result<()> {
    let mut configurable =
        Configurable::new(repo.clone(), StringSettingsComponent::new(hooks(cmd)));
    let editor = configurable.component_mut().symbol_sets_mut();

    match cmd {
        SymbolSetsCommand::List => {
            table::list(editor, |set| set.symbols().to_string());
            return Ok(());
        }
        SymbolSetsCommand::Add { .. } => {
            editor.update(Message::AddPressed)?;
        }
        SymbolSetsCommand::Edit { name, .. } => {
            table::on_selection(editor, &[name.clone()], Message::EditPressed, "edited")?;
        }
        SymbolSetsCommand::Remove { names } => {
            table::on_selection(editor, names, Message::RemovePressed, "removed")?;
        }
        SymbolSetsCommand::Activate { names } => {
            table::set_activity(editor, names, true)?;
        }
        SymbolSetsCommand::Deactivate { names } => {
            table::set_activity(editor, names, false)?;
        }
        SymbolSetsCommand::Copy { name, .. } => {
            let copied =
                table::on_selection(editor, &[name.clone()], Message::CopyPressed, "copied")?;
            // The copy is selected now; give it its own name.
            if copied == Action::Changed {
                editor.update(Message::EditPressed)?;
            }
        }
        SymbolSetsCommand::MoveUp { name } => {
            table::on_selection(editor, &[name.clone()], Message::MoveUpPressed, "moved")?;
        }
        SymbolSetsCommand::MoveDown { name } => {
            table::on_selection(editor, &[name.clone()], Message::MoveDownPressed, "moved")?;
        }
    }

    scheme::apply(configurable)
}

/// Hooks that produce the records described by `cmd`.
fn hooks(cmd: &SymbolSetsCommand) -> Hooks<SymbolSet> {
    let hooks = StringSettingsComponent::default_hooks();

    match cmd.clone() {
        SymbolSetsCommand::Add { name, symbols } => {
            hooks.on_create(move || Some(SymbolSet::new(name.clone(), symbols.clone())))
        }
        SymbolSetsCommand::Edit {
            new_name, symbols, ..
        } => hooks.on_edit(move |old: &SymbolSet| {
            Some(SymbolSet::new(
                new_name.clone().unwrap_or_else(|| old.name().to_string()),
                symbols.clone().unwrap_or_else(|| old.symbols().to_string()),
            ))
        }),
        SymbolSetsCommand::Copy { new_name, .. } => hooks
            .on_edit(move |old: &SymbolSet| Some(SymbolSet::new(new_name.clone(), old.symbols()))),
        _ => hooks,
    }
}

fn show(scheme: &StringScheme) {
    print_field("name", scheme.name());
    print_field("minimum length", scheme.min_length);
    print_field("maximum length", scheme.max_length);
    print_field("enclosure", format!("{:?}", scheme.enclosure));
    print_field("capitalization", scheme.capitalization);
    print_field("exclude look-alike symbols", scheme.exclude_look_alike_symbols);
    print_field(
        "active symbol sets",
        scheme
            .symbol_sets
            .iter()
            .filter(|e| e.active())
            .map(|e| e.record().name())
            .collect::<Vec<_>>()
            .join(", "),
    );
}
