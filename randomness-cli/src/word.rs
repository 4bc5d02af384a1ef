use std::path::PathBuf;

use clap::Subcommand;
use randomness_lib::{
    CapitalizationMode, Configurable, Dictionary, Record, Repository, Result, Scheme, WordScheme,
    WordSettingsComponent,
    table::{Action, Hooks, Message},
};

use crate::{
    scheme::{self, GenerateArgs, SchemesCommand, print_field},
    table,
};

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate random words
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
    },
    /// Manage the dictionaries of the current scheme
    #[command(subcommand)]
    Dictionaries(DictionariesCommand),
    /// Manage word schemes
    #[command(subcommand)]
    Schemes(SchemesCommand),
}

#[derive(Subcommand, Debug, Clone)]
pub enum DictionariesCommand {
    /// List dictionaries
    List,
    /// Add a dictionary file with one word per line
    Add { path: PathBuf },
    /// Remove user dictionaries
    Remove { names: Vec<String> },
    /// Use dictionaries when generating
    Activate { names: Vec<String> },
    /// Stop using dictionaries when generating
    Deactivate { names: Vec<String> },
    /// Copy a user dictionary under a new name
    Copy { name: String, new_name: String },
    /// Move a dictionary up
    MoveUp { name: String },
    /// Move a dictionary down
    MoveDown { name: String },
}

impl Command {
    pub fn persists(&self) -> bool {
        match self {
            Self::Generate(_) | Self::Show => false,
            Self::Dictionaries(cmd) => !matches!(cmd, DictionariesCommand::List),
            Self::Schemes(cmd) => cmd.persists(),
            Self::Set { .. } => true,
        }
    }
}

pub fn handle(repo: &Repository, cmd: &Command) -> Result<()> {
    match cmd {
        Command::Generate(args) => scheme::generate::<WordScheme>(repo, args),
        Command::Show => {
            show(repo.settings().read().word.current_scheme());
            Ok(())
        }
        Command::Set {
            min_length,
            max_length,
            enclosure,
            capitalization,
        } => {
            let mut configurable =
                Configurable::new(repo.clone(), WordSettingsComponent::default());
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

            scheme::apply(configurable)
        }
        Command::Dictionaries(cmd) => handle_dictionaries(repo, cmd),
        Command::Schemes(cmd) => scheme::handle_schemes::<WordScheme>(repo, cmd),
    }
}

fn handle_dictionaries(repo: &Repository, cmd: &DictionariesCommand) -> Result<()> {
    let mut configurable =
        Configurable::new(repo.clone(), WordSettingsComponent::new(hooks(cmd)?));
    let editor = configurable.component_mut().dictionaries_mut();

    match cmd {
        DictionariesCommand::List => {
            table::list(editor, |dictionary| match dictionary.path() {
                Some(path) => path.display().to_string(),
                None => "(bundled)".into(),
            });
            return Ok(());
        }
        DictionariesCommand::Add { .. } => {
            editor.update(Message::AddPressed)?;
        }
        DictionariesCommand::Remove { names } => {
            table::on_selection(editor, names, Message::RemovePressed, "removed")?;
        }
        DictionariesCommand::Activate { names } => {
            table::set_activity(editor, names, true)?;
        }
        DictionariesCommand::Deactivate { names } => {
            table::set_activity(editor, names, false)?;
        }
        DictionariesCommand::Copy { name, .. } => {
            let copied =
                table::on_selection(editor, &[name.clone()], Message::CopyPressed, "copied")?;
            // The copy is selected now; give it its own name.
            if copied == Action::Changed {
                editor.update(Message::EditPressed)?;
            }
        }
        DictionariesCommand::MoveUp { name } => {
            table::on_selection(editor, &[name.clone()], Message::MoveUpPressed, "moved")?;
        }
        DictionariesCommand::MoveDown { name } => {
            table::on_selection(editor, &[name.clone()], Message::MoveDownPressed, "moved")?;
        }
    }

    scheme::apply(configurable)
}

/// Hooks that produce the records described by `cmd`. A dictionary file is checked before it
/// is offered to the table.
fn hooks(cmd: &DictionariesCommand) -> Result<Hooks<Dictionary>> {
    let hooks = WordSettingsComponent::default_hooks();

    Ok(match cmd.clone() {
        DictionariesCommand::Add { path } => {
            let dictionary = Dictionary::open_user(path)?;
            hooks.on_create(move || Some(dictionary.clone()))
        }
        DictionariesCommand::Copy { new_name, .. } => {
            hooks.on_edit(move |old: &Dictionary| Some(old.clone().with_name(new_name.clone())))
        }
        _ => hooks,
    })
}

fn show(scheme: &WordScheme) {
    print_field("name", scheme.name());
    print_field("minimum length", scheme.min_length);
    print_field("maximum length", scheme.max_length);
    print_field("enclosure", format!("{:?}", scheme.enclosure));
    print_field("capitalization", scheme.capitalization);
    print_field(
        "active dictionaries",
        scheme
            .dictionaries
            .iter()
            .filter(|e| e.active())
            .map(|e| e.record().name())
            .collect::<Vec<_>>()
            .join(", "),
    );
}
