use clap::Subcommand;
use randomness_lib::{
    CapitalizationMode, Configurable, Repository, Result, Scheme, UuidScheme,
    settings::SchemeComponent,
};

use crate::scheme::{self, GenerateArgs, SchemesCommand, print_field};

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate random UUIDs
    Generate(GenerateArgs),
    /// Show the current scheme
    Show,
    /// Change the current scheme
    Set {
        #[arg(long)]
        enclosure: Option<String>,
        #[arg(long)]
        capitalization: Option<CapitalizationMode>,
        /// Separate the groups of hexadecimal digits with dashes
        #[arg(long)]
        dashes: Option<bool>,
    },
    /// Manage UUID schemes
    #[command(subcommand)]
    Schemes(SchemesCommand),
}

impl Command {
    pub fn persists(&self) -> bool {
        match self {
            Self::Generate(_) | Self::Show => false,
            Self::Schemes(cmd) => cmd.persists(),
            Self::Set { .. } => true,
        }
    }
}

pub fn handle(repo: &Repository, cmd: &Command) -> Result<()> {
    match cmd {
        Command::Generate(args) => scheme::generate::<UuidScheme>(repo, args),
        Command::Show => {
            let settings = repo.settings().read();
            let scheme = settings.uuid.current_scheme();
            print_field("name", scheme.name());
            print_field("enclosure", format!("{:?}", scheme.enclosure));
            print_field("capitalization", scheme.capitalization);
            print_field("dashes", scheme.add_dashes);
            Ok(())
        }
        Command::Set {
            enclosure,
            capitalization,
            dashes,
        } => {
            let mut configurable =
                Configurable::new(repo.clone(), SchemeComponent::<UuidScheme>::new());
            let scheme = configurable.component_mut().scheme_mut();
            if let Some(enclosure) = enclosure {
                scheme.enclosure.clone_from(enclosure);
            }
            if let Some(capitalization) = capitalization {
                scheme.capitalization = *capitalization;
            }
            if let Some(dashes) = dashes {
                scheme.add_dashes = *dashes;
            }

            scheme::apply(configurable)
        }
        Command::Schemes(cmd) => scheme::handle_schemes::<UuidScheme>(repo, cmd),
    }
}
