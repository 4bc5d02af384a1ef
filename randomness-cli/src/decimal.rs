use clap::Subcommand;
use randomness_lib::{
    Configurable, DecimalScheme, Repository, Result, Scheme, settings::SchemeComponent,
};

use crate::scheme::{self, GenerateArgs, SchemesCommand, print_field};

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate random decimals
    Generate(GenerateArgs),
    /// Show the current scheme
    Show,
    /// Change the current scheme
    Set {
        #[arg(long, allow_negative_numbers = true)]
        min_value: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        max_value: Option<f64>,
        /// Number of digits after the decimal separator
        #[arg(long)]
        decimals: Option<usize>,
        /// Separator between groups of thousands, empty for none
        #[arg(long)]
        grouping_separator: Option<String>,
        #[arg(long)]
        decimal_separator: Option<String>,
    },
    /// Manage decimal schemes
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
        Command::Generate(args) => scheme::generate::<DecimalScheme>(repo, args),
        Command::Show => {
            let settings = repo.settings().read();
            let scheme = settings.decimal.current_scheme();
            print_field("name", scheme.name());
            print_field("minimum value", scheme.min_value);
            print_field("maximum value", scheme.max_value);
            print_field("decimals", scheme.decimal_count);
            print_field("grouping separator", format!("{:?}", scheme.grouping_separator));
            print_field("decimal separator", format!("{:?}", scheme.decimal_separator));
            Ok(())
        }
        Command::Set {
            min_value,
            max_value,
            decimals,
            grouping_separator,
            decimal_separator,
        } => {
            let mut configurable =
                Configurable::new(repo.clone(), SchemeComponent::<DecimalScheme>::new());
            let scheme = configurable.component_mut().scheme_mut();
            if let Some(min_value) = min_value {
                scheme.min_value = *min_value;
            }
            if let Some(max_value) = max_value {
                scheme.max_value = *max_value;
            }
            if let Some(decimals) = decimals {
                scheme.decimal_count = *decimals;
            }
            if let Some(separator) = grouping_separator {
                scheme.grouping_separator.clone_from(separator);
            }
            if let Some(separator) = decimal_separator {
                scheme.decimal_separator.clone_from(separator);
            }

            scheme::apply(configurable)
        }
        Command::Schemes(cmd) => scheme::handle_schemes::<DecimalScheme>(repo, cmd),
    }
}
