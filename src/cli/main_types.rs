use crate::core::identity::TeamArgs;
use crate::core::services::types::OAuthProvider;
use clap::{ArgGroup, Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "manifold")]
#[command(about = "Command line interface tool for managing your Manifold account")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, env = "MANIFOLD_CONFIG_DIR")]
    pub config_dir: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Billing {
        #[command(subcommand)]
        command: BillingCommands,
    },
    Oauth(OAuthArgs),
}

#[derive(Subcommand, Debug)]
pub enum BillingCommands {
    /// Add a credit card
    Add(TeamFlags),
    /// Change the credit card on file
    Update(TeamFlags),
}

#[derive(Args, Debug, Clone, Default)]
pub struct TeamFlags {
    /// ID of the team to act as
    #[arg(long, value_name = "ID")]
    pub team: Option<String>,
    /// Act as yourself, ignoring the configured default team
    #[arg(long, conflicts_with = "team")]
    pub me: bool,
}

impl From<&TeamFlags> for TeamArgs {
    fn from(flags: &TeamFlags) -> Self {
        TeamArgs {
            team: flags.team.clone(),
            me: flags.me,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
#[command(group(ArgGroup::new("provider").multiple(false)))]
pub struct OAuthArgs {
    /// Use the web flow for GitHub authentication
    #[arg(long, group = "provider")]
    pub github: bool,
}

impl OAuthArgs {
    pub fn provider(&self) -> Option<OAuthProvider> {
        if self.github {
            return Some(OAuthProvider::Github);
        }
        None
    }
}
