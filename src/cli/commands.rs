// CLI command definitions

use super::cluster::{
    DescribeClusterCommand, EditClusterCommand, VerifyCredentialsCommand, WhoamiCommand,
};
use crate::cli::display::Reporter;
use crate::domain::config::SettingsOverrides;
use clap::{Args, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "rosa-kube",
    version,
    about = "Command line tool for managed OpenShift clusters on AWS",
    long_about = "A standalone CLI tool for inspecting and editing managed OpenShift clusters through the cluster management API"
)]
pub struct CliArgs {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

impl CliArgs {
    /// Parse the process arguments. Invalid arguments are reported like any
    /// other failure and exit 1; help and version output keep clap's handling.
    pub fn parse_or_exit() -> Self {
        Self::parse_from_or_exit(std::env::args_os())
    }

    pub fn parse_from_or_exit<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Self::try_parse_from(args) {
            Ok(args) => args,
            Err(e) => match parse_failure_code(&e) {
                Some(code) => {
                    Reporter::new().error(e.to_string().trim_end());
                    std::process::exit(code)
                }
                None => e.exit(),
            },
        }
    }
}

/// Exit code for a rejected command line, or `None` when clap is only
/// printing help or version information.
pub fn parse_failure_code(err: &clap::Error) -> Option<i32> {
    err.use_stderr().then_some(1)
}

/// Flags accepted by every command
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Enable interactive mode
    #[arg(short = 'i', long, global = true)]
    pub interactive: bool,

    /// Automatically answer yes to confirm operations
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Enable debug mode
    #[arg(long, global = true)]
    pub debug: bool,

    /// Use a specific AWS profile from your credential file
    #[arg(long, global = true, value_name = "PROFILE")]
    pub profile: Option<String>,

    /// Use a specific AWS region, overriding the AWS_REGION environment variable
    #[arg(long, global = true, value_name = "REGION")]
    pub region: Option<String>,

    /// Path to the configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl GlobalArgs {
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            config_path: self.config.clone(),
            profile: self.profile.clone(),
            region: self.region.clone(),
        }
    }
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Edit a specific resource
    #[command(subcommand)]
    Edit(EditCommands),

    /// Show details of a specific resource
    #[command(subcommand)]
    Describe(DescribeCommands),

    /// Display user account information
    Whoami(WhoamiCommand),

    /// Verify resources are configured correctly
    #[command(subcommand)]
    Verify(VerifyCommands),
}

#[derive(clap::Subcommand, Debug)]
pub enum EditCommands {
    /// Edit cluster
    Cluster(EditClusterCommand),
}

#[derive(clap::Subcommand, Debug)]
pub enum DescribeCommands {
    /// Show details of a cluster
    Cluster(DescribeClusterCommand),
}

#[derive(clap::Subcommand, Debug)]
pub enum VerifyCommands {
    /// Verify AWS credentials are valid
    Credentials(VerifyCredentialsCommand),
}

impl Commands {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        match self {
            Commands::Edit(EditCommands::Cluster(cmd)) => cmd.execute(global).await,
            Commands::Describe(DescribeCommands::Cluster(cmd)) => cmd.execute(global).await,
            Commands::Whoami(cmd) => cmd.execute(global).await,
            Commands::Verify(VerifyCommands::Credentials(cmd)) => cmd.execute(global).await,
        }
    }
}
