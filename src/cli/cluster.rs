//! Cluster commands

use crate::cli::display::{Reporter, TableRenderer};
use crate::cli::prompt::TerminalPrompter;
use crate::cli::GlobalArgs;
use crate::domain::cluster::{
    is_interactive, parse_duration, resolve_cluster_key, resolve_expiration, ClusterDescriptor,
    ClusterKey, EditOutcome, EditRequest, PRIVATE_FIELD,
};
use crate::domain::config::Settings;
use crate::infrastructure::aws::{AwsClient, AwsClientBuilder, CloudProviderClient};
use crate::infrastructure::ocm::OcmClient;
use crate::shared::error::RosaError;
use chrono::{DateTime, Utc};
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(after_help = "Examples:
  # Edit a cluster named \"mycluster\" to make it private
  rosa-kube edit cluster mycluster --private

  # Edit all options interactively
  rosa-kube edit cluster -c mycluster --interactive")]
pub struct EditClusterCommand {
    /// Name or ID of the cluster to edit
    #[arg(value_name = "CLUSTER")]
    pub args: Vec<String>,

    /// Name or ID of the cluster to edit
    #[arg(long = "cluster", short = 'c', value_name = "CLUSTER")]
    pub cluster: Option<String>,

    /// Specific time when cluster should expire (RFC3339).
    /// Only one of expiration-time / expiration may be used.
    #[arg(long, hide = true, value_name = "RFC3339")]
    pub expiration_time: Option<String>,

    /// Expire cluster after a relative duration like 2h, 8h, 72h.
    /// Only one of expiration-time / expiration may be used.
    #[arg(long, hide = true, value_name = "DURATION", value_parser = parse_duration)]
    pub expiration: Option<chrono::Duration>,

    /// Restrict master API endpoint to direct, private connectivity.
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub private: Option<bool>,
}

#[derive(Parser, Debug, Clone)]
pub struct DescribeClusterCommand {
    /// Name or ID of the cluster to describe
    #[arg(value_name = "CLUSTER")]
    pub args: Vec<String>,

    /// Name or ID of the cluster to describe
    #[arg(long = "cluster", short = 'c', value_name = "CLUSTER")]
    pub cluster: Option<String>,

    /// Output format
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

#[derive(Parser, Debug, Clone)]
pub struct WhoamiCommand {}

#[derive(Parser, Debug, Clone)]
pub struct VerifyCredentialsCommand {}

async fn open_cloud(settings: &Settings) -> anyhow::Result<AwsClient> {
    AwsClientBuilder::from_conf(&settings.aws)
        .build()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create AWS client: {}", e))
}

/// Open both remote clients. The cluster management connection is released
/// when the returned descriptor is dropped.
async fn open_descriptor(settings: &Settings) -> anyhow::Result<ClusterDescriptor> {
    let clusters = OcmClient::connect(&settings.api)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create OCM connection: {}", e))?;

    let cloud = open_cloud(settings).await?;

    Ok(ClusterDescriptor::new(Box::new(clusters), Box::new(cloud)))
}

impl EditClusterCommand {
    /// Mutation flags present on the command line
    pub fn changed_flags(&self) -> Vec<&'static str> {
        let mut changed = Vec::new();
        if self.private.is_some() {
            changed.push(PRIVATE_FIELD.flag);
        }
        changed
    }

    /// Validate the invocation without touching the network.
    pub fn resolve(&self, global: &GlobalArgs, now: DateTime<Utc>) -> Result<EditRequest, RosaError> {
        let key = resolve_cluster_key(self.cluster.as_deref(), &self.args)?;
        let expiration = resolve_expiration(self.expiration_time.as_deref(), self.expiration, now)?;

        Ok(EditRequest {
            key,
            expiration,
            private: self.private,
            interactive: is_interactive(global.interactive, &self.changed_flags()),
            interactive_requested: global.interactive,
            assume_yes: global.yes,
        })
    }

    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let reporter = Reporter::new();
        let request = self.resolve(global, Utc::now())?;

        let settings = Settings::load(&global.overrides())?;
        let descriptor = open_descriptor(&settings).await?;

        if request.interactive_requested {
            reporter.info(
                "Interactive mode enabled.\n\
                 Any optional fields can be ignored and will not be updated.",
            );
        }

        let prompter = TerminalPrompter::new(reporter.clone());
        match descriptor.edit_cluster(&request, &prompter).await? {
            EditOutcome::Updated(_) => reporter.info(format!("Updated cluster '{}'", request.key)),
            EditOutcome::Declined => {
                tracing::debug!("Edit of cluster '{}' declined", request.key)
            }
        }
        Ok(())
    }
}

impl DescribeClusterCommand {
    pub fn resolve_key(&self) -> Result<ClusterKey, RosaError> {
        resolve_cluster_key(self.cluster.as_deref(), &self.args)
    }

    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let key = self.resolve_key()?;
        let settings = Settings::load(&global.overrides())?;
        let descriptor = open_descriptor(&settings).await?;

        let cluster = descriptor.describe_cluster(&key).await?;

        let output = match self.output {
            OutputFormat::Table => TableRenderer::new().render_cluster(&cluster),
            OutputFormat::Json => serde_json::to_string_pretty(&cluster)?,
            OutputFormat::Yaml => serde_yaml::to_string(&cluster)?,
        };
        println!("{}", output);
        Ok(())
    }
}

impl WhoamiCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let settings = Settings::load(&global.overrides())?;
        let cloud = open_cloud(&settings).await?;

        let identity = cloud
            .get_creator()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to get AWS creator: {}", e))?;

        println!(
            "{}",
            TableRenderer::new().render_identity(&identity, cloud.region())
        );
        Ok(())
    }
}

impl VerifyCredentialsCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let reporter = Reporter::new();
        let settings = Settings::load(&global.overrides())?;
        let cloud = open_cloud(&settings).await?;

        cloud
            .validate_credentials()
            .await
            .map_err(|e| anyhow::anyhow!("AWS credentials are invalid: {}", e))?;

        reporter.info("AWS credentials are valid!");
        Ok(())
    }
}
