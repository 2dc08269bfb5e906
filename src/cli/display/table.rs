//! Table rendering for CLI output

use super::{ColorTheme, StatusIcon};
use crate::domain::cluster::{CallerIdentity, Cluster};
use chrono::{DateTime, Utc};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};

/// Table renderer for formatted output
pub struct TableRenderer {
    theme: ColorTheme,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer {
    /// Create a new table renderer with default theme
    pub fn new() -> Self {
        Self {
            theme: ColorTheme::default(),
        }
    }

    fn key_value_table() -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("FIELD").set_alignment(CellAlignment::Left),
                Cell::new("VALUE").set_alignment(CellAlignment::Left),
            ]);
        table
    }

    /// Render a single cluster as a two-column table
    pub fn render_cluster(&self, cluster: &Cluster) -> String {
        let state = cluster.state.as_deref();
        let private = cluster.is_private();

        let mut table = Self::key_value_table();
        table.add_row(vec![Cell::new("Name"), Cell::new(&cluster.name)]);
        table.add_row(vec![Cell::new("ID"), Cell::new(&cluster.id)]);
        table.add_row(vec![
            Cell::new("External ID"),
            Cell::new(cluster.external_id.as_deref().unwrap_or("-")),
        ]);
        table.add_row(vec![
            Cell::new("State"),
            Cell::new(format!(
                "{} {}",
                StatusIcon::get_state_icon(state),
                state.unwrap_or("unknown")
            ))
            .fg(self.theme.get_state_color(state)),
        ]);
        table.add_row(vec![
            Cell::new("Version"),
            Cell::new(cluster.openshift_version.as_deref().unwrap_or("-")),
        ]);
        table.add_row(vec![
            Cell::new("Region"),
            Cell::new(
                cluster
                    .region
                    .as_ref()
                    .and_then(|r| r.id.as_deref())
                    .unwrap_or("-"),
            ),
        ]);
        table.add_row(vec![
            Cell::new("API URL"),
            Cell::new(cluster.api.url.as_deref().unwrap_or("-")),
        ]);
        table.add_row(vec![
            Cell::new("Private"),
            Cell::new(format!(
                "{} {}",
                StatusIcon::get_listening_icon(private),
                if private { "Yes" } else { "No" }
            ))
            .fg(self.theme.get_listening_color(private)),
        ]);
        table.add_row(vec![
            Cell::new("Console URL"),
            Cell::new(
                cluster
                    .console
                    .as_ref()
                    .and_then(|c| c.url.as_deref())
                    .unwrap_or("-"),
            ),
        ]);
        table.add_row(vec![
            Cell::new("Created"),
            Cell::new(format_timestamp(cluster.creation_timestamp)),
        ]);
        table.add_row(vec![
            Cell::new("Expires"),
            Cell::new(format_timestamp(cluster.expiration_timestamp)),
        ]);

        let mut output = String::new();
        output.push_str(&format!(
            "╭─ Cluster {} ─╮\n",
            format!("[{}]", cluster.name).bright_black()
        ));
        output.push_str(&table.to_string());
        output
    }

    /// Render the caller identity and the region in use
    pub fn render_identity(&self, identity: &CallerIdentity, region: &str) -> String {
        let mut table = Self::key_value_table();
        table.add_row(vec![Cell::new("AWS ARN"), Cell::new(&identity.arn)]);
        table.add_row(vec![
            Cell::new("AWS Account ID"),
            Cell::new(&identity.account_id).fg(self.theme.info),
        ]);
        table.add_row(vec![Cell::new("AWS Region"), Cell::new(region)]);
        table.to_string()
    }
}

fn format_timestamp(timestamp: Option<DateTime<Utc>>) -> String {
    timestamp
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cluster::{ClusterApi, ListeningMethod};

    fn cluster() -> Cluster {
        Cluster {
            id: "1a2b3c".to_string(),
            name: "mycluster".to_string(),
            state: Some("ready".to_string()),
            api: ClusterApi {
                url: Some("https://api.mycluster.example.com:6443".to_string()),
                listening: ListeningMethod::Internal,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_render_cluster() {
        let output = TableRenderer::new().render_cluster(&cluster());
        assert!(output.contains("mycluster"));
        assert!(output.contains("1a2b3c"));
        assert!(output.contains("ready"));
        assert!(output.contains("Yes"));
        assert!(output.contains("https://api.mycluster.example.com:6443"));
    }

    #[test]
    fn test_render_identity() {
        let identity = CallerIdentity {
            arn: "arn:aws:iam::123456789012:user/dev".to_string(),
            account_id: "123456789012".to_string(),
        };
        let output = TableRenderer::new().render_identity(&identity, "us-east-1");
        assert!(output.contains("123456789012"));
        assert!(output.contains("us-east-1"));
    }
}
