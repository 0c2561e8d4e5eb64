//! List the workspace's projects - the root level of the navigation tree.
//!
//! The listing preserves the provider's enumeration order; no alphabetical
//! resort happens at the project level.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::model::TargetCollection;
use crate::provider::FsWorkspaceProvider;
use crate::view::{TreeStrategy, ViewItem, ViewItemFactory, WorkspaceProvider};

/// Command to list projects.
#[derive(Args, Debug)]
pub struct ProjectsCommand {
    /// Output format (table, json).
    #[arg(short = 'f', long)]
    format: Option<String>,
}

struct ProjectRow {
    name: String,
    root: String,
    targets: String,
}

impl ProjectsCommand {
    /// Execute against the workspace at `workspace_root`.
    pub async fn execute(
        self,
        workspace_root: PathBuf,
        default_format: Option<&str>,
    ) -> Result<()> {
        let format = self
            .format
            .as_deref()
            .or(default_format)
            .unwrap_or("table")
            .to_string();
        match format.as_str() {
            "table" | "json" => {}
            _ => {
                return Err(anyhow::anyhow!(
                    "Invalid format '{format}'. Valid formats are: table, json"
                ));
            }
        }

        let provider = FsWorkspaceProvider::new(&workspace_root);
        let factory = ViewItemFactory::with_tracing(&workspace_root);
        let strategy = TreeStrategy::new(provider, factory);

        let workspace = strategy.provider().get_projects().await?;
        let roots = strategy.get_children(None).await?.unwrap_or_default();

        let rows: Vec<ProjectRow> = roots
            .iter()
            .filter_map(|item| match item {
                ViewItem::Project(project) => Some(project),
                _ => None,
            })
            .map(|project| {
                let targets = match workspace
                    .project(&project.id)
                    .map(|record| &record.targets)
                {
                    Some(TargetCollection::Populated(targets)) => targets.len().to_string(),
                    Some(TargetCollection::DeclaredEmpty) => "0".to_string(),
                    Some(TargetCollection::ComputedLazily) | None => "computed".to_string(),
                };
                ProjectRow {
                    name: project.label.clone(),
                    root: project.project.root.clone(),
                    targets,
                }
            })
            .collect();

        if format == "json" {
            self.output_json(&rows)?;
        } else {
            self.output_table(&rows);
        }
        Ok(())
    }

    fn output_json(&self, rows: &[ProjectRow]) -> Result<()> {
        let json: Vec<serde_json::Value> = rows
            .iter()
            .map(|row| {
                serde_json::json!({
                    "name": row.name,
                    "root": row.root,
                    "targets": row.targets,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&json)?);
        Ok(())
    }

    fn output_table(&self, rows: &[ProjectRow]) {
        if rows.is_empty() {
            println!("No projects found.");
            return;
        }

        let name_width = rows
            .iter()
            .map(|r| r.name.len())
            .chain(["NAME".len()])
            .max()
            .unwrap_or(0);
        let root_width = rows
            .iter()
            .map(|r| r.root.len())
            .chain(["ROOT".len()])
            .max()
            .unwrap_or(0);

        // Pad before coloring; escape codes would otherwise count into the
        // column width.
        println!(
            "{}  {}  {}",
            format!("{:<name_width$}", "NAME").bold(),
            format!("{:<root_width$}", "ROOT").bold(),
            "TARGETS".bold()
        );
        for row in rows {
            println!(
                "{}  {:<root_width$}  {}",
                format!("{:<name_width$}", row.name).cyan(),
                row.root,
                row.targets
            );
        }
    }
}
