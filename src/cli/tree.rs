//! Display the materialized navigation tree.
//!
//! Drives `TreeStrategy` level by level against the filesystem provider and
//! renders the result, `cargo tree`-style:
//!
//! ```text
//! app
//! ├── checks
//! │   ├── lint
//! │   └── test
//! └── build
//!     └── production
//! ```
//!
//! Formats: `tree` (default, box-drawing + colors), `json` (nested objects
//! with stable ids), `text` (plain indented lines).

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use crate::provider::FsWorkspaceProvider;
use crate::state::{CollapseStore, InMemoryCollapseStore, effective_collapsible};
use crate::view::{Collapsible, TreeStrategy, ViewItem, ViewItemFactory, WorkspaceProvider};

/// Command to display the navigation tree.
#[derive(Args, Debug)]
pub struct TreeCommand {
    /// Show only this project's subtree.
    #[arg(short = 'p', long)]
    project: Option<String>,

    /// Maximum number of levels below the root (unlimited if not specified).
    #[arg(short = 'd', long)]
    depth: Option<usize>,

    /// Output format (tree, json, text).
    #[arg(short = 'f', long)]
    format: Option<String>,
}

/// One fully-materialized node, ready to render.
struct RenderNode {
    item: ViewItem,
    children: Vec<RenderNode>,
}

impl TreeCommand {
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
            .unwrap_or("tree")
            .to_string();
        self.validate_arguments(&format)?;

        let provider = FsWorkspaceProvider::new(&workspace_root);
        let factory = ViewItemFactory::with_tracing(&workspace_root);
        let strategy = TreeStrategy::new(provider, factory);

        let mut roots = strategy.get_children(None).await?.unwrap_or_default();
        if let Some(project) = &self.project {
            roots.retain(|item| item.label() == project);
            if roots.is_empty() {
                return Err(anyhow::anyhow!(
                    "Project '{project}' not found in workspace {}",
                    workspace_root.display()
                ));
            }
        }

        let mut nodes = Vec::with_capacity(roots.len());
        for root in roots {
            nodes.push(expand(&strategy, root, self.depth).await?);
        }

        let store = InMemoryCollapseStore::new();
        match format.as_str() {
            "json" => self.output_json(&nodes)?,
            "text" => self.output_text(&nodes),
            _ => self.output_tree(&nodes, &store),
        }

        Ok(())
    }

    fn validate_arguments(&self, format: &str) -> Result<()> {
        match format {
            "tree" | "json" | "text" => {}
            _ => {
                return Err(anyhow::anyhow!(
                    "Invalid format '{format}'. Valid formats are: tree, json, text"
                ));
            }
        }

        if let Some(depth) = self.depth
            && depth == 0
        {
            return Err(anyhow::anyhow!("Depth must be at least 1"));
        }

        Ok(())
    }

    fn output_tree(&self, nodes: &[RenderNode], store: &dyn CollapseStore) {
        if nodes.is_empty() {
            println!("No projects found.");
            return;
        }
        for node in nodes {
            println!("{}", styled_label(&node.item));
            for (i, child) in node.children.iter().enumerate() {
                let is_last = i == node.children.len() - 1;
                self.print_node(child, "", is_last, store);
            }
        }
    }

    fn print_node(&self, node: &RenderNode, prefix: &str, is_last: bool, store: &dyn CollapseStore) {
        let connector = if is_last { "└── " } else { "├── " };

        // A collapsible node whose children were cut by --depth gets an
        // ellipsis so the cut is visible.
        let cut_marker = if node.children.is_empty()
            && effective_collapsible(store, &node.item) == Collapsible::Collapsed
        {
            format!(" {}", "…".bright_black())
        } else {
            String::new()
        };

        println!(
            "{prefix}{connector}{}{cut_marker}",
            styled_label(&node.item)
        );

        let child_prefix = if is_last {
            format!("{prefix}    ")
        } else {
            format!("{prefix}│   ")
        };
        for (i, child) in node.children.iter().enumerate() {
            let is_last_child = i == node.children.len() - 1;
            self.print_node(child, &child_prefix, is_last_child, store);
        }
    }

    fn output_json(&self, nodes: &[RenderNode]) -> Result<()> {
        let json: Vec<serde_json::Value> = nodes.iter().map(node_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&json)?);
        Ok(())
    }

    fn output_text(&self, nodes: &[RenderNode]) {
        if nodes.is_empty() {
            println!("No projects found.");
            return;
        }
        for node in nodes {
            print_text_node(node, 0);
        }
    }
}

/// Materialize the subtree under `item`, one provider call per layer.
///
/// Only collapsible nodes are expanded; configuration leaves carry a
/// "no-expand" hint and terminate the recursion.
fn expand<'a, P: WorkspaceProvider>(
    strategy: &'a TreeStrategy<P>,
    item: ViewItem,
    remaining: Option<usize>,
) -> Pin<Box<dyn Future<Output = Result<RenderNode>> + 'a>> {
    Box::pin(async move {
        let mut children = Vec::new();
        if item.collapsible() != Collapsible::None && remaining != Some(0) {
            let next = remaining.map(|depth| depth - 1);
            if let Some(child_items) = strategy.get_children(Some(&item)).await? {
                for child in child_items {
                    children.push(expand(strategy, child, next).await?);
                }
            }
        }
        Ok(RenderNode { item, children })
    })
}

fn styled_label(item: &ViewItem) -> String {
    match item {
        ViewItem::Project(_) => item.label().cyan().bold().to_string(),
        ViewItem::TargetGroup(_) => item.label().magenta().to_string(),
        ViewItem::Target(target) if target.target.configuration.is_some() => {
            item.label().bright_black().to_string()
        }
        _ => item.label().to_string(),
    }
}

fn node_to_json(node: &RenderNode) -> serde_json::Value {
    serde_json::json!({
        "id": node.item.id(),
        "label": node.item.label(),
        "kind": node.item.context_value(),
        "collapsible": node.item.collapsible(),
        "children": node.children.iter().map(node_to_json).collect::<Vec<_>>(),
    })
}

fn print_text_node(node: &RenderNode, indent: usize) {
    println!(
        "{}{} ({})",
        "  ".repeat(indent),
        node.item.label(),
        node.item.id()
    );
    for child in &node.children {
        print_text_node(child, indent + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(format: Option<&str>, depth: Option<usize>) -> TreeCommand {
        TreeCommand {
            project: None,
            depth,
            format: format.map(str::to_string),
        }
    }

    #[test]
    fn valid_formats_pass_validation() {
        for format in ["tree", "json", "text"] {
            assert!(command(Some(format), None).validate_arguments(format).is_ok());
        }
    }

    #[test]
    fn invalid_format_is_rejected() {
        let result = command(Some("yaml"), None).validate_arguments("yaml");
        assert!(result.unwrap_err().to_string().contains("Invalid format"));
    }

    #[test]
    fn zero_depth_is_rejected() {
        let result = command(None, Some(0)).validate_arguments("tree");
        assert!(result.unwrap_err().to_string().contains("at least 1"));
    }
}
