use crate::application::read_models::{EdgeView, GraphReport, NodeView, PopupClass};
use crate::ports::outbound::GraphFormatter;
use crate::shared::Result;
use std::collections::BTreeMap;

/// Markdown table header for package information
const TABLE_HEADER: &str = "| Package | Required | Resolved | Description |\n";

/// Markdown table separator line
const TABLE_SEPARATOR: &str = "|---------|----------|----------|-------------|\n";

/// MarkdownFormatter adapter for a human-readable graph report
///
/// Renders the visible packages as a table (popup text in the description
/// column) followed by the dependency list of every package that has
/// visible dependencies.
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    /// Package name, linked to its registry page once resolved
    fn format_package_name(node: &NodeView) -> String {
        let name = Self::escape_markdown_table_cell(&node.name);
        match &node.url {
            Some(url) => format!("[{}]({})", name, url),
            None => name,
        }
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper methods for rendering sections
impl MarkdownFormatter {
    fn render_header(&self, output: &mut String, report: &GraphReport) {
        output.push_str("# Dependency Graph\n\n");
        output.push_str(&format!(
            "Generated by {} {} at {}\n\n",
            report.metadata.tool_name(),
            report.metadata.tool_version(),
            report.metadata.timestamp()
        ));
    }

    fn render_summary(&self, output: &mut String, report: &GraphReport) {
        let summary = &report.summary;
        output.push_str("## Summary\n\n");
        output.push_str("| Metric | Count |\n");
        output.push_str("|--------|-------|\n");
        output.push_str(&format!(
            "| Packages shown | {} of {} |\n",
            summary.visible_nodes, summary.total_nodes
        ));
        output.push_str(&format!(
            "| Dependencies shown | {} of {} |\n",
            summary.visible_edges, summary.total_edges
        ));
        output.push_str(&format!("| Resolved | {} |\n", summary.resolved_nodes));
        output.push_str(&format!("| Failed | {} |\n", summary.failed_nodes));
        if let Some(filter) = &summary.filter {
            output.push_str(&format!(
                "| Filter | `{}` |\n",
                Self::escape_markdown_table_cell(filter)
            ));
        }
        output.push('\n');
    }

    fn render_packages(&self, output: &mut String, nodes: &[NodeView]) {
        output.push_str("## Packages\n\n");
        if nodes.is_empty() {
            output.push_str("*No packages match the current filter.*\n\n");
            return;
        }

        output.push_str(TABLE_HEADER);
        output.push_str(TABLE_SEPARATOR);
        for node in nodes {
            let popup = node.popup();
            let body = match popup.class {
                PopupClass::Error => format!("⚠️ {}", popup.body),
                PopupClass::Unresolved => "*not resolved*".to_string(),
                PopupClass::Plain => popup.body,
            };
            output.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                Self::format_package_name(node),
                Self::escape_markdown_table_cell(popup.versions.as_deref().unwrap_or("")),
                Self::escape_markdown_table_cell(node.resolved_version.as_deref().unwrap_or("-")),
                Self::escape_markdown_table_cell(&body)
            ));
        }
        output.push('\n');
    }

    fn render_dependencies(&self, output: &mut String, nodes: &[NodeView], edges: &[EdgeView]) {
        let mut by_source: BTreeMap<&str, Vec<&EdgeView>> = BTreeMap::new();
        for edge in edges {
            by_source.entry(edge.source_id.as_str()).or_default().push(edge);
        }
        if by_source.is_empty() {
            return;
        }

        output.push_str("## Dependencies\n\n");
        for node in nodes {
            let Some(edges) = by_source.get(node.id.as_str()) else {
                continue;
            };
            let targets: Vec<String> = edges
                .iter()
                .map(|edge| {
                    if edge.optional {
                        format!("{} (`{}`, optional)", edge.target_id, edge.version_range)
                    } else {
                        format!("{} (`{}`)", edge.target_id, edge.version_range)
                    }
                })
                .collect();
            output.push_str(&format!("- **{}** → {}\n", node.name, targets.join(", ")));
        }
        output.push('\n');
    }
}

impl GraphFormatter for MarkdownFormatter {
    fn format(&self, report: &GraphReport) -> Result<String> {
        let mut output = String::new();

        self.render_header(&mut output, report);
        self.render_summary(&mut output, report);
        self.render_packages(&mut output, &report.nodes);
        self.render_dependencies(&mut output, &report.nodes, &report.edges);

        Ok(output)
    }
}
