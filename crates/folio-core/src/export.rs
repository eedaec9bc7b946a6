use crate::{models::Project, Result};

/// Output formats for a project list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Table,
    Json,
    Markdown,
}

impl ExportFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "table" => Some(ExportFormat::Table),
            "json" => Some(ExportFormat::Json),
            "md" | "markdown" => Some(ExportFormat::Markdown),
            _ => None,
        }
    }
}

/// Renders projects for the terminal or for other tools
pub struct Exporter;

impl Exporter {
    pub fn render(projects: &[Project], format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Table => Ok(Self::to_table(projects)),
            ExportFormat::Json => Self::to_json(projects),
            ExportFormat::Markdown => Ok(Self::to_markdown(projects)),
        }
    }

    /// Pretty JSON with the camelCase view-model field names
    pub fn to_json(projects: &[Project]) -> Result<String> {
        Ok(serde_json::to_string_pretty(projects)?)
    }

    pub fn to_markdown(projects: &[Project]) -> String {
        let mut output = String::new();

        output.push_str("# Projects\n\n");
        output.push_str(&format!("Total projects: {}\n\n", projects.len()));
        output.push_str("---\n\n");

        for project in projects {
            output.push_str(&format!("## {}\n\n", project.name));
            output.push_str(&format!("{}\n\n", project.description));

            if !project.tech_stack.is_empty() {
                output.push_str(&format!("**Tech:** {}\n\n", project.tech_stack.join(", ")));
            }

            output.push_str(&format!("- Source: [{}]({})\n", project.repo_url, project.repo_url));
            if project.has_live_demo() {
                output.push_str(&format!(
                    "- Live demo: [{}]({})\n",
                    project.live_demo_url, project.live_demo_url
                ));
            }
            output.push_str("\n---\n\n");
        }

        output
    }

    /// One line per project: id, badge, name, first three techs
    pub fn to_table(projects: &[Project]) -> String {
        let id_width = projects.iter().map(|p| p.id.len()).max().unwrap_or(2).max(2);
        let name_width = projects.iter().map(|p| p.name.chars().count()).max().unwrap_or(4).max(4);

        let mut output = format!(
            "{:<id_width$}  {:<name_width$}  {}\n",
            "ID",
            "NAME",
            "TECH",
            id_width = id_width,
            name_width = name_width
        );

        for project in projects {
            let tech: Vec<&str> = project.tech_stack.iter().take(3).map(String::as_str).collect();
            output.push_str(&format!(
                "{:<id_width$}  {:<name_width$}  {}\n",
                project.id,
                project.name,
                if tech.is_empty() { project.primary_tech().to_string() } else { tech.join(", ") },
                id_width = id_width,
                name_width = name_width
            ));
        }

        output
    }

    /// Every field of one project, as the detail view shows it
    pub fn to_detail(project: &Project) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n", project.name));
        output.push_str(&format!("{}\n\n", "=".repeat(project.name.chars().count())));

        if !project.tech_stack.is_empty() {
            output.push_str(&format!("[{}]\n\n", project.tech_stack.join("] [")));
        }

        output.push_str("Overview\n");
        output.push_str(&format!("  {}\n\n", project.long_description));
        output.push_str("Note\n");
        output.push_str(&format!("  \"{}\"\n\n", project.problem_solved));
        output.push_str(&format!("Source code: {}\n", project.repo_url));
        if project.has_live_demo() {
            output.push_str(&format!("Live demo:   {}\n", project.live_demo_url));
        }
        output.push_str(&format!("Image:       {}\n", project.image_url));

        output
    }
}
