use super::table::Grid;
use crate::analysis::{ClassifiedComponent, ManifestReport, Priority};
use colored::{Color, Colorize};

pub const PERMISSIONS_HEADER: &str = "== Permissões ==";
pub const NO_PERMISSIONS: &str = "Nenhuma permissão declarada.";
pub const NO_COMPONENTS: &str = "Nenhum componente encontrado.";

const TABLE_HEADERS: [&str; 3] = ["Tipo", "Nome", "Exported"];

/// Terminal reporter with colored output
pub struct TerminalReporter {
    color: bool,
    column_widths: [usize; 3],
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self {
            color: true,
            column_widths: [20, 70, 10],
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Wrapping width of the Tipo, Nome and Exported columns
    pub fn with_column_widths(mut self, widths: [usize; 3]) -> Self {
        self.column_widths = widths.map(|w| w.max(1));
        self
    }

    pub fn render(&self, report: &ManifestReport) -> String {
        let mut sections = vec![format!(
            "{}\n{}",
            self.paint(PERMISSIONS_HEADER, Some(Color::Blue)),
            self.render_permissions(report)
        )];

        for (title, components) in report.component_sections() {
            sections.push(format!(
                "{}\n{}",
                self.paint(&format!("== {} ==", title), Some(Color::Blue)),
                self.render_components(components)
            ));
        }

        let mut out = sections.join("\n\n");
        out.push('\n');
        out
    }

    fn render_permissions(&self, report: &ManifestReport) -> String {
        if report.permissions.is_empty() {
            return NO_PERMISSIONS.to_string();
        }

        report
            .permissions
            .entries()
            .iter()
            .map(|perm| {
                let color = if perm.critical { Color::Red } else { Color::Green };
                self.paint(&perm.to_string(), Some(color))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_components(&self, components: &[ClassifiedComponent]) -> String {
        if components.is_empty() {
            return NO_COMPONENTS.to_string();
        }

        let mut grid = Grid::new(&TABLE_HEADERS);
        for component in components {
            let color = priority_color(component.priority);
            let exported = if component.exported { "True" } else { "False" };

            let cells = [component.kind.display_name(), component.name.as_str(), exported]
                .iter()
                .zip(self.column_widths)
                .map(|(text, width)| {
                    textwrap::wrap(text, width)
                        .iter()
                        .map(|line| self.paint(line, color))
                        .collect::<Vec<_>>()
                })
                .collect();
            grid.add_row(cells);
        }

        grid.render()
    }

    fn paint(&self, text: &str, color: Option<Color>) -> String {
        match color {
            Some(color) if self.color => text.color(color).to_string(),
            _ => text.to_string(),
        }
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn priority_color(priority: Priority) -> Option<Color> {
    match priority {
        Priority::Exported => Some(Color::Green),
        Priority::HasEntryPoints => Some(Color::Yellow),
        Priority::Neutral => None,
    }
}
