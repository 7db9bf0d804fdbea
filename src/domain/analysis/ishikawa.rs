//! Ishikawa (fishbone) cause-and-effect graph.

use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::domain::foundation::ValidationError;
use crate::domain::report::{Chart, GraphSpec, Report, Table};

/// Maximum "why" drill-downs per cause.
pub const MAX_WHYS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CauseCategory {
    Methods,
    Machinery,
    Labor,
    Materials,
    Environment,
}

impl CauseCategory {
    pub const ALL: [CauseCategory; 5] = [
        CauseCategory::Methods,
        CauseCategory::Machinery,
        CauseCategory::Labor,
        CauseCategory::Materials,
        CauseCategory::Environment,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CauseCategory::Methods => "Methods",
            CauseCategory::Machinery => "Machinery",
            CauseCategory::Labor => "Labor",
            CauseCategory::Materials => "Materials",
            CauseCategory::Environment => "Environment",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            CauseCategory::Methods => "#FF9999",
            CauseCategory::Machinery => "#99FF99",
            CauseCategory::Labor => "#9999FF",
            CauseCategory::Materials => "#FFFF99",
            CauseCategory::Environment => "#FF99FF",
        }
    }

    fn index(&self) -> usize {
        match self {
            CauseCategory::Methods => 0,
            CauseCategory::Machinery => 1,
            CauseCategory::Labor => 2,
            CauseCategory::Materials => 3,
            CauseCategory::Environment => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cause {
    pub text: String,
    /// Ordered drill-downs, at most [`MAX_WHYS`].
    pub whys: Vec<String>,
}

/// Effect plus causes under the five fixed categories. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CausesGraph {
    effect: String,
    branches: [Vec<Cause>; 5],
}

impl Default for CausesGraph {
    fn default() -> Self {
        Self::new("Effect")
    }
}

impl CausesGraph {
    pub fn new(effect: impl Into<String>) -> Self {
        Self {
            effect: effect.into(),
            branches: Default::default(),
        }
    }

    pub fn effect(&self) -> &str {
        &self.effect
    }

    pub fn set_effect(&mut self, effect: impl Into<String>) -> Result<(), ValidationError> {
        let effect = effect.into();
        if effect.trim().is_empty() {
            return Err(ValidationError::empty_field("effect"));
        }
        self.effect = effect.trim().to_string();
        Ok(())
    }

    /// Appends a cause; blank whys are dropped before the limit is checked.
    pub fn add_cause(
        &mut self,
        category: CauseCategory,
        cause: &str,
        whys: &[String],
    ) -> Result<(), ValidationError> {
        let cause = cause.trim();
        if cause.is_empty() {
            return Err(ValidationError::empty_field("cause"));
        }
        let whys: Vec<String> = whys
            .iter()
            .map(|w| w.trim())
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect();
        if whys.len() > MAX_WHYS {
            return Err(ValidationError::out_of_range(
                "whys",
                0,
                MAX_WHYS as i64,
                whys.len() as i64,
            ));
        }
        self.branches[category.index()].push(Cause {
            text: cause.to_string(),
            whys,
        });
        Ok(())
    }

    pub fn causes(&self, category: CauseCategory) -> &[Cause] {
        &self.branches[category.index()]
    }

    pub fn cause_count(&self) -> usize {
        self.branches.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cause_count() == 0
    }

    /// Graphviz rendering: why → cause → category → effect.
    pub fn to_dot(&self) -> String {
        let mut dot = String::new();
        let _ = writeln!(dot, "digraph ishikawa {{");
        let _ = writeln!(dot, "  rankdir=RL;");
        let _ = writeln!(
            dot,
            "  \"effect\" [label=\"{}\", shape=box, style=filled, fillcolor=\"#D3D3D3\"];",
            escape(&self.effect)
        );
        for category in CauseCategory::ALL {
            let causes = self.causes(category);
            if causes.is_empty() {
                continue;
            }
            let cat_id = category.label();
            let color = category.color();
            let _ = writeln!(
                dot,
                "  \"{cat_id}\" [label=\"{cat_id}\", shape=ellipse, style=filled, fillcolor=\"{color}\"];"
            );
            let _ = writeln!(dot, "  \"{cat_id}\" -> \"effect\";");
            for (i, cause) in causes.iter().enumerate() {
                let cause_id = format!("{cat_id}/{i}");
                let _ = writeln!(
                    dot,
                    "  \"{cause_id}\" [label=\"{}\", shape=box, style=filled, fillcolor=\"{color}\"];",
                    escape(&cause.text)
                );
                let _ = writeln!(dot, "  \"{cause_id}\" -> \"{cat_id}\";");
                for (j, why) in cause.whys.iter().enumerate() {
                    let why_id = format!("{cause_id}/why{j}");
                    let _ = writeln!(
                        dot,
                        "  \"{why_id}\" [label=\"{}\", shape=note];",
                        escape(why)
                    );
                    let _ = writeln!(dot, "  \"{why_id}\" -> \"{cause_id}\";");
                }
            }
        }
        dot.push('}');
        dot.push('\n');
        dot
    }

    /// Flattened (category, cause, why-chain) rows, optionally for one category.
    pub fn summary_table(&self, filter: Option<CauseCategory>) -> Table {
        let mut table = Table::new("Causes", &["Category", "Cause", "Whys"]);
        for category in CauseCategory::ALL {
            if filter.is_some_and(|f| f != category) {
                continue;
            }
            for cause in self.causes(category) {
                table.push_row(vec![
                    category.label().to_string(),
                    cause.text.clone(),
                    cause.whys.join(" → "),
                ]);
            }
        }
        table
    }

    pub fn to_report(&self, filter: Option<CauseCategory>) -> Report {
        let mut lines = vec![format!("Effect under analysis: {}", self.effect)];
        for category in CauseCategory::ALL {
            let n = self.causes(category).len();
            if n > 0 {
                lines.push(format!("{}: {} cause(s)", category.label(), n));
            }
        }
        Report::new("Ishikawa diagram")
            .with_chart(Chart::Graph(GraphSpec {
                title: format!("Causes of {}", self.effect),
                dot: self.to_dot(),
            }))
            .with_table(self.summary_table(filter))
            .with_interpretation(lines)
    }
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn whys(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn add_cause_filters_blank_whys() {
        let mut graph = CausesGraph::new("Late deliveries");
        graph
            .add_cause(CauseCategory::Methods, "No standard route", &whys(&["Old plan", " ", ""]))
            .unwrap();
        assert_eq!(graph.causes(CauseCategory::Methods)[0].whys, whys(&["Old plan"]));
    }

    #[test]
    fn add_cause_rejects_empty_cause_and_too_many_whys() {
        let mut graph = CausesGraph::default();
        assert!(graph.add_cause(CauseCategory::Labor, "  ", &[]).is_err());
        let six = whys(&["1", "2", "3", "4", "5", "6"]);
        assert!(graph.add_cause(CauseCategory::Labor, "Fatigue", &six).is_err());
        assert!(graph.is_empty());
    }

    #[test]
    fn dot_links_only_populated_categories() {
        let mut graph = CausesGraph::new("Scrap \"rate\"");
        graph
            .add_cause(CauseCategory::Machinery, "Worn tool", &whys(&["No maintenance"]))
            .unwrap();
        let dot = graph.to_dot();
        assert!(dot.contains("\"Machinery\" -> \"effect\";"));
        assert!(dot.contains("\"Machinery/0\" -> \"Machinery\";"));
        assert!(dot.contains("\"Machinery/0/why0\" -> \"Machinery/0\";"));
        assert!(dot.contains("#99FF99"));
        assert!(!dot.contains("\"Methods\" -> \"effect\""));
        assert!(dot.contains("Scrap \\\"rate\\\""));
    }

    #[test]
    fn summary_table_can_filter_by_category() {
        let mut graph = CausesGraph::new("Defects");
        graph
            .add_cause(CauseCategory::Materials, "Moisture", &whys(&["Storage", "No cover"]))
            .unwrap();
        graph.add_cause(CauseCategory::Environment, "Heat", &[]).unwrap();

        let all = graph.summary_table(None);
        assert_eq!(all.rows.len(), 2);
        assert_eq!(all.rows[0][2], "Storage → No cover");

        let only = graph.summary_table(Some(CauseCategory::Environment));
        assert_eq!(only.rows, vec![vec!["Environment".to_string(), "Heat".to_string(), String::new()]]);
    }

    #[test]
    fn set_effect_requires_text() {
        let mut graph = CausesGraph::default();
        assert!(graph.set_effect(" ").is_err());
        graph.set_effect("Downtime").unwrap();
        assert_eq!(graph.effect(), "Downtime");
    }
}
