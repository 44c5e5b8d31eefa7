use crate::domain::model::{ResourceMode, State};
use serde::Serialize;
use std::fmt;

/// Counts gathered from a single walk over a state document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StateSummary {
    pub format_version: String,
    pub tool_version: String,
    pub module_count: usize,
    pub managed_resources: usize,
    pub data_resources: usize,
    pub other_resources: usize,
    pub output_count: usize,
    pub sensitive_outputs: usize,
}

impl StateSummary {
    pub fn from_state(state: &State) -> Self {
        let mut summary = StateSummary {
            format_version: state.format_version.clone(),
            tool_version: state.tool_version.clone(),
            ..Default::default()
        };

        let Some(values) = &state.values else {
            return summary;
        };

        summary.output_count = values.outputs.len();
        summary.sensitive_outputs = values.outputs.values().filter(|o| o.sensitive).count();

        if let Some(root) = &values.root_module {
            summary.module_count = root.walk().count();
        }

        for resource in values.resources() {
            match &resource.mode {
                Some(ResourceMode::Data) => summary.data_resources += 1,
                Some(ResourceMode::Other(_)) => summary.other_resources += 1,
                // A resource without a mode is counted as managed.
                Some(ResourceMode::Managed) | None => summary.managed_resources += 1,
            }
        }

        summary
    }

    pub fn resource_count(&self) -> usize {
        self.managed_resources + self.data_resources + self.other_resources
    }
}

impl fmt::Display for StateSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "State Summary:")?;
        writeln!(f, "  Format version: {}", or_unknown(&self.format_version))?;
        writeln!(f, "  Terraform version: {}", or_unknown(&self.tool_version))?;
        writeln!(f, "  Modules: {}", self.module_count)?;
        writeln!(
            f,
            "  Resources: {} ({} managed, {} data, {} other)",
            self.resource_count(),
            self.managed_resources,
            self.data_resources,
            self.other_resources
        )?;
        write!(
            f,
            "  Outputs: {} ({} sensitive)",
            self.output_count, self.sensitive_outputs
        )
    }
}

fn or_unknown(value: &str) -> &str {
    if value.is_empty() {
        "unknown"
    } else {
        value
    }
}
