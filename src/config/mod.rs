pub mod cli;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, Validate};
#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human readable counts of modules, resources and outputs
    Summary,
    /// Canonical compact JSON
    Json,
    /// Canonical indented JSON
    Pretty,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "tfstate")]
#[command(about = "Inspect and normalize Terraform JSON state documents")]
pub struct CliConfig {
    /// Path to the state document (output of `terraform show -json`)
    #[arg(short, long)]
    pub state: String,

    #[arg(short, long, value_enum, default_value = "summary")]
    pub format: OutputFormat,

    /// Write JSON output to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(long, help = "Fail when the state format version is not supported")]
    pub strict: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("state", &self.state)?;

        if let Some(output) = &self.output {
            validate_path("output", output)?;
            if self.format == OutputFormat::Summary {
                return Err(crate::utils::error::StateError::InvalidConfigValueError {
                    field: "output".to_string(),
                    value: output.clone(),
                    reason: "--output requires --format json or --format pretty".to_string(),
                });
            }
        }

        Ok(())
    }
}
