use clap::ValueEnum;

/// Output mode shared by all operations.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl From<testset_config::OutputFormat> for OutputFormat {
    fn from(format: testset_config::OutputFormat) -> Self {
        match format {
            testset_config::OutputFormat::Text => Self::Text,
            testset_config::OutputFormat::Json => Self::Json,
        }
    }
}

/// Flags that shape how every operation reports.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
}
