//! Error types emitted by the Roadside CLI.

use camino::Utf8PathBuf;
use thiserror::Error;

use roadside_data::{PlanError, ProviderBuildError};

/// Errors emitted by the Roadside CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Constructing one of the HTTP providers failed.
    #[error("failed to build {service} provider: {source}")]
    BuildProvider {
        /// Which provider failed.
        service: &'static str,
        /// Underlying build failure.
        #[source]
        source: ProviderBuildError,
    },
    /// The planner rejected the request.
    #[error(transparent)]
    Plan(#[from] PlanError),
    /// Serialising the plan report failed.
    #[error("failed to serialize plan report: {0}")]
    SerializeReport(#[source] serde_json::Error),
    /// Writing the plan report to disk failed.
    #[error("failed to write plan report to {path}: {source}")]
    WriteReport {
        /// Destination file path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
