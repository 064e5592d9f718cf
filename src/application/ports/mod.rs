mod analysis_client;
mod file_loader;

pub use analysis_client::{AnalysisClient, AnalysisError};
pub use file_loader::{ExtractionError, FileLoader, FileLoaderError};
