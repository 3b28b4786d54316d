pub mod sales_csv;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::StoryConfig;
use crate::model::Dataset;

pub use sales_csv::{SalesCsvError, parse_sales_csv};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("sales csv: {0}")]
    SalesCsv(#[from] SalesCsvError),
}

/// Read and parse the dataset file at `path`.
///
/// The file is read fully before parsing; datasets are a few megabytes
/// at most.
pub fn load_dataset(path: &Path, config: &StoryConfig) -> Result<Dataset, LoadError> {
    let data = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = data.len(), "read dataset file");
    Ok(parse_sales_csv(&data, config)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reports_path() {
        let err = load_dataset(Path::new("/nonexistent/ev.csv"), &StoryConfig::default())
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/ev.csv"));
    }
}
