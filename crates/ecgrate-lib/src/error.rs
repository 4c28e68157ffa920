use thiserror::Error;

/// Why a record could not produce heart-rate statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InsufficientData {
    #[error("at least 2 QRS complexes are required, found {found}")]
    TooFewBeats { found: usize },
    #[error("all {candidates} R-R intervals were rejected as outliers or non-positive")]
    NoSurvivingIntervals { candidates: usize },
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    InsufficientData(#[from] InsufficientData),
    #[error("failed to read annotation record: {0}")]
    Io(#[from] std::io::Error),
    #[error("annotation reader failed: {0}")]
    Csv(#[source] csv::Error),
    #[error("non-finite {what} produced during analysis")]
    NonFinite { what: &'static str },
}

impl AnalysisError {
    /// True when the input itself is too short or too noisy, as opposed to an internal fault.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, AnalysisError::InsufficientData(_))
    }
}

impl From<csv::Error> for AnalysisError {
    fn from(err: csv::Error) -> Self {
        let io = match err.kind() {
            csv::ErrorKind::Io(io) => Some(std::io::Error::new(io.kind(), io.to_string())),
            _ => None,
        };
        match io {
            Some(io) => AnalysisError::Io(io),
            None => AnalysisError::Csv(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_insufficient_data() {
        let err = AnalysisError::from(InsufficientData::TooFewBeats { found: 1 });
        assert!(err.is_insufficient_data());
        assert_eq!(
            err.to_string(),
            "at least 2 QRS complexes are required, found 1"
        );
    }

    #[test]
    fn io_errors_are_internal() {
        let err = AnalysisError::from(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "truncated",
        ));
        assert!(!err.is_insufficient_data());
    }
}
