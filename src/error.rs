use thiserror::Error;

/// Violations of the assumptions the exporters make about the game's asset schema.
///
/// These are never recovered per asset: they mean the external data changed shape
/// and somebody needs to look at it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetFormatError {
    #[error("Worker is not a manager")]
    NotAManager,
    #[error("Manager has no synergy tag")]
    MissingManagerSynergy,
    #[error("Unexpected manager synergy tag: {0}")]
    UnexpectedManagerSynergy(String),
}

#[derive(Error, Debug)]
pub enum ErrorKind {
    #[error("Asset format error: {0}")]
    AssetFormat(#[from] AssetFormatError),
    #[error("Error serializing or deserializing json: {err}")]
    SerdeJson {
        #[from]
        err: serde_json::Error,
    },
    #[error("IO error")]
    IoError(#[from] std::io::Error),
    #[error("Exporter {exporter} failed: {source}")]
    ExporterFailed {
        exporter: &'static str,
        #[source]
        source: Box<ErrorKind>,
    },
}

impl ErrorKind {
    /// Tags an error with the exporter it escaped from.
    pub fn in_exporter(self, exporter: &'static str) -> Self {
        ErrorKind::ExporterFailed {
            exporter,
            source: Box::new(self),
        }
    }

    /// Returns the underlying schema violation, looking through exporter tagging.
    pub fn asset_format(&self) -> Option<&AssetFormatError> {
        match self {
            ErrorKind::AssetFormat(err) => Some(err),
            ErrorKind::ExporterFailed { source, .. } => source.asset_format(),
            _ => None,
        }
    }
}

pub type IResult<T> = Result<T, ErrorKind>;
