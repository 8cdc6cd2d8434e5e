use thiserror::Error;

#[derive(Debug, Error)]
pub enum FtpError {
    /// Færre enn to brukbare punkter (≥180 s, >0 W) til CP-tilpasning.
    #[error("insufficient data: {usable_points} usable power-curve point(s), need at least 2")]
    InsufficientData { usable_points: usize },

    /// Infrastrukturfeil fra lagringslaget – propageres uendret.
    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("config error ({path}): {reason}")]
    Config { path: String, reason: String },
}

impl FtpError {
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, FtpError::InsufficientData { .. })
    }
}

pub type FtpResult<T> = Result<T, FtpError>;
