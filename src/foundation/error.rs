/// Convenience result type used across the registry.
pub type WavyteResult<T> = Result<T, WavyteError>;

/// Top-level error taxonomy raised while declaring compositions and folders.
///
/// Every registration-time variant is fatal to the attempt that raised it and leaves the
/// registry unmodified. Unregistration and dispatch never produce errors.
#[derive(thiserror::Error, Debug)]
pub enum WavyteError {
    /// A composition was declared without an id.
    #[error("missing composition id: {0}")]
    MissingId(String),

    /// The composition id is empty or not URL safe.
    #[error("invalid composition id: {0}")]
    InvalidId(String),

    /// A composition with the same id is already registered.
    #[error("duplicate composition id: {0}")]
    DuplicateId(String),

    /// Width or height is non-positive or non-finite.
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),

    /// Frame rate is non-positive or non-finite.
    #[error("invalid fps: {0}")]
    InvalidFps(String),

    /// Duration is not a positive integer number of frames.
    #[error("invalid duration: {0}")]
    InvalidDuration(String),

    /// Folder name is empty or contains characters outside the allowed set.
    #[error("invalid folder name: {0}")]
    InvalidFolderName(String),

    /// Errors when parsing manifests, props or configuration values.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Field-less mirror of [`WavyteError`] for matching on the taxonomy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`WavyteError::MissingId`].
    MissingId,
    /// See [`WavyteError::InvalidId`].
    InvalidId,
    /// See [`WavyteError::DuplicateId`].
    DuplicateId,
    /// See [`WavyteError::InvalidDimension`].
    InvalidDimension,
    /// See [`WavyteError::InvalidFps`].
    InvalidFps,
    /// See [`WavyteError::InvalidDuration`].
    InvalidDuration,
    /// See [`WavyteError::InvalidFolderName`].
    InvalidFolderName,
    /// See [`WavyteError::Serde`].
    Serde,
    /// See [`WavyteError::Other`].
    Other,
}

impl WavyteError {
    /// Build a [`WavyteError::MissingId`] value.
    pub fn missing_id(msg: impl Into<String>) -> Self {
        Self::MissingId(msg.into())
    }

    /// Build a [`WavyteError::InvalidId`] value.
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Build a [`WavyteError::DuplicateId`] value.
    pub fn duplicate_id(msg: impl Into<String>) -> Self {
        Self::DuplicateId(msg.into())
    }

    /// Build a [`WavyteError::InvalidDimension`] value.
    pub fn invalid_dimension(msg: impl Into<String>) -> Self {
        Self::InvalidDimension(msg.into())
    }

    /// Build a [`WavyteError::InvalidFps`] value.
    pub fn invalid_fps(msg: impl Into<String>) -> Self {
        Self::InvalidFps(msg.into())
    }

    /// Build a [`WavyteError::InvalidDuration`] value.
    pub fn invalid_duration(msg: impl Into<String>) -> Self {
        Self::InvalidDuration(msg.into())
    }

    /// Build a [`WavyteError::InvalidFolderName`] value.
    pub fn invalid_folder_name(msg: impl Into<String>) -> Self {
        Self::InvalidFolderName(msg.into())
    }

    /// Build a [`WavyteError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Classify this error without inspecting its message.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingId(_) => ErrorKind::MissingId,
            Self::InvalidId(_) => ErrorKind::InvalidId,
            Self::DuplicateId(_) => ErrorKind::DuplicateId,
            Self::InvalidDimension(_) => ErrorKind::InvalidDimension,
            Self::InvalidFps(_) => ErrorKind::InvalidFps,
            Self::InvalidDuration(_) => ErrorKind::InvalidDuration,
            Self::InvalidFolderName(_) => ErrorKind::InvalidFolderName,
            Self::Serde(_) => ErrorKind::Serde,
            Self::Other(_) => ErrorKind::Other,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
