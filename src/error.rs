use std::fmt;

/// Errors that can occur while constructing or running an [`Engine`](crate::Engine).
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A construction precondition was violated (empty program, zero-length tape).
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The data pointer attempted to move left of cell 0 or beyond the last cell.
    #[error("Pointer out of bounds at instruction {ip} (ptr={ptr}, op='{op}')")]
    OutOfBounds { ip: usize, ptr: usize, op: char },

    /// A bracket scan ran off the program without finding its counterpart.
    #[error("Unmatched bracket {kind} at instruction {ip}")]
    UnmatchedBracket { ip: usize, kind: UnmatchedBracketKind },

    /// The output sink or input source reported an error.
    #[error("I/O error at instruction {ip}: {source}")]
    IoFailure {
        ip: usize,
        #[source]
        source: std::io::Error,
    },
}

/// Fieldless category of an [`EngineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    OutOfBounds,
    UnmatchedBracket,
    IoFailure,
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            EngineError::OutOfBounds { .. } => ErrorKind::OutOfBounds,
            EngineError::UnmatchedBracket { .. } => ErrorKind::UnmatchedBracket,
            EngineError::IoFailure { .. } => ErrorKind::IoFailure,
        }
    }

    /// Program index the error points at, if it arose during execution.
    pub fn instruction(&self) -> Option<usize> {
        match self {
            EngineError::InvalidArgument(_) => None,
            EngineError::OutOfBounds { ip, .. }
            | EngineError::UnmatchedBracket { ip, .. }
            | EngineError::IoFailure { ip, .. } => Some(*ip),
        }
    }
}

/// Which side of the loop was unmatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnmatchedBracketKind {
    Open,
    Close,
}

impl fmt::Display for UnmatchedBracketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnmatchedBracketKind::Open => write!(f, "'['"),
            UnmatchedBracketKind::Close => write!(f, "']'"),
        }
    }
}
