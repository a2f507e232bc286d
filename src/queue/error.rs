//! Queue Error Types

use std::fmt;

/// Boxed error produced by caller-supplied closures (mappers, predicates, folders)
pub type CallbackError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("queue is empty")]
    EmptyQueue,

    #[error("index {index} is out of bounds (len: {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("invalid queue type: {value}")]
    InvalidQueueType { value: String },

    #[error("invalid queue limit: {limit}")]
    InvalidQueueLimit { limit: i64 },

    #[error("{operation} element at position {position}: {source}")]
    Callback {
        operation: &'static str,
        position: usize,
        #[source]
        source: CallbackError,
    },

    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<QueueError>,
    },
}

impl QueueError {
    /// Wrap this error with a description of the operation that hit it
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Innermost error once all `Context` layers are peeled off
    pub fn root(&self) -> &QueueError {
        let mut current = self;
        while let Self::Context { source, .. } = current {
            current = source;
        }
        current
    }

    pub fn is_empty_queue(&self) -> bool {
        matches!(self.root(), Self::EmptyQueue)
    }

    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self.root(), Self::IndexOutOfBounds { .. })
    }
}

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;

/// A fold that stopped early
///
/// `aggregate` holds the value produced by the last step that succeeded (or the
/// initial value if the very first step failed). The step that failed never
/// contributes to it.
pub struct FoldError<A> {
    pub aggregate: A,
    pub error: QueueError,
}

impl<A> FoldError<A> {
    pub fn into_parts(self) -> (A, QueueError) {
        (self.aggregate, self.error)
    }
}

impl<A: fmt::Debug> fmt::Debug for FoldError<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FoldError")
            .field("aggregate", &self.aggregate)
            .field("error", &self.error)
            .finish()
    }
}

impl<A> fmt::Display for FoldError<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fold aborted: {}", self.error)
    }
}

impl<A: fmt::Debug> std::error::Error for FoldError<A> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
