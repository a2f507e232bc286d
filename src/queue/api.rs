//! Public API for the queue system
//!
//! External modules should import from here rather than directly from internal modules.
//! See module documentation for complete usage examples and architecture details.

// Core queue components
pub use crate::queue::facade::Queue;
pub use crate::queue::state::QueueState;

// Ordering
pub use crate::queue::order::OrderDiscipline;

// Elements
pub use crate::queue::element::{BaseElement, BoxedElement, Element, PriorityElement};

// Streaming
pub use crate::queue::stream::{CancelHandle, ElementStream, DEFAULT_STREAM_BUFFER};

// Error handling
pub use crate::queue::error::{CallbackError, FoldError, QueueError, QueueResult};
