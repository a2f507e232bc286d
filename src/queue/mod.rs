//! Order-Disciplined Queue Component
//!
//! A generic, thread-safe queue whose removal order is fixed at construction
//! by an [`OrderDiscipline`]. Callers only ever insert and remove; the
//! discipline decides which element comes out next.
//!
//! # Overview
//!
//! - **Five disciplines**: FIFO, LIFO, highest priority first, lowest priority
//!   first, and FIFO with a length limit that evicts the oldest element
//! - **Stable priorities**: among equal priorities the oldest element wins
//! - **Adaptive storage**: the buffer releases memory as the queue drains,
//!   using occupancy bands that tighten as the queue grows
//! - **Bulk operations**: map, filter and fold over the contents, projection
//!   into a new queue, and cancellable snapshot streaming
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 Queue<T>  (Mutex facade)                 │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │                  QueueState<T>                     │  │
//! │  │   insert ──► discipline strategy                   │  │
//! │  │   ┌────┬────┬────┬────┬────┬────┐                  │  │
//! │  │   │head│    │    │    │    │tail│ ──► remove       │  │
//! │  │   └────┴────┴────┴────┴────┴────┘                  │  │
//! │  │   remove ──► capacity bands ──► shrink             │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └───────────────┬──────────────────────────────────────────┘
//!                 │ snapshot
//!                 ▼
//!        ElementStream<T>  (bounded channel + CancelHandle)
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use orderq::queue::{OrderDiscipline, PriorityElement, Queue};
//!
//! let queue = Queue::new(OrderDiscipline::PriorityLow);
//! queue.insert(PriorityElement::new("b", 2.0)).unwrap();
//! queue.insert(PriorityElement::new("a", 1.0)).unwrap();
//!
//! let total = queue
//!     .fold(0.0, |acc, elem| Ok::<_, (f64, std::io::Error)>(acc + elem.priority()))
//!     .unwrap();
//! assert_eq!(total, 3.0);
//! assert_eq!(queue.remove().unwrap(), ("a", 1.0));
//! ```

pub mod api;
pub mod capacity;
mod element;
mod error;
mod facade;
mod functional;
mod insert;
mod order;
mod remove;
mod state;
mod stream;

pub use element::{BaseElement, BoxedElement, Element, PriorityElement};
pub use error::{CallbackError, FoldError, QueueError, QueueResult};
pub use facade::Queue;
pub use order::OrderDiscipline;
pub use state::QueueState;
pub use stream::{CancelHandle, ElementStream, DEFAULT_STREAM_BUFFER};

#[cfg(test)]
mod tests;
