pub mod core;
pub mod queue;
pub mod sorting;

pub use queue::{
    BaseElement, Element, OrderDiscipline, PriorityElement, Queue, QueueError, QueueResult,
};
