//! Queue elements
//!
//! Every value stored in a queue is wrapped in an [`Element`]. The queue only
//! ever talks to elements through this trait, so base elements (fixed priority
//! zero) and priority elements can be mixed freely inside the same queue.

/// Capability set shared by all element kinds
pub trait Element<T>: Send {
    /// Priority used by the priority-ordered disciplines
    fn priority(&self) -> f64;

    /// Change the priority. Element kinds without a settable priority ignore this.
    fn set_priority(&mut self, priority: f64);

    fn content(&self) -> &T;

    fn content_mut(&mut self) -> &mut T;

    fn set_content(&mut self, content: T);

    /// Move the content out, consuming the element
    fn into_content(self: Box<Self>) -> T;

    /// Copy this element into a new box of the same kind
    fn boxed_clone(&self) -> BoxedElement<T>
    where
        T: Clone;
}

/// Owned, type-erased element as stored in the queue buffer
pub type BoxedElement<T> = Box<dyn Element<T>>;

/// Element whose priority is always 0
#[derive(Debug, Clone, PartialEq)]
pub struct BaseElement<T> {
    content: T,
}

impl<T> BaseElement<T> {
    pub fn new(content: T) -> Self {
        Self { content }
    }
}

impl<T: Send + 'static> BaseElement<T> {
    pub fn boxed(content: T) -> BoxedElement<T> {
        Box::new(Self::new(content))
    }
}

impl<T: Send + 'static> Element<T> for BaseElement<T> {
    fn priority(&self) -> f64 {
        0.0
    }

    fn set_priority(&mut self, _priority: f64) {}

    fn content(&self) -> &T {
        &self.content
    }

    fn content_mut(&mut self) -> &mut T {
        &mut self.content
    }

    fn set_content(&mut self, content: T) {
        self.content = content;
    }

    fn into_content(self: Box<Self>) -> T {
        self.content
    }

    fn boxed_clone(&self) -> BoxedElement<T>
    where
        T: Clone,
    {
        Box::new(self.clone())
    }
}

/// Element carrying an explicit, mutable priority
#[derive(Debug, Clone, PartialEq)]
pub struct PriorityElement<T> {
    content: T,
    priority: f64,
}

impl<T> PriorityElement<T> {
    pub fn new(content: T, priority: f64) -> Self {
        Self { content, priority }
    }
}

impl<T: Send + 'static> PriorityElement<T> {
    pub fn boxed(content: T, priority: f64) -> BoxedElement<T> {
        Box::new(Self::new(content, priority))
    }
}

impl<T: Send + 'static> Element<T> for PriorityElement<T> {
    fn priority(&self) -> f64 {
        self.priority
    }

    fn set_priority(&mut self, priority: f64) {
        self.priority = priority;
    }

    fn content(&self) -> &T {
        &self.content
    }

    fn content_mut(&mut self) -> &mut T {
        &mut self.content
    }

    fn set_content(&mut self, content: T) {
        self.content = content;
    }

    fn into_content(self: Box<Self>) -> T {
        self.content
    }

    fn boxed_clone(&self) -> BoxedElement<T>
    where
        T: Clone,
    {
        Box::new(self.clone())
    }
}

impl<T: Send + 'static> From<BaseElement<T>> for BoxedElement<T> {
    fn from(element: BaseElement<T>) -> Self {
        Box::new(element)
    }
}

impl<T: Send + 'static> From<PriorityElement<T>> for BoxedElement<T> {
    fn from(element: PriorityElement<T>) -> Self {
        Box::new(element)
    }
}
