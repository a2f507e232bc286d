//! Bulk operations over queue contents
//!
//! These run on an already-locked [`QueueState`]; the locking wrappers live on
//! [`Queue`](crate::queue::Queue). Every operation aborts at the first error
//! returned by the caller's closure and reports the buffer position it failed
//! at. Changes made before the failing element stay in place.

use crate::queue::element::{BoxedElement, Element};
use crate::queue::error::{CallbackError, FoldError, QueueError, QueueResult};
use crate::queue::state::QueueState;
use std::collections::VecDeque;

impl<T: Send + 'static> QueueState<T> {
    /// Replace every content with `f(content)`, in buffer order
    pub fn map_in_place<F, E>(&mut self, mut f: F) -> QueueResult<()>
    where
        F: FnMut(&T) -> Result<T, E>,
        E: Into<CallbackError>,
    {
        for (position, elem) in self.buffer.iter_mut().enumerate() {
            let content = f(elem.content()).map_err(|e| QueueError::Callback {
                operation: "mapping",
                position,
                source: e.into(),
            })?;
            elem.set_content(content);
        }
        Ok(())
    }

    /// Drop every element for which `f` returns false
    ///
    /// Dropped elements go through the regular removal path, so the buffer
    /// may shrink along the way. Positions in errors refer to the buffer as it
    /// was before filtering started.
    pub fn filter_in_place<F, E>(&mut self, mut f: F) -> QueueResult<()>
    where
        F: FnMut(&T) -> Result<bool, E>,
        E: Into<CallbackError>,
    {
        let mut index = 0;
        let mut position = 0;
        while index < self.buffer.len() {
            let keep = f(self.buffer[index].content()).map_err(|e| QueueError::Callback {
                operation: "filtering",
                position,
                source: e.into(),
            })?;
            if keep {
                index += 1;
            } else {
                self.remove_index(index)
                    .map_err(|e| e.context(format!("filtering element at position {}", position)))?;
            }
            position += 1;
        }
        Ok(())
    }

    /// Left-to-right reduction over the elements in buffer order
    ///
    /// The aggregate moves through each step. A failing step hands back the
    /// aggregate it was given along with its error, and the returned
    /// [`FoldError`] carries it.
    pub fn fold<A, F, E>(&self, initial: A, mut f: F) -> Result<A, FoldError<A>>
    where
        F: FnMut(A, &dyn Element<T>) -> Result<A, (A, E)>,
        E: Into<CallbackError>,
    {
        let mut aggregate = initial;
        for (position, elem) in self.buffer.iter().enumerate() {
            aggregate = match f(aggregate, elem.as_ref()) {
                Ok(next) => next,
                Err((kept, e)) => {
                    return Err(FoldError {
                        aggregate: kept,
                        error: QueueError::Callback {
                            operation: "folding",
                            position,
                            source: e.into(),
                        },
                    })
                }
            }
        }
        Ok(aggregate)
    }

    /// Build a new queue with the same discipline and limit from projected elements
    ///
    /// `f` returns `Ok(None)` to leave an element out. Removal order carries
    /// over: unsorted disciplines keep the buffer layout as is, priority
    /// disciplines are rebuilt tail first so that ties keep their relative age
    /// and changed priorities are sorted in.
    pub fn map<U, F, E>(&self, mut f: F) -> QueueResult<QueueState<U>>
    where
        U: Send + 'static,
        F: FnMut(&dyn Element<T>) -> Result<Option<BoxedElement<U>>, E>,
        E: Into<CallbackError>,
    {
        let mut mapped = QueueState::new(self.order);
        mapped.limit = self.limit;

        let project = |position: usize, elem: &BoxedElement<T>, f: &mut F| {
            f(elem.as_ref()).map_err(|e| QueueError::Callback {
                operation: "mapping",
                position,
                source: e.into(),
            })
        };

        if self.order.is_priority_ordered() {
            for (position, elem) in self.buffer.iter().enumerate().rev() {
                if let Some(new_elem) = project(position, elem, &mut f)? {
                    mapped.insert_by_priority(new_elem);
                }
            }
        } else {
            let mut buffer = VecDeque::with_capacity(self.buffer.len());
            for (position, elem) in self.buffer.iter().enumerate() {
                if let Some(new_elem) = project(position, elem, &mut f)? {
                    buffer.push_back(new_elem);
                }
            }
            mapped.buffer = buffer;
        }

        Ok(mapped)
    }
}
