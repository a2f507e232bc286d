//! Comparison sorts over `PartialOrd` values
//!
//! Independent of the queue engine. All three sorts are stable and ascending.
//! Values that do not compare (NaN) are left where the algorithm happens to
//! put them.
//!
//! ```rust
//! use orderq::sorting::{bubble_sort, insertion_sort, merge_sort};
//!
//! let mut a = [3, 1, 2];
//! bubble_sort(&mut a);
//! assert_eq!(a, [1, 2, 3]);
//!
//! let mut b = [3.5, -1.0, 2.0];
//! insertion_sort(&mut b);
//! assert_eq!(b, [-1.0, 2.0, 3.5]);
//!
//! assert_eq!(merge_sort(vec!["c", "a", "b"]), vec!["a", "b", "c"]);
//! ```

mod bubble;
mod insertion;
mod merge;

pub use bubble::bubble_sort;
pub use insertion::insertion_sort;
pub use merge::{merge_sort, PARALLEL_THRESHOLD};
