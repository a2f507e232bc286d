use std::thread;

/// Inputs longer than this sort their right half on a scoped thread
pub const PARALLEL_THRESHOLD: usize = 4_096;

/// Top-down merge sort
pub fn merge_sort<T: PartialOrd + Send>(mut items: Vec<T>) -> Vec<T> {
    if items.len() <= 1 {
        return items;
    }

    let total = items.len();
    let right = items.split_off(total / 2);
    let left = items;

    let (left, right) = if total > PARALLEL_THRESHOLD {
        thread::scope(|s| {
            let handle = s.spawn(move || merge_sort(right));
            let left = merge_sort(left);
            match handle.join() {
                Ok(right) => (left, right),
                Err(panic) => std::panic::resume_unwind(panic),
            }
        })
    } else {
        (merge_sort(left), merge_sort(right))
    };

    merge(left, right)
}

// ties take from the left run
fn merge<T: PartialOrd>(left: Vec<T>, right: Vec<T>) -> Vec<T> {
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => l <= r,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        merged.extend(if take_left { left.next() } else { right.next() });
    }
    merged
}
