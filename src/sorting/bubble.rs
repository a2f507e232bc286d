/// In-place bubble sort
///
/// Each pass stops at the last swap of the previous one, so already sorted
/// input costs a single pass.
pub fn bubble_sort<T: PartialOrd>(items: &mut [T]) {
    let mut end = items.len();
    while end > 1 {
        let mut last_swap = 0;
        for i in 1..end {
            if items[i] < items[i - 1] {
                items.swap(i - 1, i);
                last_swap = i;
            }
        }
        end = last_swap;
    }
}
