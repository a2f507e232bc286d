/// In-place insertion sort
pub fn insertion_sort<T: PartialOrd>(items: &mut [T]) {
    for i in 1..items.len() {
        if items[i] >= items[i - 1] {
            continue;
        }
        let mut j = i;
        while j > 0 && items[j] < items[j - 1] {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorting::fixtures::{is_sorted, is_stable, scrambled, tagged};

    #[test]
    fn test_insertion_sort_scrambled() {
        let mut data = scrambled(500, 11);
        let mut expected = data.clone();
        expected.sort();

        insertion_sort(&mut data);
        assert_eq!(data, expected);
    }

    #[test]
    fn test_insertion_sort_floats() {
        let mut data = [2.5, -0.5, 9.0, 2.5, 0.0];
        insertion_sort(&mut data);
        assert_eq!(data, [-0.5, 0.0, 2.5, 2.5, 9.0]);
    }

    #[test]
    fn test_insertion_sort_is_stable() {
        let mut data = tagged(&[5, 4, 5, 4, 0, 5]);
        insertion_sort(&mut data);
        assert!(is_sorted(&data));
        assert!(is_stable(&data));
    }
}
