use std::collections::HashSet;
use std::hash::Hash;

/// Splits `items` into consecutive chunks of `size`; the last one may be shorter.
pub fn chunk<T: Clone>(items: &[T], size: usize) -> Vec<Vec<T>> {
    if size == 0 {
        return Vec::new();
    }
    items.chunks(size).map(<[T]>::to_vec).collect()
}

/// Concatenates the lists, keeping only the first occurrence of each item.
pub fn merge_unique<T, I>(lists: I) -> Vec<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator,
    I::Item: AsRef<[T]>,
{
    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for list in lists {
        for item in list.as_ref() {
            if seen.insert(item.clone()) {
                merged.push(item.clone());
            }
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk() {
        let rows = chunk(&[0, 1, 2, 3, 4, 5, 6], 3);
        assert_eq!(rows, vec![vec![0, 1, 2], vec![3, 4, 5], vec![6]]);
        assert!(chunk::<u8>(&[], 5).is_empty());
        assert!(chunk(&[1, 2], 0).is_empty());
    }

    #[test]
    fn test_merge_unique_keeps_first_order() {
        let a = vec!["x".to_string(), "y".to_string()];
        let b = vec!["y".to_string(), "z".to_string(), "x".to_string()];
        let merged: Vec<String> = merge_unique([a, b]);
        assert_eq!(merged, vec!["x", "y", "z"]);
    }
}
