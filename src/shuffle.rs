/// Sine-based generator shared by every board built from the same seed.
///
/// Each draw is `frac(sin(counter) * 10000)` with `counter` starting at the
/// seed and advancing by one per draw. The values are far from uniform, but
/// existing saved seeds depend on this exact sequence.
pub struct SineRandom {
    counter: f64,
}

impl SineRandom {
    /// A seed of 0 is treated as 1.
    pub fn new(seed: i64) -> Self {
        let seed = if seed == 0 { 1 } else { seed };
        Self { counter: seed as f64 }
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        let x = self.counter.sin() * 10000.0;
        self.counter += 1.0;
        x - x.floor()
    }
}

/// Deterministic in-place shuffle, walking backwards from the last slot.
///
/// Shuffles the slice it is given; callers that need the original order must
/// pass a copy.
pub fn shuffle<T>(items: &mut [T], seed: i64) {
    let mut random = SineRandom::new(seed);
    let mut current = items.len();
    while current != 0 {
        let picked = (random.next_f64() * current as f64).floor() as usize;
        current -= 1;
        items.swap(current, picked);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sine_random_sequence() {
        let mut random = SineRandom::new(1);
        let drawn: Vec<f64> = (0..3).map(|_| random.next_f64()).collect();
        let expected = [0.7098480789645691, 0.9742682568175951, 0.20008059867222983];
        for (got, want) in drawn.iter().zip(expected) {
            assert!((got - want).abs() < 1e-9, "got {got}, want {want}");
        }
    }

    #[test]
    fn test_shuffle_empty_vector() {
        let mut v: Vec<u32> = vec![];
        shuffle(&mut v, 42);
        assert!(v.is_empty());
    }

    #[test]
    fn test_shuffle_single_element_vector() {
        let mut v = vec![42];
        shuffle(&mut v, 42);
        assert_eq!(v, vec![42]);
    }

    #[test]
    fn test_shuffle_known_permutations() {
        let mut v = vec![1, 2, 3, 4, 5];
        shuffle(&mut v, 1);
        assert_eq!(v, vec![3, 2, 1, 5, 4]);

        let mut v = vec![1, 2, 3, 4, 5];
        shuffle(&mut v, 42);
        assert_eq!(v, vec![5, 3, 1, 2, 4]);
    }

    #[test]
    fn test_zero_seed_behaves_like_one() {
        let mut a = vec!["a", "b", "c", "d", "e", "f"];
        let mut b = a.clone();
        shuffle(&mut a, 0);
        shuffle(&mut b, 1);
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn shuffle_is_deterministic(seed in any::<i32>(), len in 0usize..64) {
            let mut a: Vec<usize> = (0..len).collect();
            let mut b = a.clone();
            shuffle(&mut a, seed as i64);
            shuffle(&mut b, seed as i64);
            prop_assert_eq!(a, b);
        }

        #[test]
        fn shuffle_is_a_permutation(seed in any::<i32>(), items in prop::collection::vec(0u8..10, 1..64)) {
            let mut shuffled = items.clone();
            shuffle(&mut shuffled, seed as i64);
            let mut sorted_in = items;
            sorted_in.sort_unstable();
            shuffled.sort_unstable();
            prop_assert_eq!(sorted_in, shuffled);
        }
    }
}
