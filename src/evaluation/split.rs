//! Stratified train/test splitting.
//!
//! Samples are grouped by label in order of first appearance. Every group is
//! shuffled with a generator seeded from `seed` and cut at
//! `floor(len * train_fraction)`; the first part goes to training. Groups
//! are concatenated in the same first-appearance order, so the split is a
//! pure function of `(labels, train_fraction, seed)`.

use std::collections::HashMap;
use std::hash::Hash;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::error::{Result, UjaranError};

/// Split sample indices into `(train, test)` while keeping class proportions.
pub fn stratified_split_indices<K>(
    labels: &[K],
    train_fraction: f64,
    seed: u64,
) -> Result<(Vec<usize>, Vec<usize>)>
where
    K: Eq + Hash,
{
    if !(0.0..=1.0).contains(&train_fraction) {
        return Err(UjaranError::invalid_config(format!(
            "train_fraction must lie in [0, 1], got {train_fraction}"
        )));
    }

    let mut group_of: HashMap<&K, usize> = HashMap::new();
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for (index, label) in labels.iter().enumerate() {
        let group = *group_of.entry(label).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[group].push(index);
    }

    let mut train = Vec::with_capacity(labels.len());
    let mut test = Vec::new();
    for mut group in groups {
        let mut rng = StdRng::seed_from_u64(seed);
        group.shuffle(&mut rng);
        let cut = (group.len() as f64 * train_fraction).floor() as usize;
        test.extend_from_slice(&group[cut..]);
        group.truncate(cut);
        train.extend(group);
    }

    Ok((train, test))
}

/// Split records into `(train, test)` by the label `label_of` extracts.
///
/// # Examples
///
/// ```
/// use ujaran::evaluation::stratified_split;
///
/// let records = vec![("a", 0), ("b", 0), ("c", 1), ("d", 1), ("e", 0)];
/// let (train, test) = stratified_split(&records, |r| r.1, 0.5, 42).unwrap();
/// assert_eq!(train.len() + test.len(), records.len());
/// assert_eq!(train.iter().filter(|r| r.1 == 1).count(), 1);
/// ```
pub fn stratified_split<T, K, F>(
    records: &[T],
    label_of: F,
    train_fraction: f64,
    seed: u64,
) -> Result<(Vec<T>, Vec<T>)>
where
    T: Clone,
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let labels: Vec<K> = records.iter().map(label_of).collect();
    let (train, test) = stratified_split_indices(&labels, train_fraction, seed)?;
    Ok((
        train.into_iter().map(|i| records[i].clone()).collect(),
        test.into_iter().map(|i| records[i].clone()).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sizes_per_class() {
        // 10 of class 0, 5 of class 1, 3 of class 2
        let labels: Vec<usize> = [vec![0; 10], vec![1; 5], vec![2; 3]].concat();
        let (train, test) = stratified_split_indices(&labels, 0.8, 42).unwrap();

        let count = |indices: &[usize], class: usize| {
            indices.iter().filter(|&&i| labels[i] == class).count()
        };
        assert_eq!(count(&train, 0), 8);
        assert_eq!(count(&train, 1), 4);
        assert_eq!(count(&train, 2), 2);
        assert_eq!(count(&test, 0), 2);
        assert_eq!(count(&test, 1), 1);
        assert_eq!(count(&test, 2), 1);
    }

    #[test]
    fn test_split_is_a_partition() {
        let labels = vec!["x", "y", "x", "z", "y", "x", "x"];
        let (train, test) = stratified_split_indices(&labels, 0.6, 7).unwrap();

        let mut all: Vec<usize> = train.iter().chain(&test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..labels.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_groups_in_first_appearance_order() {
        let labels = vec![2, 2, 0, 0, 1, 1];
        let (train, _) = stratified_split_indices(&labels, 0.5, 1).unwrap();
        let train_labels: Vec<usize> = train.iter().map(|&i| labels[i]).collect();
        assert_eq!(train_labels, vec![2, 0, 1]);
    }

    #[test]
    fn test_split_is_deterministic() {
        let labels: Vec<usize> = (0..50).map(|i| i % 3).collect();
        let first = stratified_split_indices(&labels, 0.8, 42).unwrap();
        let second = stratified_split_indices(&labels, 0.8, 42).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_split_keeps_proportions_for_generated_distributions() {
        use rand::Rng;

        let fractions = [0.0, 0.1, 0.25, 0.5, 0.7, 0.8, 0.9, 1.0];
        let mut rng = StdRng::seed_from_u64(2024);

        for _ in 0..50 {
            let n_classes = rng.random_range(1..=5);
            let sizes: Vec<usize> = (0..n_classes).map(|_| rng.random_range(0..=40)).collect();
            let mut labels: Vec<usize> = sizes
                .iter()
                .enumerate()
                .flat_map(|(class, &size)| std::iter::repeat_n(class, size))
                .collect();
            labels.shuffle(&mut rng);

            for &fraction in &fractions {
                let seed = rng.random();
                let (train, test) = stratified_split_indices(&labels, fraction, seed).unwrap();
                assert_eq!(train.len() + test.len(), labels.len());

                for (class, &size) in sizes.iter().enumerate() {
                    let in_train = train.iter().filter(|&&i| labels[i] == class).count();
                    let in_test = test.iter().filter(|&&i| labels[i] == class).count();
                    let expected = (size as f64 * fraction).floor() as usize;
                    assert_eq!(in_train, expected, "class {class} of {sizes:?} at {fraction}");
                    assert_eq!(in_test, size - expected);
                }
            }
        }
    }

    #[test]
    fn test_split_rejects_bad_fraction() {
        assert!(stratified_split_indices(&[0, 1], 1.5, 0).is_err());
        assert!(stratified_split_indices(&[0, 1], f64::NAN, 0).is_err());
    }
}
