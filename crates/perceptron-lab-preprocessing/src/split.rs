use perceptron_lab_core::{LabError, LabResult, Label, Matrix};
use rand::seq::SliceRandom;
use rand::Rng;

/// Train and test partitions produced by [`train_test_split`].
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    pub x_train: Matrix,
    pub y_train: Vec<Label>,
    pub x_test: Matrix,
    pub y_test: Vec<Label>,
}

/// Split data into training and test sets.
///
/// Indices are shuffled uniformly at random; the first
/// `floor(n * test_ratio)` of them form the test set and the rest the
/// training set. Class balance is not preserved.
pub fn train_test_split<R: Rng + ?Sized>(
    x: &Matrix,
    y: &[Label],
    test_ratio: f64,
    rng: &mut R,
) -> LabResult<Split> {
    let n = x.rows();
    if n != y.len() {
        return Err(LabError::LengthMismatch {
            features: n,
            labels: y.len(),
        });
    }
    if !(0.0..=1.0).contains(&test_ratio) {
        return Err(LabError::InvalidParameter(format!(
            "test ratio must be in [0, 1], got {}",
            test_ratio
        )));
    }

    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(rng);

    let test_size = (n as f64 * test_ratio).floor() as usize;
    let (test_idx, train_idx) = indices.split_at(test_size);

    log::debug!(
        "split {} samples into {} train / {} test",
        n,
        train_idx.len(),
        test_idx.len()
    );

    Ok(Split {
        x_train: x.select_rows(train_idx),
        y_train: train_idx.iter().map(|&i| y[i]).collect(),
        x_test: x.select_rows(test_idx),
        y_test: test_idx.iter().map(|&i| y[i]).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn toy() -> (Matrix, Vec<Label>) {
        let x = Matrix::from_rows(&[
            vec![1.0, 2.0],
            vec![3.0, 4.0],
            vec![5.0, 6.0],
            vec![7.0, 8.0],
            vec![9.0, 10.0],
        ])
        .unwrap();
        let y = Label::from_slice(&[0, 1, 0, 1, 0]).unwrap();
        (x, y)
    }

    #[test]
    fn test_train_test_split() {
        let (x, y) = toy();
        let mut rng = StdRng::seed_from_u64(42);
        let split = train_test_split(&x, &y, 0.4, &mut rng).unwrap();

        assert_eq!(split.x_train.rows(), 3);
        assert_eq!(split.x_test.rows(), 2);
        assert_eq!(split.y_train.len(), 3);
        assert_eq!(split.y_test.len(), 2);
    }

    #[test]
    fn test_test_size_uses_floor() {
        let (x, y) = toy();
        let mut rng = StdRng::seed_from_u64(1);
        // 5 * 0.3 = 1.5 -> 1 test sample
        let split = train_test_split(&x, &y, 0.3, &mut rng).unwrap();
        assert_eq!(split.x_test.rows(), 1);
        assert_eq!(split.x_train.rows(), 4);
    }

    #[test]
    fn test_split_is_a_partition_that_keeps_pairs() {
        let (x, y) = toy();
        let mut rng = StdRng::seed_from_u64(7);
        let split = train_test_split(&x, &y, 0.4, &mut rng).unwrap();

        let mut firsts: Vec<f64> = split
            .x_train
            .iter_rows()
            .chain(split.x_test.iter_rows())
            .map(|r| r[0])
            .collect();
        firsts.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(firsts, vec![1.0, 3.0, 5.0, 7.0, 9.0]);

        // Row k of toy() is (2k+1, 2k+2) with label k % 2.
        for (row, label) in split.x_train.iter_rows().zip(&split.y_train) {
            let k = ((row[0] - 1.0) / 2.0) as i64;
            assert_eq!(*label, Label::try_from(k % 2).unwrap());
        }
    }

    #[test]
    fn test_split_rejects_bad_input() {
        let (x, y) = toy();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            train_test_split(&x, &y[..3], 0.2, &mut rng),
            Err(LabError::LengthMismatch { features: 5, labels: 3 })
        );
        assert!(train_test_split(&x, &y, 1.5, &mut rng).is_err());
        assert!(train_test_split(&x, &y, -0.1, &mut rng).is_err());
    }

    #[test]
    fn test_edge_ratios() {
        let (x, y) = toy();
        let mut rng = StdRng::seed_from_u64(3);
        let none = train_test_split(&x, &y, 0.0, &mut rng).unwrap();
        assert!(none.x_test.is_empty());
        assert_eq!(none.x_test.cols(), 2);
        let all = train_test_split(&x, &y, 1.0, &mut rng).unwrap();
        assert!(all.x_train.is_empty());
    }
}
