use crate::dataset::{Dataset, DatasetInfo};
use perceptron_lab_core::{Label, Matrix};
use rand::Rng;
use std::f64::consts::PI;

/// Standard normal draw via the Box-Muller transform.
///
/// Uniform draws of exactly zero are redrawn so the logarithm stays finite.
pub fn randn<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u1 = nonzero_uniform(rng);
    let u2 = nonzero_uniform(rng);
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

fn nonzero_uniform<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    loop {
        let u: f64 = rng.gen();
        if u != 0.0 {
            return u;
        }
    }
}

/// Point with each coordinate drawn uniformly from `[low, low + width)`.
fn uniform_point<R: Rng + ?Sized>(rng: &mut R, low: [f64; 2], width: [f64; 2]) -> [f64; 2] {
    [
        low[0] + rng.gen::<f64>() * width[0],
        low[1] + rng.gen::<f64>() * width[1],
    ]
}

// ─── Metadata ───────────────────────────────────────────────────────────────

pub(crate) fn blobs_info() -> DatasetInfo {
    DatasetInfo::new(
        "Synthetic Blobs",
        "Two Gaussian clusters; linearly separable.",
        true,
    )
}

pub(crate) fn iris_info() -> DatasetInfo {
    DatasetInfo::new(
        "Iris (Setosa vs Versicolor)",
        "Two Iris species separated by petal length; linearly separable.",
        true,
    )
}

pub(crate) fn moons_info() -> DatasetInfo {
    DatasetInfo::new(
        "Moons",
        "Two interleaved half-moons. Not linearly separable; shows where a perceptron fails.",
        false,
    )
}

pub(crate) fn cancer_info() -> DatasetInfo {
    DatasetInfo::new(
        "Breast Cancer Wisconsin",
        "Benign vs malignant tumours on two features with very different scales.",
        true,
    )
}

pub(crate) fn noisy_info(separation: f64) -> DatasetInfo {
    DatasetInfo::new(
        "Noisy Classification",
        "Overlapping classes with flipped labels; tests robustness to noise.",
        separation > 1.0,
    )
}

pub(crate) fn custom_info() -> DatasetInfo {
    DatasetInfo::new(
        "Custom",
        "Two well separated groups around chosen centres.",
        true,
    )
}

// ─── Generators ─────────────────────────────────────────────────────────────

/// Assemble a dataset where the first `half` points are class 0 and the rest class 1.
fn two_class(points: Vec<[f64; 2]>, half: usize, info: DatasetInfo) -> Dataset {
    let y = (0..points.len())
        .map(|i| if i < half { Label::Zero } else { Label::One })
        .collect();
    Dataset {
        x: Matrix::from_points(&points),
        y,
        info,
    }
}

/// Two Gaussian blobs centred at (-3, -3) and (3, 3).
///
/// `n_samples` is halved with floor division, so an odd count drops one sample.
pub fn make_blobs<R: Rng + ?Sized>(n_samples: usize, cluster_std: f64, rng: &mut R) -> Dataset {
    let half = n_samples / 2;
    let mut points = Vec::with_capacity(half * 2);
    for center in [-3.0, 3.0] {
        for _ in 0..half {
            points.push([
                center + randn(rng) * cluster_std,
                center + randn(rng) * cluster_std,
            ]);
        }
    }

    two_class(points, half, blobs_info())
}

/// Simplified Iris, setosa vs versicolor on sepal length and petal length.
pub fn make_iris<R: Rng + ?Sized>(n_samples: usize, rng: &mut R) -> Dataset {
    let half = n_samples / 2;
    let mut points = Vec::with_capacity(half * 2);
    // Setosa
    for _ in 0..half {
        points.push(uniform_point(rng, [4.5, 1.0], [1.5, 0.8]));
    }
    // Versicolor
    for _ in 0..half {
        points.push(uniform_point(rng, [5.5, 3.5], [2.0, 1.5]));
    }

    two_class(points, half, iris_info())
}

/// Two interleaved half-circles.
///
/// The angle runs `PI * i / half` over all `n_samples` indices, so unlike the
/// other generators an odd count keeps every sample and class 1 gets the extra one.
pub fn make_moons<R: Rng + ?Sized>(n_samples: usize, noise: f64, rng: &mut R) -> Dataset {
    let half = n_samples / 2;
    let info = moons_info();
    if half == 0 {
        return Dataset::empty(info);
    }

    let jitter = |rng: &mut R| (rng.gen::<f64>() - 0.5) * noise;
    let mut points = Vec::with_capacity(n_samples);
    for i in 0..n_samples {
        let angle = PI * i as f64 / half as f64;
        let (x1, x2) = if i < half {
            (angle.cos(), angle.sin())
        } else {
            (1.0 - angle.cos(), 0.5 - angle.sin())
        };
        points.push([x1 + jitter(rng), x2 + jitter(rng)]);
    }

    two_class(points, half, info)
}

/// Simplified breast-cancer data: mean radius against mean texture.
pub fn make_cancer<R: Rng + ?Sized>(n_samples: usize, rng: &mut R) -> Dataset {
    let half = n_samples / 2;
    let mut points = Vec::with_capacity(half * 2);
    // Benign
    for _ in 0..half {
        points.push(uniform_point(rng, [10.0, 0.05], [5.0, 0.15]));
    }
    // Malignant
    for _ in 0..half {
        points.push(uniform_point(rng, [18.0, 0.15], [7.0, 0.2]));
    }

    two_class(points, half, cancer_info())
}

/// Two uniform boxes offset by `±separation` on the first axis, with label noise.
///
/// After the points are laid out every label is flipped with probability `flip_prob`.
/// The dataset is declared separable only when `separation > 1`.
pub fn make_noisy_classification<R: Rng + ?Sized>(
    n_samples: usize,
    separation: f64,
    flip_prob: f64,
    rng: &mut R,
) -> Dataset {
    let half = n_samples / 2;
    let mut points = Vec::with_capacity(half * 2);
    for offset in [-separation, separation] {
        for _ in 0..half {
            points.push(uniform_point(rng, [offset - 2.0, -2.0], [4.0, 4.0]));
        }
    }

    let mut dataset = two_class(points, half, noisy_info(separation));
    let flip_prob = flip_prob.clamp(0.0, 1.0);
    for label in dataset.y.iter_mut() {
        if rng.gen::<f64>() < flip_prob {
            *label = label.flipped();
        }
    }
    dataset
}

/// Two uniform boxes of half-width `spread` around caller-supplied centres.
pub fn make_custom<R: Rng + ?Sized>(
    n_samples: usize,
    center0: [f64; 2],
    center1: [f64; 2],
    spread: f64,
    rng: &mut R,
) -> Dataset {
    let half = n_samples / 2;
    let width = [2.0 * spread, 2.0 * spread];
    let mut points = Vec::with_capacity(half * 2);
    for center in [center0, center1] {
        let low = [center[0] - spread, center[1] - spread];
        for _ in 0..half {
            points.push(uniform_point(rng, low, width));
        }
    }

    two_class(points, half, custom_info())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn count(y: &[Label], label: Label) -> usize {
        y.iter().filter(|&&l| l == label).count()
    }

    #[test]
    fn test_make_blobs() {
        let mut rng = StdRng::seed_from_u64(42);
        let ds = make_blobs(200, 1.5, &mut rng);
        assert_eq!(ds.x.rows(), 200);
        assert_eq!(ds.x.cols(), 2);
        assert_eq!(count(&ds.y, Label::Zero), 100);
        assert!(ds.info.linearly_separable);

        let mean0 = ds.x.select_rows(&(0..100).collect::<Vec<_>>()).mean_axis0().unwrap();
        assert!((mean0[0] + 3.0).abs() < 0.6);
        assert!((mean0[1] + 3.0).abs() < 0.6);
    }

    #[test]
    fn test_odd_count_drops_one_sample() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(make_blobs(11, 1.0, &mut rng).len(), 10);
        assert_eq!(make_iris(7, &mut rng).len(), 6);
        assert_eq!(make_cancer(5, &mut rng).len(), 4);
        assert_eq!(make_custom(3, [0.0, 0.0], [1.0, 1.0], 0.5, &mut rng).len(), 2);
    }

    #[test]
    fn test_randn_moments() {
        let mut rng = StdRng::seed_from_u64(7);
        let draws: Vec<f64> = (0..20_000).map(|_| randn(&mut rng)).collect();
        let mean = draws.iter().sum::<f64>() / draws.len() as f64;
        let var = draws.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / draws.len() as f64;
        assert!(mean.abs() < 0.05);
        assert!((var - 1.0).abs() < 0.05);
    }

    #[test]
    fn test_iris_ranges_are_disjoint() {
        let mut rng = StdRng::seed_from_u64(3);
        let ds = make_iris(100, &mut rng);
        for (row, label) in ds.x.iter_rows().zip(&ds.y) {
            match label {
                Label::Zero => assert!(row[1] >= 1.0 && row[1] < 1.8),
                Label::One => assert!(row[1] >= 3.5 && row[1] < 5.0),
            }
        }
    }

    #[test]
    fn test_make_moons() {
        let mut rng = StdRng::seed_from_u64(5);
        let ds = make_moons(200, 0.0, &mut rng);
        assert_eq!(ds.len(), 200);
        assert!(!ds.info.linearly_separable);
        // Noise-free first moon lies on the unit circle.
        let r = ds.x.row(10);
        assert!(((r[0] * r[0] + r[1] * r[1]).sqrt() - 1.0).abs() < 1e-12);

        let odd = make_moons(9, 0.1, &mut rng);
        assert_eq!(odd.len(), 9);
        assert_eq!(count(&odd.y, Label::One), 5);

        assert!(make_moons(1, 0.1, &mut rng).is_empty());
    }

    #[test]
    fn test_cancer_scales() {
        let mut rng = StdRng::seed_from_u64(9);
        let ds = make_cancer(50, &mut rng);
        for row in ds.x.iter_rows() {
            assert!(row[0] >= 10.0 && row[0] < 25.0);
            assert!(row[1] >= 0.05 && row[1] < 0.35);
        }
    }

    #[test]
    fn test_noisy_flips_labels() {
        let mut rng = StdRng::seed_from_u64(11);
        let clean = make_noisy_classification(400, 1.5, 0.0, &mut rng);
        assert_eq!(count(&clean.y, Label::Zero), 200);
        assert!(clean.info.linearly_separable);

        let all_flipped = make_noisy_classification(400, 1.5, 1.0, &mut rng);
        assert!(all_flipped.y[..200].iter().all(|&l| l == Label::One));
        assert!(all_flipped.y[200..].iter().all(|&l| l == Label::Zero));

        let close = make_noisy_classification(10, 0.5, 0.05, &mut rng);
        assert!(!close.info.linearly_separable);
        let edge = make_noisy_classification(10, 1.0, 0.05, &mut rng);
        assert!(!edge.info.linearly_separable);
    }

    #[test]
    fn test_custom_boxes() {
        let mut rng = StdRng::seed_from_u64(13);
        let ds = make_custom(100, [-2.0, -2.0], [2.0, 2.0], 1.0, &mut rng);
        for (row, label) in ds.x.iter_rows().zip(&ds.y) {
            let c = if *label == Label::Zero { -2.0 } else { 2.0 };
            assert!((row[0] - c).abs() <= 1.0);
            assert!((row[1] - c).abs() <= 1.0);
        }
    }

    #[test]
    fn test_same_seed_same_data() {
        let a = make_blobs(20, 1.0, &mut StdRng::seed_from_u64(99));
        let b = make_blobs(20, 1.0, &mut StdRng::seed_from_u64(99));
        assert_eq!(a.x, b.x);
        assert_eq!(a.y, b.y);
    }
}
