use nalgebra::DVector;

/// Strategy constants derived from the dimension and population size.
///
/// These follow the standard CMA-ES defaults: positive log-rank weights over
/// the best half of the population, with cumulation and learning rates
/// scaled by the variance-effective selection mass `mueff`.
#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    pub(super) dimension: usize,
    pub(super) lambda: usize,
    pub(super) mu: usize,
    pub(super) weights: DVector<f64>,
    pub(super) mueff: f64,
    pub(super) cc: f64,
    pub(super) cs: f64,
    pub(super) c1: f64,
    pub(super) cmu: f64,
    pub(super) damps: f64,
    pub(super) chi_n: f64,
}

impl Params {
    /// Derives the strategy constants.
    ///
    /// Both arguments must be positive; [`Config`](super::Config) guarantees this.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(dimension: usize, lambda: usize) -> Self {
        let n = dimension as f64;
        let k = lambda as f64;
        let mu = (lambda / 2).max(1);

        let weights = if mu == 1 {
            DVector::from_element(1, 1.0)
        } else {
            let top = ((k + 1.0) / 2.0).ln();
            let raw = DVector::from_fn(mu, |i, _| top - ((i + 1) as f64).ln());
            let sum = raw.sum();
            raw / sum
        };
        let mueff = 1.0 / weights.norm_squared();

        let cc = (4.0 + mueff / n) / (n + 4.0 + 2.0 * mueff / n);
        let cs = (mueff + 2.0) / (n + mueff + 5.0);
        let c1 = 2.0 / ((n + 1.3).powi(2) + mueff);
        let cmu_max = 2.0 * (mueff - 2.0 + 1.0 / mueff) / ((n + 2.0).powi(2) + mueff);
        let cmu = (1.0 - c1).min(cmu_max);
        let damps = 2.0 * mueff / k + 0.3 + cs;
        let chi_n = n.sqrt() * (1.0 - 1.0 / (4.0 * n) + 1.0 / (21.0 * n * n));

        Self {
            dimension,
            lambda,
            mu,
            weights,
            mueff,
            cc,
            cs,
            c1,
            cmu,
            damps,
            chi_n,
        }
    }

    /// Returns the number of parents used for recombination.
    #[must_use]
    pub fn mu(&self) -> usize {
        self.mu
    }

    /// Returns the recombination weights, best parent first.
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        self.weights.as_slice()
    }

    /// Returns the variance-effective selection mass.
    #[must_use]
    pub fn mueff(&self) -> f64 {
        self.mueff
    }

    /// Returns the expected norm of an `N(0, I)` sample.
    #[must_use]
    pub fn chi_n(&self) -> f64 {
        self.chi_n
    }
}
