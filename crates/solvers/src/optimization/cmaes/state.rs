use std::collections::VecDeque;

use nalgebra::{DMatrix, DVector, SymmetricEigen};

use haru_core::Point;

use super::{Error, Params};

/// Number of best-so-far objectives kept for stagnation checks.
pub(super) const STAGNATION_WINDOW: usize = 25;

/// Search distribution and bookkeeping owned by the engine.
#[derive(Debug, Clone)]
pub(super) struct State {
    pub(super) mean: DVector<f64>,
    pub(super) sigma: f64,
    cov: DMatrix<f64>,
    /// Eigenvectors of `cov`, one per column.
    basis: DMatrix<f64>,
    /// Square roots of the eigenvalues of `cov`.
    scales: DVector<f64>,
    p_sigma: DVector<f64>,
    p_c: DVector<f64>,
    pub(super) generation: usize,
    pub(super) best: Option<Point>,
    pub(super) recent_best: VecDeque<f64>,
}

impl State {
    pub(super) fn new(initial_point: &[f64], sigma: f64) -> Self {
        let n = initial_point.len();
        Self {
            mean: DVector::from_column_slice(initial_point),
            sigma,
            cov: DMatrix::identity(n, n),
            basis: DMatrix::identity(n, n),
            scales: DVector::from_element(n, 1.0),
            p_sigma: DVector::zeros(n),
            p_c: DVector::zeros(n),
            generation: 0,
            best: None,
            recent_best: VecDeque::with_capacity(STAGNATION_WINDOW),
        }
    }

    /// Maps a standard normal sample onto the search distribution.
    ///
    /// `x = m + σ · B · (D ∘ z)`
    pub(super) fn sample(&self, z: &DVector<f64>) -> DVector<f64> {
        let y = &self.basis * self.scales.component_mul(z);
        &self.mean + y * self.sigma
    }

    /// Applies `C^(-1/2) = B · D⁻¹ · Bᵀ` to `v`.
    fn whiten(&self, v: &DVector<f64>) -> DVector<f64> {
        let rotated = self.basis.transpose() * v;
        &self.basis * rotated.component_div(&self.scales)
    }

    /// Records the generation's best point and the best-so-far window.
    pub(super) fn record_best(&mut self, candidate: Point) {
        if self
            .best
            .as_ref()
            .is_none_or(|best| candidate.improves_on(best))
        {
            self.best = Some(candidate);
        }
        if let Some(best) = &self.best {
            if self.recent_best.len() == STAGNATION_WINDOW {
                self.recent_best.pop_front();
            }
            self.recent_best.push_back(best.objective);
        }
    }

    /// Updates mean, step size, evolution paths, and covariance.
    ///
    /// `steps` holds `(x - m) / σ` for the `mu` best candidates, best first,
    /// measured against the distribution that produced them.
    pub(super) fn update(
        &mut self,
        params: &Params,
        steps: &[DVector<f64>],
        only_diag: bool,
    ) -> Result<(), Error> {
        let n = params.dimension;

        let y_w = steps
            .iter()
            .zip(params.weights.iter())
            .fold(DVector::<f64>::zeros(n), |acc, (y, &w)| acc + y * w);

        self.mean += &y_w * self.sigma;
        self.generation += 1;

        // Step-size path and cumulative step-size adaptation.
        let cs = params.cs;
        let ps_gain = (cs * (2.0 - cs) * params.mueff).sqrt();
        self.p_sigma = &self.p_sigma * (1.0 - cs) + self.whiten(&y_w) * ps_gain;
        let ps_norm = self.p_sigma.norm();

        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let g = self.generation as i32;
        let decay = (1.0 - (1.0 - cs).powi(2 * g)).sqrt();
        #[allow(clippy::cast_precision_loss)]
        let threshold = (1.4 + 2.0 / (n as f64 + 1.0)) * params.chi_n;
        let h_sigma = if ps_norm / decay < threshold { 1.0 } else { 0.0 };

        // Covariance path, rank-one and rank-mu updates.
        let cc = params.cc;
        let pc_gain = h_sigma * (cc * (2.0 - cc) * params.mueff).sqrt();
        self.p_c = &self.p_c * (1.0 - cc) + &y_w * pc_gain;
        let delta_h = (1.0 - h_sigma) * cc * (2.0 - cc);

        let rank_one = &self.p_c * self.p_c.transpose();
        let rank_mu = steps
            .iter()
            .zip(params.weights.iter())
            .fold(DMatrix::<f64>::zeros(n, n), |acc, (y, &w)| {
                acc + (y * y.transpose()) * w
            });

        let decay_c = 1.0 - params.c1 - params.cmu * params.weights.sum();
        self.cov = &self.cov * decay_c
            + (rank_one + &self.cov * delta_h) * params.c1
            + rank_mu * params.cmu;

        let log_step = (cs / params.damps) * (ps_norm / params.chi_n - 1.0);
        self.sigma *= log_step.min(1.0).exp();

        self.refresh_decomposition(only_diag)
    }

    /// Symmetrizes the covariance matrix and recomputes `B` and `D`.
    fn refresh_decomposition(&mut self, only_diag: bool) -> Result<(), Error> {
        let n = self.cov.nrows();

        if only_diag {
            self.cov = DMatrix::from_diagonal(&self.cov.diagonal());
        } else {
            self.cov = (&self.cov + self.cov.transpose()) * 0.5;
        }

        let finite = self.cov.iter().all(|v| v.is_finite());
        if !finite || !self.sigma.is_finite() || self.sigma <= 0.0 {
            return Err(Error::Degenerate);
        }

        if only_diag {
            self.basis = DMatrix::identity(n, n);
            self.scales = self.cov.diagonal().map(|v| v.max(f64::EPSILON).sqrt());
            return Ok(());
        }

        let eigen = SymmetricEigen::try_new(self.cov.clone(), f64::EPSILON, 0)
            .ok_or(Error::Degenerate)?;
        self.scales = eigen.eigenvalues.map(|v| v.max(f64::EPSILON).sqrt());
        self.basis = eigen.eigenvectors;

        Ok(())
    }

    #[cfg(test)]
    pub(super) fn cov(&self) -> &DMatrix<f64> {
        &self.cov
    }
}
