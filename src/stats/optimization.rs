//! Derivative-free minimisation used for model parameter estimation

use std::cmp::Ordering;

/// Configuration for the Nelder-Mead simplex search
#[derive(Debug, Clone)]
pub struct NelderMeadConfig {
    /// Maximum number of iterations
    pub max_iter: usize,
    /// Stop once the spread of objective values across the simplex is below this
    pub tolerance: f64,
    /// Reflection coefficient
    pub alpha: f64,
    /// Expansion coefficient
    pub gamma: f64,
    /// Contraction coefficient
    pub rho: f64,
    /// Shrink coefficient
    pub sigma: f64,
    /// Relative size of the initial simplex
    pub initial_step: f64,
}

impl Default for NelderMeadConfig {
    fn default() -> Self {
        NelderMeadConfig {
            max_iter: 1000,
            tolerance: 1e-8,
            alpha: 1.0,
            gamma: 2.0,
            rho: 0.5,
            sigma: 0.5,
            initial_step: 0.05,
        }
    }
}

/// Outcome of a Nelder-Mead search
#[derive(Debug, Clone)]
pub struct NelderMeadResult {
    pub optimal_point: Vec<f64>,
    pub optimal_value: f64,
    pub iterations: usize,
    pub converged: bool,
}

fn clamp_point(point: &mut [f64], bounds: Option<&[(f64, f64)]>) {
    if let Some(bounds) = bounds {
        for (x, &(lo, hi)) in point.iter_mut().zip(bounds) {
            *x = x.clamp(lo, hi);
        }
    }
}

/// Minimise `objective` starting from `initial`.
///
/// Points are clamped into `bounds` after every move. Non-finite objective
/// values are treated as `+inf` so the search steps away from them.
pub fn nelder_mead<F>(
    objective: F,
    initial: &[f64],
    bounds: Option<&[(f64, f64)]>,
    config: NelderMeadConfig,
) -> NelderMeadResult
where
    F: Fn(&[f64]) -> f64,
{
    let eval = |x: &[f64]| {
        let v = objective(x);
        if v.is_finite() {
            v
        } else {
            f64::INFINITY
        }
    };

    let n = initial.len();
    let mut start = initial.to_vec();
    clamp_point(&mut start, bounds);

    let mut simplex: Vec<(Vec<f64>, f64)> = Vec::with_capacity(n + 1);
    let f0 = eval(&start);
    simplex.push((start.clone(), f0));
    for i in 0..n {
        let mut vertex = start.clone();
        vertex[i] += config.initial_step * vertex[i].abs().max(1.0);
        clamp_point(&mut vertex, bounds);
        let fv = eval(&vertex);
        simplex.push((vertex, fv));
    }

    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iter {
        simplex.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

        let best = simplex[0].1;
        let worst = simplex[n].1;
        if (worst - best).abs() < config.tolerance {
            converged = true;
            break;
        }
        iterations += 1;

        let mut centroid = vec![0.0; n];
        for (vertex, _) in simplex.iter().take(n) {
            for (c, x) in centroid.iter_mut().zip(vertex) {
                *c += x / n as f64;
            }
        }

        let worst_point = simplex[n].0.clone();
        let along = |coef: f64, target: &[f64]| -> Vec<f64> {
            let mut p: Vec<f64> = centroid
                .iter()
                .zip(target)
                .map(|(c, t)| c + coef * (t - c))
                .collect();
            clamp_point(&mut p, bounds);
            p
        };

        let reflected = along(-config.alpha, &worst_point);
        let f_reflected = eval(&reflected);

        if f_reflected < best {
            let expanded = along(config.gamma, &reflected);
            let f_expanded = eval(&expanded);
            simplex[n] = if f_expanded < f_reflected {
                (expanded, f_expanded)
            } else {
                (reflected, f_reflected)
            };
            continue;
        }

        if f_reflected < simplex[n - 1].1 {
            simplex[n] = (reflected, f_reflected);
            continue;
        }

        let (contracted, f_contracted) = if f_reflected < worst {
            let p = along(config.rho, &reflected);
            let f = eval(&p);
            (p, f)
        } else {
            let p = along(config.rho, &worst_point);
            let f = eval(&p);
            (p, f)
        };

        if f_contracted < f_reflected.min(worst) {
            simplex[n] = (contracted, f_contracted);
            continue;
        }

        let best_point = simplex[0].0.clone();
        for (vertex, value) in simplex.iter_mut().skip(1) {
            for (x, b) in vertex.iter_mut().zip(&best_point) {
                *x = b + config.sigma * (*x - b);
            }
            clamp_point(vertex, bounds);
            *value = eval(vertex);
        }
    }

    simplex.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
    let (optimal_point, optimal_value) = simplex.swap_remove(0);

    NelderMeadResult {
        optimal_point,
        optimal_value,
        iterations,
        converged,
    }
}
