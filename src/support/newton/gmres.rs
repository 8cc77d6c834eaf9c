//! Restarted GMRES for the small dense systems of a Newton step.

use super::{LinearConfig, LinearSolveError};

/// Solves `a · x = b` with restarted GMRES, starting from `x = 0`.
///
/// The Krylov subspace restarts every `N` inner iterations, which for an
/// exact-arithmetic nonsingular system is enough to reach the solution in
/// one cycle. The inner iteration count across all restarts is capped by
/// `config.max_iters`.
///
/// # Errors
///
/// Returns [`LinearSolveError`] if the Arnoldi process breaks down on a
/// singular matrix, the residual becomes non-finite, or the relative
/// residual is still above `config.rel_tol` when the iteration cap is hit.
pub(super) fn solve<const N: usize>(
    a: &[[f64; N]; N],
    b: &[f64; N],
    config: &LinearConfig,
) -> Result<[f64; N], LinearSolveError> {
    let mut x = [0.0; N];

    let b_norm = norm(b);
    if b_norm == 0.0 {
        return Ok(x);
    }
    let tol = config.rel_tol * b_norm;

    let mut iters = 0;
    loop {
        let ax = mat_vec(a, &x);
        let r: [f64; N] = std::array::from_fn(|i| b[i] - ax[i]);
        let beta = norm(&r);

        if !beta.is_finite() {
            return Err(LinearSolveError {
                iters,
                residual: beta,
            });
        }
        if beta <= tol {
            return Ok(x);
        }
        if iters >= config.max_iters {
            return Err(LinearSolveError {
                iters,
                residual: beta / b_norm,
            });
        }

        let mut basis: Vec<[f64; N]> = Vec::with_capacity(N + 1);
        basis.push(r.map(|ri| ri / beta));

        // Upper Hessenberg matrix, reduced in place to upper triangular by Givens rotations.
        let mut h = vec![vec![0.0; N]; N + 1];
        let mut cs = vec![0.0; N];
        let mut sn = vec![0.0; N];
        let mut g = vec![0.0; N + 1];
        g[0] = beta;

        let mut k = 0;
        while k < N && iters < config.max_iters {
            iters += 1;

            let mut w = mat_vec(a, &basis[k]);
            for (i, v) in basis.iter().enumerate() {
                h[i][k] = dot(&w, v);
                axpy(&mut w, -h[i][k], v);
            }
            let w_norm = norm(&w);
            h[k + 1][k] = w_norm;

            for i in 0..k {
                let rotated = cs[i] * h[i][k] + sn[i] * h[i + 1][k];
                h[i + 1][k] = -sn[i] * h[i][k] + cs[i] * h[i + 1][k];
                h[i][k] = rotated;
            }

            let denom = h[k][k].hypot(h[k + 1][k]);
            if denom == 0.0 || !denom.is_finite() {
                return Err(LinearSolveError {
                    iters,
                    residual: g[k].abs() / b_norm,
                });
            }
            cs[k] = h[k][k] / denom;
            sn[k] = h[k + 1][k] / denom;
            h[k][k] = denom;
            h[k + 1][k] = 0.0;
            g[k + 1] = -sn[k] * g[k];
            g[k] *= cs[k];

            k += 1;

            // A zero `w` means the subspace is invariant and the solution is exact.
            if g[k].abs() <= tol || w_norm == 0.0 {
                break;
            }
            basis.push(w.map(|wi| wi / w_norm));
        }

        let mut y = vec![0.0; k];
        for i in (0..k).rev() {
            let tail: f64 = ((i + 1)..k).map(|j| h[i][j] * y[j]).sum();
            y[i] = (g[i] - tail) / h[i][i];
        }
        for (yi, v) in y.iter().zip(&basis) {
            axpy(&mut x, *yi, v);
        }
    }
}

fn mat_vec<const N: usize>(a: &[[f64; N]; N], x: &[f64; N]) -> [f64; N] {
    std::array::from_fn(|i| dot(&a[i], x))
}

fn dot<const N: usize>(u: &[f64; N], v: &[f64; N]) -> f64 {
    u.iter().zip(v).map(|(ui, vi)| ui * vi).sum()
}

fn norm<const N: usize>(v: &[f64; N]) -> f64 {
    dot(v, v).sqrt()
}

/// `y += alpha · x`
fn axpy<const N: usize>(y: &mut [f64; N], alpha: f64, x: &[f64; N]) {
    for (yi, xi) in y.iter_mut().zip(x) {
        *yi += alpha * xi;
    }
}
