//! Zero-smoothing cubic spline interpolation of sampled functions.
//!
//! [`CubicSpline`] passes exactly through every sample and uses not-a-knot end
//! conditions, so the first two and the last two pieces are each a single
//! cubic. With three samples it reduces to the interpolating parabola, and
//! with two to the straight line.
//!
//! ```
//! use ndarray as nd;
//! use radatom::interp::{ CubicSpline, Zero };
//!
//! let x: nd::Array1<f64> = nd::Array::linspace(-5.0, 5.0, 1000);
//! let y = x.mapv(|xk| (xk + 3.0) * (xk - 0.5) * (xk - 2.0));
//! let spline = CubicSpline::new(&x, &y).unwrap();
//! let zeros = spline.roots_of_kind(Zero::All);
//! assert!(
//!     [-3.0, 0.5, 2.0].into_iter()
//!         .zip(zeros)
//!         .all(|(expected, computed)| (computed - expected).abs() < 1e-6)
//! )
//! ```

use ndarray as nd;
use log::{ debug, warn };
use crate::error::*;

pub type SplineResult<T> = Result<T, SplineError>;

// bisection steps used to polish a bracketed root on [0, 1]
const ROOT_BISECTIONS: usize = 128;

/// Specifies a set of zeros to look for in [`CubicSpline::roots_of_kind`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Zero {
    /// Points at which a function changes from positive to negative.
    Falling,
    /// Points at which a function changes from negative to positive.
    Rising,
    /// Either/both of the above, plus points where the function only touches
    /// zero.
    All,
}

impl Zero {
    fn matches(&self, slope: f64) -> bool {
        match self {
            Self::Falling if slope < 0.0 => true,
            Self::Rising if slope > 0.0 => true,
            Self::All => true,
            _ => false,
        }
    }
}

/// Piecewise-cubic interpolant through `(x, y)` samples.
///
/// On the interval `[x[i], x[i + 1]]` the spline is
/// ```text
/// p(x) = a[i] + b[i] h + c[i] h² + d[i] h³,  h = x - x[i]
/// ```
#[derive(Clone, Debug)]
pub struct CubicSpline {
    x: nd::Array1<f64>,
    y: nd::Array1<f64>,
    // [a, b, c, d] for each interval
    coeffs: Vec<[f64; 4]>,
}

// solve a tridiagonal system in place; `lower[0]` and `upper[n - 1]` are unused
fn solve_tridiagonal(
    lower: &[f64],
    mut diag: Vec<f64>,
    upper: &[f64],
    mut rhs: Vec<f64>,
) -> Vec<f64>
{
    let n = diag.len();
    for i in 1..n {
        let w = lower[i] / diag[i - 1];
        diag[i] -= w * upper[i - 1];
        rhs[i] -= w * rhs[i - 1];
    }
    rhs[n - 1] /= diag[n - 1];
    for i in (0..n - 1).rev() {
        rhs[i] = (rhs[i] - upper[i] * rhs[i + 1]) / diag[i];
    }
    rhs
}

// first derivatives at the knots under not-a-knot conditions
fn knot_slopes(x: &[f64], y: &[f64]) -> Vec<f64> {
    let n = x.len();
    let dx: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
    let m: Vec<f64>
        = y.windows(2).zip(&dx)
        .map(|(w, h)| (w[1] - w[0]) / h)
        .collect();
    match n {
        2 => vec![m[0], m[0]],
        3 => {
            // single parabola through all three points
            let c = (m[1] - m[0]) / (x[2] - x[0]);
            x.iter().map(|xk| m[0] + c * (2.0 * xk - x[0] - x[1])).collect()
        },
        _ => {
            let mut lower = vec![0.0; n];
            let mut diag = vec![0.0; n];
            let mut upper = vec![0.0; n];
            let mut rhs = vec![0.0; n];

            let d0 = x[2] - x[0];
            diag[0] = dx[1];
            upper[0] = d0;
            rhs[0] = ((dx[0] + 2.0 * d0) * dx[1] * m[0] + dx[0].powi(2) * m[1]) / d0;

            for i in 1..n - 1 {
                lower[i] = dx[i];
                diag[i] = 2.0 * (dx[i - 1] + dx[i]);
                upper[i] = dx[i - 1];
                rhs[i] = 3.0 * (dx[i] * m[i - 1] + dx[i - 1] * m[i]);
            }

            let dn = x[n - 1] - x[n - 3];
            lower[n - 1] = dn;
            diag[n - 1] = dx[n - 3];
            rhs[n - 1]
                = (dx[n - 2].powi(2) * m[n - 3]
                    + (2.0 * dn + dx[n - 2]) * dx[n - 3] * m[n - 2]) / dn;

            solve_tridiagonal(&lower, diag, &upper, rhs)
        },
    }
}

// real roots in [0, 1] of a0 + a1 t + a2 t² + a3 t³, ascending; `ends` holds
// the exact sample values at t = 0 and t = 1, and the right endpoint is only
// included if `closed`
fn cubic_roots_unit(a: [f64; 4], ends: [f64; 2], closed: bool) -> Vec<f64> {
    let p = |t: f64| {
        if t == 0.0 {
            ends[0]
        } else if t == 1.0 {
            ends[1]
        } else {
            a[0] + t * (a[1] + t * (a[2] + t * a[3]))
        }
    };

    // split [0, 1] at critical points so that each piece is monotonic
    let mut breaks: Vec<f64> = vec![0.0];
    let (qa, qb, qc) = (3.0 * a[3], 2.0 * a[2], a[1]);
    let mut crit: Vec<f64> = Vec::new();
    if qa != 0.0 {
        let disc = qb * qb - 4.0 * qa * qc;
        if disc >= 0.0 {
            let sq = disc.sqrt();
            let qq = -0.5 * (qb + qb.signum() * sq);
            if qq != 0.0 {
                crit.push(qq / qa);
                crit.push(qc / qq);
            } else {
                crit.push(0.0);
            }
        }
    } else if qb != 0.0 {
        crit.push(-qc / qb);
    }
    crit.sort_by(|l, r| l.total_cmp(r));
    breaks.extend(crit.into_iter().filter(|t| *t > 0.0 && *t < 1.0));
    breaks.push(1.0);

    let mut roots: Vec<f64> = Vec::new();
    for (k, w) in breaks.windows(2).enumerate() {
        let (mut lo, mut hi) = (w[0], w[1]);
        let (mut plo, phi) = (p(lo), p(hi));
        if plo == 0.0 { roots.push(lo); }
        if phi == 0.0 {
            if closed && k == breaks.len() - 2 { roots.push(hi); }
            continue;
        }
        if plo == 0.0 || plo * phi > 0.0 { continue; }
        for _ in 0..ROOT_BISECTIONS {
            let mid = 0.5 * (lo + hi);
            if mid <= lo || mid >= hi { break; }
            let pmid = p(mid);
            if pmid == 0.0 { lo = mid; hi = mid; break; }
            if plo * pmid < 0.0 {
                hi = mid;
            } else {
                lo = mid;
                plo = pmid;
            }
        }
        roots.push(0.5 * (lo + hi));
    }
    roots
}

impl CubicSpline {
    /// Fit the interpolating spline through `(x, y)`.
    ///
    /// `x` must have at least two strictly increasing, finite points and `y`
    /// must be finite and of the same length.
    pub fn new<S, T>(
        x: &nd::ArrayBase<S, nd::Ix1>,
        y: &nd::ArrayBase<T, nd::Ix1>,
    ) -> SplineResult<Self>
    where
        S: nd::Data<Elem = f64>,
        T: nd::Data<Elem = f64>,
    {
        LengthError::check(x, y)?;
        MeshError::check_increasing(x)?;
        if let Some((k, yk)) = y.iter().enumerate().find(|(_, yk)| !yk.is_finite()) {
            return Err(SplineError::BadValue(k, *yk));
        }
        let xv: Vec<f64> = x.to_vec();
        let yv: Vec<f64> = y.to_vec();
        let n = xv.len();
        if n < 4 {
            warn!(
                "interp::CubicSpline: only {} points given; the spline degrades \
                to a polynomial of degree {}",
                n, n - 1,
            );
        }
        let s = knot_slopes(&xv, &yv);
        let coeffs: Vec<[f64; 4]>
            = (0..n - 1)
            .map(|i| {
                let h = xv[i + 1] - xv[i];
                let m = (yv[i + 1] - yv[i]) / h;
                let t = (s[i] + s[i + 1] - 2.0 * m) / h;
                [yv[i], s[i], (m - s[i]) / h - t, t / h]
            })
            .collect();
        debug!("interp::CubicSpline: fitted {} pieces", coeffs.len());
        Ok(Self { x: nd::Array1::from(xv), y: nd::Array1::from(yv), coeffs })
    }

    /// Get a reference to the knot positions.
    pub fn knots(&self) -> &nd::Array1<f64> { &self.x }

    /// Lower bound of the interpolation interval.
    pub fn start(&self) -> f64 { self.x[0] }

    /// Upper bound of the interpolation interval.
    pub fn stop(&self) -> f64 { self.x[self.x.len() - 1] }

    // index of the piece containing `x`, using the end pieces outside the knot
    // span
    fn piece(&self, x: f64) -> usize {
        let k = self.x.as_slice()
            .map(|xs| xs.partition_point(|xk| *xk <= x))
            .unwrap_or_else(|| self.x.iter().take_while(|xk| **xk <= x).count());
        k.saturating_sub(1).min(self.coeffs.len() - 1)
    }

    /// Evaluate the spline at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        let i = self.piece(x);
        let [a, b, c, d] = self.coeffs[i];
        let h = x - self.x[i];
        a + h * (b + h * (c + h * d))
    }

    /// Evaluate the spline at every point in `x`.
    pub fn eval_many<S>(&self, x: &nd::ArrayBase<S, nd::Ix1>) -> nd::Array1<f64>
    where S: nd::Data<Elem = f64>
    {
        x.mapv(|xk| self.eval(xk))
    }

    /// Return the value and the first three derivatives of the spline at `x`.
    ///
    /// Points outside the knot span are extrapolated from the nearest piece.
    pub fn derivatives(&self, x: f64) -> [f64; 4] {
        if x < self.start() || x > self.stop() {
            warn!(
                "interp::CubicSpline::derivatives: {} lies outside [{}, {}]; \
                extrapolating",
                x, self.start(), self.stop(),
            );
        }
        let i = self.piece(x);
        let [a, b, c, d] = self.coeffs[i];
        let h = x - self.x[i];
        [
            a + h * (b + h * (c + h * d)),
            b + h * (2.0 * c + h * 3.0 * d),
            2.0 * c + 6.0 * d * h,
            6.0 * d,
        ]
    }

    /// Definite integral of the spline from `a` to `b`.
    ///
    /// Bounds are clamped to the knot span, i.e. the spline is taken to be zero
    /// outside of it. If `a > b` the result is negated.
    pub fn integral(&self, a: f64, b: f64) -> f64 {
        if a > b { return -self.integral(b, a); }
        let a = a.clamp(self.start(), self.stop());
        let b = b.clamp(self.start(), self.stop());
        if a == b { return 0.0; }
        let prim = |i: usize, h: f64| -> f64 {
            let [ca, cb, cc, cd] = self.coeffs[i];
            h * (ca + h * (cb / 2.0 + h * (cc / 3.0 + h * cd / 4.0)))
        };
        let ia = self.piece(a);
        let ib = self.piece(b);
        if ia == ib {
            return prim(ia, b - self.x[ia]) - prim(ia, a - self.x[ia]);
        }
        let head = prim(ia, self.x[ia + 1] - self.x[ia]) - prim(ia, a - self.x[ia]);
        let body: f64
            = (ia + 1..ib)
            .map(|i| prim(i, self.x[i + 1] - self.x[i]))
            .sum();
        let tail = prim(ib, b - self.x[ib]);
        head + body + tail
    }

    /// Return all real zeros of the spline within the knot span, in ascending
    /// order.
    ///
    /// Pieces that vanish identically contribute no zeros.
    pub fn roots(&self) -> Vec<f64> {
        let npieces = self.coeffs.len();
        let mut roots: Vec<f64> = Vec::new();
        for (i, [a, b, c, d]) in self.coeffs.iter().copied().enumerate() {
            if a == 0.0 && b == 0.0 && c == 0.0 && d == 0.0 { continue; }
            let h = self.x[i + 1] - self.x[i];
            let scaled = [a, b * h, c * h.powi(2), d * h.powi(3)];
            let ends = [self.y[i], self.y[i + 1]];
            let closed = i == npieces - 1;
            for t in cubic_roots_unit(scaled, ends, closed) {
                let r = self.x[i] + t * h;
                // a zero on a knot is found at the end of one piece only
                if roots.last().map(|last| r > *last).unwrap_or(true) {
                    roots.push(r);
                }
            }
        }
        roots
    }

    /// Return the zeros of the spline of a given kind, classified by the sign of
    /// the first derivative at each zero.
    pub fn roots_of_kind(&self, kind: Zero) -> Vec<f64> {
        self.roots().into_iter()
            .filter(|r| kind.matches(self.derivatives(*r)[1]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use super::*;

    #[test]
    fn reproduces_cubics() {
        // not-a-knot splines are exact for cubic polynomials
        let x = nd::array![0.0, 0.3, 0.7, 1.5, 2.0, 3.1];
        let f = |t: f64| 1.0 - 2.0 * t + 0.5 * t.powi(2) + 0.25 * t.powi(3);
        let y = x.mapv(f);
        let spline = CubicSpline::new(&x, &y).unwrap();
        for t in [0.0, 0.1, 1.0, 1.77, 2.9, 3.1] {
            assert_relative_eq!(spline.eval(t), f(t), epsilon = 1e-10);
            let [v, d1, d2, d3] = spline.derivatives(t);
            assert_relative_eq!(v, f(t), epsilon = 1e-10);
            assert_relative_eq!(d1, -2.0 + t + 0.75 * t.powi(2), epsilon = 1e-9);
            assert_relative_eq!(d2, 1.0 + 1.5 * t, epsilon = 1e-8);
            assert_relative_eq!(d3, 1.5, epsilon = 1e-8);
        }
        let exact = |t: f64| t - t.powi(2) + t.powi(3) / 6.0 + t.powi(4) / 16.0;
        assert_relative_eq!(
            spline.integral(0.2, 2.5), exact(2.5) - exact(0.2), epsilon = 1e-10);
        assert_relative_eq!(
            spline.integral(2.5, 0.2), exact(0.2) - exact(2.5), epsilon = 1e-10);
    }

    #[test]
    fn interpolates_samples() {
        let x: nd::Array1<f64> = nd::Array::linspace(0.0, 6.0, 40);
        let y = x.mapv(f64::sin);
        let spline = CubicSpline::new(&x, &y).unwrap();
        for (xk, yk) in x.iter().zip(&y) {
            assert_relative_eq!(spline.eval(*xk), *yk, epsilon = 1e-12);
        }
        assert_relative_eq!(spline.eval(1.0), 1.0_f64.sin(), epsilon = 1e-4);
        assert_relative_eq!(spline.integral(0.0, 6.0), 1.0 - 6.0_f64.cos(), epsilon = 1e-4);
        // clamped bounds
        assert_relative_eq!(
            spline.integral(-1.0, 7.0), spline.integral(0.0, 6.0), epsilon = 1e-14);
    }

    #[test]
    fn roots_and_kinds() {
        let x: nd::Array1<f64> = nd::Array::linspace(0.0, 10.0, 200);
        let y = x.mapv(f64::sin);
        let spline = CubicSpline::new(&x, &y).unwrap();
        let pi = std::f64::consts::PI;
        let roots = spline.roots();
        assert_eq!(roots.len(), 4);
        for (k, r) in roots.iter().enumerate() {
            assert_relative_eq!(*r, k as f64 * pi, epsilon = 1e-5);
        }
        let falling = spline.roots_of_kind(Zero::Falling);
        let rising = spline.roots_of_kind(Zero::Rising);
        assert_eq!(falling.len(), 2);
        assert_relative_eq!(falling[0], pi, epsilon = 1e-5);
        assert_eq!(rising.len(), 2);
        assert_relative_eq!(rising[1], 2.0 * pi, epsilon = 1e-5);
    }

    #[test]
    fn short_data() {
        let x = nd::array![0.0, 1.0, 2.0];
        let y = nd::array![1.0, -1.0, 1.0];
        let spline = CubicSpline::new(&x, &y).unwrap();
        let roots = spline.roots();
        let h = 0.5_f64.sqrt();
        assert_eq!(roots.len(), 2);
        assert_relative_eq!(roots[0], 1.0 - h, epsilon = 1e-12);
        assert_relative_eq!(roots[1], 1.0 + h, epsilon = 1e-12);

        let line = CubicSpline::new(&nd::array![1.0, 3.0], &nd::array![-1.0, 3.0])
            .unwrap();
        assert_eq!(line.roots(), vec![1.5]);
        assert_eq!(line.derivatives(2.0), [1.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn zeros_on_knots_counted_once() {
        let x = nd::array![0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let y = nd::array![0.0, 0.0, 0.0, 1.0, 0.0, 0.0];
        let spline = CubicSpline::new(&x, &y).unwrap();
        assert_eq!(spline.roots(), vec![0.0, 1.0, 2.0, 4.0, 5.0]);

        let x = nd::array![0.0, 1.0, 2.0, 3.0, 4.0];
        let y = nd::array![1.0, 0.0, -1.0, 0.0, 1.0];
        let spline = CubicSpline::new(&x, &y).unwrap();
        assert_eq!(spline.roots(), vec![1.0, 3.0]);
        assert_eq!(spline.roots_of_kind(Zero::Falling), vec![1.0]);
        assert_eq!(spline.roots_of_kind(Zero::Rising), vec![3.0]);
    }

    #[test]
    fn bad_input() {
        assert!(matches!(
            CubicSpline::new(&nd::array![0.0, 1.0], &nd::array![0.0]),
            Err(SplineError::Length(_)),
        ));
        assert!(matches!(
            CubicSpline::new(&nd::array![1.0, 0.0], &nd::array![0.0, 1.0]),
            Err(SplineError::Mesh(_)),
        ));
        assert!(matches!(
            CubicSpline::new(&nd::array![0.0, 1.0], &nd::array![0.0, f64::NAN]),
            Err(SplineError::BadValue(1, _)),
        ));
    }
}
