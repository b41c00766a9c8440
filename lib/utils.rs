//! Miscellaneous tools.
//!
//! All integrals here use the composite trapezoidal rule on a (possibly
//! non-uniform) mesh.

use ndarray::{ self as nd, Ix1 };
use num_traits::Float;
use crate::error::LengthError;

/// Integrate `y` against `x` using the trapezoidal rule.
///
/// Returns zero for fewer than two points.
pub fn trapz<S, T, A>(x: &nd::ArrayBase<S, Ix1>, y: &nd::ArrayBase<T, Ix1>)
    -> Result<A, LengthError>
where
    S: nd::Data<Elem = A>,
    T: nd::Data<Elem = A>,
    A: Float,
{
    LengthError::check(x, y)?;
    let two = A::one() + A::one();
    let res: A
        = x.iter().zip(x.iter().skip(1))
        .zip(y.iter().zip(y.iter().skip(1)))
        .map(|((xk, xkp1), (yk, ykp1))| (*xkp1 - *xk) * (*yk + *ykp1) / two)
        .fold(A::zero(), |acc, dk| acc + dk);
    Ok(res)
}

/// Cumulatively integrate `y` against `x` using the trapezoidal rule.
///
/// The result has one fewer element than the inputs: element `k` is the
/// integral from `x[0]` to `x[k + 1]`.
pub fn cumtrapz<S, T, A>(x: &nd::ArrayBase<S, Ix1>, y: &nd::ArrayBase<T, Ix1>)
    -> Result<nd::Array1<A>, LengthError>
where
    S: nd::Data<Elem = A>,
    T: nd::Data<Elem = A>,
    A: Float,
{
    LengthError::check(x, y)?;
    let two = A::one() + A::one();
    let mut acc = A::zero();
    let res: nd::Array1<A>
        = x.iter().zip(x.iter().skip(1))
        .zip(y.iter().zip(y.iter().skip(1)))
        .map(|((xk, xkp1), (yk, ykp1))| {
            acc = acc + (*xkp1 - *xk) * (*yk + *ykp1) / two;
            acc
        })
        .collect();
    Ok(res)
}

/// Like [`cumtrapz`], but left-padded with a zero so that the result has the
/// same length as the inputs.
///
/// ```
/// use ndarray as nd;
/// use radatom::utils::cumtrapz_padded;
///
/// let x = nd::array![0.0, 1.0, 2.0, 3.0];
/// let y = nd::array![1.0, 1.0, 1.0, 1.0];
/// assert_eq!(cumtrapz_padded(&x, &y).unwrap(), nd::array![0.0, 1.0, 2.0, 3.0]);
/// ```
pub fn cumtrapz_padded<S, T, A>(
    x: &nd::ArrayBase<S, Ix1>,
    y: &nd::ArrayBase<T, Ix1>,
) -> Result<nd::Array1<A>, LengthError>
where
    S: nd::Data<Elem = A>,
    T: nd::Data<Elem = A>,
    A: Float,
{
    let integ = cumtrapz(x, y)?;
    let mut padded: nd::Array1<A> = nd::Array1::zeros(x.len());
    if !padded.is_empty() {
        padded.slice_mut(nd::s![1..]).assign(&integ);
    }
    Ok(padded)
}

/// Unnormalized sinc function, `sin(x) / x`, with its limit `1` at `x = 0`.
pub fn sinc<A: Float>(x: A) -> A {
    if x == A::zero() { A::one() } else { x.sin() / x }
}
