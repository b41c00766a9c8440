//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use std::path::PathBuf;
use ndarray as nd;
use thiserror::Error;
use crate::qstate::QState;

/// Returned when an operation requiring equal-length arrays encounters arrays
/// with unequal length.
#[derive(Debug, Error)]
#[error("encountered arrays with incompatible lengths; got {0} and {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<S, A, T, B>(
        a: &nd::ArrayBase<S, nd::Ix1>,
        b: &nd::ArrayBase<T, nd::Ix1>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
    {
        let na = a.len();
        let nb = b.len();
        (na == nb).then_some(()).ok_or(Self(na, nb))
    }
}

/// Returned when a radial mesh is unusable.
#[derive(Debug, Error)]
pub enum MeshError {
    /// Fewer than two mesh points.
    #[error("radial meshes must have at least 2 points; got {0}")]
    TooShort(usize),

    /// `rmesh[k] >= rmesh[k + 1]` for the given `k`.
    #[error("radial mesh must be strictly increasing; failed at index {0}")]
    NotIncreasing(usize),

    /// Negative or non-finite mesh point at the given index.
    #[error("radial mesh points must be finite and non-negative; got {1} at index {0}")]
    BadPoint(usize, f64),
}

impl MeshError {
    // at least two finite, strictly increasing points
    pub(crate) fn check_increasing<S>(x: &nd::ArrayBase<S, nd::Ix1>)
        -> Result<(), Self>
    where S: nd::Data<Elem = f64>
    {
        let n = x.len();
        (n >= 2).then_some(()).ok_or(Self::TooShort(n))?;
        if let Some((k, xk)) = x.iter().enumerate().find(|(_, xk)| !xk.is_finite()) {
            return Err(Self::BadPoint(k, *xk));
        }
        match x.iter().zip(x.iter().skip(1)).position(|(xk, xkp1)| xk >= xkp1) {
            Some(k) => Err(Self::NotIncreasing(k)),
            None => Ok(()),
        }
    }

    // as above, plus non-negative
    pub(crate) fn check<S>(rmesh: &nd::ArrayBase<S, nd::Ix1>) -> Result<(), Self>
    where S: nd::Data<Elem = f64>
    {
        Self::check_increasing(rmesh)?;
        match rmesh.iter().position(|r| *r < 0.0) {
            Some(k) => Err(Self::BadPoint(k, rmesh[k])),
            None => Ok(()),
        }
    }
}

/// Returned when a quantum number or orbital property cannot be interpreted.
#[derive(Debug, Error)]
pub enum QNumError {
    /// Orbital letter outside `s, p, d, f, g, h, i` that is also not an
    /// integer.
    #[error("invalid angular momentum '{0}'; expected one of s,p,d,f,g,h,i or an integer")]
    BadL(String),

    /// Malformed integer field.
    #[error("invalid integer for quantum number {0}: '{1}'")]
    BadInt(&'static str, String),

    /// Malformed real field.
    #[error("invalid real number for {0}: '{1}'")]
    BadFloat(&'static str, String),

    /// Principal quantum numbers start at 1.
    #[error("principal quantum number must be positive; got {0}")]
    BadN(u32),

    /// Occupancies must be finite and non-negative.
    #[error("occupancy must be finite and non-negative; got {0}")]
    BadOcc(f64),

    /// Eigenvalues must be finite.
    #[error("eigenvalue must be finite; got {0}")]
    BadEig(f64),

    /// Spin channels are numbered 1 and 2.
    #[error("spin channel must be 1 or 2; got {0}")]
    BadSpin(i32),
}

/// Returned when a configuration token or string cannot be parsed.
#[derive(Debug, Error)]
#[error("don't know how to interpret '{0}'")]
pub struct ParseError(pub String);

/// Returned when a chemical symbol, atomic number, or orbital state has no
/// matching entry.
#[derive(Debug, Error)]
#[error("lookup failed: {0}")]
pub struct LookupError(pub String);

/// Returned from functions in [`atomconf`][crate::atomconf] and
/// [`notation`][crate::notation].
#[derive(Debug, Error)]
pub enum ConfError {
    /// [`QNumError`]
    #[error("invalid quantum number: {0}")]
    QNum(#[from] QNumError),

    /// [`ParseError`]
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// [`LookupError`]
    #[error("{0}")]
    Lookup(#[from] LookupError),

    /// Returned when adding a state already present in a configuration.
    #[error("state {0} is already in the configuration")]
    DuplicateState(QState),

    /// Returned when removing a state not present in a configuration.
    #[error("state {0} is not in the configuration")]
    MissingState(QState),

    /// Returned when parsing relativistic or spin-polarized notation.
    #[error("configuration strings with has_s = {has_s}, has_j = {has_j} are not supported")]
    NotImplemented { has_s: bool, has_j: bool },
}

/// Returned from [`CubicSpline`][crate::interp::CubicSpline] construction.
#[derive(Debug, Error)]
pub enum SplineError {
    /// [`LengthError`]
    #[error("length error: {0}")]
    Length(#[from] LengthError),

    /// [`MeshError`]
    #[error("mesh error: {0}")]
    Mesh(#[from] MeshError),

    /// Non-finite sample value at the given index.
    #[error("spline data must be finite; got {1} at index {0}")]
    BadValue(usize, f64),
}

/// Returned from [`load_columns`][crate::loadtxt::load_columns].
#[derive(Debug, Error)]
pub enum LoadError {
    /// Underlying I/O failure.
    #[error("could not read {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    /// A field that is not a real number.
    #[error("{0}: line {1}: could not parse '{2}' as a real number")]
    Parse(PathBuf, usize, String),

    /// A row without the requested column.
    #[error("{0}: line {1}: missing column {2}")]
    MissingColumn(PathBuf, usize, usize),
}

/// Returned from functions in [`radial`][crate::radial].
#[derive(Debug, Error)]
pub enum RadialError {
    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),

    /// [`MeshError`]
    #[error("mesh error: {0}")]
    Mesh(#[from] MeshError),

    /// [`SplineError`]
    #[error("spline error: {0}")]
    Spline(#[from] SplineError),

    /// [`LoadError`]
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    /// Returned when a radial point lies outside the mesh.
    #[error("cannot find {0} in rmesh")]
    OutOfRange(f64),

    /// Returned when a negative or non-finite energy cutoff is encountered.
    #[error("energy cutoff must be finite and non-negative; got {0}")]
    BadEcut(f64),
}

impl RadialError {
    pub(crate) fn check_ecut(ecut: f64) -> Result<(), Self> {
        (ecut.is_finite() && ecut >= 0.0).then_some(()).ok_or(Self::BadEcut(ecut))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_checks() {
        assert!(MeshError::check(&nd::array![0.0, 1.0, 2.0]).is_ok());
        assert!(matches!(
            MeshError::check(&nd::array![0.0]),
            Err(MeshError::TooShort(1)),
        ));
        assert!(matches!(
            MeshError::check(&nd::array![0.0, 1.0, 1.0]),
            Err(MeshError::NotIncreasing(1)),
        ));
        assert!(matches!(
            MeshError::check(&nd::array![-1.0, 1.0]),
            Err(MeshError::BadPoint(0, _)),
        ));
        assert!(MeshError::check_increasing(&nd::array![-1.0, 1.0]).is_ok());
        assert!(matches!(
            MeshError::check_increasing(&nd::array![0.0, f64::NAN]),
            Err(MeshError::BadPoint(1, _)),
        ));
    }

    #[test]
    fn length_check() {
        let a = nd::array![1.0, 2.0];
        let b = nd::array![1.0, 2.0, 3.0];
        let err = LengthError::check(&a, &b).unwrap_err();
        assert_eq!((err.0, err.1), (2, 3));
        assert!(RadialError::check_ecut(-1.0).is_err());
        assert!(RadialError::check_ecut(0.0).is_ok());
    }
}
