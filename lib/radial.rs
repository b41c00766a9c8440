//! Named scalar functions sampled on a radial mesh, and the numerical
//! operators used to analyze and compare them.
//!
//! ```
//! use ndarray as nd;
//! use radatom::radial::RadialFunction;
//!
//! let f = RadialFunction::new(
//!     "const",
//!     nd::array![0.0, 1.0, 2.0, 3.0],
//!     nd::array![1.0, 1.0, 1.0, 1.0],
//! ).unwrap();
//! assert_eq!(f.integral().unwrap().values(), &nd::array![0.0, 1.0, 2.0, 3.0]);
//! assert_eq!(f.ifromr(1.5).unwrap(), 1);
//! assert_eq!(f.ifromr(3.0).unwrap(), 4);
//! ```

use std::{
    f64::consts::PI,
    fmt,
    ops::{ Deref, Range },
    path::Path,
};
use ndarray as nd;
use log::{ debug, warn };
use once_cell::sync::OnceCell;
use serde::{ Serialize, Serializer };
use crate::{
    error::{ LengthError, MeshError, RadialError },
    interp::CubicSpline,
    loadtxt::{ self, Columns },
    qstate::{ NlkState, QState },
    utils::{ cumtrapz_padded, sinc, trapz },
    BOUND_WINDOW,
    DEF_IR_SMALL_TOL,
    DEF_NUMQ,
    TOL_BOUND,
};

pub type RadialResult<T> = Result<T, RadialError>;

/// A named function sampled on a radial mesh.
///
/// The mesh is strictly increasing and non-negative with at least two points,
/// and always has as many points as there are values. The interpolating
/// [spline][Self::spline] is fitted on first use and reused afterwards; the
/// fit is guarded so that concurrent first use from several threads computes
/// it only once.
#[derive(Clone, Debug)]
pub struct RadialFunction {
    name: String,
    rmesh: nd::Array1<f64>,
    values: nd::Array1<f64>,
    spline: OnceCell<CubicSpline>,
}

impl RadialFunction {
    /// Create a new `RadialFunction`.
    pub fn new<N>(name: N, rmesh: nd::Array1<f64>, values: nd::Array1<f64>)
        -> RadialResult<Self>
    where N: Into<String>
    {
        LengthError::check(&rmesh, &values)?;
        MeshError::check(&rmesh)?;
        Ok(Self::new_unchecked(name.into(), rmesh, values))
    }

    fn new_unchecked(name: String, rmesh: nd::Array1<f64>, values: nd::Array1<f64>)
        -> Self
    {
        Self { name, rmesh, values, spline: OnceCell::new() }
    }

    // same name and mesh, new values of the same length
    fn with_values(&self, values: nd::Array1<f64>) -> Self {
        Self::new_unchecked(self.name.clone(), self.rmesh.clone(), values)
    }

    /// Read a `RadialFunction` from two columns of a text table.
    ///
    /// `name` defaults to the path and `cols` to the first two columns.
    pub fn from_filename<P>(path: P, name: Option<&str>, cols: Option<Columns>)
        -> RadialResult<Self>
    where P: AsRef<Path>
    {
        let path = path.as_ref();
        let (rmesh, values)
            = loadtxt::load_columns(path, cols.unwrap_or_default())?;
        let name
            = name.map(String::from)
            .unwrap_or_else(|| path.display().to_string());
        Self::new(name, rmesh, values)
    }

    /// Get the name of the function.
    pub fn name(&self) -> &str { &self.name }

    /// Get a reference to the radial mesh.
    pub fn rmesh(&self) -> &nd::Array1<f64> { &self.rmesh }

    /// Get a reference to the sampled values.
    pub fn values(&self) -> &nd::Array1<f64> { &self.values }

    /// Number of samples.
    pub fn len(&self) -> usize { self.values.len() }

    /// Return `true` if there are no samples. Never the case for a function
    /// built through [`Self::new`].
    pub fn is_empty(&self) -> bool { self.values.is_empty() }

    /// Return views of the mesh and the values over a range of indices, or
    /// `None` if the range does not lie within the mesh.
    pub fn slice(&self, range: Range<usize>)
        -> Option<(nd::ArrayView1<'_, f64>, nd::ArrayView1<'_, f64>)>
    {
        if range.start > range.end || range.end > self.len() { return None; }
        Some((
            self.rmesh.slice(nd::s![range.start..range.end]),
            self.values.slice(nd::s![range.start..range.end]),
        ))
    }

    /// Iterate over `(r, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.rmesh.iter().copied().zip(self.values.iter().copied())
    }

    /// Return a copy of `self` holding the absolute values.
    pub fn abs(&self) -> Self { self.with_values(self.values.mapv(f64::abs)) }

    /// Outermost point of the radial mesh.
    pub fn rmax(&self) -> f64 { self.rmesh[self.rmesh.len() - 1] }

    /// Size of the radial mesh.
    pub fn rsize(&self) -> usize { self.rmesh.len() }

    /// Return the indices of the minimum and maximum values, in that order.
    ///
    /// Ties resolve to the first occurrence.
    pub fn minmax_ridx(&self) -> (usize, usize) {
        let mut imin: usize = 0;
        let mut imax: usize = 0;
        for (k, vk) in self.values.iter().enumerate() {
            if *vk < self.values[imin] { imin = k; }
            if *vk > self.values[imax] { imax = k; }
        }
        (imin, imax)
    }

    /// Return the indices `i` for which `values[i] * values[i + 1] <= 0`.
    ///
    /// Note that two adjacent samples that are both exactly zero count as a
    /// node.
    pub fn inodes(&self) -> Vec<usize> {
        self.values.iter().zip(self.values.iter().skip(1))
            .enumerate()
            .filter(|(_, (vk, vkp1))| **vk * **vkp1 <= 0.0)
            .map(|(k, _)| k)
            .collect()
    }

    /// Zero-smoothing cubic spline through the samples, fitted once.
    pub fn spline(&self) -> RadialResult<&CubicSpline> {
        let spline = self.spline.get_or_try_init(|| {
            debug!("radial::RadialFunction: fitting spline for '{}'", self.name);
            CubicSpline::new(&self.rmesh, &self.values)
        })?;
        Ok(spline)
    }

    /// Return the zeros of the spline.
    pub fn roots(&self) -> RadialResult<Vec<f64>> {
        Ok(self.spline()?.roots())
    }

    /// Return the value and the first three derivatives of the spline at `r`.
    ///
    /// `r` should lie within the mesh; outside it the end pieces of the spline
    /// are extrapolated.
    pub fn derivatives(&self, r: f64) -> RadialResult<[f64; 4]> {
        Ok(self.spline()?.derivatives(r))
    }

    /// Cumulatively integrate the function using the trapezoidal rule.
    ///
    /// The result lives on the same mesh and starts at zero.
    pub fn integral(&self) -> RadialResult<Self> {
        let integ = cumtrapz_padded(&self.rmesh, &self.values)?;
        Ok(self.with_values(integ))
    }

    /// Definite integral of `(r * value)²` between `a` and `b`, computed from a
    /// dedicated spline fit of that curve.
    ///
    /// `a` and `b` default to the first and last mesh points.
    pub fn integral3d(&self, a: Option<f64>, b: Option<f64>) -> RadialResult<f64> {
        let a = a.unwrap_or(self.rmesh[0]);
        let b = b.unwrap_or(self.rmax());
        for bound in [a, b] {
            if bound < self.rmesh[0] || bound > self.rmax() {
                warn!(
                    "radial::RadialFunction::integral3d: bound {} lies outside \
                    the mesh and will be clamped",
                    bound,
                );
            }
        }
        let r2v2: nd::Array1<f64>
            = self.iter().map(|(r, v)| (r * v).powi(2)).collect();
        let spline = CubicSpline::new(&self.rmesh, &r2v2)?;
        Ok(spline.integral(a, b))
    }

    /// Return the index of the last mesh point not greater than `rpoint`.
    ///
    /// If `rpoint` is exactly the last mesh point, the mesh length (one past
    /// the end) is returned. Points below the first or beyond the last mesh
    /// point give [`RadialError::OutOfRange`].
    pub fn ifromr(&self, rpoint: f64) -> RadialResult<usize> {
        match self.rmesh.iter().position(|r| *r > rpoint) {
            Some(0) => Err(RadialError::OutOfRange(rpoint)),
            Some(k) => Ok(k - 1),
            None if rpoint == self.rmax() => Ok(self.rmesh.len()),
            None => Err(RadialError::OutOfRange(rpoint)),
        }
    }

    /// Return the rightmost index where `|value| > abs_tol` (default: `0.01`).
    ///
    /// This assumes the values tend to zero as `r` grows; the scan runs from
    /// the end of the mesh inward and returns `0` if no value exceeds the
    /// tolerance.
    pub fn ir_small(&self, abs_tol: Option<f64>) -> usize {
        let abs_tol = abs_tol.unwrap_or(DEF_IR_SMALL_TOL);
        match self.values.iter().rposition(|v| v.abs() > abs_tol) {
            Some(k) => k,
            None => {
                warn!(
                    "radial::RadialFunction::ir_small: no value of '{}' exceeds \
                    {:e}",
                    self.name, abs_tol,
                );
                0
            },
        }
    }

    /// Cumulatively integrate `r² value²` using the trapezoidal rule, starting
    /// at zero.
    pub fn r2f2_integral(&self) -> RadialResult<nd::Array1<f64>> {
        let f: nd::Array1<f64>
            = self.iter().map(|(r, v)| r.powi(2) * v.powi(2)).collect();
        Ok(cumtrapz_padded(&self.rmesh, &f)?)
    }

    /// Cumulatively integrate `r² value` using the trapezoidal rule, starting
    /// at zero.
    pub fn r2f_integral(&self) -> RadialResult<nd::Array1<f64>> {
        let f: nd::Array1<f64>
            = self.iter().map(|(r, v)| r.powi(2) * v).collect();
        Ok(cumtrapz_padded(&self.rmesh, &f)?)
    }

    /// Compute the spherical Bessel (j₀) transform
    /// ```text
    /// F(q) = 4π ∫ sinc(2π q r) r² value(r) dr
    /// ```
    /// over the full mesh for `numq` (default: `3001`) evenly spaced momenta
    /// `q ∊ [0, qmax]`, with `qmax = √(ecut / 2) / π`.
    ///
    /// Returns the energies `2π² q²` paired with `F(q)`. At `q = 0` the kernel
    /// is replaced by its limit, 1.
    pub fn get_intr2j0(&self, ecut: f64, numq: Option<usize>)
        -> RadialResult<(nd::Array1<f64>, nd::Array1<f64>)>
    {
        RadialError::check_ecut(ecut)?;
        let numq = numq.unwrap_or(DEF_NUMQ);
        let qmax = (ecut / 2.0).sqrt() / PI;
        let qmesh: nd::Array1<f64> = nd::Array1::linspace(0.0, qmax, numq);
        let r2f: nd::Array1<f64>
            = self.iter().map(|(r, v)| 4.0 * PI * r.powi(2) * v).collect();
        let mut outs: nd::Array1<f64> = nd::Array1::zeros(numq);
        let mut f: nd::Array1<f64> = nd::Array1::zeros(self.len());
        for (out, q) in outs.iter_mut().zip(&qmesh) {
            if *q == 0.0 {
                *out = trapz(&self.rmesh, &r2f)?;
                continue;
            }
            nd::Zip::from(&mut f).and(&self.rmesh).and(&r2f)
                .for_each(|fk, r, r2fk| { *fk = sinc(2.0 * PI * q * r) * r2fk; });
            *out = trapz(&self.rmesh, &f)?;
        }
        let ecuts = qmesh.mapv(|q| 2.0 * PI.powi(2) * q.powi(2));
        Ok((ecuts, outs))
    }

    /// Serialize to JSON as `{"name", "rmesh", "values"}`.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Serialize)]
struct RadialRecord<'a> {
    name: &'a str,
    rmesh: Vec<f64>,
    values: Vec<f64>,
}

impl<'a> From<&'a RadialFunction> for RadialRecord<'a> {
    fn from(f: &'a RadialFunction) -> Self {
        Self { name: &f.name, rmesh: f.rmesh.to_vec(), values: f.values.to_vec() }
    }
}

impl Serialize for RadialFunction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RadialRecord::from(self).serialize(serializer)
    }
}

impl fmt::Display for RadialFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "rmesh:")?;
        writeln!(f, "{}", self.rmesh)?;
        writeln!(f, "values:")?;
        write!(f, "{}", self.values)
    }
}

/// Orbital identifying a [`RadialWaveFunction`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum FuncState {
    /// Bare `(n, l[, k])` key.
    Nlk(NlkState),
    /// Full set of quantum numbers.
    Q(QState),
}

impl FuncState {
    /// The `(n, l[, k])` key of the orbital.
    pub fn nlk(&self) -> NlkState {
        match self {
            Self::Nlk(nlk) => *nlk,
            Self::Q(q) => q.nlk(),
        }
    }
}

impl From<NlkState> for FuncState {
    fn from(nlk: NlkState) -> Self { Self::Nlk(nlk) }
}

impl From<QState> for FuncState {
    fn from(q: QState) -> Self { Self::Q(q) }
}

impl fmt::Display for FuncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nlk(nlk) => fmt::Display::fmt(nlk, f),
            Self::Q(q) => fmt::Display::fmt(q, f),
        }
    }
}

/// A [`RadialFunction`] for an electronic orbital.
///
/// All [`RadialFunction`] operators are available through dereferencing.
#[derive(Clone, Debug)]
pub struct RadialWaveFunction {
    state: FuncState,
    func: RadialFunction,
}

impl RadialWaveFunction {
    /// Create a new `RadialWaveFunction`.
    pub fn new<F, N>(
        state: F,
        name: N,
        rmesh: nd::Array1<f64>,
        values: nd::Array1<f64>,
    ) -> RadialResult<Self>
    where
        F: Into<FuncState>,
        N: Into<String>,
    {
        let func = RadialFunction::new(name, rmesh, values)?;
        Ok(Self { state: state.into(), func })
    }

    /// Attach an orbital to an existing `RadialFunction`.
    pub fn from_radial<F>(state: F, func: RadialFunction) -> Self
    where F: Into<FuncState>
    {
        Self { state: state.into(), func }
    }

    /// Get the orbital.
    pub fn state(&self) -> &FuncState { &self.state }

    /// Get a reference to the underlying `RadialFunction`.
    pub fn as_radial(&self) -> &RadialFunction { &self.func }

    /// Discard the orbital.
    pub fn into_radial(self) -> RadialFunction { self.func }

    /// Return `true` if the last ten (or fewer, for short meshes) values are
    /// all smaller than `1e-10` in magnitude.
    pub fn isbound(&self) -> bool {
        let n = self.func.len();
        let back = BOUND_WINDOW.min(n);
        self.func.values.slice(nd::s![n - back..]).iter()
            .all(|v| v.abs() < TOL_BOUND)
    }

    /// Like [`RadialFunction::integral`], keeping the orbital.
    pub fn integral(&self) -> RadialResult<Self> {
        Ok(Self { state: self.state, func: self.func.integral()? })
    }

    /// Like [`RadialFunction::abs`], keeping the orbital.
    pub fn abs(&self) -> Self {
        Self { state: self.state, func: self.func.abs() }
    }

    /// Serialize to JSON as `{"name", "rmesh", "values"}` plus the fields of the
    /// orbital.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Deref for RadialWaveFunction {
    type Target = RadialFunction;

    fn deref(&self) -> &RadialFunction { &self.func }
}

#[derive(Serialize)]
struct WaveRecord<'a> {
    #[serde(flatten)]
    func: RadialRecord<'a>,
    #[serde(flatten)]
    state: &'a FuncState,
}

impl Serialize for RadialWaveFunction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WaveRecord { func: RadialRecord::from(&self.func), state: &self.state }
            .serialize(serializer)
    }
}

impl fmt::Display for RadialWaveFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "state: {}", self.state)?;
        fmt::Display::fmt(&self.func, f)
    }
}
