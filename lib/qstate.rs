//! Quantum-number records for single electrons in spherically symmetric atoms.
//!
//! [`QState`] carries the full set of quantum numbers and physical properties
//! of one orbital; [`NlkState`] is the bare `(n, l[, k])` key used to index
//! collections of radial functions.
//!
//! ```
//! use radatom::qstate::QState;
//!
//! let q = QState::from_strs("2", "p", "3").unwrap();
//! assert_eq!((q.n(), q.l(), q.occ()), (2, 1, 3.0));
//! assert!(!q.has_j() && !q.has_s());
//! ```

use std::{
    fmt,
    hash::{ Hash, Hasher },
};
use serde::{ Deserialize, Serialize };
use crate::error::QNumError;

pub type QNumResult<T> = Result<T, QNumError>;

/// Canonical orbital letters, indexed by angular momentum.
pub const ORBITAL_LETTERS: [char; 7] = ['s', 'p', 'd', 'f', 'g', 'h', 'i'];

/// Convert an orbital letter to its angular momentum.
pub fn l_from_char(c: char) -> Option<u32> {
    ORBITAL_LETTERS.iter().position(|&lc| lc == c).map(|l| l as u32)
}

/// Convert an angular momentum to its orbital letter, if it has one.
pub fn l_to_char(l: u32) -> Option<char> {
    ORBITAL_LETTERS.get(l as usize).copied()
}

/// Normalize an angular momentum given either as a canonical orbital letter or
/// as a non-negative integer.
pub fn l_from_str(s: &str) -> QNumResult<u32> {
    let s = s.trim();
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if let Some(l) = l_from_char(c) { return Ok(l); }
    }
    s.parse::<u32>().map_err(|_| QNumError::BadL(s.to_string()))
}

fn parse_int<T: std::str::FromStr>(name: &'static str, s: &str)
    -> QNumResult<T>
{
    s.trim().parse::<T>()
        .map_err(|_| QNumError::BadInt(name, s.to_string()))
}

fn parse_float(name: &'static str, s: &str) -> QNumResult<f64> {
    s.trim().parse::<f64>()
        .map_err(|_| QNumError::BadFloat(name, s.to_string()))
}

/// Quantum numbers and physical properties of a single electron in a
/// spherically symmetric atom.
///
/// Equality and hashing consider all six fields; absent optional fields only
/// compare equal to each other.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawQState")]
pub struct QState {
    n: u32,
    l: u32,
    occ: f64,
    eig: Option<f64>,
    j: Option<i32>,
    s: Option<i32>,
}

// occ and eig are checked finite at construction
impl Eq for QState { }

impl Hash for QState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.n.hash(state);
        self.l.hash(state);
        self.occ.to_bits().hash(state);
        self.eig.map(f64::to_bits).hash(state);
        self.j.hash(state);
        self.s.hash(state);
    }
}

impl QState {
    /// Create a new `QState` with no eigenvalue, `j`, or spin.
    pub fn new(n: u32, l: u32, occ: f64) -> QNumResult<Self> {
        (n > 0).then_some(()).ok_or(QNumError::BadN(n))?;
        (occ.is_finite() && occ >= 0.0).then_some(())
            .ok_or(QNumError::BadOcc(occ))?;
        // + 0.0 folds -0.0 into 0.0 so that equal states hash equally
        Ok(Self { n, l, occ: occ + 0.0, eig: None, j: None, s: None })
    }

    /// Create a new `QState` from string fields, coercing `n` to an integer,
    /// `l` to an angular momentum (letter or integer), and `occ` to a real.
    pub fn from_strs(n: &str, l: &str, occ: &str) -> QNumResult<Self> {
        let n: u32 = parse_int("n", n)?;
        let l = l_from_str(l)?;
        let occ = parse_float("occ", occ)?;
        Self::new(n, l, occ)
    }

    /// Return a copy of `self` with the eigenvalue set.
    pub fn with_eig(mut self, eig: f64) -> QNumResult<Self> {
        eig.is_finite().then_some(()).ok_or(QNumError::BadEig(eig))?;
        self.eig = Some(eig + 0.0);
        Ok(self)
    }

    /// Return a copy of `self` with the total angular momentum quantum number
    /// set.
    pub fn with_j(mut self, j: i32) -> Self {
        self.j = Some(j);
        self
    }

    /// Return a copy of `self` with the spin channel (1 or 2) set.
    pub fn with_s(mut self, s: i32) -> QNumResult<Self> {
        (s == 1 || s == 2).then_some(()).ok_or(QNumError::BadSpin(s))?;
        self.s = Some(s);
        Ok(self)
    }

    /// Principal quantum number.
    pub fn n(&self) -> u32 { self.n }

    /// Angular momentum.
    pub fn l(&self) -> u32 { self.l }

    /// Occupancy of the orbital.
    pub fn occ(&self) -> f64 { self.occ }

    /// Eigenvalue of the orbital, if known.
    pub fn eig(&self) -> Option<f64> { self.eig }

    /// Total angular momentum quantum number; `None` if spin is a good quantum
    /// number.
    pub fn j(&self) -> Option<i32> { self.j }

    /// Spin channel; `None` if spin is not taken into account.
    pub fn s(&self) -> Option<i32> { self.s }

    /// Return `true` if `j` is set.
    pub fn has_j(&self) -> bool { self.j.is_some() }

    /// Return `true` if `s` is set.
    pub fn has_s(&self) -> bool { self.s.is_some() }

    /// The `(n, l)` key of this state.
    pub fn nlk(&self) -> NlkState { NlkState::new(self.n, self.l) }
}

impl fmt::Display for QState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={}, l={}, occ={}", self.n, self.l, self.occ)?;
        if let Some(eig) = self.eig { write!(f, ", eig={}", eig)?; }
        if let Some(j) = self.j { write!(f, ", j={}", j)?; }
        if let Some(s) = self.s { write!(f, ", s={}", s)?; }
        Ok(())
    }
}

#[derive(Deserialize)]
struct RawQState {
    n: u32,
    l: u32,
    occ: f64,
    #[serde(default)]
    eig: Option<f64>,
    #[serde(default)]
    j: Option<i32>,
    #[serde(default)]
    s: Option<i32>,
}

impl TryFrom<RawQState> for QState {
    type Error = QNumError;

    fn try_from(raw: RawQState) -> QNumResult<Self> {
        let mut q = Self::new(raw.n, raw.l, raw.occ)?;
        if let Some(eig) = raw.eig { q = q.with_eig(eig)?; }
        if let Some(j) = raw.j { q = q.with_j(j); }
        if let Some(s) = raw.s { q = q.with_s(s)?; }
        Ok(q)
    }
}

/// `(n, l)` or `(n, l, k)` key for an orbital, where `k` distinguishes
/// relativistic sub-states.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord,
    Serialize, Deserialize,
)]
pub struct NlkState {
    /// Principal quantum number.
    pub n: u32,
    /// Angular momentum.
    pub l: u32,
    /// Relativistic sub-state label, if any.
    pub k: Option<i32>,
}

impl NlkState {
    /// Create a new non-relativistic key.
    pub fn new(n: u32, l: u32) -> Self { Self { n, l, k: None } }

    /// Return a copy of `self` with `k` set.
    pub fn with_k(self, k: i32) -> Self { Self { k: Some(k), ..self } }
}

impl fmt::Display for NlkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.k {
            None => write!(f, "n={}, l={}", self.n, self.l),
            Some(k) => write!(f, "n={}, l={}, k={}", self.n, self.l, k),
        }
    }
}

impl From<QState> for NlkState {
    fn from(q: QState) -> Self { q.nlk() }
}
