//! Atomic configurations defining the all-electron atom.
//!
//! ```
//! use radatom::atomconf::{ AtomicConfiguration, SpinMode };
//!
//! let o = AtomicConfiguration::from_string(8, "[He] 2s2 2p4", false, false)
//!     .unwrap();
//! assert!(o.isneutral());
//! assert_eq!(o.spin_mode(), SpinMode::Unpolarized);
//!
//! let he = AtomicConfiguration::neutral_from_symbol("He").unwrap();
//! assert_eq!(he.z(), 2);
//! assert_eq!(he.echarge(), -2.0);
//! ```

use std::{ fmt, slice };
use log::debug;
use serde::{ Deserialize, Serialize };
use crate::{
    database::{ self, ElementId, LookupResult },
    error::ConfError,
    notation::{ states_from_string, ConfResult },
    qstate::QState,
    NEUTRAL_TOL,
};

/// Spin treatment implied by a configuration's states.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpinMode {
    /// Spin-unpolarized calculation.
    Unpolarized,
    /// Spin-polarized calculation.
    Polarized,
}

impl fmt::Display for SpinMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unpolarized => write!(f, "unpolarized"),
            Self::Polarized => write!(f, "polarized"),
        }
    }
}

/// Atomic number plus an ordered list of occupied [`QState`]s.
///
/// States are kept in declaration order and no two states in the same
/// configuration may be identical.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawConfiguration")]
pub struct AtomicConfiguration {
    z: u32,
    states: Vec<QState>,
}

impl AtomicConfiguration {
    /// Create a new configuration from an atomic number and a list of states.
    ///
    /// Fails with [`ConfError::DuplicateState`] if a state appears more than
    /// once.
    pub fn new(z: u32, states: Vec<QState>) -> ConfResult<Self> {
        let mut conf = Self { z, states: Vec::with_capacity(states.len()) };
        for state in states {
            conf.add_state(state)?;
        }
        Ok(conf)
    }

    /// Parse a configuration from compact notation, e.g. `"[He] 2s2 2p3"`.
    ///
    /// Only non-relativistic, spin-unpolarized notation is supported; any
    /// other combination of `has_s` and `has_j` fails with
    /// [`ConfError::NotImplemented`].
    pub fn from_string(z: u32, text: &str, has_s: bool, has_j: bool)
        -> ConfResult<Self>
    {
        if has_s || has_j {
            return Err(ConfError::NotImplemented { has_s, has_j });
        }
        let states = states_from_string(text)?;
        debug!("parsed {} states for Z = {} from '{}'", states.len(), z, text);
        Self::new(z, states)
    }

    /// Build the neutral ground-state configuration of an element given by
    /// chemical symbol or atomic number.
    pub fn neutral_from_symbol<'a, E>(element: E) -> ConfResult<Self>
    where E: Into<ElementId<'a>>
    {
        let entry = database::get_neutral_entry(element)?;
        Self::new(entry.z, entry.states.clone())
    }

    /// Atomic number.
    pub fn z(&self) -> u32 { self.z }

    /// Chemical symbol.
    pub fn symbol(&self) -> LookupResult<&'static str> {
        database::symbol_from_z(self.z)
    }

    /// Get a reference to the states.
    pub fn states(&self) -> &[QState] { &self.states }

    /// Number of states.
    pub fn len(&self) -> usize { self.states.len() }

    /// Return `true` if there are no states.
    pub fn is_empty(&self) -> bool { self.states.is_empty() }

    /// Iterate over the states in declaration order.
    pub fn iter(&self) -> slice::Iter<'_, QState> { self.states.iter() }

    /// [`SpinMode::Polarized`] if any state occupies spin channel 2.
    pub fn spin_mode(&self) -> SpinMode {
        if self.states.iter().any(|q| q.s() == Some(2)) {
            SpinMode::Polarized
        } else {
            SpinMode::Unpolarized
        }
    }

    /// Electronic charge (≤ 0).
    pub fn echarge(&self) -> f64 {
        -self.states.iter().map(|q| q.occ()).sum::<f64>()
    }

    /// Return `true` if the electronic charge balances the nuclear charge.
    pub fn isneutral(&self) -> bool {
        (self.echarge() + self.z as f64).abs() < NEUTRAL_TOL
    }

    /// Append a state, failing with [`ConfError::DuplicateState`] if it is
    /// already present.
    pub fn add_state(&mut self, state: QState) -> ConfResult<()> {
        if self.states.contains(&state) {
            return Err(ConfError::DuplicateState(state));
        }
        self.states.push(state);
        Ok(())
    }

    /// Remove a state, failing with [`ConfError::MissingState`] if it is not
    /// present.
    pub fn remove_state(&mut self, state: &QState) -> ConfResult<QState> {
        let k
            = self.states.iter().position(|q| q == state)
            .ok_or(ConfError::MissingState(*state))?;
        Ok(self.states.remove(k))
    }
}

impl<'a> IntoIterator for &'a AtomicConfiguration {
    type Item = &'a QState;
    type IntoIter = slice::Iter<'a, QState>;

    fn into_iter(self) -> Self::IntoIter { self.states.iter() }
}

impl fmt::Display for AtomicConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.z)?;
        for state in self.states.iter() {
            write!(f, "\n{}", state)?;
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct RawConfiguration {
    z: u32,
    states: Vec<QState>,
}

impl TryFrom<RawConfiguration> for AtomicConfiguration {
    type Error = ConfError;

    fn try_from(raw: RawConfiguration) -> ConfResult<Self> {
        Self::new(raw.z, raw.states)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(n: u32, l: u32, occ: f64) -> QState { QState::new(n, l, occ).unwrap() }

    #[test]
    fn neutral_helium() {
        let he = AtomicConfiguration::neutral_from_symbol("He").unwrap();
        assert!(he.isneutral());
        assert_eq!(he.z(), 2);
        assert_eq!(he.symbol().unwrap(), "He");
        assert_eq!(he.states(), &[q(1, 0, 2.0)]);
        let by_z = AtomicConfiguration::neutral_from_symbol(2_u32).unwrap();
        assert_eq!(he, by_z);
    }

    #[test]
    fn add_remove() {
        let mut conf = AtomicConfiguration::neutral_from_symbol("Li").unwrap();
        assert!(matches!(
            conf.add_state(q(2, 0, 1.0)),
            Err(ConfError::DuplicateState(_)),
        ));
        assert!(matches!(
            conf.remove_state(&q(3, 0, 1.0)),
            Err(ConfError::MissingState(_)),
        ));

        let removed = conf.remove_state(&q(2, 0, 1.0)).unwrap();
        assert_eq!(removed, q(2, 0, 1.0));
        assert!(!conf.isneutral());
        assert_eq!(conf.echarge(), -2.0);

        conf.add_state(q(2, 1, 1.0)).unwrap();
        assert!(conf.isneutral());
        assert_eq!(conf.len(), 2);
        assert_eq!(conf.iter().last(), Some(&q(2, 1, 1.0)));
    }

    #[test]
    fn duplicates_rejected_at_construction() {
        assert!(matches!(
            AtomicConfiguration::from_string(4, "[He] 1s2 2s2", false, false),
            Err(ConfError::DuplicateState(_)),
        ));
    }

    #[test]
    fn unsupported_notation() {
        for (has_s, has_j) in [(true, false), (false, true), (true, true)] {
            assert!(matches!(
                AtomicConfiguration::from_string(1, "1s1", has_s, has_j),
                Err(ConfError::NotImplemented { .. }),
            ));
        }
    }

    #[test]
    fn equality_and_display() {
        let a = AtomicConfiguration::from_string(6, "[He] 2s2 2p2", false, false)
            .unwrap();
        let b = AtomicConfiguration::neutral_from_symbol("C").unwrap();
        assert_eq!(a, b);
        let c = AtomicConfiguration::from_string(6, "[He] 2p2 2s2", false, false)
            .unwrap();
        assert_ne!(a, c);
        let mut d = a.clone();
        d.remove_state(&q(2, 1, 2.0)).unwrap();
        assert_ne!(a, d);

        let text = a.to_string();
        assert!(text.starts_with("6: "));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn spin_mode() {
        let up = q(1, 0, 1.0).with_s(1).unwrap();
        let down = q(1, 0, 1.0).with_s(2).unwrap();
        let conf = AtomicConfiguration::new(2, vec![up]).unwrap();
        assert_eq!(conf.spin_mode(), SpinMode::Unpolarized);
        let conf = AtomicConfiguration::new(2, vec![up, down]).unwrap();
        assert_eq!(conf.spin_mode(), SpinMode::Polarized);
        assert!(conf.isneutral());
        assert_eq!(conf.spin_mode().to_string(), "polarized");
    }

    #[test]
    fn serde_roundtrip_checks_duplicates() {
        let conf = AtomicConfiguration::neutral_from_symbol("N").unwrap();
        let json = serde_json::to_string(&conf).unwrap();
        let back: AtomicConfiguration = serde_json::from_str(&json).unwrap();
        assert_eq!(conf, back);
        let dup = r#"{"z": 2, "states": [
            {"n": 1, "l": 0, "occ": 1.0}, {"n": 1, "l": 0, "occ": 1.0}]}"#;
        assert!(serde_json::from_str::<AtomicConfiguration>(dup).is_err());
    }
}
