//! Reference ground-state electron configurations of neutral atoms.
//!
//! Configurations follow the NIST atomic reference data for electronic
//! structure calculations, hydrogen (Z = 1) through uranium (Z = 92). They are
//! stored in compact notation with noble-gas cores and expanded once, on first
//! use.
//!
//! ```
//! use radatom::database::{ get_neutral_entry, symbol_from_z };
//!
//! let fe = get_neutral_entry("Fe").unwrap();
//! assert_eq!(fe.z, 26);
//! assert_eq!(fe.states.len(), 7);
//! assert_eq!(symbol_from_z(26).unwrap(), "Fe");
//! ```

use std::fmt;
use log::debug;
use once_cell::sync::Lazy;
use crate::{
    error::{ ConfError, LookupError, ParseError },
    notation::parse_orbtoken,
    qstate::QState,
};

pub type LookupResult<T> = Result<T, LookupError>;

const NEUTRAL_CONFIGURATIONS: [(&str, &str); 92] = [
    ("H",  "1s1"),
    ("He", "1s2"),
    ("Li", "[He] 2s1"),
    ("Be", "[He] 2s2"),
    ("B",  "[He] 2s2 2p1"),
    ("C",  "[He] 2s2 2p2"),
    ("N",  "[He] 2s2 2p3"),
    ("O",  "[He] 2s2 2p4"),
    ("F",  "[He] 2s2 2p5"),
    ("Ne", "[He] 2s2 2p6"),
    ("Na", "[Ne] 3s1"),
    ("Mg", "[Ne] 3s2"),
    ("Al", "[Ne] 3s2 3p1"),
    ("Si", "[Ne] 3s2 3p2"),
    ("P",  "[Ne] 3s2 3p3"),
    ("S",  "[Ne] 3s2 3p4"),
    ("Cl", "[Ne] 3s2 3p5"),
    ("Ar", "[Ne] 3s2 3p6"),
    ("K",  "[Ar] 4s1"),
    ("Ca", "[Ar] 4s2"),
    ("Sc", "[Ar] 3d1 4s2"),
    ("Ti", "[Ar] 3d2 4s2"),
    ("V",  "[Ar] 3d3 4s2"),
    ("Cr", "[Ar] 3d5 4s1"),
    ("Mn", "[Ar] 3d5 4s2"),
    ("Fe", "[Ar] 3d6 4s2"),
    ("Co", "[Ar] 3d7 4s2"),
    ("Ni", "[Ar] 3d8 4s2"),
    ("Cu", "[Ar] 3d10 4s1"),
    ("Zn", "[Ar] 3d10 4s2"),
    ("Ga", "[Ar] 3d10 4s2 4p1"),
    ("Ge", "[Ar] 3d10 4s2 4p2"),
    ("As", "[Ar] 3d10 4s2 4p3"),
    ("Se", "[Ar] 3d10 4s2 4p4"),
    ("Br", "[Ar] 3d10 4s2 4p5"),
    ("Kr", "[Ar] 3d10 4s2 4p6"),
    ("Rb", "[Kr] 5s1"),
    ("Sr", "[Kr] 5s2"),
    ("Y",  "[Kr] 4d1 5s2"),
    ("Zr", "[Kr] 4d2 5s2"),
    ("Nb", "[Kr] 4d4 5s1"),
    ("Mo", "[Kr] 4d5 5s1"),
    ("Tc", "[Kr] 4d5 5s2"),
    ("Ru", "[Kr] 4d7 5s1"),
    ("Rh", "[Kr] 4d8 5s1"),
    ("Pd", "[Kr] 4d10"),
    ("Ag", "[Kr] 4d10 5s1"),
    ("Cd", "[Kr] 4d10 5s2"),
    ("In", "[Kr] 4d10 5s2 5p1"),
    ("Sn", "[Kr] 4d10 5s2 5p2"),
    ("Sb", "[Kr] 4d10 5s2 5p3"),
    ("Te", "[Kr] 4d10 5s2 5p4"),
    ("I",  "[Kr] 4d10 5s2 5p5"),
    ("Xe", "[Kr] 4d10 5s2 5p6"),
    ("Cs", "[Xe] 6s1"),
    ("Ba", "[Xe] 6s2"),
    ("La", "[Xe] 5d1 6s2"),
    ("Ce", "[Xe] 4f1 5d1 6s2"),
    ("Pr", "[Xe] 4f3 6s2"),
    ("Nd", "[Xe] 4f4 6s2"),
    ("Pm", "[Xe] 4f5 6s2"),
    ("Sm", "[Xe] 4f6 6s2"),
    ("Eu", "[Xe] 4f7 6s2"),
    ("Gd", "[Xe] 4f7 5d1 6s2"),
    ("Tb", "[Xe] 4f9 6s2"),
    ("Dy", "[Xe] 4f10 6s2"),
    ("Ho", "[Xe] 4f11 6s2"),
    ("Er", "[Xe] 4f12 6s2"),
    ("Tm", "[Xe] 4f13 6s2"),
    ("Yb", "[Xe] 4f14 6s2"),
    ("Lu", "[Xe] 4f14 5d1 6s2"),
    ("Hf", "[Xe] 4f14 5d2 6s2"),
    ("Ta", "[Xe] 4f14 5d3 6s2"),
    ("W",  "[Xe] 4f14 5d4 6s2"),
    ("Re", "[Xe] 4f14 5d5 6s2"),
    ("Os", "[Xe] 4f14 5d6 6s2"),
    ("Ir", "[Xe] 4f14 5d7 6s2"),
    ("Pt", "[Xe] 4f14 5d9 6s1"),
    ("Au", "[Xe] 4f14 5d10 6s1"),
    ("Hg", "[Xe] 4f14 5d10 6s2"),
    ("Tl", "[Xe] 4f14 5d10 6s2 6p1"),
    ("Pb", "[Xe] 4f14 5d10 6s2 6p2"),
    ("Bi", "[Xe] 4f14 5d10 6s2 6p3"),
    ("Po", "[Xe] 4f14 5d10 6s2 6p4"),
    ("At", "[Xe] 4f14 5d10 6s2 6p5"),
    ("Rn", "[Xe] 4f14 5d10 6s2 6p6"),
    ("Fr", "[Rn] 7s1"),
    ("Ra", "[Rn] 7s2"),
    ("Ac", "[Rn] 6d1 7s2"),
    ("Th", "[Rn] 6d2 7s2"),
    ("Pa", "[Rn] 5f2 6d1 7s2"),
    ("U",  "[Rn] 5f3 6d1 7s2"),
];

/// Ground-state configuration of a neutral atom.
#[derive(Clone, Debug, PartialEq)]
pub struct NeutralEntry {
    /// Atomic number.
    pub z: u32,
    /// Chemical symbol.
    pub symbol: &'static str,
    /// Occupied orbitals, core first.
    pub states: Vec<QState>,
}

impl NeutralEntry {
    /// Iterate over `(n, l, occ)` for every occupied orbital.
    pub fn triples(&self) -> impl Iterator<Item = (u32, u32, f64)> + '_ {
        self.states.iter().map(|q| (q.n(), q.l(), q.occ()))
    }
}

// cores always refer to an element earlier in the table
fn build_table() -> Result<Vec<NeutralEntry>, ConfError> {
    let mut table: Vec<NeutralEntry>
        = Vec::with_capacity(NEUTRAL_CONFIGURATIONS.len());
    for (k, (symbol, notation)) in NEUTRAL_CONFIGURATIONS.iter().enumerate() {
        let mut states: Vec<QState> = Vec::new();
        for token in notation.split_whitespace() {
            if let Some(core)
                = token.strip_prefix('[').and_then(|t| t.strip_suffix(']'))
            {
                let core_entry
                    = table.iter().find(|e| e.symbol == core)
                    .ok_or_else(|| ParseError(token.to_string()))?;
                states.extend(core_entry.states.iter().copied());
            } else {
                states.push(parse_orbtoken(token)?);
            }
        }
        table.push(NeutralEntry { z: k as u32 + 1, symbol, states });
    }
    debug!("expanded reference configurations for {} elements", table.len());
    Ok(table)
}

static TABLE: Lazy<Vec<NeutralEntry>> = Lazy::new(|| {
    build_table().expect("built-in reference configurations are well-formed")
});

/// Identifies an element either by chemical symbol or by atomic number.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ElementId<'a> {
    /// Chemical symbol, matched case-insensitively.
    Symbol(&'a str),
    /// Atomic number.
    Z(u32),
}

impl<'a> From<&'a str> for ElementId<'a> {
    fn from(s: &'a str) -> Self { Self::Symbol(s) }
}

impl<'a> From<&'a String> for ElementId<'a> {
    fn from(s: &'a String) -> Self { Self::Symbol(s.as_str()) }
}

impl From<u32> for ElementId<'_> {
    fn from(z: u32) -> Self { Self::Z(z) }
}

impl fmt::Display for ElementId<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symbol(s) => write!(f, "symbol '{}'", s),
            Self::Z(z) => write!(f, "atomic number {}", z),
        }
    }
}

fn entry_from_z(z: u32) -> Option<&'static NeutralEntry> {
    z.checked_sub(1).and_then(|k| TABLE.get(k as usize))
}

fn entry_from_symbol(symbol: &str) -> Option<&'static NeutralEntry> {
    let symbol = symbol.trim();
    if let Ok(z) = symbol.parse::<u32>() { return entry_from_z(z); }
    TABLE.iter().find(|e| e.symbol.eq_ignore_ascii_case(symbol))
}

/// Look up the neutral ground-state configuration of an element.
///
/// Symbols are matched case-insensitively; a symbol made only of digits is
/// read as an atomic number.
pub fn get_neutral_entry<'a, E>(element: E) -> LookupResult<&'static NeutralEntry>
where E: Into<ElementId<'a>>
{
    let element: ElementId = element.into();
    let entry = match element {
        ElementId::Symbol(s) => entry_from_symbol(s),
        ElementId::Z(z) => entry_from_z(z),
    };
    entry.ok_or_else(|| LookupError(format!("unknown element: {}", element)))
}

/// Get the chemical symbol for an atomic number.
pub fn symbol_from_z(z: u32) -> LookupResult<&'static str> {
    entry_from_z(z)
        .map(|e| e.symbol)
        .ok_or_else(|| LookupError(format!("unknown atomic number: {}", z)))
}

/// Get the atomic number for a chemical symbol.
pub fn z_from_symbol(symbol: &str) -> LookupResult<u32> {
    get_neutral_entry(ElementId::Symbol(symbol)).map(|e| e.z)
}
