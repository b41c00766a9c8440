//! Parsing of compact electron-configuration notation, e.g. `"[He] 2s2 2p3"`.
//!
//! ```
//! use radatom::notation::states_from_string;
//!
//! let states = states_from_string("[He] 2s2 2p3").unwrap();
//! assert_eq!(states.len(), 3);
//! assert_eq!(states[2].l(), 1);
//! assert_eq!(states.iter().map(|q| q.occ()).sum::<f64>(), 7.0);
//! ```

use std::str::FromStr;
use once_cell::sync::Lazy;
use regex::Regex;
use crate::{
    database::{ self, ElementId },
    error::{ ConfError, ParseError },
    qstate::QState,
};

pub type ConfResult<T> = Result<T, ConfError>;

// <n><orbital letters><occupancy>; fractional occupancies are allowed
static ORBTOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+)([spdfghi]+)(\d+(?:\.\d*)?)$")
        .expect("orbital token pattern is valid")
});

/// Parse a single orbital token like `"2p3"` into a [`QState`].
///
/// Returns [`ConfError::Parse`] naming the token if it does not have the form
/// `<digits><orbital letters><digits>`, or [`ConfError::QNum`] if the matched
/// groups are not valid quantum numbers.
pub fn parse_orbtoken(token: &str) -> ConfResult<QState> {
    let token = token.trim();
    let caps = ORBTOKEN.captures(token)
        .ok_or_else(|| ParseError(token.to_string()))?;
    let q = QState::from_strs(&caps[1], &caps[2], &caps[3])?;
    Ok(q)
}

/// Parse a whitespace-separated configuration string into a list of
/// [`QState`]s.
///
/// If the first token is a bracketed chemical symbol (e.g. `[Ne]`), the
/// neutral configuration of that element is used as a prefix; every remaining
/// token is parsed with [`parse_orbtoken`] and appended in order.
pub fn states_from_string(text: &str) -> ConfResult<Vec<QState>> {
    let mut tokens = text.split_whitespace().peekable();
    let mut states: Vec<QState> = Vec::new();
    if let Some(first) = tokens.next_if(|t| t.starts_with('[')) {
        let symbol
            = first.strip_prefix('[')
            .and_then(|t| t.strip_suffix(']'))
            .ok_or_else(|| ParseError(first.to_string()))?;
        let core = database::get_neutral_entry(ElementId::from(symbol))?;
        states.extend(core.states.iter().copied());
    }
    for token in tokens {
        states.push(parse_orbtoken(token)?);
    }
    Ok(states)
}

impl FromStr for QState {
    type Err = ConfError;

    fn from_str(s: &str) -> ConfResult<Self> { parse_orbtoken(s) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qstate::ORBITAL_LETTERS;

    #[test]
    fn every_letter_parses() {
        for (l, c) in ORBITAL_LETTERS.iter().enumerate() {
            let q = parse_orbtoken(&format!("2{}3", c)).unwrap();
            assert_eq!(q, QState::new(2, l as u32, 3.0).unwrap());
        }
    }

    #[test]
    fn bad_tokens() {
        assert!(matches!(parse_orbtoken("xyz"), Err(ConfError::Parse(_))));
        assert!(matches!(parse_orbtoken("2x3"), Err(ConfError::Parse(_))));
        assert!(matches!(parse_orbtoken("2p"), Err(ConfError::Parse(_))));
        assert!(matches!(parse_orbtoken("2pd3"), Err(ConfError::QNum(_))));
        let err = parse_orbtoken("xyz").unwrap_err();
        assert!(err.to_string().contains("xyz"));
    }

    #[test]
    fn fractional_and_fromstr() {
        let q: QState = "3d9.5".parse().unwrap();
        assert_eq!(q, QState::new(3, 2, 9.5).unwrap());
        let q: QState = " 10f14 ".parse().unwrap();
        assert_eq!((q.n(), q.l(), q.occ()), (10, 3, 14.0));
    }

    #[test]
    fn core_prefix() {
        let states = states_from_string("[Ne] 3s2 3p1").unwrap();
        let expected: Vec<QState>
            = [(1, 0, 2.0), (2, 0, 2.0), (2, 1, 6.0), (3, 0, 2.0), (3, 1, 1.0)]
            .into_iter()
            .map(|(n, l, occ)| QState::new(n, l, occ).unwrap())
            .collect();
        assert_eq!(states, expected);
    }

    #[test]
    fn bad_strings() {
        assert!(matches!(
            states_from_string("[Xx] 1s2"),
            Err(ConfError::Lookup(_)),
        ));
        assert!(matches!(
            states_from_string("[He 2s1"),
            Err(ConfError::Parse(_)),
        ));
        assert!(matches!(
            states_from_string("1s2 2s1 oops"),
            Err(ConfError::Parse(_)),
        ));
        assert!(states_from_string("").unwrap().is_empty());
    }
}
