//! Pairing of all-electron (AE) and pseudized (PP) functions by orbital, ahead
//! of any comparison or rendering.
//!
//! Both sides are insertion-ordered maps from an orbital key to a function;
//! pairs come out in the order of the map that drives the iteration.

use std::{ fmt, hash::Hash };
use indexmap::IndexMap;
use crate::{ database::LookupResult, error::LookupError };

/// One orbital with its AE function and, if available, its PP counterpart.
#[derive(Copy, Clone, Debug)]
pub struct AePpPair<'a, K, F> {
    /// Orbital key.
    pub state: &'a K,
    /// All-electron function.
    pub ae: &'a F,
    /// Pseudized function, if one was given for this orbital.
    pub pp: Option<&'a F>,
}

/// Pair AE functions with PP functions, in AE order.
///
/// Without a PP map every AE function is returned alone. With one, AE states
/// that have no PP counterpart are skipped.
pub fn pair_aepp<'a, K, F>(
    ae_funcs: &'a IndexMap<K, F>,
    pp_funcs: Option<&'a IndexMap<K, F>>,
) -> Vec<AePpPair<'a, K, F>>
where K: Hash + Eq
{
    ae_funcs.iter()
        .filter_map(|(state, ae)| {
            match pp_funcs {
                None => Some(AePpPair { state, ae, pp: None }),
                Some(pp_map) => {
                    pp_map.get(state).map(|pp| AePpPair { state, ae, pp: Some(pp) })
                },
            }
        })
        .collect()
}

/// Pair AE and PP logarithmic derivatives, in PP order.
///
/// Both maps must hold the same number of states, and every PP state must
/// have an AE counterpart.
pub fn pair_logders<'a, K, F>(
    ae_logders: &'a IndexMap<K, F>,
    pp_logders: &'a IndexMap<K, F>,
) -> LookupResult<Vec<(&'a K, &'a F, &'a F)>>
where K: Hash + Eq + fmt::Display
{
    if ae_logders.len() != pp_logders.len() {
        return Err(LookupError(format!(
            "got {} AE and {} PP logarithmic derivatives",
            ae_logders.len(), pp_logders.len(),
        )));
    }
    pp_logders.iter()
        .map(|(state, pp)| {
            ae_logders.get(state)
                .map(|ae| (state, ae, pp))
                .ok_or_else(|| LookupError(format!("no AE logder for state {}", state)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use ndarray as nd;
    use super::*;
    use crate::{ qstate::NlkState, radial::RadialWaveFunction };

    fn wf(n: u32, l: u32, scale: f64) -> (NlkState, RadialWaveFunction) {
        let nlk = NlkState::new(n, l);
        let rmesh = nd::array![0.0, 1.0, 2.0];
        let values = rmesh.mapv(|r| scale * r);
        let f = RadialWaveFunction::new(nlk, nlk.to_string(), rmesh, values).unwrap();
        (nlk, f)
    }

    #[test]
    fn aepp_pairs_in_ae_order() {
        let ae: IndexMap<_, _> = [wf(3, 2, 1.0), wf(1, 0, 1.0), wf(2, 1, 1.0)].into_iter().collect();
        let pp: IndexMap<_, _> = [wf(2, 1, 0.5), wf(3, 2, 0.5)].into_iter().collect();

        let alone = pair_aepp(&ae, None);
        assert_eq!(alone.len(), 3);
        assert!(alone.iter().all(|p| p.pp.is_none()));

        let pairs = pair_aepp(&ae, Some(&pp));
        let states: Vec<NlkState> = pairs.iter().map(|p| *p.state).collect();
        assert_eq!(states, vec![NlkState::new(3, 2), NlkState::new(2, 1)]);
        assert!(pairs.iter().all(|p| p.pp.is_some()));
        assert_eq!(pairs[0].pp.map(|f| f.values()[2]), Some(1.0));
    }

    #[test]
    fn logders_need_matching_states() {
        let ae: IndexMap<_, _> = [wf(1, 0, 1.0), wf(2, 1, 1.0)].into_iter().collect();
        let pp: IndexMap<_, _> = [wf(2, 1, 0.5), wf(1, 0, 0.5)].into_iter().collect();
        let pairs = pair_logders(&ae, &pp).unwrap();
        assert_eq!(*pairs[0].0, NlkState::new(2, 1));
        assert_eq!(pairs[0].1.values()[2], 2.0);
        assert_eq!(pairs[0].2.values()[2], 1.0);

        let short: IndexMap<_, _> = [wf(1, 0, 0.5)].into_iter().collect();
        assert!(pair_logders(&ae, &short).is_err());

        let other: IndexMap<_, _> = [wf(1, 0, 0.5), wf(3, 2, 0.5)].into_iter().collect();
        let err = pair_logders(&ae, &other).unwrap_err();
        assert!(err.to_string().contains("n=3, l=2"));
    }
}
