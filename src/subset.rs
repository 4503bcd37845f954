//! # Subset construction (NFA → DFA)
//!
//! [`subset_construct`] builds an equivalent deterministic automaton whose
//! states are sets of the input NFA's states. A composite state is keyed by
//! the sorted, comma-joined member ids wrapped in braces (e.g. `{q1,q2}`),
//! which gives the construction a canonical, reproducible identifier before
//! the usual final [`crate::automaton::rename::canonical_rename`] pass
//! replaces it with `q0, q1, …` — grounded in the reference Python
//! `to_dfa`'s worklist-over-sets approach, adapted to avoid ever exposing
//! the braided ids to a caller.
//!
//! Expects its input to already be free of λ-transitions (i.e. the output of
//! [`crate::epsilon::remove_epsilons`]); a state's "move" on a symbol is
//! simply the union, over every member, of that member's destinations on
//! that symbol — no further closure is taken.

use crate::automaton::rename::canonical_rename;
use crate::automaton::{Automaton, EPSILON};
use crate::error::Error;
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

/// Determinizes `automaton` via subset construction. Fails with
/// [`Error::NoStartState`] if `automaton` has no designated start state.
///
/// Residual λ-transitions are tolerated: both the initial composite state
/// and every computed target are closed under ε before being used, so this
/// is safe to call directly on an ε-NFA as well as on the ε-free NFA
/// produced by [`crate::epsilon::remove_epsilons`].
pub fn subset_construct(automaton: &Automaton) -> Result<Automaton, Error> {
    let start_idx = automaton.start_idx().ok_or(Error::NoStartState)?;

    let alphabet: BTreeSet<char> = (0..automaton.state_count())
        .flat_map(|i| automaton.transitions_idx(i).iter().map(|&(sym, _)| sym))
        .filter(|&sym| sym != EPSILON)
        .collect();

    let mut dfa = Automaton::new();
    let mut seen: HashMap<BTreeSet<usize>, Rc<str>> = HashMap::new();
    let mut worklist: Vec<BTreeSet<usize>> = Vec::new();

    let start_set: BTreeSet<usize> = automaton.epsilon_closure_idx(start_idx).into_iter().collect();
    let start_id = composite_id(&automaton_ids(automaton, &start_set));
    dfa.add_state(start_id.clone(), composite_accepts(automaton, &start_set)).expect("fresh id");
    dfa.set_start(&start_id).expect("just added");
    seen.insert(start_set.clone(), start_id);
    worklist.push(start_set);

    while let Some(current) = worklist.pop() {
        let current_id = seen[&current].clone();
        for &symbol in &alphabet {
            let mut moved: BTreeSet<usize> = BTreeSet::new();
            for &member in &current {
                for &(sym, dst) in automaton.transitions_idx(member) {
                    if sym == symbol {
                        moved.insert(dst);
                    }
                }
            }
            if moved.is_empty() {
                continue;
            }
            let mut target: BTreeSet<usize> = BTreeSet::new();
            for &m in &moved {
                target.extend(automaton.epsilon_closure_idx(m));
            }
            let target_id = match seen.get(&target) {
                Some(id) => id.clone(),
                None => {
                    let id = composite_id(&automaton_ids(automaton, &target));
                    dfa.add_state(id.clone(), composite_accepts(automaton, &target)).expect("fresh id");
                    seen.insert(target.clone(), id.clone());
                    worklist.push(target);
                    id
                }
            };
            dfa.add_transition(&current_id, symbol, &target_id).expect("endpoints just added");
        }
    }

    canonical_rename(&mut dfa);
    Ok(dfa)
}

fn automaton_ids(automaton: &Automaton, members: &BTreeSet<usize>) -> Vec<Rc<str>> {
    let mut ids: Vec<Rc<str>> = members.iter().map(|&i| automaton.id_at(i)).collect();
    ids.sort();
    ids
}

fn composite_accepts(automaton: &Automaton, members: &BTreeSet<usize>) -> bool {
    members.iter().any(|&i| automaton.is_accepting_idx(i))
}

fn composite_id(sorted_ids: &[Rc<str>]) -> Rc<str> {
    let joined = sorted_ids.iter().map(|s| &**s).collect::<Vec<_>>().join(",");
    Rc::from(format!("{{{joined}}}"))
}
