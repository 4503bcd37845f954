//! # ε-removal (ε-NFA → NFA)
//!
//! [`remove_epsilons`] rebuilds an automaton's transition relation so that no
//! λ-edge survives, while preserving the language it accepts: for
//! every state `s` and symbol `c`, the new destinations of `s` on `c` are the
//! ε-closure of wherever the old automaton could reach on `c` from anywhere
//! in `s`'s own ε-closure, and `s` becomes accepting if any state in its
//! ε-closure was accepting. This is the textbook λ-elimination construction,
//! grounded in the same `get_epsilon_closure`-driven approach the reference
//! Python `convert_to_nfa` uses, adapted here to operate over the shared
//! index-based internals rather than rebuilding a fresh state graph by hand.

use crate::automaton::rename::canonical_rename;
use crate::automaton::{Automaton, EPSILON};
use std::collections::BTreeSet;

/// Produces an equivalent automaton with every λ-transition eliminated.
/// Unreachable-by-symbol states are kept (reachability pruning is not part
/// of this operation); the result is canonically renamed.
pub fn remove_epsilons(automaton: &Automaton) -> Automaton {
    let n = automaton.state_count();
    let closures: Vec<BTreeSet<usize>> = (0..n).map(|i| automaton.epsilon_closure_idx(i).into_iter().collect()).collect();

    let mut result = Automaton::new();
    for i in 0..n {
        result.push_state(automaton.id_at(i), closures[i].iter().any(|&t| automaton.is_accepting_idx(t)));
    }

    for i in 0..n {
        let mut symbol_targets: Vec<(char, usize)> = Vec::new();
        for &t in &closures[i] {
            for &(sym, dst) in automaton.transitions_idx(t) {
                if sym == EPSILON {
                    continue;
                }
                for &reachable in &closures[dst] {
                    if !symbol_targets.contains(&(sym, reachable)) {
                        symbol_targets.push((sym, reachable));
                    }
                }
            }
        }
        for (sym, dst) in symbol_targets {
            result.push_transition(i, sym, dst);
        }
    }

    if let Some(start) = automaton.start_idx() {
        result.set_start_idx(start);
    }

    canonical_rename(&mut result);
    result
}
