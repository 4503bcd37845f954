//! Canonical renaming: replaces state identifiers with `q0, q1, …`,
//! start-first, so that every automaton observed by a caller of the four
//! public pipeline operations has a predictable, comparable naming scheme.

use super::Automaton;
use std::collections::HashMap;
use std::rc::Rc;

/// Renames every state of `automaton` in place to `q0..q(n-1)`, with the
/// start state becoming `q0` and the remaining states keeping their relative
/// insertion order. A no-op on an automaton with no start state (there is
/// nothing canonical to assign).
pub(crate) fn canonical_rename(automaton: &mut Automaton) {
    let Some(start) = automaton.start_idx() else {
        return;
    };
    let n = automaton.state_count();

    let mut order = Vec::with_capacity(n);
    order.push(start);
    order.extend((0..n).filter(|&i| i != start));

    let mut old_to_new = vec![0usize; n];
    for (new_idx, &old_idx) in order.iter().enumerate() {
        old_to_new[old_idx] = new_idx;
    }

    let mut renamed = Automaton::new();
    for (new_idx, &old_idx) in order.iter().enumerate() {
        renamed.push_state(Rc::from(format!("q{new_idx}")), automaton.is_accepting_idx(old_idx));
    }
    for (new_idx, &old_idx) in order.iter().enumerate() {
        for &(symbol, dst) in automaton.transitions_idx(old_idx) {
            renamed.push_transition(new_idx, symbol, old_to_new[dst]);
        }
    }
    renamed.set_start_idx(0);

    let index: HashMap<Rc<str>, usize> = renamed
        .state_ids()
        .enumerate()
        .map(|(idx, id)| (Rc::from(id), idx))
        .collect();
    renamed.index = index;

    *automaton = renamed;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::EPSILON;

    #[test]
    fn start_becomes_q0_and_rest_keep_relative_order() {
        let mut a = Automaton::new();
        a.add_state("z", false).unwrap();
        a.add_state("y", true).unwrap();
        a.add_state("start", false).unwrap();
        a.set_start("start").unwrap();
        a.add_transition("start", 'a', "z").unwrap();
        a.add_transition("z", EPSILON, "y").unwrap();

        canonical_rename(&mut a);

        assert_eq!(a.start(), Some("q0"));
        let ids: Vec<&str> = a.state_ids().collect();
        assert_eq!(ids, vec!["q0", "q1", "q2"]);
        // q0 ("start") --a--> q1 ("z")
        assert_eq!(a.transitions("q0").unwrap(), vec![('a', "q1")]);
        // q1 ("z") --eps--> q2 ("y")
        assert_eq!(a.transitions("q1").unwrap(), vec![(EPSILON, "q2")]);
        assert!(a.is_accepting("q2").unwrap());
    }

    #[test]
    fn renaming_an_already_canonical_automaton_is_a_no_op() {
        let mut a = Automaton::new();
        a.add_state("q0", false).unwrap();
        a.add_state("q1", true).unwrap();
        a.set_start("q0").unwrap();
        a.add_transition("q0", 'a', "q1").unwrap();

        let before = a.clone();
        canonical_rename(&mut a);
        assert_eq!(a, before);
    }
}
