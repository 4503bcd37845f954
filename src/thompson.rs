//! # Thompson construction (postfix → ε-NFA)
//!
//! [`build_from_postfix`] folds a postfix token stream into an ε-NFA by
//! stack-based composition, exactly mirroring the textbook algorithm (and
//! the reference Python implementation this crate's data model is grounded
//! on): a symbol token pushes a two-state automaton, `&` splices the second
//! operand's states into the first and bridges the old accept to the new
//! start with a λ-edge, `|` builds a fresh start with λ-edges to both
//! operands, and `*` adds a λ self-loop and admits the empty string by
//! marking the start accepting.
//!
//! Intermediate, pre-rename state identifiers are never observed by a
//! caller: every multi-automaton merge re-identifies the incoming states
//! with a fresh prefix drawn from a monotonic counter, and `&`/`|` both
//! canonically rename the merged result before pushing it back onto the
//! stack, so any fresh, unique naming scheme works here since renaming
//! erases it anyway.

use crate::automaton::rename::canonical_rename;
use crate::automaton::Automaton;
use crate::error::Error;
use crate::regex::token::PostfixToken;
use std::rc::Rc;

/// Builds an ε-NFA from a postfix token stream produced by
/// [`crate::regex::validate_and_compile`]. Fails with
/// [`Error::MalformedPostfix`] if the stream underflows the construction
/// stack or leaves more than one automaton on it — which should never
/// happen for a stream that actually came from the validator.
pub fn build_from_postfix(tokens: &[PostfixToken]) -> Result<Automaton, Error> {
    let mut builder = Builder::new();
    for &token in tokens {
        match token {
            PostfixToken::Symbol(c) => builder.push_symbol(c),
            PostfixToken::Concat => builder.apply_concat()?,
            PostfixToken::Union => builder.apply_union()?,
            PostfixToken::Star => builder.apply_star()?,
        }
    }
    builder.finish()
}

struct Builder {
    stack: Vec<Automaton>,
    state_counter: usize,
    merge_counter: usize,
}

impl Builder {
    fn new() -> Self {
        Builder {
            stack: Vec::new(),
            state_counter: 0,
            merge_counter: 0,
        }
    }

    fn fresh_state_id(&mut self) -> Rc<str> {
        let id = Rc::from(format!("t{}", self.state_counter));
        self.state_counter += 1;
        id
    }

    fn fresh_merge_prefix(&mut self) -> String {
        let prefix = format!("m{}_", self.merge_counter);
        self.merge_counter += 1;
        prefix
    }

    fn push_symbol(&mut self, symbol: char) {
        let mut nfa = Automaton::new();
        let a = self.fresh_state_id();
        let b = self.fresh_state_id();
        let a_idx = nfa.push_state(a, false);
        let b_idx = nfa.push_state(b, true);
        nfa.push_transition(a_idx, symbol, b_idx);
        nfa.set_start_idx(a_idx);
        self.stack.push(nfa);
    }

    fn pop_two(&mut self) -> Result<(Automaton, Automaton), Error> {
        let n2 = self.stack.pop().ok_or(Error::MalformedPostfix)?;
        let n1 = self.stack.pop().ok_or(Error::MalformedPostfix)?;
        Ok((n1, n2))
    }

    fn apply_concat(&mut self) -> Result<(), Error> {
        let (mut n1, n2) = self.pop_two()?;
        let n1_accepting: Vec<usize> = (0..n1.state_count()).filter(|&i| n1.is_accepting_idx(i)).collect();

        let prefix = self.fresh_merge_prefix();
        let n2_start = n1.merge_in(n2, &prefix);

        for idx in n1_accepting {
            n1.set_accepting_idx(idx, false);
            let from = n1.id_at(idx);
            let to = n1.id_at(n2_start);
            n1.add_transition(&from, crate::automaton::EPSILON, &to).expect("endpoints exist");
        }

        canonical_rename(&mut n1);
        self.stack.push(n1);
        Ok(())
    }

    fn apply_union(&mut self) -> Result<(), Error> {
        let (mut n1, n2) = self.pop_two()?;
        let n1_start = n1.start_idx().ok_or(Error::MalformedPostfix)?;

        let prefix = self.fresh_merge_prefix();
        let n2_start = n1.merge_in(n2, &prefix);

        let new_start_id = self.fresh_state_id();
        let new_start_idx = n1.push_state(new_start_id.clone(), false);
        let n1_start_id = n1.id_at(n1_start);
        let n2_start_id = n1.id_at(n2_start);
        n1.add_transition(&new_start_id, crate::automaton::EPSILON, &n1_start_id)
            .expect("endpoints exist");
        n1.add_transition(&new_start_id, crate::automaton::EPSILON, &n2_start_id)
            .expect("endpoints exist");
        n1.set_start_idx(new_start_idx);

        canonical_rename(&mut n1);
        self.stack.push(n1);
        Ok(())
    }

    fn apply_star(&mut self) -> Result<(), Error> {
        let mut n = self.stack.pop().ok_or(Error::MalformedPostfix)?;
        let start = n.start_idx().ok_or(Error::MalformedPostfix)?;
        let accepting: Vec<usize> = (0..n.state_count()).filter(|&i| n.is_accepting_idx(i)).collect();
        for idx in accepting {
            n.push_transition(idx, crate::automaton::EPSILON, start);
        }
        n.set_accepting_idx(start, true);
        self.stack.push(n);
        Ok(())
    }

    fn finish(mut self) -> Result<Automaton, Error> {
        if self.stack.len() != 1 {
            return Err(Error::MalformedPostfix);
        }
        let mut automaton = self.stack.pop().unwrap();
        canonical_rename(&mut automaton);
        Ok(automaton)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regex::validate_and_compile;

    fn build(regex: &str) -> Automaton {
        build_from_postfix(&validate_and_compile(regex).unwrap()).unwrap()
    }

    #[test]
    fn empty_postfix_is_malformed() {
        assert_eq!(build_from_postfix(&[]).unwrap_err(), Error::MalformedPostfix);
    }

    #[test]
    fn excess_residue_is_malformed() {
        let tokens = vec![PostfixToken::Symbol('a'), PostfixToken::Symbol('b')];
        assert_eq!(build_from_postfix(&tokens).unwrap_err(), Error::MalformedPostfix);
    }

    #[test]
    fn concat_underflow_is_malformed() {
        let tokens = vec![PostfixToken::Symbol('a'), PostfixToken::Concat];
        assert_eq!(build_from_postfix(&tokens).unwrap_err(), Error::MalformedPostfix);
    }

    #[test]
    fn single_symbol_is_two_states_with_one_edge() {
        let nfa = build("a");
        assert_eq!(nfa.state_count(), 2);
        assert_eq!(nfa.start(), Some("q0"));
        assert!(!nfa.is_accepting("q0").unwrap());
        assert!(nfa.is_accepting("q1").unwrap());
        assert_eq!(nfa.transitions("q0").unwrap(), vec![('a', "q1")]);
    }

    #[test]
    fn star_makes_start_accepting() {
        let nfa = build("a*");
        assert!(nfa.is_accepting(nfa.start().unwrap()).unwrap());
    }

    #[test]
    fn union_start_has_epsilon_edges_to_both_operands() {
        let nfa = build("a|b");
        let start = nfa.start().unwrap();
        let edges = nfa.transitions(start).unwrap();
        assert_eq!(edges.len(), 2);
        assert!(edges.iter().all(|&(sym, _)| sym == crate::automaton::EPSILON));
    }

    #[test]
    fn result_is_always_canonically_renamed() {
        let nfa = build("(a|b)*abb");
        let ids: Vec<&str> = nfa.state_ids().collect();
        let expected: Vec<String> = (0..ids.len()).map(|i| format!("q{i}")).collect();
        assert_eq!(ids, expected.iter().map(|s| s.as_str()).collect::<Vec<_>>());
        assert_eq!(nfa.start(), Some("q0"));
    }
}
