//! # The automaton data model
//!
//! An [`Automaton`] is the single representation shared by every stage of the
//! pipeline (ε-NFA, NFA, DFA are all just automata with different
//! properties — presence of λ-transitions, determinism — rather than
//! distinct Rust types). States are identified by string ids that are unique
//! within their automaton; internally, each state also lives at a small
//! integer index so that traversals (closures, merges, renaming) don't pay
//! for string comparisons. Traversal code works entirely in `usize` indices
//! and only surfaces names at the edges of the public API.
//!
//! ## Example
//! ```
//! use regexfa::automaton::Automaton;
//!
//! let mut a = Automaton::new();
//! a.add_state("s0", false).unwrap();
//! a.add_state("s1", true).unwrap();
//! a.set_start("s0").unwrap();
//! a.add_transition("s0", 'a', "s1").unwrap();
//!
//! let closure = a.epsilon_closure("s0").unwrap();
//! assert!(closure.iter().any(|id| &**id == "s0"));
//! ```

pub(crate) mod rename;

use crate::error::Error;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::rc::Rc;

/// The symbol denoting an empty (λ) transition. Never a valid alphabet symbol.
pub const EPSILON: char = 'λ';

/// A single state: an identifier, an accepting flag, and its outgoing
/// transitions. Transitions are stored as `(symbol, destination index)`
/// pairs in insertion order; duplicates are tolerated (they carry no extra
/// meaning, a transition set is semantically just a set).
#[derive(Clone, Debug, PartialEq, Eq)]
struct State {
    id: Rc<str>,
    accepting: bool,
    transitions: Vec<(char, usize)>,
}

/// An automaton: a collection of states (insertion order preserved) plus an
/// optional start state. Empty automata and automata mid-construction may
/// have no start state; every other public operation that depends on one
/// returns [`Error::NoStartState`] if it is missing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Automaton {
    states: Vec<State>,
    index: HashMap<Rc<str>, usize>,
    start: Option<usize>,
}

impl Default for Automaton {
    fn default() -> Self {
        Self::new()
    }
}

impl Automaton {
    /// Creates an empty automaton with no states and no start state.
    pub fn new() -> Self {
        Automaton {
            states: Vec::new(),
            index: HashMap::new(),
            start: None,
        }
    }

    /// Adds a new state. Fails with [`Error::DuplicateState`] if `id` is
    /// already used in this automaton. Returns the (cheaply cloned) id
    /// handle on success.
    pub fn add_state(&mut self, id: impl Into<Rc<str>>, accepting: bool) -> Result<Rc<str>, Error> {
        let id = id.into();
        if self.index.contains_key(&id) {
            return Err(Error::DuplicateState(id));
        }
        let idx = self.push_state(id.clone(), accepting);
        self.index.insert(id.clone(), idx);
        Ok(id)
    }

    /// Designates `id` as the (sole) start state. Fails with
    /// [`Error::UnknownState`] if `id` doesn't exist.
    pub fn set_start(&mut self, id: &str) -> Result<(), Error> {
        let idx = self.idx(id)?;
        self.start = Some(idx);
        Ok(())
    }

    /// Adds a transition `src --symbol--> dst`. Fails with
    /// [`Error::UnknownState`] if either endpoint is absent.
    pub fn add_transition(&mut self, src: &str, symbol: char, dst: &str) -> Result<(), Error> {
        let src_idx = self.idx(src)?;
        let dst_idx = self.idx(dst)?;
        self.push_transition(src_idx, symbol, dst_idx);
        Ok(())
    }

    /// Computes the ε-closure of `id`: the set of states reachable from it
    /// using only λ-transitions, including `id` itself. Returned in sorted
    /// order so it can be used directly as a canonical composite-state key
    /// (see the subset construction).
    pub fn epsilon_closure(&self, id: &str) -> Result<BTreeSet<Rc<str>>, Error> {
        let idx = self.idx(id)?;
        Ok(self
            .epsilon_closure_idx(idx)
            .into_iter()
            .map(|i| self.states[i].id.clone())
            .collect())
    }

    /// The id of the start state, if one has been designated.
    pub fn start(&self) -> Option<&str> {
        self.start.map(|idx| &*self.states[idx].id)
    }

    /// Whether `id` is an accepting state. Fails with
    /// [`Error::UnknownState`] if `id` doesn't exist.
    pub fn is_accepting(&self, id: &str) -> Result<bool, Error> {
        let idx = self.idx(id)?;
        Ok(self.states[idx].accepting)
    }

    /// The number of states in this automaton.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// State ids in insertion order.
    pub fn state_ids(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(|s| &*s.id)
    }

    /// The outgoing transitions of `id`, as `(symbol, destination id)` pairs
    /// in insertion order. Fails with [`Error::UnknownState`] if `id`
    /// doesn't exist.
    pub fn transitions(&self, id: &str) -> Result<Vec<(char, &str)>, Error> {
        let idx = self.idx(id)?;
        Ok(self.states[idx]
            .transitions
            .iter()
            .map(|&(sym, dst)| (sym, &*self.states[dst].id))
            .collect())
    }

    /// Renders a read-only view suitable for a rendering collaborator: an
    /// ordered list of `(id, accepting)` states, an ordered list of
    /// `(src, symbol, dst)` edges, and the start id. No particular wire
    /// format is mandated, this is just a convenient intermediate shape.
    pub fn export(&self) -> Result<Export, Error> {
        let start = self.start.ok_or(Error::NoStartState)?;
        let states = self
            .states
            .iter()
            .map(|s| (s.id.clone(), s.accepting))
            .collect();
        let edges = self
            .states
            .iter()
            .flat_map(|s| {
                s.transitions
                    .iter()
                    .map(move |&(sym, dst)| (s.id.clone(), sym, self.states[dst].id.clone()))
            })
            .collect();
        Ok(Export {
            states,
            edges,
            start: self.states[start].id.clone(),
        })
    }

    fn idx(&self, id: &str) -> Result<usize, Error> {
        self.index.get(id).copied().ok_or_else(|| Error::UnknownState(Rc::from(id)))
    }

    // --- index-based internals used by the pipeline stages (thompson,
    // epsilon-removal, subset construction). These trust their callers to
    // pass indices that belong to this automaton and ids that are fresh;
    // validation only happens at the string-keyed edges of the public
    // API. ---

    pub(crate) fn push_state(&mut self, id: Rc<str>, accepting: bool) -> usize {
        let idx = self.states.len();
        self.states.push(State {
            id,
            accepting,
            transitions: Vec::new(),
        });
        idx
    }

    pub(crate) fn push_transition(&mut self, src_idx: usize, symbol: char, dst_idx: usize) {
        self.states[src_idx].transitions.push((symbol, dst_idx));
    }

    pub(crate) fn start_idx(&self) -> Option<usize> {
        self.start
    }

    pub(crate) fn set_start_idx(&mut self, idx: usize) {
        self.start = Some(idx);
    }

    pub(crate) fn id_at(&self, idx: usize) -> Rc<str> {
        self.states[idx].id.clone()
    }

    pub(crate) fn is_accepting_idx(&self, idx: usize) -> bool {
        self.states[idx].accepting
    }

    pub(crate) fn set_accepting_idx(&mut self, idx: usize, accepting: bool) {
        self.states[idx].accepting = accepting;
    }

    pub(crate) fn transitions_idx(&self, idx: usize) -> &[(char, usize)] {
        &self.states[idx].transitions
    }

    pub(crate) fn epsilon_closure_idx(&self, start: usize) -> HashSet<usize> {
        let mut seen = HashSet::from([start]);
        let mut frontier = vec![start];
        while let Some(idx) = frontier.pop() {
            for &(sym, dst) in &self.states[idx].transitions {
                if sym == EPSILON && seen.insert(dst) {
                    frontier.push(dst);
                }
            }
        }
        seen
    }

    /// Splices every state of `other` into `self`, re-identifying them with
    /// `prefix` to guarantee freshness (the caller is responsible for making
    /// `prefix` unique per merge, e.g. a monotonic counter). Returns the new
    /// index of what used to be `other`'s start state.
    pub(crate) fn merge_in(&mut self, other: Automaton, prefix: &str) -> usize {
        let base = self.states.len();
        let start = other.start.expect("merged automaton must have a start state");
        for mut state in other.states {
            state.id = Rc::from(format!("{prefix}{}", state.id));
            for (_, dst) in state.transitions.iter_mut() {
                *dst += base;
            }
            self.index.insert(state.id.clone(), self.states.len());
            self.states.push(state);
        }
        base + start
    }
}

/// A read-only export of an automaton for a rendering collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Export {
    pub states: Vec<(Rc<str>, bool)>,
    pub edges: Vec<(Rc<str>, char, Rc<str>)>,
    pub start: Rc<str>,
}
