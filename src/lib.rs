//! # regexfa
//!
//! `regexfa` is a small Rust library implementing the classical regular
//! expression to deterministic finite automaton pipeline as four
//! independently usable stages:
//!
//! 1. [`regex::validate_and_compile`] validates a restricted regex grammar
//!    (letters/digits, `|`, `*`, `(`/`)`, implicit concatenation) and
//!    compiles it to a postfix token stream.
//! 2. [`thompson::build_from_postfix`] folds that stream into an ε-NFA via
//!    Thompson's construction.
//! 3. [`epsilon::remove_epsilons`] eliminates λ-transitions, producing an
//!    equivalent NFA.
//! 4. [`subset::subset_construct`] determinizes the NFA via subset
//!    construction, producing a DFA.
//!
//! Every stage operates on and returns the same [`automaton::Automaton`]
//! type — an ε-NFA, NFA and DFA are all just automata with different
//! properties, not distinct Rust types — and every automaton handed back to
//! a caller has been canonically renamed to `q0, q1, …` with the start
//! state as `q0`.
//!
//! ## Usage
//!
//! ```rust
//! use regexfa::{build_from_postfix, remove_epsilons, subset_construct, validate_and_compile};
//!
//! let postfix = validate_and_compile("(a|b)*abb").unwrap();
//! let epsilon_nfa = build_from_postfix(&postfix).unwrap();
//! let nfa = remove_epsilons(&epsilon_nfa);
//! let dfa = subset_construct(&nfa).unwrap();
//!
//! assert_eq!(dfa.start(), Some("q0"));
//! // every DFA state has at most one outgoing edge per symbol
//! for id in dfa.state_ids().collect::<Vec<_>>() {
//!     let edges = dfa.transitions(id).unwrap();
//!     let mut symbols: Vec<char> = edges.iter().map(|&(sym, _)| sym).collect();
//!     symbols.sort();
//!     let before = symbols.len();
//!     symbols.dedup();
//!     assert_eq!(symbols.len(), before);
//! }
//! ```
//!
//! ## Scope
//!
//! This crate does not minimize automata, check language equivalence, or
//! simulate an automaton against an input string, and its regex grammar has
//! no character classes, anchors, counted quantifiers, lookaround or
//! escapes. It is a compiler pipeline, not a regex engine.

pub mod automaton;
pub mod error;
pub mod epsilon;
pub mod regex;
pub mod subset;
pub mod thompson;

pub use automaton::Automaton;
pub use epsilon::remove_epsilons;
pub use error::Error;
pub use regex::validate_and_compile;
pub use subset::subset_construct;
pub use thompson::build_from_postfix;
