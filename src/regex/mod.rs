//! # Regex validation and infix → postfix conversion
//!
//! The regex grammar accepted here is intentionally small: a single
//! printable alphabet symbol is a letter or digit, sequencing is implicit
//! (concatenation), `|` is alternation, `*` is Kleene star, and `(`/`)`
//! group. There are no character classes, anchors, counted quantifiers,
//! lookaround, or escapes — those are explicitly out of scope (see the
//! crate's top-level documentation).
//!
//! [`validate_and_compile`] is the only entry point: it validates the raw
//! string against the grammar above, reporting the first violation as an
//! [`Error::InvalidRegex`] with the offending character's position, then
//! inserts the implicit concatenation operator and runs a standard
//! Dijkstra shunting-yard to produce a postfix token stream. That stream is
//! what [`crate::thompson::build_from_postfix`] consumes.
//!
//! ```
//! use regexfa::regex::validate_and_compile;
//! use regexfa::regex::token::PostfixToken::*;
//!
//! let postfix = validate_and_compile("(a|b)*abb").unwrap();
//! assert_eq!(
//!     postfix,
//!     vec![Symbol('a'), Symbol('b'), Union, Star, Symbol('a'), Concat, Symbol('b'), Concat, Symbol('b'), Concat]
//! );
//! ```

pub mod token;

use crate::error::Error;
pub use token::PostfixToken;

/// Validates `input` against the restricted regex grammar and compiles it
/// to a postfix token stream, inserting implicit concatenation markers
/// along the way. Fails with [`Error::InvalidRegex`] on the first grammar
/// violation found, citing the character's position in `input`.
pub fn validate_and_compile(input: &str) -> Result<Vec<PostfixToken>, Error> {
    let chars: Vec<char> = input.chars().collect();
    validate(&chars)?;
    let preprocessed = insert_concatenation(&chars);
    Ok(shunting_yard(&preprocessed))
}

fn is_symbol(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

fn invalid(pos: usize, reason: impl Into<String>) -> Error {
    Error::InvalidRegex {
        pos,
        reason: reason.into(),
    }
}

fn validate(chars: &[char]) -> Result<(), Error> {
    if chars.is_empty() {
        return Err(invalid(0, "empty expression"));
    }

    let mut paren_stack = Vec::new();
    for (pos, &c) in chars.iter().enumerate() {
        if !is_symbol(c) && !matches!(c, '|' | '*' | '(' | ')') {
            let reason = if c == '&' {
                "'&' is reserved for the internal concatenation marker and may not appear in raw input".to_string()
            } else {
                format!("'{c}' is not a letter, digit or operator")
            };
            return Err(invalid(pos, reason));
        }

        match c {
            '(' => {
                paren_stack.push(pos);
                if let Some(&next) = chars.get(pos + 1) {
                    if next == ')' {
                        return Err(invalid(pos + 1, "empty group '()' has nothing to match"));
                    }
                    if matches!(next, '|' | '*') {
                        return Err(invalid(pos + 1, format!("'{next}' may not immediately follow '('")));
                    }
                }
            }
            ')' => {
                if paren_stack.pop().is_none() {
                    return Err(invalid(pos, "unmatched closing parenthesis"));
                }
            }
            '|' | '*' => {
                if pos == 0 {
                    return Err(invalid(pos, format!("'{c}' may not appear at the start of an expression")));
                }
                if c == '|' && pos == chars.len() - 1 {
                    return Err(invalid(pos, "'|' may not appear at the end of an expression"));
                }
                if let Some(&next) = chars.get(pos + 1) {
                    if matches!(next, '|' | '*') {
                        return Err(invalid(pos + 1, format!("'{next}' may not immediately follow '{c}'")));
                    }
                }
            }
            _ => {}
        }
    }

    if let Some(&pos) = paren_stack.last() {
        return Err(invalid(pos, "unclosed parenthesis"));
    }

    Ok(())
}

/// Inserts the explicit concatenation marker `&` between adjacent characters
/// P and C when P ends an operand (symbol, `*`, `)`) and C starts one
/// (symbol, `(`).
fn insert_concatenation(chars: &[char]) -> Vec<char> {
    let mut out = Vec::with_capacity(chars.len() * 2);
    let mut prev: Option<char> = None;
    for &c in chars {
        if let Some(p) = prev {
            let prev_ends_operand = is_symbol(p) || p == '*' || p == ')';
            let curr_starts_operand = is_symbol(c) || c == '(';
            if prev_ends_operand && curr_starts_operand {
                out.push('&');
            }
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

fn precedence(op: char) -> u8 {
    match op {
        '*' => 3,
        '&' => 2,
        '|' => 1,
        _ => 0,
    }
}

fn to_token(op: char) -> PostfixToken {
    match op {
        '&' => PostfixToken::Concat,
        '|' => PostfixToken::Union,
        '*' => PostfixToken::Star,
        _ => unreachable!("only operators are ever pushed onto the operator stack"),
    }
}

/// Dijkstra shunting yard over the preprocessed (concatenation-marked)
/// character sequence, honoring `* > & > |` precedence.
fn shunting_yard(chars: &[char]) -> Vec<PostfixToken> {
    let mut output = Vec::with_capacity(chars.len());
    let mut ops: Vec<char> = Vec::new();

    for &c in chars {
        match c {
            '(' => ops.push(c),
            ')' => {
                while let Some(&top) = ops.last() {
                    if top == '(' {
                        break;
                    }
                    output.push(to_token(ops.pop().unwrap()));
                }
                ops.pop();
            }
            '&' | '|' | '*' => {
                while let Some(&top) = ops.last() {
                    if top == '(' || precedence(top) < precedence(c) {
                        break;
                    }
                    output.push(to_token(ops.pop().unwrap()));
                }
                ops.push(c);
            }
            symbol => output.push(PostfixToken::Symbol(symbol)),
        }
    }

    while let Some(op) = ops.pop() {
        output.push(to_token(op));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use PostfixToken::*;

    #[test]
    fn empty_input_is_rejected() {
        assert!(validate_and_compile("").is_err());
    }

    #[test]
    fn unbalanced_parens_report_a_position() {
        let err = validate_and_compile("((").unwrap_err();
        assert!(matches!(err, Error::InvalidRegex { pos: 0, .. } | Error::InvalidRegex { pos: 1, .. }));

        let err = validate_and_compile("a)").unwrap_err();
        assert_eq!(err, invalid(1, "unmatched closing parenthesis"));
    }

    #[test]
    fn rejects_reserved_concatenation_marker() {
        assert!(validate_and_compile("a&b").is_err());
    }

    #[test]
    fn rejects_empty_group_and_operator_right_after_open_paren() {
        assert!(validate_and_compile("()").is_err());
        assert!(validate_and_compile("a()b").is_err());
        assert!(validate_and_compile("(|a)").is_err());
        assert!(validate_and_compile("(*a)").is_err());
    }

    #[test]
    fn rejects_operator_in_bad_position() {
        assert!(validate_and_compile("|a").is_err());
        assert!(validate_and_compile("a|").is_err());
        assert!(validate_and_compile("*a").is_err());
        assert!(validate_and_compile("a||b").is_err());
        assert!(validate_and_compile("a**").is_err()); // '*' may not follow '*'
    }

    #[test]
    fn single_symbol() {
        assert_eq!(validate_and_compile("a").unwrap(), vec![Symbol('a')]);
    }

    #[test]
    fn union() {
        assert_eq!(validate_and_compile("a|b").unwrap(), vec![Symbol('a'), Symbol('b'), Union]);
    }

    #[test]
    fn concatenation() {
        assert_eq!(validate_and_compile("ab").unwrap(), vec![Symbol('a'), Symbol('b'), Concat]);
    }

    #[test]
    fn kleene_star() {
        assert_eq!(validate_and_compile("a*").unwrap(), vec![Symbol('a'), Star]);
    }

    #[test]
    fn star_union_then_concatenation() {
        assert_eq!(
            validate_and_compile("(a|b)*abb").unwrap(),
            vec![Symbol('a'), Symbol('b'), Union, Star, Symbol('a'), Concat, Symbol('b'), Concat, Symbol('b'), Concat]
        );
    }

    proptest! {
        /// A pure sequence of letters/digits validates, and its postfix
        /// is exactly the input with '&' inserted between every adjacent pair.
        #[test]
        fn plain_sequence_gets_concat_inserted_between_every_pair(s in "[a-z0-9]{1,8}") {
            let postfix = validate_and_compile(&s).unwrap();
            let mut expected = Vec::new();
            for (i, c) in s.chars().enumerate() {
                if i > 0 {
                    expected.push(Concat);
                }
                expected.push(Symbol(c));
            }
            prop_assert_eq!(postfix, expected);
        }
    }
}
