//! Call-shape signatures
//!
//! A signature is written as whitespace-separated tokens:
//!
//! ```text
//! demo <shape> [--verbose]
//! ```
//!
//! The first token is the action. Every later token is either `<name>`, one
//! required positional slot, or `[--name]`, one optional flag. Slots are
//! matched by count only; their names are for usage text.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::request::Request;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("Signature must not be blank")]
    Blank,

    #[error("Invalid token '{token}' in signature '{signature}': expected '<name>' or '[--name]'")]
    Grammar { signature: String, token: String },
}

/// One non-action token of a signature
#[derive(Debug, PartialEq, Eq)]
enum Slot<'a> {
    Param(&'a str),
    Flag(&'a str),
}

impl<'a> Slot<'a> {
    fn classify(token: &'a str) -> Option<Self> {
        if let Some(name) = token.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
            return is_identifier(name).then_some(Slot::Param(name));
        }
        if let Some(name) = token.strip_prefix("[--").and_then(|t| t.strip_suffix(']')) {
            return is_identifier(name).then_some(Slot::Flag(name));
        }
        None
    }
}

fn is_identifier(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('-')
        && !name.contains(|c: char| matches!(c, '<' | '>' | '[' | ']'))
}

/// Compiled description of the call shape one action accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    action: String,
    params: Vec<String>,
    /// Declaration order and spelling, no duplicates
    flags: Vec<String>,
    /// Lower-cased flag names, compared against request flags
    accepted_flags: BTreeSet<String>,
}

impl Signature {
    /// Compiles a signature from its textual form
    pub fn parse(text: &str) -> Result<Self, SignatureError> {
        let mut tokens = text.split_whitespace();
        let action = tokens.next().ok_or(SignatureError::Blank)?;

        let mut params = Vec::new();
        let mut flags: Vec<String> = Vec::new();

        for token in tokens {
            match Slot::classify(token) {
                Some(Slot::Param(name)) => params.push(name.to_string()),
                Some(Slot::Flag(name)) => {
                    if !flags.iter().any(|declared| declared == name) {
                        flags.push(name.to_string());
                    }
                }
                None => {
                    return Err(SignatureError::Grammar {
                        signature: text.to_string(),
                        token: token.to_string(),
                    })
                }
            }
        }

        tracing::trace!(signature = text, arity = params.len(), ?flags, "compiled signature");

        let accepted_flags = flags.iter().map(|flag| flag.to_lowercase()).collect();

        Ok(Self {
            action: action.to_string(),
            params,
            flags,
            accepted_flags,
        })
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    /// Names of the positional slots, left to right
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Declared optional flags, as spelled in the signature
    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    /// Number of positional parameters a matching request must carry
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Returns true if the request has this action, exactly as many params
    /// as there are slots, and only declared flags (case-insensitive)
    pub fn can_handle(&self, request: &Request) -> bool {
        self.action == request.action()
            && self.params.len() == request.params().len()
            && request.flags().is_subset(&self.accepted_flags)
    }

    /// Renders the canonical usage string
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.action)?;
        for param in &self.params {
            write!(f, " <{}>", param)?;
        }
        for flag in &self.flags {
            write!(f, " [--{}]", flag)?;
        }
        Ok(())
    }
}

impl FromStr for Signature {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn request(action: &str, params: &[&str], flags: &[&str]) -> Request {
        Request::new(
            action,
            params.iter().map(|p| p.to_string()),
            flags.iter().copied(),
        )
        .unwrap()
    }

    fn grammar_token(text: &str) -> String {
        match Signature::parse(text) {
            Err(SignatureError::Grammar { signature, token }) => {
                assert_eq!(signature, text);
                token
            }
            other => panic!("expected grammar error for '{}', got {:?}", text, other),
        }
    }

    #[test]
    fn parses_action_params_and_flags() {
        let sig = Signature::parse("demo <shape> <size> [--verbose] [--fill]").unwrap();

        assert_eq!(sig.action(), "demo");
        assert_eq!(sig.params(), &["shape".to_string(), "size".to_string()]);
        assert_eq!(sig.flags(), &["verbose".to_string(), "fill".to_string()]);
        assert_eq!(sig.arity(), 2);
    }

    #[test]
    fn blank_text_is_rejected() {
        assert_eq!(Signature::parse(""), Err(SignatureError::Blank));
        assert_eq!(Signature::parse("   \n"), Err(SignatureError::Blank));
    }

    #[test]
    fn malformed_tokens_are_named() {
        assert_eq!(grammar_token("demo <name"), "<name");
        assert_eq!(grammar_token("demo name>"), "name>");
        assert_eq!(grammar_token("demo <name> [verbose]"), "[verbose]");
        assert_eq!(grammar_token("demo [--name"), "[--name");
        assert_eq!(grammar_token("demo --name]"), "--name]");
        assert_eq!(grammar_token("demo <>"), "<>");
        assert_eq!(grammar_token("demo [--]"), "[--]");
        assert_eq!(grammar_token("demo shape"), "shape");
    }

    #[test]
    fn first_bad_token_wins() {
        assert_eq!(grammar_token("demo <ok> bad [--worse"), "bad");
    }

    #[test]
    fn matches_exact_arity() {
        let sig = Signature::parse("demo <name>").unwrap();

        assert!(sig.can_handle(&request("demo", &["circle"], &[])));
        assert!(!sig.can_handle(&request("demo", &[], &[])));
        assert!(!sig.can_handle(&request("demo", &["circle", "extra"], &[])));
    }

    #[test]
    fn rejects_undeclared_flags() {
        let sig = Signature::parse("demo <name>").unwrap();
        assert!(!sig.can_handle(&request("demo", &["circle"], &["verbose"])));
    }

    #[test]
    fn declared_flags_are_optional() {
        let sig = Signature::parse("demo <shape> [--verbose]").unwrap();

        assert!(sig.can_handle(&request("demo", &["circle"], &[])));
        assert!(sig.can_handle(&request("demo", &["circle"], &["verbose"])));
        assert!(sig.can_handle(&request("demo", &["circle"], &["VERBOSE"])));
        assert!(!sig.can_handle(&request("demo", &["circle"], &["loud"])));
        assert!(!sig.can_handle(&request("demo", &[], &["verbose"])));
    }

    #[test]
    fn action_match_is_case_sensitive() {
        let sig = Signature::parse("demo").unwrap();

        assert!(sig.can_handle(&request("demo", &[], &[])));
        assert!(!sig.can_handle(&request("Demo", &[], &[])));
        assert!(!sig.can_handle(&request("shapes", &[], &[])));
    }

    #[test]
    fn renders_canonical_form() {
        let sig: Signature = "demo\t<shape>   [--verbose]".parse().unwrap();
        assert_eq!(sig.render(), "demo <shape> [--verbose]");
        assert_eq!(sig.to_string(), sig.render());
    }

    #[test]
    fn flag_spelling_is_kept_but_matched_case_insensitively() {
        let sig = Signature::parse("demo <shape> [--Verbose] [--Verbose]").unwrap();

        assert_eq!(sig.flags(), &["Verbose".to_string()]);
        assert_eq!(sig.render(), "demo <shape> [--Verbose]");
        assert!(sig.can_handle(&request("demo", &["circle"], &["verbose"])));
        assert!(sig.can_handle(&request("demo", &["circle"], &["VERBOSE"])));
        assert!(!sig.can_handle(&request("demo", &["circle"], &["fill"])));
    }

    #[test]
    fn mixed_case_signature_round_trips() {
        let text = "demo <shape> [--Verbose] [--fillColor]";
        assert_eq!(Signature::parse(text).unwrap().render(), text);
    }

    proptest! {
        #[test]
        fn canonical_text_round_trips(
            action in "[a-z][a-z0-9_]{0,7}",
            params in prop::collection::vec("[a-z][a-z0-9_]{0,7}", 0..4),
            flags in prop::collection::btree_set("[a-zA-Z][a-zA-Z0-9-]{0,7}", 0..4),
        ) {
            let mut text = action;
            for param in &params {
                text.push_str(&format!(" <{}>", param));
            }
            for flag in &flags {
                text.push_str(&format!(" [--{}]", flag));
            }

            let sig = Signature::parse(&text).unwrap();
            prop_assert_eq!(sig.render(), text);
        }
    }
}
