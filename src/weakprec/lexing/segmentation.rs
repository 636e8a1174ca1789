//! Line segmentation
//!
//!     Splits one source line into fragments in three passes: string literals, whitespace,
//!     operators. Every pass keeps the unmatched text before, between and after its matches,
//!     so `segment(line)` concatenated is always `line`.

use super::patterns::{OPERATOR_REGEX, STRING_LITERAL_REGEX, WHITESPACE_REGEX};
use regex::Regex;

/// What a fragment is, as far as segmentation can tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    StringLiteral,
    Whitespace,
    Operator,
    /// Anything between operators: identifiers, numbers, reserved words, or junk
    Word,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment<'a> {
    pub text: &'a str,
    pub kind: FragmentKind,
}

impl<'a> Fragment<'a> {
    fn new(text: &'a str, kind: FragmentKind) -> Self {
        Fragment { text, kind }
    }

    /// Length in characters, the unit columns are counted in.
    pub fn width(&self) -> usize {
        self.text.chars().count()
    }
}

/// Split `input` around every match of `regex`, keeping the gaps.
/// Each piece is paired with whether it was a match.
fn split_keeping_gaps<'a>(input: &'a str, regex: &Regex) -> Vec<(&'a str, bool)> {
    let mut pieces = Vec::new();
    let mut cursor = 0;

    for found in regex.find_iter(input) {
        if found.start() > cursor {
            pieces.push((&input[cursor..found.start()], false));
        }
        pieces.push((found.as_str(), true));
        cursor = found.end();
    }

    if cursor < input.len() {
        pieces.push((&input[cursor..], false));
    }

    pieces
}

/// Segment one line into fragments.
pub fn segment(line: &str) -> Vec<Fragment<'_>> {
    let mut fragments = Vec::new();

    for (piece, is_literal) in split_keeping_gaps(line, &STRING_LITERAL_REGEX) {
        if is_literal {
            fragments.push(Fragment::new(piece, FragmentKind::StringLiteral));
            continue;
        }

        for (piece, is_whitespace) in split_keeping_gaps(piece, &WHITESPACE_REGEX) {
            if is_whitespace {
                fragments.push(Fragment::new(piece, FragmentKind::Whitespace));
                continue;
            }

            for (piece, is_operator) in split_keeping_gaps(piece, &OPERATOR_REGEX) {
                let kind = if is_operator {
                    FragmentKind::Operator
                } else {
                    FragmentKind::Word
                };
                fragments.push(Fragment::new(piece, kind));
            }
        }
    }

    fragments
}
