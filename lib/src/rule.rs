//! The rule of Conway's Game of Life.
//!
//! Only the classic rule `B3/S23` is supported. For the notations of rule
//! strings, please see
//! [this article on LifeWiki](https://conwaylife.com/wiki/Rulestring).

use ca_rules::ParseLife;

/// The rule string written into RLE headers.
pub const RULE_STRING: &str = "B3/S23";

/// The state of a cell in the next generation, given its current state and
/// the number of its living neighbors.
///
/// * A living cell with fewer than 2 or more than 3 living neighbors dies.
/// * A living cell with 2 or 3 living neighbors stays alive.
/// * A dead cell with exactly 3 living neighbors becomes alive.
/// * Any other dead cell stays dead.
#[inline]
pub const fn successor(alive: bool, live_neighbors: usize) -> bool {
    matches!((alive, live_neighbors), (true, 2) | (true, 3) | (false, 3))
}

/// A totalistic Life-like rule, as parsed from a rule string.
#[derive(Clone, Debug, PartialEq, Eq)]
struct LifeLike {
    b: Vec<u8>,
    s: Vec<u8>,
}

/// A parser for the rule.
impl ParseLife for LifeLike {
    fn from_bs(mut b: Vec<u8>, mut s: Vec<u8>) -> Self {
        b.sort_unstable();
        b.dedup();
        s.sort_unstable();
        s.dedup();
        Self { b, s }
    }
}

/// Whether the rule string describes `B3/S23`, in any notation
/// the parser understands.
pub fn is_classic(rule_string: &str) -> bool {
    LifeLike::parse_rule(rule_string.trim())
        .map(|rule| rule.b == [3] && rule.s == [2, 3])
        .unwrap_or(false)
}
