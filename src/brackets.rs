//! Loop bracket resolution.
//!
//! Matching is done by a linear balance-counting scan from the bracket that
//! triggered the jump. Nothing is validated up front: an unbalanced program
//! only fails when execution actually reaches a jump whose scan runs off the
//! program. [`JumpCache`] memoizes successful scans without changing that.

use crate::error::{EngineError, UnmatchedBracketKind};

/// Scan direction: forward from a `[`, backward from a `]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// (nesting token, target token) for this direction.
    fn tokens(self) -> (char, char) {
        match self {
            Direction::Forward => ('[', ']'),
            Direction::Backward => (']', '['),
        }
    }

    fn step(self, index: usize) -> Option<usize> {
        match self {
            Direction::Forward => index.checked_add(1),
            Direction::Backward => index.checked_sub(1),
        }
    }

    fn unmatched_kind(self) -> UnmatchedBracketKind {
        match self {
            Direction::Forward => UnmatchedBracketKind::Open,
            Direction::Backward => UnmatchedBracketKind::Close,
        }
    }
}

/// Find the bracket matching the one at `start`.
///
/// The balance counter starts at 1, goes up on every nested bracket of the
/// same kind as `start` and down on every counterpart; the index where it
/// reaches zero is returned.
pub fn find_match(program: &[char], start: usize, direction: Direction) -> Result<usize, EngineError> {
    let (nested, target) = direction.tokens();
    let mut balance: usize = 1;
    let mut cursor = start;

    while let Some(next) = direction.step(cursor) {
        let Some(&ch) = program.get(next) else { break };
        cursor = next;
        if ch == nested {
            balance += 1;
        } else if ch == target {
            balance -= 1;
            if balance == 0 {
                return Ok(cursor);
            }
        }
    }

    Err(EngineError::UnmatchedBracket {
        ip: start,
        kind: direction.unmatched_kind(),
    })
}

/// Lazily filled bracket table.
///
/// `targets[i]` holds the partner of the bracket at `i` once either side of
/// the pair has been scanned.
#[derive(Debug, Clone)]
pub struct JumpCache {
    targets: Vec<Option<usize>>,
}

impl JumpCache {
    pub fn new(program_len: usize) -> Self {
        Self { targets: vec![None; program_len] }
    }

    pub fn resolve(&mut self, program: &[char], start: usize, direction: Direction) -> Result<usize, EngineError> {
        if let Some(Some(hit)) = self.targets.get(start) {
            return Ok(*hit);
        }
        let partner = find_match(program, start, direction)?;
        self.targets[start] = Some(partner);
        self.targets[partner] = Some(start);
        Ok(partner)
    }

    /// Number of bracket positions resolved so far.
    #[cfg(test)]
    fn resolved(&self) -> usize {
        self.targets.iter().filter(|t| t.is_some()).count()
    }
}
