//! Incremental literal matcher
//!
//! The scanner never tokenizes. It feeds characters one at a time into a
//! [`Matcher`] that tracks how much of a fixed literal has been seen so far.
//! Characters accepted by the skip predicate are ignored entirely, which is
//! how `// !serialize` and `st ruct` still match.

/// Recovery strategy after a character fails to extend a partial match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// Fall back along the failure table and re-test the character, so an
    /// overlapping attempt (`///!serialize`) is still found
    #[default]
    Fallback,
    /// Drop the partial match without re-testing the character
    Restart,
}

/// Result of feeding one character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Ignored by the skip predicate
    Skipped,
    /// Extended the partial match
    Extended,
    /// Finished the literal; the matcher is reset
    Complete,
    /// Did not extend the partial match
    Broken,
}

#[derive(Debug, Clone)]
pub struct Matcher {
    pattern: Vec<char>,
    /// `failure[i]` is the length of the longest proper prefix of
    /// `pattern[..=i]` that is also its suffix
    failure: Vec<usize>,
    skip: fn(char) -> bool,
    policy: MatchPolicy,
    matched: usize,
}

impl Matcher {
    pub fn new(pattern: &str, skip: fn(char) -> bool, policy: MatchPolicy) -> Self {
        let pattern: Vec<char> = pattern.chars().collect();
        let failure = failure_table(&pattern);
        Matcher {
            pattern,
            failure,
            skip,
            policy,
            matched: 0,
        }
    }

    /// Number of pattern characters matched so far
    pub fn matched(&self) -> usize {
        self.matched
    }

    pub fn reset(&mut self) {
        self.matched = 0;
    }

    pub fn feed(&mut self, c: char) -> Progress {
        if (self.skip)(c) {
            return Progress::Skipped;
        }

        if self.pattern.get(self.matched) == Some(&c) {
            self.matched += 1;
            if self.matched == self.pattern.len() {
                self.matched = 0;
                return Progress::Complete;
            }
            return Progress::Extended;
        }

        self.matched = match self.policy {
            MatchPolicy::Restart => 0,
            MatchPolicy::Fallback => self.fall_back(c),
        };
        Progress::Broken
    }

    fn fall_back(&self, c: char) -> usize {
        let mut k = self.matched;
        while k > 0 && self.pattern[k] != c {
            k = self.failure[k - 1];
        }
        // k < matched < len here, so re-extending can never complete
        if self.pattern[k] == c {
            k + 1
        } else {
            0
        }
    }
}

fn failure_table(pattern: &[char]) -> Vec<usize> {
    let mut table = vec![0; pattern.len()];
    let mut k = 0;
    for i in 1..pattern.len() {
        while k > 0 && pattern[i] != pattern[k] {
            k = table[k - 1];
        }
        if pattern[i] == pattern[k] {
            k += 1;
        }
        table[i] = k;
    }
    table
}

/// Skip predicate for the marker line: horizontal whitespace only, so the
/// newline ending the marker still has to match
pub fn is_inline_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r')
}

pub fn is_any_space(c: char) -> bool {
    c.is_whitespace()
}
