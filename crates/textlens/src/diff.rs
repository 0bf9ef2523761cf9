// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Utilities for diffing values in render functions.

/// Types that can be compared against a memoized copy of what was last
/// rendered to the DOM.
pub trait Diff: Copy {
    /// Owned value kept in the product between renders.
    type Memo: 'static;

    fn into_memo(self) -> Self::Memo;

    /// Compare against the memo, updating it on change. Returns `true` if the
    /// DOM needs to be updated.
    fn diff(self, memo: &mut Self::Memo) -> bool;
}

impl Diff for &str {
    type Memo = String;

    fn into_memo(self) -> String {
        self.into()
    }

    fn diff(self, memo: &mut String) -> bool {
        if *memo != self {
            memo.clear();
            memo.push_str(self);
            true
        } else {
            false
        }
    }
}

impl Diff for usize {
    type Memo = usize;

    fn into_memo(self) -> usize {
        self
    }

    fn diff(self, memo: &mut usize) -> bool {
        if *memo != self {
            *memo = self;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn str_diff_tracks_changes() {
        let mut memo = "hello".into_memo();

        assert!(!"hello".diff(&mut memo));
        assert!("hello!".diff(&mut memo));
        assert_eq!(memo, "hello!");
        assert!(!"hello!".diff(&mut memo));
        assert!("".diff(&mut memo));
        assert_eq!(memo, "");
    }

    #[test]
    fn usize_diff_tracks_changes() {
        let mut memo = 5_usize.into_memo();

        assert!(!5_usize.diff(&mut memo));
        assert!(8_usize.diff(&mut memo));
        assert_eq!(memo, 8);
    }

    #[test]
    fn same_length_different_text() {
        let mut text = "abc".into_memo();
        let mut len = 3_usize.into_memo();

        assert!("xyz".diff(&mut text));
        assert!(!3_usize.diff(&mut len));
    }
}
