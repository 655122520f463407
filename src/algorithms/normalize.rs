//! Case and diacritic folding
//!
//! Both query and target strings are folded with the same options before
//! matching, so "Café" and "cafe" compare equal when both folds are enabled.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Which character distinctions to collapse before comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldOptions {
    /// Collapse case distinctions (`A` == `a`).
    pub case_insensitive: bool,
    /// Collapse diacritic distinctions (`é` == `e`) by NFKD-decomposing and
    /// dropping combining marks.
    pub diacritic_insensitive: bool,
}

impl Default for FoldOptions {
    fn default() -> Self {
        Self {
            case_insensitive: true,
            diacritic_insensitive: true,
        }
    }
}

impl FoldOptions {
    /// No folding at all; strings compare verbatim.
    pub fn none() -> Self {
        Self {
            case_insensitive: false,
            diacritic_insensitive: false,
        }
    }
}

/// Fold a string according to `options`.
///
/// Pure and idempotent: folding an already-folded string returns it
/// unchanged. Case folding runs before diacritic folding so that characters
/// whose lowercase form introduces a combining mark (e.g. `İ` -> `i` + dot)
/// are still stripped in the same pass.
///
/// Borrows the input when no folding is requested.
#[must_use]
pub fn fold(text: &str, options: FoldOptions) -> Cow<'_, str> {
    if !options.case_insensitive && !options.diacritic_insensitive {
        return Cow::Borrowed(text);
    }

    let cased = if options.case_insensitive {
        Cow::Owned(text.to_lowercase())
    } else {
        Cow::Borrowed(text)
    };

    if options.diacritic_insensitive {
        Cow::Owned(cased.nfkd().filter(|c| !is_combining_mark(*c)).collect())
    } else {
        cased
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_option_sets() -> [FoldOptions; 4] {
        [
            FoldOptions::none(),
            FoldOptions {
                case_insensitive: true,
                diacritic_insensitive: false,
            },
            FoldOptions {
                case_insensitive: false,
                diacritic_insensitive: true,
            },
            FoldOptions::default(),
        ]
    }

    #[test]
    fn case_folding() {
        let options = FoldOptions {
            case_insensitive: true,
            diacritic_insensitive: false,
        };
        assert_eq!(fold("Hello World", options), "hello world");
    }

    #[test]
    fn diacritic_folding() {
        let options = FoldOptions {
            case_insensitive: false,
            diacritic_insensitive: true,
        };
        assert_eq!(fold("caf\u{e9}", options), "cafe");
    }

    #[test]
    fn combined_folding() {
        assert_eq!(fold("\u{f6}\u{e7}p\u{e9}", FoldOptions::default()), "ocpe");
        assert_eq!(fold("CAF\u{c9}", FoldOptions::default()), "cafe");
    }

    #[test]
    fn none_is_a_passthrough() {
        let folded = fold("Caf\u{e9}", FoldOptions::none());
        assert!(matches!(folded, Cow::Borrowed(_)));
        assert_eq!(folded, "Caf\u{e9}");
    }

    #[test]
    fn fold_is_idempotent() {
        let samples = [
            "Hello World",
            "caf\u{e9}",
            "\u{f6}\u{e7}p\u{e9}",
            "\u{130}stanbul",
            "already folded",
            "",
        ];
        for options in all_option_sets() {
            for sample in samples {
                let once = fold(sample, options).into_owned();
                let twice = fold(&once, options).into_owned();
                assert_eq!(once, twice, "options={options:?} sample={sample:?}");
            }
        }
    }
}
