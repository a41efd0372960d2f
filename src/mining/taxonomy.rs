//! Bug-type taxonomy classification
//!
//! Maps free text (commit message plus resolved linked-issue text) to a
//! set of memory/logic defect categories using layered multi-pattern
//! matching. Per category the patterns run in listed order and the first
//! hit records the category; categories are evaluated independently and
//! are not mutually exclusive.
//!
//! The bounded-distance idiom `word(?:\W+\w+){0,5}\W+word` approximates
//! "these two concept-words occur within five intervening tokens of each
//! other": tolerant of natural-language variation, while words far apart
//! in unrelated sentences stay unmatched.

use crate::models::BugCategory;
use regex::{Regex, RegexBuilder};
use std::sync::OnceLock;

type PatternTable = &'static [(BugCategory, &'static [&'static str])];

const PATTERNS: PatternTable = &[
    (
        BugCategory::NullPointerDereference,
        &[
            r"\bnull[- ]pointer[- ]dereference\b",
            r"\bnull(?:\W+\w+){0,5}\W*(?:pointer|dereference|ptr)\b",
            r"\b(?:pointer|dereference|ptr)(?:\W+\w+){0,5}\W*null\b",
            r"\bsegfault\b(?:\W+\w+){0,10}\bnull\b",
            r"\bnil(?:\W+\w+){0,3}\W*pointer\b",
            r"\bSIGSEGV\b",
        ],
    ),
    (
        BugCategory::Overflow,
        &[
            // Out-of-bound writes
            r"buffer[- ]overflow",
            r"\b(?:global|stack|heap|buffer|stack|heap)(?:\W+\w+){0,5}\W+overflow\b",
            r"\b(?:invalid|illegal)(?:\W+\w+){0,5}\W+write",
            r"\b(?:buffer|array|memory)(?:\W+\w+){0,5}\W+overrun\b",
            r"\binvalid(?:\W+\w+){0,5}\W+address\b",
            r"\bexceed(?:s|ing)?(?:\W+\w+){0,5}\W+allocated(?:\W+\w+){0,5}\W+memory\b",
            r"\boverflow(?:\W+\w+){0,5}\W+in(?:\W+\w+){0,5}\W+write",
            r"\bindex(?:\W+\w+){0,5}\W+-\d+\b",
            // Out-of-bound reads
            r"\b(?:invalid|illegal)(?:\W+\w+){0,5}\W+(?:read|access)",
            r"\baccess(?:\W+\w+){0,5}\W+violation(?:\W+\w+){0,5}\W+reading\b",
            r"\buninitialized(?:\W+\w+){0,5}\W+memory(?:\W+\w+)\b",
            r"\b(?:stack|heap)(?:\W+\w+){0,5}\W+corruption\b",
            r"\binvalid(?:\W+\w+){0,5}\W+free",
            // "To make sure the valid buffer be accessed only."
            r"\b(?:as|en|in)?sure(?:\W+\w+){0,5}\W+(?:valid|legal)(?:\W+\w+){0,5}\W+(?:access|read|write)",
        ],
    ),
    (
        BugCategory::IntegerOverflow,
        &[
            r"integer[- ]overflow",
            r"integer[- ]underflow",
            r"\barithmetic(?:\W+\w+){0,5}\W+error\b",
            r"\bwrap(?:\W+\w+){0,5}\W+around\b",
            r"\binteger(?:\W+\w+){0,5}\W+overflow\b",
            r"\binteger(?:\W+\w+){0,5}\W+underflow\b",
        ],
    ),
    (
        BugCategory::UseAfterFree,
        &[
            r"use[- ]after[- ]free",
            r"\bUAF\b",
            r"\b(?:access|use|dereference)(?:\W+\w+){0,5}\W+(?:freed|deleted|released)(?:\W+\w+){0,5}\W+memory\b",
            r"\b(?:pointer|ptr)(?:\W+\w+){0,5}\W+to(?:\W+\w+){0,5}\W+freed(?:\W+\w+){0,5}\W+object",
            r"\bdangling(?:\W+\w+){0,5}\W+pointer\b",
            r"\bdangling(?:\W+\w+){0,5}\W+reference\b",
        ],
    ),
    (
        BugCategory::MemoryLeak,
        &[
            r"memory[- ]leak",
            r"\b(?:memory|resource)(?:\W+\w+){0,5}\W+leak(?:s|ed)?\b",
            // "Direct leak of 7 byte(s) in 1 object(s) allocated from:"
            r"\bdirect(?:\W+\w+){0,5}\W+leak(?:s|ed)?\b",
            r"\ballocated(?:\W+\w+){0,5}\W+memory(?:\W+\w+){0,5}\W+not(?:\W+\w+){0,5}\W+freed\b",
            r"\b(?:unreleased|unfreed)(?:\W+\w+){0,5}\W+(?:memory|blocks)\b",
            r"\bleak(?:s|ed)?(?:\W+\w+){0,5}\W+\d+(?:\W+\w+){0,5}\W+bytes\b",
            r"\bno(?:\W+\w+){0,5}\W+free(?:\W+\w+){0,5}\W+for(?:\W+\w+){0,5}\W+alloc",
        ],
    ),
    (
        BugCategory::DoubleFree,
        &[
            r"\bdouble[- ]free\b",
            r"\bmultiple(?:\W+\w+){0,5}\W+free\b",
            r"\bfree(?:\W+\w+){0,5}\W+non-allocated(?:\W+\w+){0,5}\W+memory\b",
            r"\bcorrupted(?:\W+\w+){0,5}\W+double-linked(?:\W+\w+){0,5}\W+list\b",
        ],
    ),
    (
        BugCategory::DivideByZero,
        &[
            r"\bdivide[d]?(?:\W+\w+){0,5}\W+by(?:\W+\w+){0,5}\W+(?:zero|0)\b",
            r"\bdivision(?:\W+\w+){0,5}\W+by(?:\W+\w+){0,5}\W+(?:zero|0)\b",
            r"\bmodulo(?:\W+\w+){0,5}\W+by(?:\W+\w+){0,5}\W+zero\b",
        ],
    ),
    (
        // Sanitizer reports are a strong memory-bug indicator even when
        // the message names no specific defect
        BugCategory::AddressSanitizerReport,
        &[
            r"\baddresssanitizer\b",
            r"\basan:\s",
            r"==\d+==.*addresssanitizer",
            r"\bubsan\b",
            r"\btsan\b",
        ],
    ),
    (
        BugCategory::GenericMemoryError,
        &[
            r"\binvalid(?:\W+\w+){0,5}\W+(?:memory(?:\W+\w+){0,5})?access\b",
            r"\baccess(?:\W+\w+){0,5}\W+violation\b",
        ],
    ),
];

static COMPILED: OnceLock<Vec<(BugCategory, Vec<Regex>)>> = OnceLock::new();

fn compiled() -> &'static [(BugCategory, Vec<Regex>)] {
    COMPILED.get_or_init(|| {
        PATTERNS
            .iter()
            .map(|(category, patterns)| {
                let regexes = patterns
                    .iter()
                    .map(|pattern| {
                        RegexBuilder::new(pattern)
                            .case_insensitive(true)
                            .build()
                            .unwrap()
                    })
                    .collect();
                (*category, regexes)
            })
            .collect()
    })
}

/// Return the matched bug categories for a commit message or bug report,
/// in taxonomy declaration order.
///
/// Pure function of the text: identical input always yields the
/// identical set, and category evaluation order does not affect the
/// result (categories are independent).
pub fn classify_bug_types(text: &str) -> Vec<BugCategory> {
    let lower = text.to_lowercase();
    let mut matched = Vec::new();
    for (category, patterns) in compiled() {
        for pattern in patterns {
            if pattern.is_match(&lower) {
                // One label per category; other categories still run
                matched.push(*category);
                break;
            }
        }
    }
    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_pointer_dereference() {
        assert_eq!(
            classify_bug_types("fix null pointer dereference in parser"),
            vec![BugCategory::NullPointerDereference]
        );
    }

    #[test]
    fn test_sigsegv_is_case_insensitive() {
        // Text is lower-cased before matching, so the upper-case pattern
        // must still hit
        assert_eq!(
            classify_bug_types("crash with SIGSEGV in free_buffers"),
            vec![BugCategory::NullPointerDereference]
        );
    }

    #[test]
    fn test_heap_overflow() {
        assert_eq!(
            classify_bug_types("heap overflow when decoding header"),
            vec![BugCategory::Overflow]
        );
    }

    #[test]
    fn test_integer_overflow_does_not_also_match_overflow() {
        assert_eq!(
            classify_bug_types("guard against integer overflow in size computation"),
            vec![BugCategory::IntegerOverflow]
        );
    }

    #[test]
    fn test_divided_by_zero() {
        assert_eq!(
            classify_bug_types("avoid being divided by zero in rate calc"),
            vec![BugCategory::DivideByZero]
        );
    }

    #[test]
    fn test_multiple_categories_in_declaration_order() {
        let matched = classify_bug_types("use after free leads to a memory leak on shutdown");
        assert_eq!(
            matched,
            vec![BugCategory::UseAfterFree, BugCategory::MemoryLeak]
        );
    }

    #[test]
    fn test_sanitizer_report() {
        let matched = classify_bug_types("asan: heap-use-after-free in tok_free");
        assert_eq!(
            matched,
            vec![
                BugCategory::UseAfterFree,
                BugCategory::AddressSanitizerReport
            ]
        );
    }

    #[test]
    fn test_dangling_pointer() {
        assert_eq!(
            classify_bug_types("do not keep a dangling pointer into the pool"),
            vec![BugCategory::UseAfterFree]
        );
    }

    #[test]
    fn test_no_match_yields_empty_set() {
        assert!(classify_bug_types("refactor variable names").is_empty());
        assert!(classify_bug_types("").is_empty());
    }

    #[test]
    fn test_deterministic() {
        let text = "double free of the ring buffer, reported by AddressSanitizer";
        let first = classify_bug_types(text);
        let second = classify_bug_types(text);
        assert_eq!(first, second);
        assert_eq!(
            first,
            vec![
                BugCategory::DoubleFree,
                BugCategory::AddressSanitizerReport
            ]
        );
    }

    #[test]
    fn test_order_independent_across_categories() {
        // Evaluating categories in reverse must select the same set;
        // declaration order only fixes the output ordering.
        let text = "memory leak and use after free in the decoder";
        let forward = classify_bug_types(text);

        let mut reverse: Vec<BugCategory> = Vec::new();
        for (category, patterns) in compiled().iter().rev() {
            if patterns.iter().any(|p| p.is_match(&text.to_lowercase())) {
                reverse.push(*category);
            }
        }
        reverse.reverse();
        assert_eq!(forward, reverse);
    }

    #[test]
    fn test_scenario_combined_text() {
        let combined = "Fixed null pointer dereference, regression by abc1234\nfix segfault on null check";
        assert_eq!(
            classify_bug_types(combined),
            vec![BugCategory::NullPointerDereference]
        );
    }
}
