//! Line tokenizer for foamFile records.
//!
//! Finds every number on a line: signed integers, decimals and
//! exponent notation (`10`, `-3.5`, `.25`, `1e-3`, `+2.0E+04`).
//! Anything else on the line (parentheses, words) is ignored.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::IoError;

/// Comment marker. Comments are allowed only at the start of a line.
const COMMENT: &str = "//";

fn number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?").expect("number regex is valid")
    })
}

/// True if the line is a comment.
pub fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with(COMMENT)
}

/// Extract all numbers on a line, in order.
///
/// `line_no` is only used for error reporting. Values that overflow to
/// infinity are rejected.
pub fn numbers(line: &str, line_no: usize) -> Result<Vec<f64>, IoError> {
    number_regex()
        .find_iter(line)
        .map(|m| {
            let token = m.as_str();
            let value = token
                .parse::<f64>()
                .map_err(|e| IoError::parse(line_no, format!("bad number '{token}': {e}")))?;
            if !value.is_finite() {
                return Err(IoError::parse(line_no, format!("non-finite number '{token}'")));
            }
            Ok(value)
        })
        .collect()
}
