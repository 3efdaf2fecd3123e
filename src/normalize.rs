// 🔢 Code Normalizer
//
// Branch codes show up as "000123", "123" or 123 depending on who wrote the
// dataset. Numeric fragments collapse to their canonical decimal form so
// dataset entries and query inputs compare equal.

use std::borrow::Cow;

/// Canonicalize a branch/suffix fragment.
///
/// Fragments that parse as a base-10 `i32` come back in canonical decimal
/// form ("007" → "7", "+12" → "12"). Everything else, including the empty
/// string, is returned unchanged.
pub fn normalize_code(fragment: &str) -> Cow<'_, str> {
    match fragment.parse::<i32>() {
        Ok(value) => {
            let canonical = value.to_string();
            if canonical == fragment {
                Cow::Borrowed(fragment)
            } else {
                Cow::Owned(canonical)
            }
        }
        Err(_) => Cow::Borrowed(fragment),
    }
}

// ============================================================================
// TESTS
// ============================================================================
