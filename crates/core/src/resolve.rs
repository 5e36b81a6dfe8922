//! Mapping user-supplied tokens onto the current run order.

use crate::catalog::PROMPT_SUFFIX;

/// Resolves `token` against `run_order`, best-effort.
///
/// Rules, first match wins:
///
/// 1. A token of decimal digits is a 1-based position. Out of range (zero
///    included) is a miss; numeric tokens never fall through to name
///    matching.
/// 2. Exact match on the full identifier, the identifier with the prompt
///    suffix appended, or any identifier whose final segment equals the
///    token plus suffix.
/// 3. First identifier (in run-order position) containing the token as a
///    substring.
///
/// Ambiguity in rule 3 is resolved solely by run-order position; callers
/// must treat this as fuzzy, not guaranteed-unique.
#[must_use]
pub fn resolve_prompt<'a>(token: &str, run_order: &'a [String]) -> Option<&'a str> {
    if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
        let index = token.parse::<usize>().ok()?;
        if index == 0 || index > run_order.len() {
            return None;
        }
        return Some(&run_order[index - 1]);
    }

    let with_suffix = format!("{token}{PROMPT_SUFFIX}");
    let as_segment = format!("/{with_suffix}");
    let exact = run_order.iter().find(|id| {
        id.as_str() == token || id.as_str() == with_suffix || id.ends_with(&as_segment)
    });
    if let Some(exact) = exact {
        return Some(exact);
    }

    run_order
        .iter()
        .find(|id| id.contains(token))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_order() -> Vec<String> {
        [
            "core/security/code-analysis.txt",
            "core/security/data-integrity.txt",
            "web/frontend/nextjs/render.txt",
            "custom/my-check.txt",
        ]
        .iter()
        .map(ToString::to_string)
        .collect()
    }

    #[test]
    fn test_numeric_token_is_one_based() {
        let order = run_order();
        assert_eq!(
            resolve_prompt("1", &order),
            Some("core/security/code-analysis.txt")
        );
        assert_eq!(resolve_prompt("4", &order), Some("custom/my-check.txt"));
    }

    #[test]
    fn test_numeric_token_out_of_range() {
        let order = run_order();
        assert_eq!(resolve_prompt("0", &order), None);
        assert_eq!(resolve_prompt("5", &order), None);
        assert_eq!(resolve_prompt("99999999999999999999999999", &order), None);
    }

    #[test]
    fn test_numeric_token_never_falls_through() {
        // `7` is a substring of nothing here, but even if it were, a numeric
        // token past the end must miss rather than fuzzy-match.
        let order: Vec<String> = vec!["core/security/rule-7.txt".to_string()];
        assert_eq!(resolve_prompt("7", &order), None);
    }

    #[test]
    fn test_exact_full_identifier() {
        let order = run_order();
        assert_eq!(
            resolve_prompt("core/security/code-analysis.txt", &order),
            Some("core/security/code-analysis.txt")
        );
    }

    #[test]
    fn test_exact_without_suffix() {
        let order = run_order();
        assert_eq!(
            resolve_prompt("core/security/code-analysis", &order),
            Some("core/security/code-analysis.txt")
        );
    }

    #[test]
    fn test_final_segment_match() {
        let order = run_order();
        assert_eq!(
            resolve_prompt("code-analysis", &order),
            Some("core/security/code-analysis.txt")
        );
        assert_eq!(resolve_prompt("render", &order), Some("web/frontend/nextjs/render.txt"));
    }

    #[test]
    fn test_substring_first_wins() {
        let order = run_order();
        // Both security prompts contain "security"; run-order position decides.
        assert_eq!(
            resolve_prompt("security", &order),
            Some("core/security/code-analysis.txt")
        );
        assert_eq!(resolve_prompt("integrity", &order), Some("core/security/data-integrity.txt"));
    }

    #[test]
    fn test_not_found() {
        let order = run_order();
        assert_eq!(resolve_prompt("does-not-exist", &order), None);
        assert_eq!(resolve_prompt("1", &[]), None);
    }
}
