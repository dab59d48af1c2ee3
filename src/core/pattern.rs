//! Wildcard matching for file names
//!
//! Supported syntax:
//!
//! - `*` matches zero or more characters
//! - `?` matches exactly one character
//! - `;` separates alternatives, e.g. `*.png;*.jpg`
//!
//! Everything else is literal. Malformed patterns simply fail to match.

/// Match `candidate` against a `;`-separated list of wildcard patterns.
///
/// An empty candidate or an empty pattern never matches, and neither does an
/// empty alternative such as the middle of `a;;b`. With `ignore_case`, ASCII
/// letters compare case-insensitively.
///
/// # Examples
///
/// ```
/// use rust_daily_logger::pattern_match;
///
/// assert!(pattern_match("abcdefg.png", "*.png", false));
/// assert!(!pattern_match("abcdefg.pnga", "*.png", false));
/// assert!(pattern_match("abcdefg.png", "a?cdefg.png", false));
/// assert!(pattern_match("FILE.TXT", "*.txt", true));
/// assert!(pattern_match("photo.jpg", "*.png;*.jpg", false));
/// ```
pub fn pattern_match(candidate: &str, pattern: &str, ignore_case: bool) -> bool {
    if candidate.is_empty() || pattern.is_empty() {
        return false;
    }

    let candidate: Vec<char> = candidate.chars().collect();
    pattern
        .split(';')
        .filter(|alternative| !alternative.is_empty())
        .any(|alternative| {
            let alternative: Vec<char> = alternative.chars().collect();
            match_alternative(&candidate, &alternative, ignore_case)
        })
}

fn match_alternative(candidate: &[char], pattern: &[char], ignore_case: bool) -> bool {
    if candidate.is_empty() || pattern.is_empty() {
        return false;
    }

    let (mut c, mut p) = (0, 0);
    // Position after the most recent star, and the candidate index it is retried from
    let mut resume: Option<(usize, usize)> = None;

    while c < candidate.len() {
        match pattern.get(p) {
            Some('*') => {
                p += 1;
                resume = Some((p, c));
            }
            Some(&expected)
                if expected == '?' || chars_equal(expected, candidate[c], ignore_case) =>
            {
                c += 1;
                p += 1;
            }
            _ => match resume {
                // let the last star absorb one more character and retry
                Some((after_star, from)) => {
                    p = after_star;
                    c = from + 1;
                    resume = Some((after_star, from + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&ch| ch == '*')
}

#[inline]
fn chars_equal(a: char, b: char, ignore_case: bool) -> bool {
    if ignore_case {
        a.eq_ignore_ascii_case(&b)
    } else {
        a == b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_star() {
        assert!(pattern_match("abcdefg.png", "*.png", false));
        assert!(!pattern_match("abcdefg.pnga", "*.png", false));
        assert!(!pattern_match("abcdefg.pn", "*.png", false));
    }

    #[test]
    fn test_question_mark() {
        assert!(pattern_match("abcdefg.png", "a?cdefg.png", false));
        assert!(!pattern_match("acdefg.png", "a?cdefg.png", false));
        assert!(pattern_match("ab", "??", false));
        assert!(!pattern_match("abc", "??", false));
    }

    #[test]
    fn test_ignore_case() {
        assert!(pattern_match("FILE.TXT", "*.txt", true));
        assert!(!pattern_match("FILE.TXT", "*.txt", false));
        assert!(pattern_match("azAZ", "AZaz", true));
    }

    #[test]
    fn test_alternatives() {
        assert!(pattern_match("a.png", "*.png;*.jpg", false));
        assert!(pattern_match("a.jpg", "*.png;*.jpg", false));
        assert!(!pattern_match("a.gif", "*.png;*.jpg", false));
        assert!(pattern_match("a.jpg", "*.png;;*.jpg;", false));
    }

    #[test]
    fn test_empty_inputs_never_match() {
        assert!(!pattern_match("", "*", false));
        assert!(!pattern_match("abc", "", false));
        assert!(!pattern_match("abc", ";", false));
    }

    #[test]
    fn test_trailing_stars() {
        assert!(pattern_match("abc", "abc*", false));
        assert!(pattern_match("abc", "abc***", false));
        assert!(pattern_match("abc", "*", false));
        assert!(!pattern_match("abc", "abc*d", false));
    }

    #[test]
    fn test_leftover_candidate() {
        assert!(!pattern_match("abcd", "abc", false));
        assert!(pattern_match("abcd", "a*", false));
        assert!(pattern_match("abcd", "*d", false));
    }

    #[test]
    fn test_inner_star_backtracks() {
        assert!(pattern_match("log-2024-01-01.txt", "log-*-01.txt", false));
        assert!(pattern_match("aXbXc", "a*b*c", false));
        assert!(!pattern_match("aXbXd", "a*b*c", false));
        assert!(pattern_match("ab", "*?", false));
    }

    #[test]
    fn test_many_stars_stay_fast() {
        let candidate = "a".repeat(200);
        assert!(!pattern_match(&candidate, "*a*a*a*a*a*a*a*a*a*a*b", false));
        assert!(pattern_match(&candidate, "*a*a*a*a*a*a*a*a*a*a*", false));
    }

    #[test]
    fn test_unicode_question_mark() {
        assert!(pattern_match("日誌.txt", "??.txt", false));
    }
}
