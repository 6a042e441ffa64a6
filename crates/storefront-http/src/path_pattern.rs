//! Ant-style path pattern matching for the tenant guard exclusion
//! list.
//!
//! Supported syntax, matched segment by segment:
//! - `*`  matches exactly one path segment
//! - `**` matches zero or more path segments
//! - any other segment matches literally
//!
//! `/swagger-ui/**` therefore matches `/swagger-ui`,
//! `/swagger-ui/index.html`, and `/swagger-ui/a/b/c`.

/// Returns true if `path` matches the Ant-style `pattern`.
pub fn matches(pattern: &str, path: &str) -> bool {
    let pattern_segs: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let path_segs: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    match_segments(&pattern_segs, &path_segs)
}

fn match_segments(pattern: &[&str], path: &[&str]) -> bool {
    match pattern.first() {
        None => path.is_empty(),
        Some(&"**") => {
            // `**` absorbs zero or more segments; try every split.
            (0..=path.len()).any(|skip| match_segments(&pattern[1..], &path[skip..]))
        }
        Some(&"*") => !path.is_empty() && match_segments(&pattern[1..], &path[1..]),
        Some(literal) => {
            path.first() == Some(literal) && match_segments(&pattern[1..], &path[1..])
        }
    }
}

/// Strip a deployment context-path prefix before matching, mirroring
/// what the exclusion check does with proxied deployments.
pub fn strip_context_path<'a>(path: &'a str, context_path: &str) -> &'a str {
    if !context_path.is_empty() && context_path != "/" {
        if let Some(stripped) = path.strip_prefix(context_path) {
            if stripped.is_empty() {
                return "/";
            }
            return stripped;
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_paths() {
        assert!(matches("/health", "/health"));
        assert!(!matches("/health", "/healthz"));
        assert!(!matches("/health", "/health/live"));
    }

    #[test]
    fn single_star_matches_one_segment() {
        assert!(matches("/api/*/brands", "/api/v1/brands"));
        assert!(!matches("/api/*/brands", "/api/brands"));
        assert!(!matches("/api/*/brands", "/api/v1/x/brands"));
    }

    #[test]
    fn double_star_matches_any_depth() {
        assert!(matches("/swagger-ui/**", "/swagger-ui"));
        assert!(matches("/swagger-ui/**", "/swagger-ui/index.html"));
        assert!(matches("/swagger-ui/**", "/swagger-ui/a/b/c"));
        assert!(!matches("/swagger-ui/**", "/swagger"));
        assert!(matches("/v3/api-docs/**", "/v3/api-docs"));
        assert!(matches("/webjars/**", "/webjars/springfox/ui.js"));
    }

    #[test]
    fn double_star_in_the_middle() {
        assert!(matches("/public/**/download", "/public/download"));
        assert!(matches("/public/**/download", "/public/files/2024/download"));
        assert!(!matches("/public/**/download", "/public/files/upload"));
    }

    #[test]
    fn context_path_is_stripped() {
        assert_eq!(strip_context_path("/catalog/health", "/catalog"), "/health");
        assert_eq!(strip_context_path("/health", "/catalog"), "/health");
        assert_eq!(strip_context_path("/catalog", "/catalog"), "/");
        assert_eq!(strip_context_path("/health", ""), "/health");
    }
}
