pub mod dns;
pub mod error;
pub mod https;
pub mod result;
pub mod retry;
pub mod runner;
pub mod tcp;

pub mod prelude {
    pub use super::error::{HttpFailure, ProbeError};
    pub use super::result::{ProbeLog, ProbeResult, ProbeTarget, ResolvedEndpoint, StepKind};
}

use std::fmt::Write;

/// Flattens an error and all of its `source()` causes into one line of text.
pub fn report(mut err: &(dyn std::error::Error + 'static)) -> String {
    let mut s = format!("{}", err);
    while let Some(src) = err.source() {
        let _ = write!(s, ": caused by: {}", src);
        err = src;
    }
    s
}

/// Cuts `input` down to at most `width` display columns and escapes control
/// characters, so raw response bytes stay on one log line.
pub fn excerpt(input: &str, width: usize) -> String {
    use unicode_truncate::UnicodeTruncateStr;

    let escaped: String = input.escape_debug().collect();
    let (truncated, _) = escaped.unicode_truncate(width);
    truncated.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Inner;

    impl std::fmt::Display for Inner {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "inner")
        }
    }

    impl std::error::Error for Inner {}

    #[derive(Debug)]
    struct Outer(Inner);

    impl std::fmt::Display for Outer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "outer")
        }
    }

    impl std::error::Error for Outer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_report_follows_sources() {
        assert_eq!(report(&Outer(Inner)), "outer: caused by: inner");
    }

    #[test]
    fn test_excerpt_truncates_and_escapes() {
        assert_eq!(excerpt("HTTP/1.1 400\r\n", 12), "HTTP/1.1 400");
        assert_eq!(excerpt("a\r\nb", 10), "a\\r\\nb");
        assert_eq!(excerpt("short", 80), "short");
    }
}
