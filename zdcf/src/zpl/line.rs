//! Line-level scanning for ZPL text.

use crate::{SyntaxReason, ZdcfError, ZdcfResult};

const INDENT: &str = "    ";

/// One meaningful ZPL line: its nesting depth, key, and optional value.
#[derive(Debug, PartialEq, Eq)]
pub(super) struct Line<'a> {
    pub(super) depth: usize,
    pub(super) key: &'a str,
    pub(super) value: Option<&'a str>,
}

impl<'a> Line<'a> {
    /// Scan `raw`, returning `None` for blank and comment-only lines.
    pub(super) fn scan(raw: &'a str, lineno: usize) -> ZdcfResult<Option<Self>> {
        let content = raw
            .split_once('#')
            .map_or(raw, |(before, _)| before)
            .trim_end();
        if content.is_empty() {
            return Ok(None);
        }
        let invalid = || ZdcfError::syntax(lineno, SyntaxReason::InvalidLine(content.to_owned()));

        let mut depth = 0;
        let mut body = content;
        while let Some(rest) = body.strip_prefix(INDENT) {
            depth += 1;
            body = rest;
        }
        if !body.starts_with(|c: char| c.is_ascii_alphanumeric()) {
            return Err(invalid());
        }
        let key_len = body.find(|c: char| !is_key_char(c)).unwrap_or(body.len());
        let (key, tail) = body.split_at(key_len);
        let after_key = tail.trim_start();
        if after_key.is_empty() {
            return Ok(Some(Self {
                depth,
                key,
                value: None,
            }));
        }
        let value = after_key
            .strip_prefix('=')
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(invalid)?;
        Ok(Some(Self {
            depth,
            key,
            value: Some(unquote(value)),
        }))
    }
}

const fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '/'
}

/// Strip one layer of matching single or double quotes.
fn unquote(value: &str) -> &str {
    ['"', '\'']
        .into_iter()
        .find_map(|quote| {
            value
                .strip_prefix(quote)
                .and_then(|inner| inner.strip_suffix(quote))
        })
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::Line;

    #[rstest]
    #[case("", None)]
    #[case("   ", None)]
    #[case("# comment", None)]
    #[case("    # indented comment", None)]
    #[case("main", Some((0, "main", None)))]
    #[case("        frontend", Some((2, "frontend", None)))]
    #[case("type = zmq_queue", Some((0, "type", Some("zmq_queue"))))]
    #[case("    bind=tcp://eth0:5555", Some((1, "bind", Some("tcp://eth0:5555"))))]
    #[case("    verbose = 1      #   Ask for a trace", Some((1, "verbose", Some("1"))))]
    #[case("subscribe = \"1234 \"", Some((0, "subscribe", Some("1234 "))))]
    #[case("identity = 'me'", Some((0, "identity", Some("me"))))]
    #[case("a/b = c", Some((0, "a/b", Some("c"))))]
    fn scans_valid_lines(
        #[case] raw: &str,
        #[case] expected: Option<(usize, &str, Option<&str>)>,
    ) {
        let line = Line::scan(raw, 1).expect("line scans");
        assert_eq!(
            line.map(|l| (l.depth, l.key, l.value)),
            expected,
            "unexpected scan of {raw:?}"
        );
    }

    #[rstest]
    #[case("  main")]
    #[case("   main")]
    #[case("\tmain")]
    #[case("/main")]
    #[case("key value")]
    #[case("key =")]
    #[case("ke-y = 1")]
    fn rejects_malformed_lines(#[case] raw: &str) {
        let err = Line::scan(raw, 7).expect_err("line is rejected");
        assert!(
            err.to_string().starts_with("line 7:"),
            "unexpected error: {err}"
        );
    }
}
