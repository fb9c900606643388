//! INI dialect: line classification and the single-pass loader.
//!
//! Each line is classified by the first rule that accepts it:
//!
//! | Rule    | Shape                       | Effect                                  |
//! |---------|-----------------------------|-----------------------------------------|
//! | blank   | empty or whitespace only    | skipped                                 |
//! | comment | `; ...`                     | skipped                                 |
//! | header  | `[name]`, `name` is `\w+`   | opens `name`, creating it if unseen     |
//! | item    | `key = value`, `key` is `\w+` | `coerce_group(value)` stored under `key` |
//! | flag    | anything else               | `coerce_group(line)` appended to flags  |
//!
//! The flag rule is the default case: no line is ever rejected. A header with
//! trailing text (`[name] extra`) is not a header and becomes a flag.
//!
//! Until the first header, items and flags land in the `root` section.

use std::io::BufRead;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::config::Config;
use crate::section::{RawValue, Section};

static COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*;").expect("valid regex"));

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\[\s*(?P<section>\w+)\s*\]\s*$").expect("valid regex")
});

static ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<key>\w+)\s*=\s*(?P<value>.+)\s*$").expect("valid regex")
});

/// Classification of one INI line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    Comment,
    Header(&'a str),
    Item { key: &'a str, value: &'a str },
    Flag(&'a str),
}

type Rule = for<'a> fn(&'a str) -> Option<Line<'a>>;

/// Matchers in precedence order. The first `Some` wins.
const RULES: [Rule; 4] = [blank, comment, header, item];

fn blank(line: &str) -> Option<Line<'_>> {
    line.trim().is_empty().then_some(Line::Blank)
}

fn comment(line: &str) -> Option<Line<'_>> {
    COMMENT.is_match(line).then_some(Line::Comment)
}

fn header(line: &str) -> Option<Line<'_>> {
    let caps = HEADER.captures(line)?;
    Some(Line::Header(caps.name("section")?.as_str()))
}

fn item(line: &str) -> Option<Line<'_>> {
    let caps = ITEM.captures(line)?;
    Some(Line::Item {
        key: caps.name("key")?.as_str(),
        value: caps.name("value")?.as_str(),
    })
}

/// Classify a single line (without its terminator).
pub fn classify(line: &str) -> Line<'_> {
    RULES
        .iter()
        .find_map(|rule| rule(line))
        .unwrap_or_else(|| Line::Flag(line.trim_start()))
}

/// Loader state carried from one line to the next.
struct IniLoader {
    config: Config,
    current: Option<String>,
}

impl IniLoader {
    fn new() -> Self {
        Self {
            config: Config::new(),
            current: None,
        }
    }

    fn target(&mut self) -> &mut Section {
        match &self.current {
            Some(name) => self.config.ensure_section(name),
            None => self.config.root_mut(),
        }
    }

    fn feed(&mut self, number: usize, line: &str) {
        let line = if number == 1 {
            line.strip_prefix('\u{feff}').unwrap_or(line)
        } else {
            line
        };

        let classified = classify(line);
        trace!(line = number, kind = ?classified, "classified INI line");

        match classified {
            Line::Blank | Line::Comment => {}
            Line::Header(name) => {
                if !self.config.has_section(name) {
                    debug!(section = name, line = number, "new INI section");
                }
                self.config.ensure_section(name);
                self.current = Some(name.to_string());
            }
            Line::Item { key, value } => self.target().add_entry(key, RawValue::Text(value)),
            Line::Flag(value) => self.target().add_flag(RawValue::Text(value)),
        }
    }

    fn finish(self, lines: usize) -> Config {
        debug!(lines, sections = self.config.section_count(), "loaded INI source");
        self.config
    }
}

/// Load INI text already held in memory.
pub fn load_ini_str(text: &str) -> Config {
    let mut loader = IniLoader::new();
    let mut count = 0;
    for (i, line) in text.lines().enumerate() {
        count = i + 1;
        loader.feed(count, line);
    }
    loader.finish(count)
}

/// Load INI lines from `reader`, draining it in one pass.
///
/// A read error aborts the load; no partial config is returned.
pub fn load_ini<R: BufRead>(reader: R) -> std::io::Result<Config> {
    let mut loader = IniLoader::new();
    let mut count = 0;
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        count = i + 1;
        loader.feed(count, &line);
    }
    Ok(loader.finish(count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::SAMPLE_INI;
    use crate::value::Value;
    use proptest::prelude::*;

    #[test]
    fn classify_blank_lines() {
        assert_eq!(classify(""), Line::Blank);
        assert_eq!(classify("   \t"), Line::Blank);
    }

    #[test]
    fn classify_comment() {
        assert_eq!(classify("; a comment"), Line::Comment);
        assert_eq!(classify("   ;indented"), Line::Comment);
    }

    #[test]
    fn comment_wins_over_item() {
        assert_eq!(classify(";key=value"), Line::Comment);
    }

    #[test]
    fn classify_header() {
        assert_eq!(classify("[general]"), Line::Header("general"));
        assert_eq!(classify("  [ spaced_1 ]  "), Line::Header("spaced_1"));
    }

    #[test]
    fn header_with_trailing_text_is_a_flag() {
        assert_eq!(classify("[general] extra"), Line::Flag("[general] extra"));
    }

    #[test]
    fn header_with_non_word_name_is_a_flag() {
        assert_eq!(classify("[my-section]"), Line::Flag("[my-section]"));
        assert_eq!(classify("[]"), Line::Flag("[]"));
    }

    #[test]
    fn classify_item() {
        assert_eq!(
            classify("foo=baz"),
            Line::Item {
                key: "foo",
                value: "baz"
            }
        );
        assert_eq!(
            classify("  list = 1.1, 2.2"),
            Line::Item {
                key: "list",
                value: "1.1, 2.2"
            }
        );
    }

    #[test]
    fn item_value_keeps_later_equals_signs() {
        assert_eq!(
            classify("expr = a=b"),
            Line::Item {
                key: "expr",
                value: "a=b"
            }
        );
    }

    #[test]
    fn item_without_value_is_a_flag() {
        assert_eq!(classify("key="), Line::Flag("key="));
    }

    #[test]
    fn non_word_key_is_a_flag() {
        assert_eq!(classify("my-key = 1"), Line::Flag("my-key = 1"));
    }

    #[test]
    fn classify_flag_strips_leading_whitespace() {
        assert_eq!(classify("   a,3"), Line::Flag("a,3"));
    }

    #[test]
    fn general_section_key() {
        let config = load_ini_str("[general]\nfoo=baz\n");
        let general = config.section("general").unwrap();
        assert_eq!(general.get("foo"), Some(&Value::from("baz")));
    }

    #[test]
    fn list_section_flags() {
        let config = load_ini_str("[list_section]\n1.5\n2\na,3\n");
        let section = config.section("list_section").unwrap();
        assert_eq!(
            section.flags(),
            &[
                Value::Float(1.5),
                Value::Integer(2),
                Value::Tuple(vec![Value::from("a"), Value::Integer(3)]),
            ]
        );
    }

    #[test]
    fn mixed_section_types() {
        let config = load_ini_str("[mixed]\nboolean=True\nlist=1.1,2.2\n");
        let mixed = config.section("mixed").unwrap();
        assert_eq!(mixed.get("boolean"), Some(&Value::Boolean(true)));
        assert_eq!(
            mixed.get("list"),
            Some(&Value::Tuple(vec![Value::Float(1.1), Value::Float(2.2)]))
        );
    }

    #[test]
    fn lines_before_any_header_land_in_root() {
        let config = load_ini_str("path = /usr/local\nverbose\n[other]\nx = 1\n");
        let root = config.root();
        assert_eq!(root.get("path"), Some(&Value::from("/usr/local")));
        assert_eq!(root.flags(), &[Value::from("verbose")]);
        assert_eq!(root.get("x"), None);
    }

    #[test]
    fn header_with_trailing_text_stays_in_current_section() {
        let config = load_ini_str("[a]\nx = 1\n[b] extra\n");
        let a = config.section("a").unwrap();
        assert_eq!(a.get("x"), Some(&Value::Integer(1)));
        assert_eq!(a.flags(), &[Value::from("[b] extra")]);
        assert!(!config.has_section("b"));
        assert_eq!(config.section_count(), 2);
    }

    #[test]
    fn nan_values_load_equal_twice() {
        let text = "[a]\nx = nan\nNaN\n";
        assert_eq!(load_ini_str(text), load_ini_str(text));
        let a = load_ini_str(text);
        let a = a.section("a").unwrap();
        assert!(a.get("x").and_then(Value::as_float).is_some_and(f64::is_nan));
        assert!(a.flag(0).and_then(Value::as_float).is_some_and(f64::is_nan));
    }

    #[test]
    fn reopened_header_appends_to_existing_section() {
        let config = load_ini_str("[a]\nx = 1\n[b]\ny = 2\n[a]\nz = 3\nflag\n");
        let a = config.section("a").unwrap();
        assert_eq!(a.get("x"), Some(&Value::Integer(1)));
        assert_eq!(a.get("z"), Some(&Value::Integer(3)));
        assert_eq!(a.flags(), &[Value::from("flag")]);
    }

    #[test]
    fn duplicate_key_last_write_wins() {
        let config = load_ini_str("[a]\nx = 1\nx = 2\n");
        assert_eq!(config.section("a").unwrap().get("x"), Some(&Value::Integer(2)));
    }

    #[test]
    fn blank_lines_and_comments_leave_no_trace() {
        let config = load_ini_str("\n   \n; hello\n[a]\n\n;x=1\n");
        assert!(config.root().is_empty());
        assert!(config.section("a").unwrap().is_empty());
    }

    #[test]
    fn crlf_and_missing_trailing_newline() {
        let config = load_ini_str("[a]\r\nx = 1\r\ny = two");
        let a = config.section("a").unwrap();
        assert_eq!(a.get("x"), Some(&Value::Integer(1)));
        assert_eq!(a.get("y"), Some(&Value::from("two")));
    }

    #[test]
    fn leading_bom_is_ignored() {
        let config = load_ini_str("\u{feff}[a]\nx = 1\n");
        assert!(config.section("a").is_some());
    }

    #[test]
    fn header_named_root_targets_root() {
        let config = load_ini_str("[root]\nx = 1\n");
        assert_eq!(config.root().get("x"), Some(&Value::Integer(1)));
        assert_eq!(config.section_count(), 1);
    }

    #[test]
    fn reader_and_str_agree() {
        let from_reader = load_ini(SAMPLE_INI.as_bytes()).unwrap();
        let from_str = load_ini_str(SAMPLE_INI);
        assert_eq!(from_reader, from_str);
    }

    #[test]
    fn reader_error_aborts_load() {
        let invalid: &[u8] = b"[a]\nx = \xff\xfe\n";
        assert!(load_ini(invalid).is_err());
    }

    #[test]
    fn sample_round_trip_preserves_flags_and_keys() {
        let config = load_ini_str(SAMPLE_INI);
        let list = config.section("list_section").unwrap();
        assert_eq!(list.flags().len(), 3);
        let general_keys: Vec<&str> = config.section("general").unwrap().keys().collect();
        assert_eq!(general_keys, vec!["foo", "spam"]);
    }

    /// Short INI-ish documents, including float spellings like `nan` and `inf`.
    const INI_TEXT: &str = "((nan|NaN|inf|[a-zA-Z0-9_ =;,.\\[\\]]{0,16})\n){0,12}";

    proptest! {
        #[test]
        fn any_text_loads_and_reloads_equal(text in INI_TEXT) {
            prop_assert_eq!(load_ini_str(&text), load_ini_str(&text));
        }

        #[test]
        fn every_line_is_classified(line in ".*") {
            let _ = classify(&line);
        }
    }
}
