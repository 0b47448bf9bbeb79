//! YAML writer for parsed documents.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::Result;
use crate::types::Document;

/// A `key: 'value'` line, optionally opening a sequence item. Document keys
/// are plain camelCase words.
#[allow(clippy::expect_used)]
static QUOTED_VALUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*(?:- )?[a-zA-Z]+: )'([^']*)'$").expect("valid regex")
});

/// A `key: value` line with an unquoted single-word value.
#[allow(clippy::expect_used)]
static PLAIN_WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*(?:- )?[a-zA-Z]+: )([a-zA-Z~]+)$").expect("valid regex")
});

/// Scalars YAML 1.1 reads as booleans or null. Sub-clause labels run through
/// the alphabet, so `y` and `n` show up in real documents.
const RESERVED_WORDS: &[&str] = &[
    "true", "false", "yes", "no", "y", "n", "on", "off", "null", "~",
];

fn is_reserved_word(value: &str) -> bool {
    RESERVED_WORDS.contains(&value.to_lowercase().as_str())
}

/// Shift every sequence item two columns right of its parent key.
///
/// `serde_yaml_ng` writes `- ` at the column of the key that owns the list.
/// Each line is pushed right by two columns for every list it sits inside:
///
/// ```yaml
/// chapters:          chapters:
/// - number: 1          - number: 1
///   title: foo           title: foo
/// ```
fn indent_yaml_sequences(yaml: &str) -> String {
    // Columns of the dashes of the lists the current line is nested in
    let mut open_lists: Vec<usize> = Vec::new();
    let mut out: Vec<String> = Vec::new();

    for line in yaml.lines() {
        let content = line.trim_start();
        if content.is_empty() {
            out.push(String::new());
            continue;
        }
        let column = line.len() - content.len();
        let is_item = content.starts_with("- ");

        // A line left of a list's dash, or level with it but not an item,
        // closes that list
        while open_lists
            .last()
            .is_some_and(|&dash| column < dash || (column == dash && !is_item))
        {
            open_lists.pop();
        }
        if is_item && open_lists.last() != Some(&column) {
            open_lists.push(column);
        }

        let shift = open_lists.len() * 2;
        out.push(format!("{}{content}", " ".repeat(column + shift)));
    }

    out.join("\n")
}

/// Integer or decimal with an optional sign: `26`, `-3`, `1.5`, `.5`, `2.`.
fn looks_numeric(value: &str) -> bool {
    let unsigned = value.trim_start_matches(['+', '-']);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    !(whole.is_empty() && fraction.is_empty()) && digits(whole) && digits(fraction)
}

/// Whether a plain scalar would read back as something other than this string.
fn needs_yaml_quoting(value: &str) -> bool {
    if value.is_empty() || looks_numeric(value) {
        return true;
    }
    if is_reserved_word(value) {
        return true;
    }
    // Indicator characters are only special at the start of a plain scalar
    if value.starts_with(|c: char| "{}[],&*#?|-<>=!%@:\"`' ".contains(c)) {
        return true;
    }
    value.contains(": ") || value.contains(" #") || value.ends_with([':', ' '])
}

/// Drop the single quotes the serializer puts around values that read back
/// as the same string without them.
fn strip_redundant_quotes(yaml: &str) -> String {
    yaml.lines()
        .map(|line| match QUOTED_VALUE_RE.captures(line) {
            Some(caps) if !needs_yaml_quoting(&caps[2]) => format!("{}{}", &caps[1], &caps[2]),
            _ => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Quote plain values such as `y` or `off` that the serializer leaves bare
/// but YAML 1.1 readers take for booleans.
fn quote_reserved_words(yaml: &str) -> String {
    yaml.lines()
        .map(|line| match PLAIN_WORD_RE.captures(line) {
            Some(caps) if is_reserved_word(&caps[2]) => format!("{}'{}'", &caps[1], &caps[2]),
            _ => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Generate a YAML string from a document.
///
/// The output starts with a `---` document marker, indents sequences under
/// their keys and only quotes scalars that would otherwise change type.
pub fn generate_yaml(document: &Document) -> Result<String> {
    let yaml_string = serde_yaml_ng::to_string(document)?;

    let yaml_string = strip_redundant_quotes(&yaml_string);
    let yaml_string = quote_reserved_words(&yaml_string);
    let yaml_string = indent_yaml_sequences(&yaml_string);

    let lines: Vec<&str> = yaml_string.lines().map(|l| l.trim_end()).collect();
    Ok(format!("---\n{}\n", lines.join("\n")))
}

/// Parse a document previously written with [`generate_yaml`].
pub fn parse_yaml(yaml: &str) -> Result<Document> {
    Ok(serde_yaml_ng::from_str(yaml)?)
}
