//! Line-oriented parser for the fetched tag resource.
//!
//! The resource is the site's tag list, a restricted two-field record
//! format read line by line:
//!
//! ```text
//! - tag: agn
//!   description: Active galactic nucleus interpretation
//! ```
//!
//! A `tag:` line opens a record; a `description:` line attaches to the
//! most recently seen tag. Anything else (list headers, comments,
//! unrelated keys) is ignored. This is deliberately not a YAML parser —
//! it accepts exactly what the site's client consumed.

use crate::TagDefinition;

/// Parse tag records out of the resource text. Unparseable input yields
/// an empty vector, which the caller treats as a failed tier.
pub(crate) fn parse_records(text: &str) -> Vec<TagDefinition> {
    let mut defs: Vec<TagDefinition> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        let line = line.strip_prefix("- ").map(str::trim_start).unwrap_or(line);

        if let Some(name) = strip_key(line, "tag") {
            if !name.is_empty() {
                defs.push(TagDefinition::new(name));
            }
        } else if let Some(desc) = strip_key(line, "description")
            && !desc.is_empty()
            && let Some(last) = defs.last_mut()
        {
            last.description = Some(desc.to_string());
        }
    }

    defs
}

/// `key: value` → `value`, with optional surrounding quotes stripped.
fn strip_key<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(key)?.trim_start();
    let rest = rest.strip_prefix(':')?;
    Some(rest.trim().trim_matches('"').trim_matches('\''))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_basic_records() {
        let text = "\
tags:
  - tag: agn
    description: Active galactic nucleus interpretation
  - tag: jwst
    description: JWST observations
";
        let defs = parse_records(text);
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].name, "agn");
        assert_eq!(
            defs[0].description.as_deref(),
            Some("Active galactic nucleus interpretation")
        );
        assert_eq!(defs[1].name, "jwst");
    }

    #[test]
    fn test_description_pairs_with_most_recent_tag() {
        let text = "\
- tag: agn
- tag: dust
  description: Dust attenuation
";
        let defs = parse_records(text);
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].description, None);
        assert_eq!(defs[1].description.as_deref(), Some("Dust attenuation"));
    }

    #[test]
    fn test_orphan_description_is_ignored() {
        let text = "description: floating text\n- tag: agn\n";
        let defs = parse_records(text);
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].description, None);
    }

    #[test]
    fn test_quoted_values_are_unwrapped() {
        let text = "- tag: \"emission lines\"\n  description: 'Line measurements'\n";
        let defs = parse_records(text);
        assert_eq!(defs[0].name, "emission lines");
        assert_eq!(defs[0].description.as_deref(), Some("Line measurements"));
    }

    #[test]
    fn test_unrelated_lines_and_empty_input() {
        assert!(parse_records("").is_empty());
        assert!(parse_records("# just a comment\nfoo: bar\n").is_empty());
        // A tag with an empty name does not open a record.
        assert!(parse_records("- tag:\n  description: lost\n").is_empty());
    }
}
