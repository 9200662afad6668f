//! Simple selector grammar.
//!
//! One compound selector is any combination of a leading tag name, `#id`,
//! `.class` segments, and `[attr]` / `[attr=value]` segments (values may be
//! quoted). No combinators or pseudo-classes. `Selector::parse_list` splits
//! a comma-separated list into compounds tried as a union.

/// A parsed compound selector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    /// Attribute constraints; `None` value means presence-only.
    pub attrs: Vec<(String, Option<String>)>,
}

impl Selector {
    /// Parses one compound selector. Returns `None` for empty or malformed
    /// input (unterminated attribute bracket, stray separator).
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let mut sel = Selector::default();
        let mut chars = input.char_indices().peekable();

        // Leading tag name, if the selector does not start with a marker.
        if let Some(&(_, c)) = chars.peek() {
            if c != '#' && c != '.' && c != '[' {
                let tag: String = input
                    .chars()
                    .take_while(|&c| c != '#' && c != '.' && c != '[')
                    .collect();
                if tag.chars().any(char::is_whitespace) {
                    return None; // combinators are not supported
                }
                for _ in 0..tag.chars().count() {
                    chars.next();
                }
                sel.tag = Some(tag.to_ascii_lowercase());
            }
        }

        while let Some((_, c)) = chars.next() {
            match c {
                '#' | '.' => {
                    let mut name = String::new();
                    while let Some(&(_, n)) = chars.peek() {
                        if n == '#' || n == '.' || n == '[' {
                            break;
                        }
                        name.push(n);
                        chars.next();
                    }
                    if name.is_empty() || name.chars().any(char::is_whitespace) {
                        return None;
                    }
                    if c == '#' {
                        sel.id = Some(name);
                    } else {
                        sel.classes.push(name);
                    }
                }
                '[' => {
                    let mut body = String::new();
                    let mut closed = false;
                    for (_, n) in chars.by_ref() {
                        if n == ']' {
                            closed = true;
                            break;
                        }
                        body.push(n);
                    }
                    if !closed || body.is_empty() {
                        return None;
                    }
                    match body.split_once('=') {
                        Some((name, value)) => {
                            let value = value.trim_matches(|c| c == '"' || c == '\'');
                            sel.attrs
                                .push((name.trim().to_string(), Some(value.to_string())));
                        }
                        None => sel.attrs.push((body.trim().to_string(), None)),
                    }
                }
                _ => return None,
            }
        }

        Some(sel)
    }

    /// Parses a comma-separated selector list, skipping malformed parts.
    pub fn parse_list(input: &str) -> Vec<Self> {
        input
            .split(',')
            .filter_map(|part| {
                let sel = Self::parse(part);
                if sel.is_none() && !part.trim().is_empty() {
                    tracing::debug!("skipping unsupported selector {:?}", part.trim());
                }
                sel
            })
            .collect()
    }

    /// Tests the compound against one element's facts.
    pub fn matches(
        &self,
        tag: &str,
        id: Option<&str>,
        classes: &[String],
        attr: impl Fn(&str) -> Option<String>,
    ) -> bool {
        if let Some(ref want) = self.tag {
            if !want.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(ref want) = self.id {
            if id != Some(want.as_str()) {
                return false;
            }
        }
        for class in &self.classes {
            if !classes.iter().any(|c| c == class) {
                return false;
            }
        }
        for (name, want) in &self.attrs {
            match (attr(name), want) {
                (Some(actual), Some(want)) if actual == *want => {}
                (Some(_), None) => {}
                _ => return false,
            }
        }
        true
    }
}
