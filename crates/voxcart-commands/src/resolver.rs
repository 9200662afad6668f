//! Greedy, order-dependent transcript matcher.

use crate::command::Command;

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'a> {
    Matched {
        command: &'a Command,
        /// Trimmed text captured after a wildcard prefix.
        param: Option<String>,
    },
    NoMatch,
}

/// Maps a transcript to the first matching entry of the merged registry.
///
/// The transcript is lowercased and the entries are walked once in their
/// enumeration order. Wildcard patterns prefix-match and capture the trimmed
/// remainder; literal patterns match by substring containment. There is no
/// scoring and no longest-match preference: an earlier short pattern wins
/// over a later, more specific one.
pub fn resolve<'a>(transcript: &str, commands: &[&'a Command]) -> Resolution<'a> {
    let speech = transcript.to_lowercase();

    for command in commands {
        if command.capture {
            let prefix = command
                .pattern
                .split('*')
                .next()
                .unwrap_or_default()
                .trim();
            if let Some(rest) = speech.strip_prefix(prefix) {
                return Resolution::Matched {
                    command,
                    param: Some(rest.trim().to_string()),
                };
            }
        } else if speech.contains(command.pattern.as_str()) {
            return Resolution::Matched {
                command,
                param: None,
            };
        }
    }

    Resolution::NoMatch
}
