use crate::error::{Result, ScriptError};
use crate::types::StateId;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Matches `s:STATE_X =` declaration tokens. The leading class keeps
/// `xs:STATE_X` or `c:s:STATE_X` style tokens from matching.
const DECLARATION_PATTERN: &str = r"(?:^|[^A-Za-z0-9_:])s:(STATE_[A-Z0-9_]+)\s*=";

fn declaration_regex() -> Result<&'static Regex> {
    static DECLARATION_REGEX: OnceLock<std::result::Result<Regex, regex::Error>> = OnceLock::new();
    DECLARATION_REGEX
        .get_or_init(|| Regex::new(DECLARATION_PATTERN))
        .as_ref()
        .map_err(|e| ScriptError::Regex(e.clone()))
}

/// List every state declared in `text`, in order of first appearance.
///
/// This is a token scan only; block boundaries are not checked.
pub fn declared_states(text: &str) -> Result<Vec<StateId>> {
    let re = declaration_regex()?;
    let mut seen = HashSet::new();
    let mut states = Vec::new();

    for caps in re.captures_iter(text) {
        let Some(name) = caps.get(1) else { continue };
        let Ok(state) = name.as_str().parse::<StateId>() else {
            continue;
        };
        if seen.insert(state.clone()) {
            states.push(state);
        }
    }

    Ok(states)
}
