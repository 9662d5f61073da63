use crate::error::{Result, ScriptError};
use crate::types::{OwnerCode, StateId};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// State -> owning country, as declared in the master states file.
pub type OwnershipTable = BTreeMap<StateId, OwnerCode>;

/// `s:STATE_X = { ... country = c:TAG`, looking no further than the first
/// closing brace after the declaration.
const OWNER_PATTERN: &str =
    r#"(?:^|[^A-Za-z0-9_:])s:(STATE_[A-Z0-9_]+)\s*=\s*\{[^}]*?country\s*=\s*["']?c:([A-Z]{3})\b"#;

fn owner_regex() -> Result<&'static Regex> {
    static OWNER_REGEX: OnceLock<std::result::Result<Regex, regex::Error>> = OnceLock::new();
    OWNER_REGEX
        .get_or_init(|| Regex::new(OWNER_PATTERN))
        .as_ref()
        .map_err(|e| ScriptError::Regex(e.clone()))
}

/// Parse the owner of every state declared in `text`.
///
/// When a state is declared more than once, the last declaration wins. A text
/// with no ownership declarations yields an empty table.
pub fn parse_ownership(text: &str) -> Result<OwnershipTable> {
    let re = owner_regex()?;
    let mut table = OwnershipTable::new();

    for caps in re.captures_iter(text) {
        let (Some(state), Some(owner)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        let (Ok(state), Ok(owner)) = (
            state.as_str().parse::<StateId>(),
            owner.as_str().parse::<OwnerCode>(),
        ) else {
            continue;
        };

        if let Some(previous) = table.insert(state.clone(), owner) {
            if previous != owner {
                tracing::debug!(%state, %previous, %owner, "state declared twice, keeping last owner");
            }
        }
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner_of<'a>(table: &'a OwnershipTable, state: &str) -> Option<&'a str> {
        table
            .get(&state.parse::<StateId>().unwrap())
            .map(OwnerCode::as_str)
    }

    #[test]
    fn test_parse_master_file() {
        let text = r#"
STATES = {
    s:STATE_SVEALAND = {
        create_state = {
            country = c:SWE
            owned_provinces = { x123456 x654321 }
        }
        add_homeland = cu:swedish
    }

    s:STATE_FINLAND = {
        create_state = {
            country = c:RUS
            owned_provinces = { x0000AA }
        }
    }
}
"#;
        let table = parse_ownership(text).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(owner_of(&table, "STATE_SVEALAND"), Some("SWE"));
        assert_eq!(owner_of(&table, "STATE_FINLAND"), Some("RUS"));
    }

    #[test]
    fn test_compact_and_quoted_owner() {
        let table = parse_ownership("s:STATE_A={ country=c:FRA }").unwrap();
        assert_eq!(owner_of(&table, "STATE_A"), Some("FRA"));

        let table = parse_ownership("s:STATE_B = { country = \"c:GER\" }").unwrap();
        assert_eq!(owner_of(&table, "STATE_B"), Some("GER"));
    }

    #[test]
    fn test_last_declaration_wins() {
        let text = "s:STATE_A = { country = c:FRA }\ns:STATE_A = { country = c:GER }";
        let table = parse_ownership(text).unwrap();
        assert_eq!(owner_of(&table, "STATE_A"), Some("GER"));
    }

    #[test]
    fn test_owner_lookahead_stops_at_closing_brace() {
        // STATE_A has no owner; the lookahead must not borrow STATE_B's.
        let text = "s:STATE_A = { add_homeland = cu:x }\ns:STATE_B = { country = c:GER }";
        let table = parse_ownership(text).unwrap();
        assert_eq!(owner_of(&table, "STATE_A"), None);
        assert_eq!(owner_of(&table, "STATE_B"), Some("GER"));
    }

    #[test]
    fn test_no_declarations() {
        assert!(parse_ownership("# nothing here").unwrap().is_empty());
    }
}
