use crate::block::extract_block;
use crate::error::{Result, ScriptError};
use crate::types::{OwnerCode, StateId};
use regex::Regex;
use std::sync::OnceLock;

const REGION_STATE_PATTERN: &str = r"(?P<prefix>region_state:)[A-Z]{3}(?P<suffix>\s*=)";
const COUNTRY_PATTERN: &str = r#"(?P<prefix>country\s*=\s*["']?)c:[A-Z]{3}\b"#;

fn region_state_regex() -> Result<&'static Regex> {
    static REGION_STATE_REGEX: OnceLock<std::result::Result<Regex, regex::Error>> = OnceLock::new();
    REGION_STATE_REGEX
        .get_or_init(|| Regex::new(REGION_STATE_PATTERN))
        .as_ref()
        .map_err(|e| ScriptError::Regex(e.clone()))
}

fn country_regex() -> Result<&'static Regex> {
    static COUNTRY_REGEX: OnceLock<std::result::Result<Regex, regex::Error>> = OnceLock::new();
    COUNTRY_REGEX
        .get_or_init(|| Regex::new(COUNTRY_PATTERN))
        .as_ref()
        .map_err(|e| ScriptError::Regex(e.clone()))
}

/// Result of patching one file's text for one state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patched {
    pub text: String,
    /// The state's block was located in the text.
    pub found: bool,
    /// The text differs from the input.
    pub changed: bool,
}

/// Rewrite the owner of `state` inside its block in `text`.
///
/// Both `region_state:TAG =` and `country = c:TAG` (bare or quoted) are
/// rewritten, but only within the state's own block; everything outside the
/// block is kept byte for byte. A missing or unbalanced block leaves the text
/// untouched.
pub fn patch_ownership(text: &str, state: &StateId, owner: OwnerCode) -> Result<Patched> {
    let Some(block) = extract_block(text, state) else {
        return Ok(Patched {
            text: text.to_string(),
            found: false,
            changed: false,
        });
    };

    let region_replacement = format!("${{prefix}}{owner}${{suffix}}");
    let country_replacement = format!("${{prefix}}c:{owner}");

    let patched = region_state_regex()?.replace_all(block.text, region_replacement.as_str());
    let patched = country_regex()?.replace_all(&patched, country_replacement.as_str());

    if patched == block.text {
        return Ok(Patched {
            text: text.to_string(),
            found: true,
            changed: false,
        });
    }

    let prefix = block.prefix(text);
    let suffix = block.suffix(text);
    let mut output = String::with_capacity(prefix.len() + patched.len() + suffix.len());
    output.push_str(prefix);
    output.push_str(&patched);
    output.push_str(suffix);

    Ok(Patched {
        text: output,
        found: true,
        changed: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(s: &str) -> StateId {
        s.parse().unwrap()
    }

    fn owner(s: &str) -> OwnerCode {
        s.parse().unwrap()
    }

    const POPS: &str = r#"POPS = {
    s:STATE_A = {
        region_state:GER = {
            create_pop = {
                culture = north_german
                size = 120000
            }
        }
    }
}
"#;

    #[test]
    fn test_region_state_rewritten() {
        let patched = patch_ownership(POPS, &state("STATE_A"), owner("FRA")).unwrap();
        assert!(patched.found);
        assert!(patched.changed);
        assert!(patched.text.contains("region_state:FRA ="));
        assert!(!patched.text.contains("region_state:GER"));
        assert_eq!(patched.text.len(), POPS.len());
    }

    #[test]
    fn test_country_references_rewritten() {
        let text = r#"s:STATE_A = {
    region_state:GER = {
        create_building = {
            building = "building_port"
            add_ownership = {
                country = { country = "c:GER" levels = 1 }
                building = { type = "building_manor_house" country = c:GER levels = 2 }
            }
        }
    }
}"#;
        let patched = patch_ownership(text, &state("STATE_A"), owner("FRA")).unwrap();
        assert!(patched.changed);
        assert!(patched.text.contains(r#"country = "c:FRA""#));
        assert!(patched.text.contains("country = c:FRA levels = 2"));
        assert!(!patched.text.contains("GER"));
    }

    #[test]
    fn test_patch_is_idempotent() {
        let first = patch_ownership(POPS, &state("STATE_A"), owner("FRA")).unwrap();
        let second = patch_ownership(&first.text, &state("STATE_A"), owner("FRA")).unwrap();
        assert!(second.found);
        assert!(!second.changed);
        assert_eq!(second.text, first.text);
    }

    #[test]
    fn test_other_blocks_untouched() {
        let text = r#"s:STATE_A = {
    region_state:GER = { building = { country = "c:GER" } }
}
s:STATE_B = {
    region_state:GER = { building = { country = "c:GER" } }
}
"#;
        let patched = patch_ownership(text, &state("STATE_A"), owner("FRA")).unwrap();
        assert!(patched.changed);

        let b_start = text.find("s:STATE_B").unwrap();
        let patched_b_start = patched.text.find("s:STATE_B").unwrap();
        assert_eq!(&patched.text[patched_b_start..], &text[b_start..]);
        assert!(patched.text[..patched_b_start].contains("c:FRA"));
    }

    #[test]
    fn test_missing_block_returns_original() {
        let patched = patch_ownership(POPS, &state("STATE_Z"), owner("FRA")).unwrap();
        assert!(!patched.found);
        assert!(!patched.changed);
        assert_eq!(patched.text, POPS);
    }

    #[test]
    fn test_unbalanced_block_returns_original() {
        let text = "s:STATE_A = {\n    region_state:GER = {\n";
        let patched = patch_ownership(text, &state("STATE_A"), owner("FRA")).unwrap();
        assert!(!patched.found);
        assert_eq!(patched.text, text);
    }

    #[test]
    fn test_long_country_names_are_left_alone() {
        let text = "s:STATE_A = { country = c:GERMANY region_state:GER = { } }";
        let patched = patch_ownership(text, &state("STATE_A"), owner("FRA")).unwrap();
        assert_eq!(
            patched.text,
            "s:STATE_A = { country = c:GERMANY region_state:FRA = { } }"
        );
    }
}
