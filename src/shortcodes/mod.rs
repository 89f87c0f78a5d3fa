//! Shortcode processing.
//!
//! Shortcodes are `[name key=value ...]` markers embedded in user-authored
//! content; each is replaced by its handler's markup when the content is
//! rendered. Handlers receive a [`ShortcodeEnv`] with everything they may
//! touch: the evaluation context of the requesting user, the condition
//! chain, and the catalog/cache pair backing bulk tables.

pub mod bulkoperations;
pub mod table;

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::availability::{ConditionChain, EvalContext};
use crate::constants::shortcodes as names;
use crate::error::AppResult;
use crate::lang::get_string_with;

pub use table::{OptionCatalog, TableCache};

/// Everything a shortcode handler may access.
pub struct ShortcodeEnv<'a> {
    pub ctx: &'a EvalContext,
    pub chain: &'a ConditionChain,
    pub catalog: &'a dyn OptionCatalog,
    pub cache: &'a dyn TableCache,
}

/// One parsed shortcode occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedShortcode {
    pub name: String,
    pub args: HashMap<String, String>,
}

static SHORTCODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(\w+)((?:\s+\w+=[^\s\]]+)*)\s*\]").expect("shortcode pattern is valid")
});

static ARG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)=([^\s\]]+)").expect("shortcode arg pattern is valid"));

/// Parse every shortcode occurrence in a piece of content.
pub fn parse(content: &str) -> Vec<ParsedShortcode> {
    SHORTCODE_RE
        .captures_iter(content)
        .map(|caps| ParsedShortcode {
            name: caps[1].to_string(),
            args: ARG_RE
                .captures_iter(&caps[2])
                .map(|arg| (arg[1].to_string(), arg[2].to_string()))
                .collect(),
        })
        .collect()
}

/// Render one shortcode by name.
pub async fn render(
    name: &str,
    args: &HashMap<String, String>,
    env: &ShortcodeEnv<'_>,
) -> AppResult<String> {
    match name {
        names::BULK_OPERATIONS => bulkoperations::render(args, env).await,
        _ => Ok(alert(&get_string_with("shortcodes_unknown", &[("name", name)]))),
    }
}

/// Replace every shortcode occurrence in the content with its markup.
pub async fn process(content: &str, env: &ShortcodeEnv<'_>) -> AppResult<String> {
    let mut output = String::with_capacity(content.len());
    let mut last = 0;
    for caps in SHORTCODE_RE.captures_iter(content) {
        let Some(whole) = caps.get(0) else { continue };
        let parsed = ParsedShortcode {
            name: caps[1].to_string(),
            args: ARG_RE
                .captures_iter(&caps[2])
                .map(|arg| (arg[1].to_string(), arg[2].to_string()))
                .collect(),
        };
        output.push_str(&content[last..whole.start()]);
        output.push_str(&render(&parsed.name, &parsed.args, env).await?);
        last = whole.end();
    }
    output.push_str(&content[last..]);
    Ok(output)
}

/// Wrap a message in the alert markup shortcodes use for non-table output.
pub(crate) fn alert(message: &str) -> String {
    format!("<div class=\"alert alert-warning\">{message}</div>")
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_shortcode_with_args() {
        let parsed = parse("before [bulkoperations all=1] after");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].name, "bulkoperations");
        assert_eq!(parsed[0].args.get("all").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_parse_multiple_and_argless() {
        let parsed = parse("[bulkoperations] text [other key=value extra=2]");
        assert_eq!(parsed.len(), 2);
        assert!(parsed[0].args.is_empty());
        assert_eq!(parsed[1].args.len(), 2);
    }

    #[test]
    fn test_plain_text_has_no_shortcodes() {
        assert!(parse("no [brackets here").is_empty());
    }
}
