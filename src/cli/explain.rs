use crate::config::Config;
use crate::rules::all_builtin_rules;

/// `(id, description)` of every built-in rule, in registration order.
pub fn available_rules() -> Vec<(&'static str, &'static str)> {
    all_builtin_rules(&Config::default())
        .map(|rules| {
            rules
                .iter()
                .map(|rule| (rule.id(), rule.description()))
                .collect()
        })
        .unwrap_or_default()
}

pub fn list_rules() -> String {
    use std::fmt::Write;
    let mut out = String::from("Available rules:\n\n");
    for (name, desc) in available_rules() {
        let _ = writeln!(out, "  {name:<20} {desc}");
    }
    out.push_str("\nRun `assetlint explain <rule>` for details.");
    out
}

pub fn explain(rule: &str) -> Option<&'static str> {
    match rule {
        "naming-convention" => Some(
            "naming-convention: Checks asset names against the convention for their classification.\n\
             \n\
             Each [[naming_conventions]] entry maps a classification (\"Static Mesh\",\n\
             \"Widget Blueprint\", \"Material used as an Instance\") to a required prefix,\n\
             an optional suffix and a case-sensitivity flag. A name must start with the\n\
             prefix, end with the suffix, and keep a non-empty body in between: `WBP_` on\n\
             its own is still a violation. Classifications without an entry are never\n\
             flagged. An asset the registry has not loaded yet is loaded first when a\n\
             convention is keyed by its class or a usage refinement of it.\n\
             \n\
             Severity: error\n\
             Config: [[naming_conventions]] (class, prefix, suffix, case_sensitive)",
        ),
        "path-length" => Some(
            "path-length: Flags assets whose canonical path exceeds a character limit.\n\
             \n\
             Deeply nested folders combined with long names produce paths that some\n\
             platforms' packaging and source-control tools refuse. Keep folder and asset\n\
             names short enough that the full path stays below the limit.\n\
             \n\
             Severity: warning\n\
             Config: [rules.path_length] (max, default 140)",
        ),
        "allowed-characters" => Some(
            "allowed-characters: Flags asset names containing disallowed characters.\n\
             \n\
             Spaces, dashes and non-ASCII letters in asset names break scripting, console\n\
             commands and some file systems. Names are matched against a regular\n\
             expression; only the last path segment is checked.\n\
             \n\
             Severity: warning\n\
             Config: [rules.allowed_characters] (pattern, default ^[A-Za-z0-9_]+$)",
        ),
        "top-level" => Some(
            "top-level: Flags assets placed directly in a namespace root.\n\
             \n\
             Assets sitting in /Game itself instead of a project folder clutter the root,\n\
             collide with other projects' content on migration and make ownership unclear.\n\
             \n\
             Severity: warning\n\
             Config: none",
        ),
        _ => None,
    }
}
