//! Database-Tag Resolution
//!
//! Maps a raw annotation identifier to its source database by accession
//! prefix. The rule list is ordered and evaluated top to bottom: more
//! specific prefixes (PROSITE "PS5..." profiles) must be checked before
//! shorter ones that would also match ("PS0..." patterns), so this must stay
//! a list and never become an unordered map.
//!
//! The set of source databases is fixed domain knowledge (InterProScan
//! member databases); callers receive the table as a parameter so tests can
//! substitute their own rules.

/// One (database name, accession prefix) rule
pub type PrefixRule = (&'static str, &'static str);

/// Ordered prefix rules, first match wins
pub const DATABASE_PREFIX_RULES: &[PrefixRule] = &[
    ("PANTHER", "PTHR"),
    ("PROSITE_PROFILES", "PS5"),
    ("PROSITE_PATTERNS", "PS0"),
    ("PIRSF", "PIRSF"),
    ("PFAM", "PF"),
    ("PRINTS", "PR"),
    ("SFLD", "SFLD"),
    ("SMART", "SM"),
    ("SUPERFAMILY", "SSF"),
    ("GENE3D", "G3DSA"),
    ("TIGRFAM", "TIGR"),
    ("HAMAP", "MF_"),
    ("CDD", "cd"),
    ("INTERPRO", "IPR"),
];

/// Resolve a raw identifier to its database name.
///
/// The literal "nan" and any identifier matching no rule resolve to "NA".
pub fn resolve_database<'a>(identifier: &str, rules: &[(&'a str, &'a str)]) -> &'a str {
    let identifier = identifier.trim();
    if identifier.is_empty() || identifier == "nan" {
        return "NA";
    }
    for &(database, prefix) in rules {
        if identifier.starts_with(prefix) {
            return database;
        }
    }
    "NA"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_accessions() {
        assert_eq!(resolve_database("PF00069", DATABASE_PREFIX_RULES), "PFAM");
        assert_eq!(resolve_database("SM00220", DATABASE_PREFIX_RULES), "SMART");
        assert_eq!(resolve_database("PTHR24416", DATABASE_PREFIX_RULES), "PANTHER");
        assert_eq!(resolve_database("SSF56112", DATABASE_PREFIX_RULES), "SUPERFAMILY");
        assert_eq!(resolve_database("G3DSA:1.10.510.10", DATABASE_PREFIX_RULES), "GENE3D");
        assert_eq!(resolve_database("IPR000719", DATABASE_PREFIX_RULES), "INTERPRO");
    }

    #[test]
    fn test_specific_prefix_checked_before_generic() {
        // PS5xxxx profiles must not be swallowed by the PS0 pattern rule,
        // and PIRSF must not be swallowed by PRINTS' "PR".
        assert_eq!(resolve_database("PS50011", DATABASE_PREFIX_RULES), "PROSITE_PROFILES");
        assert_eq!(resolve_database("PS00107", DATABASE_PREFIX_RULES), "PROSITE_PATTERNS");
        assert_eq!(resolve_database("PIRSF000654", DATABASE_PREFIX_RULES), "PIRSF");
        assert_eq!(resolve_database("PR00109", DATABASE_PREFIX_RULES), "PRINTS");
    }

    #[test]
    fn test_unknown_and_nan_resolve_to_na() {
        assert_eq!(resolve_database("XYZ123", DATABASE_PREFIX_RULES), "NA");
        assert_eq!(resolve_database("nan", DATABASE_PREFIX_RULES), "NA");
        assert_eq!(resolve_database("", DATABASE_PREFIX_RULES), "NA");
    }

    #[test]
    fn test_rules_are_replaceable() {
        let rules: &[(&str, &str)] = &[("CUSTOM", "CX")];
        assert_eq!(resolve_database("CX001", rules), "CUSTOM");
        assert_eq!(resolve_database("PF00069", rules), "NA");
    }
}
