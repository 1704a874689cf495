//! Branches of the library network.
//!
//! The catalog does not offer a way to list branches so this table is maintained by hand.

/// Branch used when none is given.
pub const DEFAULT_BRANCH: &str = "PARTDI";

const BRANCHES: &[(&str, &str)] = &[
    ("1ARRDT", "1e arrdt"),
    ("3ARRDT", "3e arrdt - Duguesclin"),
    ("5STJE", "5e arrdt - St Jean"),
    ("6ARRDT", "6e arrdt"),
    ("7GERLA", "7e arrdt - Gerland"),
    ("7JMACE", "7e arrdt - J. Macé"),
    ("8ARRDT", "8e arrdt - Bachut"),
    ("9LDUCH", "9e arrdt - La Duchère"),
    ("9STRAM", "9e arrdt - St Rambert"),
    ("9VAISE", "9e arrdt - Vaise"),
    ("COLLEC", "Prêt aux collectivités"),
    ("PARTDI", "Part-Dieu"),
];

/// Iterates over the known `(code, name)` pairs.
pub fn branches() -> impl Iterator<Item = (&'static str, &'static str)> {
    BRANCHES.iter().copied()
}

/// Name of the branch with the given `code`, if known.
#[must_use]
pub fn branch_name(code: &str) -> Option<&'static str> {
    BRANCHES
        .iter()
        .find_map(|&(c, name)| (c == code).then_some(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_branch_is_known() {
        assert_eq!(Some("Part-Dieu"), branch_name(DEFAULT_BRANCH));
    }

    #[test]
    fn unknown_code_has_no_name() {
        assert_eq!(None, branch_name("NOWHERE"));
        assert_eq!(None, branch_name("partdi"));
    }

    #[test]
    fn codes_are_unique() {
        let mut codes: Vec<_> = branches().map(|(code, _)| code).collect();
        let len = codes.len();
        codes.sort_unstable();
        codes.dedup();

        assert_eq!(12, len);
        assert_eq!(len, codes.len());
    }
}
