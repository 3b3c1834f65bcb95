//! Canonical term → alias tables used to tolerate free-text catalog values.
//!
//! Matching is plain case-insensitive set membership. Requested tokens are
//! never turned into patterns, so user input cannot change what a lookup means.

/// One canonical term and the raw values treated as equivalent to it
#[derive(Debug, Clone, Copy)]
pub struct SynonymGroup {
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
}

impl SynonymGroup {
    fn contains(&self, lowered: &str) -> bool {
        self.canonical.to_lowercase() == lowered || self.aliases.contains(&lowered)
    }
}

/// A table of synonym groups for one preference field
#[derive(Debug, Clone, Copy)]
pub struct SynonymTable {
    groups: &'static [SynonymGroup],
}

pub const CURRICULUM_SYNONYMS: SynonymTable = SynonymTable {
    groups: &[
        SynonymGroup { canonical: "Cambridge", aliases: &["cambridge", "caie", "cie"] },
        SynonymGroup { canonical: "ZIMSEC", aliases: &["zimsec"] },
        SynonymGroup { canonical: "IB", aliases: &["ib", "international baccalaureate"] },
    ],
};

pub const PHASE_SYNONYMS: SynonymTable = SynonymTable {
    groups: &[
        SynonymGroup { canonical: "Pre-School", aliases: &["pre-school", "preschool", "early years", "ece"] },
        SynonymGroup { canonical: "Primary School", aliases: &["primary", "primary school", "junior"] },
        SynonymGroup { canonical: "High School", aliases: &["high school", "secondary", "senior"] },
    ],
};

/// Values of `boardingType` that mean the school takes boarders
pub const BOARDING_VALUES: &[&str] = &[
    "boarding",
    "boarding school",
    "boarder",
    "boarders",
    "full boarding",
    "weekly boarding",
];

/// Values of `boardingType` that mean the school takes day scholars
pub const DAY_VALUES: &[&str] = &["day", "day school", "day scholar", "day scholars"];

#[inline]
fn lower(value: &str) -> String {
    value.trim().to_lowercase()
}

impl SynonymTable {
    /// Every lowercase value equivalent to `token`.
    ///
    /// Tokens outside the table expand to themselves.
    pub fn expand(&self, token: &str) -> Vec<String> {
        let lowered = lower(token);
        match self.groups.iter().find(|group| group.contains(&lowered)) {
            Some(group) => {
                let mut values: Vec<String> = group.aliases.iter().map(|alias| alias.to_string()).collect();
                let canonical = group.canonical.to_lowercase();
                if !values.contains(&canonical) {
                    values.push(canonical);
                }
                values
            }
            None if lowered.is_empty() => vec![],
            None => vec![lowered],
        }
    }

    /// Whether any stored value is a synonym of `token`
    pub fn matches(&self, token: &str, stored: &[String]) -> bool {
        let expanded = self.expand(token);
        stored.iter().any(|value| expanded.contains(&lower(value)))
    }

    /// Requested tokens that hit the stored values, in request order
    pub fn matched_tokens<'a>(&self, tokens: &'a [String], stored: &[String]) -> Vec<&'a str> {
        tokens
            .iter()
            .filter(|token| self.matches(token, stored))
            .map(String::as_str)
            .collect()
    }
}

/// Whether any stored value belongs to `values`
pub fn contains_any(values: &[&str], stored: &[String]) -> bool {
    stored.iter().any(|value| values.contains(&lower(value).as_str()))
}

/// Whether a requested boarding token means "boarding"
pub fn is_boarding_token(token: &str) -> bool {
    BOARDING_VALUES.contains(&lower(token).as_str())
}

/// Whether a requested boarding token means "day"
pub fn is_day_token(token: &str) -> bool {
    DAY_VALUES.contains(&lower(token).as_str())
}
