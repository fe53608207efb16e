use std::cmp::Ordering;
use std::sync::OnceLock;

use ahash::AHashSet;
use smol_str::SmolStr;

use crate::keywords;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum_macros::EnumString,
    strum_macros::Display,
    strum_macros::EnumIter,
)]
pub enum Vendor {
    #[strum(serialize = "mysql")]
    MySql,
    #[strum(serialize = "presto")]
    Presto,
    #[strum(serialize = "redshift")]
    Redshift,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    RequireIntoForIgnore,
    SupportValueForInsert,
    InsertIgnore,
    DefaultValuesOnInsert,
    InsertSelectRequireParens,
    Replace,
    WithClause,
    RequireFromForDelete,
    UpdateLimit,
    DeleteUsing,
    CommaOffset,
    LimitAll,
    SupportOutputExpressionsForDelete,
    JsonTable,
    WindowFunctions,
}

impl Feature {
    pub fn name(self) -> &'static str {
        match self {
            Feature::RequireIntoForIgnore => "require_into_for_ignore",
            Feature::SupportValueForInsert => "support_value_for_insert",
            Feature::InsertIgnore => "insert_ignore",
            Feature::DefaultValuesOnInsert => "default_values_on_insert",
            Feature::InsertSelectRequireParens => "insert_select_require_parens",
            Feature::Replace => "replace",
            Feature::WithClause => "with_clause",
            Feature::RequireFromForDelete => "require_from_for_delete",
            Feature::UpdateLimit => "update_limit",
            Feature::DeleteUsing => "delete_using",
            Feature::CommaOffset => "comma_offset",
            Feature::LimitAll => "limit_all",
            Feature::SupportOutputExpressionsForDelete => "support_output_expressions_for_delete",
            Feature::JsonTable => "json_table",
            Feature::WindowFunctions => "window_functions",
        }
    }
}

/// `(vendor, version)`. `version = None` means "assume the latest version".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dialect {
    pub vendor: Vendor,
    pub version: Option<Vec<u32>>,
}

impl Default for Dialect {
    fn default() -> Self {
        Dialect::mysql()
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.vendor)?;
        if let Some(version) = &self.version {
            write!(f, " ")?;
            let parts: Vec<String> = version.iter().map(u32::to_string).collect();
            write!(f, "{}", parts.join("."))?;
        }
        Ok(())
    }
}

impl Dialect {
    pub fn new(vendor: Vendor, version: Option<Vec<u32>>) -> Self {
        Dialect { vendor, version }
    }

    pub fn mysql() -> Self {
        Dialect::new(Vendor::MySql, None)
    }

    pub fn presto() -> Self {
        Dialect::new(Vendor::Presto, None)
    }

    pub fn redshift() -> Self {
        Dialect::new(Vendor::Redshift, None)
    }

    /// `start <= version < end`. A version range with no `end` is an
    /// open-ended "introduced in `start`"; a `None` (latest) dialect
    /// version matches only such open-ended ranges, per spec.
    pub fn version_in(&self, start: &[u32], end: Option<&[u32]>) -> bool {
        match &self.version {
            None => end.is_none(),
            Some(v) => {
                if compare_versions(v, start) == Ordering::Less {
                    return false;
                }
                if let Some(end) = end {
                    if compare_versions(v, end) != Ordering::Less {
                        return false;
                    }
                }
                true
            }
        }
    }

    pub fn identifier_quote(&self) -> char {
        match self.vendor {
            Vendor::MySql => '`',
            Vendor::Presto | Vendor::Redshift => '"',
        }
    }

    pub fn supports(&self, feature: Feature) -> bool {
        use Feature::*;
        use Vendor::*;
        match (feature, self.vendor) {
            (RequireIntoForIgnore, MySql) => false,
            (RequireIntoForIgnore, Redshift) => true,
            (RequireIntoForIgnore, Presto) => true,

            (SupportValueForInsert, MySql) => true,
            (SupportValueForInsert, _) => false,

            (InsertIgnore, MySql) => true,
            (InsertIgnore, _) => false,

            (DefaultValuesOnInsert, MySql) => false,
            (DefaultValuesOnInsert, Redshift) => true,
            (DefaultValuesOnInsert, Presto) => false,

            (InsertSelectRequireParens, MySql) => false,
            (InsertSelectRequireParens, Redshift) => true,
            (InsertSelectRequireParens, Presto) => false,

            (Replace, MySql) => true,
            (Replace, _) => false,

            (WithClause, MySql) => false,
            (WithClause, Presto | Redshift) => true,

            (RequireFromForDelete, MySql) => true,
            (RequireFromForDelete, Redshift) => false,
            (RequireFromForDelete, Presto) => true,

            (UpdateLimit, MySql) => true,
            (UpdateLimit, Redshift) => false,
            (UpdateLimit, Presto) => false,

            (DeleteUsing, MySql) => false,
            (DeleteUsing, Redshift) => true,
            (DeleteUsing, Presto) => false,

            (CommaOffset, MySql) => true,
            (CommaOffset, _) => false,

            (LimitAll, MySql) => false,
            (LimitAll, Redshift) => true,
            (LimitAll, Presto) => false,

            (SupportOutputExpressionsForDelete, Redshift) => true,
            (SupportOutputExpressionsForDelete, _) => false,

            (JsonTable, MySql) => self.version_in(&[8, 0, 19], None),
            (JsonTable, _) => false,

            (WindowFunctions, MySql) => self.version_in(&[8], None),
            (WindowFunctions, Presto | Redshift) => true,
        }
    }

    /// Ordered groups of mutually-exclusive `SELECT` modifier keywords; at
    /// most one keyword per group may appear in a single `SELECT`.
    pub fn select_modifiers(&self) -> Vec<Vec<&'static str>> {
        match self.vendor {
            Vendor::MySql => {
                let cache_group = if self.version_in(&[8], None) {
                    vec!["SQL_NO_CACHE"]
                } else {
                    vec!["SQL_CACHE", "SQL_NO_CACHE"]
                };
                vec![
                    vec!["ALL", "DISTINCT", "DISTINCTROW"],
                    vec!["HIGH_PRIORITY"],
                    vec!["STRAIGHT_JOIN"],
                    vec!["SQL_SMALL_RESULT"],
                    vec!["SQL_BIG_RESULT"],
                    vec!["SQL_BUFFER_RESULT"],
                    cache_group,
                    vec!["SQL_CALC_FOUND_ROWS"],
                ]
            }
            Vendor::Presto | Vendor::Redshift => vec![vec!["ALL", "DISTINCT"]],
        }
    }

    /// The dialect's reserved-keyword set, upper-cased. Computed once per
    /// distinct `(vendor, mysql8-or-not)` bucket and cached; safe to race
    /// because the computation is pure and idempotent.
    pub fn reserved_keywords(&self) -> &'static AHashSet<SmolStr> {
        static MYSQL_57: OnceLock<AHashSet<SmolStr>> = OnceLock::new();
        static MYSQL_8: OnceLock<AHashSet<SmolStr>> = OnceLock::new();
        static PRESTO: OnceLock<AHashSet<SmolStr>> = OnceLock::new();
        static REDSHIFT: OnceLock<AHashSet<SmolStr>> = OnceLock::new();

        match self.vendor {
            Vendor::MySql if self.version_in(&[8], None) => MYSQL_8.get_or_init(|| {
                keywords::BASE_MYSQL_KEYWORDS
                    .iter()
                    .chain(keywords::MYSQL_8_NEW_KEYWORDS)
                    .map(|s| SmolStr::new(*s))
                    .collect()
            }),
            Vendor::MySql => MYSQL_57
                .get_or_init(|| keywords::BASE_MYSQL_KEYWORDS.iter().map(|s| SmolStr::new(*s)).collect()),
            Vendor::Presto => {
                PRESTO.get_or_init(|| keywords::PRESTO_KEYWORDS.iter().map(|s| SmolStr::new(*s)).collect())
            }
            Vendor::Redshift => REDSHIFT
                .get_or_init(|| keywords::REDSHIFT_KEYWORDS.iter().map(|s| SmolStr::new(*s)).collect()),
        }
    }

    pub fn is_reserved_keyword(&self, upper_text: &str) -> bool {
        self.reserved_keywords().contains(upper_text)
    }
}

/// Every supported vendor name, for CLI help text and error messages.
pub fn vendor_names() -> Vec<String> {
    use strum::IntoEnumIterator;
    Vendor::iter().map(|v| v.to_string()).collect()
}

fn compare_versions(a: &[u32], b: &[u32]) -> Ordering {
    for i in 0..a.len().max(b.len()) {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        match x.cmp(&y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn vendor_round_trips_through_its_string_form() {
        for name in vendor_names() {
            let vendor = Vendor::from_str(&name).unwrap();
            assert_eq!(vendor.to_string(), name);
        }
    }

    #[test]
    fn mysql_reserved_keywords_are_case_insensitive_lookup() {
        let d = Dialect::mysql();
        assert!(d.is_reserved_keyword("SELECT"));
        assert!(!d.is_reserved_keyword("REPLACE".to_lowercase().as_str()));
    }

    #[test]
    fn mysql8_adds_window_function_keywords() {
        let old = Dialect::new(Vendor::MySql, Some(vec![5, 7]));
        let new = Dialect::new(Vendor::MySql, Some(vec![8, 0]));
        assert!(!old.is_reserved_keyword("OVER"));
        assert!(new.is_reserved_keyword("OVER"));
    }

    #[test]
    fn feature_gating_differs_by_vendor() {
        assert!(Dialect::mysql().supports(Feature::Replace));
        assert!(!Dialect::redshift().supports(Feature::Replace));
        assert!(Dialect::redshift().supports(Feature::LimitAll));
        assert!(!Dialect::mysql().supports(Feature::LimitAll));
    }

    #[test]
    fn version_in_open_ended_range_matches_latest() {
        let latest = Dialect::mysql();
        assert!(latest.version_in(&[5], None));
        assert!(!latest.version_in(&[5], Some(&[8])));
    }

    #[test]
    fn select_modifiers_group_sql_cache_by_version() {
        let old = Dialect::new(Vendor::MySql, Some(vec![5, 7]));
        let groups = old.select_modifiers();
        assert!(groups.iter().any(|g| g.contains(&"SQL_CACHE")));
        let new = Dialect::new(Vendor::MySql, Some(vec![8, 0]));
        let groups = new.select_modifiers();
        assert!(!groups.iter().any(|g| g.contains(&"SQL_CACHE")));
    }
}
