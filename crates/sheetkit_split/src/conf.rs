//! Split profiles, theme palette, and render policy constants.

/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names (also replaced in artifact names).
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// Title banner row height.
pub const N_HEIGHT_ROW_TITLE: f64 = 30.0;
/// Title banner font size.
pub const N_SIZE_FONT_TITLE: f64 = 14.0;
/// Title banner font color.
pub const C_COLOR_FONT_TITLE: &str = "FFFFFF";
/// Fixed width applied to every used output column.
pub const N_WIDTH_COLUMN_DATA: f64 = 30.0;
/// Table anchor row (1-based): header row of the data table.
pub const N_ROW_TABLE_ANCHOR_1BASED: u32 = 8;
/// Number format for date-designated columns.
pub const C_FMT_NUM_DATE: &str = "dd-mmm-yy";
/// Label of the synthetic metadata entry carrying the caller date string.
pub const C_LABEL_DATE_ENTRY: &str = "Month & Year: ";
/// Name prefix for header cells with no textual content.
pub const C_PREFIX_COLUMN_UNKNOWN: &str = "UNKNOWN ";

////////////////////////////////////////////////////////////////////////////////
// #region ThemePalette

/// Default theme name when the caller supplies none or an unknown one.
pub const C_NAME_THEME_DEFAULT: &str = "TableStyleLight9";

/// Fixed palette: theme name to title banner fill color.
pub const TUP_THEME_BANNER_FILL: [(&str, &str); 6] = [
    ("TableStyleLight9", "4F81BD"),
    ("TableStyleLight10", "C0504D"),
    ("TableStyleLight11", "9BBB59"),
    ("TableStyleLight12", "8064A2"),
    ("TableStyleLight13", "4BACC6"),
    ("TableStyleLight14", "F79646"),
];

/// Resolve a theme name to its banner fill color.
///
/// Unknown or missing names fall back to the default theme; this is not an
/// error condition.
pub fn derive_theme_fill_color(name_theme: Option<&str>) -> &'static str {
    let c_name = name_theme.unwrap_or(C_NAME_THEME_DEFAULT);
    TUP_THEME_BANNER_FILL
        .iter()
        .find(|(c_theme, _)| *c_theme == c_name)
        .or_else(|| {
            TUP_THEME_BANNER_FILL
                .iter()
                .find(|(c_theme, _)| *c_theme == C_NAME_THEME_DEFAULT)
        })
        .map(|(_, c_color)| *c_color)
        .unwrap_or("4F81BD")
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SplitProfiles

/// Static configuration record for one split profile.
#[derive(Debug, Clone, Copy)]
pub struct SpecProfileConfig {
    /// Column whose value determines partition membership.
    pub name_column_key: &'static str,
    /// Fold the trimmed key to lowercase before grouping.
    pub if_fold_key_case: bool,
    /// Columns removed from every row and from the derived header list.
    pub columns_excluded: &'static [&'static str],
    /// `(source column, display label)` pairs for the metadata block.
    pub fields_metadata: &'static [(&'static str, &'static str)],
    /// Title banner text.
    pub title: &'static str,
    /// Width (in columns) of the merged title banner region.
    pub n_span_title_merge: u16,
    /// 1-based output-column positions rendered with the date format.
    pub cols_idx_date_1based: &'static [u16],
}

static CFG_PROFILE_CATEGORY: SpecProfileConfig = SpecProfileConfig {
    name_column_key: "Category",
    if_fold_key_case: true,
    columns_excluded: &["Location", "Site", "Manager"],
    fields_metadata: &[
        ("Location", "Location: "),
        ("Site", "Site Name: "),
        ("Category", "Internal Secure Area Name: "),
        ("Manager", "Internal Secure Area Manager Name: "),
    ],
    title: "Internal Secure Area Manager Report",
    n_span_title_merge: 8,
    cols_idx_date_1based: &[4, 5],
};

static CFG_PROFILE_MANAGER: SpecProfileConfig = SpecProfileConfig {
    name_column_key: "ManagerMailID",
    if_fold_key_case: false,
    columns_excluded: &["Manager Name"],
    fields_metadata: &[
        ("Manager Name", "Manager Name: "),
        ("ManagerMailID", "Manager email address: "),
    ],
    title: "NRE Monthly Validation Report",
    n_span_title_merge: 10,
    cols_idx_date_1based: &[4, 5],
};

/// Built-in split profiles. Extending the set means adding a variant plus
/// its static configuration, not runtime input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumSplitProfile {
    /// Partition by secure-area category; key is case-folded.
    Category,
    /// Partition by manager mail id; key case is preserved.
    Manager,
}

impl EnumSplitProfile {
    /// Resolve a caller-supplied profile name (case-insensitive).
    pub fn from_name(name_profile: &str) -> Option<Self> {
        match name_profile.trim().to_ascii_lowercase().as_str() {
            "category" => Some(Self::Category),
            "manager" => Some(Self::Manager),
            _ => None,
        }
    }

    /// Canonical profile name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Manager => "manager",
        }
    }

    /// Static configuration for this profile.
    pub fn config(&self) -> &'static SpecProfileConfig {
        match self {
            Self::Category => &CFG_PROFILE_CATEGORY,
            Self::Manager => &CFG_PROFILE_MANAGER,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_names_resolve_case_insensitively() {
        assert_eq!(
            EnumSplitProfile::from_name("Category"),
            Some(EnumSplitProfile::Category)
        );
        assert_eq!(
            EnumSplitProfile::from_name("MANAGER"),
            Some(EnumSplitProfile::Manager)
        );
        assert_eq!(EnumSplitProfile::from_name("team"), None);
    }

    #[test]
    fn theme_lookup_falls_back_to_default() {
        assert_eq!(derive_theme_fill_color(Some("TableStyleLight11")), "9BBB59");
        assert_eq!(derive_theme_fill_color(Some("NoSuchTheme")), "4F81BD");
        assert_eq!(derive_theme_fill_color(None), "4F81BD");
    }

    #[test]
    fn key_fold_asymmetry_is_preserved() {
        assert!(EnumSplitProfile::Category.config().if_fold_key_case);
        assert!(!EnumSplitProfile::Manager.config().if_fold_key_case);
    }
}
