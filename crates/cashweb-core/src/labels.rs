//! Fixed display labels shown on the report page

/// Category key to display name
pub static CATEGORY_LABELS: [(&str, &str); 9] = [
    ("salary", "راتب"),
    ("investment", "استثمار"),
    ("gift", "هدية"),
    ("food", "طعام"),
    ("transport", "مواصلات"),
    ("bills", "فواتير"),
    ("shopping", "تسوق"),
    ("other-income", "أخرى (مدخول)"),
    ("other-expense", "أخرى (مصروف)"),
];

/// Shown for any category key outside [`CATEGORY_LABELS`]
pub const FALLBACK_CATEGORY_LABEL: &str = "عام";

/// Month-of-year names, January first
pub static MONTH_LABELS: [&str; 12] = [
    "يناير",
    "فبراير",
    "مارس",
    "أبريل",
    "مايو",
    "يونيو",
    "يوليو",
    "أغسطس",
    "سبتمبر",
    "أكتوبر",
    "نوفمبر",
    "ديسمبر",
];

pub const INCOME_ROW: &str = "المدخول";
pub const EXPENSE_ROW: &str = "المصروف";
pub const YEARLY_INCOME_ROW: &str = "المدخول السنوي";
pub const YEARLY_EXPENSE_ROW: &str = "المصروف السنوي";
pub const BALANCE_ROW: &str = "صافي الرصيد";

/// Chart dataset names
pub const INCOME_SERIES: &str = "مدخول";
pub const EXPENSE_SERIES: &str = "مصروف";

/// Display name for a category key
pub fn category_label(key: &str) -> &'static str {
    CATEGORY_LABELS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| *label)
        .unwrap_or(FALLBACK_CATEGORY_LABEL)
}

/// Display name for a zero-based month index
pub fn month_label(month0: u32) -> &'static str {
    MONTH_LABELS.get(month0 as usize).copied().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_label() {
        assert_eq!(category_label("salary"), "راتب");
        assert_eq!(category_label("other-expense"), "أخرى (مصروف)");
        assert_eq!(category_label("crypto"), FALLBACK_CATEGORY_LABEL);
        assert_eq!(category_label(""), FALLBACK_CATEGORY_LABEL);
    }

    #[test]
    fn test_month_label() {
        assert_eq!(month_label(0), "يناير");
        assert_eq!(month_label(11), "ديسمبر");
        assert_eq!(month_label(12), "");
    }
}
