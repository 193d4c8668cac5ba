//! Comparators that need no context-key information

use std::cmp::Ordering;

/// Groups the host always renders first, in this order
const SPECIAL_GROUPS: [&str; 2] = ["navigation", "inline"];

/// The fields of a menu entry that take part in ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortItem<'a> {
    /// Command or submenu id
    pub owner: Option<&'a str>,
    /// Human label of the owner
    pub label: Option<&'a str>,
    pub when: Option<&'a str>,
    pub group: Option<&'a str>,
    pub order: Option<i64>,
}

/// Anything the sort engine can order
pub trait Sortable {
    fn sort_item(&self) -> SortItem<'_>;
}

impl Sortable for SortItem<'_> {
    fn sort_item(&self) -> SortItem<'_> {
        *self
    }
}

/// Command palette entries are ordered by owner id alone.
pub fn compare_owners(a: &SortItem<'_>, b: &SortItem<'_>) -> Ordering {
    present_first(a.owner, b.owner)
}

/// Group, then order, then label.
///
/// Grouped entries precede ungrouped ones; `navigation` and `inline`
/// precede every other group. A missing order counts as 0.
pub fn compare_default(a: &SortItem<'_>, b: &SortItem<'_>) -> Ordering {
    compare_groups(a.group, b.group)
        .then_with(|| a.order.unwrap_or(0).cmp(&b.order.unwrap_or(0)))
        .then_with(|| present_first(a.label, b.label))
}

fn compare_groups(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => group_rank(a).cmp(&group_rank(b)).then_with(|| a.cmp(b)),
        (a, b) => present_first(a, b),
    }
}

fn group_rank(group: &str) -> usize {
    SPECIAL_GROUPS
        .iter()
        .position(|special| *special == group)
        .unwrap_or(SPECIAL_GROUPS.len())
}

/// Orders present values by their text and puts missing values last.
fn present_first(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grouped(
        group: Option<&'static str>,
        order: Option<i64>,
        label: &'static str,
    ) -> SortItem<'static> {
        SortItem {
            group,
            order,
            label: Some(label),
            ..SortItem::default()
        }
    }

    #[test]
    fn test_navigation_before_inline_before_others() {
        let nav = grouped(Some("navigation"), None, "z");
        let inline = grouped(Some("inline"), None, "z");
        let other = grouped(Some("1_a"), None, "a");
        assert_eq!(compare_default(&nav, &inline), Ordering::Less);
        assert_eq!(compare_default(&inline, &other), Ordering::Less);
        assert_eq!(compare_default(&nav, &other), Ordering::Less);
    }

    #[test]
    fn test_ungrouped_last() {
        let ungrouped = grouped(None, None, "a");
        let other = grouped(Some("9_z"), Some(99), "z");
        assert_eq!(compare_default(&ungrouped, &other), Ordering::Greater);
    }

    #[test]
    fn test_missing_order_is_zero() {
        let missing = grouped(Some("g"), None, "b");
        let negative = grouped(Some("g"), Some(-1), "c");
        let zero = grouped(Some("g"), Some(0), "a");
        assert_eq!(compare_default(&negative, &missing), Ordering::Less);
        assert_eq!(compare_default(&zero, &missing), Ordering::Less);
    }

    #[test]
    fn test_owner_order() {
        let a = SortItem {
            owner: Some("a.cmd"),
            ..SortItem::default()
        };
        let b = SortItem {
            owner: Some("b.cmd"),
            ..SortItem::default()
        };
        assert_eq!(compare_owners(&a, &b), Ordering::Less);
        assert_eq!(compare_owners(&b, &SortItem::default()), Ordering::Less);
    }
}
