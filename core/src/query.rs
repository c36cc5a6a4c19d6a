//! Mapping between the list view's active tab and the `q` query value
//! (`is:<tab>`), mirroring how the backend's web UI encodes it.

use crate::task::Tab;

/// URL-facing tab name, e.g. `in-progress`.
pub fn tab_param(tab: Tab) -> &'static str {
    match tab {
        Tab::InProgress => "in-progress",
        Tab::Assigned => "assigned",
        Tab::Available => "available",
        Tab::NeedsReview => "needs-review",
        Tab::InReview => "in-review",
        Tab::Verified => "verified",
        Tab::Merged => "merged",
        Tab::Completed => "completed",
    }
}

/// The full `q` value for a tab, e.g. `is:in-progress`.
pub fn to_query_value(tab: Tab) -> String {
    format!("is:{}", tab_param(tab))
}

/// Parse an active tab out of a `q` value. Accepts `is:<tab>` or a bare
/// tab name, in kebab-case or wire form, case-insensitively. Missing or
/// unknown input falls back to the default tab.
pub fn parse_active_tab(q: Option<&str>) -> Tab {
    let Some(q) = q else {
        return Tab::default();
    };
    let name = q.trim().strip_prefix("is:").unwrap_or(q.trim());
    let normalized = name.trim().to_ascii_lowercase().replace('_', "-");
    Tab::ALL
        .into_iter()
        .find(|tab| tab_param(*tab) == normalized)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_value_round_trips_for_every_tab() {
        for tab in Tab::ALL {
            let q = to_query_value(tab);
            assert_eq!(parse_active_tab(Some(&q)), tab, "q={q}");
        }
    }

    #[test]
    fn bare_tab_name_is_accepted() {
        assert_eq!(parse_active_tab(Some("needs-review")), Tab::NeedsReview);
    }

    #[test]
    fn wire_form_is_accepted() {
        assert_eq!(parse_active_tab(Some("is:IN_PROGRESS")), Tab::InProgress);
    }

    #[test]
    fn missing_or_unknown_falls_back_to_available() {
        assert_eq!(parse_active_tab(None), Tab::Available);
        assert_eq!(parse_active_tab(Some("is:garbage")), Tab::Available);
        assert_eq!(parse_active_tab(Some("")), Tab::Available);
    }
}
