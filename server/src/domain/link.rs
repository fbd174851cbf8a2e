//! Deep links into Toggl's detailed report UI

use super::period::DateRange;
use super::selector::Selector;

/// Build a detailed-report URL for the same query the totals call ran.
///
/// `{ui_base_url}/reports/detailed/{workspace}/from/{start}/{projects|tasks}/{id}/till/{end}`
pub fn make_toggl_link(
    ui_base_url: &str,
    workspace_id: u64,
    range: &DateRange,
    selector: Selector,
) -> String {
    format!(
        "{}/reports/detailed/{}/from/{}/{}/{}/till/{}",
        ui_base_url.trim_end_matches('/'),
        workspace_id,
        range.start_iso(),
        selector.path_segment(),
        selector.id(),
        range.end_iso(),
    )
}
