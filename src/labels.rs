//! Label editing - pure functions
//!
//! GitLab replaces the whole label set on update, so the new set is computed
//! locally from a freshly fetched one.

use std::collections::HashMap;

/// Compute the label set after removing and adding labels
///
/// Each name in `remove` drops one matching label (exact match, earliest
/// first), so a name listed twice removes two occurrences. Names in `add`
/// are appended only if not already present. Surviving labels keep their
/// order.
pub fn edit_labels(current: &[String], remove: &[String], add: &[String]) -> Vec<String> {
    let mut pending: HashMap<&str, usize> = HashMap::new();
    for name in remove {
        *pending.entry(name.as_str()).or_default() += 1;
    }

    let mut labels: Vec<String> = current
        .iter()
        .filter(|label| match pending.get_mut(label.as_str()) {
            Some(count) if *count > 0 => {
                *count -= 1;
                false
            }
            _ => true,
        })
        .cloned()
        .collect();

    for name in add {
        if !labels.contains(name) {
            labels.push(name.clone());
        }
    }

    labels
}

/// Render a label set for the summary message, e.g. `[bug, ci]`
pub fn format_labels(labels: &[String]) -> String {
    format!("[{}]", labels.join(", "))
}
