use log::{info, warn};

use wallshot::core::geometry::Triangle;

use crate::constants::MARKER_RADIUS_PX;
use crate::model::MillimeterEntry;
use crate::state::AppRuntime;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum EntryOutcome {
    Unchanged,
    Applied,
    Reverted(String),
}

/// Commits the Y (height above the table) and Z (lateral) entries together.
///
/// Text that does not parse reverts on its own. A marker that would poke out
/// of the triangle reverts both entries.
pub(crate) fn apply_target_entries(
    triangle: &Triangle,
    y_entry: &mut MillimeterEntry,
    z_entry: &mut MillimeterEntry,
) -> EntryOutcome {
    let mut problems = Vec::new();
    let y_mm = y_entry.parsed().unwrap_or_else(|| {
        problems.push(format!("'{}' is not a whole number of mm for Y", y_entry.text.trim()));
        y_entry.value
    });
    let z_mm = z_entry.parsed().unwrap_or_else(|| {
        problems.push(format!("'{}' is not a whole number of mm for Z", z_entry.text.trim()));
        z_entry.value
    });

    if y_mm == y_entry.value && z_mm == z_entry.value {
        y_entry.revert();
        z_entry.revert();
        return if problems.is_empty() {
            EntryOutcome::Unchanged
        } else {
            EntryOutcome::Reverted(problems.join("; "))
        };
    }

    let center = triangle.point_from_base(f64::from(z_mm), f64::from(y_mm));
    if !triangle.contains_circle(center, MARKER_RADIUS_PX) {
        y_entry.revert();
        z_entry.revert();
        problems.push(format!(
            "target at Y={y_mm} mm, Z={z_mm} mm leaves the allowed region"
        ));
        return EntryOutcome::Reverted(problems.join("; "));
    }

    y_entry.commit(y_mm);
    z_entry.commit(z_mm);
    if problems.is_empty() {
        EntryOutcome::Applied
    } else {
        EntryOutcome::Reverted(problems.join("; "))
    }
}

/// Applies pending entries and reports the result in the status line.
pub(crate) fn update_target_entries(state: &mut AppRuntime) {
    match apply_target_entries(&state.triangle, &mut state.y_entry, &mut state.z_entry) {
        EntryOutcome::Unchanged => {}
        EntryOutcome::Applied => {
            info!(
                "target moved to Y={} mm, Z={} mm",
                state.y_entry.value, state.z_entry.value
            );
            state.status_line = format!(
                "Target at Y={} mm, Z={:.1} cm",
                state.y_entry.value,
                state.lateral_cm()
            );
        }
        EntryOutcome::Reverted(reason) => {
            warn!("target entry reverted: {reason}");
            state.status_line = format!("Reverted: {reason}");
        }
    }
}
