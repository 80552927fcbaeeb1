//! Terminal file-status assignment.
//!
//! Runs once per parse, after scanning completes, over the fully populated
//! file list.

use super::model::{ChangeKind, FileDiff, FileStatus};

/// Assign each file its terminal status in place.
pub(super) fn assign_statuses(files: &mut [FileDiff]) {
    for file in files {
        file.status = terminal_status(file);
    }
}

/// Classification rules, in precedence order:
/// 1. no prior revision (`rev_from == 0`): the file is new
/// 2. at least one counted change and every counted change is a removal:
///    the file was deleted in this revision
/// 3. otherwise the provisional status stands (normally `Modified`); this
///    includes files with zero counted changes, such as pure
///    property-change sections
fn terminal_status(file: &FileDiff) -> FileStatus {
    if file.rev_from == 0 {
        return FileStatus::Added;
    }

    let mut saw_counted = false;
    for change in file.counted_changes() {
        if change.kind != ChangeKind::Removed {
            return file.status;
        }
        saw_counted = true;
    }

    if saw_counted {
        FileStatus::Removed
    } else {
        file.status
    }
}
