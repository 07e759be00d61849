//! Plain text rendering of a drive

use drive_tree::prelude::*;
use std::fmt;

/// Render the header line and every row of the current layout
///
/// Rows are indented two spaces per level. Folders end in `/`. In
/// multi-select mode every row gets a checkbox; otherwise the selected row is
/// marked with `*`.
pub fn render(drive: &Drive) -> String {
    DriveView(drive).to_string()
}

/// Display adapter behind [`render`]
pub struct DriveView<'a>(pub &'a Drive);

impl fmt::Display for DriveView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let drive = self.0;
        let selection = drive.selection();

        write!(f, "Drive: {} items selected", selection.len())?;
        if selection.is_multi_select() {
            f.write_str(" [multi-select]")?;
        }
        writeln!(f)?;

        for row in drive.rows() {
            let Some(item) = drive.store().get(&row.id) else {
                continue;
            };
            let selected = selection.is_selected(&row.id);

            f.write_str(&"  ".repeat(row.depth))?;
            if selection.is_multi_select() {
                f.write_str(if selected { "[x] " } else { "[ ] " })?;
            }
            f.write_str(&item.name)?;
            if item.is_folder() {
                f.write_str("/")?;
            }
            write!(f, "  #{}", row.id)?;
            if selected && !selection.is_multi_select() {
                f.write_str(" *")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
