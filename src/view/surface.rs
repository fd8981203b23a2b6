//! Mount surface
//!
//! The single mount point the router attaches views to, plus the page
//! title and the add-transaction dialog.

use std::fmt;

use super::template::{Content, TransactionRow, View, ViewId};
use crate::model::TransactionDraft;

/// Modal transaction editor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionDialog {
    open: bool,
    draft: TransactionDraft,
}

impl TransactionDialog {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn draft(&self) -> &TransactionDraft {
        &self.draft
    }
}

#[derive(Debug, Default)]
pub struct Surface {
    title: String,
    view: Option<View>,
    dialog: TransactionDialog,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the mount point and attach `view`
    pub fn mount(&mut self, view: View) {
        self.view = Some(view);
        self.dialog = TransactionDialog::default();
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn view(&self) -> Option<&View> {
        self.view.as_ref()
    }

    pub fn view_id(&self) -> Option<ViewId> {
        self.view.as_ref().map(View::id)
    }

    /// Replace the content of a slot in the mounted view.
    ///
    /// Slots absent from the mounted view are ignored.
    pub fn update_element(&mut self, slot: &str, content: Content) {
        let filled = self
            .view
            .as_mut()
            .map(|view| view.fill(slot, content))
            .unwrap_or(false);

        if !filled {
            tracing::debug!(slot, view = ?self.view_id(), "Slot not present in mounted view");
        }
    }

    pub fn text(&self, slot: &str) -> Option<&str> {
        self.view.as_ref()?.text(slot)
    }

    pub fn rows(&self, slot: &str) -> &[TransactionRow] {
        match self.view.as_ref().and_then(|view| view.slot(slot)) {
            Some(Content::Rows(rows)) => rows,
            _ => &[],
        }
    }

    pub fn dialog(&self) -> &TransactionDialog {
        &self.dialog
    }

    /// Show the dialog with a blank form dated today
    pub fn open_dialog(&mut self) {
        self.dialog = TransactionDialog {
            open: true,
            draft: TransactionDraft::today(),
        };
    }

    /// Hide the dialog and hand back what was typed
    pub fn close_dialog(&mut self) -> TransactionDraft {
        self.dialog.open = false;
        self.dialog.draft.clone()
    }

    pub fn draft_mut(&mut self) -> &mut TransactionDraft {
        &mut self.dialog.draft
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.title)?;

        let Some(view) = &self.view else {
            return Ok(());
        };

        for (name, content) in view.slots() {
            match content {
                Content::Empty => {}
                Content::Text(text) => writeln!(f, "{:>16}: {}", name, text)?,
                Content::Rows(rows) => {
                    writeln!(f, "{:>16}:", name)?;
                    for row in rows {
                        writeln!(f, "{:>18} {:<24} {:>12}", row.date, row.object, row.amount)?;
                    }
                }
            }
        }

        if self.dialog.open {
            let draft = &self.dialog.draft;
            writeln!(
                f,
                "[new transaction] date={} object={} amount={}",
                draft.date, draft.object, draft.amount
            )?;
        }
        Ok(())
    }
}
