//! Home screen state.

/// Focused field of the new-task form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertField {
    #[default]
    Text,
    Description,
}

/// Interaction mode of the home screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HomeMode {
    /// Navigating the task list.
    #[default]
    List,
    /// Filling the new-task form.
    Insert(InsertField),
    /// Editing the text of an existing task in place.
    Edit { id: String, buffer: String },
}

#[derive(Debug, Clone, Default)]
pub struct HomeState {
    pub mode: HomeMode,
    /// Selected row in the task list.
    pub selected: usize,
    /// New-task form fields.
    pub draft_text: String,
    pub draft_description: String,
}

impl HomeState {
    /// Clamps the selection to the collection length after mutations.
    pub fn clamp_selection(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    pub fn clear_draft(&mut self) {
        self.draft_text.clear();
        self.draft_description.clear();
    }
}
