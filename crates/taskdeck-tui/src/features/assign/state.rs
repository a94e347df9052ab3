//! Assignment screen state.

/// Focused pane of the assignment screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssignPane {
    #[default]
    Tasks,
    Users,
}

#[derive(Debug, Clone, Default)]
pub struct AssignState {
    pub pane: AssignPane,
    pub selected_task: usize,
    pub selected_user: usize,
    /// Task picked for assignment; cleared once the assignment lands.
    pub chosen_task: Option<String>,
}

impl AssignState {
    pub fn clamp(&mut self, task_len: usize, user_len: usize) {
        clamp_to(&mut self.selected_task, task_len);
        clamp_to(&mut self.selected_user, user_len);
    }
}

fn clamp_to(selected: &mut usize, len: usize) {
    if len == 0 {
        *selected = 0;
    } else if *selected >= len {
        *selected = len - 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_handles_empty_collections() {
        let mut state = AssignState {
            selected_task: 3,
            selected_user: 7,
            ..AssignState::default()
        };
        state.clamp(0, 2);
        assert_eq!(state.selected_task, 0);
        assert_eq!(state.selected_user, 1);
    }
}
