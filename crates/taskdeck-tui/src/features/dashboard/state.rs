//! Dashboard screen state.

/// Focused column of the two-pane dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardColumn {
    #[default]
    AssignedByMe,
    AssignedToMe,
}

#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub column: DashboardColumn,
    /// Selected row in the "assigned by me" column.
    pub selected_by_me: usize,
    /// Selected row in the "assigned to me" column.
    pub selected_to_me: usize,
}

impl DashboardState {
    pub fn selected(&self) -> usize {
        match self.column {
            DashboardColumn::AssignedByMe => self.selected_by_me,
            DashboardColumn::AssignedToMe => self.selected_to_me,
        }
    }

    pub fn selected_mut(&mut self) -> &mut usize {
        match self.column {
            DashboardColumn::AssignedByMe => &mut self.selected_by_me,
            DashboardColumn::AssignedToMe => &mut self.selected_to_me,
        }
    }

    /// Clamps both selections after the dashboard data changes.
    pub fn clamp(&mut self, by_me_len: usize, to_me_len: usize) {
        clamp_to(&mut self.selected_by_me, by_me_len);
        clamp_to(&mut self.selected_to_me, to_me_len);
    }
}

fn clamp_to(selected: &mut usize, len: usize) {
    if len == 0 {
        *selected = 0;
    } else if *selected >= len {
        *selected = len - 1;
    }
}
