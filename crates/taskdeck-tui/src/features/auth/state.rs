//! Auth form state.

/// Which form is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

/// Focused input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthField {
    Name,
    #[default]
    Email,
    Password,
}

/// Login/registration form.
#[derive(Debug, Clone, Default)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub name: String,
    pub email: String,
    pub password: String,
    pub focus: AuthField,
}

impl AuthForm {
    /// Toggles between login and registration, fixing up focus (the
    /// name field only exists while registering).
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        if self.mode == AuthMode::Login && self.focus == AuthField::Name {
            self.focus = AuthField::Email;
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = match (self.mode, self.focus) {
            (AuthMode::Register, AuthField::Name) => AuthField::Email,
            (_, AuthField::Email) => AuthField::Password,
            (AuthMode::Register, AuthField::Password) => AuthField::Name,
            (AuthMode::Login, _) => AuthField::Email,
        }
    }

    pub fn focus_prev(&mut self) {
        self.focus = match (self.mode, self.focus) {
            (AuthMode::Register, AuthField::Name) => AuthField::Password,
            (AuthMode::Register, AuthField::Email) => AuthField::Name,
            (_, AuthField::Password) => AuthField::Email,
            (AuthMode::Login, _) => AuthField::Password,
        }
    }

    pub fn field_mut(&mut self) -> &mut String {
        match self.focus {
            AuthField::Name => &mut self.name,
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
        }
    }

    /// Clears the password after a submit; email/name stay for retry.
    pub fn clear_password(&mut self) {
        self.password.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_focus_cycles_two_fields() {
        let mut form = AuthForm::default();
        assert_eq!(form.focus, AuthField::Email);
        form.focus_next();
        assert_eq!(form.focus, AuthField::Password);
        form.focus_next();
        assert_eq!(form.focus, AuthField::Email);
    }

    #[test]
    fn register_focus_cycles_three_fields() {
        let mut form = AuthForm {
            mode: AuthMode::Register,
            focus: AuthField::Name,
            ..AuthForm::default()
        };
        form.focus_next();
        assert_eq!(form.focus, AuthField::Email);
        form.focus_next();
        assert_eq!(form.focus, AuthField::Password);
        form.focus_next();
        assert_eq!(form.focus, AuthField::Name);
    }

    #[test]
    fn leaving_register_moves_focus_off_name() {
        let mut form = AuthForm {
            mode: AuthMode::Register,
            focus: AuthField::Name,
            ..AuthForm::default()
        };
        form.toggle_mode();
        assert_eq!(form.mode, AuthMode::Login);
        assert_eq!(form.focus, AuthField::Email);
    }
}
