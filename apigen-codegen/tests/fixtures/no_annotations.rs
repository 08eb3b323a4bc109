//! Test fixture: ordinary definitions without annotations.

/// A user.
pub struct User {
    pub id: u64,
    pub login: String,
}

impl User {
    /// Display name.
    pub fn display(&self) -> String {
        self.login.clone()
    }
}
