//! User update builder.

use flow_core::enums::UserRole;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Option<String>>,
}

#[derive(Default)]
pub struct UserUpdateBuilder(UserUpdate);

impl UserUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn username(mut self, val: impl Into<String>) -> Self {
        self.0.username = Some(val.into());
        self
    }

    #[must_use]
    pub const fn role(mut self, val: UserRole) -> Self {
        self.0.role = Some(val);
        self
    }

    #[must_use]
    pub const fn is_admin(mut self, val: bool) -> Self {
        self.0.is_admin = Some(val);
        self
    }

    #[must_use]
    pub fn theme(mut self, val: Option<String>) -> Self {
        self.0.theme = Some(val);
        self
    }

    #[must_use]
    pub fn build(self) -> UserUpdate {
        self.0
    }
}
