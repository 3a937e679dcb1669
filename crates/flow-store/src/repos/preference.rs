//! UI preferences: theme and the current user.

use flow_core::entities::User;
use flow_core::enums::{EntityType, TrailOp};

use crate::collection::{load_json, save_json};
use crate::error::StoreError;
use crate::keys;
use crate::service::FlowService;

impl FlowService {
    /// # Errors
    ///
    /// Storage failure.
    pub fn theme(&self) -> Result<Option<String>, StoreError> {
        load_json(self.store(), keys::THEME)
    }

    /// # Errors
    ///
    /// Validation for a blank theme name.
    pub fn set_theme(&self, theme: &str) -> Result<(), StoreError> {
        let theme = theme.trim();
        if theme.is_empty() {
            return Err(StoreError::validation("theme name is required"));
        }
        save_json(self.store(), keys::THEME, theme)?;
        self.record(TrailOp::Update, EntityType::Preference, keys::THEME, theme)
    }

    pub(crate) fn current_user_id(&self) -> Result<Option<String>, StoreError> {
        load_json(self.store(), keys::CURRENT_USER)
    }

    /// The signed-in user. A stale id (user since deleted) reads as `None`.
    ///
    /// # Errors
    ///
    /// Storage failure.
    pub fn current_user(&self) -> Result<Option<User>, StoreError> {
        match self.current_user_id()? {
            Some(id) => match self.get_user(&id) {
                Ok(user) => Ok(Some(user)),
                Err(e) if e.is_not_found() => Ok(None),
                Err(e) => Err(e),
            },
            None => Ok(None),
        }
    }

    /// # Errors
    ///
    /// `NotFound` for an unknown user.
    pub fn set_current_user(&self, id: &str) -> Result<(), StoreError> {
        self.get_user(id)?;
        save_json(self.store(), keys::CURRENT_USER, id)?;
        self.record(TrailOp::Update, EntityType::Preference, keys::CURRENT_USER, id)
    }

    /// # Errors
    ///
    /// Storage failure.
    pub fn clear_current_user(&self) -> Result<(), StoreError> {
        if self.store().remove(keys::CURRENT_USER)? {
            self.record(
                TrailOp::Delete,
                EntityType::Preference,
                keys::CURRENT_USER,
                keys::CURRENT_USER,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use flow_core::enums::UserRole;
    use pretty_assertions::assert_eq;

    use crate::test_support::helpers::{create_user, test_service};

    #[test]
    fn theme_round_trips() {
        let svc = test_service();
        assert_eq!(svc.theme().unwrap(), None);
        svc.set_theme("dark").unwrap();
        assert_eq!(svc.theme().unwrap().as_deref(), Some("dark"));
        assert!(svc.set_theme(" ").is_err());
    }

    #[test]
    fn current_user_must_exist() {
        let svc = test_service();
        assert!(svc.set_current_user("usr-missing").is_err());
        let kim = create_user(&svc, "kim", UserRole::Auditor);
        svc.set_current_user(&kim.id).unwrap();
        assert_eq!(svc.current_user().unwrap(), Some(kim));
        svc.clear_current_user().unwrap();
        assert_eq!(svc.current_user().unwrap(), None);
    }
}
