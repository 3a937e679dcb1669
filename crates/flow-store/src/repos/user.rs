//! User repository.

use chrono::Utc;
use flow_core::entities::User;
use flow_core::enums::{EntityType, TrailOp, UserRole};
use flow_core::ids::{PREFIX_USER, generate_id};

use crate::collection::Repository;
use crate::error::StoreError;
use crate::service::FlowService;
use crate::updates::user::UserUpdate;

impl FlowService {
    fn ensure_username_free(&self, username: &str, except_id: Option<&str>) -> Result<(), StoreError> {
        let taken = self.users.list()?.iter().any(|u| {
            u.username.eq_ignore_ascii_case(username) && except_id.is_none_or(|id| u.id != id)
        });
        if taken {
            return Err(StoreError::validation(format!(
                "username '{username}' is already taken"
            )));
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Validation for a blank or taken username (case-insensitive).
    pub fn create_user(
        &self,
        username: &str,
        role: UserRole,
        is_admin: bool,
    ) -> Result<User, StoreError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(StoreError::validation("username is required"));
        }
        self.ensure_username_free(username, None)?;

        let user = User {
            id: generate_id(PREFIX_USER)?,
            username: username.to_string(),
            role,
            is_admin: is_admin || role == UserRole::Admin,
            theme: None,
            last_login: None,
            total_usage_time: 0,
        };
        self.users.save(&user)?;
        self.record(TrailOp::Create, EntityType::User, &user.id, &user)?;
        tracing::info!(id = %user.id, username = %user.username, role = %user.role, "user created");
        Ok(user)
    }

    /// # Errors
    ///
    /// `NotFound` when no user has this id.
    pub fn get_user(&self, id: &str) -> Result<User, StoreError> {
        self.users
            .get(id)?
            .ok_or_else(|| StoreError::not_found("user", id))
    }

    /// Look a user up by id, falling back to a case-insensitive username match.
    ///
    /// # Errors
    ///
    /// `NotFound` when neither matches.
    pub fn find_user(&self, id_or_name: &str) -> Result<User, StoreError> {
        let users = self.users.list()?;
        users
            .iter()
            .find(|u| u.id == id_or_name)
            .or_else(|| users.iter().find(|u| u.username.eq_ignore_ascii_case(id_or_name)))
            .cloned()
            .ok_or_else(|| StoreError::not_found("user", id_or_name))
    }

    /// # Errors
    ///
    /// Storage failure.
    pub fn list_users(&self) -> Result<Vec<User>, StoreError> {
        self.users.list()
    }

    /// Apply `update`. A renamed user is also renamed on every audit they
    /// are assigned to.
    ///
    /// # Errors
    ///
    /// `NotFound`, or validation for a blank or taken username.
    pub fn update_user(&self, id: &str, update: &UserUpdate) -> Result<User, StoreError> {
        let mut user = self.get_user(id)?;
        if let Some(username) = &update.username {
            let username = username.trim();
            if username.is_empty() {
                return Err(StoreError::validation("username is required"));
            }
            self.ensure_username_free(username, Some(id))?;
            user.username = username.to_string();
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        if let Some(is_admin) = update.is_admin {
            user.is_admin = is_admin;
        }
        if let Some(theme) = &update.theme {
            user.theme.clone_from(theme);
        }
        self.users.save(&user)?;

        if update.username.is_some() {
            let mut audits = self.audits.list()?;
            let mut touched = false;
            for assigned in audits
                .iter_mut()
                .flat_map(|a| a.assigned_users.iter_mut())
                .filter(|au| au.id == id)
            {
                assigned.username.clone_from(&user.username);
                touched = true;
            }
            if touched {
                self.audits.replace_all(&audits)?;
            }
        }

        self.record(TrailOp::Update, EntityType::User, id, update)?;
        Ok(user)
    }

    /// Delete a user and remove them from every audit assignment.
    ///
    /// # Errors
    ///
    /// `NotFound` when no user has this id.
    pub fn delete_user(&self, id: &str) -> Result<(), StoreError> {
        if !self.users.delete(id)? {
            return Err(StoreError::not_found("user", id));
        }
        let mut audits = self.audits.list()?;
        let unassigned = audits
            .iter_mut()
            .map(|a| a.unassign(id))
            .filter(|removed| *removed)
            .count();
        if unassigned > 0 {
            self.audits.replace_all(&audits)?;
        }
        if self.current_user_id()?.as_deref() == Some(id) {
            self.clear_current_user()?;
        }
        self.record(TrailOp::Delete, EntityType::User, id, id)?;
        tracing::info!(id, unassigned, "user deleted");
        Ok(())
    }

    /// Stamp the login time and make the user current.
    ///
    /// # Errors
    ///
    /// `NotFound` when no user has this id.
    pub fn record_login(&self, id: &str) -> Result<User, StoreError> {
        let mut user = self.get_user(id)?;
        user.last_login = Some(Utc::now());
        self.users.save(&user)?;
        self.set_current_user(&user.id)?;
        self.record(TrailOp::Update, EntityType::User, id, &user.last_login)?;
        Ok(user)
    }

    /// Add `seconds` to the user's accumulated usage time.
    ///
    /// # Errors
    ///
    /// `NotFound` when no user has this id.
    pub fn add_usage(&self, id: &str, seconds: u64) -> Result<User, StoreError> {
        let mut user = self.get_user(id)?;
        user.total_usage_time = user.total_usage_time.saturating_add(seconds);
        self.users.save(&user)?;
        self.record(
            TrailOp::Update,
            EntityType::User,
            id,
            &user.total_usage_time,
        )?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::helpers::{create_user, d, new_audit, test_service};
    use crate::updates::user::UserUpdateBuilder;

    #[test]
    fn usernames_are_unique_ignoring_case() {
        let svc = test_service();
        create_user(&svc, "Kim", UserRole::Auditor);
        let err = svc.create_user("kim", UserRole::General, false).unwrap_err();
        assert!(err.to_string().contains("already taken"));
        assert!(svc.create_user("  ", UserRole::General, false).is_err());
    }

    #[test]
    fn admin_role_implies_admin_flag() {
        let svc = test_service();
        let user = svc.create_user("root", UserRole::Admin, false).unwrap();
        assert!(user.is_admin);
    }

    #[test]
    fn find_by_id_or_name() {
        let svc = test_service();
        let kim = create_user(&svc, "kim", UserRole::Auditor);
        assert_eq!(svc.find_user(&kim.id).unwrap(), kim);
        assert_eq!(svc.find_user("KIM").unwrap(), kim);
        assert!(svc.find_user("nobody").unwrap_err().is_not_found());
    }

    #[test]
    fn rename_follows_assignments() {
        let svc = test_service();
        let kim = create_user(&svc, "kim", UserRole::Auditor);
        let audit = svc.create_audit(new_audit("A", "product"), d("2025-01-15")).unwrap();
        svc.assign_user(&audit.reference, &kim.id, false).unwrap();

        let update = UserUpdateBuilder::new().username("kimberly").build();
        svc.update_user(&kim.id, &update).unwrap();
        let audit = svc.get_audit(&audit.reference).unwrap();
        assert_eq!(audit.assigned_users[0].username, "kimberly");
    }

    #[test]
    fn delete_removes_assignments_and_session() {
        let svc = test_service();
        let kim = create_user(&svc, "kim", UserRole::LeadAuditor);
        let audit = svc.create_audit(new_audit("A", "product"), d("2025-01-15")).unwrap();
        svc.assign_user(&audit.reference, &kim.id, true).unwrap();
        svc.record_login(&kim.id).unwrap();

        svc.delete_user(&kim.id).unwrap();
        assert!(svc.get_audit(&audit.reference).unwrap().assigned_users.is_empty());
        assert_eq!(svc.current_user().unwrap(), None);
    }

    #[test]
    fn login_and_usage_accumulate() {
        let svc = test_service();
        let kim = create_user(&svc, "kim", UserRole::Auditor);
        let kim = svc.record_login(&kim.id).unwrap();
        assert!(kim.last_login.is_some());
        svc.add_usage(&kim.id, 90).unwrap();
        let kim = svc.add_usage(&kim.id, 30).unwrap();
        assert_eq!(kim.total_usage_time, 120);
        assert_eq!(svc.current_user().unwrap().map(|u| u.id), Some(kim.id));
    }
}
