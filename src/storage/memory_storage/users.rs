use dashmap::mapref::entry::Entry;

use super::MemoryStorage;
use crate::errors::{EduSprintError, Result};
use crate::models::users::entities::User;

fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

impl MemoryStorage {
    /// 创建用户
    pub(crate) fn create_user_impl(&self, user: User) -> Result<User> {
        match self.user_emails.entry(email_key(&user.email)) {
            Entry::Occupied(_) => Err(EduSprintError::conflict(format!(
                "Email already registered: {}",
                user.email
            ))),
            Entry::Vacant(slot) => {
                slot.insert(user.id.clone());
                self.users.insert(user.id.clone(), user.clone());
                Ok(user)
            }
        }
    }

    /// 通过 ID 获取用户
    pub(crate) fn get_user_by_id_impl(&self, id: &str) -> Result<Option<User>> {
        Ok(self.users.get(id).map(|u| u.value().clone()))
    }

    /// 通过邮箱获取用户
    pub(crate) fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let Some(id) = self.user_emails.get(&email_key(email)).map(|id| id.value().clone()) else {
            return Ok(None);
        };
        self.get_user_by_id_impl(&id)
    }

    /// 更新最后登录时间
    pub(crate) fn update_last_login_impl(&self, id: &str) -> Result<bool> {
        match self.users.get_mut(id) {
            Some(mut user) => {
                user.last_login = Some(chrono::Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;

    fn user(id: &str, email: &str) -> User {
        User {
            id: id.to_string(),
            name: "Alex Chen".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            role: UserRole::Student,
            institution: None,
            last_login: None,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_email_is_unique_ignoring_case() {
        let storage = MemoryStorage::new();
        storage
            .create_user_impl(user("user_1", "student@edusprint.com"))
            .expect("first insert");
        let err = storage
            .create_user_impl(user("user_2", "Student@EduSprint.com"))
            .unwrap_err();
        assert_eq!(err.code(), "E006");
        assert_eq!(storage.users.len(), 1);
    }

    #[test]
    fn test_lookup_by_email_and_login_time() {
        let storage = MemoryStorage::new();
        storage
            .create_user_impl(user("user_1", "student@edusprint.com"))
            .expect("insert");

        let found = storage
            .get_user_by_email_impl("STUDENT@edusprint.com")
            .expect("lookup")
            .expect("present");
        assert_eq!(found.id, "user_1");
        assert!(found.last_login.is_none());

        assert!(storage.update_last_login_impl("user_1").expect("update"));
        assert!(!storage.update_last_login_impl("missing").expect("update"));
        let found = storage
            .get_user_by_id_impl("user_1")
            .expect("lookup")
            .expect("present");
        assert!(found.last_login.is_some());
    }
}
