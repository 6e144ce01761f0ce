use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutRequest {
    pub refresh_token: String,
}

/// Роль пользователя системы учёта ИТ-активов
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Manager,
    #[default]
    Viewer,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Viewer => "viewer",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Права текущего пользователя, передаваемые в компоненты явно.
///
/// Администратору разрешено всё; остальным: только перечисленные права.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Capability {
    pub current_user_role: UserRole,
    pub permissions: BTreeSet<String>,
}

impl Capability {
    pub fn new(role: UserRole, permissions: impl IntoIterator<Item = String>) -> Self {
        Self {
            current_user_role: role,
            permissions: permissions.into_iter().collect(),
        }
    }

    /// Права администратора
    pub fn admin() -> Self {
        Self::new(UserRole::Admin, std::iter::empty())
    }

    /// Без прав (пользователь не авторизован)
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_admin(&self) -> bool {
        self.current_user_role == UserRole::Admin
    }

    pub fn allows(&self, permission: &str) -> bool {
        self.is_admin() || self.permissions.contains(permission)
    }

    /// Проверка необязательного права: `None` разрешено всем
    pub fn allows_opt(&self, permission: Option<&str>) -> bool {
        permission.map(|p| self.allows(p)).unwrap_or(true)
    }
}

impl From<&UserInfo> for Capability {
    fn from(user: &UserInfo) -> Self {
        Self::new(user.role, user.permissions.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_allows_everything() {
        assert!(Capability::admin().allows("assets.delete"));
    }

    #[test]
    fn test_permissions_are_explicit_for_non_admins() {
        let cap = Capability::new(UserRole::Manager, vec!["assets.create".to_string()]);
        assert!(cap.allows("assets.create"));
        assert!(!cap.allows("assets.delete"));
        assert!(cap.allows_opt(None));
        assert!(!cap.allows_opt(Some("assets.delete")));
    }

    #[test]
    fn test_user_info_without_role_defaults_to_viewer() {
        let user: UserInfo =
            serde_json::from_str(r#"{"id":"1","username":"ivan","full_name":null,"email":null}"#)
                .unwrap();
        let cap = Capability::from(&user);
        assert_eq!(cap.current_user_role, UserRole::Viewer);
        assert!(cap.permissions.is_empty());
    }
}
