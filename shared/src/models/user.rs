//! User, role and permission models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::CoreError;

/// A dashboard account. The password hash never leaves the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub department: Department,
    pub avatar: String,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub permissions: Vec<Permission>,
    pub preferences: UserPreferences,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Manager,
    Operator,
    #[default]
    Viewer,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Manager => "manager",
            UserRole::Operator => "operator",
            UserRole::Viewer => "viewer",
        }
    }

    /// Permissions granted to a role
    pub fn default_permissions(&self) -> Vec<Permission> {
        use Permission::*;
        match self {
            UserRole::Admin => Permission::ALL.to_vec(),
            UserRole::Manager => vec![
                ViewDashboard,
                ManageInventory,
                ManageDeliveries,
                ManageSuppliers,
                ManageOrders,
                ViewAnalytics,
            ],
            UserRole::Operator => vec![
                ViewDashboard,
                ManageInventory,
                ManageDeliveries,
                ManageOrders,
            ],
            UserRole::Viewer => vec![ViewDashboard],
        }
    }
}

impl FromStr for UserRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "manager" => Ok(UserRole::Manager),
            "operator" => Ok(UserRole::Operator),
            "viewer" => Ok(UserRole::Viewer),
            other => Err(CoreError::invalid("role", format!("unknown role '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Department {
    Inventory,
    Logistics,
    Procurement,
    Operations,
    Admin,
}

impl Department {
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Inventory => "inventory",
            Department::Logistics => "logistics",
            Department::Procurement => "procurement",
            Department::Operations => "operations",
            Department::Admin => "admin",
        }
    }
}

impl FromStr for Department {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inventory" => Ok(Department::Inventory),
            "logistics" => Ok(Department::Logistics),
            "procurement" => Ok(Department::Procurement),
            "operations" => Ok(Department::Operations),
            "admin" => Ok(Department::Admin),
            other => Err(CoreError::invalid(
                "department",
                format!("unknown department '{}'", other),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewDashboard,
    ManageInventory,
    ManageDeliveries,
    ManageSuppliers,
    ManageOrders,
    ViewAnalytics,
    ManageUsers,
    SystemAdmin,
}

impl Permission {
    pub const ALL: [Permission; 8] = [
        Permission::ViewDashboard,
        Permission::ManageInventory,
        Permission::ManageDeliveries,
        Permission::ManageSuppliers,
        Permission::ManageOrders,
        Permission::ViewAnalytics,
        Permission::ManageUsers,
        Permission::SystemAdmin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ViewDashboard => "view_dashboard",
            Permission::ManageInventory => "manage_inventory",
            Permission::ManageDeliveries => "manage_deliveries",
            Permission::ManageSuppliers => "manage_suppliers",
            Permission::ManageOrders => "manage_orders",
            Permission::ViewAnalytics => "view_analytics",
            Permission::ManageUsers => "manage_users",
            Permission::SystemAdmin => "system_admin",
        }
    }
}

impl FromStr for Permission {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| CoreError::invalid("permission", format!("unknown permission '{}'", s)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserPreferences {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub notifications: NotificationPreferences,
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            language: default_language(),
            notifications: NotificationPreferences::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationPreferences {
    pub email: bool,
    pub push: bool,
    pub sms: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            email: true,
            push: true,
            sms: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_has_everything() {
        let perms = UserRole::Admin.default_permissions();
        assert_eq!(perms.len(), 8);
        assert!(perms.contains(&Permission::SystemAdmin));
    }

    #[test]
    fn test_manager_cannot_manage_users() {
        let perms = UserRole::Manager.default_permissions();
        assert!(!perms.contains(&Permission::ManageUsers));
        assert!(!perms.contains(&Permission::SystemAdmin));
        assert!(perms.contains(&Permission::ViewAnalytics));
    }

    #[test]
    fn test_operator_and_viewer() {
        let operator = UserRole::Operator.default_permissions();
        assert_eq!(operator.len(), 4);
        assert!(!operator.contains(&Permission::ManageSuppliers));
        assert_eq!(UserRole::Viewer.default_permissions(), vec![Permission::ViewDashboard]);
    }

    #[test]
    fn test_permission_names() {
        for permission in Permission::ALL {
            assert_eq!(permission.as_str().parse::<Permission>().unwrap(), permission);
        }
    }

    #[test]
    fn test_default_preferences() {
        let prefs = UserPreferences::default();
        assert_eq!(prefs.theme, Theme::System);
        assert_eq!(prefs.language, "en");
        assert!(!prefs.notifications.sms);
    }
}
