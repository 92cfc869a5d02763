use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::contract::model::{NewUser, User, UserPatch, UserProperties};

/// REST DTO for user representation with serde/utoipa
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    /// Canonical hyphenated UUID
    pub id: Uuid,
    pub name: String,
    pub role: String,
}

/// REST DTO for creating a new user. Missing fields read as empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateUserReq {
    pub name: String,
    pub role: String,
}

/// REST DTO for updating a user (partial)
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateUserReq {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Query parameters for `GET /users`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    /// Exact, case-sensitive name match
    pub name: Option<String>,
    /// Exact, case-sensitive role match
    pub role: Option<String>,
}

impl ListUsersQuery {
    /// Build from raw query pairs. The first value of a repeated key wins
    /// and unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "name" => &mut query.name,
                "role" => &mut query.role,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }

    /// Empty query values count as absent.
    pub fn into_filter(self) -> UserProperties {
        UserProperties {
            name: self.name.filter(|v| !v.is_empty()),
            role: self.role.filter(|v| !v.is_empty()),
        }
    }
}

// Conversion implementations between REST DTOs and contract models

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            role: user.role,
        }
    }
}

impl From<CreateUserReq> for NewUser {
    fn from(req: CreateUserReq) -> Self {
        Self {
            name: req.name,
            role: req.role,
        }
    }
}

impl From<UpdateUserReq> for UserPatch {
    fn from(req: UpdateUserReq) -> Self {
        Self {
            name: req.name,
            role: req.role,
        }
    }
}
