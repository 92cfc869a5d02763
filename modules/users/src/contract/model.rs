use uuid::Uuid;

/// Pure user model for inter-module communication (no serde/utoipa)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub role: String,
}

impl User {
    /// Build a user with a freshly generated random identifier.
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            role: role.into(),
        }
    }
}

/// Data for creating a new user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub role: String,
}

impl NewUser {
    pub fn into_user(self) -> User {
        User::new(self.name, self.role)
    }
}

/// Partial update data for a user. `None` keeps the stored value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub role: Option<String>,
}

/// Exact-match filter for listings. `None` fields match anything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserProperties {
    pub name: Option<String>,
    pub role: Option<String>,
}

impl UserProperties {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.role.is_none()
    }

    /// Case-sensitive equality on every present field.
    pub fn matches(&self, user: &User) -> bool {
        self.name.as_ref().map_or(true, |name| *name == user.name)
            && self.role.as_ref().map_or(true, |role| *role == user.role)
    }
}
