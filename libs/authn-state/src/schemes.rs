//! Authentication scheme labels.

use serde::{Deserialize, Serialize};

/// Scheme label for end-user authentication.
pub const USER_SCHEME: &str = "JWT";

/// Scheme label for registered-client authentication.
pub const CLIENT_SCHEME: &str = "Bearer";

/// The two supported authentication schemes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthenticationSchemes {
    /// Label of the end-user scheme.
    pub user: String,
    /// Label of the registered-client scheme.
    pub client: String,
}

impl Default for AuthenticationSchemes {
    fn default() -> Self {
        Self {
            user: USER_SCHEME.to_owned(),
            client: CLIENT_SCHEME.to_owned(),
        }
    }
}

impl AuthenticationSchemes {
    #[must_use]
    pub fn new(user: impl Into<String>, client: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            client: client.into(),
        }
    }

    /// Both labels, user scheme first.
    #[must_use]
    pub fn names(&self) -> [&str; 2] {
        [self.user.as_str(), self.client.as_str()]
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        vec![self.user.clone(), self.client.clone()]
    }

    #[must_use]
    pub fn contains(&self, scheme: &str) -> bool {
        self.names().contains(&scheme)
    }
}
