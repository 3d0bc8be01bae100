use serde::{Deserialize, Serialize};

/// Introspection result for the current access token
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenInfo {
    /// Granted scopes, space separated
    #[serde(default)]
    pub scope: Option<String>,

    /// Seconds until expiry
    #[serde(default)]
    pub expires_in: Option<i64>,

    /// OAuth client the token was issued to
    #[serde(default)]
    pub client_id: Option<String>,

    /// Owning user
    #[serde(default)]
    pub user_id: Option<String>,
}

impl TokenInfo {
    /// Iterate over granted scopes
    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.scope
            .as_deref()
            .unwrap_or_default()
            .split([' ', ','])
            .filter(|s| !s.is_empty())
    }
}
