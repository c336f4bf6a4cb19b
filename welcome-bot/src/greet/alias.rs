//! Alias resolution: turn a user id into a mention or display name.

use std::fmt;

use tracing::{info, warn};

use crate::pachca::{ChatApi, UserProfile};

/// Placeholder used when no name can be resolved.
pub const FALLBACK_ALIAS: &str = "коллега";

/// Outcome of an alias lookup. Lookup failures end up as [`Alias::Fallback`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alias {
    Resolved(String),
    Fallback,
}

impl Alias {
    pub fn as_str(&self) -> &str {
        match self {
            Alias::Resolved(alias) => alias,
            Alias::Fallback => FALLBACK_ALIAS,
        }
    }

    /// Derive an alias from a profile: `@nickname`, then `first last`.
    pub fn from_profile(profile: &UserProfile) -> Self {
        let nickname = profile.nickname.as_deref().unwrap_or_default().trim();
        if !nickname.is_empty() {
            return Alias::Resolved(format!("@{}", nickname));
        }

        let name = [profile.first_name.as_deref(), profile.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let name = name.trim();

        if name.is_empty() {
            Alias::Fallback
        } else {
            Alias::Resolved(name.to_string())
        }
    }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Look up a user and derive their alias.
///
/// The lookup is best effort: transport errors, non-2xx responses and
/// undecodable profiles all turn into [`Alias::Fallback`] after a `warn!`.
///
/// # Arguments
///
/// * `api` - Chat platform client used for `GET /users/{id}`
/// * `user_id` - Id of the user being greeted
///
/// # Returns
///
/// `@nickname`, `first last`, or [`Alias::Fallback`]; never an error.
pub async fn resolve_alias(api: &dyn ChatApi, user_id: u64) -> Alias {
    match api.get_user(user_id).await {
        Ok(profile) => {
            let alias = Alias::from_profile(&profile);
            info!(
                user_id = user_id,
                resolved = matches!(alias, Alias::Resolved(_)),
                "alias_resolved"
            );
            alias
        }
        Err(e) => {
            warn!(user_id = user_id, error = %e, "alias_lookup_failed");
            Alias::Fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::pachca::fake::{profile, FakeChatApi};
    use crate::pachca::PachcaClient;
    use url::Url;

    #[test]
    fn test_nickname_wins() {
        let alias = Alias::from_profile(&profile(Some("ivan"), Some("Ivan"), Some("Petrov")));
        assert_eq!(alias, Alias::Resolved("@ivan".to_string()));
    }

    #[test]
    fn test_nickname_is_trimmed() {
        let alias = Alias::from_profile(&profile(Some("  ivan "), None, None));
        assert_eq!(alias.as_str(), "@ivan");
    }

    #[test]
    fn test_blank_nickname_falls_through_to_name() {
        let alias = Alias::from_profile(&profile(Some("   "), Some("Ivan"), Some("Petrov")));
        assert_eq!(alias.as_str(), "Ivan Petrov");
    }

    #[test]
    fn test_partial_name() {
        assert_eq!(
            Alias::from_profile(&profile(None, Some("Ivan"), None)).as_str(),
            "Ivan"
        );
        assert_eq!(
            Alias::from_profile(&profile(None, Some(""), Some("Petrov"))).as_str(),
            "Petrov"
        );
    }

    #[test]
    fn test_empty_profile_is_fallback() {
        let alias = Alias::from_profile(&UserProfile::default());
        assert_eq!(alias, Alias::Fallback);
        assert_eq!(alias.to_string(), "коллега");
    }

    #[tokio::test]
    async fn test_resolve_alias_success() {
        let api = FakeChatApi::new().with_user(7, profile(Some("ivan"), None, None));

        let alias = resolve_alias(&api, 7).await;

        assert_eq!(alias.as_str(), "@ivan");
        assert_eq!(api.lookups(), vec![7]);
    }

    #[tokio::test]
    async fn test_resolve_alias_network_error() {
        // Bind then drop a listener so the port refuses connections
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let base = Url::parse(&format!("http://{}/api/shared/v1", addr)).unwrap();
        let client = PachcaClient::new(&base, "token").unwrap();

        assert!(matches!(client.get_user(7).await, Err(ApiError::Http(_))));

        let alias = resolve_alias(&client, 7).await;

        assert_eq!(alias, Alias::Fallback);
        assert_eq!(alias.as_str(), "коллега");
    }

    #[tokio::test]
    async fn test_resolve_alias_lookup_failure() {
        let api = FakeChatApi::new();

        let alias = resolve_alias(&api, 99).await;

        assert_eq!(alias, Alias::Fallback);
        assert_eq!(alias.as_str(), FALLBACK_ALIAS);
    }
}
