use secrecy::SecretString;

/// Connection settings for the identity service and the database.
#[derive(Clone)]
pub struct GlobalArgs {
    /// Base URL of the Identity Toolkit API.
    pub auth_url: String,
    /// Project API key sent with every identity request.
    pub api_key: SecretString,
    /// Base URL of the Realtime Database holding user records.
    pub database_url: String,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(auth_url: String, api_key: SecretString, database_url: String) -> Self {
        Self {
            auth_url,
            api_key,
            database_url,
        }
    }
}

impl std::fmt::Debug for GlobalArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalArgs")
            .field("auth_url", &self.auth_url)
            .field("api_key", &"***")
            .field("database_url", &self.database_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::new(
            "https://identitytoolkit.googleapis.com".to_string(),
            SecretString::from("api-key".to_string()),
            "https://demo.firebaseio.com".to_string(),
        );
        assert_eq!(args.auth_url, "https://identitytoolkit.googleapis.com");
        assert_eq!(args.api_key.expose_secret(), "api-key");
        assert_eq!(args.database_url, "https://demo.firebaseio.com");
    }

    #[test]
    fn test_debug_hides_api_key() {
        let args = GlobalArgs::new(
            "https://identitytoolkit.googleapis.com".to_string(),
            SecretString::from("api-key".to_string()),
            "https://demo.firebaseio.com".to_string(),
        );
        let debug = format!("{args:?}");
        assert!(!debug.contains("api-key"));
        assert!(debug.contains("***"));
    }
}
