//! Request authentication wiring per API profile.

use super::js;
use crate::ir::{ApiProfile, AuthType};

/// Header used when an API_KEY_HEADER profile names none.
pub const DEFAULT_HEADER_NAME: &str = "X-API-Key";
/// Query parameter used when an API_KEY_QUERY profile names none.
pub const DEFAULT_QUERY_NAME: &str = "api_key";

/// Statement attaching the profile's secret to the request, if any.
///
/// Header forms operate on a `headers` (`Headers`) local, the query form on
/// a `url` (`URL`) local. The secret is read from `env`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatement {
    Header(String),
    Query(String),
}

pub fn auth_statement(profile: &ApiProfile) -> Option<AuthStatement> {
    let secret = js::member("env", &profile.env_var_key);
    match profile.auth_type {
        AuthType::None => None,
        AuthType::ApiKeyHeader => {
            let name = profile.api_key_name_value().unwrap_or(DEFAULT_HEADER_NAME);
            Some(AuthStatement::Header(format!(
                "headers.set({}, {});",
                js::string_literal(name),
                secret
            )))
        }
        AuthType::BearerToken => Some(AuthStatement::Header(format!(
            "headers.set('Authorization', `Bearer ${{{}}}`);",
            secret
        ))),
        AuthType::ApiKeyQuery => {
            let name = profile.api_key_name_value().unwrap_or(DEFAULT_QUERY_NAME);
            Some(AuthStatement::Query(format!(
                "url.searchParams.set({}, {});",
                js::string_literal(name),
                secret
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(auth_type: AuthType, key_name: Option<&str>) -> ApiProfile {
        ApiProfile {
            id: "p1".into(),
            name: "Weather".into(),
            base_url: "https://api.example.com".into(),
            auth_type,
            api_key: None,
            api_key_name: key_name.map(String::from),
            env_var_key: "BOT_API_KEY_01".into(),
            env_var_url: "BOT_BASE_URL_01".into(),
        }
    }

    #[test]
    fn none_adds_nothing() {
        assert_eq!(auth_statement(&profile(AuthType::None, None)), None);
    }

    #[test]
    fn header_key() {
        assert_eq!(
            auth_statement(&profile(AuthType::ApiKeyHeader, Some("X-Token"))),
            Some(AuthStatement::Header("headers.set('X-Token', env.BOT_API_KEY_01);".into()))
        );
    }

    #[test]
    fn bearer() {
        assert_eq!(
            auth_statement(&profile(AuthType::BearerToken, None)),
            Some(AuthStatement::Header(
                "headers.set('Authorization', `Bearer ${env.BOT_API_KEY_01}`);".into()
            ))
        );
    }

    #[test]
    fn query_key() {
        assert_eq!(
            auth_statement(&profile(AuthType::ApiKeyQuery, Some("appid"))),
            Some(AuthStatement::Query("url.searchParams.set('appid', env.BOT_API_KEY_01);".into()))
        );
    }

    #[test]
    fn missing_key_names_fall_back() {
        assert_eq!(
            auth_statement(&profile(AuthType::ApiKeyHeader, Some(""))),
            Some(AuthStatement::Header("headers.set('X-API-Key', env.BOT_API_KEY_01);".into()))
        );
        assert_eq!(
            auth_statement(&profile(AuthType::ApiKeyQuery, None)),
            Some(AuthStatement::Query("url.searchParams.set('api_key', env.BOT_API_KEY_01);".into()))
        );
    }
}
