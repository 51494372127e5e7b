use crate::error::{BotError, Result};
use std::collections::HashMap;
use std::fmt;

pub const API_KEY: &str = "API_KEY";
pub const API_SECRET: &str = "API_SECRET";
pub const ACCESS_TOKEN: &str = "ACCESS_TOKEN";
pub const ACCESS_SECRET: &str = "ACCESS_SECRET";
pub const BEARER_TOKEN: &str = "BEARER_TOKEN";

pub const REQUIRED_VARS: [&str; 5] = [
    API_KEY,
    API_SECRET,
    ACCESS_TOKEN,
    ACCESS_SECRET,
    BEARER_TOKEN,
];

/// The five secrets needed to act on behalf of an account
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
    pub access_token: String,
    pub access_secret: String,
    pub bearer_token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("api_secret", &"<redacted>")
            .field("access_token", &"<redacted>")
            .field("access_secret", &"<redacted>")
            .field("bearer_token", &"<redacted>")
            .finish()
    }
}

/// Checks that every required name maps to a non-empty value.
///
/// Fails with [`BotError::MissingCredentials`] naming every absent key, in the
/// order of [`REQUIRED_VARS`].
pub fn validate(values: &HashMap<String, String>) -> Result<Credentials> {
    let missing = REQUIRED_VARS
        .iter()
        .filter(|name| values.get(**name).map_or(true, String::is_empty))
        .map(|name| name.to_string())
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        return Err(BotError::MissingCredentials(missing));
    }
    let get = |name: &str| values[name].clone();
    Ok(Credentials {
        api_key: get(API_KEY),
        api_secret: get(API_SECRET),
        access_token: get(ACCESS_TOKEN),
        access_secret: get(ACCESS_SECRET),
        bearer_token: get(BEARER_TOKEN),
    })
}

/// Merges credential sources, later sources taking precedence.
///
/// Only the required names are picked up, and empty values never shadow a
/// value from an earlier source.
pub fn collect<'a, I>(sources: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = &'a HashMap<String, String>>,
{
    let mut merged = HashMap::new();
    for source in sources {
        for name in REQUIRED_VARS {
            if let Some(value) = source.get(name).filter(|v| !v.is_empty()) {
                merged.insert(name.to_string(), value.clone());
            }
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::hashmap;

    fn full() -> HashMap<String, String> {
        hashmap! {
            API_KEY.to_string() => "key".to_string(),
            API_SECRET.to_string() => "secret".to_string(),
            ACCESS_TOKEN.to_string() => "token".to_string(),
            ACCESS_SECRET.to_string() => "token-secret".to_string(),
            BEARER_TOKEN.to_string() => "bearer".to_string(),
        }
    }

    #[test]
    fn accepts_complete_set() {
        let credentials = validate(&full()).unwrap();
        assert_eq!(credentials.api_key, "key");
        assert_eq!(credentials.access_secret, "token-secret");
        assert_eq!(credentials.bearer_token, "bearer");
    }

    #[test]
    fn names_every_missing_key() {
        let mut values = full();
        values.remove(API_SECRET);
        values.remove(BEARER_TOKEN);
        values.insert(ACCESS_TOKEN.to_string(), "".to_string());
        match validate(&values) {
            Err(BotError::MissingCredentials(missing)) => {
                assert_eq!(missing, vec![API_SECRET, ACCESS_TOKEN, BEARER_TOKEN]);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn whitespace_counts_as_a_value() {
        let mut values = full();
        values.insert(BEARER_TOKEN.to_string(), "  ".to_string());
        assert_eq!(validate(&values).unwrap().bearer_token, "  ");
    }

    #[test]
    fn empty_mapping_names_all_five() {
        match validate(&HashMap::new()) {
            Err(BotError::MissingCredentials(missing)) => assert_eq!(missing, REQUIRED_VARS),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn every_single_missing_key_is_reported() {
        for name in REQUIRED_VARS {
            let mut values = full();
            values.remove(name);
            match validate(&values) {
                Err(BotError::MissingCredentials(missing)) => assert_eq!(missing, vec![name]),
                other => panic!("unexpected result for {}: {:?}", name, other),
            }
        }
    }

    #[test]
    fn later_sources_win_but_empty_values_do_not_clear() {
        let file = full();
        let env = hashmap! {
            API_KEY.to_string() => "env-key".to_string(),
            API_SECRET.to_string() => "".to_string(),
            "UNRELATED".to_string() => "ignored".to_string(),
        };
        let merged = collect([&file, &env]);
        assert_eq!(merged[API_KEY], "env-key");
        assert_eq!(merged[API_SECRET], "secret");
        assert!(!merged.contains_key("UNRELATED"));
    }

    #[test]
    fn debug_output_hides_secrets() {
        let credentials = validate(&full()).unwrap();
        let debug = format!("{:?}", credentials);
        assert!(!debug.contains("token-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
