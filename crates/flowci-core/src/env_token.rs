use thiserror::Error;

/// Separator between name and value inside an encoded token. Existing cached
/// data uses this exact sequence, so it must never change.
pub const SEPARATOR: &str = "===";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvTokenError {
    #[error("environment variable name must not be empty")]
    EmptyName,
    #[error("environment variable name '{name}' must not contain '==='")]
    NameContainsSeparator { name: String },
    #[error("environment token '{token}' is missing the '===' separator")]
    MissingSeparator { token: String },
}

pub fn validate_name(name: &str) -> Result<(), EnvTokenError> {
    if name.is_empty() {
        return Err(EnvTokenError::EmptyName);
    }

    if name.contains(SEPARATOR) {
        return Err(EnvTokenError::NameContainsSeparator {
            name: name.to_string(),
        });
    }

    Ok(())
}

/// Joins a name and value into token form without validating. Callers that
/// already hold a validated or previously-decoded name use this to keep the
/// round-trip byte-faithful.
pub fn join(name: &str, value: &str) -> String {
    format!("{name}{SEPARATOR}{value}")
}

/// Encodes a name/value pair into a single token. The value may contain the
/// separator; the name may not, so decoding stays unambiguous.
pub fn encode(name: &str, value: &str) -> Result<String, EnvTokenError> {
    validate_name(name)?;
    Ok(join(name, value))
}

/// Decodes a token by splitting on the first occurrence of the separator
/// only. This rule matches existing encoded data exactly.
pub fn decode(token: &str) -> Result<(String, String), EnvTokenError> {
    let Some((name, value)) = token.split_once(SEPARATOR) else {
        return Err(EnvTokenError::MissingSeparator {
            token: token.to_string(),
        });
    };

    Ok((name.to_string(), value.to_string()))
}
