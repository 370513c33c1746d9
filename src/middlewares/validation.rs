use axum::{
    extract::{FromRequest, Request},
    http::Method,
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

use crate::error::{AppError, AppResult};
use crate::models::canonical_choice;

/// A key whose value must be one of a fixed set of options
#[derive(Debug)]
pub struct Choice {
    pub key: &'static str,
    pub options: &'static [&'static str],
    /// Message returned when the value is not an option
    pub message: &'static str,
}

/// Declarative validation rules for one request body.
///
/// `POST` bodies must carry every `required` key; `PATCH` bodies must carry
/// at least one of the allowed keys. Keys outside `required` and `optional`
/// are rejected, as are `forbidden` ones.
#[derive(Debug)]
pub struct BodyPolicy {
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
    pub forbidden: &'static [&'static str],
    /// Keys normalized into `YYYY-MM-DD`
    pub dates: &'static [&'static str],
    pub choices: &'static [Choice],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Every required key must be present
    Full,
    /// At least one allowed key must be present
    Partial,
}

impl Mode {
    pub fn for_method(method: &Method) -> Self {
        if method == Method::PATCH {
            Mode::Partial
        } else {
            Mode::Full
        }
    }
}

impl BodyPolicy {
    pub fn allowed_keys(&self) -> Vec<&'static str> {
        self.required.iter().chain(self.optional).copied().collect()
    }

    fn allows(&self, key: &str) -> bool {
        self.required
            .iter()
            .chain(self.optional)
            .any(|allowed| *allowed == key)
    }

    /// Check the body against the policy and return it normalized
    pub fn apply(&self, mode: Mode, body: Value) -> AppResult<Map<String, Value>> {
        let Value::Object(mut body) = body else {
            return Err(AppError::Validation(
                "Request body must be a JSON object.".to_string(),
            ));
        };

        if let Some(key) = self.forbidden.iter().find(|key| body.contains_key(**key)) {
            return Err(AppError::Validation(format!("Cannot update '{key}' field.")));
        }

        if body.keys().any(|key| !self.allows(key)) {
            return Err(AppError::InvalidKeys {
                message: "Invalid keys.".to_string(),
                keys: self.allowed_keys(),
            });
        }

        match mode {
            Mode::Full => {
                if let Some(key) = self.required.iter().find(|key| is_blank(body.get(**key))) {
                    return Err(AppError::InvalidKeys {
                        message: format!("Missing required keys: {key}."),
                        keys: self.required.to_vec(),
                    });
                }
            }
            Mode::Partial => {
                if body.is_empty() {
                    return Err(AppError::InvalidKeys {
                        message: "At least one of those keys must be sent.".to_string(),
                        keys: self.allowed_keys(),
                    });
                }
                // Only optional keys are nullable, and a sent required key
                // must carry a value just as on create
                for key in self.required {
                    match body.get(*key) {
                        Some(Value::Null) => {
                            return Err(AppError::Validation(format!(
                                "Key '{key}' cannot be null."
                            )));
                        }
                        value @ Some(_) if is_blank(value) => {
                            return Err(AppError::Validation(format!(
                                "Key '{key}' cannot be empty."
                            )));
                        }
                        _ => {}
                    }
                }
            }
        }

        for key in self.dates {
            if let Some(value) = body.get_mut(*key) {
                if !value.is_null() {
                    let date = normalize_date(key, value)?;
                    *value = Value::String(date);
                }
            }
        }

        for choice in self.choices {
            if let Some(value) = body.get_mut(choice.key) {
                let canonical = value
                    .as_str()
                    .and_then(|raw| canonical_choice(choice.options, raw))
                    .ok_or_else(|| AppError::InvalidOption {
                        message: choice.message.to_string(),
                        options: choice.options,
                    })?;
                *value = Value::String(canonical.to_string());
            }
        }

        Ok(body)
    }
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// Accepts `YYYY-MM-DD`, an RFC 3339 timestamp or a local `YYYY-MM-DDTHH:MM:SS`
/// and keeps the calendar date.
fn normalize_date(key: &str, value: &Value) -> AppResult<String> {
    let invalid = || AppError::Validation(format!("Invalid date for key: {key}."));
    let raw = value.as_str().ok_or_else(invalid)?.trim();

    let date = Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .or_else(|_| OffsetDateTime::parse(raw, &Rfc3339).map(|dt| dt.date()))
        .or_else(|_| {
            PrimitiveDateTime::parse(
                raw,
                format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
            )
            .map(|dt| dt.date())
        })
        .map_err(|_| invalid())?;

    Ok(format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    ))
}

/// A request body that carries its own validation policy
pub trait ValidatedBody: DeserializeOwned {
    const POLICY: BodyPolicy;
}

/// Extractor that validates and normalizes the JSON body against
/// `T::POLICY` for the request's method before deserializing it.
///
/// Example: `async fn handler(Valid(body): Valid<CreateDeveloperRequest>) -> ... { }`
#[derive(Debug)]
pub struct Valid<T>(pub T);

impl<S, T> FromRequest<S> for Valid<T>
where
    S: Send + Sync,
    T: ValidatedBody,
{
    type Rejection = AppError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mode = Mode::for_method(request.method());

        let Json(value) = Json::<Value>::from_request(request, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;

        let body = T::POLICY.apply(mode, value)?;

        serde_json::from_value(Value::Object(body))
            .map(Valid)
            .map_err(|e| AppError::Validation(format!("Invalid request body: {e}.")))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const OPTIONS: &[&str] = &["Windows", "Linux", "MacOS"];

    const POLICY: BodyPolicy = BodyPolicy {
        required: &["name", "startDate", "preferredOS"],
        optional: &["endDate"],
        forbidden: &["id"],
        dates: &["startDate", "endDate"],
        choices: &[Choice {
            key: "preferredOS",
            options: OPTIONS,
            message: "Invalid OS option.",
        }],
    };

    fn full() -> Value {
        json!({ "name": "P1", "startDate": "2023-01-01", "preferredOS": "Linux" })
    }

    #[test]
    fn test_full_body_passes() {
        let body = POLICY.apply(Mode::Full, full()).unwrap();
        assert_eq!(body["name"], "P1");
        assert_eq!(body["startDate"], "2023-01-01");
    }

    #[test]
    fn test_rejects_non_object() {
        let err = POLICY.apply(Mode::Full, json!([1, 2])).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_rejects_unknown_key_with_allowed_keys() {
        let mut body = full();
        body["color"] = json!("red");

        match POLICY.apply(Mode::Full, body).unwrap_err() {
            AppError::InvalidKeys { keys, .. } => {
                assert_eq!(keys, vec!["name", "startDate", "preferredOS", "endDate"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_forbidden_id() {
        let err = POLICY
            .apply(Mode::Partial, json!({ "id": 3, "name": "x" }))
            .unwrap_err();
        assert_eq!(err.to_string(), "Cannot update 'id' field.");
    }

    #[test]
    fn test_post_reports_first_missing_key() {
        let err = POLICY
            .apply(Mode::Full, json!({ "name": "P1", "preferredOS": "Linux" }))
            .unwrap_err();
        assert_eq!(err.to_string(), "Missing required keys: startDate.");
    }

    #[test]
    fn test_post_treats_empty_string_as_missing() {
        let mut body = full();
        body["name"] = json!("  ");
        let err = POLICY.apply(Mode::Full, body).unwrap_err();
        assert_eq!(err.to_string(), "Missing required keys: name.");
    }

    #[test]
    fn test_patch_needs_at_least_one_key() {
        let err = POLICY.apply(Mode::Partial, json!({})).unwrap_err();
        assert!(matches!(err, AppError::InvalidKeys { .. }));

        let body = POLICY.apply(Mode::Partial, json!({ "name": "P2" })).unwrap();
        assert_eq!(body.len(), 1);
    }

    #[test]
    fn test_patch_allows_null_only_for_optional_keys() {
        assert!(POLICY
            .apply(Mode::Partial, json!({ "endDate": null }))
            .is_ok());

        let err = POLICY
            .apply(Mode::Partial, json!({ "name": null }))
            .unwrap_err();
        assert_eq!(err.to_string(), "Key 'name' cannot be null.");
    }

    #[test]
    fn test_patch_rejects_blank_required_value() {
        let err = POLICY
            .apply(Mode::Partial, json!({ "name": "  " }))
            .unwrap_err();
        assert_eq!(err.to_string(), "Key 'name' cannot be empty.");

        let err = POLICY
            .apply(Mode::Partial, json!({ "endDate": "2023-01-01", "preferredOS": "" }))
            .unwrap_err();
        assert_eq!(err.to_string(), "Key 'preferredOS' cannot be empty.");
    }

    #[test]
    fn test_dates_are_normalized() {
        let mut body = full();
        body["startDate"] = json!("2023-03-05T10:20:30Z");
        body["endDate"] = json!("2023-06-01T08:00:00");

        let body = POLICY.apply(Mode::Full, body).unwrap();
        assert_eq!(body["startDate"], "2023-03-05");
        assert_eq!(body["endDate"], "2023-06-01");
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let mut body = full();
        body["startDate"] = json!("yesterday");
        let err = POLICY.apply(Mode::Full, body).unwrap_err();
        assert_eq!(err.to_string(), "Invalid date for key: startDate.");
    }

    #[test]
    fn test_choice_is_canonicalized() {
        let mut body = full();
        body["preferredOS"] = json!("macos");
        let body = POLICY.apply(Mode::Full, body).unwrap();
        assert_eq!(body["preferredOS"], "MacOS");
    }

    #[test]
    fn test_choice_mismatch_lists_options() {
        let mut body = full();
        body["preferredOS"] = json!("Solaris");

        match POLICY.apply(Mode::Full, body).unwrap_err() {
            AppError::InvalidOption { message, options } => {
                assert_eq!(message, "Invalid OS option.");
                assert_eq!(options, OPTIONS);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_mode_follows_method() {
        assert_eq!(Mode::for_method(&Method::POST), Mode::Full);
        assert_eq!(Mode::for_method(&Method::PATCH), Mode::Partial);
    }
}
