use serde::{Deserialize, Serialize};

use crate::{Result, ZohError};

/// The `status` block every Zoho response carries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseStatus {
    /// Status code echoed inside the body (200 on success)
    #[serde(default)]
    pub code: u16,

    /// Human readable description
    #[serde(default)]
    pub description: String,
}

impl ResponseStatus {
    /// Returns true if the envelope reports success
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.code == 200
    }
}

/// Standard `{ "status": ..., "data": ... }` response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Outcome reported by the API
    pub status: ResponseStatus,

    /// Payload; error envelopes may omit it
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Unwrap the payload, turning a failed status into an error
    pub fn into_data(self) -> Result<T> {
        if !self.status.is_success() {
            return Err(ZohError::Envelope {
                code: self.status.code,
                description: self.status.description,
            });
        }
        self.data
            .ok_or_else(|| ZohError::Internal("successful response carried no data".into()))
    }
}

/// Response wrapper for endpoints that only report a status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusOnly {
    /// Outcome reported by the API
    pub status: ResponseStatus,
}

impl StatusOnly {
    /// Turn a failed status into an error
    pub fn into_result(self) -> Result<()> {
        if self.status.is_success() {
            Ok(())
        } else {
            Err(ZohError::Envelope {
                code: self.status.code,
                description: self.status.description,
            })
        }
    }
}

/// Extra detail attached to an error response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorDetail {
    /// Machine readable error code (e.g. `INVALID_OAUTHTOKEN`)
    #[serde(default)]
    pub error_code: Option<String>,

    /// Free-form explanation
    #[serde(default)]
    pub more_info: Option<String>,
}

/// Body of a non-2xx response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Outcome reported by the API
    pub status: ResponseStatus,

    /// Optional detail block
    #[serde(default)]
    pub data: Option<ApiErrorDetail>,
}

impl ApiErrorBody {
    /// Render the most specific message available
    #[must_use]
    pub fn message(&self) -> String {
        let detail = self.data.as_ref();
        let code = detail.and_then(|d| d.error_code.as_deref());
        let info = detail.and_then(|d| d.more_info.as_deref());

        match (code, info) {
            (Some(code), Some(info)) => format!("{}: {code} ({info})", self.status.description),
            (Some(code), None) => format!("{}: {code}", self.status.description),
            (None, Some(info)) => format!("{}: {info}", self.status.description),
            (None, None) => self.status.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_success() {
        let env: Envelope<Vec<u32>> =
            serde_json::from_str(r#"{"status":{"code":200,"description":"success"},"data":[1,2]}"#)
                .unwrap();
        assert_eq!(env.into_data().unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_envelope_failure() {
        let env: Envelope<Vec<u32>> =
            serde_json::from_str(r#"{"status":{"code":500,"description":"broken"},"data":[]}"#)
                .unwrap();
        match env.into_data() {
            Err(ZohError::Envelope { code, description }) => {
                assert_eq!(code, 500);
                assert_eq!(description, "broken");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_envelope_payload_needs_no_default() {
        #[derive(Debug, Deserialize)]
        struct Account {
            id: u32,
        }

        let env: Envelope<Account> =
            serde_json::from_str(r#"{"status":{"code":200,"description":"ok"},"data":{"id":7}}"#)
                .unwrap();
        assert_eq!(env.into_data().unwrap().id, 7);

        let missing: Envelope<Account> =
            serde_json::from_str(r#"{"status":{"code":200,"description":"ok"}}"#).unwrap();
        assert!(matches!(missing.into_data(), Err(ZohError::Internal(_))));
    }

    #[test]
    fn test_envelope_failure_without_data() {
        let env: Envelope<Vec<u32>> =
            serde_json::from_str(r#"{"status":{"code":400,"description":"bad"}}"#).unwrap();
        assert!(matches!(env.into_data(), Err(ZohError::Envelope { code: 400, .. })));
    }

    #[test]
    fn test_error_body_message() {
        let body: ApiErrorBody = serde_json::from_str(
            r#"{"status":{"code":404,"description":"Invalid Input"},
                "data":{"errorCode":"URL_RULE_NOT_CONFIGURED","moreInfo":"no such user"}}"#,
        )
        .unwrap();
        assert_eq!(
            body.message(),
            "Invalid Input: URL_RULE_NOT_CONFIGURED (no such user)"
        );

        let bare: ApiErrorBody =
            serde_json::from_str(r#"{"status":{"code":401,"description":"Unauthorized"}}"#)
                .unwrap();
        assert_eq!(bare.message(), "Unauthorized");
    }
}
