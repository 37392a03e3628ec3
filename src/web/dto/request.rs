//! Request DTOs for the HTTP API.
//!
//! Every field is optional so that handlers can report the first missing
//! one with the exact message clients expect. Fields are read leniently:
//! a value of the wrong JSON type is coerced rather than rejected, so it
//! can never hide a well-formed sibling field.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::file::CreateFileRequest;

/// Read a field as text. Strings pass through, numbers and `true` are
/// stringified, `null` and `false` count as absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Read a field as a flag by truthiness: `0`, `""` and `false` are false.
fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::Bool(b)) => Some(b),
        Some(Value::Number(n)) => Some(n.as_f64().is_some_and(|f| f != 0.0)),
        Some(Value::String(s)) => Some(!s.is_empty()),
        Some(_) => Some(true),
    })
}

/// User registration request.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Login email.
    #[serde(default, deserialize_with = "lenient_text")]
    #[schema(example = "bob@dylan.com")]
    pub email: Option<String>,
    /// Plain-text password.
    #[serde(default, deserialize_with = "lenient_text")]
    #[schema(example = "toto1234!")]
    pub password: Option<String>,
}

/// File or folder creation request.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFileBody {
    /// Display name.
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    /// `file`, `folder` or `image`.
    #[serde(rename = "type", default, deserialize_with = "lenient_text")]
    #[schema(example = "file")]
    pub file_type: Option<String>,
    /// Base64-encoded content; required unless `type` is `folder`.
    #[serde(default, deserialize_with = "lenient_text")]
    pub data: Option<String>,
    /// Parent folder ID as a number or a string. Defaults to the root.
    #[serde(default, deserialize_with = "lenient_text")]
    #[schema(value_type = Option<i64>, example = 0)]
    pub parent_id: Option<String>,
    /// Initial visibility. Defaults to private.
    #[serde(default, deserialize_with = "lenient_flag")]
    pub is_public: Option<bool>,
}

impl From<CreateFileBody> for CreateFileRequest {
    fn from(body: CreateFileBody) -> Self {
        CreateFileRequest {
            name: body.name,
            file_type: body.file_type,
            data: body.data,
            parent_id: body.parent_id,
            is_public: body.is_public,
        }
    }
}

/// Query parameters for listing files.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListFilesQuery {
    /// Folder to list. Defaults to the root.
    pub parent_id: Option<String>,
    /// Zero-based page number. Defaults to 0.
    pub page: Option<String>,
}

/// Query parameters for reading content.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FileDataQuery {
    /// Thumbnail width: 500, 250 or 100.
    pub size: Option<String>,
}
