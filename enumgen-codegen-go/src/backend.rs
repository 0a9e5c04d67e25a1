//! Serialization backends the generated code can target.

use std::fmt;

/// A serialization backend.
///
/// Every backend-specific piece of generated Go lives in a `match` here, so
/// adding a backend means filling in each arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Backend {
    /// `encoding/json`: `MarshalJSON` / `UnmarshalJSON`.
    Json,
    /// `gopkg.in/mgo.v2/bson`: `GetBSON` / `SetBSON`.
    Bson,
}

impl Backend {
    /// Import path of the backend's Go package.
    pub fn import_path(self) -> &'static str {
        match self {
            Self::Json => "encoding/json",
            Self::Bson => "gopkg.in/mgo.v2/bson",
        }
    }

    /// Key used for this backend in struct tags.
    pub fn tag_key(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Bson => "bson",
        }
    }

    /// Whether detecting an explicit null payload compares raw bytes
    /// (and so needs the `bytes` package).
    pub fn compares_raw_bytes(self) -> bool {
        match self {
            Self::Json => true,
            Self::Bson => false,
        }
    }

    /// Method signature of the encoder on a plain enum.
    pub(crate) fn encoder_signature(self) -> &'static str {
        match self {
            Self::Json => "MarshalJSON() ([]byte, error)",
            Self::Bson => "GetBSON() (interface{}, error)",
        }
    }

    /// Statement returning the encoded form of `${literal}`.
    pub(crate) fn encode_literal(self) -> &'static str {
        match self {
            Self::Json => "return json.Marshal(${literal})",
            Self::Bson => "return ${literal}, nil",
        }
    }

    /// Method signature of the decoder. The encoded input is named
    /// [`Backend::input`].
    pub(crate) fn decoder_signature(self) -> &'static str {
        match self {
            Self::Json => "UnmarshalJSON(b []byte) error",
            Self::Bson => "SetBSON(raw bson.Raw) error",
        }
    }

    /// Name of the decoder's input parameter.
    pub(crate) fn input(self) -> &'static str {
        match self {
            Self::Json => "b",
            Self::Bson => "raw",
        }
    }

    /// Expression decoding `${raw}` into the pointer `${target}`,
    /// evaluating to an `error`.
    pub(crate) fn decode_into(self) -> &'static str {
        match self {
            Self::Json => "json.Unmarshal(${raw}, ${target})",
            Self::Bson => "${raw}.Unmarshal(${target})",
        }
    }

    /// Map type holding the undecoded members of a document.
    pub(crate) fn raw_document(self) -> &'static str {
        match self {
            Self::Json => "map[string]json.RawMessage",
            Self::Bson => "map[string]bson.Raw",
        }
    }

    /// Condition that holds when the raw member `${raw}` is an explicit null.
    pub(crate) fn explicit_null(self) -> &'static str {
        match self {
            Self::Json => "bytes.Equal(${raw}, []byte(\"null\"))",
            // 0x0A is the BSON null element type.
            Self::Bson => "${raw}.Kind == 0x0A",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Bson => write!(f, "bson"),
        }
    }
}
