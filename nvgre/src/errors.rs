// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Option parsing errors

use crate::nla::AttrError;

/// Why a token sequence was refused.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("command line is not complete: \"{0}\" needs an argument")]
    MissingArgument(&'static str),
    #[error("argument \"{value}\" is wrong: {reason}")]
    InvalidValue { value: String, reason: &'static str },
    #[error("nvgre: unknown command \"{0}\"?")]
    UnrecognizedKeyword(String),
    #[error("nvgre: missing {}", describe_field(.0))]
    MissingRequiredField(&'static str),
    #[error("cannot find device \"{0}\"")]
    DeviceResolution(String),
    #[error(transparent)]
    Encode(#[from] AttrError),
}

fn describe_field(field: &str) -> &str {
    match field {
        "vni" => "virtual network identifier",
        other => other,
    }
}

impl ParseError {
    pub(crate) fn invalid(value: &str, reason: &'static str) -> Self {
        ParseError::InvalidValue {
            value: value.to_string(),
            reason,
        }
    }

    /// The caller must stop rather than report and carry on.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, ParseError::DeviceResolution(_))
    }

    /// The usage text should accompany the diagnostic.
    #[must_use]
    pub fn wants_usage(&self) -> bool {
        matches!(self, ParseError::UnrecognizedKeyword(_))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::nla::BufferExhausted;

    #[test]
    fn diagnostics_name_the_offending_token() {
        assert_eq!(
            ParseError::UnrecognizedKeyword("bogus".into()).to_string(),
            "nvgre: unknown command \"bogus\"?"
        );
        assert_eq!(
            ParseError::MissingRequiredField("vni").to_string(),
            "nvgre: missing virtual network identifier"
        );
        assert_eq!(
            ParseError::invalid("300", "TTL must be <= 255").to_string(),
            "argument \"300\" is wrong: TTL must be <= 255"
        );
        assert_eq!(
            ParseError::MissingArgument("group").to_string(),
            "command line is not complete: \"group\" needs an argument"
        );
    }

    #[test]
    fn only_device_resolution_is_fatal() {
        assert!(ParseError::DeviceResolution("eth9".into()).is_fatal());
        assert!(!ParseError::MissingArgument("id").is_fatal());
        assert!(!ParseError::UnrecognizedKeyword("x".into()).is_fatal());
    }

    #[test]
    fn only_unknown_keywords_want_usage() {
        assert!(ParseError::UnrecognizedKeyword("x".into()).wants_usage());
        assert!(!ParseError::MissingRequiredField("vni").wants_usage());
        let encode: ParseError = AttrError::from(BufferExhausted {
            needed: 8,
            remaining: 0,
        })
        .into();
        assert!(!encode.wants_usage());
        assert!(!encode.is_fatal());
    }
}
