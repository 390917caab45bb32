use bon::bon;
use miette::{Diagnostic, Report};
use serde_json::Value;

use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum CloudmasterError {
    ////////////////////////////////
    // Lib native errors
    #[error(transparent)]
    #[diagnostic(transparent)]
    WrapError(#[from] WrapError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    LibError(#[from] LibError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    TransportError(#[from] TransportError),

    ////////////////////////////////
    // Type convertion
    #[error(transparent)]
    #[diagnostic(code(parse::error))]
    ParseError(#[from] url::ParseError),

    #[error(transparent)]
    #[diagnostic(code(serde::error))]
    SerdeError(#[from] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(code(toml::error))]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    #[diagnostic(code(cloudmaster::io::error))]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    #[diagnostic(code(cloudmaster::env::error))]
    EnvError(#[from] std::env::VarError),
}

impl From<reqwest::Error> for CloudmasterError {
    fn from(e: reqwest::Error) -> Self {
        Self::TransportError(TransportError::from(e))
    }
}

/**
A transport failure: network error or non-2xx http response.
The message is the single user facing string for the failure.
*/
#[derive(Debug, Error, Diagnostic)]
#[error("{}", message)]
#[diagnostic(code(cloudmaster::transport::error))]
pub struct TransportError {
    pub message: String,
    #[help]
    pub help: String,
}

impl TransportError {
    /*
     * Render a non-2xx response as "{status} - {statusText} {detail}".
     * The reason phrase is not exposed by the transport, the placeholder
     * stays blank. Detail is the body "error" field when the body is a
     * json object carrying one, the serialized body otherwise.
     */
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(map)) => match map.get("error").and_then(Value::as_str) {
                Some(err) => err.to_owned(),
                None => Value::Object(map).to_string(),
            },
            Ok(value) => value.to_string(),
            Err(_) => body.to_owned(),
        };
        let status_text = "";
        Self {
            message: format!("{status} - {status_text} {detail}"),
            help: "The cloud gateway rejected the request.".to_owned(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        Self {
            message: e.to_string(),
            help: "Is the cloud gateway reachable?".to_owned(),
        }
    }
}

/**
A config error with help higher origin
Can be recursively chained.
*/
#[derive(Debug, Error, Diagnostic)]
#[error("{}", message)]
#[diagnostic(code(cloudmaster::wrap::error))]
pub struct WrapError {
    pub message: String,
    #[diagnostic_source]
    pub origin: Report,
    #[help]
    pub help: String,
}

#[bon]
impl WrapError {
    #[builder]
    pub fn new(msg: &str, help: &str, origin: Report) -> Self {
        Self {
            message: msg.to_owned(),
            help: help.to_owned(),
            origin,
        }
    }
}

/**
A root cause error with no inner origin
*/
#[derive(Debug, Error, Diagnostic)]
#[error("{}", message)]
#[diagnostic(code(cloudmaster::lib::error))]
pub struct LibError {
    pub message: String,
    #[help]
    pub help: String,
}
impl LibError {
    pub fn new(message: &str, help: &str) -> Self {
        Self {
            message: message.to_owned(),
            help: help.to_owned(),
        }
    }
}
