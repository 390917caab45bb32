pub mod from;

use serde::{Deserialize, Serialize};

/// Normalized representation of a remote virtual machine.
/// `cloud` is stamped by the normalizer, never returned by the backend.
#[derive(Default, Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Vm {
    pub id: String,
    pub name: String,
    pub state: String,
    pub cloud: String,
}

/// A vm as returned by a backend list response.
/// Backends omit fields freely, absent ones normalize to blank.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RawVm {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}
