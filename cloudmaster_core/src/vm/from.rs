/*
* Conversions from backend list responses to normalized vm records.
*
* Records are rebuilt wholesale on every response, there is no client
* side caching or diffing.
*/
use super::{RawVm, Vm};

// Error Handling
use log::debug;

impl Vm {
    /// Map one raw element, stamping the cloud label and renaming
    /// `status` to `state`.
    pub fn from_raw(cloud: &str, raw: RawVm) -> Self {
        Self {
            id: raw.id.unwrap_or_default(),
            name: raw.name.unwrap_or_default(),
            state: raw.status.unwrap_or_default(),
            cloud: cloud.to_owned(),
        }
    }

    /// Normalize a whole list response.
    /// An absent list yields an empty set, not an error.
    pub fn normalize(cloud: &str, raw: Option<Vec<RawVm>>) -> Vec<Self> {
        match raw {
            Some(raw) => raw.into_iter().map(|e| Vm::from_raw(cloud, e)).collect(),
            None => vec![],
        }
    }

    /// Parse and normalize a list response body.
    /// Anything but a json array of objects is treated as empty data.
    pub fn from_response(cloud: &str, body: &str) -> Vec<Self> {
        let raw = match serde_json::from_str::<Vec<RawVm>>(body) {
            Ok(raw) => Some(raw),
            Err(e) => {
                debug!("Unparseable list response from {}: {}", cloud, e);
                None
            }
        };
        Self::normalize(cloud, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn normalize_keeps_length_and_stamps_cloud() {
        let raw: Vec<RawVm> = (0..5)
            .map(|i| RawVm {
                id: Some(i.to_string()),
                name: Some(format!("vm{i}")),
                status: Some("running".to_owned()),
            })
            .collect();

        let vms = Vm::normalize("gcp", Some(raw.clone()));
        assert_eq!(vms.len(), raw.len());
        assert!(vms.iter().all(|e| e.cloud == "gcp"));
    }

    #[test]
    fn normalize_renames_status_to_state() {
        let raw = vec![RawVm {
            id: Some("1".to_owned()),
            name: Some("vm1".to_owned()),
            status: Some("running".to_owned()),
        }];

        let vms = Vm::normalize("aws", Some(raw));
        assert_eq!(
            vms,
            vec![Vm {
                id: "1".to_owned(),
                name: "vm1".to_owned(),
                state: "running".to_owned(),
                cloud: "aws".to_owned(),
            }]
        );
    }

    #[test]
    fn normalize_tolerates_absent_list() {
        assert_eq!(Vm::normalize("aws", None), vec![]);
        assert_eq!(Vm::normalize("aws", Some(vec![])), vec![]);
    }

    #[test]
    fn missing_status_normalizes_blank() {
        let vms = Vm::from_response("azure", r#"[{"id":"42","name":"vm42"}]"#);
        assert_eq!(vms.len(), 1);
        assert_eq!(vms[0].state, "");
    }

    #[test]
    fn from_response_tolerates_other_shapes() {
        assert_eq!(Vm::from_response("aws", ""), vec![]);
        assert_eq!(Vm::from_response("aws", "{}"), vec![]);
        assert_eq!(Vm::from_response("aws", "not json"), vec![]);
        assert_eq!(Vm::from_response("aws", "null"), vec![]);
    }
}
