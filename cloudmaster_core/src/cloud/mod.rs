/*
* Cloud backend bindings.
*
* Every supported cloud exposes the same list/delete http interface under
* a common url pattern. A binding is the label/route pair that
* parameterizes the rest client and the poller for one backend.
*/
use serde::{Deserialize, Serialize};

// Error Handling
use cloudmaster_error::{CloudmasterError, LibError};

/// One cloud or virtualization platform behind the gateway.
/// The label tags normalized records, the base path selects the route.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Cloud {
    pub label: String,
    pub base_path: String,
}

// The vsphere backend is routed under "vmware" while its records are
// labeled "vsphere". Kept as-is.
const BINDINGS: [(&str, &str); 4] = [
    ("aws", "aws"),
    ("gcp", "gcp"),
    ("azure", "azure"),
    ("vsphere", "vmware"),
];

impl Default for Cloud {
    fn default() -> Self {
        Self::new("aws", "aws")
    }
}

impl Cloud {
    fn new(label: &str, base_path: &str) -> Self {
        Self {
            label: label.to_owned(),
            base_path: base_path.to_owned(),
        }
    }
    /// Every supported backend, fixed at startup.
    pub fn get_all() -> Vec<Cloud> {
        BINDINGS
            .iter()
            .map(|(label, base_path)| Cloud::new(label, base_path))
            .collect()
    }
    pub fn get_by_label(label: &str) -> Result<Cloud, CloudmasterError> {
        let res = Self::get_all().into_iter().find(|e| e.label == label);
        match res {
            Some(res) => Ok(res),
            None => {
                let message = format!("Couldn't find cloud {:#?}", label);
                let labels: Vec<String> =
                    Self::get_all().iter().map(|e| e.label.to_owned()).collect();
                let help = format!("Available clouds are:\n[{}]", labels.join(","));
                let err = LibError::new(&message, &help);
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn get_every_binding() {
        let clouds = Cloud::get_all();
        assert_eq!(clouds.len(), 4);
    }

    #[test]
    fn vsphere_routes_under_vmware() -> Result<(), CloudmasterError> {
        let cloud = Cloud::get_by_label("vsphere")?;
        assert_eq!(cloud.label, "vsphere");
        assert_eq!(cloud.base_path, "vmware");
        Ok(())
    }

    #[test]
    fn unknown_label_fails_with_help() {
        let res = Cloud::get_by_label("openstack");
        assert!(res.is_err());
    }
}
