/*
* Rest client for the cloud gateway.
*
* One client per backend binding. Both operations are plain http GETs
* against {api_url}{base_path} with a ?command= query, the way the
* gateway multiplexes its cloud handlers.
*/
use crate::cloud::Cloud;
use crate::config::CloudmasterConfig;
use crate::vm::Vm;

// Http
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use url::Url;

// Error Handling
use cloudmaster_error::{CloudmasterError, TransportError};
use log::{debug, info};

#[derive(Debug, Clone)]
pub struct RestClient {
    pub cloud: Cloud,
    base_url: String,
    inner: reqwest::Client,
}

impl RestClient {
    pub fn new(cloud: Cloud, base_url: &str) -> Result<Self, CloudmasterError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let inner = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            cloud,
            base_url: base_url.to_owned(),
            inner,
        })
    }
    /// Client for a binding, gateway url taken from the configuration.
    pub fn from_config(cloud: Cloud) -> Result<Self, CloudmasterError> {
        let config = CloudmasterConfig::get()?;
        Self::new(cloud, &config.api_url)
    }

    fn command_url(&self, command: &str, name: Option<&str>) -> Result<Url, CloudmasterError> {
        let raw = format!("{}{}", self.base_url, self.cloud.base_path);
        let mut url = Url::parse(&raw)?;
        url.query_pairs_mut().append_pair("command", command);
        if let Some(name) = name {
            url.query_pairs_mut().append_pair("name", name);
        }
        Ok(url)
    }

    /// Fetch and normalize the backend's vm list.
    pub async fn list(&self) -> Result<Vec<Vm>, CloudmasterError> {
        let url = self.command_url("list", None)?;
        debug!("GET {}", url);

        let response = self
            .inner
            .get(url)
            .send()
            .await
            .map_err(TransportError::from)?;

        let status = response.status();
        let body = response.text().await.map_err(TransportError::from)?;
        if !status.is_success() {
            return Err(TransportError::from_status(status.as_u16(), &body).into());
        }
        Ok(Vm::from_response(&self.cloud.label, &body))
    }

    /// Request deletion of a vm by name.
    /// Best effort: the gateway confirms nothing, the vm drops from
    /// list responses once the backend has processed the delete.
    pub async fn delete(&self, vm_name: &str) -> Result<(), CloudmasterError> {
        let url = self.command_url("delete", Some(vm_name))?;
        info!(
            "[start] requesting delete of vm {:#?} on {}",
            vm_name, self.cloud.label
        );

        let response = self
            .inner
            .get(url)
            .send()
            .await
            .map_err(TransportError::from)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.map_err(TransportError::from)?;
            return Err(TransportError::from_status(status.as_u16(), &body).into());
        }

        info!(
            "[end] requested delete of vm {:#?} on {}",
            vm_name, self.cloud.label
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use axum::extract::{Query, State};
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Gateway stand-in recording every query it receives.
    #[derive(Default, Clone)]
    struct Gateway {
        requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
    }

    async fn handler(
        State(gateway): State<Gateway>,
        Query(params): Query<HashMap<String, String>>,
    ) -> (StatusCode, String) {
        gateway.requests.lock().unwrap().push(params.clone());
        match params.get("command").map(String::as_str) {
            Some("list") => (
                StatusCode::OK,
                r#"[{"id":"1","name":"vm1","status":"running"}]"#.to_owned(),
            ),
            Some("delete") => (StatusCode::OK, "{}".to_owned()),
            _ => (
                StatusCode::BAD_REQUEST,
                r#"{"error":"command is required"}"#.to_owned(),
            ),
        }
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    #[tokio::test]
    async fn list_normalizes_gateway_response() -> Result<(), CloudmasterError> {
        let gateway = Gateway::default();
        let router = Router::new()
            .route("/aws", get(handler))
            .with_state(gateway.clone());
        let base_url = serve(router).await;

        let client = RestClient::new(Cloud::default(), &base_url)?;
        let vms = client.list().await?;

        assert_eq!(
            vms,
            vec![Vm {
                id: "1".to_owned(),
                name: "vm1".to_owned(),
                state: "running".to_owned(),
                cloud: "aws".to_owned(),
            }]
        );
        Ok(())
    }

    #[tokio::test]
    async fn list_tolerates_non_list_bodies() -> Result<(), CloudmasterError> {
        let router = Router::new().route("/gcp", get(|| async { "{}".to_owned() }));
        let base_url = serve(router).await;

        let client = RestClient::new(Cloud::get_by_label("gcp")?, &base_url)?;
        let vms = client.list().await?;

        assert_eq!(vms, vec![]);
        Ok(())
    }

    #[tokio::test]
    async fn list_failure_renders_status_and_body_error() -> Result<(), CloudmasterError> {
        let router = Router::new().route(
            "/aws",
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    r#"{"error":"boom"}"#.to_owned(),
                )
            }),
        );
        let base_url = serve(router).await;

        let client = RestClient::new(Cloud::default(), &base_url)?;
        let err = client.list().await.unwrap_err();

        assert_eq!(err.to_string(), "500 -  boom");
        Ok(())
    }

    #[tokio::test]
    async fn delete_sends_one_encoded_request() -> Result<(), CloudmasterError> {
        let gateway = Gateway::default();
        let router = Router::new()
            .route("/vmware", get(handler))
            .with_state(gateway.clone());
        let base_url = serve(router).await;

        // Deletes on vsphere go through the vmware route.
        let client = RestClient::new(Cloud::get_by_label("vsphere")?, &base_url)?;
        client.delete("my vm").await?;

        let requests = gateway.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].get("command"), Some(&"delete".to_owned()));
        assert_eq!(requests[0].get("name"), Some(&"my vm".to_owned()));
        Ok(())
    }

    #[tokio::test]
    async fn network_failure_maps_to_transport_error() -> Result<(), CloudmasterError> {
        // Nothing listens on the discard port.
        let client = RestClient::new(Cloud::default(), "http://127.0.0.1:9/")?;
        let err = client.list().await.unwrap_err();

        assert!(matches!(err, CloudmasterError::TransportError(_)));
        assert!(!err.to_string().is_empty());
        Ok(())
    }
}
