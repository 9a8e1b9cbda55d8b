use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::{
    types::incident::{IncidentList, NewIncident},
    utils::config::AppConfig,
};

const INCIDENT_TABLE_PATH: &str = "/api/now/table/incident";
const SIMILAR_INCIDENT_LIMIT: &str = "5";

#[derive(Error, Debug)]
pub enum TicketingError {
    /// The upstream answered with an unexpected status; the body is kept verbatim.
    #[error("{body}")]
    Status { status: StatusCode, body: String },
    #[error("{0}")]
    Request(#[from] reqwest::Error),
}

/// Operations against the incident table of the ticketing system.
#[async_trait]
pub trait TicketingApi: Send + Sync {
    async fn fetch_by_number(&self, number: &str) -> Result<IncidentList, TicketingError>;

    /// Incidents whose short description contains `short_description` within
    /// `category`, at most five.
    async fn fetch_similar(
        &self,
        short_description: &str,
        category: &str,
    ) -> Result<IncidentList, TicketingError>;

    /// Creates a record. Not idempotent: every call creates a new incident.
    async fn create(&self, incident: &NewIncident) -> Result<Value, TicketingError>;
}

/// ServiceNow Table API client authenticated with HTTP basic auth.
#[derive(Clone)]
pub struct ServiceNowClient {
    http: reqwest::Client,
    table_url: String,
    username: String,
    password: String,
}

impl ServiceNowClient {
    pub fn new(instance: &str, username: &str, password: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            table_url: format!("{}{INCIDENT_TABLE_PATH}", instance.trim_end_matches('/')),
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.servicenow_instance,
            &config.servicenow_username,
            &config.servicenow_password,
        )
    }

    async fn query(&self, params: &[(&str, &str)]) -> Result<IncidentList, TicketingError> {
        let response = self
            .http
            .get(&self.table_url)
            .basic_auth(&self.username, Some(&self.password))
            .query(params)
            .send()
            .await?;

        let status = response.status();
        debug!(%status, "Incident table query answered");
        if status != StatusCode::OK {
            let body = response.text().await?;
            return Err(TicketingError::Status { status, body });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl TicketingApi for ServiceNowClient {
    #[instrument(skip(self))]
    async fn fetch_by_number(&self, number: &str) -> Result<IncidentList, TicketingError> {
        let query = format!("number={number}");
        self.query(&[("sysparm_query", &query)]).await
    }

    #[instrument(skip(self))]
    async fn fetch_similar(
        &self,
        short_description: &str,
        category: &str,
    ) -> Result<IncidentList, TicketingError> {
        let query = format!("short_descriptionLIKE{short_description}^category={category}");
        self.query(&[
            ("sysparm_query", &query),
            ("sysparm_limit", SIMILAR_INCIDENT_LIMIT),
        ])
        .await
    }

    #[instrument(skip_all, fields(category = %incident.category))]
    async fn create(&self, incident: &NewIncident) -> Result<Value, TicketingError> {
        let response = self
            .http
            .post(&self.table_url)
            .basic_auth(&self.username, Some(&self.password))
            .json(incident)
            .send()
            .await?;

        let status = response.status();
        debug!(%status, "Incident create answered");
        if !matches!(status, StatusCode::OK | StatusCode::CREATED) {
            let body = response.text().await?;
            return Err(TicketingError::Status { status, body });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{basic_auth, body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ServiceNowClient {
        ServiceNowClient::new(&server.uri(), "admin", "secret")
    }

    #[tokio::test]
    async fn fetch_by_number_filters_on_exact_number() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(INCIDENT_TABLE_PATH))
            .and(basic_auth("admin", "secret"))
            .and(query_param("sysparm_query", "number=INC0010234"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": [{"number": "INC0010234", "short_description": "VPN down", "category": "Network"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let incidents = client_for(&server)
            .fetch_by_number("INC0010234")
            .await
            .expect("fetch should succeed");

        let first = incidents.first().expect("one record");
        assert_eq!(first.short_description.as_deref(), Some("VPN down"));
        assert_eq!(first.category_or_default(), "Network");
    }

    #[tokio::test]
    async fn fetch_by_number_returns_body_text_on_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(INCIDENT_TABLE_PATH))
            .respond_with(
                ResponseTemplate::new(401).set_body_string("{\"error\":\"User Not Authenticated\"}"),
            )
            .mount(&server)
            .await;

        let error = client_for(&server)
            .fetch_by_number("INC1")
            .await
            .expect_err("401 should fail");

        assert!(matches!(
            &error,
            TicketingError::Status { status, .. } if *status == StatusCode::UNAUTHORIZED
        ));
        assert_eq!(error.to_string(), "{\"error\":\"User Not Authenticated\"}");
    }

    #[tokio::test]
    async fn fetch_similar_uses_like_query_and_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(INCIDENT_TABLE_PATH))
            .and(query_param(
                "sysparm_query",
                "short_descriptionLIKEVPN down^category=Network",
            ))
            .and(query_param("sysparm_limit", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": [
                    {"number": "INC0009001", "short_description": "VPN down in Oslo"},
                    {"number": "INC0009002", "short_description": "VPN down again"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let similar = client_for(&server)
            .fetch_similar("VPN down", "Network")
            .await
            .expect("search should succeed");

        assert_eq!(similar.result.len(), 2);
    }

    #[tokio::test]
    async fn create_accepts_201_and_returns_body_unmodified() {
        let server = MockServer::start().await;
        let created = json!({"result": {"number": "INC0010500", "sys_id": "abc", "category": "Hardware"}});
        Mock::given(method("POST"))
            .and(path(INCIDENT_TABLE_PATH))
            .and(basic_auth("admin", "secret"))
            .and(body_json(json!({
                "short_description": "Printer not working",
                "description": "Printer not working in finance",
                "category": "Hardware"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(created.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let body = client_for(&server)
            .create(&NewIncident {
                short_description: "Printer not working".into(),
                description: "Printer not working in finance".into(),
                category: "Hardware".into(),
            })
            .await
            .expect("create should succeed");

        assert_eq!(body, created);
    }

    #[tokio::test]
    async fn create_rejects_other_statuses() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(INCIDENT_TABLE_PATH))
            .respond_with(ResponseTemplate::new(403).set_body_string("Insufficient rights"))
            .mount(&server)
            .await;

        let error = client_for(&server)
            .create(&NewIncident {
                short_description: "x".into(),
                description: "y".into(),
                category: "General".into(),
            })
            .await
            .expect_err("403 should fail");

        assert_eq!(error.to_string(), "Insufficient rights");
    }

    #[tokio::test]
    async fn unreachable_instance_is_a_request_error() {
        // An empty instance leaves a relative URL, which fails before any I/O.
        let client = ServiceNowClient::new("", "", "");
        let error = client
            .fetch_by_number("INC1")
            .await
            .expect_err("relative url should fail");

        assert!(matches!(error, TicketingError::Request(_)));
    }

    #[tokio::test]
    async fn object_result_reads_as_no_incidents() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/now/table/incident"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": {}})))
            .mount(&server)
            .await;

        let list = client_for(&server)
            .fetch_by_number("INC0010234")
            .await
            .expect("lookup");
        assert!(list.is_empty());
    }
}
