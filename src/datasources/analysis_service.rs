use crate::config::ServiceConfig;
use crate::error::{AdvisorError, Result};
use crate::logic::job_watch::JobStatusSource;
use crate::models::{ChartPayload, ClimateAggregates, WizardSubmission};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// HTTP client for the web application that runs the climate analysis and
/// stores the initial-form answers.
pub struct AnalysisServiceClient {
    client: reqwest::Client,
    config: ServiceConfig,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    #[serde(default)]
    logs: Vec<String>,
}

impl AnalysisServiceClient {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.config.base_url.trim_end_matches('/');
        Url::parse(&format!("{}{}", base, path)).map_err(|e| {
            AdvisorError::Config(format!(
                "invalid service URL '{}': {}",
                self.config.base_url, e
            ))
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, label: &str) -> Result<T> {
        let response = self.client.get(url).send().await.map_err(|e| {
            AdvisorError::DataSourceUnavailable(format!("Analysis service ({}): {}", label, e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AdvisorError::DataSourceUnavailable(format!(
                "Analysis service ({}) returned {}: {}",
                label, status, body
            )));
        }

        Ok(response.json::<T>().await?)
    }

    /// Fetch the farmer's saved wizard answers.
    pub async fn fetch_form_answers(&self) -> Result<WizardSubmission> {
        let url = self.endpoint("/api/dados-formulario-inicial")?;
        self.get_json(url, "form answers").await
    }

    /// Fetch the yearly climate series of the latest analysis.
    pub async fn fetch_climate(&self) -> Result<ClimateAggregates> {
        let url = self.endpoint("/api/dados-climaticos")?;
        let payload: ChartPayload = self.get_json(url, "climate").await?;
        let climate = ClimateAggregates::from_chart_payload(&payload);

        if climate.yearly_reference_et.is_empty() || climate.yearly_precipitation.is_empty() {
            tracing::warn!(
                "Climate payload incomplete: {} ET years, {} precipitation years",
                climate.yearly_reference_et.len(),
                climate.yearly_precipitation.len()
            );
        }
        Ok(climate)
    }

    /// Check that the service answers at all.
    pub async fn test_connection(&self) -> Result<bool> {
        let url = self.endpoint("/")?;
        let response = self.client.get(url).send().await.map_err(|e| {
            AdvisorError::DataSourceUnavailable(format!("Analysis service: {}", e))
        })?;

        Ok(!response.status().is_server_error())
    }
}

impl JobStatusSource for AnalysisServiceClient {
    async fn fetch_logs(&self, job_id: &str) -> Result<Vec<String>> {
        let mut url = self.endpoint("/status")?;
        url.query_pairs_mut().append_pair("thread_id", job_id);

        let status: StatusResponse = self.get_json(url, "status").await?;
        Ok(status.logs)
    }

    async fn request_stop(&self) -> Result<()> {
        let url = self.endpoint("/parar-carregamento")?;
        let response = self.client.post(url).send().await.map_err(|e| {
            AdvisorError::DataSourceUnavailable(format!("Analysis service (stop): {}", e))
        })?;

        if !response.status().is_success() {
            return Err(AdvisorError::DataSourceUnavailable(format!(
                "Analysis service (stop) returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answer a single request with `body` as JSON and return the base URL.
    async fn serve_once(body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn sample_config(base_url: &str) -> ServiceConfig {
        ServiceConfig {
            base_url: base_url.to_string(),
            ..ServiceConfig::default()
        }
    }

    #[test]
    fn endpoint_joins_paths() {
        let client = AnalysisServiceClient::new(sample_config("http://localhost:5000/"));
        let url = client.endpoint("/status").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/status");
    }

    #[test]
    fn invalid_base_url_is_config_error() {
        let client = AnalysisServiceClient::new(sample_config("not a url"));
        assert!(matches!(
            client.endpoint("/status"),
            Err(AdvisorError::Config(_))
        ));
    }

    #[test]
    fn status_response_tolerates_missing_logs() {
        let status: StatusResponse = serde_json::from_str("{}").unwrap();
        assert!(status.logs.is_empty());
    }

    #[tokio::test]
    async fn status_logs_are_read() {
        let base = serve_once(r#"{"logs": ["Baixando dados", "Processamento completo"]}"#).await;
        let client = AnalysisServiceClient::new(sample_config(&base));

        let logs = client.fetch_logs("job-1").await.unwrap();
        assert_eq!(logs.last().map(String::as_str), Some("Processamento completo"));
    }

    #[tokio::test]
    async fn malformed_body_is_http_error() {
        let base = serve_once("<html>not json</html>").await;
        let client = AnalysisServiceClient::new(sample_config(&base));

        assert!(matches!(
            client.fetch_logs("job-1").await,
            Err(AdvisorError::Http(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_service_is_unavailable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);
        let client = AnalysisServiceClient::new(sample_config(&base));

        assert!(matches!(
            client.fetch_form_answers().await,
            Err(AdvisorError::DataSourceUnavailable(_))
        ));
    }
}
