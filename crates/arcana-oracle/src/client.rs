//! The interpretation service seam and its HTTP implementation.

use reqwest::blocking::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::OracleConfig;
use crate::error::{OracleError, OracleResult};
use crate::request::{ConciseReading, DetailedAdvice, DetailedRequest, ReadingRequest};

const LOG_TARGET: &str = "arcana::oracle";

/// Something that can interpret a drawn spread.
pub trait Interpreter {
    /// Request the short, core interpretation.
    fn concise(&self, request: &ReadingRequest) -> OracleResult<ConciseReading>;

    /// Request the in-depth advice that builds on a concise reading.
    fn detailed(&self, request: &DetailedRequest) -> OracleResult<DetailedAdvice>;
}

/// Talks to the interpretation service over HTTP with JSON bodies.
#[derive(Debug, Clone)]
pub struct HttpInterpreter {
    client: Client,
    config: OracleConfig,
}

impl HttpInterpreter {
    /// Build a client for the configured endpoints.
    pub fn new(config: OracleConfig) -> OracleResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(OracleError::Client)?;
        Ok(Self { client, config })
    }

    /// The endpoint configuration.
    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    fn post<B: Serialize, T: DeserializeOwned>(&self, url: &str, body: &B) -> OracleResult<T> {
        tracing::info!(target: LOG_TARGET, %url, "sending interpretation request");
        let response = self.client.post(url).json(body).send()?;
        let status = response.status();
        if !status.is_success() {
            let err = status_error(response);
            tracing::error!(target: LOG_TARGET, %url, error = %err, "interpretation request failed");
            return Err(err);
        }
        tracing::info!(target: LOG_TARGET, %url, status = status.as_u16(), "interpretation received");
        response.json::<T>().map_err(OracleError::Decode)
    }
}

fn status_error(response: Response) -> OracleError {
    let status = response.status();
    let detail = match response.json::<Value>() {
        Ok(body) => error_detail(&body),
        Err(_) => "unable to parse error response".to_string(),
    };
    OracleError::Status {
        code: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("").to_string(),
        detail,
    }
}

/// The message of a JSON error body: `detail`, else `error`, else nothing.
/// Structured values such as validation lists are kept as JSON text.
fn error_detail(body: &Value) -> String {
    match body.get("detail").or_else(|| body.get("error")) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

impl Interpreter for HttpInterpreter {
    fn concise(&self, request: &ReadingRequest) -> OracleResult<ConciseReading> {
        self.post(&self.config.concise_url, request)
    }

    fn detailed(&self, request: &DetailedRequest) -> OracleResult<DetailedAdvice> {
        self.post(&self.config.detailed_url, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::thread;

    use arcana_core::{CardId, CardRecord, DrawnCard, Orientation, Topic};
    use tiny_http::{Header, Response as HttpResponse, Server};

    /// Serve exactly one canned response and hand back the request body.
    fn serve_once(status: u16, body: &'static str) -> (String, mpsc::Receiver<(String, String)>) {
        let server = Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut request = server.recv().unwrap();
            let mut content = String::new();
            request.as_reader().read_to_string(&mut content).unwrap();
            let _ = tx.send((request.url().to_string(), content));
            let header = Header::from_bytes("Content-Type", "application/json").unwrap();
            let response = HttpResponse::from_string(body)
                .with_status_code(status)
                .with_header(header);
            request.respond(response).unwrap();
        });
        (format!("http://{addr}"), rx)
    }

    fn reading() -> ReadingRequest {
        let cards: Vec<DrawnCard> = ["The Fool", "The Star", "The Sun"]
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let record = CardRecord {
                    id: CardId::Number((i as u64).into()),
                    name: name.to_string(),
                    image: String::new(),
                    keywords_upright: vec!["up".into()],
                    keywords_reversed: vec!["down".into()],
                    meaning_upright: "upright".into(),
                    meaning_reversed: "reversed".into(),
                };
                DrawnCard::new(&record, Orientation::from(i == 1))
            })
            .collect();
        ReadingRequest::new(Topic::Career, "Will I get the promotion?", &cards)
    }

    #[test]
    fn concise_success() {
        let (base, rx) = serve_once(200, r#"{"interpretation": "A bold leap pays off."}"#);
        let client = HttpInterpreter::new(OracleConfig::from_base(&base)).unwrap();

        let result = client.concise(&reading()).unwrap();
        assert_eq!(result.interpretation, "A bold leap pays off.");

        let (url, body) = rx.recv().unwrap();
        assert_eq!(url, "/getConciseInterpretation");
        let sent: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(sent["topic"], "career");
        assert_eq!(sent["drawn_cards"].as_array().unwrap().len(), 3);
        assert_eq!(sent["drawn_cards"][1]["isReversed"], true);
    }

    #[test]
    fn detailed_success() {
        let (base, rx) = serve_once(200, r#"{"advice": "Speak to your manager."}"#);
        let client = HttpInterpreter::new(OracleConfig::from_base(&base)).unwrap();
        let concise = ConciseReading {
            interpretation: "A bold leap pays off.".into(),
        };

        let advice = client
            .detailed(&DetailedRequest::new(reading(), &concise))
            .unwrap();
        assert_eq!(advice.advice, "Speak to your manager.");

        let (url, body) = rx.recv().unwrap();
        assert_eq!(url, "/getDetailedAdvice");
        assert!(body.contains("\"concise_interpretation\":\"A bold leap pays off.\""));
    }

    #[test]
    fn server_error_reports_status_and_detail() {
        let (base, _rx) = serve_once(500, r#"{"error": "API key not configured on server."}"#);
        let client = HttpInterpreter::new(OracleConfig::from_base(&base)).unwrap();

        let err = client.concise(&reading()).unwrap_err();
        assert_eq!(err.status_code(), Some(500));
        let msg = err.to_string();
        assert!(msg.contains("500 Internal Server Error"), "{msg}");
        assert!(msg.contains("API key not configured"), "{msg}");
    }

    #[test]
    fn unparseable_error_body() {
        let (base, _rx) = serve_once(502, "<html>bad gateway</html>");
        let client = HttpInterpreter::new(OracleConfig::from_base(&base)).unwrap();

        let err = client.concise(&reading()).unwrap_err();
        assert!(err.to_string().contains("unable to parse error response"));
    }

    #[test]
    fn json_error_without_message_has_empty_detail() {
        let (base, _rx) = serve_once(500, "{}");
        let client = HttpInterpreter::new(OracleConfig::from_base(&base)).unwrap();

        let err = client.concise(&reading()).unwrap_err();
        assert_eq!(err.to_string(), "API request failed: 500 Internal Server Error. ");
    }

    #[test]
    fn structured_detail_is_rendered_as_json() {
        let (base, _rx) = serve_once(422, r#"{"detail": [{"msg": "field required"}]}"#);
        let client = HttpInterpreter::new(OracleConfig::from_base(&base)).unwrap();

        let err = client.concise(&reading()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("API request failed: 422 Unprocessable Entity. "), "{msg}");
        assert!(msg.ends_with(r#"[{"msg":"field required"}]"#), "{msg}");
    }

    #[test]
    fn error_detail_prefers_detail_over_error() {
        let body = serde_json::json!({"detail": "bad topic", "error": "ignored"});
        assert_eq!(error_detail(&body), "bad topic");
        let body = serde_json::json!({"error": "API key not configured on server."});
        assert_eq!(error_detail(&body), "API key not configured on server.");
        assert_eq!(error_detail(&serde_json::json!({"detail": null})), "");
    }

    #[test]
    fn wrong_success_shape_is_decode_error() {
        let (base, _rx) = serve_once(200, r#"{"advice": "not what we asked for"}"#);
        let client = HttpInterpreter::new(OracleConfig::from_base(&base)).unwrap();

        let err = client.concise(&reading()).unwrap_err();
        assert!(matches!(err, OracleError::Decode(_)));
    }

    #[test]
    fn unreachable_service_is_transport_error() {
        let server = Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        drop(server);
        let client = HttpInterpreter::new(OracleConfig::from_base(&format!("http://{addr}"))).unwrap();

        let err = client.concise(&reading()).unwrap_err();
        assert!(matches!(err, OracleError::Transport(_)));
        assert_eq!(err.status_code(), None);
    }
}
