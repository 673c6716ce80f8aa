use batfish_client::{BatfishError, Session, SessionConfig};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Integration tests for the Batfish client session
#[cfg(test)]
mod integration_tests {
    use super::*;

    type Route = fn(&str, &str) -> (u16, String);

    /// Minimal HTTP service answering one request per connection
    struct MockService {
        port: u16,
        requests: Arc<Mutex<Vec<String>>>,
    }

    impl MockService {
        async fn start(route: Route) -> Self {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let port = listener.local_addr().unwrap().port();
            let requests = Arc::new(Mutex::new(Vec::new()));
            let seen = Arc::clone(&requests);

            tokio::spawn(async move {
                while let Ok((mut socket, _)) = listener.accept().await {
                    let mut head = Vec::new();
                    let mut buf = [0u8; 1024];
                    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut buf).await {
                            Ok(0) | Err(_) => break,
                            Ok(n) => head.extend_from_slice(&buf[..n]),
                        }
                    }
                    let head = String::from_utf8_lossy(&head).to_string();
                    let mut request_line = head.lines().next().unwrap_or_default().split_whitespace();
                    let method = request_line.next().unwrap_or_default().to_string();
                    let path = request_line.next().unwrap_or_default().to_string();
                    seen.lock().unwrap().push(head.clone());

                    let (status, body) = route(&method, &path);
                    let response = format!(
                        "HTTP/1.1 {} Mock\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                }
            });

            Self { port, requests }
        }

        fn config(&self) -> SessionConfig {
            SessionConfig {
                host: "127.0.0.1".to_string(),
                port: self.port,
                timeout_ms: 2000,
                ..SessionConfig::default()
            }
        }

        fn request_lines(&self) -> Vec<String> {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .map(|head| head.lines().next().unwrap_or_default().to_string())
                .collect()
        }
    }

    fn batfish_service(method: &str, path: &str) -> (u16, String) {
        match (method, path) {
            ("GET", "/v2/version") => (200, r#"{"Batfish":"2023.12.16.1270","Z3":"4.8.1"}"#.to_string()),
            ("GET", "/v2/networks") => (200, r#"["existing"]"#.to_string()),
            ("PUT", "/v2/networks/fresh") => (200, String::new()),
            ("GET", "/v2/networks/existing/snapshots") => (200, r#"["snap1"]"#.to_string()),
            ("DELETE", "/v2/networks/existing") => (204, String::new()),
            _ => (404, "not found".to_string()),
        }
    }

    #[tokio::test]
    async fn test_component_versions_include_batfish() {
        let service = MockService::start(batfish_service).await;
        let session = Session::with_config(service.config()).unwrap();

        let versions = session.get_component_versions().await.unwrap();

        assert!(versions.contains("Batfish"));
        assert_eq!(versions.batfish(), Some("2023.12.16.1270"));
    }

    #[tokio::test]
    async fn test_version_query_is_idempotent() {
        let service = MockService::start(batfish_service).await;
        let session = Session::with_config(service.config()).unwrap();

        let first = session.get_component_versions().await.unwrap();
        let second = session.get_component_versions().await.unwrap();

        let first_keys: Vec<&str> = first.components().collect();
        let second_keys: Vec<&str> = second.components().collect();
        assert_eq!(first_keys, second_keys);
        assert_eq!(service.request_lines().len(), 2);
    }

    #[tokio::test]
    async fn test_requests_carry_api_key() {
        let service = MockService::start(batfish_service).await;
        let config = SessionConfig {
            api_key: "my-key".to_string(),
            ..service.config()
        };
        let session = Session::with_config(config).unwrap();

        session.get_component_versions().await.unwrap();

        let requests = service.requests.lock().unwrap();
        assert!(requests[0].to_lowercase().contains("x-batfish-apikey: my-key"));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_connectivity_error() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap().port()
        };
        let session = Session::with_config(SessionConfig {
            host: "127.0.0.1".to_string(),
            port,
            ..SessionConfig::default()
        })
        .unwrap();

        let result = session.get_component_versions().await;

        assert!(matches!(result, Err(BatfishError::Connectivity { .. })));
    }

    #[tokio::test]
    async fn test_error_status_surfaces_as_service_error() {
        fn failing(_: &str, _: &str) -> (u16, String) {
            (503, "service starting".to_string())
        }
        let service = MockService::start(failing).await;
        let session = Session::with_config(service.config()).unwrap();

        let err = session.get_component_versions().await.unwrap_err();

        assert_eq!(err.status(), Some(503));
        assert!(err.to_string().contains("service starting"));
    }

    #[tokio::test]
    async fn test_redirect_surfaces_as_service_error() {
        fn moved(_: &str, _: &str) -> (u16, String) {
            (302, String::new())
        }
        let service = MockService::start(moved).await;
        let session = Session::with_config(service.config()).unwrap();

        let err = session.get_component_versions().await.unwrap_err();

        assert!(matches!(err, BatfishError::Service { status: Some(302), .. }));
        assert_eq!(service.request_lines().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_versions_are_service_error() {
        fn numeric(_: &str, _: &str) -> (u16, String) {
            (200, r#"{"Batfish": 2023}"#.to_string())
        }
        let service = MockService::start(numeric).await;
        let session = Session::with_config(service.config()).unwrap();

        let result = session.get_component_versions().await;

        assert!(matches!(result, Err(BatfishError::Service { status: Some(200), .. })));
    }

    #[tokio::test]
    async fn test_network_lifecycle() {
        let service = MockService::start(batfish_service).await;
        let mut session = Session::with_config(service.config()).unwrap();

        assert_eq!(session.list_networks().await.unwrap(), vec!["existing".to_string()]);

        session.set_network("fresh").await.unwrap();
        assert_eq!(session.network(), Some("fresh"));

        session.set_network("existing").await.unwrap();
        assert_eq!(session.list_snapshots().await.unwrap(), vec!["snap1".to_string()]);
        session.set_snapshot("snap1").await.unwrap();
        assert_eq!(session.snapshot(), Some("snap1"));

        session.delete_network("existing").await.unwrap();
        assert!(session.network().is_none());
        assert!(session.snapshot().is_none());

        assert_eq!(
            service.request_lines(),
            vec![
                "GET /v2/networks HTTP/1.1",
                "GET /v2/networks HTTP/1.1",
                "PUT /v2/networks/fresh HTTP/1.1",
                "GET /v2/networks HTTP/1.1",
                "GET /v2/networks/existing/snapshots HTTP/1.1",
                "GET /v2/networks/existing/snapshots HTTP/1.1",
                "DELETE /v2/networks/existing HTTP/1.1",
            ]
        );
    }

    #[test]
    fn test_config_defaults() {
        let config = SessionConfig::default();

        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 9996);
        assert_eq!(config.timeout_ms, 30_000);
        assert!(config.network.is_none());
    }

    /// Needs a Batfish service listening on localhost:9996
    #[tokio::test]
    #[ignore = "requires a running Batfish service"]
    async fn test_live_service_reports_batfish() {
        let session = Session::new().unwrap();
        assert!(session.get_component_versions().await.unwrap().contains("Batfish"));
    }
}
