//! Integration tests for the HTTP server

#[cfg(feature = "server")]
mod server_tests {
    use activity_visualizer::server::{run, ServerConfig, ServerHandle};
    use activity_visualizer::Dataset;
    use std::time::Duration;
    use tempfile::TempDir;

    fn data_dir() -> TempDir {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        std::fs::write(
            dir.path().join("activity-properties.csv"),
            "NodeId,StartDate,EndDate\n\
             A,2024-01-01,2024-01-02\n\
             B,2024-01-02,2024-01-03\n\
             C,03/01/2024,2024/01/03\n",
        )
        .expect("Failed to write activities");
        std::fs::write(
            dir.path().join("adjacency-matrix.csv"),
            ",A,B,C\n0,1,0\n0,0,1\n1,0,0\n",
        )
        .expect("Failed to write adjacency");
        dir
    }

    async fn start(dir: &TempDir) -> ServerHandle {
        let config = ServerConfig::new(0, Dataset::from_dir(dir.path()));
        let started = run(config).await.expect("Failed to start server");

        // Give server time to start
        tokio::time::sleep(Duration::from_millis(100)).await;
        started
    }

    async fn get_json(url: String) -> (reqwest::StatusCode, serde_json::Value) {
        let response = reqwest::Client::new()
            .get(url)
            .send()
            .await
            .expect("Failed to send request");
        let status = response.status();
        let body = response.json().await.expect("Failed to parse JSON");
        (status, body)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let dir = data_dir();
        let server = start(&dir).await;
        let addr = server.addr();

        let (status, body) = get_json(format!("http://{}/health", addr)).await;
        assert!(status.is_success());
        assert_eq!(body["status"], "ok");
        assert!(body["version"].as_str().is_some());

        server.shutdown().await.expect("Failed to stop server");
    }

    #[tokio::test]
    async fn test_activities_endpoint() {
        let dir = data_dir();
        let server = start(&dir).await;
        let addr = server.addr();

        let (status, body) = get_json(format!("http://{}/api/activities", addr)).await;
        assert!(status.is_success());
        assert_eq!(body["ok"], true);
        let activities = body["activities"].as_array().expect("activities array");
        assert_eq!(activities.len(), 3);
        assert_eq!(activities[0]["name"], "A");
        assert_eq!(activities[0]["durationDays"], 1);
        assert_eq!(activities[2]["start"], "2024-01-03T00:00:00");

        server.shutdown().await.expect("Failed to stop server");
    }

    #[tokio::test]
    async fn test_network_and_adjacency_endpoints() {
        let dir = data_dir();
        let server = start(&dir).await;
        let addr = server.addr();

        let (status, body) = get_json(format!("http://{}/api/network", addr)).await;
        assert!(status.is_success());
        assert_eq!(body["ok"], true);
        let nodes = body["nodes"].as_array().expect("nodes array");
        assert!(nodes
            .iter()
            .all(|n| n["inDegree"] == 1 && n["outDegree"] == 1 && n["value"] == 2));
        assert_eq!(body["links"].as_array().map(Vec::len), Some(3));
        assert_eq!(body["links"][0]["source"], "0");
        assert_eq!(body["links"][0]["target"], "1");

        let (status, body) = get_json(format!("http://{}/api/adjacency", addr)).await;
        assert!(status.is_success());
        assert_eq!(body["matrix"][2][0], 1.0);

        server.shutdown().await.expect("Failed to stop server");
    }

    #[tokio::test]
    async fn test_active_counts_endpoint() {
        let dir = data_dir();
        let server = start(&dir).await;
        let addr = server.addr();

        let (status, body) = get_json(format!("http://{}/api/active-counts", addr)).await;
        assert!(status.is_success());
        let counts = body["counts"].as_array().expect("counts array");
        assert_eq!(counts.len(), 3);
        assert_eq!(counts[1]["date"], "2024-01-02");
        assert_eq!(counts[1]["count"], 2);
        assert_eq!(counts[2]["count"], 2);
        // floor(3 * 0.1) = 0 -> both days with the maximum count
        assert_eq!(body["peaks"].as_array().map(Vec::len), Some(2));

        // With a percentile the two-day plateau collapses to one day
        let (status, body) =
            get_json(format!("http://{}/api/active-counts?percentile=10", addr)).await;
        assert!(status.is_success());
        let peaks = body["peaks"].as_array().expect("peaks array");
        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0]["date"], "2024-01-03");

        server.shutdown().await.expect("Failed to stop server");
    }

    #[tokio::test]
    async fn test_load_failure_is_reported() {
        let dir = data_dir();
        std::fs::write(
            dir.path().join("activity-properties.csv"),
            "NodeId,StartDate\nA,2024-01-01\n",
        )
        .expect("Failed to rewrite activities");
        let server = start(&dir).await;
        let addr = server.addr();

        let (status, body) = get_json(format!("http://{}/api/activities", addr)).await;
        assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["ok"], false);
        assert!(body["error"]
            .as_str()
            .unwrap_or("")
            .contains("missing required column"));

        server.shutdown().await.expect("Failed to stop server");
    }

    #[tokio::test]
    async fn test_cors_headers() {
        let dir = data_dir();
        let server = start(&dir).await;
        let addr = server.addr();

        // Send OPTIONS request to check CORS
        let response = reqwest::Client::new()
            .request(
                reqwest::Method::OPTIONS,
                format!("http://{}/api/network", addr),
            )
            .header("Origin", "http://localhost:5173")
            .header("Access-Control-Request-Method", "GET")
            .send()
            .await
            .expect("Failed to send request");

        assert!(
            response.status().is_success(),
            "CORS preflight failed: {}",
            response.status()
        );
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );

        server.shutdown().await.expect("Failed to stop server");
    }

    #[tokio::test]
    async fn test_shutdown_waits_for_server_to_stop() {
        let dir = data_dir();
        let server = start(&dir).await;
        let addr = server.addr();

        let (status, _) = get_json(format!("http://{}/health", addr)).await;
        assert!(status.is_success());

        tokio::time::timeout(Duration::from_secs(5), server.shutdown())
            .await
            .expect("Shutdown did not complete")
            .expect("Failed to stop server");

        // Listener is closed once shutdown has returned
        let result = reqwest::Client::new()
            .get(format!("http://{}/health", addr))
            .timeout(Duration::from_secs(2))
            .send()
            .await;
        assert!(result.is_err());
    }
}
