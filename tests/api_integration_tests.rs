use std::time::Duration;

use lectern::api::{ApiError, ArchiveClient, LibrarySource};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn client_for(server: &MockServer) -> ArchiveClient {
    ArchiveClient::new(server.uri(), Duration::from_secs(5))
}

fn library_body() -> serde_json::Value {
    json!({
        "status": "success",
        "data": {
            "years": [
                {
                    "year": "2024",
                    "semesters": [
                        {
                            "name": "Semester_1",
                            "courses": [
                                { "name": "Algoritmos", "video_count": 3 },
                                { "name": "Redes", "video_count": 2 }
                            ]
                        }
                    ]
                }
            ]
        }
    })
}

// ============================================================================
// Library
// ============================================================================

#[tokio::test]
async fn test_fetch_library_success() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/library"))
        .respond_with(ResponseTemplate::new(200).set_body_json(library_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let library = client_for(&mock_server).fetch_library().await.unwrap();

    assert_eq!(library.years.len(), 1);
    let semester = library.semester("2024", "Semester_1").unwrap();
    assert_eq!(semester.courses[0].name, "Algoritmos");
    assert_eq!(semester.total_videos(), 5);
}

#[tokio::test]
async fn test_fetch_library_server_error_carries_message() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/library"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "status": "error",
            "code": 500,
            "message": "Error scanning video directory"
        })))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).fetch_library().await.unwrap_err();

    assert_eq!(
        err,
        ApiError::Http {
            status: 500,
            status_text: "Internal Server Error".to_string(),
            message: Some("Error scanning video directory".to_string()),
        }
    );
    assert!(err.to_string().contains("Error scanning video directory"));
}

#[tokio::test]
async fn test_fetch_library_error_without_json_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/library"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).fetch_library().await.unwrap_err();

    assert!(matches!(
        err,
        ApiError::Http {
            status: 502,
            message: None,
            ..
        }
    ));
}

#[tokio::test]
async fn test_fetch_library_invalid_json_is_decode_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/library"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{ not json"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).fetch_library().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode { .. }));
}

#[tokio::test]
async fn test_fetch_library_connection_refused_is_transport_error() {
    // Start a server to reserve a port, then drop it so nothing listens there.
    let uri = {
        let mock_server = MockServer::start().await;
        mock_server.uri()
    };

    let client = ArchiveClient::new(uri, Duration::from_secs(2));
    let err = client.fetch_library().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport { .. }));
}

#[tokio::test]
async fn test_fetch_library_timeout_is_transport_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/library"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(library_body())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let client = ArchiveClient::new(mock_server.uri(), Duration::from_millis(200));
    let err = client.fetch_library().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport { .. }));
}

// ============================================================================
// Videos
// ============================================================================

#[tokio::test]
async fn test_fetch_videos_sends_course_query() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/video"))
        .and(query_param("year", "2024"))
        .and(query_param("semester", "Semester_1"))
        .and(query_param("course", "Cálculo Diferencial"))
        .and(query_param("video", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {
                "name": "Cálculo Diferencial",
                "videos": [
                    {
                        "name": "Week_1_TEORÍA.mp4",
                        "path": "2024/Semester_1/Cálculo Diferencial/Week_1_TEORÍA.mp4",
                        "size": 1048576,
                        "extension": ".mp4"
                    }
                ]
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let videos = client_for(&mock_server)
        .fetch_videos("2024", "Semester_1", "Cálculo Diferencial")
        .await
        .unwrap();

    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0].name, "Week_1_TEORÍA.mp4");
    assert_eq!(videos[0].size, 1_048_576);
    assert_eq!(videos[0].extension.as_deref(), Some(".mp4"));
}

#[tokio::test]
async fn test_fetch_videos_missing_list_is_empty() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/video"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": { "name": "Redes" }
        })))
        .mount(&mock_server)
        .await;

    let videos = client_for(&mock_server)
        .fetch_videos("2024", "Semester_1", "Redes")
        .await
        .unwrap();
    assert!(videos.is_empty());
}

#[tokio::test]
async fn test_fetch_videos_not_found() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/video"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status": "error",
            "code": 404,
            "message": "Course not found"
        })))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .fetch_videos("2024", "Semester_1", "Nope")
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::Http {
            status: 404,
            status_text: "Not Found".to_string(),
            message: Some("Course not found".to_string()),
        }
    );
}
