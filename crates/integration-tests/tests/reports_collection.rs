//! Paginated reports collection, local filtering, and report edits.

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use reporta_console::{CollectionView, LoadState, ReportsApi};
use reporta_core::{FilterCriteria, ReportId, StatusId};
use reporta_integration_tests::{client_for, page_json, report_json};

fn reports_api(server: &MockServer) -> ReportsApi {
    ReportsApi::new(client_for(&server.uri()))
}

/// Ten reports, the first four "pendente", the rest "resolvido".
fn mixed_page(current_page: u32) -> serde_json::Value {
    let base = i64::from(current_page - 1) * 10;
    let data = (1..=10)
        .map(|n| {
            if n <= 4 {
                report_json(base + n, &format!("Rua {}", base + n), 1, "pendente")
            } else {
                report_json(base + n, &format!("Rua {}", base + n), 2, "resolvido")
            }
        })
        .collect();
    page_json(data, current_page, 3, 30)
}

#[tokio::test]
async fn test_filtered_count_coexists_with_server_total() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/reports"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mixed_page(1)))
        .expect(1)
        .mount(&server)
        .await;

    let mut view = CollectionView::new(reports_api(&server));
    view.load_page(1).await.expect("page loads");

    view.set_criteria(FilterCriteria {
        status: Some(StatusId::new(1)),
        ..FilterCriteria::default()
    });

    // 4 of the loaded 10 match; the collection is still 30 strong.
    assert_eq!(view.filtered_count(), 4);
    assert_eq!(view.total_records(), Some(30));
    assert_eq!(view.total_pages(), Some(3));
    assert_eq!(view.state(), &LoadState::Loaded);
}

#[tokio::test]
async fn test_out_of_range_page_issues_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/reports"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mixed_page(1)))
        .expect(1)
        .mount(&server)
        .await;

    let mut view = CollectionView::new(reports_api(&server));
    view.load_page(1).await.expect("page loads");

    // last_page is 3; page 4 never reaches the wire.
    assert!(!view.load_page(4).await.expect("guarded no-op"));
    assert!(!view.load_page(0).await.expect("guarded no-op"));

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    assert_eq!(view.current_page(), Some(1));
}

#[tokio::test]
async fn test_failed_page_discards_and_retry_recovers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/reports"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mixed_page(1)))
        .mount(&server)
        .await;
    // Page 2 faults once, then recovers.
    Mock::given(method("GET"))
        .and(path("/api/reports"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({
                "error": "Erro ao obter os reports",
                "debug": "SQLSTATE[08006] connection refused"
            })),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/reports"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mixed_page(2)))
        .mount(&server)
        .await;

    let mut view = CollectionView::new(reports_api(&server));
    view.load_page(1).await.expect("page 1 loads");
    assert_eq!(view.records().len(), 10);

    let err = view.load_page(2).await.expect_err("page 2 faults");
    assert_eq!(err.status(), Some(500));

    // The stale page 1 is gone, not displayed against a failed load.
    assert!(view.records().is_empty());
    assert!(view.current_page().is_none());
    assert!(matches!(view.state(), LoadState::Failed(_)));

    view.retry().await.expect("retry recovers page 2");
    assert_eq!(view.current_page(), Some(2));
    assert_eq!(view.state(), &LoadState::Loaded);
}

#[tokio::test]
async fn test_absent_report_detail_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/reports/7/details"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "Detalhes não encontrados" })),
        )
        .mount(&server)
        .await;

    let api = reports_api(&server);
    let detail = api
        .detail(ReportId::new(7))
        .await
        .expect("absent detail is not an error");
    assert!(detail.is_none());
}

#[tokio::test]
async fn test_present_report_detail_deserializes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/reports/7/details"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "technical_description": "Pavimento degradado em 40m",
            "priority": "alta",
            "resolution_notes": "",
            "estimated_cost": 12500.0,
            "report_id": 7
        })))
        .mount(&server)
        .await;

    let api = reports_api(&server);
    let detail = api
        .detail(ReportId::new(7))
        .await
        .expect("detail loads")
        .expect("detail is present");
    assert_eq!(detail.priority, "alta");
    assert!((detail.estimated_cost - 12500.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_update_status_returns_updated_report() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/reports/12/status"))
        .and(body_json(json!({ "status_id": 2 })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(report_json(12, "Rua Augusta 5", 2, "resolvido")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = reports_api(&server);
    let report = api
        .update_status(ReportId::new(12), StatusId::new(2))
        .await
        .expect("status change succeeds");
    assert_eq!(report.status.id, StatusId::new(2));
    assert_eq!(report.status.status, "resolvido");
}
