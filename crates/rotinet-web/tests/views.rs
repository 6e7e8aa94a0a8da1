//! Router-level tests for the three views, the JSON API and the asset server.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use rotinet_config::Config;
use rotinet_web::assets::asset_router;
use rotinet_web::link::SelectionLinker;
use rotinet_web::router::build_router;
use rotinet_web::session::SESSION_COOKIE;
use rotinet_web::state::AppState;
use tempfile::TempDir;
use tower::ServiceExt;

const EDGES: &str = "source\ttarget\tclass\tdescription\n\
    geneA\trotifer\tx\tkinase\n\
    geneB\trotifer\ty\tligase\n\
    geneC\trotifer\tx\t\n\
    geneA/1\trotifer\ty\tslashed id\n\
    AVAG_001\trotifer\tx\tannotated locus\n";

const GENES: &str = "Locus tag\tAccession\tBegin\tEnd\n\
    AVAG_001\tCP075492.1\t20000\t30000\n";

struct Fixture {
    _dir: TempDir,
    app: Router,
}

fn config_in(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.data.edge_table = dir.path().join("file.txt");
    config.data.hub_image = dir.path().join("150px-Rotifer-1.jpg");
    config.genome.data_dir = dir.path().join("data");
    config.server.static_dir = dir.path().join("static");
    config
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("file.txt"), EDGES).unwrap();
    std::fs::create_dir(dir.path().join("data")).unwrap();
    std::fs::write(dir.path().join("data/vaga_proteins.tsv"), GENES).unwrap();

    let state = AppState::new(config_in(&dir), "http://localhost:9999/data");
    Fixture { app: build_router(state), _dir: dir }
}

async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

#[tokio::test]
async fn test_network_page_renders_graph() {
    let f = fixture();
    let response = get(&f.app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap().to_string();
    assert!(cookie.starts_with(&format!("{SESSION_COOKIE}=")));

    let html = body_text(response).await;
    assert!(html.contains("new vis.Network"));
    assert!(html.contains("Filter by Class"));
    assert!(html.contains("Select one or more nodes from the sidebar to see their details here."));
}

#[tokio::test]
async fn test_info_panel_lists_selected_nodes() {
    let f = fixture();
    let html = body_text(get(&f.app, "/?nodes=geneB").await).await;
    assert!(html.contains("Open Detail Page"));
    assert!(html.contains("Node_Details?node=geneB"));
    assert!(html.contains("<td>Description</td><td>ligase</td>"));
    assert!(!html.contains("<td>Source</td>"));
}

#[tokio::test]
async fn test_details_without_node_is_bad_request() {
    let f = fixture();
    let response = get(&f.app, "/Node_Details").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("No node specified."));
}

#[tokio::test]
async fn test_details_unknown_node_is_not_found() {
    let f = fixture();
    let response = get(&f.app, "/Node_Details?node=geneZ").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let html = body_text(response).await;
    assert!(html.contains("geneZ"));
    assert!(html.contains("not found in data."));
}

#[tokio::test]
async fn test_details_follow_generated_link() {
    let f = fixture();
    let links = SelectionLinker::new("http://localhost:8501").links("geneA/1");
    let path = links.details.trim_start_matches("http://localhost:8501");
    assert_eq!(path, "/Node_Details?node=geneA%2F1");

    let response = get(&f.app, path).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("slashed id"));
    assert!(html.contains("?term=geneA%2F1"));
    assert!(html.contains("IGV_Browser?node=geneA%2F1"));
}

#[tokio::test]
async fn test_details_first_of_repeated_node() {
    let f = fixture();
    let response = get(&f.app, "/Node_Details?node=geneB&node=geneA").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("ligase"));
    assert!(html.contains("<title>geneB | Node Details | rotinet</title>"));
    assert!(!html.contains('\u{2014}'));
}

#[tokio::test]
async fn test_missing_table_is_service_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_router(AppState::new(config_in(&dir), "http://localhost:9999/data"));

    let response = get(&app, "/").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(body_text(response).await.contains("not found."));

    let api = get(&app, "/api/graph").await;
    assert_eq!(api.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(body_json(api).await["error"].as_str().unwrap().contains("file.txt"));
}

#[tokio::test]
async fn test_schema_error_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("file.txt"), "source\tclass\ngeneA\tx\n").unwrap();
    let app = build_router(AppState::new(config_in(&dir), "http://localhost:9999/data"));

    let response = get(&app, "/api/graph").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(body_json(response).await["error"].as_str().unwrap().contains("missing: target"));
}

#[tokio::test]
async fn test_api_graph_class_filter() {
    let f = fixture();
    let graph = body_json(get(&f.app, "/api/graph?apply=1&class=x").await).await;
    let ids: Vec<&str> = graph["nodes"].as_array().unwrap().iter().map(|n| n["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["rotifer", "geneA", "geneC", "AVAG_001"]);
    assert_eq!(graph["edges"].as_array().unwrap().len(), 3);
    assert_eq!(graph["nodes"][0]["shape"], "image");
}

#[tokio::test]
async fn test_session_keeps_controls_between_requests() {
    let f = fixture();
    let first = get(&f.app, "/api/graph?size=80&apply=1&class=y").await;
    let cookie = first.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap().to_string();
    let session = cookie.split(';').next().unwrap().to_string();

    let request = Request::builder()
        .uri("/api/graph")
        .header(header::COOKIE, &session)
        .body(Body::empty())
        .unwrap();
    let second = f.app.clone().oneshot(request).await.unwrap();
    assert!(second.headers().get(header::SET_COOKIE).is_none());

    let graph = body_json(second).await;
    assert_eq!(graph["nodes"][0]["size"], 80);
    assert_eq!(graph["nodes"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_forged_session_cookie_is_replaced() {
    let f = fixture();
    let forged = "8c0f7a4e-3d2b-4c4e-9a51-0d6f2f1b7e10";
    let request = Request::builder()
        .uri("/api/graph")
        .header(header::COOKIE, format!("{SESSION_COOKIE}={forged}"))
        .body(Body::empty())
        .unwrap();
    let response = f.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cookie.starts_with(&format!("{SESSION_COOKIE}=")));
    assert!(!cookie.contains(forged));
}

#[tokio::test]
async fn test_api_node_and_locus() {
    let f = fixture();
    let node = body_json(get(&f.app, "/api/nodes/geneA%2F1").await).await;
    assert_eq!(node["node"], "geneA/1");
    assert_eq!(node["fields"][3]["value"], "slashed id");
    assert_eq!(node["links"]["genome_browser"], "http://localhost:8501/IGV_Browser?node=geneA%2F1");

    let missing = get(&f.app, "/api/nodes/geneZ").await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let locus = body_json(get(&f.app, "/api/locus?node=AVAG_001").await).await;
    assert_eq!(locus["locus"], "CP075492.1:20000-30000");
    let unknown = body_json(get(&f.app, "/api/locus?node=geneA").await).await;
    assert!(unknown["locus"].is_null());
}

#[tokio::test]
async fn test_genome_browser_auto_locus() {
    let f = fixture();
    let response = get(&f.app, "/IGV_Browser?node=AVAG_001").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Auto-selected gene"));
    assert!(html.contains("CP075492.1:20000-30000"));
    assert!(html.contains("localhost:9999"));
    assert!(html.contains("Adineta_vaga.fna.fai"));
    assert!(html.contains("<option value=\"AVAG_001\" selected>"));
    assert!(html.contains("<title>IGV Browser | Adineta_vaga | rotinet</title>"));
    assert!(!html.contains('\u{2014}'));
}

#[tokio::test]
async fn test_genome_browser_manual_locus() {
    let f = fixture();
    let html = body_text(get(&f.app, "/IGV_Browser?node=geneA&locus=+CP075492.1%3A5-6+").await).await;
    assert!(!html.contains("Auto-selected gene"));
    assert!(html.contains("Displaying region: <code>CP075492.1:5-6</code>"));

    let none = body_text(get(&f.app, "/IGV_Browser?node=geneA").await).await;
    assert!(none.contains("Select a gene or enter a locus to display."));
}

#[tokio::test]
async fn test_genome_browser_without_node() {
    let f = fixture();
    let response = get(&f.app, "/IGV_Browser").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("No node specified."));
}

#[tokio::test]
async fn test_asset_server_cors_headers() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("data");
    std::fs::create_dir(&data).unwrap();
    std::fs::write(data.join("Adineta_vaga.fna.fai"), "CP075492.1\t100\t12\t60\t61\n").unwrap();
    let app = asset_router(&data);

    let request = Request::builder()
        .uri("/data/Adineta_vaga.fna.fai")
        .header(header::ORIGIN, "http://localhost:8501")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert!(body_text(response).await.starts_with("CP075492.1"));

    let preflight = Request::builder()
        .method("OPTIONS")
        .uri("/data/Adineta_vaga.fna.fai")
        .header(header::ORIGIN, "http://localhost:8501")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "x-requested-with")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(preflight).await.unwrap();
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let methods = response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
    assert!(methods.contains("GET") && methods.contains("OPTIONS"));
    let headers = response.headers()[header::ACCESS_CONTROL_ALLOW_HEADERS].to_str().unwrap();
    assert!(headers.contains("x-requested-with"));
}
