use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde_json::json;
use supplychain_api::config::ApiConfig;
use supplychain_auth::{JwtClaims, PrincipalId};

const SECRET: &str = "test-secret";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(config: ApiConfig) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = supplychain_api::app::build_app(&config).expect("failed to build app");
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn in_memory() -> Self {
        Self::spawn(ApiConfig::ephemeral(SECRET)).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A caller: an identity plus a token minted for it.
struct Caller {
    id: PrincipalId,
    token: String,
}

impl Caller {
    fn new() -> Self {
        let id = PrincipalId::new();
        let now = Utc::now();
        let claims = JwtClaims {
            sub: id,
            issued_at: now - ChronoDuration::seconds(1),
            expires_at: now + ChronoDuration::minutes(10),
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .expect("failed to encode jwt");
        Self { id, token }
    }
}

async fn set_manager(
    client: &reqwest::Client,
    srv: &TestServer,
    caller: &Caller,
    manager: PrincipalId,
) -> reqwest::Response {
    client
        .put(srv.url("/manager"))
        .bearer_auth(&caller.token)
        .json(&json!({ "manager": manager }))
        .send()
        .await
        .unwrap()
}

async fn create_product(
    client: &reqwest::Client,
    srv: &TestServer,
    caller: &Caller,
    name: &str,
    status: &str,
) -> reqwest::Response {
    client
        .post(srv.url("/products"))
        .bearer_auth(&caller.token)
        .json(&json!({ "name": name, "status": status }))
        .send()
        .await
        .unwrap()
}

async fn get_json(client: &reqwest::Client, srv: &TestServer, path: &str) -> serde_json::Value {
    let res = client.get(srv.url(path)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK, "GET {path}");
    res.json().await.unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::in_memory().await;
    let res = reqwest::get(srv.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn mutations_require_a_token() {
    let srv = TestServer::in_memory().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/products"))
        .json(&json!({ "name": "Widget", "status": "NEW" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .put(srv.url("/manager"))
        .bearer_auth("garbage")
        .json(&json!({ "manager": PrincipalId::new() }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn whoami_echoes_token_subject() {
    let srv = TestServer::in_memory().await;
    let caller = Caller::new();

    let body: serde_json::Value = reqwest::Client::new()
        .get(srv.url("/whoami"))
        .bearer_auth(&caller.token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["principal_id"], caller.id.to_string());
}

#[tokio::test]
async fn manager_bootstrap_and_handover() {
    let srv = TestServer::in_memory().await;
    let client = reqwest::Client::new();
    let m = Caller::new();
    let other = Caller::new();

    let body = get_json(&client, &srv, "/manager").await;
    assert!(body["manager"].is_null());

    // First assignment: anyone may do it.
    let res = set_manager(&client, &srv, &other, m.id).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = get_json(&client, &srv, "/manager").await;
    assert_eq!(body["manager"], m.id.to_string());

    // Now only the manager may reassign.
    let res = set_manager(&client, &srv, &other, other.id).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let err: serde_json::Value = res.json().await.unwrap();
    assert_eq!(err["error"], "unauthorized");
    assert_eq!(
        err["message"],
        "Only Current Manager can change the Manager Position."
    );

    let res = set_manager(&client, &srv, &m, other.id).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = get_json(&client, &srv, "/manager").await;
    assert_eq!(body["manager"], other.id.to_string());
}

#[tokio::test]
async fn product_lifecycle_walkthrough() {
    let srv = TestServer::in_memory().await;
    let client = reqwest::Client::new();
    let m = Caller::new();
    let a = Caller::new();
    let stranger = Caller::new();

    // No manager yet.
    let res = create_product(&client, &srv, &m, "Widget", "NEW").await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let err: serde_json::Value = res.json().await.unwrap();
    assert_eq!(err["error"], "no_manager");

    assert_eq!(set_manager(&client, &srv, &m, m.id).await.status(), StatusCode::OK);

    // Non-manager cannot create.
    let res = create_product(&client, &srv, &a, "Widget", "NEW").await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = create_product(&client, &srv, &m, "Widget", "NEW").await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await.unwrap();
    assert_eq!(created["id"], 0);

    let product = get_json(&client, &srv, "/products/0").await;
    assert_eq!(product["name"], "Widget");
    assert_eq!(product["status"], "NEW");
    assert_eq!(product["owner"], m.id.to_string());
    assert_eq!(product["logs"].as_array().unwrap().len(), 1);
    assert_eq!(product["logs"][0]["message"], "Product with ID #0 was created");

    // Transfer to A as the owning manager.
    let res = client
        .post(srv.url("/products/0/transfer"))
        .bearer_auth(&m.token)
        .json(&json!({ "new_owner": a.id }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let owner = get_json(&client, &srv, "/products/0/owner").await;
    assert_eq!(owner["owner"], a.id.to_string());

    // Manager is no longer the owner and cannot take it back.
    let res = client
        .post(srv.url("/products/0/transfer"))
        .bearer_auth(&m.token)
        .json(&json!({ "new_owner": m.id }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Owner updates status; stranger cannot.
    let res = client
        .post(srv.url("/products/0/status"))
        .bearer_auth(&a.token)
        .json(&json!({ "status": "SHIPPED" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .post(srv.url("/products/0/status"))
        .bearer_auth(&stranger.token)
        .json(&json!({ "status": "LOST" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Manager may still rename a product it does not own.
    let res = client
        .post(srv.url("/products/0/name"))
        .bearer_auth(&m.token)
        .json(&json!({ "name": "Gadget" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let status = get_json(&client, &srv, "/products/0/status").await;
    assert_eq!(status["status"], "SHIPPED");

    let logs = get_json(&client, &srv, "/products/0/logs").await;
    let messages: Vec<&str> = logs["logs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["message"].as_str().unwrap())
        .collect();
    assert_eq!(
        messages,
        vec![
            "Product with ID #0 was created".to_string(),
            format!("Ownership Transferred to {}", a.id),
            "Product Status Changed To: SHIPPED".to_string(),
            "Product Name Changed To: Gadget".to_string(),
        ]
    );

    let all = get_json(&client, &srv, "/products").await;
    assert_eq!(all["items"].as_array().unwrap().len(), 1);
    let count = get_json(&client, &srv, "/products/count").await;
    assert_eq!(count["total"], 1);
}

#[tokio::test]
async fn unknown_and_malformed_ids() {
    let srv = TestServer::in_memory().await;
    let client = reqwest::Client::new();

    for path in ["/products/7", "/products/7/logs", "/products/7/status", "/products/7/owner"] {
        let res = client.get(srv.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "GET {path}");
        let err: serde_json::Value = res.json().await.unwrap();
        assert_eq!(err["message"], "Product with ID #7 Not Found.");
    }

    let res = client.get(srv.url("/products/abc")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let caller = Caller::new();
    let res = client
        .post(srv.url("/products/7/name"))
        .bearer_auth(&caller.token)
        .json(&json!({ "name": "x" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn products_survive_restart_but_manager_does_not() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = ApiConfig::ephemeral(SECRET);
    config.data_file = Some(dir.path().join("products.json"));

    let client = reqwest::Client::new();
    let m = Caller::new();

    {
        let srv = TestServer::spawn(config.clone()).await;
        assert_eq!(set_manager(&client, &srv, &m, m.id).await.status(), StatusCode::OK);
        let res = create_product(&client, &srv, &m, "Widget", "NEW").await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let srv = TestServer::spawn(config).await;
    let count = get_json(&client, &srv, "/products/count").await;
    assert_eq!(count["total"], 1);
    let manager = get_json(&client, &srv, "/manager").await;
    assert!(manager["manager"].is_null());

    // Owner still cannot update status without a manager.
    let res = client
        .post(srv.url("/products/0/status"))
        .bearer_auth(&m.token)
        .json(&json!({ "status": "SHIPPED" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}
