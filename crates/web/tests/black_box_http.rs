use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;

use tallydesk_auth::{hash_password, AuthError, AuthUser, Authenticator, Credentials, SignInError};
use tallydesk_core::PLACEHOLDER_IMAGE;
use tallydesk_store::{InMemoryStore, NewCustomer, NewUser, Store};
use tallydesk_web::app::services::AppServices;

const USER_EMAIL: &str = "user@tallydesk.dev";
const USER_PASSWORD: &str = "123456";

struct TestServer {
    base_url: String,
    services: Arc<AppServices>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(services: Arc<AppServices>) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = tallydesk_web::app::build_app(services.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            services,
            handle,
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn seeded_store() -> (Arc<InMemoryStore>, String) {
    let store = Arc::new(InMemoryStore::new());
    store
        .create_user(NewUser {
            name: "Demo User".to_string(),
            email: USER_EMAIL.to_string(),
            password_digest: hash_password(USER_PASSWORD),
        })
        .await
        .unwrap();
    let customer = store
        .create_customer(NewCustomer {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            image_url: PLACEHOLDER_IMAGE.to_string(),
        })
        .await
        .unwrap();
    (store, customer.to_string())
}

async fn spawn_default() -> (TestServer, String) {
    let (store, customer_id) = seeded_store().await;
    let services = Arc::new(AppServices::new(store, b"test-secret"));
    (TestServer::spawn(services).await, customer_id)
}

fn client() -> reqwest::Client {
    // Redirects stay visible: the tests assert on 303s and Location headers.
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

async fn sign_in(client: &reqwest::Client, base_url: &str) -> String {
    let resp = client
        .post(format!("{base_url}/login"))
        .form(&[("email", USER_EMAIL), ("password", USER_PASSWORD)])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get("location").unwrap(),
        "/dashboard/overview"
    );

    let set_cookie = resp
        .headers()
        .get("set-cookie")
        .expect("session cookie issued")
        .to_str()
        .unwrap();
    set_cookie
        .split(';')
        .next()
        .expect("cookie pair")
        .to_string()
}

#[tokio::test]
async fn health_is_public() {
    let (server, _) = spawn_default().await;
    let resp = client()
        .get(format!("{}/health", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn dashboard_requires_a_session() {
    let (server, customer_id) = spawn_default().await;
    let resp = client()
        .post(format!("{}/dashboard/invoices", server.base_url))
        .form(&[
            ("customerId", customer_id.as_str()),
            ("amount", "10"),
            ("status", "pending"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_password_maps_to_invalid_credentials_message() {
    let (server, _) = spawn_default().await;
    let resp = client()
        .post(format!("{}/login", server.base_url))
        .form(&[("email", USER_EMAIL), ("password", "wrong-pass")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Invalid credentials.");
}

struct DisabledAuthenticator;

#[async_trait]
impl Authenticator for DisabledAuthenticator {
    async fn sign_in(&self, _credentials: &Credentials) -> Result<AuthUser, SignInError> {
        Err(AuthError::AccountDisabled.into())
    }
}

#[tokio::test]
async fn other_recognized_auth_failures_collapse_to_generic_message() {
    let (store, _) = seeded_store().await;
    let services = Arc::new(
        AppServices::new(store, b"test-secret").with_authenticator(Arc::new(DisabledAuthenticator)),
    );
    let server = TestServer::spawn(services).await;

    let resp = client()
        .post(format!("{}/login", server.base_url))
        .form(&[("email", USER_EMAIL), ("password", USER_PASSWORD)])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Something went wrong.");
}

struct ExplodingAuthenticator;

#[async_trait]
impl Authenticator for ExplodingAuthenticator {
    async fn sign_in(&self, _credentials: &Credentials) -> Result<AuthUser, SignInError> {
        Err(SignInError::Internal(anyhow::anyhow!("wire fell out")))
    }
}

#[tokio::test]
async fn unrecognized_sign_in_failures_are_reraised_not_mapped() {
    let (store, _) = seeded_store().await;
    let services = Arc::new(
        AppServices::new(store, b"test-secret")
            .with_authenticator(Arc::new(ExplodingAuthenticator)),
    );
    let server = TestServer::spawn(services).await;

    let resp = client()
        .post(format!("{}/login", server.base_url))
        .form(&[("email", USER_EMAIL), ("password", USER_PASSWORD)])
        .send()
        .await
        .unwrap();
    // The hosting layer's responder, not a form message.
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "internal_error");
}

#[tokio::test]
async fn invoice_lifecycle_over_http() {
    let (server, customer_id) = spawn_default().await;
    let client = client();
    let cookie = sign_in(&client, &server.base_url).await;

    // Create: 303 to the listing, exactly one revalidation.
    let resp = client
        .post(format!("{}/dashboard/invoices", server.base_url))
        .header("cookie", &cookie)
        .form(&[
            ("customerId", customer_id.as_str()),
            ("amount", "250.75"),
            ("status", "paid"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get("location").unwrap(),
        "/dashboard/invoices"
    );
    assert_eq!(
        server.services.revalidations().paths(),
        vec!["/dashboard/invoices".to_string()]
    );

    // List: amount stored in minor units.
    let resp = client
        .get(format!("{}/dashboard/invoices", server.base_url))
        .header("cookie", &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["amount"], 25075);
    assert_eq!(body["total_pages"], 1);
    let invoice_id = body["items"][0]["id"].as_str().unwrap().to_string();

    // Edit-form data: dollars go back out as a string.
    let resp = client
        .get(format!("{}/dashboard/invoices/{invoice_id}", server.base_url))
        .header("cookie", &cookie)
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["amount"], "250.75");

    // Update.
    let resp = client
        .post(format!("{}/dashboard/invoices/{invoice_id}", server.base_url))
        .header("cookie", &cookie)
        .form(&[
            ("customerId", customer_id.as_str()),
            ("amount", "99.99"),
            ("status", "pending"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    // Delete: no navigation, listing refreshes via revalidation.
    let resp = client
        .post(format!(
            "{}/dashboard/invoices/{invoice_id}/delete",
            server.base_url
        ))
        .header("cookie", &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client
        .get(format!("{}/dashboard/invoices", server.base_url))
        .header("cookie", &cookie)
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = resp.json().await.unwrap();
    assert!(body["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn invalid_invoice_submission_echoes_values_and_errors() {
    let (server, _) = spawn_default().await;
    let client = client();
    let cookie = sign_in(&client, &server.base_url).await;

    let resp = client
        .post(format!("{}/dashboard/invoices", server.base_url))
        .header("cookie", &cookie)
        .form(&[("customerId", ""), ("amount", "-5"), ("status", "x")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Missing Fields. Failed to Create Invoice.");
    assert_eq!(body["values"]["amount"], "-5");
    assert_eq!(body["values"]["status"], "x");
    assert_eq!(
        body["errors"]["amount"][0],
        "Please enter an amount greater than $0."
    );
    assert_eq!(body["errors"]["customerId"][0], "Please select a customer.");
    assert_eq!(body["errors"]["status"][0], "Please select an invoice status.");
    assert!(server.services.revalidations().paths().is_empty());
}

#[tokio::test]
async fn store_rejection_surfaces_the_database_error_template() {
    let (server, _) = spawn_default().await;
    let client = client();
    let cookie = sign_in(&client, &server.base_url).await;

    // Valid shape, but the customer does not exist: the foreign-key stand-in
    // rejects it at the store boundary.
    let resp = client
        .post(format!("{}/dashboard/invoices", server.base_url))
        .header("cookie", &cookie)
        .form(&[
            ("customerId", "018f2f6c-9d7a-7cde-b3a0-93a1c6e2d901"),
            ("amount", "10"),
            ("status", "pending"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Database Error: Failed to Create Invoice.");
    assert!(body.get("errors").is_none());
    assert!(server.services.revalidations().paths().is_empty());
}

#[tokio::test]
async fn customer_lifecycle_over_http() {
    let (server, _) = spawn_default().await;
    let client = client();
    let cookie = sign_in(&client, &server.base_url).await;

    // Create: placeholder image regardless of input.
    let resp = client
        .post(format!("{}/dashboard/customers", server.base_url))
        .header("cookie", &cookie)
        .form(&[("name", "Grace Hopper"), ("email", "grace@example.com")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get("location").unwrap(),
        "/dashboard/customers"
    );

    let resp = client
        .get(format!("{}/dashboard/customers", server.base_url))
        .header("cookie", &cookie)
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = resp.json().await.unwrap();
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    let grace = items
        .iter()
        .find(|c| c["name"] == "Grace Hopper")
        .expect("created customer listed");
    assert_eq!(grace["image_url"], PLACEHOLDER_IMAGE);
    assert_eq!(grace["total_invoices"], 0);

    // Malformed email: field error plus echoed values.
    let resp = client
        .post(format!("{}/dashboard/customers", server.base_url))
        .header("cookie", &cookie)
        .form(&[("name", "Ada"), ("email", "not-an-email")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(
        body["errors"]["email"][0],
        "Please enter a valid email address."
    );
    assert_eq!(body["values"]["name"], "Ada");
}
