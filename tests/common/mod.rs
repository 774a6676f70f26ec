#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use reqwest::StatusCode;

use fitcoach_api::database::manager::DatabaseManager;
use fitcoach_api::database::models::Tenant;
use fitcoach_api::database::repository::tenants;

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary to keep start fast during tests
        let mut cmd = Command::new("target/debug/fitcoach-api");
        cmd.env("PORT", port.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Inherit environment so the server sees DATABASE_URL from .env
        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK
                    || resp.status() == StatusCode::SERVICE_UNAVAILABLE
                {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

/// Integration tests require a reachable Postgres; skip cleanly without one
pub fn db_configured() -> bool {
    let _ = dotenvy::dotenv();
    std::env::var("DATABASE_URL").is_ok()
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Provision a tenant with a unique company name through the repository,
/// exactly as the admin CLI would
pub async fn provision_tenant(prefix: &str) -> Result<Tenant> {
    let pool = DatabaseManager::pool().await?;
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH)?.as_nanos();
    let name = format!("{}-{}", prefix, nanos);
    Ok(tenants::create(&pool, &name).await?)
}

/// Register a user over HTTP and return the new user id
pub async fn register_user(base_url: &str, api_key: &str, name: &str) -> Result<i64> {
    let client = reqwest::Client::new();
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH)?.as_nanos();
    let resp = client
        .post(format!("{}/register", base_url))
        .header("X-API-Key", api_key)
        .json(&serde_json::json!({
            "name": name,
            "age": 30,
            "gender": "female",
            "contact_info": format!("{}@example.com", nanos),
        }))
        .send()
        .await?;
    anyhow::ensure!(resp.status() == StatusCode::CREATED, "register failed: {}", resp.status());
    let body: serde_json::Value = resp.json().await?;
    body["user_id"].as_i64().context("missing user_id in register response")
}
