mod common;

use reqwest::StatusCode;
use serde_json::json;

use fitcoach_api::database::manager::DatabaseManager;

#[tokio::test]
async fn protected_routes_reject_missing_api_key() -> anyhow::Result<()> {
    if !common::db_configured() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/register", server.base_url))
        .json(&json!({"name": "Nobody", "age": 30, "gender": "male", "contact_info": "n@example.com"}))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = client.get(format!("{}/1/logs", server.base_url)).send().await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn unknown_api_key_is_rejected_without_side_effects() -> anyhow::Result<()> {
    if !common::db_configured() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let pool = DatabaseManager::pool().await?;

    let resp = client
        .post(format!("{}/register", server.base_url))
        .header("X-API-Key", "no-such-key")
        .json(&json!({"name": "Ghost User", "age": 30, "gender": "male", "contact_info": "g@example.com"}))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = resp.json().await?;
    assert_eq!(body["code"], "UNAUTHORIZED");

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE name = $1")
        .bind("Ghost User")
        .fetch_one(&pool)
        .await?;
    assert_eq!(count, 0, "rejected request must not write rows");

    Ok(())
}
