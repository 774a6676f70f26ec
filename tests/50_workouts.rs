mod common;

use reqwest::StatusCode;
use serde_json::json;

use fitcoach_api::database::manager::DatabaseManager;
use fitcoach_api::database::repository::achievements;

#[tokio::test]
async fn workout_is_created_with_ordered_exercises() -> anyhow::Result<()> {
    if !common::db_configured() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let tenant = common::provision_tenant("ironworks").await?;
    let user_id = common::register_user(&server.base_url, &tenant.api_key, "Lifter").await?;

    let resp = client
        .post(format!("{}/workouts", server.base_url))
        .header("X-API-Key", &tenant.api_key)
        .json(&json!({
            "user_id": user_id,
            "name": "Push Day",
            "exercises": [
                { "name": "Bench Press", "sets": 3, "reps": 8, "weight": 80.0 },
                { "name": "Overhead Press", "sets": 3, "reps": 10, "weight": 40.0 }
            ]
        }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .get(format!("{}/{}/workouts", server.base_url, user_id))
        .header("X-API-Key", &tenant.api_key)
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let workouts: Vec<serde_json::Value> = resp.json().await?;
    assert_eq!(workouts.len(), 1);
    assert_eq!(workouts[0]["name"], "Push Day");

    let exercises = workouts[0]["exercises"].as_array().unwrap();
    assert_eq!(exercises.len(), 2);
    // Insertion order preserved
    assert_eq!(exercises[0]["name"], "Bench Press");
    assert_eq!(exercises[1]["name"], "Overhead Press");

    Ok(())
}

#[tokio::test]
async fn first_logs_unlock_milestones() -> anyhow::Result<()> {
    if !common::db_configured() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let tenant = common::provision_tenant("milestones").await?;
    let user_id = common::register_user(&server.base_url, &tenant.api_key, "Newcomer").await?;

    // Two meals, but only the first unlocks the milestone
    for _ in 0..2 {
        let resp = client
            .post(format!("{}/log", server.base_url))
            .header("X-API-Key", &tenant.api_key)
            .json(&json!({ "user_id": user_id, "meal_name": "snack" }))
            .send()
            .await?;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = client
        .get(format!("{}/{}/achievements", server.base_url, user_id))
        .header("X-API-Key", &tenant.api_key)
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let unlocked: Vec<serde_json::Value> = resp.json().await?;
    assert_eq!(unlocked.len(), 1);
    assert_eq!(unlocked[0]["name"], "First Meal Logged");

    Ok(())
}

#[tokio::test]
async fn milestone_unlock_collapses_to_one_row() -> anyhow::Result<()> {
    if !common::db_configured() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let tenant = common::provision_tenant("racers").await?;
    let user_id =
        common::register_user(&server.base_url, &tenant.api_key, "Repeat Unlocker").await? as i32;
    let pool = DatabaseManager::pool().await?;

    // Two transactions racing to unlock the same milestone must leave
    // exactly one row; the unique constraint absorbs the second insert
    for _ in 0..2 {
        let mut tx = pool.begin().await?;
        achievements::unlock_in_tx(
            &mut tx,
            tenant.id,
            user_id,
            "First Meal Logged",
            "Logged a meal for the first time",
        )
        .await?;
        tx.commit().await?;
    }

    let unlocked = achievements::list_desc(&pool, tenant.id, user_id).await?;
    assert_eq!(
        unlocked.iter().filter(|a| a.name == "First Meal Logged").count(),
        1,
        "duplicate unlocks must not create duplicate rows"
    );

    Ok(())
}

#[tokio::test]
async fn weight_history_is_newest_first() -> anyhow::Result<()> {
    if !common::db_configured() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let tenant = common::provision_tenant("scales").await?;
    let user_id = common::register_user(&server.base_url, &tenant.api_key, "Weigher").await?;

    for weight in [82.0, 81.5] {
        let resp = client
            .post(format!("{}/weight", server.base_url))
            .header("X-API-Key", &tenant.api_key)
            .json(&json!({ "user_id": user_id, "weight_kg": weight }))
            .send()
            .await?;
        assert_eq!(resp.status(), StatusCode::CREATED);
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }

    let resp = client
        .get(format!("{}/{}/weight-history", server.base_url, user_id))
        .header("X-API-Key", &tenant.api_key)
        .send()
        .await?;
    let history: Vec<serde_json::Value> = resp.json().await?;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["weight_kg"], 81.5);
    assert_eq!(history[1]["weight_kg"], 82.0);

    Ok(())
}
