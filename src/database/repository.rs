//! Tenant-scoped data access. Every query here filters by tenant id as well
//! as row id, so a handler holding the wrong tenant simply sees nothing.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::models::{
    Achievement, DietLog, ExerciseEntry, MeasurementLog, PlanRecord, Tenant, User, WeightEntry,
    WorkoutLog, WorkoutWithExercises,
};

pub mod tenants {
    use super::*;
    use crate::database::models::tenant::new_api_key;

    pub async fn find_by_api_key(pool: &PgPool, api_key: &str) -> Result<Option<Tenant>, sqlx::Error> {
        sqlx::query_as::<_, Tenant>("SELECT * FROM tenants WHERE api_key = $1")
            .bind(api_key)
            .fetch_optional(pool)
            .await
    }

    /// Provision a tenant with a freshly issued API key (CLI only)
    pub async fn create(pool: &PgPool, company_name: &str) -> Result<Tenant, sqlx::Error> {
        sqlx::query_as::<_, Tenant>(
            "INSERT INTO tenants (company_name, api_key) VALUES ($1, $2) RETURNING *",
        )
        .bind(company_name)
        .bind(new_api_key())
        .fetch_one(pool)
        .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Tenant>, sqlx::Error> {
        sqlx::query_as::<_, Tenant>("SELECT * FROM tenants ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
    }
}

pub mod users {
    use super::*;
    use chrono::NaiveDate;

    /// Column values for a new end user (username already derived)
    #[derive(Debug, Clone)]
    pub struct NewUser {
        pub username: String,
        pub contact_info: String,
        pub name: String,
        pub age: Option<i32>,
        pub gender: Option<String>,
        pub weight_kg: Option<f64>,
        pub height_cm: Option<f64>,
        pub fitness_goals: Option<String>,
        pub workouts_per_week: Option<String>,
        pub workout_duration: Option<i32>,
        pub disliked_foods: Option<String>,
        pub allergies: Option<String>,
        pub health_conditions: Option<String>,
        pub sleep_hours: Option<String>,
        pub stress_level: Option<String>,
        pub activity_level: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct NewMembership {
        pub plan: Option<String>,
        pub start_date: Option<NaiveDate>,
        pub end_date: Option<NaiveDate>,
    }

    /// Fetch a user only if it belongs to the given tenant
    pub async fn find_owned(
        pool: &PgPool,
        tenant_id: i32,
        user_id: i32,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1 AND tenant_id = $2")
            .bind(user_id)
            .bind(tenant_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn username_exists(
        pool: &PgPool,
        tenant_id: i32,
        username: &str,
    ) -> Result<bool, sqlx::Error> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM users WHERE username = $1 AND tenant_id = $2",
        )
        .bind(username)
        .bind(tenant_id)
        .fetch_one(pool)
        .await?;
        Ok(count.0 > 0)
    }

    /// Insert a user and, when supplied, its membership in one transaction.
    /// Either both rows land or neither does.
    pub async fn create_with_membership(
        pool: &PgPool,
        tenant_id: i32,
        user: NewUser,
        membership: Option<NewMembership>,
    ) -> Result<i32, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (user_id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO users (
                tenant_id, username, contact_info, name, age, gender,
                weight_kg, height_cm, fitness_goals, workouts_per_week,
                workout_duration, disliked_foods, allergies, health_conditions,
                sleep_hours, stress_level, activity_level
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING id
            "#,
        )
        .bind(tenant_id)
        .bind(&user.username)
        .bind(&user.contact_info)
        .bind(&user.name)
        .bind(user.age)
        .bind(&user.gender)
        .bind(user.weight_kg)
        .bind(user.height_cm)
        .bind(&user.fitness_goals)
        .bind(&user.workouts_per_week)
        .bind(user.workout_duration)
        .bind(&user.disliked_foods)
        .bind(&user.allergies)
        .bind(&user.health_conditions)
        .bind(&user.sleep_hours)
        .bind(&user.stress_level)
        .bind(&user.activity_level)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(m) = membership {
            sqlx::query(
                r#"
                INSERT INTO memberships (tenant_id, user_id, plan, start_date, end_date)
                VALUES ($1, $2, $3, COALESCE($4, CURRENT_DATE), $5)
                "#,
            )
            .bind(tenant_id)
            .bind(user_id)
            .bind(&m.plan)
            .bind(m.start_date)
            .bind(m.end_date)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(user_id)
    }
}

pub mod diet_logs {
    use super::*;

    #[derive(Debug, Clone)]
    pub struct NewDietLog {
        pub meal_name: String,
        pub food_items: Option<String>,
        pub calories: Option<i32>,
        pub protein_g: Option<f64>,
        pub carbs_g: Option<f64>,
        pub fat_g: Option<f64>,
    }

    /// Insert a meal log; the user's very first log also unlocks the
    /// first-meal milestone within the same transaction.
    pub async fn insert(
        pool: &PgPool,
        tenant_id: i32,
        user_id: i32,
        log: NewDietLog,
    ) -> Result<DietLog, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let created = sqlx::query_as::<_, DietLog>(
            r#"
            INSERT INTO diet_logs (tenant_id, user_id, meal_name, food_items,
                                   calories, protein_g, carbs_g, fat_g)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(user_id)
        .bind(&log.meal_name)
        .bind(&log.food_items)
        .bind(log.calories)
        .bind(log.protein_g)
        .bind(log.carbs_g)
        .bind(log.fat_g)
        .fetch_one(&mut *tx)
        .await?;

        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM diet_logs WHERE user_id = $1 AND tenant_id = $2")
                .bind(user_id)
                .bind(tenant_id)
                .fetch_one(&mut *tx)
                .await?;
        if count == 1 {
            super::achievements::unlock_in_tx(
                &mut tx,
                tenant_id,
                user_id,
                "First Meal Logged",
                "Logged a meal for the first time",
            )
            .await?;
        }

        tx.commit().await?;
        Ok(created)
    }

    pub async fn list_desc(
        pool: &PgPool,
        tenant_id: i32,
        user_id: i32,
    ) -> Result<Vec<DietLog>, sqlx::Error> {
        sqlx::query_as::<_, DietLog>(
            r#"
            SELECT * FROM diet_logs
            WHERE user_id = $1 AND tenant_id = $2
            ORDER BY logged_at DESC
            "#,
        )
        .bind(user_id)
        .bind(tenant_id)
        .fetch_all(pool)
        .await
    }

    /// Logs with `logged_at` at or after the given instant, oldest first
    pub async fn since(
        pool: &PgPool,
        tenant_id: i32,
        user_id: i32,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<DietLog>, sqlx::Error> {
        sqlx::query_as::<_, DietLog>(
            r#"
            SELECT * FROM diet_logs
            WHERE user_id = $1 AND tenant_id = $2 AND logged_at >= $3
            ORDER BY logged_at ASC
            "#,
        )
        .bind(user_id)
        .bind(tenant_id)
        .bind(cutoff)
        .fetch_all(pool)
        .await
    }
}

pub mod workouts {
    use super::*;

    #[derive(Debug, Clone)]
    pub struct NewExercise {
        pub name: String,
        pub sets: i32,
        pub reps: i32,
        pub weight: f64,
    }

    /// Create a workout and its exercise entries atomically. The first
    /// workout for a user unlocks the first-workout milestone.
    pub async fn create_with_exercises(
        pool: &PgPool,
        tenant_id: i32,
        user_id: i32,
        name: &str,
        exercises: Vec<NewExercise>,
    ) -> Result<WorkoutWithExercises, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let workout = sqlx::query_as::<_, WorkoutLog>(
            r#"
            INSERT INTO workout_logs (tenant_id, user_id, name)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(user_id)
        .bind(name)
        .fetch_one(&mut *tx)
        .await?;

        let mut created = Vec::with_capacity(exercises.len());
        for exercise in &exercises {
            let entry = sqlx::query_as::<_, ExerciseEntry>(
                r#"
                INSERT INTO exercise_entries (tenant_id, workout_log_id, name, sets, reps, weight)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
                "#,
            )
            .bind(tenant_id)
            .bind(workout.id)
            .bind(&exercise.name)
            .bind(exercise.sets)
            .bind(exercise.reps)
            .bind(exercise.weight)
            .fetch_one(&mut *tx)
            .await?;
            created.push(entry);
        }

        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM workout_logs WHERE user_id = $1 AND tenant_id = $2",
        )
        .bind(user_id)
        .bind(tenant_id)
        .fetch_one(&mut *tx)
        .await?;
        if count == 1 {
            super::achievements::unlock_in_tx(
                &mut tx,
                tenant_id,
                user_id,
                "First Workout Logged",
                "Logged a workout for the first time",
            )
            .await?;
        }

        tx.commit().await?;
        Ok(WorkoutWithExercises { workout, exercises: created })
    }

    pub async fn list_with_exercises(
        pool: &PgPool,
        tenant_id: i32,
        user_id: i32,
    ) -> Result<Vec<WorkoutWithExercises>, sqlx::Error> {
        let workouts = sqlx::query_as::<_, WorkoutLog>(
            r#"
            SELECT * FROM workout_logs
            WHERE user_id = $1 AND tenant_id = $2
            ORDER BY logged_at DESC
            "#,
        )
        .bind(user_id)
        .bind(tenant_id)
        .fetch_all(pool)
        .await?;

        let mut result = Vec::with_capacity(workouts.len());
        for workout in workouts {
            let exercises = sqlx::query_as::<_, ExerciseEntry>(
                r#"
                SELECT * FROM exercise_entries
                WHERE workout_log_id = $1 AND tenant_id = $2
                ORDER BY id ASC
                "#,
            )
            .bind(workout.id)
            .bind(tenant_id)
            .fetch_all(pool)
            .await?;
            result.push(WorkoutWithExercises { workout, exercises });
        }
        Ok(result)
    }
}

pub mod weight_entries {
    use super::*;

    pub async fn insert(
        pool: &PgPool,
        tenant_id: i32,
        user_id: i32,
        weight_kg: f64,
    ) -> Result<WeightEntry, sqlx::Error> {
        sqlx::query_as::<_, WeightEntry>(
            r#"
            INSERT INTO weight_entries (tenant_id, user_id, weight_kg)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(user_id)
        .bind(weight_kg)
        .fetch_one(pool)
        .await
    }

    pub async fn history_desc(
        pool: &PgPool,
        tenant_id: i32,
        user_id: i32,
    ) -> Result<Vec<WeightEntry>, sqlx::Error> {
        sqlx::query_as::<_, WeightEntry>(
            r#"
            SELECT * FROM weight_entries
            WHERE user_id = $1 AND tenant_id = $2
            ORDER BY logged_at DESC
            "#,
        )
        .bind(user_id)
        .bind(tenant_id)
        .fetch_all(pool)
        .await
    }
}

pub mod measurements {
    use super::*;

    #[derive(Debug, Clone)]
    pub struct NewMeasurement {
        pub waist_cm: Option<f64>,
        pub chest_cm: Option<f64>,
        pub arms_cm: Option<f64>,
        pub hips_cm: Option<f64>,
    }

    pub async fn insert(
        pool: &PgPool,
        tenant_id: i32,
        user_id: i32,
        m: NewMeasurement,
    ) -> Result<MeasurementLog, sqlx::Error> {
        sqlx::query_as::<_, MeasurementLog>(
            r#"
            INSERT INTO measurement_logs (tenant_id, user_id, waist_cm, chest_cm, arms_cm, hips_cm)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(user_id)
        .bind(m.waist_cm)
        .bind(m.chest_cm)
        .bind(m.arms_cm)
        .bind(m.hips_cm)
        .fetch_one(pool)
        .await
    }

    pub async fn list_desc(
        pool: &PgPool,
        tenant_id: i32,
        user_id: i32,
    ) -> Result<Vec<MeasurementLog>, sqlx::Error> {
        sqlx::query_as::<_, MeasurementLog>(
            r#"
            SELECT * FROM measurement_logs
            WHERE user_id = $1 AND tenant_id = $2
            ORDER BY logged_at DESC
            "#,
        )
        .bind(user_id)
        .bind(tenant_id)
        .fetch_all(pool)
        .await
    }
}

pub mod plan_records {
    use super::*;
    use serde_json::Value;

    pub async fn insert(
        pool: &PgPool,
        tenant_id: i32,
        user_id: i32,
        plan: &Value,
    ) -> Result<PlanRecord, sqlx::Error> {
        sqlx::query_as::<_, PlanRecord>(
            r#"
            INSERT INTO plan_records (tenant_id, user_id, generated_plan)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(user_id)
        .bind(plan)
        .fetch_one(pool)
        .await
    }

    pub async fn list_desc(
        pool: &PgPool,
        tenant_id: i32,
        user_id: i32,
    ) -> Result<Vec<PlanRecord>, sqlx::Error> {
        sqlx::query_as::<_, PlanRecord>(
            r#"
            SELECT * FROM plan_records
            WHERE user_id = $1 AND tenant_id = $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(tenant_id)
        .fetch_all(pool)
        .await
    }
}

pub mod achievements {
    use super::*;
    use sqlx::{Postgres, Transaction};

    /// Unlock a named milestone. The unique constraint on
    /// (tenant_id, user_id, name) makes concurrent unlocks collapse to one
    /// row; the loser of the race is a no-op.
    pub async fn unlock_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        tenant_id: i32,
        user_id: i32,
        name: &str,
        description: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO achievements (tenant_id, user_id, name, description)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (tenant_id, user_id, name) DO NOTHING
            "#,
        )
        .bind(tenant_id)
        .bind(user_id)
        .bind(name)
        .bind(description)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    pub async fn list_desc(
        pool: &PgPool,
        tenant_id: i32,
        user_id: i32,
    ) -> Result<Vec<Achievement>, sqlx::Error> {
        sqlx::query_as::<_, Achievement>(
            r#"
            SELECT * FROM achievements
            WHERE user_id = $1 AND tenant_id = $2
            ORDER BY unlocked_at DESC
            "#,
        )
        .bind(user_id)
        .bind(tenant_id)
        .fetch_all(pool)
        .await
    }
}
