// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Seed the database with a demo user and a few sample applications.
//!
//! Idempotent: re-running against a seeded database changes nothing.

use jobhunt::db::MongoDb;
use jobhunt::models::{Application, ApplicationStatus};
use jobhunt::services::hash_password;
use mongodb::bson::DateTime;

const DEMO_EMAIL: &str = "demo@jobhunt.dev";
const DEMO_PASSWORD: &str = "Demo123!";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().init();

    let uri = std::env::var("MONGODB_URI")
        .unwrap_or_else(|_| "mongodb://localhost:27017/jobhunt".to_string());
    let db = MongoDb::connect(&uri).await?;

    let user = match db.find_user_by_email(DEMO_EMAIL).await? {
        Some(user) => {
            tracing::info!(email = DEMO_EMAIL, "Demo user already exists");
            user
        }
        None => {
            let password_hash = hash_password(DEMO_PASSWORD)?;
            let user = db.insert_user(DEMO_EMAIL, &password_hash).await?;
            tracing::info!(email = DEMO_EMAIL, "Created demo user");
            user
        }
    };

    let owner = user
        .id
        .ok_or_else(|| anyhow::anyhow!("Demo user has no id"))?;

    if db.count_applications(owner).await? > 0 {
        tracing::info!("Applications already exist, skipping seed");
        return Ok(());
    }

    let now = DateTime::now();
    let in_three_days = DateTime::from_millis(now.timestamp_millis() + 3 * 24 * 60 * 60 * 1000);

    let samples = [
        Application {
            id: None,
            user_id: owner,
            company: "Acme Co".to_string(),
            role: "Junior Full-Stack Developer".to_string(),
            location: "Sydney".to_string(),
            link: "https://example.com".to_string(),
            salary_range: String::new(),
            status: ApplicationStatus::Applied,
            next_action_at: None,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        },
        Application {
            id: None,
            user_id: owner,
            company: "Example Pty".to_string(),
            role: "React Developer".to_string(),
            location: "Melbourne".to_string(),
            link: String::new(),
            salary_range: String::new(),
            status: ApplicationStatus::Interview,
            next_action_at: Some(in_three_days),
            notes: String::new(),
            created_at: now,
            updated_at: now,
        },
        Application {
            id: None,
            user_id: owner,
            company: "Startup X".to_string(),
            role: "Node.js Developer".to_string(),
            location: "Brisbane".to_string(),
            link: String::new(),
            salary_range: String::new(),
            status: ApplicationStatus::Rejected,
            next_action_at: None,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        },
    ];

    for sample in samples {
        db.insert_application(sample).await?;
    }

    tracing::info!("Seeded sample applications");
    Ok(())
}
