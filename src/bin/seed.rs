//! Idempotent fixture data for local development: the seeded admin account,
//! marketing content, and a couple of sample clients/projects/transactions.

use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

use agency_api::auth::passwords::PasswordService;

#[derive(Parser, Debug)]
#[command(name = "seed", about = "Populate the agency database with fixture data")]
struct Args {
    /// Password for the seeded admin account.
    #[arg(long, default_value = "admin123")]
    admin_password: String,

    /// Skip inserting sample clients, projects, and transactions.
    #[arg(long)]
    content_only: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args = Args::parse();

    let database_url = std::env::var("DATABASE_URL")?;
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    agency_api::db::run_migrations(&pool).await?;

    seed_users(&pool, &args.admin_password).await?;
    seed_content(&pool).await?;
    if !args.content_only {
        seed_back_office(&pool).await?;
    }

    log::info!("seed complete");
    Ok(())
}

async fn seed_users(pool: &PgPool, admin_password: &str) -> Result<(), Box<dyn std::error::Error>> {
    let passwords = PasswordService::new()?;

    let accounts = [
        ("admin@example.com", "Site Admin", "admin", Some(admin_password)),
        ("editor@example.com", "Content Editor", "editor", Some("editor123")),
        ("viewer@example.com", "Read Only", "viewer", Some("viewer123")),
    ];

    for (email, name, role, password) in accounts {
        let hash = match password {
            Some(plain) => Some(passwords.hash_password(plain)?),
            None => None,
        };
        let inserted = sqlx::query(
            r#"INSERT INTO users (email, display_name, role, password_hash)
               VALUES ($1, $2, $3, $4)
               ON CONFLICT (lower(email)) DO NOTHING"#,
        )
        .bind(email)
        .bind(name)
        .bind(role)
        .bind(hash)
        .execute(pool)
        .await?;

        if inserted.rows_affected() > 0 {
            log::info!("seeded {role} account '{email}'");
        }
    }

    Ok(())
}

async fn seed_content(pool: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let services = [
        ("Web Development", "Full-stack web applications built to order.", "code", 1),
        ("Mobile Apps", "Native and cross-platform mobile development.", "smartphone", 2),
        ("Cloud & DevOps", "Infrastructure, CI/CD, and platform engineering.", "cloud", 3),
        ("Consulting", "Architecture reviews and technical due diligence.", "compass", 4),
    ];
    for (title, description, icon, order) in services {
        sqlx::query(
            r#"INSERT INTO services (title, description, icon, display_order)
               SELECT $1, $2, $3, $4
               WHERE NOT EXISTS (SELECT 1 FROM services WHERE title = $1)"#,
        )
        .bind(title)
        .bind(description)
        .bind(icon)
        .bind(order)
        .execute(pool)
        .await?;
    }

    let team = [
        ("Maya Lindqvist", "Founder & CEO", 1),
        ("Jon Park", "Lead Engineer", 2),
        ("Priya Nair", "Design Director", 3),
    ];
    for (name, role_title, order) in team {
        sqlx::query(
            r#"INSERT INTO team_members (name, role_title, display_order)
               SELECT $1, $2, $3
               WHERE NOT EXISTS (SELECT 1 FROM team_members WHERE name = $1)"#,
        )
        .bind(name)
        .bind(role_title)
        .bind(order)
        .execute(pool)
        .await?;
    }

    let testimonials = [
        ("Elena Ruiz", "Northwind Retail", "They shipped on time and the quality spoke for itself.", 1),
        ("Tom Becker", "Acme Logistics", "The team felt like an extension of our own.", 2),
    ];
    for (author, company, quote, order) in testimonials {
        sqlx::query(
            r#"INSERT INTO testimonials (author, company, quote, display_order)
               SELECT $1, $2, $3, $4
               WHERE NOT EXISTS (SELECT 1 FROM testimonials WHERE author = $1)"#,
        )
        .bind(author)
        .bind(company)
        .bind(quote)
        .bind(order)
        .execute(pool)
        .await?;
    }

    Ok(())
}

async fn seed_back_office(pool: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let client_row = sqlx::query(
        r#"INSERT INTO clients (name, company, email)
           SELECT $1, $2, $3
           WHERE NOT EXISTS (SELECT 1 FROM clients WHERE email = $3)
           RETURNING id"#,
    )
    .bind("Elena Ruiz")
    .bind("Northwind Retail")
    .bind("elena@northwind.example")
    .fetch_optional(pool)
    .await?;

    let client_id: i32 = match client_row {
        Some(row) => row.try_get("id")?,
        None => {
            sqlx::query_scalar("SELECT id FROM clients WHERE email = $1")
                .bind("elena@northwind.example")
                .fetch_one(pool)
                .await?
        }
    };

    sqlx::query(
        r#"INSERT INTO projects (client_id, title, slug, description, tech_stack, published)
           VALUES ($1, $2, $3, $4, $5, true)
           ON CONFLICT (slug) DO NOTHING"#,
    )
    .bind(client_id)
    .bind("Northwind Storefront")
    .bind("northwind-storefront")
    .bind("E-commerce replatform with a headless storefront.")
    .bind("Rust, PostgreSQL, React")
    .execute(pool)
    .await?;

    sqlx::query(
        r#"INSERT INTO transactions (client_id, amount_cents, currency, status, notes)
           SELECT $1, $2, $3, $4, $5
           WHERE NOT EXISTS (SELECT 1 FROM transactions WHERE client_id = $1 AND notes = $5)"#,
    )
    .bind(client_id)
    .bind(1_250_000_i64)
    .bind("USD")
    .bind("paid")
    .bind("Storefront phase 1 invoice")
    .execute(pool)
    .await?;

    Ok(())
}
