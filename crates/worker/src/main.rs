//! Reminder worker binary.
//!
//! Bootstraps env + tracing, connects to the database, and either runs one
//! reminder batch (`--once`, for an external cron trigger) or owns the
//! periodic scheduler loop until Ctrl-C.

use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trellis_reminders::{EmailConfig, EmailDelivery, Mailer, ReminderBatchRunner, ReminderScheduler};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "trellis_worker=debug,trellis_reminders=debug,trellis_db=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = trellis_db::create_pool(&database_url)
        .await
        .context("failed to connect to database")?;
    trellis_db::health_check(&pool)
        .await
        .context("database health check failed")?;

    let Some(email_config) = EmailConfig::from_env() else {
        tracing::warn!("SMTP_HOST not set; reminder worker has no mail transport, exiting");
        return Ok(());
    };
    let mailer: Arc<dyn Mailer> = Arc::new(EmailDelivery::new(email_config));

    if std::env::args().any(|arg| arg == "--once") {
        let summary = ReminderBatchRunner::new(pool, mailer).run(Utc::now()).await;
        tracing::info!(
            sent = summary.sent,
            failed = summary.failed,
            skipped = summary.skipped,
            "Single reminder run complete"
        );
        for error in &summary.errors {
            tracing::warn!(error = %error, "Run error");
        }
        return Ok(());
    }

    tracing::info!("Reminder worker starting");

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Ctrl-C received, shutting down");
            signal_cancel.cancel();
        }
    });

    ReminderScheduler::new(pool, mailer).run(cancel).await;

    Ok(())
}
