use std::future::IntoFuture;
use std::sync::Arc;

use age_gate::adapters::audit::WebhookAuditSink;
use age_gate::adapters::discord::{CachedGuildDirectory, DiscordRestClient};
use age_gate::adapters::http::{interactions_router, InteractionAppState, InteractionVerifier};
use age_gate::adapters::session::InMemorySessionGuard;
use age_gate::application::{
    AnnouncementStatus, FatalSignal, GateSettings, ResolveHomeQuery, VerificationContext,
};
use age_gate::config::AppConfig;
use age_gate::error::AppError;
use age_gate::telemetry;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        error!(error = %err, "age gate stopped");
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    config.validate()?;

    telemetry::init(&config.server)?;

    let settings = Arc::new(GateSettings::from_config(&config)?);
    let platform = Arc::new(DiscordRestClient::new(&config.discord)?);
    let directory = Arc::new(CachedGuildDirectory::new(platform.clone()));
    let audit_sink = Arc::new(WebhookAuditSink::new(
        &config.audit,
        config.discord.request_timeout(),
    )?);
    let sessions = Arc::new(InMemorySessionGuard::new(
        config.verification.session_ttl_secs,
    ));
    let (fatal, mut fatal_listener) = FatalSignal::channel();

    let context = VerificationContext {
        settings: settings.clone(),
        directory,
        moderation: platform.clone(),
        messenger: platform.clone(),
        responder: platform,
        audit_sink,
        sessions,
        fatal,
    };

    context
        .resolve_home()
        .handle(ResolveHomeQuery {
            guild_id: settings.guild_id.clone(),
            channel_id: settings.channel_id.clone(),
            role_id: settings.role_id.clone(),
        })
        .await?;

    match context.ensure_announcement().handle().await? {
        AnnouncementStatus::AlreadyPresent(id) => info!(message_id = %id, "announcement present"),
        AnnouncementStatus::Posted(id) => info!(message_id = %id, "announcement posted"),
    }

    let verifier = InteractionVerifier::from_hex(&config.discord.public_key)?;
    let app = interactions_router(InteractionAppState::new(context, verifier));

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(?config.server.environment, %addr, guild_id = %settings.guild_id, "age gate ready");

    tokio::select! {
        served = axum::serve(listener, app).into_future() => served?,
        fatal = fatal_listener.triggered() => return Err(fatal.into()),
        _ = tokio::signal::ctrl_c() => info!("shutdown requested"),
    }

    Ok(())
}
