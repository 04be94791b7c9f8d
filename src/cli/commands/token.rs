use anyhow::Context;
use chrono::Duration;
use clap::Args;
use serde_json::json;
use uuid::Uuid;

use crate::auth::{Claims, TokenVerifier};
use crate::cli::OutputFormat;
use crate::config::AppConfig;

#[derive(Args)]
pub struct TokenArgs {
    #[arg(long, help = "User id placed in the `sub` claim")]
    pub sub: Uuid,

    #[arg(long, help = "Email claim")]
    pub email: String,

    #[arg(long, default_value = "free", help = "Subscription level claim")]
    pub subscription: String,

    #[arg(long, help = "Set the reduced-visibility flag")]
    pub ghost_mode: bool,

    #[arg(long, help = "Organization id claim")]
    pub org_id: Option<Uuid>,

    #[arg(long, help = "Lifetime in minutes (defaults to JWT_ACCESS_TOKEN_EXPIRE_MINUTES)")]
    pub expires_minutes: Option<i64>,
}

pub fn handle(args: TokenArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("failed to load configuration")?;
    let verifier = TokenVerifier::from_config(&config.security)?;

    let minutes = args
        .expires_minutes
        .unwrap_or(config.security.access_token_expire_minutes);
    let mut claims = Claims::new(args.sub, args.email, Duration::minutes(minutes));
    claims.subscription_level = args.subscription;
    claims.ghost_mode = args.ghost_mode;
    claims.org_id = args.org_id.map(|id| id.to_string());

    let token = verifier.issue(&claims)?;

    match output_format {
        OutputFormat::Json => println!(
            "{}",
            json!({
                "access_token": token,
                "token_type": "bearer",
                "expires_in": minutes * 60,
            })
        ),
        OutputFormat::Text => println!("{}", token),
    }
    Ok(())
}
