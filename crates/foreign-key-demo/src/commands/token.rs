//! Token command - Issues a bearer token for local testing.

use api_kit::auth::{Authenticator, TokenService};
use api_kit::config::ENV_TOKEN_SECRET_KEY;
use api_kit::{AppError, AppResult, Config};

use crate::cli::args::TokenArgs;

/// Execute the token command
pub fn execute(args: TokenArgs, config: Config) -> AppResult<()> {
    let token_config = config.token.ok_or_else(|| {
        AppError::configuration(format!("{} is not set", ENV_TOKEN_SECRET_KEY))
    })?;

    let token = Authenticator::new(token_config).issue(&args.subject)?;
    let json = serde_json::to_string_pretty(&token)
        .map_err(|e| AppError::internal(format!("Failed to encode token: {}", e)))?;

    println!("{}", json);
    Ok(())
}
