use serde_json::json;

use crate::auth::JwtService;
use crate::cli::OutputFormat;
use crate::config::AppConfig;

pub fn handle(config: AppConfig, user_id: i32, output_format: OutputFormat) -> anyhow::Result<()> {
    let jwt = JwtService::new(&config.security.jwt_secret, config.security.jwt_expiry_hours)?;
    let token = jwt.issue(user_id)?;

    match output_format {
        OutputFormat::Text => println!("{}", token),
        OutputFormat::Json => println!(
            "{}",
            json!({
                "user_id": user_id,
                "token": token,
                "expires_in_hours": config.security.jwt_expiry_hours
            })
        ),
    }
    Ok(())
}
