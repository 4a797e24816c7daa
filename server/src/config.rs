/// Application configuration, loaded once in `main` and injected into the
/// router state.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub environment: String,
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn load() -> Self {
        let environment = std::env::var("EMS_ENV").unwrap_or_else(|_| "development".into());

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .filter_map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect::<Vec<_>>();

        Self {
            environment,
            cors_allowed_origins,
        }
    }
}
