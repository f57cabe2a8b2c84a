use serde::Deserialize;

/// Auth service configuration loaded from environment variables.
///
/// Field names map to upper-case env vars (`DATABASE_URL`, `JWT_TTL_MINUTES`, ...).
#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Redis connection URL, used for token revocation.
    pub redis_url: String,
    /// HMAC secret for signing access tokens.
    pub jwt_secret: String,
    /// Access token lifetime in minutes (default 60).
    #[serde(default = "default_jwt_ttl_minutes")]
    pub jwt_ttl_minutes: u64,
    /// TCP port to listen on (default 3112).
    #[serde(default = "default_auth_port")]
    pub auth_port: u16,
    /// Deployment environment. Anything but `production` echoes login codes
    /// in the login response.
    #[serde(default = "default_app_env")]
    pub app_env: String,
    /// SMTP relay host. Login-code mails are skipped when unset.
    pub smtp_host: Option<String>,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    #[serde(default = "default_mail_from")]
    pub mail_from: String,
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_argon2_m_cost")]
    pub argon2_m_cost: u32,
    /// Argon2 passes.
    #[serde(default = "default_argon2_t_cost")]
    pub argon2_t_cost: u32,
}

fn default_jwt_ttl_minutes() -> u64 {
    60
}

fn default_auth_port() -> u16 {
    3112
}

fn default_app_env() -> String {
    "production".to_owned()
}

fn default_smtp_port() -> u16 {
    465
}

fn default_mail_from() -> String {
    "Vitrine <no-reply@vitrine.local>".to_owned()
}

fn default_argon2_m_cost() -> u32 {
    19_456
}

fn default_argon2_t_cost() -> u32 {
    2
}

impl vitrine_core::config::Config for AuthConfig {}

impl AuthConfig {
    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    pub fn jwt_ttl_secs(&self) -> u64 {
        self.jwt_ttl_minutes * 60
    }

    /// Username and password, when both are set.
    pub fn smtp_credentials(&self) -> Option<(String, String)> {
        self.smtp_username.clone().zip(self.smtp_password.clone())
    }
}
