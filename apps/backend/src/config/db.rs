use super::Sensitive;

/// PostgreSQL connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Sensitive,
    pub name: String,
}

impl DbConfig {
    /// Connection URL including credentials. Never log the result directly.
    pub fn url(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.user,
            self.password.expose(),
            self.host,
            self.port,
            self.name
        )
    }

    /// Connection URL with the password masked, safe for logs
    pub fn display_url(&self) -> String {
        format!(
            "postgresql://{}:***@{}:{}/{}",
            self.user, self.host, self.port, self.name
        )
    }
}
