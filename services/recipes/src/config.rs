/// Recipes service configuration loaded from environment variables.
#[derive(Debug)]
pub struct RecipesConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3113). Env var: `RECIPES_PORT`.
    pub recipes_port: u16,
    /// Directory uploaded images are written to (default `media`). Env var: `MEDIA_ROOT`.
    pub media_root: String,
    /// URL prefix media is served under (default `/media`). Env var: `MEDIA_URL`.
    pub media_url: String,
    /// Base URL for short links (default `http://localhost:3113`). Env var: `PUBLIC_URL`.
    pub public_url: String,
}

impl RecipesConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url =
            lookup("DATABASE_URL").ok_or_else(|| anyhow::anyhow!("DATABASE_URL is not set"))?;
        Ok(Self {
            database_url,
            recipes_port: lookup("RECIPES_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(3113),
            media_root: lookup("MEDIA_ROOT").unwrap_or_else(|| "media".to_owned()),
            media_url: trim_slash(lookup("MEDIA_URL").unwrap_or_else(|| "/media".to_owned())),
            public_url: trim_slash(
                lookup("PUBLIC_URL").unwrap_or_else(|| "http://localhost:3113".to_owned()),
            ),
        })
    }
}

fn trim_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
