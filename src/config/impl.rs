use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::{AppConfig, OAuth2Client};

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    /// 加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            // 首先加载默认配置文件
            .add_source(File::with_name("config").required(false))
            // 然后根据环境加载特定配置文件
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // 最后加载环境变量覆盖，例如 SOCIAL_SERVER__PORT=8080
            .add_source(
                Environment::with_prefix("SOCIAL")
                    .separator("__")
                    .try_parsing(true),
            );

        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("server.unix_socket_path", std::env::var("UNIX_SOCKET").ok())?
            .set_override_option("server.workers", std::env::var("CPU_COUNT").ok())?
            .set_override_option("jwt.secret", std::env::var("JWT_SECRET").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("cache.redis.url", std::env::var("REDIS_URL").ok())?
            .set_override_option(
                "cache.redis.key_prefix",
                std::env::var("REDIS_KEY_PREFIX").ok(),
            )?
            .set_override_option("media.dir", std::env::var("MEDIA_DIR").ok())?
            .set_override_option("media.base_url", std::env::var("MEDIA_BASE_URL").ok())?;

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        // 处理工作线程数
        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers);
        }

        Ok(app_config)
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    /// 获取服务器绑定地址
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 获取 Unix 套接字路径 (如果配置了)
    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        if self.server.unix_socket_path.is_empty() {
            None
        } else {
            Some(&self.server.unix_socket_path)
        }
    }

    /// 校验 OAuth2 客户端凭据，public 客户端忽略 secret
    pub fn find_oauth2_client(
        &self,
        client_id: &str,
        client_secret: Option<&str>,
    ) -> Option<&OAuth2Client> {
        self.oauth2.clients.iter().find(|client| {
            client.client_id == client_id
                && (client.public || client_secret == Some(client.client_secret.as_str()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loads_repository_config() {
        let config = AppConfig::get();
        assert!(!config.oauth2.scopes.is_empty());
        assert!(config.server_bind_address().contains(':'));
    }

    #[test]
    fn test_find_oauth2_client_checks_secret() {
        let mut config = AppConfig::get().clone();
        config.oauth2.clients = vec![
            OAuth2Client {
                client_id: "mobile".into(),
                client_secret: "s3cret".into(),
                public: false,
            },
            OAuth2Client {
                client_id: "web".into(),
                client_secret: String::new(),
                public: true,
            },
        ];

        assert!(config.find_oauth2_client("mobile", Some("s3cret")).is_some());
        assert!(config.find_oauth2_client("mobile", Some("wrong")).is_none());
        assert!(config.find_oauth2_client("mobile", None).is_none());
        assert!(config.find_oauth2_client("web", None).is_some());
        assert!(config.find_oauth2_client("unknown", Some("s3cret")).is_none());
    }
}
