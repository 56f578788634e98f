use crate::cache::{
    ObjectCache,
    register::{get_object_cache_plugin, registered_object_caches},
};
use crate::config::AppConfig;
use crate::errors::{Result, SocialError};
use crate::media::{MediaStore, create_media_store};
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::random_code::generate_random_code;
use std::sync::Arc;
use tracing::{debug, info, warn};

const FALLBACK_CACHE: &str = "moka";
const SUPERUSER_NAME: &str = "admin";

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
    pub media: Arc<dyn MediaStore>,
}

async fn build_cache(name: &str) -> Result<Arc<dyn ObjectCache>> {
    let constructor = get_object_cache_plugin(name).ok_or_else(|| {
        SocialError::cache_plugin_not_found(format!("Cache backend '{name}' is not registered"))
    })?;
    Ok(Arc::from(constructor().await?))
}

/// 按配置创建缓存，失败时回退到进程内缓存
async fn create_cache() -> Result<Arc<dyn ObjectCache>> {
    let cache_type = &AppConfig::get().cache.cache_type;

    match build_cache(cache_type).await {
        Ok(cache) => {
            warn!("Using {} cache backend", cache_type);
            Ok(cache)
        }
        Err(e) if cache_type != FALLBACK_CACHE => {
            warn!("{}; falling back to {} cache", e, FALLBACK_CACHE);
            build_cache(FALLBACK_CACHE).await
        }
        Err(e) => Err(e),
    }
}

/// 数据库中没有任何用户时创建超级用户
///
/// 密码取自 SUPERUSER_PASSWORD，未设置时随机生成并打印到日志。
async fn seed_superuser(storage: &Arc<dyn Storage>) {
    match storage.count_users().await {
        Ok(0) => info!("No users found in database, creating superuser '{}'", SUPERUSER_NAME),
        Ok(count) => {
            debug!("Database already has {} user(s), skipping superuser seed", count);
            return;
        }
        Err(e) => {
            warn!("Failed to count users: {}, skipping superuser seed", e);
            return;
        }
    }

    let password = std::env::var("SUPERUSER_PASSWORD").unwrap_or_else(|_| {
        let generated = generate_random_code(20);
        warn!("==========================================================");
        warn!("  SUPERUSER_PASSWORD not set, generated password: {}", generated);
        warn!("==========================================================");
        generated
    });

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash superuser password: {}", e);
            return;
        }
    };

    let request = CreateUserRequest {
        username: SUPERUSER_NAME.to_string(),
        email: format!("{SUPERUSER_NAME}@localhost"),
        password: password_hash,
        first_name: String::new(),
        last_name: String::new(),
        avatar: None,
        is_staff: true,
        is_superuser: true,
    };

    match storage.create_user(request).await {
        Ok(user) => info!("Superuser created (ID: {})", user.id),
        Err(e) => warn!("Failed to create superuser: {}", e),
    }
}

/// 准备服务器启动的上下文：存储、缓存和媒体存储
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    debug!("Registered cache backends: {:?}", registered_object_caches());

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    seed_superuser(&storage).await;

    let cache = create_cache().await.expect("Failed to create cache");

    let media = create_media_store().expect("Failed to create media store");
    warn!("Media store initialized at {}", AppConfig::get().media.dir);

    StartupContext {
        storage,
        cache,
        media,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    #[tokio::test]
    async fn test_seed_superuser_only_on_empty_database() {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::connect_memory().await.unwrap());

        seed_superuser(&storage).await;
        let admin = storage.get_user_by_username(SUPERUSER_NAME).await.unwrap().unwrap();
        assert!(admin.is_superuser && admin.is_staff);

        seed_superuser(&storage).await;
        assert_eq!(storage.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unknown_cache_backend_is_an_error() {
        let err = build_cache("memcached").await.err().unwrap();
        assert_eq!(err.code(), "E002");
    }
}
