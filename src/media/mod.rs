//! 媒体存储
//!
//! 上传的媒体（目前只有头像）通过 `MediaStore` 保存，返回的 key 存入数据库，
//! 对外以 `/media/{key}` 地址提供访问。

pub mod avatar;
pub mod local;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::AppConfig;
use crate::errors::Result;

pub use local::LocalMediaStore;

#[async_trait]
pub trait MediaStore: Send + Sync {
    /// 保存内容，返回生成的 key（带扩展名）
    async fn save(&self, extension: &str, bytes: &[u8]) -> Result<String>;

    /// 读取内容，key 不存在时返回 None
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// 删除内容，key 不存在时视为成功
    async fn delete(&self, key: &str) -> Result<()>;
}

/// 按配置创建本地媒体存储
pub fn create_media_store() -> Result<Arc<dyn MediaStore>> {
    let config = AppConfig::get();
    Ok(Arc::new(LocalMediaStore::new(&config.media.dir)?))
}

/// 媒体对外地址，未配置 base_url 时返回站内路径
pub fn public_url(key: &str) -> String {
    public_url_with_base(&AppConfig::get().media.base_url, key)
}

fn public_url_with_base(base_url: &str, key: &str) -> String {
    format!("{}/media/{}", base_url.trim_end_matches('/'), key)
}

/// key 只允许字母数字、`-`、`_` 和单个扩展名点号
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key.len() <= 128
        && !key.starts_with('.')
        && key.matches('.').count() <= 1
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
