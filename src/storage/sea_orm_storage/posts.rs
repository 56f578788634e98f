//! 帖子存储操作
//!
//! 帖子、标签关联与统计行在同一事务中维护。

use std::collections::HashMap;

use super::{SeaOrmStorage, today};
use crate::entity::hashtags::{
    ActiveModel as HashtagActiveModel, Column as HashtagColumn, Entity as Hashtags,
    Model as HashtagModel,
};
use crate::entity::post_hashtags::{
    ActiveModel as PostHashtagActiveModel, Column as PostHashtagColumn, Entity as PostHashtags,
};
use crate::entity::post_statistics::{
    ActiveModel as StatisticsActiveModel, Column as StatisticsColumn, Entity as PostStatisticsTable,
};
use crate::entity::posts::{ActiveModel, Column, Entity as Posts};
use crate::errors::{Result, SocialError};
use crate::models::{
    PaginationInfo, PaginationQuery,
    hashtags::{entities::Hashtag, requests::HashtagInput},
    posts::{
        entities::{PostStatistics, PostWithHashtags},
        requests::{CreatePostRequest, UpdatePostRequest},
        responses::PostListResponse,
    },
};
use sea_orm::sea_query::{Expr, ExprTrait, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

/// 规范化标签名：去除首尾空白，跳过空名，保持首次出现的顺序去重
pub(crate) fn normalize_hashtag_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = std::collections::HashSet::new();
    names
        .into_iter()
        .map(|n| n.as_ref().trim().to_string())
        .filter(|n| !n.is_empty() && seen.insert(n.clone()))
        .collect()
}

/// 按名称获取或创建标签，唯一索引冲突时读取已存在的行
async fn get_or_create_hashtags<C: ConnectionTrait>(
    conn: &C,
    names: &[String],
) -> Result<Vec<HashtagModel>> {
    let mut result = Vec::with_capacity(names.len());
    let date = today();

    for name in names {
        let existing = Hashtags::find()
            .filter(HashtagColumn::Name.eq(name.as_str()))
            .one(conn)
            .await
            .map_err(|e| SocialError::database_operation(format!("查询标签失败: {e}")))?;

        let model = match existing {
            Some(model) => model,
            None => {
                Hashtags::insert(HashtagActiveModel {
                    name: Set(name.clone()),
                    active: Set(true),
                    created_date: Set(date),
                    updated_date: Set(date),
                    ..Default::default()
                })
                .on_conflict(
                    OnConflict::column(HashtagColumn::Name)
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(conn)
                .await
                .map_err(|e| SocialError::database_operation(format!("创建标签失败: {e}")))?;

                Hashtags::find()
                    .filter(HashtagColumn::Name.eq(name.as_str()))
                    .one(conn)
                    .await
                    .map_err(|e| SocialError::database_operation(format!("查询标签失败: {e}")))?
                    .ok_or_else(|| {
                        SocialError::database_operation(format!("标签创建后不存在: {name}"))
                    })?
            }
        };
        result.push(model);
    }

    Ok(result)
}

/// 关联帖子与标签，已存在的关联忽略
async fn link_hashtags<C: ConnectionTrait>(
    conn: &C,
    post_id: i64,
    hashtags: &[HashtagModel],
) -> Result<()> {
    for hashtag in hashtags {
        PostHashtags::insert(PostHashtagActiveModel {
            post_id: Set(post_id),
            hashtag_id: Set(hashtag.id),
        })
        .on_conflict(
            OnConflict::columns([PostHashtagColumn::PostId, PostHashtagColumn::HashtagId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await
        .map_err(|e| SocialError::database_operation(format!("关联标签失败: {e}")))?;
    }
    Ok(())
}

/// 批量加载帖子的标签
async fn load_hashtags<C: ConnectionTrait>(
    conn: &C,
    post_ids: &[i64],
) -> Result<HashMap<i64, Vec<Hashtag>>> {
    let mut map: HashMap<i64, Vec<Hashtag>> = HashMap::new();
    if post_ids.is_empty() {
        return Ok(map);
    }

    let rows = PostHashtags::find()
        .filter(PostHashtagColumn::PostId.is_in(post_ids.iter().copied()))
        .find_also_related(Hashtags)
        .order_by_asc(PostHashtagColumn::HashtagId)
        .all(conn)
        .await
        .map_err(|e| SocialError::database_operation(format!("查询帖子标签失败: {e}")))?;

    for (link, hashtag) in rows {
        if let Some(hashtag) = hashtag {
            map.entry(link.post_id)
                .or_default()
                .push(hashtag.into_hashtag());
        }
    }

    Ok(map)
}

/// 调整帖子统计中的评论数与点赞数
pub(crate) async fn adjust_post_statistics<C: ConnectionTrait>(
    conn: &C,
    post_id: i64,
    comment_delta: i64,
    like_delta: i64,
) -> Result<()> {
    let mut update = PostStatisticsTable::update_many()
        .col_expr(StatisticsColumn::UpdatedDate, Expr::value(today()))
        .filter(StatisticsColumn::PostId.eq(post_id));

    if comment_delta != 0 {
        update = update.col_expr(
            StatisticsColumn::CommentCount,
            Expr::col(StatisticsColumn::CommentCount).add(comment_delta),
        );
    }
    if like_delta != 0 {
        update = update.col_expr(
            StatisticsColumn::LikeCount,
            Expr::col(StatisticsColumn::LikeCount).add(like_delta),
        );
    }

    update
        .exec(conn)
        .await
        .map_err(|e| SocialError::database_operation(format!("更新帖子统计失败: {e}")))?;
    Ok(())
}

fn hashtag_names(inputs: &[HashtagInput]) -> Vec<String> {
    normalize_hashtag_names(inputs.iter().map(|h| h.name.as_str()))
}

impl SeaOrmStorage {
    /// 创建帖子
    pub async fn create_post_impl(
        &self,
        user_id: i64,
        req: CreatePostRequest,
    ) -> Result<PostWithHashtags> {
        let date = today();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SocialError::database_operation(format!("开启事务失败: {e}")))?;

        let post = ActiveModel {
            user_id: Set(user_id),
            title: Set(req.title),
            content: Set(req.content),
            category_id: Set(req.category),
            active: Set(true),
            created_date: Set(date),
            updated_date: Set(date),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| SocialError::database_operation(format!("创建帖子失败: {e}")))?;

        let hashtags = get_or_create_hashtags(&txn, &hashtag_names(&req.hashtag)).await?;
        link_hashtags(&txn, post.id, &hashtags).await?;

        StatisticsActiveModel {
            post_id: Set(post.id),
            comment_count: Set(0),
            like_count: Set(0),
            active: Set(true),
            created_date: Set(date),
            updated_date: Set(date),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| SocialError::database_operation(format!("创建帖子统计失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| SocialError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(PostWithHashtags {
            post: post.into_post(),
            hashtags: hashtags.into_iter().map(|h| h.into_hashtag()).collect(),
        })
    }

    /// 获取有效帖子
    pub async fn get_active_post_impl(&self, id: i64) -> Result<Option<PostWithHashtags>> {
        let Some(post) = Posts::find_by_id(id)
            .filter(Column::Active.eq(true))
            .one(&self.db)
            .await
            .map_err(|e| SocialError::database_operation(format!("查询帖子失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut hashtags = load_hashtags(&self.db, &[post.id]).await?;
        Ok(Some(PostWithHashtags {
            hashtags: hashtags.remove(&post.id).unwrap_or_default(),
            post: post.into_post(),
        }))
    }

    /// 部分更新帖子
    pub async fn update_post_impl(
        &self,
        id: i64,
        update: UpdatePostRequest,
    ) -> Result<Option<PostWithHashtags>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SocialError::database_operation(format!("开启事务失败: {e}")))?;

        let Some(existing) = Posts::find_by_id(id)
            .filter(Column::Active.eq(true))
            .one(&txn)
            .await
            .map_err(|e| SocialError::database_operation(format!("查询帖子失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(title) = update.title {
            model.title = Set(Some(title));
        }
        if let Some(content) = update.content {
            model.content = Set(content);
        }
        if let Some(category) = update.category {
            model.category_id = Set(category);
        }
        model.updated_date = Set(today());

        let post = model
            .update(&txn)
            .await
            .map_err(|e| SocialError::database_operation(format!("更新帖子失败: {e}")))?;

        // 提供 hashtag 时整体替换
        if let Some(inputs) = update.hashtag {
            PostHashtags::delete_many()
                .filter(PostHashtagColumn::PostId.eq(id))
                .exec(&txn)
                .await
                .map_err(|e| SocialError::database_operation(format!("清除帖子标签失败: {e}")))?;
            let hashtags = get_or_create_hashtags(&txn, &hashtag_names(&inputs)).await?;
            link_hashtags(&txn, id, &hashtags).await?;
        }

        let mut hashtags = load_hashtags(&txn, &[id]).await?;

        txn.commit()
            .await
            .map_err(|e| SocialError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some(PostWithHashtags {
            post: post.into_post(),
            hashtags: hashtags.remove(&id).unwrap_or_default(),
        }))
    }

    /// 删除帖子，评论、点赞、举报、统计、竞拍与标签关联由外键级联删除
    pub async fn delete_post_impl(&self, id: i64) -> Result<bool> {
        let result = Posts::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::Active.eq(true))
            .exec(&self.db)
            .await
            .map_err(|e| SocialError::database_operation(format!("删除帖子失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 分页列出有效帖子
    pub async fn list_active_posts_impl(&self, query: PaginationQuery) -> Result<PostListResponse> {
        let (page, size) = query.normalized();

        let paginator = Posts::find()
            .filter(Column::Active.eq(true))
            .order_by_desc(Column::CreatedDate)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| SocialError::database_operation(format!("查询帖子总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SocialError::database_operation(format!("查询帖子页数失败: {e}")))?;
        let posts = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SocialError::database_operation(format!("查询帖子列表失败: {e}")))?;

        let ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
        let mut hashtags = load_hashtags(&self.db, &ids).await?;

        let items = posts
            .into_iter()
            .map(|p| {
                PostWithHashtags {
                    hashtags: hashtags.remove(&p.id).unwrap_or_default(),
                    post: p.into_post(),
                }
                .into()
            })
            .collect();

        Ok(PostListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 给帖子追加标签
    pub async fn add_hashtags_to_post_impl(
        &self,
        post_id: i64,
        names: Vec<String>,
    ) -> Result<Vec<Hashtag>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SocialError::database_operation(format!("开启事务失败: {e}")))?;

        let hashtags = get_or_create_hashtags(&txn, &normalize_hashtag_names(names)).await?;
        link_hashtags(&txn, post_id, &hashtags).await?;

        txn.commit()
            .await
            .map_err(|e| SocialError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(hashtags.into_iter().map(|h| h.into_hashtag()).collect())
    }

    /// 获取帖子统计
    pub async fn get_post_statistics_impl(&self, post_id: i64) -> Result<Option<PostStatistics>> {
        let result = PostStatisticsTable::find()
            .filter(StatisticsColumn::PostId.eq(post_id))
            .one(&self.db)
            .await
            .map_err(|e| SocialError::database_operation(format!("查询帖子统计失败: {e}")))?;

        Ok(result.map(|m| m.into_statistics()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_hashtag_names() {
        let names = normalize_hashtag_names(["rust", " rust ", "", "web", "  "]);
        assert_eq!(names, vec!["rust".to_string(), "web".to_string()]);
    }
}
