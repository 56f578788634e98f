//! 帖子汇总统计
//!
//! 帖子数、有效点赞数与有效评论数分别分组查询，再按分组键合并，
//! 避免多表 JOIN 后计数相互放大。

use std::collections::BTreeMap;

use super::SeaOrmStorage;
use crate::entity::comments::{Column as CommentColumn, Entity as Comments};
use crate::entity::likes::{Column as LikeColumn, Entity as Likes};
use crate::entity::posts::{Column as PostColumn, Entity as Posts};
use crate::errors::{Result, SocialError};
use crate::models::stats::{
    entities::{CategoryStats, TimeStats},
    responses::PostStatsResponse,
};
use chrono::NaiveDate;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QuerySelect, RelationTrait};

/// 分组计数行 (分组键, 帖子数, 点赞数, 评论数)
pub(crate) type MergedCounts<K> = Vec<(K, i64, i64, i64)>;

/// 以帖子分组为准合并点赞与评论计数，结果按分组键升序
pub(crate) fn merge_counts<K: Ord>(
    posts: Vec<(K, i64)>,
    likes: Vec<(K, i64)>,
    comments: Vec<(K, i64)>,
) -> MergedCounts<K> {
    let mut merged: BTreeMap<K, (i64, i64, i64)> = posts
        .into_iter()
        .map(|(key, count)| (key, (count, 0, 0)))
        .collect();

    for (key, count) in likes {
        if let Some(entry) = merged.get_mut(&key) {
            entry.1 += count;
        }
    }
    for (key, count) in comments {
        if let Some(entry) = merged.get_mut(&key) {
            entry.2 += count;
        }
    }

    merged
        .into_iter()
        .map(|(key, (posts, likes, comments))| (key, posts, likes, comments))
        .collect()
}

impl SeaOrmStorage {
    /// 按发布日期与分类汇总有效帖子
    pub async fn get_post_stats_impl(&self) -> Result<PostStatsResponse> {
        let stats_by_time = merge_counts(
            self.count_posts_by(PostColumn::CreatedDate).await?,
            self.count_likes_by(PostColumn::CreatedDate).await?,
            self.count_comments_by(PostColumn::CreatedDate).await?,
        )
        .into_iter()
        .map(
            |(created_date, post_count, likes_count, comments_count)| TimeStats {
                created_date,
                post_count,
                likes_count,
                comments_count,
            },
        )
        .collect();

        let stats_by_category = merge_counts(
            self.count_posts_by(PostColumn::CategoryId).await?,
            self.count_likes_by(PostColumn::CategoryId).await?,
            self.count_comments_by(PostColumn::CategoryId).await?,
        )
        .into_iter()
        .map(
            |(category, post_count, likes_count, comments_count)| CategoryStats {
                category,
                post_count,
                likes_count,
                comments_count,
            },
        )
        .collect();

        Ok(PostStatsResponse {
            stats_by_time,
            stats_by_category,
        })
    }

    async fn count_posts_by<K>(&self, key: PostColumn) -> Result<Vec<(K, i64)>>
    where
        (K, i64): sea_orm::TryGetableMany,
    {
        Posts::find()
            .select_only()
            .column(key)
            .column_as(PostColumn::Id.count(), "post_count")
            .filter(PostColumn::Active.eq(true))
            .group_by(key)
            .into_tuple::<(K, i64)>()
            .all(&self.db)
            .await
            .map_err(|e| SocialError::database_operation(format!("统计帖子失败: {e}")))
    }

    async fn count_likes_by<K>(&self, key: PostColumn) -> Result<Vec<(K, i64)>>
    where
        (K, i64): sea_orm::TryGetableMany,
    {
        Likes::find()
            .select_only()
            .column(key)
            .column_as(LikeColumn::Id.count(), "likes_count")
            .join(
                sea_orm::JoinType::InnerJoin,
                crate::entity::likes::Relation::Post.def(),
            )
            .filter(LikeColumn::Active.eq(true))
            .filter(PostColumn::Active.eq(true))
            .group_by(key)
            .into_tuple::<(K, i64)>()
            .all(&self.db)
            .await
            .map_err(|e| SocialError::database_operation(format!("统计点赞失败: {e}")))
    }

    async fn count_comments_by<K>(&self, key: PostColumn) -> Result<Vec<(K, i64)>>
    where
        (K, i64): sea_orm::TryGetableMany,
    {
        Comments::find()
            .select_only()
            .column(key)
            .column_as(CommentColumn::Id.count(), "comments_count")
            .join(
                sea_orm::JoinType::InnerJoin,
                crate::entity::comments::Relation::Post.def(),
            )
            .filter(CommentColumn::Active.eq(true))
            .filter(PostColumn::Active.eq(true))
            .group_by(key)
            .into_tuple::<(K, i64)>()
            .all(&self.db)
            .await
            .map_err(|e| SocialError::database_operation(format!("统计评论失败: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_merge_by_date() {
        let merged = merge_counts(
            vec![(day(2), 3), (day(1), 1)],
            vec![(day(2), 5)],
            vec![(day(1), 2), (day(2), 1)],
        );
        assert_eq!(merged, vec![(day(1), 1, 0, 2), (day(2), 3, 5, 1)]);
    }

    #[test]
    fn test_merge_ignores_groups_without_posts() {
        let merged = merge_counts(vec![(Some(1_i64), 2)], vec![(Some(9), 4)], vec![]);
        assert_eq!(merged, vec![(Some(1), 2, 0, 0)]);
    }

    #[test]
    fn test_merge_uncategorized_first() {
        let merged = merge_counts(vec![(Some(2_i64), 1), (None, 4)], vec![(None, 1)], vec![]);
        assert_eq!(merged[0], (None, 4, 1, 0));
        assert_eq!(merged[1], (Some(2), 1, 0, 0));
    }
}
