use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, EntityTrait, IntoActiveModel};

use crate::{error::TestError, TestSetup};

impl TestSetup {
    pub fn post<'a>(&'a self) -> PostFixtures<'a> {
        PostFixtures { setup: self }
    }
}

pub struct PostFixtures<'a> {
    setup: &'a TestSetup,
}

impl<'a> PostFixtures<'a> {
    /// Inserts a community post and bumps the community's `posts_count`.
    pub async fn insert_community_post(
        &self,
        community_id: i32,
        author: &entity::civitas_user::Model,
        content: &str,
    ) -> Result<entity::community_post::Model, TestError> {
        let db = &self.setup.state.db;
        let now = Utc::now().naive_utc();

        let post = entity::prelude::CommunityPost::insert(entity::community_post::ActiveModel {
            community_id: ActiveValue::Set(community_id),
            author_id: ActiveValue::Set(author.id),
            author_display_name: ActiveValue::Set(author.display_name.clone()),
            content: ActiveValue::Set(content.to_string()),
            likes_count: ActiveValue::Set(0),
            comments_count: ActiveValue::Set(0),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(db)
        .await?;

        if let Some(community) = entity::prelude::Community::find_by_id(community_id)
            .one(db)
            .await?
        {
            let posts_count = community.posts_count;
            let mut community = community.into_active_model();
            community.posts_count = ActiveValue::Set(posts_count + 1);
            community.update(db).await?;
        }

        Ok(post)
    }

    /// Inserts a comment on a community post and bumps the post's `comments_count`.
    pub async fn insert_community_comment(
        &self,
        post: &entity::community_post::Model,
        author: &entity::civitas_user::Model,
        content: &str,
    ) -> Result<entity::community_post_comment::Model, TestError> {
        let db = &self.setup.state.db;

        let comment = entity::prelude::CommunityPostComment::insert(
            entity::community_post_comment::ActiveModel {
                post_id: ActiveValue::Set(post.id),
                community_id: ActiveValue::Set(post.community_id),
                author_id: ActiveValue::Set(author.id),
                author_display_name: ActiveValue::Set(author.display_name.clone()),
                content: ActiveValue::Set(content.to_string()),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            },
        )
        .exec_with_returning(db)
        .await?;

        if let Some(post) = entity::prelude::CommunityPost::find_by_id(post.id)
            .one(db)
            .await?
        {
            let comments_count = post.comments_count;
            let mut post = post.into_active_model();
            post.comments_count = ActiveValue::Set(comments_count + 1);
            post.update(db).await?;
        }

        Ok(comment)
    }

    /// Inserts an alliance post tagged with `community`.
    pub async fn insert_alliance_post(
        &self,
        alliance_id: i32,
        author: &entity::civitas_user::Model,
        community: &entity::community::Model,
        content: &str,
    ) -> Result<entity::alliance_post::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::AlliancePost::insert(entity::alliance_post::ActiveModel {
                alliance_id: ActiveValue::Set(alliance_id),
                author_id: ActiveValue::Set(author.id),
                author_display_name: ActiveValue::Set(author.display_name.clone()),
                author_community_id: ActiveValue::Set(community.id),
                author_community_name: ActiveValue::Set(community.name.clone()),
                content: ActiveValue::Set(content.to_string()),
                likes_count: ActiveValue::Set(0),
                comments_count: ActiveValue::Set(0),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.state.db)
            .await?,
        )
    }
}
