//! Posts, comments and likes inside a community.
//!
//! Writing requires an approved membership. Reading is public.

use entity::sea_orm_active_enums::MembershipStatus;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::{
    model::post::{CommentDto, LikeDto, PostDto},
    server::{
        data::community::{
            comment::CommunityCommentRepository, like::CommunityLikeRepository,
            member::CommunityMemberRepository, post::CommunityPostRepository,
            CommunityRepository,
        },
        error::{community::CommunityError, membership::MembershipError, Error},
        model::db::{CommunityPostModel, UserModel},
        service::{community::find_community, retry::RetryContext},
        util::validate::{required_text, MAX_CONTENT_LEN},
    },
};

pub struct CommunityPostService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CommunityPostService<'a> {
    /// Creates a new instance of [`CommunityPostService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a post and increments the community's `posts_count`
    ///
    /// # Returns
    /// - `Ok(PostDto)` - Post created
    /// - `Err(Error::MembershipError(MembershipError::NotApprovedMember))` - Author is not an
    ///   approved member
    /// - `Err(Error::CommunityError(CommunityError::NotFound))` - Community does not exist
    pub async fn create_post(
        &self,
        author: &UserModel,
        community_id: i32,
        content: &str,
    ) -> Result<PostDto, Error> {
        let content = required_text("content", content, MAX_CONTENT_LEN)?;
        let db = self.db.clone();

        RetryContext::new()
            .execute_with_retry(
                &format!("create post in community ID {} by user ID {}", community_id, author.id),
                || {
                    let db = db.clone();
                    let author = author.clone();
                    let content = content.clone();

                    Box::pin(async move {
                        let txn = db.begin().await?;

                        find_community(&txn, community_id).await?;
                        ensure_approved_member(&txn, community_id, author.id).await?;

                        let post = CommunityPostRepository::new(&txn)
                            .create(community_id, &author, content)
                            .await?;
                        CommunityRepository::new(&txn)
                            .adjust_posts_count(community_id, 1)
                            .await?;

                        txn.commit().await?;

                        Ok(PostDto::from(post))
                    })
                },
            )
            .await
    }

    /// Lists a community's posts, newest first
    pub async fn list_posts(&self, community_id: i32) -> Result<Vec<PostDto>, Error> {
        let db = self.db.clone();

        RetryContext::new()
            .execute_with_retry(&format!("list posts of community ID {}", community_id), || {
                let db = db.clone();

                Box::pin(async move {
                    find_community(&db, community_id).await?;
                    let posts = CommunityPostRepository::new(&db).list(community_id).await?;

                    Ok(posts.into_iter().map(PostDto::from).collect())
                })
            })
            .await
    }

    /// Comments on a post and increments its `comments_count`
    pub async fn create_comment(
        &self,
        author: &UserModel,
        community_id: i32,
        post_id: i32,
        content: &str,
    ) -> Result<CommentDto, Error> {
        let content = required_text("content", content, MAX_CONTENT_LEN)?;
        let db = self.db.clone();

        RetryContext::new()
            .execute_with_retry(
                &format!("comment on post ID {} by user ID {}", post_id, author.id),
                || {
                    let db = db.clone();
                    let author = author.clone();
                    let content = content.clone();

                    Box::pin(async move {
                        let txn = db.begin().await?;

                        let post = find_post(&txn, community_id, post_id).await?;
                        ensure_approved_member(&txn, community_id, author.id).await?;

                        let comment = CommunityCommentRepository::new(&txn)
                            .create(&post, &author, content)
                            .await?;
                        CommunityPostRepository::new(&txn)
                            .adjust_comments_count(post_id, 1)
                            .await?;

                        txn.commit().await?;

                        Ok(CommentDto::from(comment))
                    })
                },
            )
            .await
    }

    /// Lists a post's comments, oldest first
    pub async fn list_comments(
        &self,
        community_id: i32,
        post_id: i32,
    ) -> Result<Vec<CommentDto>, Error> {
        let db = self.db.clone();

        RetryContext::new()
            .execute_with_retry(&format!("list comments of post ID {}", post_id), || {
                let db = db.clone();

                Box::pin(async move {
                    find_post(&db, community_id, post_id).await?;
                    let comments = CommunityCommentRepository::new(&db).list(post_id).await?;

                    Ok(comments.into_iter().map(CommentDto::from).collect())
                })
            })
            .await
    }

    /// Likes a post; liking twice leaves `likes_count` unchanged
    pub async fn like(
        &self,
        user: &UserModel,
        community_id: i32,
        post_id: i32,
    ) -> Result<LikeDto, Error> {
        self.set_like(user, community_id, post_id, true).await
    }

    /// Removes a like; unliking a post that was not liked leaves `likes_count` unchanged
    pub async fn unlike(
        &self,
        user: &UserModel,
        community_id: i32,
        post_id: i32,
    ) -> Result<LikeDto, Error> {
        self.set_like(user, community_id, post_id, false).await
    }

    async fn set_like(
        &self,
        user: &UserModel,
        community_id: i32,
        post_id: i32,
        liked: bool,
    ) -> Result<LikeDto, Error> {
        let db = self.db.clone();
        let user_id = user.id;

        RetryContext::new()
            .execute_with_retry(
                &format!("set like on post ID {} by user ID {} to {}", post_id, user_id, liked),
                || {
                    let db = db.clone();

                    Box::pin(async move {
                        let txn = db.begin().await?;

                        find_post(&txn, community_id, post_id).await?;
                        ensure_approved_member(&txn, community_id, user_id).await?;

                        let like_repo = CommunityLikeRepository::new(&txn);
                        let (changed, delta) = if liked {
                            (like_repo.insert(post_id, user_id).await?, 1)
                        } else {
                            (like_repo.delete(post_id, user_id).await?, -1)
                        };

                        let post_repo = CommunityPostRepository::new(&txn);
                        if changed && post_repo.adjust_likes_count(post_id, delta).await? == 0 {
                            tracing::warn!(post_id, delta, "Like count left unchanged at its floor");
                        }
                        let post = find_post(&txn, community_id, post_id).await?;

                        txn.commit().await?;

                        Ok(LikeDto {
                            post_id,
                            liked,
                            likes_count: post.likes_count,
                        })
                    })
                },
            )
            .await
    }
}

async fn find_post<C: ConnectionTrait>(
    db: &C,
    community_id: i32,
    post_id: i32,
) -> Result<CommunityPostModel, Error> {
    CommunityPostRepository::new(db)
        .get(community_id, post_id)
        .await?
        .ok_or_else(|| CommunityError::PostNotFound(post_id).into())
}

/// Fails unless `user_id` holds an approved membership in `community_id`
pub(crate) async fn ensure_approved_member<C: ConnectionTrait>(
    db: &C,
    community_id: i32,
    user_id: i32,
) -> Result<(), Error> {
    match CommunityMemberRepository::new(db)
        .get(community_id, user_id)
        .await?
    {
        Some(member) if member.status == MembershipStatus::Approved => Ok(()),
        _ => Err(MembershipError::NotApprovedMember.into()),
    }
}
