//! Posts, comments and likes inside an alliance.
//!
//! Authors write on behalf of one of their communities, which must be an approved member of
//! the alliance. Every post and comment is tagged with that community.

use entity::sea_orm_active_enums::MembershipStatus;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::{
    model::post::{AllianceCommentDto, AlliancePostDto, LikeDto},
    server::{
        data::{
            alliance::{
                comment::AllianceCommentRepository, like::AllianceLikeRepository,
                member::AllianceMemberRepository, post::AlliancePostRepository,
            },
            community::CommunityRepository,
        },
        error::{alliance::AllianceError, membership::MembershipError, Error},
        model::db::{AlliancePostModel, CommunityModel, UserModel},
        service::{
            alliance::find_alliance,
            community::{find_community, post::ensure_approved_member},
            retry::RetryContext,
        },
        util::validate::{required_text, MAX_CONTENT_LEN},
    },
};

pub struct AlliancePostService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AlliancePostService<'a> {
    /// Creates a new instance of [`AlliancePostService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a post on behalf of `community_id`
    ///
    /// # Returns
    /// - `Ok(AlliancePostDto)` - Post created
    /// - `Err(Error::AllianceError(AllianceError::NotAllianceMember))` - Community is not an
    ///   approved member of the alliance
    /// - `Err(Error::MembershipError(MembershipError::NotApprovedMember))` - Author is not an
    ///   approved member of the community
    pub async fn create_post(
        &self,
        author: &UserModel,
        alliance_id: i32,
        community_id: i32,
        content: &str,
    ) -> Result<AlliancePostDto, Error> {
        let content = required_text("content", content, MAX_CONTENT_LEN)?;
        let db = self.db.clone();

        RetryContext::new()
            .execute_with_retry(
                &format!("create post in alliance ID {} by user ID {}", alliance_id, author.id),
                || {
                    let db = db.clone();
                    let author = author.clone();
                    let content = content.clone();

                    Box::pin(async move {
                        let txn = db.begin().await?;

                        find_alliance(&txn, alliance_id).await?;
                        let community =
                            find_author_community(&txn, alliance_id, community_id, author.id)
                                .await?;

                        let post = AlliancePostRepository::new(&txn)
                            .create(alliance_id, &author, &community, content)
                            .await?;

                        txn.commit().await?;

                        Ok(AlliancePostDto::from(post))
                    })
                },
            )
            .await
    }

    /// Lists an alliance's posts, newest first
    pub async fn list_posts(&self, alliance_id: i32) -> Result<Vec<AlliancePostDto>, Error> {
        let db = self.db.clone();

        RetryContext::new()
            .execute_with_retry(&format!("list posts of alliance ID {}", alliance_id), || {
                let db = db.clone();

                Box::pin(async move {
                    find_alliance(&db, alliance_id).await?;
                    let posts = AlliancePostRepository::new(&db).list(alliance_id).await?;

                    Ok(posts.into_iter().map(AlliancePostDto::from).collect())
                })
            })
            .await
    }

    /// Comments on a post on behalf of `community_id` and increments its `comments_count`
    pub async fn create_comment(
        &self,
        author: &UserModel,
        alliance_id: i32,
        post_id: i32,
        community_id: i32,
        content: &str,
    ) -> Result<AllianceCommentDto, Error> {
        let content = required_text("content", content, MAX_CONTENT_LEN)?;
        let db = self.db.clone();

        RetryContext::new()
            .execute_with_retry(
                &format!("comment on alliance post ID {} by user ID {}", post_id, author.id),
                || {
                    let db = db.clone();
                    let author = author.clone();
                    let content = content.clone();

                    Box::pin(async move {
                        let txn = db.begin().await?;

                        let post = find_post(&txn, alliance_id, post_id).await?;
                        let community =
                            find_author_community(&txn, alliance_id, community_id, author.id)
                                .await?;

                        let comment = AllianceCommentRepository::new(&txn)
                            .create(&post, &author, &community, content)
                            .await?;
                        AlliancePostRepository::new(&txn)
                            .adjust_comments_count(post_id, 1)
                            .await?;

                        txn.commit().await?;

                        Ok(AllianceCommentDto::from(comment))
                    })
                },
            )
            .await
    }

    /// Lists a post's comments, oldest first
    pub async fn list_comments(
        &self,
        alliance_id: i32,
        post_id: i32,
    ) -> Result<Vec<AllianceCommentDto>, Error> {
        let db = self.db.clone();

        RetryContext::new()
            .execute_with_retry(&format!("list comments of alliance post ID {}", post_id), || {
                let db = db.clone();

                Box::pin(async move {
                    find_post(&db, alliance_id, post_id).await?;
                    let comments = AllianceCommentRepository::new(&db).list(post_id).await?;

                    Ok(comments.into_iter().map(AllianceCommentDto::from).collect())
                })
            })
            .await
    }

    /// Likes a post; liking twice leaves `likes_count` unchanged
    pub async fn like(
        &self,
        user: &UserModel,
        alliance_id: i32,
        post_id: i32,
    ) -> Result<LikeDto, Error> {
        self.set_like(user, alliance_id, post_id, true).await
    }

    /// Removes a like; unliking a post that was not liked leaves `likes_count` unchanged
    pub async fn unlike(
        &self,
        user: &UserModel,
        alliance_id: i32,
        post_id: i32,
    ) -> Result<LikeDto, Error> {
        self.set_like(user, alliance_id, post_id, false).await
    }

    async fn set_like(
        &self,
        user: &UserModel,
        alliance_id: i32,
        post_id: i32,
        liked: bool,
    ) -> Result<LikeDto, Error> {
        let db = self.db.clone();
        let user_id = user.id;

        RetryContext::new()
            .execute_with_retry(
                &format!(
                    "set like on alliance post ID {} by user ID {} to {}",
                    post_id, user_id, liked
                ),
                || {
                    let db = db.clone();

                    Box::pin(async move {
                        let txn = db.begin().await?;

                        find_post(&txn, alliance_id, post_id).await?;
                        let in_alliance = CommunityRepository::new(&txn)
                            .joined_by(user_id)
                            .await?
                            .iter()
                            .any(|community| community.alliance_id == Some(alliance_id));
                        if !in_alliance {
                            return Err(MembershipError::NotApprovedMember.into());
                        }

                        let like_repo = AllianceLikeRepository::new(&txn);
                        let (changed, delta) = if liked {
                            (like_repo.insert(post_id, user_id).await?, 1)
                        } else {
                            (like_repo.delete(post_id, user_id).await?, -1)
                        };

                        if changed
                            && AlliancePostRepository::new(&txn)
                                .adjust_likes_count(post_id, delta)
                                .await?
                                == 0
                        {
                            tracing::warn!(post_id, delta, "Like count left unchanged at its floor");
                        }
                        let post = find_post(&txn, alliance_id, post_id).await?;

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
    alliance_id: i32,
    post_id: i32,
) -> Result<AlliancePostModel, Error> {
    AlliancePostRepository::new(db)
        .get(alliance_id, post_id)
        .await?
        .ok_or_else(|| AllianceError::PostNotFound(post_id).into())
}

/// Resolves the community an author writes for, checking both membership levels
async fn find_author_community<C: ConnectionTrait>(
    db: &C,
    alliance_id: i32,
    community_id: i32,
    author_id: i32,
) -> Result<CommunityModel, Error> {
    let community = find_community(db, community_id).await?;

    let approved = AllianceMemberRepository::new(db)
        .get(alliance_id, community_id)
        .await?
        .is_some_and(|member| member.status == MembershipStatus::Approved);
    if !approved {
        return Err(AllianceError::NotAllianceMember(community_id).into());
    }
    ensure_approved_member(db, community_id, author_id).await?;

    Ok(community)
}
