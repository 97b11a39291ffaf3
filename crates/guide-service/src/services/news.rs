//! News articles: public reading, admin publishing

use tracing::{info, instrument};

use guide_core::entities::{AdminAction, NewNews, NewsPatch};
use guide_core::DomainError;

use crate::dto::{CreateNewsRequest, NewsResponse, PaginatedResponse, UpdateNewsRequest};

use super::access::require_admin;
use super::audit::AuditLogger;
use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct NewsService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NewsService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Published articles, newest first
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        page: u32,
        per_page: u32,
    ) -> ServiceResult<PaginatedResponse<NewsResponse>> {
        let page = page.max(1);
        let limit = i64::from(per_page);
        let news = self
            .ctx
            .news_repo()
            .list(limit, i64::from(page - 1) * limit)
            .await?;
        let total = self.ctx.news_repo().count().await?;

        Ok(PaginatedResponse::new(
            news.iter().map(NewsResponse::from).collect(),
            page,
            per_page,
            total,
        ))
    }

    /// Read an article and count the view
    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> ServiceResult<NewsResponse> {
        self.ctx
            .news_repo()
            .find_and_increment_views(id)
            .await?
            .map(NewsResponse::from)
            .ok_or_else(|| DomainError::NewsNotFound(id).into())
    }

    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create(
        &self,
        admin_id: i64,
        request: CreateNewsRequest,
    ) -> ServiceResult<NewsResponse> {
        let admin = require_admin(self.ctx, admin_id).await?;
        let new = NewNews::new(&request.title, &request.content, request.image_url, admin.id)?;
        let news = self.ctx.news_repo().create(&new).await?;

        AuditLogger::new(self.ctx)
            .record(
                admin.id,
                AdminAction::Create,
                "News",
                news.id,
                format!("Created news: {}", news.title),
            )
            .await;

        info!(news_id = news.id, "News created");
        Ok(NewsResponse::from(news))
    }

    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        admin_id: i64,
        id: i64,
        request: UpdateNewsRequest,
    ) -> ServiceResult<NewsResponse> {
        let admin = require_admin(self.ctx, admin_id).await?;
        let mut news = self
            .ctx
            .news_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NewsNotFound(id))?;

        news.apply(NewsPatch {
            title: request.title,
            content: request.content,
            image_url: request.image_url,
        })?;
        self.ctx.news_repo().update(&news).await?;

        AuditLogger::new(self.ctx)
            .record(
                admin.id,
                AdminAction::Update,
                "News",
                id,
                format!("Updated news: {}", news.title),
            )
            .await;

        Ok(NewsResponse::from(news))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, admin_id: i64, id: i64) -> ServiceResult<()> {
        let admin = require_admin(self.ctx, admin_id).await?;
        let news = self
            .ctx
            .news_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NewsNotFound(id))?;

        self.ctx.news_repo().delete(id).await?;

        AuditLogger::new(self.ctx)
            .record(
                admin.id,
                AdminAction::Delete,
                "News",
                id,
                format!("Deleted news: {}", news.title),
            )
            .await;

        Ok(())
    }
}
