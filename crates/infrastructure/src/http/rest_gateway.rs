//! REST backend gateway
//!
//! PostgREST-style API: таблицы `tool_votes`, `tool_comments`,
//! `tool_analytics`, `newsletter_subscribers` и view `tool_vote_counts`.
//! Каждый запрос несёт anon key как `apikey` и bearer token.

use super::client::BackendClient;
use super::dto::{
    AnalyticsRow, CommentRow, NewCommentRow, SubscriberRow, UserVoteRow, VoteCountsRow, VoteRow,
};
use anyhow::Result;
use application::ports::{
    AnalyticsSink, CommentGateway, GatewayError, GatewayResult, NewsletterGateway, VoteGateway,
};
use async_trait::async_trait;
use common::OperationTimer;
use domain::config::BackendConfig;
use domain::{AnalyticsEvent, ClientIdentity, Comment, SubjectId, VoteCounts, VoteType};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::str::FromStr;
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
pub struct RestGateway {
    client: BackendClient,
    rest_url: String,
}

impl RestGateway {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        Ok(Self {
            client: BackendClient::new(config)?,
            rest_url: config.rest_url.trim_end_matches('/').to_string(),
        })
    }

    fn request(&self, method: Method, path_and_query: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/{}", self.rest_url, path_and_query))
    }

    /// Send and turn transport failures and non-2xx answers into `GatewayError`
    async fn send(&self, operation: &str, builder: RequestBuilder) -> GatewayResult<Response> {
        let mut timer = OperationTimer::new(operation);

        let result = match builder.send().await {
            Ok(response) if response.status().is_success() => {
                timer.add_field("status", response.status().as_u16());
                Ok(response)
            }
            Ok(response) => {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                Err(GatewayError::Status { status, body })
            }
            Err(e) => Err(GatewayError::Transport(e.to_string())),
        };

        timer.finish_with_result(&result);
        result
    }

    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        operation: &str,
        path_and_query: &str,
    ) -> GatewayResult<Vec<T>> {
        let response = self
            .send(operation, self.request(Method::GET, path_and_query))
            .await?;

        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }

    fn eq_filter(value: &str) -> String {
        format!("eq.{}", urlencoding::encode(value))
    }
}

#[async_trait]
impl VoteGateway for RestGateway {
    #[instrument(skip(self), fields(subject = %subject))]
    async fn fetch_counts(&self, subject: &SubjectId) -> GatewayResult<Option<VoteCounts>> {
        let query = format!(
            "tool_vote_counts?tool_id={}&select=upvotes,downvotes,score",
            Self::eq_filter(subject.as_str())
        );
        let rows: Vec<VoteCountsRow> = self.fetch_rows("fetch_vote_counts", &query).await?;

        debug!(rows = rows.len(), "vote counts fetched");
        Ok(rows.into_iter().next().map(VoteCounts::from))
    }

    #[instrument(skip(self, client), fields(subject = %subject))]
    async fn fetch_user_vote(
        &self,
        subject: &SubjectId,
        client: &ClientIdentity,
    ) -> GatewayResult<Option<VoteType>> {
        let query = format!(
            "tool_votes?tool_id={}&client_id={}&select=vote_type",
            Self::eq_filter(subject.as_str()),
            Self::eq_filter(client.as_str())
        );
        let rows: Vec<UserVoteRow> = self.fetch_rows("fetch_user_vote", &query).await?;

        rows.into_iter()
            .next()
            .map(|row| {
                VoteType::from_str(&row.vote_type).map_err(|e| GatewayError::Decode(e.to_string()))
            })
            .transpose()
    }

    #[instrument(skip(self, client), fields(subject = %subject))]
    async fn upsert_vote(
        &self,
        subject: &SubjectId,
        client: &ClientIdentity,
        vote: VoteType,
    ) -> GatewayResult<()> {
        let row = VoteRow {
            tool_id: subject.as_str(),
            client_id: client.as_str(),
            vote_type: vote,
        };
        let builder = self
            .request(Method::POST, "tool_votes?on_conflict=tool_id,client_id")
            .header("Prefer", "resolution=merge-duplicates")
            .json(&row);

        self.send("upsert_vote", builder).await?;
        Ok(())
    }

    #[instrument(skip(self, client), fields(subject = %subject))]
    async fn delete_vote(&self, subject: &SubjectId, client: &ClientIdentity) -> GatewayResult<()> {
        let query = format!(
            "tool_votes?tool_id={}&client_id={}",
            Self::eq_filter(subject.as_str()),
            Self::eq_filter(client.as_str())
        );

        self.send("delete_vote", self.request(Method::DELETE, &query))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl CommentGateway for RestGateway {
    #[instrument(skip(self), fields(subject = %subject))]
    async fn list_comments(&self, subject: &SubjectId) -> GatewayResult<Vec<Comment>> {
        let query = format!(
            "tool_comments?tool_id={}&order=created_at.desc",
            Self::eq_filter(subject.as_str())
        );
        let rows: Vec<CommentRow> = self.fetch_rows("list_comments", &query).await?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }

    #[instrument(skip(self, comment), fields(subject = %comment.subject_id))]
    async fn insert_comment(&self, comment: &Comment) -> GatewayResult<Comment> {
        let builder = self
            .request(Method::POST, "tool_comments")
            .header("Prefer", "return=representation")
            .json(&NewCommentRow::from(comment));

        let rows: Vec<CommentRow> = self
            .send("insert_comment", builder)
            .await?
            .json()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))?;

        rows.into_iter()
            .next()
            .map(Comment::from)
            .ok_or_else(|| GatewayError::Decode("insert returned no row".to_string()))
    }
}

#[async_trait]
impl AnalyticsSink for RestGateway {
    async fn record(&self, event: &AnalyticsEvent) -> GatewayResult<()> {
        let builder = self
            .request(Method::POST, "tool_analytics")
            .json(&AnalyticsRow::from(event));

        self.send("record_analytics", builder).await?;
        Ok(())
    }
}

#[async_trait]
impl NewsletterGateway for RestGateway {
    #[instrument(skip(self, email))]
    async fn subscribe(&self, email: &str, source: Option<&str>) -> GatewayResult<()> {
        let builder = self
            .request(Method::POST, "newsletter_subscribers")
            .json(&SubscriberRow { email, source });

        self.send("newsletter_subscribe", builder).await?;
        Ok(())
    }
}
