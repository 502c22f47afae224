//! Comment Thread
//!
//! Тот же optimistic цикл, что и для голосов: комментарий появляется сразу
//! (pending, с local id), после ответа backend заменяется серверной строкой
//! или откатывается.

use crate::ports::{CommentGateway, Notice, UserNotifier};
use crate::services::optimistic::{OptimisticCell, OptimisticError, Snapshot};
use crate::{ApplicationError, ApplicationResult};
use domain::{ClientIdentity, Comment, CommentContent, SubjectId};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostOutcome {
    Posted(Comment),
    RolledBack { reason: String },
    Discarded,
}

pub struct CommentThread {
    subject: SubjectId,
    client: ClientIdentity,
    gateway: Arc<dyn CommentGateway>,
    notifier: Arc<dyn UserNotifier>,
    cell: OptimisticCell<Vec<Comment>>,
}

impl CommentThread {
    pub fn new(
        subject: SubjectId,
        client: ClientIdentity,
        gateway: Arc<dyn CommentGateway>,
        notifier: Arc<dyn UserNotifier>,
    ) -> Self {
        Self {
            subject,
            client,
            gateway,
            notifier,
            cell: OptimisticCell::new(Vec::new()),
        }
    }

    /// Displayed comments, newest first
    pub fn comments(&self) -> Vec<Comment> {
        self.cell.state()
    }

    pub fn is_pending(&self) -> bool {
        self.cell.is_pending()
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot<Vec<Comment>>> {
        self.cell.subscribe()
    }

    #[instrument(skip(self), fields(subject = %self.subject))]
    pub async fn load(&self) -> ApplicationResult<Vec<Comment>> {
        let comments = self
            .gateway
            .list_comments(&self.subject)
            .await
            .map_err(|e| ApplicationError::gateway("list comments", e))?;

        self.cell
            .replace(comments.clone())
            .map_err(|e| self.map_cell_error(e, "comment load"))?;

        info!(count = comments.len(), "comments loaded");
        Ok(comments)
    }

    /// Post a comment. Invalid content is rejected before anything is displayed.
    #[instrument(skip(self, content, author_name), fields(subject = %self.subject))]
    pub async fn post(
        &self,
        content: &str,
        author_name: Option<String>,
    ) -> ApplicationResult<PostOutcome> {
        let content = CommentContent::new(content)?;
        let author_name = author_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        let pending = Comment::pending(
            self.subject.clone(),
            self.client.clone(),
            author_name,
            content,
        );
        let local_id = pending.id.clone();

        let (ticket, ()) = self
            .cell
            .begin(|comments| {
                let mut next = Vec::with_capacity(comments.len() + 1);
                next.push(pending.clone());
                next.extend(comments.iter().cloned());
                (next, ())
            })
            .map_err(|e| self.map_cell_error(e, "comment post"))?;

        match self.gateway.insert_comment(&pending).await {
            Ok(mut saved) => {
                saved.pending = false;
                let reconciled = saved.clone();
                let applied = self.cell.commit(ticket, move |comments| {
                    if let Some(slot) = comments.iter_mut().find(|c| c.id == local_id) {
                        *slot = reconciled;
                    }
                });
                if !applied {
                    return Ok(PostOutcome::Discarded);
                }

                info!(comment_id = %saved.id, "comment posted");
                Ok(PostOutcome::Posted(saved))
            }
            Err(e) => {
                warn!(error = %e, "comment insert failed, rolling back");
                if !self.cell.rollback(ticket) {
                    return Ok(PostOutcome::Discarded);
                }

                self.notifier.notify(Notice::error(
                    "Comment failed",
                    "Your comment could not be posted. Please try again.",
                ));
                Ok(PostOutcome::RolledBack {
                    reason: e.to_string(),
                })
            }
        }
    }

    pub fn unmount(&self) {
        self.cell.unmount();
    }

    fn map_cell_error(&self, error: OptimisticError, operation: &str) -> ApplicationError {
        match error {
            OptimisticError::AlreadyPending => {
                ApplicationError::in_flight("comment", self.subject.as_str())
            }
            OptimisticError::Unmounted => ApplicationError::Unmounted {
                operation: operation.to_string(),
            },
        }
    }
}
