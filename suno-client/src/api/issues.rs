//! `/issues` and `/upload` endpoints

use shared::{
    Category, CategoryList, Comment, CommentEnvelope, CommentList, Issue, IssueEnvelope, IssueList,
    IssueQuery, NewComment, NewIssue, UploadResponse, VoteRequest, VoteTally, VoteType,
};

use super::SunoApi;
use crate::ClientResult;
use crate::http::HttpClient;
use crate::media::MediaFile;

impl<H: HttpClient> SunoApi<H> {
    /// `GET /issues?...`
    pub async fn list_issues(&self, query: &IssueQuery) -> ClientResult<IssueList> {
        self.http.get_query("/issues", query).await
    }

    /// `GET /issues/categories`
    pub async fn categories(&self) -> ClientResult<Vec<Category>> {
        let resp: CategoryList = self.http.get("/issues/categories").await?;
        Ok(resp.categories)
    }

    /// `GET /issues/:id`
    pub async fn issue(&self, id: i64) -> ClientResult<Issue> {
        let resp: IssueEnvelope = self.http.get(&format!("/issues/{}", id)).await?;
        Ok(resp.issue)
    }

    /// `POST /issues`
    pub async fn create_issue(&self, issue: &NewIssue) -> ClientResult<Issue> {
        let resp: IssueEnvelope = self.http.post("/issues", issue).await?;
        Ok(resp.issue)
    }

    /// `POST /issues/:id/vote`
    ///
    /// Voting the same way twice withdraws the vote server-side; the tally
    /// returned is authoritative either way.
    pub async fn vote(&self, id: i64, vote_type: VoteType) -> ClientResult<VoteTally> {
        self.http
            .post(&format!("/issues/{}/vote", id), &VoteRequest { vote_type })
            .await
    }

    /// `GET /issues/:id/comments` (newest first)
    pub async fn comments(&self, id: i64) -> ClientResult<Vec<Comment>> {
        let resp: CommentList = self.http.get(&format!("/issues/{}/comments", id)).await?;
        Ok(resp.comments)
    }

    /// `POST /issues/:id/comments`
    pub async fn add_comment(&self, id: i64, comment: &NewComment) -> ClientResult<Comment> {
        let resp: CommentEnvelope = self
            .http
            .post(&format!("/issues/{}/comments", id), comment)
            .await?;
        Ok(resp.comment)
    }

    /// `POST /upload`, returns the stored file's URL
    pub async fn upload(&self, file: &MediaFile) -> ClientResult<String> {
        let resp: UploadResponse = self.http.upload("/upload", file).await?;
        Ok(resp.url)
    }
}
