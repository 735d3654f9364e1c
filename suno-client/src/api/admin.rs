//! `/admin` endpoints

use shared::AdminStats;

use super::SunoApi;
use crate::ClientResult;
use crate::http::HttpClient;

impl<H: HttpClient> SunoApi<H> {
    /// `GET /admin/stats`
    pub async fn admin_stats(&self) -> ClientResult<AdminStats> {
        self.http.get("/admin/stats").await
    }
}
