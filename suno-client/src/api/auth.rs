//! `/auth` endpoints

use shared::{LoginRequest, MessageBody, ProfileUpdate, RegisterRequest, User, UserEnvelope};

use super::SunoApi;
use crate::ClientResult;
use crate::http::HttpClient;

impl<H: HttpClient> SunoApi<H> {
    /// `GET /auth/me`
    pub async fn me(&self) -> ClientResult<User> {
        let resp: UserEnvelope = self.http.get("/auth/me").await?;
        Ok(resp.user)
    }

    /// `POST /auth/login`
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<User> {
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let resp: UserEnvelope = self.http.post("/auth/login", &req).await?;
        Ok(resp.user)
    }

    /// `POST /auth/register`
    pub async fn register(&self, req: &RegisterRequest) -> ClientResult<User> {
        let resp: UserEnvelope = self.http.post("/auth/register", req).await?;
        Ok(resp.user)
    }

    /// `POST /auth/logout`
    pub async fn logout(&self) -> ClientResult<()> {
        let _resp: MessageBody = self.http.post_empty("/auth/logout").await?;
        Ok(())
    }

    /// `PUT /auth/profile`
    pub async fn update_profile(&self, update: &ProfileUpdate) -> ClientResult<User> {
        let resp: UserEnvelope = self.http.put("/auth/profile", update).await?;
        Ok(resp.user)
    }
}
