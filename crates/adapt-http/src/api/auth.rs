use crate::client::HttpClient;
use crate::error::HttpError;
use crate::requests::{CreateUserRequest, CreateUserResponse, LoginRequest, LoginResponse};

impl HttpClient {
    /// Exchanges credentials for a token and installs it on this client.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, HttpError> {
        let response: LoginResponse = self
            .post("/login", &LoginRequest { email, password })
            .await?;
        self.set_token(response.token.clone());
        tracing::info!(user_id = %response.user_id, "logged in");
        Ok(response)
    }

    /// Registers a new account and installs its token on this client.
    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<CreateUserResponse, HttpError> {
        let response: CreateUserResponse = self
            .post(
                "/users",
                &CreateUserRequest {
                    username,
                    email,
                    password,
                },
            )
            .await?;
        self.set_token(response.token.clone());
        tracing::info!(user_id = %response.id, "registered new account");
        Ok(response)
    }
}
