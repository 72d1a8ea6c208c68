use super::{
    client::ApiClient,
    types::{
        ApiError, CustomerAuthResponse, CustomerProfile, EmployeeAuthResponse, EmployeeProfile,
        LoginRequest, RegisterRequest,
    },
};
use crate::messages;

impl ApiClient {
    pub async fn login(&self, request: &LoginRequest) -> Result<CustomerAuthResponse, ApiError> {
        self.post("/auth/login", request)
            .await
            .map_err(|e| e.with_fallback(messages::LOGIN_FAILED))
    }

    pub async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<CustomerAuthResponse, ApiError> {
        self.post("/auth/register", request)
            .await
            .map_err(|e| e.with_fallback(messages::REGISTER_FAILED))
    }

    /// `GET /auth/me` with the token read from durable storage.
    pub async fn customer_me(&self, token: &str) -> Result<CustomerProfile, ApiError> {
        self.get_with_token("/auth/me", token)
            .await
            .map_err(|e| e.with_fallback(messages::SESSION_CHECK_FAILED))
    }

    pub async fn employee_login(
        &self,
        request: &LoginRequest,
    ) -> Result<EmployeeAuthResponse, ApiError> {
        self.post("/admin/auth/login", request)
            .await
            .map_err(|e| e.with_fallback(messages::EMPLOYEE_LOGIN_FAILED))
    }

    pub async fn employee_me(&self, token: &str) -> Result<EmployeeProfile, ApiError> {
        self.get_with_token("/admin/auth/me", token)
            .await
            .map_err(|e| e.with_fallback(messages::SESSION_CHECK_FAILED))
    }
}
