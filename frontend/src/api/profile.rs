use super::{
    client::ApiClient,
    types::{
        ApiError, ChangeEmailRequest, ChangePasswordRequest, ChangePhoneRequest, CustomerProfile,
        MessageResponse, PersonalInfoFill, PersonalInfoSaved, ProfileUpdate,
    },
};
use crate::messages;

impl ApiClient {
    pub async fn my_profile(&self) -> Result<CustomerProfile, ApiError> {
        self.get("/profile/me")
            .await
            .map_err(|e| e.with_fallback(messages::PROFILE_LOAD_FAILED))
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<CustomerProfile, ApiError> {
        self.patch("/profile/update", update)
            .await
            .map_err(|e| e.with_fallback(messages::PROFILE_UPDATE_FAILED))
    }

    pub async fn change_password(
        &self,
        request: &ChangePasswordRequest,
    ) -> Result<MessageResponse, ApiError> {
        self.post("/profile/change-password", request)
            .await
            .map_err(|e| e.with_fallback(messages::PASSWORD_CHANGE_FAILED))
    }

    pub async fn change_email(
        &self,
        request: &ChangeEmailRequest,
    ) -> Result<CustomerProfile, ApiError> {
        self.post("/profile/change-email", request)
            .await
            .map_err(|e| e.with_fallback(messages::EMAIL_CHANGE_FAILED))
    }

    pub async fn change_phone(
        &self,
        request: &ChangePhoneRequest,
    ) -> Result<CustomerProfile, ApiError> {
        self.post("/profile/change-phone", request)
            .await
            .map_err(|e| e.with_fallback(messages::PHONE_CHANGE_FAILED))
    }

    pub async fn fill_personal_info(
        &self,
        info: &PersonalInfoFill,
    ) -> Result<PersonalInfoSaved, ApiError> {
        self.post("/personal_info/fill", info)
            .await
            .map_err(|e| e.with_fallback(messages::PERSONAL_INFO_FAILED))
    }
}
