use crate::api::types::{CustomerProfile, EmployeeProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// The start-up session check has not finished yet.
    #[default]
    Unknown,
    LoggedOut,
    LoggedIn,
}

/// Whether logging the employee out also empties the admin caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminCachePolicy {
    #[default]
    Retain,
    ClearOnLogout,
}

/// Profile data carried by a session, plus the partial update it accepts.
pub trait SessionProfile: Clone + Default + PartialEq {
    type Patch;

    fn apply(&mut self, patch: Self::Patch);
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub patronymic: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl CustomerPatch {
    /// Every non-null field of a profile returned by the server.
    pub fn from_profile(profile: &CustomerProfile) -> Self {
        Self {
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            patronymic: profile.patronymic.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
        }
    }
}

impl SessionProfile for CustomerProfile {
    type Patch = CustomerPatch;

    fn apply(&mut self, patch: CustomerPatch) {
        if let Some(v) = patch.first_name {
            self.first_name = Some(v);
        }
        if let Some(v) = patch.last_name {
            self.last_name = Some(v);
        }
        if let Some(v) = patch.patronymic {
            self.patronymic = Some(v);
        }
        if let Some(v) = patch.email {
            self.email = Some(v);
        }
        if let Some(v) = patch.phone {
            self.phone = Some(v);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub patronymic: Option<String>,
    pub email: Option<String>,
}

impl SessionProfile for EmployeeProfile {
    type Patch = EmployeePatch;

    fn apply(&mut self, patch: EmployeePatch) {
        if let Some(v) = patch.first_name {
            self.first_name = Some(v);
        }
        if let Some(v) = patch.last_name {
            self.last_name = Some(v);
        }
        if let Some(v) = patch.patronymic {
            self.patronymic = Some(v);
        }
        if let Some(v) = patch.email {
            self.email = Some(v);
        }
    }
}

/// Client-side record of one identity. The token is only set together with
/// the `LoggedIn` status, so `is_logged_in()` and `token().is_some()` always
/// agree.
#[derive(Debug, Clone, PartialEq)]
pub struct Session<P> {
    status: SessionStatus,
    token: Option<String>,
    profile: P,
}

pub type CustomerSession = Session<CustomerProfile>;
pub type EmployeeSession = Session<EmployeeProfile>;

impl<P: SessionProfile> Default for Session<P> {
    fn default() -> Self {
        Self {
            status: SessionStatus::Unknown,
            token: None,
            profile: P::default(),
        }
    }
}

impl<P: SessionProfile> Session<P> {
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.status == SessionStatus::LoggedIn
    }

    pub fn is_resolved(&self) -> bool {
        self.status != SessionStatus::Unknown
    }

    /// Profile of the logged-in identity.
    pub fn profile(&self) -> Option<&P> {
        self.is_logged_in().then_some(&self.profile)
    }

    /// Replaces the whole session with a fresh snapshot.
    pub fn establish(&mut self, profile: P, token: impl Into<String>) {
        self.profile = profile;
        self.token = Some(token.into());
        self.status = SessionStatus::LoggedIn;
    }

    /// Merges profile fields without touching the token. Returns `false` and
    /// does nothing when logged out.
    pub fn patch_profile(&mut self, patch: P::Patch) -> bool {
        if !self.is_logged_in() {
            return false;
        }
        self.profile.apply(patch);
        true
    }

    pub fn clear(&mut self) {
        self.profile = P::default();
        self.token = None;
        self.status = SessionStatus::LoggedOut;
    }
}
