use serde_json::Value;

use super::{
    client::ApiClient,
    types::{
        AdminClient, ApiError, Branch, BranchDraft, Employee, EmployeeActiveToggled,
        EmployeeCreate, EmployeeUpdate, Process, ProcessStats, Role, RoleDraft,
    },
};
use crate::messages;

/// Page size used by the back office client list.
pub const CLIENT_PAGE_LIMIT: u32 = 100;

impl ApiClient {
    pub async fn employees(&self) -> Result<Vec<Employee>, ApiError> {
        self.get("/employees/")
            .await
            .map_err(|e| e.with_fallback(messages::EMPLOYEES_LOAD_FAILED))
    }

    pub async fn register_employee(&self, payload: &EmployeeCreate) -> Result<Employee, ApiError> {
        self.post("/admin/auth/register", payload)
            .await
            .map_err(|e| e.with_fallback(messages::EMPLOYEE_UPDATE_FAILED))
    }

    pub async fn update_employee(
        &self,
        employee_id: i64,
        payload: &EmployeeUpdate,
    ) -> Result<Employee, ApiError> {
        self.patch(&format!("/employees/{}", employee_id), payload)
            .await
            .map_err(|e| e.with_fallback(messages::EMPLOYEE_UPDATE_FAILED))
    }

    pub async fn toggle_employee_active(
        &self,
        employee_id: i64,
    ) -> Result<EmployeeActiveToggled, ApiError> {
        self.patch_empty(&format!("/employees/{}/toggle-active", employee_id))
            .await
            .map_err(|e| e.with_fallback(messages::EMPLOYEE_UPDATE_FAILED))
    }

    pub async fn delete_employee(&self, employee_id: i64) -> Result<Value, ApiError> {
        self.delete(&format!("/employees/{}", employee_id))
            .await
            .map_err(|e| e.with_fallback(messages::EMPLOYEE_DELETE_FAILED))
    }

    pub async fn roles(&self) -> Result<Vec<Role>, ApiError> {
        self.get("/roles/")
            .await
            .map_err(|e| e.with_fallback(messages::ROLES_LOAD_FAILED))
    }

    pub async fn create_role(&self, draft: &RoleDraft) -> Result<Role, ApiError> {
        self.post("/roles/", draft)
            .await
            .map_err(|e| e.with_fallback(messages::ROLE_SAVE_FAILED))
    }

    pub async fn update_role(&self, role_id: i64, draft: &RoleDraft) -> Result<Role, ApiError> {
        self.patch(&format!("/roles/{}", role_id), draft)
            .await
            .map_err(|e| e.with_fallback(messages::ROLE_SAVE_FAILED))
    }

    pub async fn delete_role(&self, role_id: i64) -> Result<Value, ApiError> {
        self.delete(&format!("/roles/{}", role_id))
            .await
            .map_err(|e| e.with_fallback(messages::ROLE_DELETE_FAILED))
    }

    pub async fn branches(&self) -> Result<Vec<Branch>, ApiError> {
        self.get("/branches/")
            .await
            .map_err(|e| e.with_fallback(messages::BRANCHES_LOAD_FAILED))
    }

    pub async fn create_branch(&self, draft: &BranchDraft) -> Result<Branch, ApiError> {
        self.post("/branches/", draft)
            .await
            .map_err(|e| e.with_fallback(messages::BRANCH_SAVE_FAILED))
    }

    pub async fn update_branch(
        &self,
        branch_id: i64,
        draft: &BranchDraft,
    ) -> Result<Branch, ApiError> {
        self.patch(&format!("/branches/{}", branch_id), draft)
            .await
            .map_err(|e| e.with_fallback(messages::BRANCH_SAVE_FAILED))
    }

    pub async fn delete_branch(&self, branch_id: i64) -> Result<Value, ApiError> {
        self.delete(&format!("/branches/{}", branch_id))
            .await
            .map_err(|e| e.with_fallback(messages::BRANCH_DELETE_FAILED))
    }

    pub async fn clients(&self, skip: u32, limit: u32) -> Result<Vec<AdminClient>, ApiError> {
        self.get_with_query(
            "/admin/clients/",
            &[("skip", skip.to_string()), ("limit", limit.to_string())],
        )
        .await
        .map_err(|e| e.with_fallback(messages::CLIENTS_LOAD_FAILED))
    }

    pub async fn search_clients(&self, query: &str) -> Result<Vec<AdminClient>, ApiError> {
        self.get_with_query("/admin/clients/search", &[("query", query.to_string())])
            .await
            .map_err(|e| e.with_fallback(messages::CLIENT_SEARCH_FAILED))
    }

    pub async fn pending_processes(&self) -> Result<Vec<Process>, ApiError> {
        self.get("/admin/processes/pending")
            .await
            .map_err(|e| e.with_fallback(messages::PENDING_PROCESSES_FAILED))
    }

    pub async fn decide_process(
        &self,
        process_id: i64,
        decision: ProcessDecision,
    ) -> Result<Process, ApiError> {
        self.patch_empty(&format!(
            "/admin/processes/{}/{}",
            process_id,
            decision.as_path()
        ))
        .await
        .map_err(|e| e.with_fallback(messages::PROCESS_DECISION_FAILED))
    }

    pub async fn process_overview(&self) -> Result<ProcessStats, ApiError> {
        self.get("/admin/processes/stats/overview")
            .await
            .map_err(|e| e.with_fallback(messages::OVERVIEW_STATS_FAILED))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessDecision {
    Approve,
    Reject,
    Complete,
}

impl ProcessDecision {
    pub fn as_path(self) -> &'static str {
        match self {
            ProcessDecision::Approve => "approve",
            ProcessDecision::Reject => "reject",
            ProcessDecision::Complete => "complete",
        }
    }
}
