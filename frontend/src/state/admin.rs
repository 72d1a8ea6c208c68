use crate::api::types::{AdminClient, Branch, Employee, Process, ProcessStats, Role};
use crate::state::cache::ResourceCache;

/// Back-office collections loaded for the logged-in employee.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminState {
    pub employees: ResourceCache<Employee>,
    pub roles: ResourceCache<Role>,
    pub branches: ResourceCache<Branch>,
    pub clients: ResourceCache<AdminClient>,
    pub processes: ResourceCache<Process>,
    pub stats: Option<ProcessStats>,
    pub loading: bool,
    pub error: Option<String>,
}

impl AdminState {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
            && self.roles.is_empty()
            && self.branches.is_empty()
            && self.clients.is_empty()
            && self.processes.is_empty()
            && self.stats.is_none()
    }
}
