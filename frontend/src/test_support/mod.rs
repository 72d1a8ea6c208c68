#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod harness;

#[cfg(test)]
pub mod fixtures {
    use crate::api::types::*;

    pub fn customer_profile(id: i64) -> CustomerProfile {
        CustomerProfile {
            id: Some(id),
            first_name: Some("Ivan".into()),
            last_name: Some("Petrov".into()),
            patronymic: Some("Sergeevich".into()),
            email: Some("ivan@example.com".into()),
            phone: Some("+79990000000".into()),
            created_at: None,
            personal_info: None,
        }
    }

    pub fn employee_profile(id: i64) -> EmployeeProfile {
        EmployeeProfile {
            id: Some(id),
            first_name: Some("Olga".into()),
            last_name: Some("Smirnova".into()),
            patronymic: None,
            email: Some("olga@bank.example".into()),
            is_active: true,
            created_at: None,
            role: Some(RoleInfo {
                id: 1,
                name: "SuperAdmin".into(),
            }),
            branch: None,
        }
    }

    pub fn personal_info() -> PersonalInfo {
        PersonalInfo {
            passport_number: Some("4510 123456".into()),
            address: Some("Lenina 1".into()),
            birth_date: Some("1990-05-17".into()),
            employment_status: Some("employed".into()),
        }
    }

    pub fn account(id: i64, balance: f64) -> Account {
        Account {
            id,
            account_number: format!("40817810{:012}", id),
            balance,
            created_at: None,
        }
    }

    pub fn card(id: i64, account_id: i64) -> Card {
        Card {
            id,
            card_number: format!("4276 0000 0000 {:04}", id),
            card_type: "debit".into(),
            expiration_date: None,
            is_active: true,
            account_id,
            account: None,
        }
    }

    pub fn loan(id: i64) -> Loan {
        Loan {
            id,
            amount: 100_000.0,
            interest_rate: 12.5,
            term_months: 12,
            issued_at: None,
            is_paid: false,
            paid_amount: 0.0,
            client_id: 1,
        }
    }

    pub fn process(id: i64) -> Process {
        Process {
            id,
            process_type: "card_issue".into(),
            status: "pending".into(),
            created_at: None,
            client_id: 1,
            employee_id: None,
            branch_id: None,
        }
    }

    pub fn transaction(id: i64) -> Transaction {
        Transaction {
            id,
            transaction_type: "deposit".into(),
            amount: 50.0,
            description: None,
            created_at: None,
            status: "completed".into(),
            from_card_id: None,
            to_card_id: Some(5),
            loan_id: None,
            client_id: 1,
        }
    }

    pub fn role(id: i64, name: &str) -> Role {
        Role {
            id,
            name: name.into(),
        }
    }

    pub fn branch(id: i64) -> Branch {
        Branch {
            id,
            name: format!("Branch {}", id),
            address: "Main st. 1".into(),
            phone: None,
        }
    }

    pub fn employee(id: i64) -> Employee {
        Employee {
            id,
            first_name: "Olga".into(),
            last_name: "Smirnova".into(),
            patronymic: None,
            email: format!("employee{}@bank.example", id),
            is_active: true,
            created_at: None,
            role_id: Some(1),
            branch_id: Some(1),
            role: None,
            branch: None,
        }
    }

    pub fn admin_client(id: i64) -> AdminClient {
        AdminClient {
            id,
            first_name: "Ivan".into(),
            last_name: "Petrov".into(),
            patronymic: None,
            email: format!("client{}@example.com", id),
            phone: None,
            created_at: None,
        }
    }

    pub fn json<T: serde::Serialize>(value: &T) -> serde_json::Value {
        serde_json::to_value(value).unwrap()
    }
}
