use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    api::{ApiError, Employee, EmployeePayload, EmployeeShift, Role, Shift},
    components::data_table::{Column, TableRowData},
};

pub const PHONE_LENGTH: usize = 10;
pub const USERNAME_MIN: usize = 4;
pub const USERNAME_MAX: usize = 20;
pub const PASSWORD_MIN: usize = 8;

/// Field key to message. Keys match the form's input names.
pub type FieldErrors = BTreeMap<&'static str, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeFormState {
    pub id: Option<i64>,
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub department: String,
    pub designation: String,
    pub active: bool,
    pub password: String,
    pub shift_id: Option<i64>,
}

impl Default for EmployeeFormState {
    fn default() -> Self {
        Self {
            id: None,
            full_name: String::new(),
            username: String::new(),
            email: String::new(),
            phone: String::new(),
            role: Role::Employee,
            department: String::new(),
            designation: String::new(),
            active: true,
            password: String::new(),
            shift_id: None,
        }
    }
}

impl EmployeeFormState {
    pub fn from_employee(employee: &Employee, shift_id: Option<i64>) -> Self {
        Self {
            id: Some(employee.id),
            full_name: employee.full_name.clone(),
            username: employee.username.clone(),
            email: employee.email.clone().unwrap_or_default(),
            phone: employee.phone.clone().unwrap_or_default(),
            role: employee.role,
            department: employee.department.clone().unwrap_or_default(),
            designation: employee.designation.clone().unwrap_or_default(),
            active: employee.active,
            password: String::new(),
            shift_id,
        }
    }

    pub fn is_create(&self) -> bool {
        self.id.is_none()
    }

    /// Shift assignment only applies to the EMPLOYEE role.
    pub fn target_shift(&self) -> Option<i64> {
        if self.role == Role::Employee {
            self.shift_id
        } else {
            None
        }
    }

    pub fn validate(&self) -> Result<EmployeePayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Err(msg) = validate_name(&self.full_name) {
            errors.insert("fullName", msg.into());
        }
        if let Err(msg) = validate_username(&self.username) {
            errors.insert("username", msg.into());
        }
        if let Err(msg) = validate_email(&self.email) {
            errors.insert("email", msg.into());
        }
        if let Err(msg) = validate_phone(&self.phone) {
            errors.insert("phone", msg.into());
        }
        // Editing keeps the stored password unless a new one is typed.
        if self.is_create() || !self.password.is_empty() {
            if let Err(msg) = validate_password(&self.password) {
                errors.insert("password", msg.into());
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(EmployeePayload {
            full_name: self.full_name.trim().to_string(),
            username: self.username.trim().to_string(),
            email: optional(&self.email),
            phone: optional(&self.phone),
            role: self.role,
            department: optional(&self.department),
            designation: optional(&self.designation),
            active: self.active,
            password: (!self.password.is_empty()).then(|| self.password.clone()),
        })
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub fn validate_name(name: &str) -> Result<(), &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Name is required");
    }
    if !name
        .chars()
        .all(|c| c.is_alphabetic() || c == ' ' || c == '.' || c == '\'' || c == '-')
    {
        return Err("Name may only contain letters, spaces and . ' -");
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    let phone = phone.trim();
    if phone.len() != PHONE_LENGTH || !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err("Phone must be exactly 10 digits");
    }
    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    let username = username.trim();
    let len = username.chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&len)
        || !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err("Username must be 4-20 letters, digits or underscores");
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), &'static str> {
    let long_enough = password.chars().count() >= PASSWORD_MIN;
    let upper = password.chars().any(|c| c.is_ascii_uppercase());
    let lower = password.chars().any(|c| c.is_ascii_lowercase());
    let digit = password.chars().any(|c| c.is_ascii_digit());
    let special = password.chars().any(|c| !c.is_ascii_alphanumeric() && !c.is_whitespace());
    if long_enough && upper && lower && digit && special {
        Ok(())
    } else {
        Err("Password needs 8+ characters with upper and lower case letters, a digit and a symbol")
    }
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Email is required");
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') && !domain.starts_with('.') => Ok(()),
        _ => Err("Enter a valid email address"),
    }
}

/// Maps a 409 to an inline error on the field the server complained about.
pub fn conflict_errors(error: &ApiError) -> Option<FieldErrors> {
    if !error.is_conflict() {
        return None;
    }
    let field = error.conflict_field()?;
    let mut errors = FieldErrors::new();
    errors.insert(field, format!("This {} is already in use", field));
    Some(errors)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Directory {
    pub employees: Vec<Employee>,
    pub shifts: Vec<Shift>,
    pub links: Vec<EmployeeShift>,
}

impl Directory {
    pub fn employee(&self, id: i64) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn links_for(&self, employee_id: i64) -> Vec<EmployeeShift> {
        self.links
            .iter()
            .filter(|link| link.employee_id == employee_id)
            .cloned()
            .collect()
    }

    /// Linked shift first, then whatever the employee record carries.
    pub fn shift_id_for(&self, employee: &Employee) -> Option<i64> {
        self.links
            .iter()
            .find(|link| link.employee_id == employee.id)
            .map(|link| link.shift_id)
            .or(employee.shift_id)
    }

    pub fn shift_name_for(&self, employee: &Employee) -> Option<String> {
        let id = self.shift_id_for(employee)?;
        self.shifts
            .iter()
            .find(|shift| shift.id == id)
            .map(|shift| shift.name.clone())
            .or_else(|| employee.shift_name.clone())
    }
}

pub const EMPLOYEE_COLUMNS: [Column; 8] = [
    Column::new("name", "Name"),
    Column::new("username", "Username"),
    Column::new("email", "Email"),
    Column::new("phone", "Phone"),
    Column::new("role", "Role"),
    Column::new("department", "Department"),
    Column::new("shift", "Shift"),
    Column::new("status", "Status"),
];

pub fn employee_rows(directory: &Directory) -> Vec<TableRowData> {
    directory
        .employees
        .iter()
        .map(|employee| {
            TableRowData::new(
                employee.id,
                vec![
                    employee.full_name.clone(),
                    employee.username.clone(),
                    employee.email.clone().unwrap_or_default(),
                    employee.phone.clone().unwrap_or_default(),
                    employee.role.label().to_string(),
                    employee.department.clone().unwrap_or_default(),
                    directory.shift_name_for(employee).unwrap_or_else(|| "-".into()),
                    if employee.active { "Active" } else { "Inactive" }.to_string(),
                ],
            )
        })
        .collect()
}
