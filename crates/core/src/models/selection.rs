use serde::{Deserialize, Serialize};

/// The three identifiers a booking form reads from its employee, service
/// and date controls. An empty string means the field has no choice yet;
/// presence is the only requirement and the values stay opaque.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub employee: String,
    pub service: String,
    pub date: String,
}

/// A change to a single selection field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    Employee(String),
    Service(String),
    Date(String),
}

impl Selection {
    pub fn new(
        employee: impl Into<String>,
        service: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            employee: employee.into(),
            service: service.into(),
            date: date.into(),
        }
    }

    /// All three fields carry a value.
    pub fn is_complete(&self) -> bool {
        !self.employee.is_empty() && !self.service.is_empty() && !self.date.is_empty()
    }

    /// Fold a single field change into the selection, leaving the other
    /// two fields untouched.
    pub fn apply(&mut self, change: SelectionChange) {
        match change {
            SelectionChange::Employee(value) => self.employee = value,
            SelectionChange::Service(value) => self.service = value,
            SelectionChange::Date(value) => self.date = value,
        }
    }
}
