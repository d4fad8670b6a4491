//! Core data types for the support desk and shop stores.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Timestamp format used for tickets and comments (local time, second precision).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Current local time formatted with [`TIMESTAMP_FORMAT`].
pub fn now_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Service level a user is entitled to. Drives ticket priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlaTier {
    Standard,
    High,
    Critical,
}

impl SlaTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlaTier::Standard => "standard",
            SlaTier::High => "high",
            SlaTier::Critical => "critical",
        }
    }
}

impl fmt::Display for SlaTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ticket priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [&'static str; 3] = ["low", "medium", "high"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl FromStr for Priority {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(DeskError::InvalidValue {
                field: "priority",
                value: s.to_string(),
                expected: Priority::ALL.join(", "),
            }),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ticket lifecycle status: open → in_progress → resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
}

impl TicketStatus {
    pub const ALL: [&'static str; 3] = ["open", "in_progress", "resolved"];

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Resolved => "resolved",
        }
    }

    /// Open and in-progress tickets count as active.
    pub fn is_active(&self) -> bool {
        matches!(self, TicketStatus::Open | TicketStatus::InProgress)
    }
}

impl FromStr for TicketStatus {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(TicketStatus::Open),
            "in_progress" => Ok(TicketStatus::InProgress),
            "resolved" => Ok(TicketStatus::Resolved),
            _ => Err(DeskError::InvalidValue {
                field: "status",
                value: s.to_string(),
                expected: TicketStatus::ALL.join(", "),
            }),
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user known to the support desk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    pub name: String,
    pub department: String,
    pub machine: String,
    pub sla_tier: SlaTier,
}

/// A timestamped note attached to a ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub timestamp: String,
    pub text: String,
}

/// A support ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub title: String,
    pub description: String,
    pub user_email: String,
    pub priority: Priority,
    pub status: TicketStatus,
    pub created_at: String,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Ticket {
    /// Generate a fresh ticket ID of the form `T-XXXXXX`.
    pub fn generate_id() -> String {
        let hex = Uuid::new_v4().simple().to_string();
        format!("T-{}", hex[..6].to_uppercase())
    }

    /// Case-insensitive match of an already-lowercased keyword against title and description.
    pub fn matches(&self, keyword_lower: &str) -> bool {
        self.title.to_lowercase().contains(keyword_lower)
            || self.description.to_lowercase().contains(keyword_lower)
    }
}

/// Fields supplied when filing a new ticket.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub user_email: String,
    pub priority: Priority,
}

/// A shop customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// A product in the shop catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub description: String,
}

/// An order placed by a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub customer_id: i64,
    pub description: String,
}

impl Order {
    pub fn new(customer_id: i64, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer_id,
            description: description.into(),
        }
    }
}

/// Errors raised by store operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DeskError {
    #[error("No user profile found for email: {0}")]
    UserNotFound(String),

    #[error("No ticket found with ID: {0}")]
    TicketNotFound(String),

    #[error("No customer found with id: {0}")]
    CustomerNotFound(i64),

    #[error("Customer with id {0} already exists")]
    DuplicateCustomer(i64),

    #[error("Invalid {field} '{value}', expected one of: {expected}")]
    InvalidValue {
        field: &'static str,
        value: String,
        expected: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience result type.
pub type DeskResult<T> = Result<T, DeskError>;
