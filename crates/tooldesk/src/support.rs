//! IT support desk store: user profiles and tickets.

use crate::types::{
    now_timestamp, Comment, DeskError, DeskResult, NewTicket, Priority, SlaTier, Ticket,
    TicketStatus, UserProfile,
};

/// Outcome of a status change.
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub ticket: Ticket,
    pub old_status: TicketStatus,
}

/// In-memory support desk. Owned by whoever serves it; no global state.
#[derive(Debug, Clone, Default)]
pub struct SupportDesk {
    users: Vec<UserProfile>,
    tickets: Vec<Ticket>,
}

impl SupportDesk {
    /// Create an empty desk.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a desk pre-populated with three users and two tickets.
    pub fn seeded() -> Self {
        let mut desk = Self::new();

        desk.add_user(UserProfile {
            email: "alice@company.com".to_string(),
            name: "Alice Johnson".to_string(),
            department: "Engineering".to_string(),
            machine: "Dell XPS 15".to_string(),
            sla_tier: SlaTier::High,
        });
        desk.add_user(UserProfile {
            email: "bob@company.com".to_string(),
            name: "Bob Smith".to_string(),
            department: "Marketing".to_string(),
            machine: "MacBook Pro 14".to_string(),
            sla_tier: SlaTier::Standard,
        });
        desk.add_user(UserProfile {
            email: "carol@company.com".to_string(),
            name: "Carol White".to_string(),
            department: "IT".to_string(),
            machine: "ThinkPad X1 Carbon".to_string(),
            sla_tier: SlaTier::Critical,
        });

        desk.insert_ticket(Ticket {
            id: "T-AA1B2C".to_string(),
            title: "VPN disconnects every 30 minutes".to_string(),
            description: "VPN drops connection repeatedly, affecting remote work.".to_string(),
            user_email: "bob@company.com".to_string(),
            priority: Priority::Medium,
            status: TicketStatus::Open,
            created_at: "2026-02-18T09:00:00".to_string(),
            comments: Vec::new(),
        });
        desk.insert_ticket(Ticket {
            id: "T-DD3E4F".to_string(),
            title: "Outlook not syncing emails".to_string(),
            description: "Outlook inbox stuck, emails not arriving since Monday.".to_string(),
            user_email: "alice@company.com".to_string(),
            priority: Priority::High,
            status: TicketStatus::InProgress,
            created_at: "2026-02-19T14:30:00".to_string(),
            comments: Vec::new(),
        });

        desk
    }

    pub fn add_user(&mut self, user: UserProfile) {
        self.users.push(user);
    }

    /// Insert a fully-formed ticket as-is.
    pub fn insert_ticket(&mut self, ticket: Ticket) {
        self.tickets.push(ticket);
    }

    pub fn users(&self) -> &[UserProfile] {
        &self.users
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn ticket(&self, id: &str) -> DeskResult<&Ticket> {
        self.tickets
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| DeskError::TicketNotFound(id.to_string()))
    }

    fn ticket_mut(&mut self, id: &str) -> DeskResult<&mut Ticket> {
        self.tickets
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| DeskError::TicketNotFound(id.to_string()))
    }

    /// Tickets of any status whose title or description contains `keyword`, ignoring case.
    pub fn search(&self, keyword: &str) -> Vec<&Ticket> {
        let keyword = keyword.to_lowercase();
        self.tickets.iter().filter(|t| t.matches(&keyword)).collect()
    }

    /// File a new open ticket and return it.
    pub fn create_ticket(&mut self, new: NewTicket) -> DeskResult<&Ticket> {
        if new.title.trim().is_empty() {
            return Err(DeskError::InvalidInput("title must not be empty".to_string()));
        }
        if new.user_email.trim().is_empty() {
            return Err(DeskError::InvalidInput(
                "user_email must not be empty".to_string(),
            ));
        }

        let ticket = Ticket {
            id: self.unused_ticket_id(),
            title: new.title,
            description: new.description,
            user_email: new.user_email,
            priority: new.priority,
            status: TicketStatus::Open,
            created_at: now_timestamp(),
            comments: Vec::new(),
        };
        tracing::debug!("Created ticket {} ({})", ticket.id, ticket.priority);

        self.tickets.push(ticket);
        let index = self.tickets.len() - 1;
        Ok(&self.tickets[index])
    }

    fn unused_ticket_id(&self) -> String {
        loop {
            let id = Ticket::generate_id();
            if !self.tickets.iter().any(|t| t.id == id) {
                return id;
            }
        }
    }

    /// Set a ticket's status, returning the updated ticket and its previous status.
    pub fn update_status(&mut self, id: &str, status: TicketStatus) -> DeskResult<StatusChange> {
        let ticket = self.ticket_mut(id)?;
        let old_status = ticket.status;
        ticket.status = status;
        tracing::debug!("Ticket {id}: {old_status} -> {status}");
        Ok(StatusChange {
            ticket: ticket.clone(),
            old_status,
        })
    }

    /// Active tickets, optionally restricted to one priority.
    pub fn open_tickets(&self, priority: Option<Priority>) -> Vec<&Ticket> {
        self.tickets
            .iter()
            .filter(|t| t.status.is_active())
            .filter(|t| priority.map_or(true, |p| t.priority == p))
            .collect()
    }

    /// Append a timestamped comment to a ticket.
    pub fn add_comment(&mut self, id: &str, text: &str) -> DeskResult<(&Ticket, Comment)> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DeskError::InvalidInput(
                "comment must not be empty".to_string(),
            ));
        }

        let comment = Comment {
            timestamp: now_timestamp(),
            text: text.to_string(),
        };
        let ticket = self.ticket_mut(id)?;
        ticket.comments.push(comment.clone());
        Ok((&*ticket, comment))
    }

    /// Look up a user by email, ignoring case and surrounding whitespace.
    pub fn profile(&self, email: &str) -> DeskResult<&UserProfile> {
        let email = email.trim().to_lowercase();
        self.users
            .iter()
            .find(|u| u.email.to_lowercase() == email)
            .ok_or(DeskError::UserNotFound(email))
    }
}
