//! Tool registry, dispatcher, and the tools themselves.

pub mod descriptor;
pub mod dispatcher;
pub mod registry;
pub mod summaries;
pub mod toolsets;

pub mod add_comment;
pub mod create_ticket;
pub mod list_open_tickets;
pub mod search_tickets;
pub mod update_ticket_status;
pub mod get_user_profile;

pub mod add_customer;
pub mod get_customer;
pub mod get_orders;
pub mod list_products;
pub mod place_order;

pub mod echo;
pub mod process_csv;

pub use descriptor::{Arguments, ParamSpec, ParamType, ToolDescriptor};
pub use dispatcher::{Dispatcher, ToolService};
pub use registry::{RegisteredTool, ToolHandler, ToolRegistry};
pub use toolsets::Toolset;
