pub mod csv_handler;
pub mod ip;
pub mod phone;

pub use csv_handler::{export_file_name, export_leads_csv, LeadCsvRow};
pub use ip::{client_ip, user_agent};
pub use phone::{format_whatsapp, normalize_whatsapp};
