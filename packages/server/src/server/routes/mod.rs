pub mod dashboard;
pub mod documents;
pub mod health;
pub mod insights;

pub use self::dashboard::dashboard_handler;
pub use self::documents::{list_documents_handler, upload_document_handler};
pub use self::health::health_handler;
pub use self::insights::{generate_insights_handler, list_insights_handler};
