pub mod faq;
pub mod maintenance;
pub mod residency;
pub mod template;

pub use faq::Faq;
pub use maintenance::{MaintenanceRequest, MaintenanceStatus};
pub use residency::Residency;
pub use template::{ResidencyTemplate, TemplateCategory, TemplateItem};
