mod faqs;
mod maintenance;
mod residencies;
mod template;

pub use faqs::{faq_patch, faqs_post};
pub use maintenance::{
    maintenance_get, maintenance_status_update, residency_maintenance_get,
};
pub use residencies::{
    residencies_get, residencies_post, residency_delete, residency_patch,
};
pub use template::{template_get, template_item_patch, template_items_post};
