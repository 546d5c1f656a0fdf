mod faqs;
mod register;
mod template;

pub use faqs::faqs_get;
pub use register::register_manager_post;
pub use template::template_by_code_get;
