pub mod access_code;
pub mod identity;
pub mod maintenance;
pub mod provisioning;
pub mod scope;
