pub mod attachment_download;
pub mod backend;
pub mod configuration;
pub mod configuration_handler;
pub mod error;
pub mod follow_list;
pub mod follow_lookup;
pub mod http;
pub mod identity;
pub mod local_follow_directory;
pub mod local_slots;
pub mod remote_follow_directory;
#[cfg(test)]
mod testutils;
pub mod types;
