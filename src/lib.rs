pub mod analysis;
pub mod cache;
pub mod confirm;
pub mod dialogs;
pub mod error;
pub mod mirror;
pub mod model;
pub mod notice;
pub mod remote;
pub mod session;
pub mod store;
pub mod upload;

#[cfg(test)]
mod test_support;
