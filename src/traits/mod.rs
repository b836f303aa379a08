//! Trait definitions for FreshBooks operations.
//!
//! [`Resource`] describes how an accounting model sits on the wire. The
//! operation traits are implemented by the resource clients for the calls
//! each endpoint supports.

mod create;
mod delete;
mod get;
mod list;
mod resource;
mod update;

pub use create::Create;
pub use delete::Delete;
pub use get::Get;
pub use list::List;
pub use resource::Resource;
pub use update::Update;
