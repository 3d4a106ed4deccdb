//! Resource clients for the hosting-provider REST API.

mod orgs;
mod repos;
mod users;

pub use orgs::OrgsClient;
pub use repos::ReposClient;
pub use users::UsersClient;
