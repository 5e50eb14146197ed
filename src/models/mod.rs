pub mod dns_record;
pub mod subdomain_request;
pub mod subscription;
pub mod user;
pub mod user_role;

#[allow(unused_imports)]
pub mod prelude {
    pub use super::dns_record::{self, Entity as DnsRecord};
    pub use super::subdomain_request::{self, Entity as SubdomainRequest};
    pub use super::subscription::{self, Entity as Subscription};
    pub use super::user::{self, Entity as User};
    pub use super::user_role::{self, Entity as UserRole};
}
