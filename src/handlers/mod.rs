pub mod activity_links;
pub mod comments;
pub mod communities;
pub mod health;
pub mod posts;
pub mod reactions;
