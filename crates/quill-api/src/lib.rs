pub mod blogs;
pub mod comments;
pub mod error;
pub mod extract;
pub mod markup;
pub mod middleware;
pub mod pages;
pub mod reply;
pub mod session;
pub mod state;
pub mod users;
