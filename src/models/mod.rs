mod assistant;
mod chat;
mod feedback;
mod page;
mod soil;
mod user;
mod weather;

pub use assistant::*;
pub use chat::*;
pub use feedback::*;
pub use page::*;
pub use soil::*;
pub use user::*;
pub use weather::*;
