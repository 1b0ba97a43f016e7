pub mod community;
pub mod donor;
pub mod post;
pub mod response;
pub mod user;

pub use community::*;
pub use donor::*;
pub use post::*;
pub use response::*;
pub use user::*;
