pub mod forecast;
pub mod init;
pub mod serve;
pub mod sync;

pub use forecast::forecast;
pub use init::init;
pub use serve::serve;
pub use sync::{pull, push};
