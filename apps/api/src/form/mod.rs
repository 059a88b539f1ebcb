// Form State Manager: owns the in-memory resume per editing session.
// Mutations are typed commands over closed section enums; completion is derived on read.

pub mod completion;
pub mod handlers;
pub mod sections;
pub mod session;
pub mod state;

pub use completion::{completion, CompletionFlags};
pub use session::SessionStore;
pub use state::{FormCommand, FormError, FormState};
