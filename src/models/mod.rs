pub mod climate;
pub mod diagnostic;
pub mod field_profile;
pub mod form_answers;

pub use climate::*;
pub use diagnostic::*;
pub use field_profile::*;
pub use form_answers::*;
