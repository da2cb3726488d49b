pub mod definition;
pub mod kind;
pub mod value;

pub use definition::FieldDefinition;
pub use kind::FieldKind;
pub use value::{FieldValue, ValueError};
