pub mod descriptor;
pub mod dispatch;
pub mod engine;
pub mod presenter;
pub mod renderer;
pub mod submission;
pub mod validation;

pub use descriptor::{FieldDescriptor, FieldKey, FieldType, FormDocument, Scalar, ValidationPattern};
pub use dispatch::{Constraints, Dispatcher, FieldInstruction, WidgetKind, REQUIRED_MESSAGE};
pub use engine::{FieldHandle, FormEngine, FormEvent, SubmitOutcome, ValidationMode};
pub use renderer::{FormRenderer, RenderOptions};
pub use submission::FormValues;
pub use validation::{ErrorKind, FieldError, ValidationErrors};
