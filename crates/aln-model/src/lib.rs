mod error;
pub use error::ModelError;

mod domain;
pub use domain::{Encoding, FormatTag, RequiredInput, SlotRole};

mod slot;
pub use slot::ParameterSlot;

mod job;
pub use job::JobDescription;
