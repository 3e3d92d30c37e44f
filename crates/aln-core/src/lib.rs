pub mod error;
pub use error::{CoreError, StoreError, ValidationError};

pub mod config;
pub use config::PanelConfig;

pub mod params;
pub use params::{JsonFileStore, MemoryStore, ParamChanged, ParameterStore, PropertyStore, SlotSnapshot};

pub mod guard;
pub use guard::{Acquire, ExecutionGuard, GuardState};

pub mod output;
pub use output::{Cancelled, FileChooser, OutputResolver, SaveRequest};

pub mod builder;
pub use builder::build_job;

pub mod submit;
pub use submit::{Executor, TaskSubmitter};

pub mod panel;
pub use panel::{AlignerPanel, StartOutcome};
