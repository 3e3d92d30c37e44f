mod error;
pub use error::{ExecError, ExecResult};

mod runner;
pub use runner::JobRunner;

mod spawn;
pub use spawn::SpawnExecutor;

pub mod r#fn;
pub use r#fn::FnRunner;

#[cfg(feature = "proc")]
pub mod proc;
#[cfg(feature = "proc")]
pub use proc::{ProcConfig, ProcRunner};

#[cfg(feature = "proc")]
mod util;

pub mod prelude {
    pub use crate::error::{ExecError, ExecResult};
    pub use crate::{FnRunner, JobRunner, SpawnExecutor};
    #[cfg(feature = "proc")]
    pub use crate::{ProcConfig, ProcRunner};
}
