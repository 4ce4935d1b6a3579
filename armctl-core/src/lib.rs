pub mod account;
pub mod error;
pub mod exec;
pub mod ops;
pub mod render;

pub use account::{AzContext, Subscription};
pub use error::{ArmError, Result};
pub use exec::{
    AzCommand, AzInvoker, CliInvoker, Executor, InvokeError, MockInvoker, Outcome, Payload,
    RawOutput,
};
pub use ops::OpResult;
