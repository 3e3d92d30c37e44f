mod format;
pub use format::FormatTag;

mod encoding;
pub use encoding::Encoding;

mod role;
pub use role::SlotRole;

mod input;
pub use input::RequiredInput;
