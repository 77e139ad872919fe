use crate::{OptionPath, ValueKind};

/// Errors raised by the option model.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OptionError {
	#[error("unknown option: {0}")]
	UnknownOption(OptionPath),

	#[error("option already registered: {0}")]
	DuplicateOption(OptionPath),

	#[error("type mismatch for option '{option}': expected {expected:?}, got {got}")]
	TypeMismatch {
		option: OptionPath,
		expected: ValueKind,
		got: &'static str,
	},

	#[error("invalid value for option '{option}': {reason}")]
	InvalidValue { option: OptionPath, reason: String },
}
