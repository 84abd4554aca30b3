pub mod emitter;
pub mod statements;
pub mod types;

pub use emitter::Emitter;
pub use statements::StatementCompiler;
