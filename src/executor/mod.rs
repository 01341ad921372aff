/// Executor module - turns operation calls into statements and runs them
///
/// Structure:
/// - builder: per-verb SQL text + bound parameters
/// - runner: runs a built statement on the held connection, shapes the result
/// - result: `QueryResult` variants
/// - dispatcher: `invoke(name, args)` facade over parser -> builder -> runner

mod builder;
mod runner;
mod result;
mod dispatcher;

pub use result::QueryResult;
pub use dispatcher::Dispatcher;
