/// Account entity: balance, floor, and the deposit/withdraw/transfer
/// operations. Every balance lives behind its own lock; transfers take both
/// locks in a global order.
pub mod account;

/// Structured errors returned by every ledger operation.
pub mod error;

/// Operation ceiling and the amount checks shared by all operations.
pub mod limits;

/// Ledger commands parsed from loosely typed input, later executed by
/// [`processor`].
pub mod command;

/// Transaction processor interface, plus the in memory account registry.
pub mod processor;

/// CSV front end used by the binary and the integration tests.
pub mod bin_utils;
