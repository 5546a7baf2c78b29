//! Standard exit codes (BSD sysexits.h compatible)

/// Command line usage error
pub const USAGE: i32 = 64;

/// Data format error (malformed or invalid model document)
pub const DATAERR: i32 = 65;

/// Cannot open input (model file missing)
pub const NOINPUT: i32 = 66;

/// Can't create output file
pub const CANTCREAT: i32 = 73;

/// Input/output error while writing a report
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;
