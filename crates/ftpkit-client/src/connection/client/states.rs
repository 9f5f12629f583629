//! Type-state markers for FTP client connection states.

/// Marker type for the connected state.
///
/// The welcome banner has been read; only login is valid.
#[derive(Debug, Clone, Copy, Default)]
pub struct Connected;

/// Marker type for the authenticated state.
///
/// Directory queries and data transfers are valid.
#[derive(Debug, Clone, Copy, Default)]
pub struct Authenticated;
