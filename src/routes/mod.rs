/// Router Module Index
///
/// Routes are segregated by how they relate to the session gate. API routes
/// live under `/api`, which the gate never inspects; page routes are gated.

/// Session entry points and route/menu metadata. Reachable without a session.
pub mod public;

/// Server actions. The session token, when present, is forwarded to the
/// backend, which decides what the caller may do.
pub mod authenticated;

/// Page shells behind the authentication gate, legal pages included.
pub mod pages;
