// Astools Utilities Module

/// Package directory lookup and Go source listing
pub mod paths;
