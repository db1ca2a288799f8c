pub mod resolver;
pub mod roots;

// Public API exports
pub use resolver::PathResolver;
pub use roots::RootMap;
