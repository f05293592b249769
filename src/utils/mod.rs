//! Cross-cutting helpers shared by the readers.

pub mod parallel;
